//! Iterating the yields of a sequence that takes no input.
//!
//! [`SequenceIter`] drives a [`Sequence<(), O>`] by hand: the first call to
//! `next` starts it, every later call resumes it with `()`. Items are
//! `Result<O, E>`; an error ends the iteration. The final result stays inside
//! the iterator, so iterate through `&mut` to read it afterwards.
//!
//! ```rust
//! use trampoline::prelude::*;
//!
//! let mut iter = iter(from_iter::<_, String>(["a", "b"]));
//! let values: Vec<_> = iter.by_ref().collect::<Result<_, _>>().unwrap();
//! assert_eq!(values, vec!["a", "b"]);
//! assert_eq!(iter.into_return(), Some(()));
//! ```

use crate::{
    sequence::{Resume, Sequence},
    step::Step,
};

/// Iterator adapter for [`Sequence<(), O>`].
///
/// Both `SequenceIter` and `&mut SequenceIter` implement `Iterator`.
pub struct SequenceIter<O, S>
where
    S: Sequence<(), O>,
{
    state: IterState<O, S>,
}

enum IterState<O, S>
where
    S: Sequence<(), O>,
{
    Fresh(S),
    Active(S),
    Complete(S::Return),
    Failed,
    Invalid,
}

/// Iterate the yields of `sequence`.
pub fn iter<O, S>(sequence: S) -> SequenceIter<O, S>
where
    S: Sequence<(), O>,
{
    SequenceIter::new(sequence)
}

impl<O, S> SequenceIter<O, S>
where
    S: Sequence<(), O>,
{
    /// Wrap an unstarted sequence; the first `next` starts it.
    pub fn new(sequence: S) -> Self {
        Self {
            state: IterState::Fresh(sequence),
        }
    }

    /// Returns `true` once the sequence has completed.
    pub fn is_complete(&self) -> bool {
        matches!(self.state, IterState::Complete(_))
    }

    /// Returns `true` if the sequence failed; the error was the last item.
    pub fn is_failed(&self) -> bool {
        matches!(self.state, IterState::Failed)
    }

    /// Consume the iterator and return the final value, if the sequence completed.
    pub fn into_return(self) -> Option<S::Return> {
        match self.state {
            IterState::Complete(ret) => Some(ret),
            _ => None,
        }
    }

    /// Borrow the final value, if the sequence completed.
    pub fn return_value(&self) -> Option<&S::Return> {
        match &self.state {
            IterState::Complete(ret) => Some(ret),
            _ => None,
        }
    }
}

impl<O, S> Iterator for SequenceIter<O, S>
where
    S: Sequence<(), O>,
{
    type Item = Result<O, S::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let (mut sequence, resume) = match std::mem::replace(&mut self.state, IterState::Invalid) {
            IterState::Fresh(sequence) => (sequence, Resume::Start),
            IterState::Active(sequence) => (sequence, Resume::Value(())),
            done => {
                self.state = done;
                return None;
            }
        };
        match sequence.advance(resume) {
            Ok(Step::Yielded(output)) => {
                self.state = IterState::Active(sequence);
                Some(Ok(output))
            }
            Ok(Step::Complete(ret)) => {
                self.state = IterState::Complete(ret);
                None
            }
            Err(error) => {
                self.state = IterState::Failed;
                Some(Err(error))
            }
        }
    }
}
