use crate::{
    error::Error,
    sequence::{Resume, Resumed, Sequence},
    step::Step,
};

/// A sequence that refuses to advance once it has finished.
///
/// After the wrapped sequence completes or fails, every further advance returns
/// [`Error::Completed`] without touching it. Created with [`fuse`] or
/// [`Sequence::fuse`].
pub struct Fuse<S> {
    sequence: S,
    finished: bool,
}

/// Wrap `sequence` so it cannot be advanced past its end.
pub fn fuse<S>(sequence: S) -> Fuse<S> {
    Fuse {
        sequence,
        finished: false,
    }
}

impl<S> Fuse<S> {
    /// Returns `true` once the wrapped sequence has completed or failed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Unwrap the sequence, whether or not it has finished.
    pub fn into_inner(self) -> S {
        self.sequence
    }
}

impl<I, O, S> Sequence<I, O> for Fuse<S>
where
    S: Sequence<I, O>,
    S::Error: From<Error>,
{
    type Return = S::Return;
    type Error = S::Error;

    fn advance(&mut self, resume: Resume<I, Self::Error>) -> Resumed<O, S::Return, S::Error> {
        if self.finished {
            return Err(Error::Completed.into());
        }
        let step = self.sequence.advance(resume);
        self.finished = !matches!(step, Ok(Step::Yielded(_)));
        step
    }
}
