use std::marker::PhantomData;

use crate::sequence::{Resume, Resumed, Sequence};

/// A sequence whose every advance is handled by a closure.
///
/// Created with [`from_fn`]. `I` and `E` are the closure's resume types.
pub struct FromFn<F, I, E> {
    f: F,
    _resume: PhantomData<fn(Resume<I, E>)>,
}

impl<I, O, R, E, F> Sequence<I, O> for FromFn<F, I, E>
where
    F: FnMut(Resume<I, E>) -> Resumed<O, R, E>,
{
    type Return = R;
    type Error = E;

    fn advance(&mut self, resume: Resume<I, E>) -> Resumed<O, R, E> {
        (self.f)(resume)
    }
}

/// Create a sequence from a closure that handles each resumption.
///
/// The closure owns the sequence's state and decides, for every [`Resume`], whether
/// to yield, complete, or let an error escape. This is the general way to write a
/// sequence by hand as an explicit state machine.
///
/// ```rust
/// use trampoline::prelude::*;
///
/// // Counts down from 2, recovering from any raised error by yielding -1.
/// let mut left = 2;
/// let mut countdown = from_fn(move |resume: Resume<(), String>| {
///     if resume.is_error() {
///         return Ok(Step::Yielded(-1));
///     }
///     if left == 0 {
///         return Ok(Step::Complete("liftoff"));
///     }
///     left -= 1;
///     Ok(Step::Yielded(left))
/// });
///
/// assert_eq!(countdown.start(), Ok(Step::Yielded(1)));
/// assert_eq!(countdown.resume_with_error("late".into()), Ok(Step::Yielded(-1)));
/// assert_eq!(countdown.resume_with_value(()), Ok(Step::Yielded(0)));
/// assert_eq!(countdown.resume_with_value(()), Ok(Step::Complete("liftoff")));
/// ```
pub fn from_fn<I, O, R, E, F>(f: F) -> FromFn<F, I, E>
where
    F: FnMut(Resume<I, E>) -> Resumed<O, R, E>,
{
    FromFn {
        f,
        _resume: PhantomData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Step;

    /// `try { yield 20 } catch { yield 1 }` followed by `return 10`, written out.
    #[derive(Clone, Copy)]
    enum Retry {
        Fresh,
        AwaitingFirst,
        Recovered,
    }

    #[test]
    fn test_closure_sees_every_resume_in_order() {
        let mut seen = Vec::new();
        let mut seq = from_fn(|resume: Resume<u8, &'static str>| {
            seen.push(format!("{resume:?}"));
            Ok::<_, &'static str>(Step::<(), ()>::Yielded(()))
        });

        seq.start().unwrap();
        seq.resume_with_value(4).unwrap();
        seq.resume_with_error("oops").unwrap();
        drop(seq);

        assert_eq!(seen, vec!["Start", "Value(4)", "Error(\"oops\")"]);
    }

    #[test]
    fn test_explicit_state_machine_catches_raised_error() {
        let mut state = Retry::Fresh;
        let mut seq = from_fn(move |resume: Resume<i32, String>| {
            match (state, resume) {
                (Retry::Fresh, _) => {
                    state = Retry::AwaitingFirst;
                    Ok(Step::Yielded(20))
                }
                (Retry::AwaitingFirst, Resume::Error(_)) => {
                    state = Retry::Recovered;
                    Ok(Step::Yielded(1))
                }
                (Retry::AwaitingFirst, _) | (Retry::Recovered, _) => Ok(Step::Complete(10)),
            }
        });

        assert_eq!(seq.start(), Ok(Step::Yielded(20)));
        assert_eq!(seq.resume_with_error("too big".into()), Ok(Step::Yielded(1)));
        assert_eq!(seq.resume_with_value(1), Ok(Step::Complete(10)));
    }

    fn halve(resume: Resume<i32, String>) -> Resumed<i32, i32, String> {
        match resume {
            Resume::Start => Ok(Step::Yielded(64)),
            Resume::Value(n) if n > 1 => Ok(Step::Yielded(n / 2)),
            Resume::Value(n) => Ok(Step::Complete(n)),
            Resume::Error(e) => Err(e),
        }
    }

    #[test]
    fn test_fn_item_names_its_resume_types() {
        let mut seq: FromFn<_, i32, String> = from_fn(halve);
        assert_eq!(seq.start(), Ok(Step::Yielded(64)));
        assert_eq!(seq.resume_with_value(8), Ok(Step::Yielded(4)));
        assert_eq!(seq.resume_with_value(1), Ok(Step::Complete(1)));
        assert_eq!(seq.resume_with_error("stop".into()), Err("stop".to_string()));
    }
}
