//! Sequences whose steps suspend.
//!
//! [`AsyncSequence`] is the asynchronous counterpart of [`Sequence`](crate::Sequence):
//! the same resume protocol, but every advance returns a future. Use
//! [`immediate`](crate::bridge::immediate) to treat a synchronous sequence as one,
//! or [`coroutine`](crate::coroutine::coroutine) to write one as an `async` block.

use std::future::Future;

use crate::sequence::{Resume, Resumed};

/// A resumable computation whose steps are awaited.
///
/// The contract matches [`Sequence`](crate::Sequence): `Err` means the sequence
/// let an error escape, `Step::Complete` means it must not be advanced again.
/// The future returned by `advance` borrows the sequence, so two advances can
/// never be in flight at once.
pub trait AsyncSequence<I, O> {
    /// Final result once the sequence completes.
    type Return;
    /// Error raised into, and out of, the sequence.
    type Error;

    /// Resume the sequence and run it to its next suspension or completion.
    fn advance(
        &mut self,
        resume: Resume<I, Self::Error>,
    ) -> impl Future<Output = Resumed<O, Self::Return, Self::Error>>;

    /// First advance.
    fn start(&mut self) -> impl Future<Output = Resumed<O, Self::Return, Self::Error>> {
        self.advance(Resume::Start)
    }

    /// Advance-with-value.
    fn resume_with_value(
        &mut self,
        input: I,
    ) -> impl Future<Output = Resumed<O, Self::Return, Self::Error>> {
        self.advance(Resume::Value(input))
    }

    /// Advance-with-error: raise `error` at the suspension point.
    fn resume_with_error(
        &mut self,
        error: Self::Error,
    ) -> impl Future<Output = Resumed<O, Self::Return, Self::Error>> {
        self.advance(Resume::Error(error))
    }
}

impl<I, O, S> AsyncSequence<I, O> for &'_ mut S
where
    S: AsyncSequence<I, O>,
{
    type Return = S::Return;
    type Error = S::Error;

    fn advance(
        &mut self,
        resume: Resume<I, Self::Error>,
    ) -> impl Future<Output = Resumed<O, S::Return, S::Error>> {
        (**self).advance(resume)
    }
}

impl<I, O, S> AsyncSequence<I, O> for Box<S>
where
    S: AsyncSequence<I, O>,
{
    type Return = S::Return;
    type Error = S::Error;

    fn advance(
        &mut self,
        resume: Resume<I, Self::Error>,
    ) -> impl Future<Output = Resumed<O, S::Return, S::Error>> {
        (**self).advance(resume)
    }
}
