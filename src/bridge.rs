//! Adapters between synchronous and asynchronous sequences.
//!
//! [`immediate`] lets [`drive_async`](crate::drive_async) step a plain
//! [`Sequence`]; [`blocking`] lets [`drive`](crate::drive) step an
//! [`AsyncSequence`] by blocking the current thread on every advance.

use std::future::{Future, ready};

use futures::executor::block_on;

use crate::{
    async_sequence::AsyncSequence,
    sequence::{Resume, Resumed, Sequence},
};

/// A synchronous sequence presented as an [`AsyncSequence`].
///
/// Every advance resolves on its first poll.
pub struct Immediate<S>(S);

/// Step `sequence` through the async interface.
pub fn immediate<S>(sequence: S) -> Immediate<S> {
    Immediate(sequence)
}

impl<S> Immediate<S> {
    /// Unwrap the synchronous sequence.
    pub fn into_inner(self) -> S {
        self.0
    }
}

impl<I, O, S> AsyncSequence<I, O> for Immediate<S>
where
    S: Sequence<I, O>,
{
    type Return = S::Return;
    type Error = S::Error;

    fn advance(
        &mut self,
        resume: Resume<I, Self::Error>,
    ) -> impl Future<Output = Resumed<O, S::Return, S::Error>> {
        ready(self.0.advance(resume))
    }
}

/// An [`AsyncSequence`] presented as a synchronous [`Sequence`].
///
/// Each advance blocks the current thread until the step resolves, using
/// `futures`' local executor. Do not use it from inside an async runtime's
/// worker thread.
pub struct Blocking<S>(S);

/// Step `sequence` synchronously.
///
/// ```rust
/// use trampoline::prelude::*;
///
/// let producer = coroutine(|co: Co<i32, i32, String>| async move {
///     let doubled = co.yield_(21).await?;
///     Ok::<_, String>(doubled)
/// });
///
/// let result = drive(|x: i32| Ok(x * 2), blocking(producer));
/// assert_eq!(result, Ok(42));
/// ```
pub fn blocking<S>(sequence: S) -> Blocking<S> {
    Blocking(sequence)
}

impl<S> Blocking<S> {
    /// Unwrap the async sequence.
    pub fn into_inner(self) -> S {
        self.0
    }
}

impl<I, O, S> Sequence<I, O> for Blocking<S>
where
    S: AsyncSequence<I, O>,
{
    type Return = S::Return;
    type Error = S::Error;

    fn advance(&mut self, resume: Resume<I, Self::Error>) -> Resumed<O, S::Return, S::Error> {
        block_on(self.0.advance(resume))
    }
}
