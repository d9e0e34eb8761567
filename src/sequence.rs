//! Core trait for synchronously driven sequences.
//!
//! A [`Sequence`] is a suspended computation that produces intermediate values
//! and eventually completes with a final result. It is resumed one step at a time
//! with a [`Resume`]: the first advance carries nothing ([`Resume::Start`]), every
//! later one injects either a value or an error at the point where the sequence
//! last suspended.
//!
//! # Examples
//!
//! ```rust
//! use trampoline::prelude::*;
//!
//! // Yields the running total, completes once it reaches 10.
//! let mut total = 0;
//! let mut seq = from_fn(move |resume: Resume<i32, String>| {
//!     match resume {
//!         Resume::Start => {}
//!         Resume::Value(x) => total += x,
//!         Resume::Error(e) => return Err(e),
//!     }
//!     Ok(if total >= 10 { Step::Complete(total) } else { Step::Yielded(total) })
//! });
//!
//! assert_eq!(seq.start(), Ok(Step::Yielded(0)));
//! assert_eq!(seq.resume_with_value(4), Ok(Step::Yielded(4)));
//! assert_eq!(seq.resume_with_value(6), Ok(Step::Complete(10)));
//! ```

use std::{
    cell::RefCell,
    rc::Rc,
    sync::{Arc, Mutex},
};

use either::Either;

use crate::{
    compose::{Fuse, MapReturn, MapYield, fuse, map_return, map_yield},
    error::Error,
    step::Step,
};

/// How a suspended sequence is resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume<I, E> {
    /// First advance; nothing is injected.
    Start,
    /// Resume normally, injecting a value at the suspension point.
    Value(I),
    /// Resume by raising an error at the suspension point.
    Error(E),
}

impl<I, E> Resume<I, E> {
    /// Returns `true` for [`Resume::Error`].
    #[inline]
    pub const fn is_error(&self) -> bool {
        matches!(self, Resume::Error(_))
    }
}

impl<I, E> From<Result<I, E>> for Resume<I, E> {
    fn from(result: Result<I, E>) -> Self {
        match result {
            Ok(value) => Resume::Value(value),
            Err(error) => Resume::Error(error),
        }
    }
}

/// What a single advance produces: a step, or the error the sequence let escape.
pub type Resumed<O, R, E> = Result<Step<O, R>, E>;

/// A type-erased [`Sequence`], as returned by [`Sequence::boxed`].
pub type BoxSequence<I, O, R, E> = Box<dyn Sequence<I, O, Return = R, Error = E>>;

/// A resumable computation stepped synchronously.
///
/// `I` is the type injected on resumption, `O` the type of intermediate yields.
/// Implementors only provide [`advance`](Sequence::advance); the remaining
/// methods are conveniences over it.
///
/// Returning `Err` from `advance` means the sequence failed: either it did not
/// handle an injected error, or it failed on its own. Returning
/// `Step::Complete` means no further advance is valid.
pub trait Sequence<I, O> {
    /// Final result once the sequence completes.
    type Return;
    /// Error raised into, and out of, the sequence.
    type Error;

    /// Resume the sequence and run it to its next suspension or completion.
    fn advance(
        &mut self,
        resume: Resume<I, Self::Error>,
    ) -> Resumed<O, Self::Return, Self::Error>;

    /// First advance.
    fn start(&mut self) -> Resumed<O, Self::Return, Self::Error> {
        self.advance(Resume::Start)
    }

    /// Advance-with-value.
    fn resume_with_value(&mut self, input: I) -> Resumed<O, Self::Return, Self::Error> {
        self.advance(Resume::Value(input))
    }

    /// Advance-with-error: raise `error` at the suspension point.
    fn resume_with_error(&mut self, error: Self::Error) -> Resumed<O, Self::Return, Self::Error> {
        self.advance(Resume::Error(error))
    }

    /// Transform yielded values before they leave the sequence.
    fn map_yield<O2, F>(self, f: F) -> MapYield<Self, F, O>
    where
        Self: Sized,
        F: FnMut(O) -> O2,
    {
        map_yield(f, self)
    }

    /// Transform the final result.
    fn map_return<R2, F>(self, f: F) -> MapReturn<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Return) -> R2,
    {
        map_return(f, self)
    }

    /// Report [`Error::Completed`] instead of advancing a finished sequence.
    fn fuse(self) -> Fuse<Self>
    where
        Self: Sized,
        Self::Error: From<Error>,
    {
        fuse(self)
    }

    /// Erase the sequence's type behind a [`BoxSequence`].
    fn boxed(self) -> BoxSequence<I, O, Self::Return, Self::Error>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<I, O, S> Sequence<I, O> for &'_ mut S
where
    S: Sequence<I, O> + ?Sized,
{
    type Return = S::Return;
    type Error = S::Error;

    fn advance(&mut self, resume: Resume<I, Self::Error>) -> Resumed<O, S::Return, S::Error> {
        (**self).advance(resume)
    }
}

impl<I, O, S> Sequence<I, O> for Box<S>
where
    S: Sequence<I, O> + ?Sized,
{
    type Return = S::Return;
    type Error = S::Error;

    fn advance(&mut self, resume: Resume<I, Self::Error>) -> Resumed<O, S::Return, S::Error> {
        (**self).advance(resume)
    }
}

/// Shared handle. Advancing it from inside the callback that is driving it
/// panics on the second borrow.
impl<I, O, S> Sequence<I, O> for Rc<RefCell<S>>
where
    S: Sequence<I, O>,
{
    type Return = S::Return;
    type Error = S::Error;

    fn advance(&mut self, resume: Resume<I, Self::Error>) -> Resumed<O, S::Return, S::Error> {
        self.borrow_mut().advance(resume)
    }
}

impl<I, O, S> Sequence<I, O> for Arc<Mutex<S>>
where
    S: Sequence<I, O>,
    S::Error: From<Error>,
{
    type Return = S::Return;
    type Error = S::Error;

    fn advance(&mut self, resume: Resume<I, Self::Error>) -> Resumed<O, S::Return, S::Error> {
        let mut guard = self.lock().map_err(|_| Error::Poisoned)?;
        guard.advance(resume)
    }
}

impl<I, O, L, R> Sequence<I, O> for Either<L, R>
where
    L: Sequence<I, O>,
    R: Sequence<I, O, Return = L::Return, Error = L::Error>,
{
    type Return = L::Return;
    type Error = L::Error;

    fn advance(&mut self, resume: Resume<I, Self::Error>) -> Resumed<O, L::Return, L::Error> {
        match self {
            Either::Left(l) => l.advance(resume),
            Either::Right(r) => r.advance(resume),
        }
    }
}
