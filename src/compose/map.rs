//! Transforming injected values, yields, and final results.

use std::marker::PhantomData;

use crate::{
    sequence::{Resume, Resumed, Sequence},
    step::Step,
};

/// Transforms injected values before they reach the wrapped sequence.
///
/// Injected errors and the first advance pass through untouched.
pub struct MapInput<S, F> {
    f: F,
    sequence: S,
}

/// Wrap `sequence` so that every injected value goes through `f` first.
///
/// # Examples
///
/// ```
/// use trampoline::prelude::*;
///
/// let seq = from_fn(|resume: Resume<i32, ()>| match resume {
///     Resume::Value(x) => Ok(Step::Complete(x)),
///     _ => Ok(Step::Yielded(())),
/// });
/// let mut mapped = map_input(|s: &str| s.len() as i32, seq);
///
/// assert_eq!(mapped.start(), Ok(Step::Yielded(())));
/// assert_eq!(mapped.resume_with_value("four"), Ok(Step::Complete(4)));
/// ```
pub fn map_input<S, F>(f: F, sequence: S) -> MapInput<S, F> {
    MapInput { f, sequence }
}

impl<I1, I2, O, S, F> Sequence<I1, O> for MapInput<S, F>
where
    S: Sequence<I2, O>,
    F: FnMut(I1) -> I2,
{
    type Return = S::Return;
    type Error = S::Error;

    fn advance(&mut self, resume: Resume<I1, Self::Error>) -> Resumed<O, S::Return, S::Error> {
        let resume = match resume {
            Resume::Start => Resume::Start,
            Resume::Value(input) => Resume::Value((self.f)(input)),
            Resume::Error(error) => Resume::Error(error),
        };
        self.sequence.advance(resume)
    }
}

/// Transforms yielded values of the wrapped sequence.
pub struct MapYield<S, F, O1> {
    f: F,
    sequence: S,
    _phantom: PhantomData<fn(O1)>,
}

/// Wrap `sequence` so that every yielded value goes through `f`.
///
/// The final result is not touched.
pub fn map_yield<S, F, O1>(f: F, sequence: S) -> MapYield<S, F, O1> {
    MapYield {
        f,
        sequence,
        _phantom: PhantomData,
    }
}

impl<I, O1, O2, S, F> Sequence<I, O2> for MapYield<S, F, O1>
where
    S: Sequence<I, O1>,
    F: FnMut(O1) -> O2,
{
    type Return = S::Return;
    type Error = S::Error;

    fn advance(&mut self, resume: Resume<I, Self::Error>) -> Resumed<O2, S::Return, S::Error> {
        Ok(self.sequence.advance(resume)?.map_yielded(&mut self.f))
    }
}

/// Transforms the final result of the wrapped sequence.
///
/// Applied only on completion, never to intermediate yields or errors.
pub struct MapReturn<S, F> {
    f: F,
    sequence: S,
}

/// Wrap `sequence` so that its final result goes through `f`.
pub fn map_return<S, F>(f: F, sequence: S) -> MapReturn<S, F> {
    MapReturn { f, sequence }
}

impl<I, O, R2, S, F> Sequence<I, O> for MapReturn<S, F>
where
    S: Sequence<I, O>,
    F: FnMut(S::Return) -> R2,
{
    type Return = R2;
    type Error = S::Error;

    fn advance(&mut self, resume: Resume<I, Self::Error>) -> Resumed<O, R2, S::Error> {
        Ok(match self.sequence.advance(resume)? {
            Step::Yielded(o) => Step::Yielded(o),
            Step::Complete(r) => Step::Complete((self.f)(r)),
        })
    }
}
