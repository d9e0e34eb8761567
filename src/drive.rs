//! Driving sequences to completion.
//!
//! [`drive`] and [`drive_async`] are the same trampoline: advance the sequence,
//! hand each yielded value to the callback, and inject the callback's outcome at
//! the next advance. A callback failure is not returned straight away; it is
//! raised into the sequence with [`Resume::Error`] so the sequence gets the first
//! chance to recover from it.
//!
//! Neither driver looks inside yielded or injected values. A yielded value that
//! happens to be a sequence itself reaches the callback untouched, and a sequence
//! returned by the callback is injected as-is. Only the sequence passed in is
//! ever advanced.

use std::future::Future;

use log::{debug, trace};

use crate::{
    async_sequence::AsyncSequence,
    sequence::{Resume, Sequence},
    step::Step,
};

/// Drive a sequence to completion, routing every yield through `callback`.
///
/// Returns the sequence's final result, or the first error that escapes the
/// sequence. A callback error is raised into the sequence on the next advance;
/// it only reaches the caller if the sequence lets it through.
///
/// The loop ends only when the sequence completes or fails. A sequence that
/// never completes, driven with a callback that never fails, loops forever.
///
/// The first advance is always [`Resume::Start`]. Pass a sequence that has not
/// been stepped yet, or one that accepts `Start` at any point.
///
/// # Panics
///
/// Panics if the sequence panics on `Start`. A
/// [`Coroutine`](crate::coroutine::Coroutine) that was already advanced does.
///
/// ```rust
/// use trampoline::prelude::*;
///
/// let mut remaining = 3;
/// let countdown = from_fn(move |resume: Resume<u32, String>| {
///     if let Resume::Error(e) = resume {
///         return Err(e);
///     }
///     if remaining == 0 {
///         return Ok(Step::Complete("done"));
///     }
///     remaining -= 1;
///     Ok(Step::Yielded(remaining))
/// });
///
/// let mut seen = Vec::new();
/// let result = drive(|n: u32| { seen.push(n); Ok(n) }, countdown);
///
/// assert_eq!(result, Ok("done"));
/// assert_eq!(seen, vec![2, 1, 0]);
/// ```
pub fn drive<S, I, O, F>(mut callback: F, mut sequence: S) -> Result<S::Return, S::Error>
where
    S: Sequence<I, O>,
    F: FnMut(O) -> Result<I, S::Error>,
{
    let mut resume = Resume::Start;
    let mut steps = 0_usize;
    loop {
        let raised = resume.is_error();
        let step = sequence
            .advance(resume)
            .inspect_err(|_| debug!("sequence failed after {steps} yields (raised: {raised})"))?;
        match step {
            Step::Yielded(output) => {
                steps += 1;
                trace!("sequence yielded (step {steps})");
                resume = match callback(output) {
                    Ok(input) => Resume::Value(input),
                    Err(error) => {
                        debug!("callback failed at step {steps}; raising into sequence");
                        Resume::Error(error)
                    }
                };
            }
            Step::Complete(done) => {
                trace!("sequence completed after {steps} yields");
                return Ok(done);
            }
        }
    }
}

/// Async version of [`drive`].
///
/// Each advance and each callback invocation is awaited in turn: the callback's
/// outcome is always injected before the next advance starts, and no two
/// callbacks run at once. Dropping the returned future cancels the drive at its
/// current suspension point.
///
/// # Panics
///
/// As with [`drive`], the sequence is started with [`Resume::Start`]; a
/// [`Coroutine`](crate::coroutine::Coroutine) that was already advanced panics.
///
/// ```rust
/// use std::future::ready;
/// use trampoline::prelude::*;
///
/// let producer = coroutine(|co: Co<u32, u32, String>| async move {
///     let a = co.yield_(1).await?;
///     let b = co.yield_(2).await?;
///     Ok::<_, String>(a + b)
/// });
///
/// let result = futures::executor::block_on(drive_async(|n: u32| ready(Ok(n * 10)), producer));
/// assert_eq!(result, Ok(30));
/// ```
pub async fn drive_async<S, I, O, F, Fut>(
    mut callback: F,
    mut sequence: S,
) -> Result<S::Return, S::Error>
where
    S: AsyncSequence<I, O>,
    F: FnMut(O) -> Fut,
    Fut: Future<Output = Result<I, S::Error>>,
{
    let mut resume = Resume::Start;
    let mut steps = 0_usize;
    loop {
        let raised = resume.is_error();
        let step = sequence
            .advance(resume)
            .await
            .inspect_err(|_| debug!("sequence failed after {steps} yields (raised: {raised})"))?;
        match step {
            Step::Yielded(output) => {
                steps += 1;
                trace!("sequence yielded (step {steps})");
                resume = match callback(output).await {
                    Ok(input) => Resume::Value(input),
                    Err(error) => {
                        debug!("callback failed at step {steps}; raising into sequence");
                        Resume::Error(error)
                    }
                };
            }
            Step::Complete(done) => {
                trace!("sequence completed after {steps} yields");
                return Ok(done);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::immediate;
    use crate::build::{FromIter, from_fn, from_iter};
    use crate::coroutine::{Co, coroutine};
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::future::ready;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct Record {
        id: u32,
    }

    /// Yields `1`, then completes with `Record { id: 1 }`.
    fn yields_one() -> impl Sequence<i32, i32, Return = Record, Error = String> {
        let mut started = false;
        from_fn(move |resume: Resume<i32, String>| match resume {
            Resume::Error(e) => Err(e),
            _ if !started => {
                started = true;
                Ok(Step::Yielded(1))
            }
            _ => Ok(Step::Complete(Record { id: 1 })),
        })
    }

    /// Logs every resume it receives, yields the given values, then completes.
    fn scripted(
        yields: Vec<i32>,
        log: Rc<RefCell<Vec<String>>>,
    ) -> impl Sequence<i32, i32, Return = &'static str, Error = String> {
        let mut yields = yields.into_iter();
        from_fn(move |resume: Resume<i32, String>| {
            log.borrow_mut().push(format!("advance {resume:?}"));
            if let Resume::Error(e) = resume {
                return Err(e);
            }
            Ok(match yields.next() {
                Some(y) => Step::Yielded(y),
                None => Step::Complete("end"),
            })
        })
    }

    #[test]
    fn test_drive_returns_final_value() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let result = drive(
            {
                let calls = Rc::clone(&calls);
                move |value: i32| {
                    calls.borrow_mut().push(value);
                    Ok(value)
                }
            },
            yields_one(),
        );

        assert_eq!(result, Ok(Record { id: 1 }));
        assert_eq!(&*calls.borrow(), &[1]);
    }

    #[test]
    fn test_drive_alternates_advance_and_callback() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let result = drive(
            {
                let log = Rc::clone(&log);
                move |value: i32| {
                    log.borrow_mut().push(format!("callback {value}"));
                    Ok(value + 100)
                }
            },
            scripted(vec![1, 2], Rc::clone(&log)),
        );

        assert_eq!(result, Ok("end"));
        assert_eq!(
            &*log.borrow(),
            &[
                "advance Start",
                "callback 1",
                "advance Value(101)",
                "callback 2",
                "advance Value(102)",
            ]
        );
    }

    #[test]
    fn test_callback_failure_is_raised_into_sequence() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let result = drive(
            |value: i32| {
                if value >= 10 {
                    Err(format!("{value} is too big"))
                } else {
                    Ok(value)
                }
            },
            scripted(vec![20], Rc::clone(&log)),
        );

        assert_eq!(result, Err("20 is too big".to_string()));
        assert_eq!(
            &*log.borrow(),
            &["advance Start", "advance Error(\"20 is too big\")"]
        );
    }

    #[test]
    fn test_sequence_recovers_from_callback_failure() {
        let mut caught = false;
        let sequence = from_fn(move |resume: Resume<i32, String>| match resume {
            Resume::Start => Ok(Step::Yielded(20)),
            Resume::Error(_) if !caught => {
                caught = true;
                Ok(Step::Yielded(1))
            }
            Resume::Error(e) => Err(e),
            Resume::Value(_) => Ok(Step::Complete(10)),
        });

        let mut calls = Vec::new();
        let result = drive(
            |value: i32| {
                calls.push(value);
                if value < 10 { Ok(value) } else { Err("too big".to_string()) }
            },
            sequence,
        );

        assert_eq!(result, Ok(10));
        assert_eq!(calls, vec![20, 1]);
    }

    #[test]
    fn test_sequence_failure_skips_callback() {
        let sequence = from_fn(|_: Resume<i32, String>| Err::<Step<i32, ()>, _>("broken".to_string()));
        let mut called = false;
        let result = drive(
            |value: i32| {
                called = true;
                Ok(value)
            },
            sequence,
        );

        assert_eq!(result, Err("broken".to_string()));
        assert!(!called);
    }

    #[test]
    fn test_nested_sequences_pass_through_undrained() {
        type Inner = FromIter<std::vec::IntoIter<i32>, String>;

        let outer = from_fn(|resume: Resume<Inner, String>| match resume {
            Resume::Start => Ok(Step::Yielded(from_iter(vec![1, 2, 3]))),
            Resume::Value(mut injected) => {
                let first = Sequence::<(), i32>::start(&mut injected)?;
                Ok(Step::Complete(first))
            }
            Resume::Error(e) => Err(e),
        });

        let mut first_seen = Vec::new();
        let result = drive(
            |mut yielded: Inner| {
                first_seen.push(Sequence::<(), i32>::start(&mut yielded)?);
                Ok(from_iter(vec![9, 8]))
            },
            outer,
        );

        assert_eq!(result, Ok(Step::Yielded(9)));
        assert_eq!(first_seen, vec![Step::Yielded(1)]);
    }

    #[test]
    fn test_drive_iterator_completes_with_unit() {
        let mut calls = Vec::new();
        let result = drive(
            |value: i32| {
                calls.push(value);
                Ok::<_, String>(value)
            },
            from_iter::<_, String>([1, 2, 3]),
        );

        assert_eq!(result, Ok(()));
        assert_eq!(calls, vec![1, 2, 3]);
    }

    #[test]
    fn test_drive_borrowed_sequence() {
        let mut sequence = yields_one();
        let result = drive(Ok, &mut sequence);
        assert_eq!(result, Ok(Record { id: 1 }));
    }

    #[test]
    fn test_drive_async_matches_sync_behaviour() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let result = block_on(drive_async(
            {
                let log = Rc::clone(&log);
                move |value: i32| {
                    log.borrow_mut().push(format!("callback {value}"));
                    ready(if value == 2 { Err("two".to_string()) } else { Ok(value) })
                }
            },
            immediate(scripted(vec![1, 2], Rc::clone(&log))),
        ));

        assert_eq!(result, Err("two".to_string()));
        assert_eq!(
            &*log.borrow(),
            &[
                "advance Start",
                "callback 1",
                "advance Value(1)",
                "callback 2",
                "advance Error(\"two\")",
            ]
        );
    }

    #[test]
    fn test_drive_async_sequence_failure_skips_callback() {
        let sequence = from_fn(|_: Resume<i32, String>| Err::<Step<i32, ()>, _>("broken".to_string()));
        let mut called = false;
        let result = block_on(drive_async(
            |value: i32| {
                called = true;
                ready(Ok(value))
            },
            immediate(sequence),
        ));

        assert_eq!(result, Err("broken".to_string()));
        assert!(!called);
    }

    #[test]
    fn test_drive_restarts_a_stepped_closure_sequence() {
        let mut sequence = yields_one();
        assert_eq!(sequence.start(), Ok(Step::Yielded(1)));

        // The closure sees a second `Start` and treats it as a resume.
        assert_eq!(drive(Ok, &mut sequence), Ok(Record { id: 1 }));
    }

    #[test]
    #[should_panic(expected = "coroutine started twice")]
    fn test_drive_async_rejects_a_stepped_coroutine() {
        let mut co = coroutine(|co: Co<i32, i32, String>| async move {
            let a = co.yield_(1).await?;
            let b = co.yield_(a).await?;
            Ok::<_, String>(b)
        });
        assert_eq!(block_on(co.start()), Ok(Step::Yielded(1)));

        let _ = block_on(drive_async(|x: i32| ready(Ok(x)), &mut co));
    }

    #[test]
    fn test_drive_async_returns_final_value() {
        let result = block_on(drive_async(|value: i32| ready(Ok(value)), immediate(yields_one())));
        assert_eq!(result, Ok(Record { id: 1 }));
    }
}
