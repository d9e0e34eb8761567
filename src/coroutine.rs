//! Sequences written as `async` blocks.
//!
//! [`coroutine`] turns a producer closure into an [`AsyncSequence`]. The producer
//! receives a [`Co`] handle and suspends with `co.yield_(value).await`, which
//! resolves to whatever the next advance injects: `Ok(input)` for
//! advance-with-value, `Err(error)` for advance-with-error. The producer's own
//! result is the completion (`Ok`) or an uncaught failure (`Err`).
//!
//! ```rust
//! use std::future::ready;
//! use trampoline::prelude::*;
//!
//! // try { yield 20 } catch { yield 1 }; return 10
//! let producer = coroutine(|co: Co<i32, i32, String>| async move {
//!     if co.yield_(20).await.is_err() {
//!         co.yield_(1).await?;
//!     }
//!     Ok::<_, String>(10)
//! });
//!
//! let limit = |x: i32| ready(if x < 10 { Ok(x) } else { Err(format!("{x} too big")) });
//! let result = futures::executor::block_on(drive_async(limit, producer));
//! assert_eq!(result, Ok(10));
//! ```
//!
//! The handle and the coroutine share one slot through which values pass in both
//! directions; there is no channel and no extra task. The coroutine is therefore
//! neither `Send` nor `Sync`.

use std::{
    cell::RefCell,
    fmt,
    future::{Future, poll_fn},
    pin::Pin,
    rc::Rc,
    task::{Context, Poll},
};

use log::trace;

use crate::{
    async_sequence::AsyncSequence,
    sequence::{Resume, Resumed},
    step::Step,
};

enum Slot<I, O, E> {
    Empty,
    Yielded(O),
    Resumed(Result<I, E>),
}

impl<I, O, E> Slot<I, O, E> {
    fn take_yielded(&mut self) -> Option<O> {
        match std::mem::replace(self, Slot::Empty) {
            Slot::Yielded(output) => Some(output),
            other => {
                *self = other;
                None
            }
        }
    }

    fn take_resumed(&mut self) -> Option<Result<I, E>> {
        match std::mem::replace(self, Slot::Empty) {
            Slot::Resumed(resumed) => Some(resumed),
            other => {
                *self = other;
                None
            }
        }
    }
}

type Airlock<I, O, E> = Rc<RefCell<Slot<I, O, E>>>;

/// The producer's handle for suspending a [`Coroutine`].
pub struct Co<I, O, E> {
    airlock: Airlock<I, O, E>,
}

impl<I, O, E> Co<I, O, E> {
    /// Suspend the coroutine, yielding `value` to whoever advances it.
    ///
    /// Resolves to the injected value, or to the injected error. Dropping the
    /// future before awaiting it yields nothing. Dropping it after it was polled
    /// but before it resolved (`now_or_never`, a lost `select!` branch) cancels
    /// the yield: the value is discarded and the next yield or return is what
    /// the advance reports.
    pub fn yield_(&self, value: O) -> Yield<I, O, E> {
        Yield {
            airlock: Rc::clone(&self.airlock),
            value: Some(value),
            parked: false,
        }
    }
}

impl<I, O, E> fmt::Debug for Co<I, O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Co").finish_non_exhaustive()
    }
}

/// Future returned by [`Co::yield_`].
#[must_use = "a yield does nothing unless awaited"]
pub struct Yield<I, O, E> {
    airlock: Airlock<I, O, E>,
    value: Option<O>,
    parked: bool,
}

// Never pin-projected.
impl<I, O, E> Unpin for Yield<I, O, E> {}

impl<I, O, E> Future for Yield<I, O, E> {
    type Output = Result<I, E>;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let mut slot = this.airlock.borrow_mut();
        if let Some(value) = this.value.take() {
            *slot = Slot::Yielded(value);
            this.parked = true;
            return Poll::Pending;
        }
        match slot.take_resumed() {
            Some(resumed) => {
                this.parked = false;
                Poll::Ready(resumed)
            }
            None => Poll::Pending,
        }
    }
}

impl<I, O, E> Drop for Yield<I, O, E> {
    fn drop(&mut self) {
        if !self.parked {
            return;
        }
        if let Ok(mut slot) = self.airlock.try_borrow_mut() {
            trace!("yield dropped while suspended");
            *slot = Slot::Empty;
        }
    }
}

/// An [`AsyncSequence`] backed by an `async` producer.
///
/// Created with [`coroutine`].
pub struct Coroutine<I, O, E, Fut> {
    airlock: Airlock<I, O, E>,
    producer: Option<Pin<Box<Fut>>>,
    started: bool,
}

/// Create a sequence from an async producer.
///
/// The producer is called right away to build its future, but none of its body
/// runs until the first advance.
pub fn coroutine<I, O, R, E, P, Fut>(producer: P) -> Coroutine<I, O, E, Fut>
where
    P: FnOnce(Co<I, O, E>) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    let airlock = Rc::new(RefCell::new(Slot::Empty));
    let co = Co {
        airlock: Rc::clone(&airlock),
    };
    Coroutine {
        airlock,
        producer: Some(Box::pin(producer(co))),
        started: false,
    }
}

impl<I, O, E, Fut> Coroutine<I, O, E, Fut> {
    /// Returns `true` once the producer has returned, or was cancelled by an
    /// error raised before it started.
    pub fn is_complete(&self) -> bool {
        self.producer.is_none()
    }
}

impl<I, O, R, E, Fut> Coroutine<I, O, E, Fut>
where
    Fut: Future<Output = Result<R, E>>,
{
    /// Load the resume into the airlock. Returns early when the coroutine
    /// finishes without running.
    fn load(&mut self, resume: Resume<I, E>) -> Option<Resumed<O, R, E>> {
        assert!(self.producer.is_some(), "coroutine resumed after completion");
        if !self.started {
            self.started = true;
            // An unstarted producer has no suspension point: a value is dropped,
            // an error ends it before any of its body runs.
            if let Resume::Error(error) = resume {
                self.producer = None;
                return Some(Err(error));
            }
            return None;
        }
        let resumed = match resume {
            Resume::Start => panic!("coroutine started twice"),
            Resume::Value(input) => Ok(input),
            Resume::Error(error) => Err(error),
        };
        *self.airlock.borrow_mut() = Slot::Resumed(resumed);
        None
    }

    fn poll_step(&mut self, cx: &mut Context<'_>) -> Poll<Resumed<O, R, E>> {
        let Some(producer) = self.producer.as_mut() else {
            panic!("coroutine resumed after completion");
        };
        match producer.as_mut().poll(cx) {
            Poll::Ready(result) => {
                trace!("coroutine producer returned");
                self.producer = None;
                Poll::Ready(result.map(Step::Complete))
            }
            Poll::Pending => match self.airlock.borrow_mut().take_yielded() {
                Some(output) => Poll::Ready(Ok(Step::Yielded(output))),
                None => Poll::Pending,
            },
        }
    }
}

/// # Panics
///
/// Advancing a coroutine that already completed panics, as does a second
/// [`Resume::Start`]. Wrapped in [`blocking`](crate::bridge::blocking) and
/// [`fuse`](crate::Sequence::fuse), an advance after completion reports
/// [`Error::Completed`](crate::Error) instead.
impl<I, O, R, E, Fut> AsyncSequence<I, O> for Coroutine<I, O, E, Fut>
where
    Fut: Future<Output = Result<R, E>>,
{
    type Return = R;
    type Error = E;

    fn advance(&mut self, resume: Resume<I, E>) -> impl Future<Output = Resumed<O, R, E>> {
        let early = self.load(resume);
        async move {
            match early {
                Some(done) => done,
                None => poll_fn(|cx| self.poll_step(cx)).await,
            }
        }
    }
}
