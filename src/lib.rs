//! # Trampoline: drive resumable sequences to completion
//!
//! A *sequence* is a suspended computation that yields intermediate values and
//! eventually completes with a final result, like a generator. This crate pumps
//! such a sequence: every yielded value goes to a callback, and the callback's
//! outcome is injected back at the point where the sequence suspended.
//!
//! ## Core Traits
//!
//! - **[`Sequence<I, O>`]**: stepped synchronously
//! - **[`AsyncSequence<I, O>`]**: stepped by awaiting each advance
//!
//! Both are advanced with a [`Resume`]: [`Resume::Start`] first, then either
//! [`Resume::Value`] or [`Resume::Error`], and answer with a [`Step`].
//!
//! ## Error Re-injection
//!
//! When the callback fails, the failure is not returned immediately. It is
//! raised into the sequence on the next advance, so the sequence can catch it
//! and carry on, or let it escape to the caller of the driver.
//!
//! ```
//! use trampoline::prelude::*;
//!
//! // Yields 20; on an injected error it yields 1 instead; finally returns 10.
//! let mut caught = false;
//! let sequence = from_fn(move |resume: Resume<i32, String>| match resume {
//!     Resume::Start => Ok(Step::Yielded(20)),
//!     Resume::Error(_) if !caught => {
//!         caught = true;
//!         Ok(Step::Yielded(1))
//!     }
//!     Resume::Error(e) => Err(e),
//!     Resume::Value(_) => Ok(Step::Complete(10)),
//! });
//!
//! let result = drive(
//!     |x: i32| if x < 10 { Ok(x) } else { Err(format!("{x} is too big")) },
//!     sequence,
//! );
//! assert_eq!(result, Ok(10));
//! ```
//!
//! ## Common Functions
//!
//! **Building sequences:**
//! - [`from_fn(f)`](build::from_fn) - explicit state machine over each [`Resume`]
//! - [`from_iter(items)`](build::from_iter) - yield the items of an iterator
//! - [`coroutine(producer)`](coroutine::coroutine) - write the sequence as an `async` block
//!
//! **Execution:**
//! - [`drive(callback, sequence)`](drive()) - synchronous trampoline
//! - [`drive_async(callback, sequence)`](drive_async()) - asynchronous trampoline
//!
//! ## Logging
//!
//! The drivers log through the [`log`] facade: `trace` for every step, `debug`
//! when a callback failure is raised into the sequence or an error escapes it.
//! Install any `log` backend to see them.

pub mod async_sequence;
pub mod bridge;
pub mod build;
pub mod compose;
pub mod coroutine;
mod drive;
mod error;
pub mod iter;
pub mod prelude;
mod sequence;
mod step;

pub use async_sequence::AsyncSequence;
pub use drive::{drive, drive_async};
pub use error::Error;
pub use sequence::{BoxSequence, Resume, Resumed, Sequence};
pub use step::Step;
