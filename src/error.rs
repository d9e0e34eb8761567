//! Errors detected by the crate itself.
//!
//! The trampoline never wraps the errors a sequence or callback raises; those
//! flow through as the sequence's own `Error` type. [`Error`] only covers the
//! conditions this crate detects, and reaches callers through
//! `S::Error: From<Error>` bounds on the adapters that can produce it.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A fused sequence was advanced after it completed or failed.
    #[error("sequence advanced after it completed")]
    Completed,
    /// The lock guarding a shared sequence was poisoned.
    #[error("sequence lock was poisoned")]
    Poisoned,
}
