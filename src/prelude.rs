//! Commonly used imports
//!
//! Use `use trampoline::prelude::*;` for quick access to the most common types and functions.

// Core types
pub use crate::{AsyncSequence, BoxSequence, Error, Resume, Resumed, Sequence, Step};

// Constructors
pub use crate::build::{from_fn, from_iter};
pub use crate::coroutine::{Co, coroutine};

// Adapters
pub use crate::bridge::{blocking, immediate};
pub use crate::compose::{fuse, map_input, map_return, map_yield};
pub use crate::iter::iter;

// Execution
pub use crate::drive::{drive, drive_async};
