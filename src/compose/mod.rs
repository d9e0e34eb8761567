//! Adapting sequences
//!
//! This module provides wrappers that change what a sequence accepts, yields, or
//! returns, and one that guards against advancing it after it has finished.

mod fuse;
mod map;

pub use fuse::{Fuse, fuse};
pub use map::{MapInput, MapReturn, MapYield, map_input, map_return, map_yield};
