//! Building sequences from scratch
//!
//! This module provides explicit state-machine producers: a closure that receives
//! every [`Resume`](crate::Resume), and an adapter over ordinary iterators.

mod func;
mod iter;

pub use func::{FromFn, from_fn};
pub use iter::{FromIter, from_iter};
