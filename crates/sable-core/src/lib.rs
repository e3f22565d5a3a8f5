#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Sable core: canonical primitive types and protocol constants.
//!
//! This crate is the bottom of the dependency stack. It defines the types
//! every other layer agrees on (fixed-width hashes, network timing constants)
//! and intentionally contains no consensus rules, no I/O, and no crypto.

pub mod constants;
pub mod types;

pub use constants::*;
pub use types::*;
