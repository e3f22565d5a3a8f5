#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Sable consensus rules for proof-of-work difficulty.
//!
//! This crate is responsible for:
//! - compact difficulty target encoding/decoding (Bitcoin-style `bits`)
//! - computing the required target for the next block (three retargeting
//!   eras selected by hard-fork heights)
//! - cheap validation of claimed target transitions
//! - proof-of-work validation of a digest against its target
//!
//! It intentionally does **not** include networking, storage, fork choice,
//! or the hash function itself. Every operation is a pure function of a
//! read-only chain view and immutable network parameters.

pub mod chain;
pub mod difficulty;
pub mod error;
pub mod params;
pub mod pow;
pub mod retarget;
pub mod validate;

pub use chain::*;
pub use difficulty::*;
pub use error::*;
pub use params::*;
pub use pow::*;
pub use retarget::*;
pub use validate::*;
