// Consensus-critical. Changes require spec update + tests.
//! Proof-of-work verification.
//!
//! The digest is an opaque 256-bit value produced by an external hashing
//! collaborator; this module only compares it against the target claimed
//! in the header. The condition is:
//!
//! ```text
//! digest_as_u256 <= target(bits) <= pow_limit
//! ```

use crate::difficulty::decode_compact;
use crate::params::ChainParams;
use num_bigint::BigUint;
use num_traits::Zero;
use sable_core::Hash32;

/// Validate a block digest against its claimed compact target.
///
/// Returns `false` for malformed encodings (negative, zero, overflowing)
/// and for targets above the network ceiling; never panics.
pub fn check_proof_of_work(digest: &Hash32, bits: u32, params: &ChainParams) -> bool {
    let decoded = decode_compact(bits);

    if decoded.negative
        || decoded.overflow
        || decoded.target.is_zero()
        || decoded.target > params.pow_limit
    {
        return false;
    }

    BigUint::from_bytes_be(digest.as_bytes()) <= decoded.target
}
