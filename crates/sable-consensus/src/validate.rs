// Consensus-critical. Changes require spec update + tests.
//! Independent validation of claimed target transitions.
//!
//! Given a peer-supplied `(old_bits, new_bits)` pair and the height the
//! transition claims to occur at, decide whether any honest retarget could
//! have produced it — without walking history or recomputing the full
//! retarget. Off retarget boundaries the target may not move at all; on a
//! boundary the new target must fall inside the envelope reachable from
//! the old one under the canonical timespan clamp.
//!
//! The envelope uses the base-schedule `[/4, *4]` bounds at every height,
//! including heights governed by the fork-adjusted `[/4, *2]` clamp: a
//! wider sanity envelope, checked as observed in the original rules.

use crate::difficulty::{decode_compact, encode_compact};
use crate::params::ChainParams;
use num_bigint::BigUint;

/// Check that a difficulty transition does not move beyond what the
/// retarget rules permit.
///
/// Rejection is an ordinary outcome (the block is bad), never an error.
pub fn is_permitted_transition(
    params: &ChainParams,
    height: u64,
    old_bits: u32,
    new_bits: u32,
) -> bool {
    if params.allow_min_difficulty_blocks {
        return true;
    }

    if height % params.adjustment_interval() != 0 {
        return old_bits == new_bits;
    }

    let timespan = params.pow_target_timespan;
    let observed = decode_compact(new_bits).target;

    // Largest target reachable from old_bits: the slowest permitted window.
    let mut largest = decode_compact(old_bits).target * (timespan * 4) / timespan;
    if largest > params.pow_limit {
        largest = params.pow_limit.clone();
    }
    // Bounds must pass through the lossy codec before comparison, exactly
    // as a real retarget output would.
    let maximum = round_trip(&largest);
    if maximum < observed {
        return false;
    }

    let mut smallest = decode_compact(old_bits).target * (timespan / 4) / timespan;
    if smallest > params.pow_limit {
        smallest = params.pow_limit.clone();
    }
    let minimum = round_trip(&smallest);
    if minimum > observed {
        return false;
    }

    true
}

fn round_trip(target: &BigUint) -> BigUint {
    decode_compact(encode_compact(target)).target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Network;

    const OLD_BITS: u32 = 0x1c0f_ffff;

    fn params() -> ChainParams {
        Network::Mainnet.params()
    }

    fn bits_for_multiple(num: u32, den: u32) -> u32 {
        encode_compact(&(decode_compact(OLD_BITS).target * num / den))
    }

    #[test]
    fn off_boundary_requires_identity() {
        let params = params();
        for height in [1u64, 7, 2015, 2017, 4031] {
            assert!(is_permitted_transition(&params, height, OLD_BITS, OLD_BITS));
            assert!(!is_permitted_transition(
                &params,
                height,
                OLD_BITS,
                bits_for_multiple(2, 1)
            ));
        }
    }

    #[test]
    fn boundary_accepts_envelope() {
        let params = params();
        for (num, den) in [(1u32, 4u32), (1, 2), (1, 1), (2, 1), (4, 1)] {
            assert!(
                is_permitted_transition(&params, 2016, OLD_BITS, bits_for_multiple(num, den)),
                "{num}/{den} must be inside the envelope"
            );
        }
    }

    #[test]
    fn boundary_rejects_outside_envelope() {
        let params = params();
        assert!(!is_permitted_transition(
            &params,
            2016,
            OLD_BITS,
            bits_for_multiple(5, 1)
        ));
        assert!(!is_permitted_transition(
            &params,
            2016,
            OLD_BITS,
            bits_for_multiple(1, 5)
        ));
    }

    #[test]
    fn boundary_envelope_clamps_to_ceiling() {
        let params = params();
        // Old target near the ceiling: 4x overshoots it, so the ceiling
        // itself must be the accepted maximum.
        let old = params.pow_limit_bits();
        assert!(is_permitted_transition(&params, 2016, old, old));
        // Anything above the ceiling cannot be claimed.
        let above = encode_compact(&(&params.pow_limit * 2u32));
        assert!(!is_permitted_transition(&params, 2016, old, above));
    }

    #[test]
    fn min_difficulty_networks_accept_everything() {
        let params = Network::Testnet.params();
        assert!(is_permitted_transition(
            &params,
            2016,
            OLD_BITS,
            bits_for_multiple(100, 1)
        ));
        assert!(is_permitted_transition(&params, 1, OLD_BITS, 0x2000_0001));
    }
}
