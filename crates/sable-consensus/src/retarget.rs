// Consensus-critical. Changes require spec update + tests.
//! Difficulty retargeting.
//!
//! Three mutually exclusive retargeting eras, selected by the candidate
//! block's height against the two hard-fork thresholds:
//!
//! - **Legacy**: every `adjustment_interval()` blocks, scale the tip's
//!   target by actual/expected elapsed time, clamped to `[/4, *4]`.
//! - **ForkAdjusted**: the same computation on the shortened fork schedule,
//!   with the upper clamp tightened to `*2`.
//! - **Lwma3**: a linearly weighted moving average recomputed every block,
//!   replacing periodic retargeting entirely.
//!
//! Any divergence here from other node implementations is a chain split;
//! the rounding, clamping, and window rules below are exact.

use crate::chain::{ChainView, HeaderInfo};
use crate::difficulty::{decode_compact, encode_compact};
use crate::error::ConsensusError;
use crate::params::ChainParams;
use num_bigint::BigUint;
use num_traits::Zero;

/// LWMA window size in blocks.
const LWMA_WINDOW: u64 = 60;

/// Cap on a single block's solvetime contribution, in units of the target
/// spacing. A timestamp outlier cannot dominate the average.
const LWMA_SOLVETIME_CAP: i64 = 6;

/// The closed set of retargeting rules. Which one governs a block is a pure
/// function of its height, so the whole dispatch stays auditable in one
/// `match`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetargetRule {
    /// Periodic retarget on the base schedule with the `[/4, *4]` clamp.
    Legacy,
    /// Periodic retarget on the fork schedule with the `[/4, *2]` clamp.
    ForkAdjusted,
    /// Per-block linearly weighted moving average.
    Lwma3,
}

/// Select the retargeting rule governing the block at `height`.
pub fn rule_for_height(height: u64, params: &ChainParams) -> RetargetRule {
    if height >= params.fork2_height {
        RetargetRule::Lwma3
    } else if height >= params.fork_height {
        RetargetRule::ForkAdjusted
    } else {
        RetargetRule::Legacy
    }
}

/// Compute the compact target required of the block that would extend `tip`.
///
/// `candidate_time` is the timestamp the candidate block claims; it only
/// participates in the testnet minimum-difficulty rule. The chain view must
/// resolve every height from genesis through `tip.height`.
pub fn next_required_bits<V: ChainView + ?Sized>(
    view: &V,
    tip: HeaderInfo,
    candidate_time: u64,
    params: &ChainParams,
) -> Result<u32, ConsensusError> {
    let next_height = tip.height + 1;

    let (interval, timespan, clamp_high) = match rule_for_height(next_height, params) {
        RetargetRule::Lwma3 => return lwma3_next_bits(view, tip, params),
        RetargetRule::ForkAdjusted => (
            params.adjustment_interval_fork(),
            params.pow_target_timespan_fork,
            2u64,
        ),
        RetargetRule::Legacy => (params.adjustment_interval(), params.pow_target_timespan, 4u64),
    };

    if next_height % interval != 0 {
        if params.allow_min_difficulty_blocks {
            // Stalled test network: a candidate arriving more than twice the
            // target spacing after the tip may mine at minimum difficulty.
            if candidate_time > tip.time + 2 * params.pow_target_spacing {
                return Ok(params.pow_limit_bits());
            }
            return last_non_minimum_bits(view, tip, interval, params);
        }
        return Ok(tip.bits);
    }

    periodic_next_bits(view, tip, interval, timespan, clamp_high, params)
}

/// Walk back from the tip over the run of minimum-difficulty blocks and
/// return the last real target before it.
///
/// Terminates at a retarget boundary or at genesis. Amortized cost is one
/// interval; a chain consisting entirely of minimum-difficulty blocks since
/// the last boundary is the worst case.
fn last_non_minimum_bits<V: ChainView + ?Sized>(
    view: &V,
    tip: HeaderInfo,
    interval: u64,
    params: &ChainParams,
) -> Result<u32, ConsensusError> {
    let limit_bits = params.pow_limit_bits();
    let mut cursor = tip;
    while cursor.height > 0 && cursor.height % interval != 0 && cursor.bits == limit_bits {
        cursor = require_ancestor(view, cursor.height - 1)?;
    }
    Ok(cursor.bits)
}

/// Periodic retarget shared by the legacy and fork-adjusted eras.
///
/// Only called at boundary heights (`tip.height + 1` divisible by
/// `interval`).
fn periodic_next_bits<V: ChainView + ?Sized>(
    view: &V,
    tip: HeaderInfo,
    interval: u64,
    timespan: u64,
    clamp_high: u64,
    params: &ChainParams,
) -> Result<u32, ConsensusError> {
    if params.no_retargeting {
        return Ok(tip.bits);
    }

    // Measure over a full interval, except at the first boundary after
    // genesis where only interval - 1 ancestors exist below the tip.
    let next_height = tip.height + 1;
    let blocks_back = if next_height == interval {
        interval - 1
    } else {
        interval
    };
    let first_height = tip.height - blocks_back;
    let first = require_ancestor(view, first_height)?;

    let actual_timespan = (tip.time as i64 - first.time as i64)
        .clamp((timespan / 4) as i64, (timespan * clamp_high) as i64);

    let mut new_target = decode_compact(tip.bits).target;

    // The product below can momentarily need one bit beyond the ceiling's
    // width; shift out before the multiply and back after.
    let shift = new_target.bits() > params.pow_limit.bits() - 1;
    if shift {
        new_target >>= 1u32;
    }
    new_target = new_target * (actual_timespan as u64) / timespan;
    if shift {
        new_target <<= 1u32;
    }

    if new_target > params.pow_limit {
        new_target = params.pow_limit.clone();
    }

    Ok(encode_compact(&new_target))
}

/// LWMA3 per-block retarget, active once the second hard fork is reached.
///
/// Timestamps are forced strictly increasing before differencing, so
/// non-monotonic or equal raw timestamps cannot produce zero or negative
/// solvetimes, and each solvetime is capped at `LWMA_SOLVETIME_CAP` times
/// the spacing.
fn lwma3_next_bits<V: ChainView + ?Sized>(
    view: &V,
    tip: HeaderInfo,
    params: &ChainParams,
) -> Result<u32, ConsensusError> {
    let spacing = params.pow_target_spacing as i64;
    let n = LWMA_WINDOW;
    let k = n * (n + 1) * params.pow_target_spacing / 2;
    let height = tip.height;

    // Not enough history to average over: bootstrap at the ceiling.
    if height < n {
        return Ok(params.pow_limit_bits());
    }

    let mut previous_time = require_ancestor(view, height - n)?.time as i64;
    let mut weighted_solvetime: i64 = 0;
    let mut sum_target = BigUint::zero();
    // Dividing each term keeps per-term magnitudes small across the window.
    let term_divisor = k * n;

    for (idx, h) in (height - n + 1..=height).enumerate() {
        let block = require_ancestor(view, h)?;
        let this_time = (block.time as i64).max(previous_time + 1);
        let solvetime = (this_time - previous_time).min(LWMA_SOLVETIME_CAP * spacing);
        previous_time = this_time;

        let weight = idx as i64 + 1;
        weighted_solvetime += solvetime * weight;
        sum_target += decode_compact(block.bits).target / term_divisor;
    }

    let mut next_target = sum_target * (weighted_solvetime as u64);
    if next_target > params.pow_limit {
        next_target = params.pow_limit.clone();
    }

    Ok(encode_compact(&next_target))
}

fn require_ancestor<V: ChainView + ?Sized>(
    view: &V,
    height: u64,
) -> Result<HeaderInfo, ConsensusError> {
    view.ancestor(height)
        .ok_or(ConsensusError::MissingAncestor { height })
}
