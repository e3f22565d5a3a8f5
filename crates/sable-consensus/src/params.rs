// Consensus-critical. Changes require spec update + tests.
//! Immutable per-network consensus parameters.
//!
//! Hard-fork heights and retarget timings are fields of a value passed into
//! every call, not process-wide state, so multiple network configurations
//! can coexist in one process and in tests.

use crate::difficulty::{decode_compact, encode_compact};
use num_bigint::BigUint;
use sable_core::{
    MAINNET_FORK2_HEIGHT, MAINNET_FORK_HEIGHT, MAINNET_POW_LIMIT_BITS,
    MAINNET_TARGET_SPACING_SECS, MAINNET_TARGET_TIMESPAN_FORK_SECS, MAINNET_TARGET_TIMESPAN_SECS,
    REGTEST_POW_LIMIT_BITS,
};

/// Proof-of-work parameters for one network.
#[derive(Clone, Debug)]
pub struct ChainParams {
    /// Target seconds between blocks.
    pub pow_target_spacing: u64,
    /// Expected seconds per legacy adjustment interval.
    pub pow_target_timespan: u64,
    /// Expected seconds per adjustment interval after the first hard fork.
    pub pow_target_timespan_fork: u64,
    /// Height at which the fork-adjusted retarget schedule activates.
    pub fork_height: u64,
    /// Height at which per-block LWMA retargeting activates.
    pub fork2_height: u64,
    /// Permit minimum-difficulty blocks when the chain stalls (testnet rule).
    pub allow_min_difficulty_blocks: bool,
    /// Never retarget; periodic boundaries return the tip's target unchanged.
    pub no_retargeting: bool,
    /// The easiest target this network accepts (the ceiling).
    pub pow_limit: BigUint,
}

impl ChainParams {
    /// Blocks per legacy adjustment interval.
    pub fn adjustment_interval(&self) -> u64 {
        self.pow_target_timespan / self.pow_target_spacing
    }

    /// Blocks per adjustment interval after the first hard fork.
    pub fn adjustment_interval_fork(&self) -> u64 {
        self.pow_target_timespan_fork / self.pow_target_spacing
    }

    /// Compact encoding of the proof-of-work ceiling.
    pub fn pow_limit_bits(&self) -> u32 {
        encode_compact(&self.pow_limit)
    }
}

/// The networks Sable ships parameters for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    /// Production network.
    Mainnet,
    /// Public test network; allows minimum-difficulty blocks on stalls.
    Testnet,
    /// Local regression test network; trivial ceiling, no retargeting,
    /// hard forks never activate.
    Regtest,
}

impl Network {
    /// Consensus parameters for this network.
    pub fn params(&self) -> ChainParams {
        match self {
            Network::Mainnet => ChainParams {
                pow_target_spacing: MAINNET_TARGET_SPACING_SECS,
                pow_target_timespan: MAINNET_TARGET_TIMESPAN_SECS,
                pow_target_timespan_fork: MAINNET_TARGET_TIMESPAN_FORK_SECS,
                fork_height: MAINNET_FORK_HEIGHT,
                fork2_height: MAINNET_FORK2_HEIGHT,
                allow_min_difficulty_blocks: false,
                no_retargeting: false,
                pow_limit: decode_compact(MAINNET_POW_LIMIT_BITS).target,
            },
            Network::Testnet => ChainParams {
                allow_min_difficulty_blocks: true,
                ..Network::Mainnet.params()
            },
            Network::Regtest => ChainParams {
                pow_target_spacing: MAINNET_TARGET_SPACING_SECS,
                pow_target_timespan: MAINNET_TARGET_TIMESPAN_SECS,
                pow_target_timespan_fork: MAINNET_TARGET_TIMESPAN_FORK_SECS,
                fork_height: u64::MAX,
                fork2_height: u64::MAX,
                allow_min_difficulty_blocks: true,
                no_retargeting: true,
                pow_limit: decode_compact(REGTEST_POW_LIMIT_BITS).target,
            },
        }
    }
}
