//! Protocol-wide constants for Sable.

/// Length in bytes of a 32-byte hash.
pub const HASH32_LEN: usize = 32;

/// Mainnet block time target in seconds.
pub const MAINNET_TARGET_SPACING_SECS: u64 = 600;

/// Mainnet retarget timespan in seconds (two weeks at 600s blocks).
///
/// Together with the spacing this fixes the legacy adjustment interval at
/// 2016 blocks.
pub const MAINNET_TARGET_TIMESPAN_SECS: u64 = 14 * 24 * 60 * 60;

/// Mainnet retarget timespan after the first hard fork (one day).
///
/// The shorter window brings the adjustment interval down to 144 blocks so
/// difficulty tracks hashrate swings more closely.
pub const MAINNET_TARGET_TIMESPAN_FORK_SECS: u64 = 24 * 60 * 60;

/// Mainnet height at which the shortened retarget window activates.
pub const MAINNET_FORK_HEIGHT: u64 = 125_000;

/// Mainnet height at which per-block LWMA retargeting replaces periodic
/// retargeting entirely.
pub const MAINNET_FORK2_HEIGHT: u64 = 181_000;

/// Compact encoding of the mainnet proof-of-work ceiling (easiest target).
pub const MAINNET_POW_LIMIT_BITS: u32 = 0x1e0f_ffff;

/// Compact encoding of the regtest proof-of-work ceiling.
///
/// Trivial on purpose so single-machine test chains mine instantly.
pub const REGTEST_POW_LIMIT_BITS: u32 = 0x207f_ffff;
