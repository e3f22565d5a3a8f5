//! Consensus error types.

use thiserror::Error;

/// Errors returned by consensus retargeting code.
///
/// Malformed compact encodings are not errors: they degrade to rejection
/// flags or `false` returns. The only hard failure is a chain view that
/// cannot produce required history, which means the caller violated the
/// precondition of supplying a tip with resolvable ancestry.
#[derive(Debug, Error)]
pub enum ConsensusError {
    /// The chain view could not resolve a required ancestor height.
    #[error("missing ancestor at height {height}")]
    MissingAncestor {
        /// The height that could not be resolved.
        height: u64,
    },
}
