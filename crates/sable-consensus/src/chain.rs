//! Read-only chain ancestry seam.
//!
//! The retargeting engine never owns block history. It borrows an
//! height-indexed lookup over the already-committed ancestor chain of the
//! tip under validation, and never mutates or caches what it reads.

/// The header facts the retargeting engine consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Block height, genesis = 0.
    pub height: u64,
    /// Block timestamp in seconds.
    pub time: u64,
    /// Compact difficulty target claimed by the header.
    pub bits: u32,
}

/// Height-indexed view of the ancestor chain of a tip.
///
/// Implementations must resolve every height from genesis through the tip
/// they were built for, and must return `None` rather than fabricate data
/// when a height is out of range. The engine treats `None` for a required
/// height as a fatal precondition violation.
pub trait ChainView {
    /// Header at `height` on the path from genesis to the view's tip.
    fn ancestor(&self, height: u64) -> Option<HeaderInfo>;
}

impl ChainView for [HeaderInfo] {
    fn ancestor(&self, height: u64) -> Option<HeaderInfo> {
        let idx = usize::try_from(height).ok()?;
        self.get(idx).copied().filter(|h| h.height == height)
    }
}

impl ChainView for Vec<HeaderInfo> {
    fn ancestor(&self, height: u64) -> Option<HeaderInfo> {
        self.as_slice().ancestor(height)
    }
}
