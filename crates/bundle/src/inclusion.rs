use crate::BundleError;
use alloy::rpc::types::mev::Inclusion;

/// Number of blocks after the target block for which a bundle stays
/// eligible, unless configured otherwise.
pub const DEFAULT_HORIZON: u64 = 25;

/// Inclusive block range in which a bundle may be included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InclusionWindow {
    block: u64,
    max_block: u64,
}

impl InclusionWindow {
    /// Create a window, failing if `block > max_block`.
    pub const fn new(block: u64, max_block: u64) -> Result<Self, BundleError> {
        if block > max_block {
            return Err(BundleError::InvalidInclusionWindow { block, max_block });
        }
        Ok(Self { block, max_block })
    }

    /// A window starting at `block` and lasting `horizon` more blocks.
    pub const fn with_horizon(block: u64, horizon: u64) -> Self {
        Self { block, max_block: block.saturating_add(horizon) }
    }

    /// First eligible block.
    pub const fn block(&self) -> u64 {
        self.block
    }

    /// Last eligible block.
    pub const fn max_block(&self) -> u64 {
        self.max_block
    }

    /// True if the bundle may be included in `block`.
    pub const fn contains(&self, block: u64) -> bool {
        self.block <= block && block <= self.max_block
    }
}

impl From<InclusionWindow> for Inclusion {
    fn from(window: InclusionWindow) -> Self {
        Self { block: window.block, max_block: Some(window.max_block) }
    }
}

impl From<&Inclusion> for InclusionWindow {
    /// A missing `maxBlock` means the target block only.
    fn from(inclusion: &Inclusion) -> Self {
        let max_block = inclusion.max_block.unwrap_or(inclusion.block).max(inclusion.block);
        Self { block: inclusion.block, max_block }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_inverted_window() {
        assert!(matches!(
            InclusionWindow::new(10, 9),
            Err(BundleError::InvalidInclusionWindow { block: 10, max_block: 9 })
        ));
        let single = InclusionWindow::new(10, 10).unwrap();
        assert!(single.contains(10));
        assert!(!single.contains(11));
    }

    #[test]
    fn horizon_saturates() {
        let window = InclusionWindow::with_horizon(u64::MAX - 1, DEFAULT_HORIZON);
        assert_eq!(window.max_block(), u64::MAX);
    }

    #[test]
    fn relay_inclusion() {
        let window = InclusionWindow::with_horizon(16, DEFAULT_HORIZON);
        let inclusion = Inclusion::from(window);
        assert_eq!(inclusion.block, 16);
        assert_eq!(inclusion.max_block, Some(41));
        assert_eq!(InclusionWindow::from(&inclusion), window);

        let open = Inclusion { block: 16, max_block: None };
        assert_eq!(InclusionWindow::from(&open), InclusionWindow::new(16, 16).unwrap());
    }
}
