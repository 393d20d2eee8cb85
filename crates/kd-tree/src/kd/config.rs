//! Tree construction parameters.

use crate::KdTreeError;

/// Hard cap on `max_depth` accepted by [`TreeConfig::new`].
///
/// Every query recurses once per level, so this bounds stack use.
pub const MAX_DEPTH_LIMIT: usize = 64;

/// Split parameters shared by every node of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// A leaf splits once it holds more than this many items.
    pub split_threshold: usize,
    /// Nodes at this depth never split. The root is at depth 0.
    pub max_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            split_threshold: 5,
            max_depth: 8,
        }
    }
}

impl TreeConfig {
    /// Creates a validated configuration.
    pub fn new(split_threshold: usize, max_depth: usize) -> Result<Self, KdTreeError> {
        if split_threshold == 0 {
            return Err(KdTreeError::ZeroSplitThreshold);
        }
        if max_depth > MAX_DEPTH_LIMIT {
            return Err(KdTreeError::MaxDepthTooLarge {
                requested: max_depth,
                limit: MAX_DEPTH_LIMIT,
            });
        }
        Ok(Self {
            split_threshold,
            max_depth,
        })
    }

    /// Sets the split threshold.
    pub fn with_split_threshold(mut self, split_threshold: usize) -> Self {
        self.split_threshold = split_threshold;
        self
    }

    /// Sets the maximum depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns `true` if a leaf at `depth` holding `len` items must split.
    #[inline]
    pub(crate) fn should_split(&self, len: usize, depth: usize) -> bool {
        len > self.split_threshold && depth < self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = TreeConfig::default();
        assert_eq!(config.split_threshold, 5);
        assert_eq!(config.max_depth, 8);
    }

    #[test]
    fn new_rejects_invalid_values() {
        assert_eq!(TreeConfig::new(0, 8), Err(KdTreeError::ZeroSplitThreshold));
        assert_eq!(
            TreeConfig::new(5, MAX_DEPTH_LIMIT + 1),
            Err(KdTreeError::MaxDepthTooLarge {
                requested: MAX_DEPTH_LIMIT + 1,
                limit: MAX_DEPTH_LIMIT
            })
        );
        assert_eq!(
            TreeConfig::new(10, 4),
            Ok(TreeConfig {
                split_threshold: 10,
                max_depth: 4
            })
        );
    }

    #[test]
    fn should_split_needs_both_conditions() {
        let config = TreeConfig::default().with_split_threshold(2).with_max_depth(3);

        assert!(!config.should_split(2, 0));
        assert!(config.should_split(3, 0));
        assert!(config.should_split(3, 2));
        assert!(!config.should_split(100, 3));
    }
}
