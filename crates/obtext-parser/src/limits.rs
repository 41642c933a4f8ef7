//! Resource limits shared by every pipeline stage.

/// Nesting depth used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Resource limits for parsing, validation and binding.
///
/// The root object has depth 1, an object inside one of its arguments has
/// depth 2, and so on. Input nested deeper than `max_depth` is rejected with
/// [`ErrorCode::E006`](crate::error::ErrorCode::E006) instead of exhausting
/// the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    max_depth: usize,
}

impl Limits {
    /// Create limits with the given maximum object nesting depth.
    ///
    /// A depth of zero is raised to one, so a lone root object always fits.
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Whether an object at `depth` is too deeply nested.
    pub(crate) fn exceeds(&self, depth: usize) -> bool {
        depth > self.max_depth
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        assert_eq!(Limits::default().max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_exceeds() {
        let limits = Limits::new(2);
        assert!(!limits.exceeds(1));
        assert!(!limits.exceeds(2));
        assert!(limits.exceeds(3));
        assert_eq!(Limits::new(0).max_depth(), 1);
    }
}
