//! Configuration types for treecopy
//!
//! Validated newtypes shared by the configuration layer and the engine.

/// Path length (in characters) at which the extended-length-path escape kicks in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "usize", into = "usize"))]
pub struct LongPathThreshold(usize);

impl LongPathThreshold {
    /// Smallest accepted threshold
    pub const MIN: usize = 1;
    /// Largest accepted threshold (longest path an extended-length path may hold)
    pub const MAX: usize = 32_767;
    /// Default threshold
    pub const DEFAULT: usize = 200;

    /// Create a new threshold with validation
    pub fn new(length: usize) -> Result<Self, String> {
        if length < Self::MIN {
            Err(format!(
                "Long path threshold {} is below minimum {}",
                length,
                Self::MIN
            ))
        } else if length > Self::MAX {
            Err(format!(
                "Long path threshold {} exceeds maximum {}",
                length,
                Self::MAX
            ))
        } else {
            Ok(Self(length))
        }
    }

    /// Get the threshold value
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for LongPathThreshold {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<usize> for LongPathThreshold {
    type Error = String;

    fn try_from(length: usize) -> Result<Self, Self::Error> {
        Self::new(length)
    }
}

impl From<LongPathThreshold> for usize {
    fn from(threshold: LongPathThreshold) -> Self {
        threshold.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        assert_eq!(LongPathThreshold::default().get(), 200);
    }

    #[test]
    fn test_threshold_validation() {
        assert!(LongPathThreshold::new(0).is_err());
        assert!(LongPathThreshold::new(1).is_ok());
        assert!(LongPathThreshold::new(260).is_ok());
        assert!(LongPathThreshold::new(32_767).is_ok());
        assert!(LongPathThreshold::new(32_768).is_err());
    }
}
