//! Supported version range

use crate::version::ApiVersion;
use thiserror::Error;

/// The inclusive `[minimum, maximum]` API versions a service supports
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRange {
    minimum: ApiVersion,
    maximum: ApiVersion,
}

impl VersionRange {
    /// Create a range, rejecting null bounds and `minimum > maximum`
    pub fn new(minimum: ApiVersion, maximum: ApiVersion) -> Result<Self, RangeError> {
        if minimum.is_null() || maximum.is_null() {
            return Err(RangeError::NullBound);
        }
        if minimum > maximum {
            return Err(RangeError::Inverted { minimum, maximum });
        }
        Ok(Self { minimum, maximum })
    }

    /// A range holding exactly one version
    pub fn exact(version: ApiVersion) -> Result<Self, RangeError> {
        Self::new(version, version)
    }

    /// Lowest supported version
    pub fn minimum(&self) -> ApiVersion {
        self.minimum
    }

    /// Highest supported version
    pub fn maximum(&self) -> ApiVersion {
        self.maximum
    }

    /// The version `latest` resolves to
    pub fn latest(&self) -> ApiVersion {
        self.maximum
    }

    /// Check if a version is within this range
    pub fn contains(&self, version: &ApiVersion) -> bool {
        *version >= self.minimum && *version <= self.maximum
    }
}

impl Default for VersionRange {
    fn default() -> Self {
        Self {
            minimum: ApiVersion::new(1, 0),
            maximum: ApiVersion::new(1, 0),
        }
    }
}

/// Error type for range construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// The minimum lies above the maximum
    #[error("Minimum API version {minimum} is greater than maximum {maximum}")]
    Inverted {
        /// Requested minimum
        minimum: ApiVersion,
        /// Requested maximum
        maximum: ApiVersion,
    },
    /// One of the bounds is the null version
    #[error("API version range bounds must not be null")]
    NullBound,
}
