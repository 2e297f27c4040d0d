//! API version type and parsing
//!
//! An [`ApiVersion`] is a `major.minor` pair. Parsing is strict: both
//! components are plain decimal integers without sign or leading zeros, and
//! the major component of a parsed version is at least 1. `0.0` is reserved
//! for the null version, which stands for "no version requested".

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// API version as a `major.minor` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiVersion {
    /// Major version number
    pub major: u32,
    /// Minor version number
    pub minor: u32,
}

impl ApiVersion {
    /// Create a new version
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// The null version (`0.0`), meaning no version was requested
    pub const fn null() -> Self {
        Self::new(0, 0)
    }

    /// Whether this is the null version
    pub fn is_null(&self) -> bool {
        self.major == 0 && self.minor == 0
    }

    /// Parse a `major.minor` string
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let malformed = || VersionError::Malformed {
            value: text.to_string(),
        };

        let (major, minor) = text.split_once('.').ok_or_else(malformed)?;
        let major = parse_component(major).filter(|m| *m > 0).ok_or_else(malformed)?;
        let minor = parse_component(minor).ok_or_else(malformed)?;
        Ok(Self::new(major, minor))
    }

    /// Parse a bare major number, normalising it to `major.0`
    ///
    /// Used for short path forms such as `v1`.
    pub fn parse_short(text: &str) -> Result<Self, VersionError> {
        parse_component(text)
            .filter(|m| *m > 0)
            .map(|major| Self::new(major, 0))
            .ok_or_else(|| VersionError::Malformed {
                value: text.to_string(),
            })
    }

    /// Check whether this version lies within `[min, max]`
    ///
    /// A null bound leaves that side of the range open. Asking a null
    /// version is an error, since "nothing requested" has no position.
    pub fn matches(&self, min: &ApiVersion, max: &ApiVersion) -> Result<bool, VersionError> {
        if self.is_null() {
            return Err(VersionError::Null);
        }

        let above_min = min.is_null() || self >= min;
        let below_max = max.is_null() || self <= max;
        Ok(above_min && below_max)
    }

    /// Format as path segment (e.g. `v1.2`)
    pub fn as_path_segment(&self) -> String {
        format!("v{}.{}", self.major, self.minor)
    }
}

/// Parse one canonical non-negative decimal component
fn parse_component(text: &str) -> Option<u32> {
    let canonical = !text.is_empty()
        && text.bytes().all(|b| b.is_ascii_digit())
        && (text == "0" || !text.starts_with('0'));
    if canonical {
        text.parse().ok()
    } else {
        None
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ApiVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ApiVersion> for String {
    fn from(version: ApiVersion) -> Self {
        version.to_string()
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
    }
}

/// Error type for version handling
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The string is not a `major.minor` version
    #[error("API Version String ({value}) is of invalid format. It must be of format 'major.minor'.")]
    Malformed {
        /// The rejected input
        value: String,
    },
    /// A range check was attempted on the null version
    #[error("Null API version cannot be compared against a range")]
    Null,
}
