//! Negotiation settings
//!
//! [`NegotiationConfig`] carries every constant the negotiator needs: the
//! service token used in the version header, the header name, the default
//! version, the vendor media type prefix, the supported range and the policy
//! for requests that carry no version at all. It deserializes from flat
//! string fields, so it can be filled from environment variables:
//!
//! | field | default |
//! |-------|---------|
//! | `service_name` | `clustering` |
//! | `header_name` | `OpenStack-API-Version` |
//! | `default_version` | `1.0` |
//! | `vendor_prefix` | `application/vnd.openstack.clustering-` |
//! | `min_version` | `1.0` |
//! | `max_version` | `1.0` |
//! | `unversioned` | `not_found` |

use crate::range::{RangeError, VersionRange};
use crate::version::{ApiVersion, VersionError};
use http::HeaderName;
use serde::Deserialize;
use thiserror::Error;

/// Service token looked up in the version header
pub const DEFAULT_SERVICE_NAME: &str = "clustering";
/// Header carrying `"<service> <version>"` pairs
pub const DEFAULT_HEADER_NAME: &str = "OpenStack-API-Version";
/// Version used when the header has no entry for this service
pub const DEFAULT_API_VERSION: &str = "1.0";
/// Prefix of the service's vendor media type in `Accept`
pub const DEFAULT_VENDOR_PREFIX: &str = "application/vnd.openstack.clustering-";

/// What to do with requests that name no version in path or `Accept`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unversioned {
    /// Reject with 404
    #[default]
    NotFound,
    /// Let the request continue unresolved
    Passthrough,
}

/// Settings for version negotiation, validated on construction
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawNegotiationConfig")]
pub struct NegotiationConfig {
    service_name: String,
    header_name: HeaderName,
    default_version: String,
    vendor_prefix: String,
    range: VersionRange,
    unversioned: Unversioned,
}

impl NegotiationConfig {
    /// Default settings with the given supported range
    ///
    /// The fallback version is the range minimum.
    pub fn new(range: VersionRange) -> Self {
        Self {
            default_version: range.minimum().to_string(),
            range,
            ..Self::default()
        }
    }

    /// Set the service token matched in the version header
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Set the version header name
    pub fn header_name(mut self, name: HeaderName) -> Self {
        self.header_name = name;
        self
    }

    /// Set the fallback version, either `major.minor` or `latest`
    ///
    /// A `major.minor` fallback must lie within the supported range.
    pub fn default_version(mut self, version: &str) -> Result<Self, InvalidConfig> {
        validate_default(version, &self.range)?;
        self.default_version = version.to_string();
        Ok(self)
    }

    /// Set the vendor media type prefix recognised in `Accept`
    pub fn vendor_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.vendor_prefix = prefix.into();
        self
    }

    /// Set the policy for unversioned requests
    pub fn unversioned(mut self, policy: Unversioned) -> Self {
        self.unversioned = policy;
        self
    }

    /// Service token matched in the version header
    pub fn service(&self) -> &str {
        &self.service_name
    }

    /// Version header name
    pub fn header(&self) -> &HeaderName {
        &self.header_name
    }

    /// Fallback version string
    pub fn fallback_version(&self) -> &str {
        &self.default_version
    }

    /// Vendor media type prefix
    pub fn vendor(&self) -> &str {
        &self.vendor_prefix
    }

    /// Supported version range
    pub fn range(&self) -> &VersionRange {
        &self.range
    }

    /// Policy for unversioned requests
    pub fn unversioned_policy(&self) -> Unversioned {
        self.unversioned
    }
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            header_name: HeaderName::from_static("openstack-api-version"),
            default_version: DEFAULT_API_VERSION.to_string(),
            vendor_prefix: DEFAULT_VENDOR_PREFIX.to_string(),
            range: VersionRange::default(),
            unversioned: Unversioned::default(),
        }
    }
}

fn validate_default(version: &str, range: &VersionRange) -> Result<(), InvalidConfig> {
    if version.eq_ignore_ascii_case("latest") {
        return Ok(());
    }
    let parsed = ApiVersion::parse(version).map_err(InvalidConfig::DefaultVersion)?;
    if !range.contains(&parsed) {
        return Err(InvalidConfig::DefaultOutOfRange {
            version: parsed,
            minimum: range.minimum(),
            maximum: range.maximum(),
        });
    }
    Ok(())
}

/// Flat, unvalidated form read by serde
#[derive(Debug, Deserialize)]
struct RawNegotiationConfig {
    #[serde(default = "raw_defaults::service_name")]
    service_name: String,
    #[serde(default = "raw_defaults::header_name")]
    header_name: String,
    #[serde(default = "raw_defaults::version")]
    default_version: String,
    #[serde(default = "raw_defaults::vendor_prefix")]
    vendor_prefix: String,
    #[serde(default = "raw_defaults::version")]
    min_version: String,
    #[serde(default = "raw_defaults::version")]
    max_version: String,
    #[serde(default)]
    unversioned: Unversioned,
}

mod raw_defaults {
    pub fn service_name() -> String {
        super::DEFAULT_SERVICE_NAME.to_string()
    }

    pub fn header_name() -> String {
        super::DEFAULT_HEADER_NAME.to_string()
    }

    pub fn version() -> String {
        super::DEFAULT_API_VERSION.to_string()
    }

    pub fn vendor_prefix() -> String {
        super::DEFAULT_VENDOR_PREFIX.to_string()
    }
}

impl TryFrom<RawNegotiationConfig> for NegotiationConfig {
    type Error = InvalidConfig;

    fn try_from(raw: RawNegotiationConfig) -> Result<Self, Self::Error> {
        let header_name = HeaderName::from_bytes(raw.header_name.as_bytes())
            .map_err(|_| InvalidConfig::HeaderName(raw.header_name.clone()))?;
        let minimum = ApiVersion::parse(&raw.min_version).map_err(InvalidConfig::Bound)?;
        let maximum = ApiVersion::parse(&raw.max_version).map_err(InvalidConfig::Bound)?;
        let range = VersionRange::new(minimum, maximum)?;
        validate_default(&raw.default_version, &range)?;

        Ok(Self {
            service_name: raw.service_name,
            header_name,
            default_version: raw.default_version,
            vendor_prefix: raw.vendor_prefix,
            range,
            unversioned: raw.unversioned,
        })
    }
}

/// Error type for invalid negotiation settings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidConfig {
    /// The header name is not a valid HTTP header name
    #[error("Invalid version header name: {0}")]
    HeaderName(String),
    /// A range bound is not a `major.minor` version
    #[error("Invalid API version bound: {0}")]
    Bound(VersionError),
    /// The default version is neither `major.minor` nor `latest`
    #[error("Invalid default API version: {0}")]
    DefaultVersion(VersionError),
    /// The default version is outside the supported range
    #[error("Default API version {version} is outside the supported range {minimum} to {maximum}")]
    DefaultOutOfRange {
        version: ApiVersion,
        minimum: ApiVersion,
        maximum: ApiVersion,
    },
    /// The bounds do not form a range
    #[error(transparent)]
    Range(#[from] RangeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_clustering_service() {
        let config = NegotiationConfig::default();

        assert_eq!(config.service(), "clustering");
        assert_eq!(config.header().as_str(), "openstack-api-version");
        assert_eq!(config.fallback_version(), "1.0");
        assert_eq!(config.vendor(), "application/vnd.openstack.clustering-");
        assert_eq!(config.range(), &VersionRange::default());
        assert_eq!(config.unversioned_policy(), Unversioned::NotFound);
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: NegotiationConfig =
            serde_json::from_str(r#"{"max_version": "1.4", "unversioned": "passthrough"}"#)
                .unwrap();

        assert_eq!(config.range().maximum(), ApiVersion::new(1, 4));
        assert_eq!(config.range().minimum(), ApiVersion::new(1, 0));
        assert_eq!(config.unversioned_policy(), Unversioned::Passthrough);
        assert_eq!(config.service(), "clustering");
    }

    #[test]
    fn rejects_inverted_range() {
        let err = serde_json::from_str::<NegotiationConfig>(
            r#"{"min_version": "2.0", "max_version": "1.0"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("greater than maximum"));
    }

    #[test]
    fn rejects_bad_header_and_default() {
        assert!(serde_json::from_str::<NegotiationConfig>(r#"{"header_name": "bad header"}"#)
            .is_err());
        assert!(
            serde_json::from_str::<NegotiationConfig>(r#"{"default_version": "1.x"}"#).is_err()
        );
        assert!(NegotiationConfig::default().default_version("Latest").is_ok());
        assert!(NegotiationConfig::default().default_version("01.0").is_err());
    }

    #[test]
    fn default_version_must_lie_in_range() {
        let err = serde_json::from_str::<NegotiationConfig>(
            r#"{"min_version": "1.2", "max_version": "1.5"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("outside the supported range 1.2 to 1.5"));

        for default in ["1.3", "latest"] {
            let json = format!(
                r#"{{"min_version": "1.2", "max_version": "1.5", "default_version": "{}"}}"#,
                default
            );
            let config: NegotiationConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(config.fallback_version(), default);
        }

        let range = VersionRange::new(ApiVersion::new(1, 2), ApiVersion::new(1, 5)).unwrap();
        let config = NegotiationConfig::new(range);
        assert_eq!(config.fallback_version(), "1.2");
        assert_eq!(
            config.default_version("1.6").unwrap_err(),
            InvalidConfig::DefaultOutOfRange {
                version: ApiVersion::new(1, 6),
                minimum: ApiVersion::new(1, 2),
                maximum: ApiVersion::new(1, 5),
            }
        );
    }
}
