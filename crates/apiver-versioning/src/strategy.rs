//! Version extraction strategies
//!
//! Each [`VersionStrategy`] looks at one part of the request and either
//! resolves a version, has no opinion, or rejects the request outright. The
//! negotiator tries them in order and stops at the first answer that is not
//! "no opinion".

use crate::error::NegotiationError;
use crate::version::ApiVersion;
use apiver_core::Request;
use http::header;

/// Where a negotiated version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    /// First URL path segment, e.g. `/v1.0/clusters`
    Path,
    /// Vendor media type in the `Accept` header
    Accept,
}

/// Version resolved from the path or `Accept` header
///
/// Stored in the request extensions as the request's `api.major` and
/// `api.minor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegotiatedVersion {
    /// Major version number
    pub major: u32,
    /// Minor version number
    pub minor: u32,
    /// Where the version came from
    pub source: VersionSource,
}

impl NegotiatedVersion {
    /// Create a negotiated version
    pub fn new(version: ApiVersion, source: VersionSource) -> Self {
        Self {
            major: version.major,
            minor: version.minor,
            source,
        }
    }

    /// The version as an [`ApiVersion`]
    pub fn version(&self) -> ApiVersion {
        ApiVersion::new(self.major, self.minor)
    }
}

/// Strategy for extracting the API version from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionStrategy {
    /// First path segment of the form `v<major>[.<minor>]`
    Path,

    /// `Accept` media range of the form `<vendor_prefix>v<major>[.<minor>]`
    ///
    /// A structured syntax suffix such as `+json` is ignored. A media range
    /// that carries the prefix but no parsable version rejects the request.
    Accept {
        /// Media type prefix, e.g. `application/vnd.openstack.clustering-`
        vendor_prefix: String,
    },
}

impl VersionStrategy {
    /// Accept strategy for the given vendor prefix
    pub fn accept(vendor_prefix: impl Into<String>) -> Self {
        Self::Accept {
            vendor_prefix: vendor_prefix.into(),
        }
    }

    /// Run this strategy against a request
    pub fn extract(&self, req: &Request) -> Result<Option<NegotiatedVersion>, NegotiationError> {
        match self {
            Self::Path => Ok(parse_version_token(req.peek_path_segment())
                .map(|v| NegotiatedVersion::new(v, VersionSource::Path))),
            Self::Accept { vendor_prefix } => {
                let Some(accept) = req.header_str(header::ACCEPT) else {
                    return Ok(None);
                };
                extract_accept_version(accept, vendor_prefix)
                    .map(|v| v.map(|v| NegotiatedVersion::new(v, VersionSource::Accept)))
            }
        }
    }
}

/// Parse a `v<major>[.[<minor>]]` token; the minor defaults to 0
pub fn parse_version_token(token: &str) -> Option<ApiVersion> {
    let digits = token.strip_prefix('v')?;
    match digits.split_once('.') {
        Some((major, "")) => ApiVersion::parse_short(major).ok(),
        Some(_) => ApiVersion::parse(digits).ok(),
        None => ApiVersion::parse_short(digits).ok(),
    }
}

/// Find the first vendor media range in an `Accept` value and parse its version
fn extract_accept_version(
    accept: &str,
    vendor_prefix: &str,
) -> Result<Option<ApiVersion>, NegotiationError> {
    for media_range in accept.split(',').map(str::trim) {
        let media_type = media_range
            .split_once(';')
            .map_or(media_range, |(media_type, _)| media_type)
            .trim();

        let Some(token) = media_type.strip_prefix(vendor_prefix) else {
            continue;
        };
        let token = token.split_once('+').map_or(token, |(version, _)| version);

        return match parse_version_token(token) {
            Some(version) => Ok(Some(version)),
            None => Err(NegotiationError::UnknownMediaTypeVersion {
                media_type: media_type.to_string(),
            }),
        };
    }
    Ok(None)
}
