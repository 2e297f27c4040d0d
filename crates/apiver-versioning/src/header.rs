//! Version header negotiation
//!
//! The version header carries a comma separated list of
//! `"<service> <version>"` pairs so that one request can talk to several
//! services, e.g. `OpenStack-API-Version: clustering 1.2, compute 2.1`.
//! Only the entry for this service matters; without one the configured
//! default applies.

use crate::config::NegotiationConfig;
use crate::error::NegotiationError;
use crate::version::ApiVersion;
use apiver_core::Request;
use http::HeaderMap;

/// The version the caller requested through the version header
///
/// Stored in the request extensions once [`check_version_header`] succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedVersion(pub ApiVersion);

/// Find the version string for `service` in a version header value
///
/// Service names compare case-insensitively. Entries without a version are
/// skipped.
pub fn service_version<'a>(header_value: &'a str, service: &str) -> Option<&'a str> {
    header_value.split(',').find_map(|entry| {
        let (name, version) = entry.trim().split_once(char::is_whitespace)?;
        name.eq_ignore_ascii_case(service).then(|| version.trim())
    })
}

/// Join every occurrence of the version header into one list
fn header_list(headers: &HeaderMap, config: &NegotiationConfig) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(config.header())
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    (!values.is_empty()).then(|| values.join(","))
}

/// Resolve the version requested through the version header
///
/// `latest` (any case) resolves to the range maximum. Anything else must be
/// a `major.minor` inside the supported range. On success the result is
/// attached to the request as [`RequestedVersion`].
pub fn check_version_header(
    req: &mut Request,
    config: &NegotiationConfig,
) -> Result<ApiVersion, NegotiationError> {
    let requested = header_list(req.headers(), config)
        .and_then(|list| service_version(&list, config.service()).map(str::to_string))
        .unwrap_or_else(|| config.fallback_version().to_string());

    let range = config.range();
    let version = if requested.eq_ignore_ascii_case("latest") {
        range.latest()
    } else {
        let version = ApiVersion::parse(&requested)?;
        if !range.contains(&version) {
            return Err(NegotiationError::UnsupportedVersion {
                requested: version,
                minimum: range.minimum(),
                maximum: range.maximum(),
            });
        }
        version
    };

    tracing::debug!(version = %version, requested = %requested, "Resolved requested API version");
    req.extensions_mut().insert(RequestedVersion(version));
    Ok(version)
}
