//! # apiver versioning
//!
//! API version negotiation for HTTP services.
//!
//! A request names the API version it wants in one of three places:
//!
//! - the first path segment, `/v1.0/clusters` or `/v1/clusters`
//! - a vendor media type in `Accept`, `application/vnd.openstack.clustering-v1.0`
//! - the version header, `OpenStack-API-Version: clustering 1.2` (or `latest`)
//!
//! The path and `Accept` pick the controller; the path wins when both are
//! present. The version header picks the microversion and is checked against
//! the supported [`VersionRange`]. `/` and `/versions` answer with the version
//! index.
//!
//! # Example
//!
//! ```rust,ignore
//! use apiver_versioning::{
//!     ApiVersion, MajorVersionRegistry, NegotiationConfig, VersionNegotiationLayer,
//!     VersionRange,
//! };
//!
//! let range = VersionRange::new(ApiVersion::new(1, 0), ApiVersion::new(1, 2))?;
//! let layer = VersionNegotiationLayer::new(
//!     NegotiationConfig::new(range),
//!     MajorVersionRegistry::new().version(1, v1_controller),
//! );
//! stack.push(Box::new(layer));
//! ```

mod config;
mod document;
mod error;
mod header;
mod layer;
mod negotiator;
mod range;
mod registry;
mod strategy;
mod version;

pub use config::{
    InvalidConfig, NegotiationConfig, Unversioned, DEFAULT_API_VERSION, DEFAULT_HEADER_NAME,
    DEFAULT_SERVICE_NAME, DEFAULT_VENDOR_PREFIX,
};
pub use document::{Link, MediaTypeEntry, VersionEntry, VersionIndex, VersionsDocument};
pub use error::{NegotiationError, RejectionKind};
pub use header::{check_version_header, service_version, RequestedVersion};
pub use layer::VersionNegotiationLayer;
pub use negotiator::{NegotiationOutcome, NegotiationState, VersionNegotiator, VERSIONS_SEGMENT};
pub use range::{RangeError, VersionRange};
pub use registry::{Controller, ControllerRegistry, MajorVersionRegistry, SharedController};
pub use strategy::{parse_version_token, NegotiatedVersion, VersionSource, VersionStrategy};
pub use version::{ApiVersion, VersionError};
