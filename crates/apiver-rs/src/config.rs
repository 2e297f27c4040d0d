//! Configuration from the environment
//!
//! Negotiation settings are read from `APIVER_*` variables, optionally seeded
//! from a `.env` file:
//!
//! ```text
//! APIVER_SERVICE_NAME=clustering
//! APIVER_HEADER_NAME=OpenStack-API-Version
//! APIVER_DEFAULT_VERSION=1.0
//! APIVER_VENDOR_PREFIX=application/vnd.openstack.clustering-
//! APIVER_MIN_VERSION=1.0
//! APIVER_MAX_VERSION=1.4
//! APIVER_UNVERSIONED=not_found
//! ```
//!
//! Every variable is optional. Unset ones take the defaults of
//! [`NegotiationConfig`]. Raising `APIVER_MIN_VERSION` above `1.0` also
//! requires an `APIVER_DEFAULT_VERSION` inside the new range.

use apiver_versioning::{ControllerRegistry, NegotiationConfig, VersionNegotiationLayer};
use thiserror::Error;

/// Prefix of the negotiation variables
pub const ENV_PREFIX: &str = "APIVER_";

/// Error type for configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is missing or does not hold a valid value
    #[error("Configuration error: {0}")]
    Env(#[from] envy::Error),
}

/// Load variables from `.env` in the current directory
///
/// A missing file is not an error. Variables already set in the process
/// environment take precedence.
pub fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        tracing::debug!("Loaded .env file");
    }
}

/// Load variables from a specific env file
pub fn load_dotenv_from<P: AsRef<std::path::Path>>(path: P) {
    let path = path.as_ref();
    if let Err(err) = dotenvy::from_path(path) {
        tracing::debug!(path = %path.display(), error = %err, "Env file not loaded");
    }
}

/// Read negotiation settings from `APIVER_*` variables
pub fn negotiation_config_from_env() -> Result<NegotiationConfig, ConfigError> {
    negotiation_config_from_env_prefixed(ENV_PREFIX)
}

/// Read negotiation settings from variables with a custom prefix
///
/// The prefix is used as given, so include the trailing underscore.
pub fn negotiation_config_from_env_prefixed(
    prefix: &str,
) -> Result<NegotiationConfig, ConfigError> {
    let config: NegotiationConfig = envy::prefixed(prefix).from_env()?;
    tracing::info!(
        service = %config.service(),
        min_version = %config.range().minimum(),
        max_version = %config.range().maximum(),
        "Loaded API version negotiation settings"
    );
    Ok(config)
}

/// Build the negotiation layer from `.env` and `APIVER_*` variables
pub fn negotiation_layer_from_env(
    registry: impl ControllerRegistry,
) -> Result<VersionNegotiationLayer, ConfigError> {
    load_dotenv();
    Ok(VersionNegotiationLayer::new(negotiation_config_from_env()?, registry))
}
