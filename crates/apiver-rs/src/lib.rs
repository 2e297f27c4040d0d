//! # apiver
//!
//! API version negotiation middleware for HTTP services.
//!
//! Callers pick the API version through the URL path (`/v1.0/clusters`), a
//! vendor media type in `Accept`
//! (`application/vnd.openstack.clustering-v1.0`) or the multi-service version
//! header (`OpenStack-API-Version: clustering 1.2`). The middleware validates
//! the request against the supported range and hands it to the controller of
//! its major version, to the next handler, or rejects it.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use apiver_rs::prelude::*;
//!
//! fn v1(req: Request) -> ResponseFuture {
//!     Box::pin(async move { "clustering v1".into_response() })
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_tracing(&Environment::current());
//!
//!     let layer = negotiation_layer_from_env(MajorVersionRegistry::new().version(1, v1))?;
//!     let mut stack = LayerStack::new();
//!     stack.push(Box::new(layer));
//!     Ok(())
//! }
//! ```
//!
//! ## Optional Features
//!
//! - `config` (default) - `.env` loading and `APIVER_*` environment settings

// Re-export core functionality
pub use apiver_core::*;

// Re-export negotiation
pub use apiver_versioning::*;

mod environment;
mod logging;

#[cfg(feature = "config")]
pub mod config;

pub use environment::Environment;
pub use logging::init_tracing;

#[cfg(feature = "config")]
pub use config::{
    load_dotenv, load_dotenv_from, negotiation_config_from_env,
    negotiation_config_from_env_prefixed, negotiation_layer_from_env, ConfigError,
};

/// Prelude module - import everything you need with `use apiver_rs::prelude::*`
pub mod prelude {
    pub use apiver_core::{
        ApiError, BoxedNext, IntoResponse, Json, LayerStack, MiddlewareLayer, NextService,
        Request, Response, ResponseFuture, Result,
    };

    pub use apiver_versioning::{
        ApiVersion, Controller, ControllerRegistry, MajorVersionRegistry, NegotiatedVersion,
        NegotiationConfig, RequestedVersion, SharedController, Unversioned,
        VersionNegotiationLayer, VersionRange,
    };

    pub use crate::environment::Environment;
    pub use crate::logging::init_tracing;

    #[cfg(feature = "config")]
    pub use crate::config::{load_dotenv, negotiation_config_from_env, negotiation_layer_from_env};

    pub use serde::{Deserialize, Serialize};
    pub use tracing::{debug, error, info, trace, warn};
}
