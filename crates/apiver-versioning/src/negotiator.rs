//! Path and `Accept` negotiation
//!
//! [`VersionNegotiator::negotiate`] decides, for one request, whether it is
//! answered by the version index, handed to a per-version controller,
//! continued downstream or rejected. It is synchronous and keeps no state
//! between requests.

use crate::config::{NegotiationConfig, Unversioned};
use crate::document::VersionIndex;
use crate::error::NegotiationError;
use crate::header;
use crate::registry::{ControllerRegistry, SharedController};
use crate::strategy::{parse_version_token, NegotiatedVersion, VersionSource, VersionStrategy};
use crate::version::ApiVersion;
use apiver_core::Request;
use std::sync::Arc;

/// First path segment that lists the available versions
pub const VERSIONS_SEGMENT: &str = "versions";

/// Result of negotiating one request
#[derive(Clone)]
pub enum NegotiationOutcome {
    /// Hand the request to the next handler, with the version if one was found
    Continue(Option<NegotiatedVersion>),
    /// Answer with the version index, whatever the request headers say
    Index(SharedController),
    /// Answer the request with this version's controller
    Respond(SharedController),
    /// Reject the request
    Reject(NegotiationError),
}

/// Where a request ended up in the negotiation state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    /// No version information was found and the request continues
    Unresolved,
    /// A path or `Accept` version was found
    PathResolved,
    /// The version header was resolved as well
    ///
    /// Reached in [`VersionNegotiationLayer`](crate::VersionNegotiationLayer)
    /// once [`VersionNegotiator::check_version_header`] succeeds.
    HeaderResolved,
    /// The request was rejected
    Rejected,
    /// A controller answers the request
    Responded,
}

impl NegotiationOutcome {
    /// The state this outcome leaves the request in
    pub fn state(&self) -> NegotiationState {
        match self {
            Self::Continue(None) => NegotiationState::Unresolved,
            Self::Continue(Some(_)) => NegotiationState::PathResolved,
            Self::Index(_) | Self::Respond(_) => NegotiationState::Responded,
            Self::Reject(_) => NegotiationState::Rejected,
        }
    }
}

impl std::fmt::Debug for NegotiationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Continue(version) => f.debug_tuple("Continue").field(version).finish(),
            Self::Index(_) => f.debug_tuple("Index").field(&"<controller>").finish(),
            Self::Respond(_) => f.debug_tuple("Respond").field(&"<controller>").finish(),
            Self::Reject(err) => f.debug_tuple("Reject").field(err).finish(),
        }
    }
}

/// Negotiates the API version of incoming requests
#[derive(Clone)]
pub struct VersionNegotiator {
    config: Arc<NegotiationConfig>,
    strategies: Vec<VersionStrategy>,
    registry: Arc<dyn ControllerRegistry>,
    index: SharedController,
}

impl VersionNegotiator {
    /// Create a negotiator
    ///
    /// The path is tried before `Accept`. The version index lists the majors
    /// reported by `registry`.
    pub fn new(config: NegotiationConfig, registry: impl ControllerRegistry) -> Self {
        Self::with_shared_registry(config, Arc::new(registry))
    }

    /// Create a negotiator around an already shared registry
    pub fn with_shared_registry(
        config: NegotiationConfig,
        registry: Arc<dyn ControllerRegistry>,
    ) -> Self {
        let index = VersionIndex::new(config.range(), config.vendor(), &registry.majors());
        Self {
            strategies: vec![VersionStrategy::Path, VersionStrategy::accept(config.vendor())],
            config: Arc::new(config),
            registry,
            index: Arc::new(index),
        }
    }

    /// Negotiation settings
    pub fn config(&self) -> &NegotiationConfig {
        &self.config
    }

    /// Negotiate the path and `Accept` version of `req`
    ///
    /// A path version is popped from the path before the registry is
    /// consulted. The resolved version is stored in the request extensions.
    pub fn negotiate(&self, req: &mut Request) -> NegotiationOutcome {
        let first = req.peek_path_segment();
        if first.is_empty() || first == VERSIONS_SEGMENT {
            tracing::debug!(path = %req.path(), "Serving API version index");
            return NegotiationOutcome::Index(Arc::clone(&self.index));
        }

        let negotiated = match self.resolve(req) {
            Ok(Some(negotiated)) => negotiated,
            Ok(None) => return self.unversioned(req),
            Err(err) => {
                tracing::debug!(path = %req.path(), error = %err, "Rejecting request version");
                return NegotiationOutcome::Reject(err);
            }
        };

        if negotiated.source == VersionSource::Path {
            if let Err(err) = req.pop_path_segment() {
                let detail = err.internal_details().unwrap_or(err.message.as_str()).to_string();
                return NegotiationOutcome::Reject(NegotiationError::PathRewrite(detail));
            }
        }

        tracing::debug!(
            major = negotiated.major,
            minor = negotiated.minor,
            source = ?negotiated.source,
            path = %req.path(),
            "Negotiated API version"
        );

        let token = negotiated.version().as_path_segment();
        match self.controller_for(&token, negotiated.source, req) {
            Some(controller) if is_version_root(req.path()) => {
                NegotiationOutcome::Respond(controller)
            }
            Some(_) => NegotiationOutcome::Continue(Some(negotiated)),
            None => {
                req.extensions_mut().insert(negotiated);
                NegotiationOutcome::Continue(Some(negotiated))
            }
        }
    }

    /// Look up the controller for a `v<major>[.<minor>]` token
    ///
    /// Malformed tokens return `None` without consulting the registry. On a
    /// match the version is stored in the request extensions.
    pub fn controller_for(
        &self,
        token: &str,
        source: VersionSource,
        req: &mut Request,
    ) -> Option<SharedController> {
        let version = parse_version_token(token)?;
        let controller = self.registry.get_controller(&version.to_string())?;
        req.extensions_mut()
            .insert(NegotiatedVersion::new(version, source));
        Some(controller)
    }

    /// Resolve the version header against the configured range
    pub fn check_version_header(&self, req: &mut Request) -> Result<ApiVersion, NegotiationError> {
        header::check_version_header(req, &self.config)
    }

    fn resolve(&self, req: &Request) -> Result<Option<NegotiatedVersion>, NegotiationError> {
        for strategy in &self.strategies {
            if let Some(negotiated) = strategy.extract(req)? {
                return Ok(Some(negotiated));
            }
        }
        Ok(None)
    }

    fn unversioned(&self, req: &Request) -> NegotiationOutcome {
        match self.config.unversioned_policy() {
            Unversioned::NotFound => {
                tracing::debug!(path = %req.path(), "Request names no API version");
                NegotiationOutcome::Reject(NegotiationError::NoVersion)
            }
            Unversioned::Passthrough => NegotiationOutcome::Continue(None),
        }
    }
}

impl std::fmt::Debug for VersionNegotiator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionNegotiator")
            .field("config", &self.config)
            .field("strategies", &self.strategies)
            .finish()
    }
}

fn is_version_root(path: &str) -> bool {
    path.trim_start_matches('/').is_empty()
}
