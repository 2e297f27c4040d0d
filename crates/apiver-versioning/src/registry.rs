//! Controller lookup by version
//!
//! The negotiator never looks inside a controller. It only asks a
//! [`ControllerRegistry`] whether one exists for a `major.minor` string and,
//! when it does, may hand the request straight to it.

use crate::version::ApiVersion;
use apiver_core::{Request, ResponseFuture};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A per-version request handler
pub trait Controller: Send + Sync + 'static {
    /// Handle a request that negotiation routed to this controller
    fn call(&self, req: Request) -> ResponseFuture;
}

impl<F> Controller for F
where
    F: Fn(Request) -> ResponseFuture + Send + Sync + 'static,
{
    fn call(&self, req: Request) -> ResponseFuture {
        self(req)
    }
}

/// Controllers are shared between requests
pub type SharedController = Arc<dyn Controller>;

/// Maps a version string to a controller
pub trait ControllerRegistry: Send + Sync + 'static {
    /// Return the controller serving `version` (`"major.minor"`), if any
    fn get_controller(&self, version: &str) -> Option<SharedController>;

    /// Major versions this registry serves, used for the version index
    fn majors(&self) -> Vec<u32> {
        Vec::new()
    }
}

impl<F> ControllerRegistry for F
where
    F: Fn(&str) -> Option<SharedController> + Send + Sync + 'static,
{
    fn get_controller(&self, version: &str) -> Option<SharedController> {
        self(version)
    }
}

/// Registry holding one controller per major version
///
/// Every minor version of a major resolves to the same controller, so
/// `"1.0"` and `"1.12"` both land on the major 1 controller.
#[derive(Clone, Default)]
pub struct MajorVersionRegistry {
    controllers: BTreeMap<u32, SharedController>,
}

impl MajorVersionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the controller for a major version
    pub fn version(mut self, major: u32, controller: impl Controller) -> Self {
        self.controllers.insert(major, Arc::new(controller));
        self
    }
}

impl ControllerRegistry for MajorVersionRegistry {
    fn get_controller(&self, version: &str) -> Option<SharedController> {
        let version = ApiVersion::parse(version).ok()?;
        self.controllers.get(&version.major).cloned()
    }

    fn majors(&self) -> Vec<u32> {
        self.controllers.keys().copied().collect()
    }
}

impl std::fmt::Debug for MajorVersionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MajorVersionRegistry")
            .field("majors", &self.controllers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiver_core::IntoResponse;

    fn named(name: &'static str) -> impl Controller {
        move |_req: Request| Box::pin(async move { name.into_response() }) as ResponseFuture
    }

    #[test]
    fn minor_versions_share_major_controller() {
        let registry = MajorVersionRegistry::new().version(1, named("v1"));

        let a = registry.get_controller("1.0").unwrap();
        let b = registry.get_controller("1.12").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn unknown_or_malformed_versions_have_no_controller() {
        let registry = MajorVersionRegistry::new().version(1, named("v1"));

        assert!(registry.get_controller("2.0").is_none());
        assert!(registry.get_controller("invalid").is_none());
        assert!(registry.get_controller("1").is_none());
    }

    #[test]
    fn majors_are_sorted() {
        let registry = MajorVersionRegistry::new()
            .version(2, named("v2"))
            .version(1, named("v1"));
        assert_eq!(registry.majors(), vec![1, 2]);
    }

    #[test]
    fn closures_act_as_registries() {
        let controller: SharedController = Arc::new(named("any"));
        let registry = move |version: &str| (version == "1.0").then(|| Arc::clone(&controller));

        assert!(registry.get_controller("1.0").is_some());
        assert!(registry.get_controller("1.1").is_none());
        assert!(registry.majors().is_empty());
    }
}
