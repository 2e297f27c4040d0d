//! Version negotiation middleware
//!
//! Wraps a [`VersionNegotiator`] as a [`MiddlewareLayer`]:
//!
//! ```text
//! request ─► negotiate ─┬─ Reject ──────────────────────────► error response
//!                       ├─ Index ───────────────────────────► version index
//!                       └─ Respond(controller) / Continue ─► version header
//!                                                              ├─ error ─► error response
//!                                                              └─ controller or next
//!                                                                  └─► stamped response
//! ```

use crate::config::NegotiationConfig;
use crate::negotiator::{NegotiationOutcome, NegotiationState, VersionNegotiator};
use crate::registry::ControllerRegistry;
use crate::version::ApiVersion;
use apiver_core::{
    ApiError, BoxedNext, IntoResponse, MiddlewareLayer, Request, Response, ResponseFuture,
};
use http::{header, HeaderValue};
use std::sync::Arc;

/// Middleware negotiating the API version of every request
///
/// ```ignore
/// let mut stack = LayerStack::new();
/// stack.push(Box::new(VersionNegotiationLayer::new(
///     NegotiationConfig::default(),
///     MajorVersionRegistry::new().version(1, v1_controller),
/// )));
/// ```
#[derive(Clone, Debug)]
pub struct VersionNegotiationLayer {
    negotiator: Arc<VersionNegotiator>,
}

impl VersionNegotiationLayer {
    /// Create the layer from settings and a controller registry
    pub fn new(config: NegotiationConfig, registry: impl ControllerRegistry) -> Self {
        Self::from_negotiator(VersionNegotiator::new(config, registry))
    }

    /// Wrap an existing negotiator
    pub fn from_negotiator(negotiator: VersionNegotiator) -> Self {
        Self {
            negotiator: Arc::new(negotiator),
        }
    }

    /// The wrapped negotiator
    pub fn negotiator(&self) -> &VersionNegotiator {
        &self.negotiator
    }
}

impl MiddlewareLayer for VersionNegotiationLayer {
    fn call(&self, mut req: Request, next: BoxedNext) -> ResponseFuture {
        let negotiator = Arc::clone(&self.negotiator);

        Box::pin(async move {
            let outcome = negotiator.negotiate(&mut req);
            tracing::trace!(state = ?outcome.state(), path = %req.path(), "Path negotiation done");

            let controller = match outcome {
                NegotiationOutcome::Reject(err) => return ApiError::from(err).into_response(),
                NegotiationOutcome::Index(index) => return index.call(req).await,
                NegotiationOutcome::Respond(controller) => Some(controller),
                NegotiationOutcome::Continue(_) => None,
            };

            let version = match negotiator.check_version_header(&mut req) {
                Ok(version) => {
                    tracing::trace!(
                        state = ?NegotiationState::HeaderResolved,
                        version = %version,
                        "Version header resolved"
                    );
                    version
                }
                Err(err) => {
                    tracing::debug!(error = %err, "Rejecting version header");
                    return ApiError::from(err).into_response();
                }
            };

            let mut response = match controller {
                Some(controller) => controller.call(req).await,
                None => next(req).await,
            };
            stamp_version(&mut response, negotiator.config(), version);
            response
        })
    }

    fn clone_box(&self) -> Box<dyn MiddlewareLayer> {
        Box::new(self.clone())
    }
}

/// Report the served version back to the caller
fn stamp_version(response: &mut Response, config: &NegotiationConfig, version: ApiVersion) {
    let value = format!("{} {}", config.service(), version);
    let Ok(value) = HeaderValue::from_str(&value) else {
        tracing::warn!(service = %config.service(), "Service name is not a valid header value");
        return;
    };
    response.headers_mut().insert(config.header().clone(), value);

    if let Ok(vary) = HeaderValue::from_str(config.header().as_str()) {
        response.headers_mut().append(header::VARY, vary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::RequestedVersion;
    use crate::range::VersionRange;
    use crate::registry::MajorVersionRegistry;
    use crate::strategy::{NegotiatedVersion, VersionSource};
    use bytes::Bytes;
    use http::StatusCode;
    use std::sync::Mutex;

    fn layer() -> VersionNegotiationLayer {
        let config = NegotiationConfig::new(
            VersionRange::new(ApiVersion::new(1, 0), ApiVersion::new(1, 2)).unwrap(),
        );
        let registry = MajorVersionRegistry::new().version(1, |_req: Request| {
            Box::pin(async { "v1 root".into_response() }) as ResponseFuture
        });
        VersionNegotiationLayer::new(config, registry)
    }

    type Seen = Arc<Mutex<Vec<(String, Option<ApiVersion>)>>>;

    fn handler(seen: Seen) -> BoxedNext {
        Arc::new(move |req: Request| {
            let requested = req.extensions().get::<RequestedVersion>().map(|v| v.0);
            seen.lock().unwrap().push((req.path().to_string(), requested));
            Box::pin(async { StatusCode::OK.into_response() }) as ResponseFuture
        })
    }

    fn request(path: &str, version: Option<&str>) -> Request {
        let mut builder = http::Request::builder().uri(path);
        if let Some(version) = version {
            builder = builder.header("OpenStack-API-Version", version);
        }
        builder.body(Bytes::new()).unwrap().into()
    }

    #[tokio::test]
    async fn continues_with_stamped_response() {
        let seen: Seen = Arc::default();

        let response = layer()
            .call(request("/v1.0/clusters", Some("clustering 1.2")), handler(seen.clone()))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("openstack-api-version").unwrap(),
            "clustering 1.2"
        );
        assert_eq!(
            response.headers().get(header::VARY).unwrap(),
            "openstack-api-version"
        );
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("/clusters".to_string(), Some(ApiVersion::new(1, 2)))]
        );
    }

    #[tokio::test]
    async fn index_skips_header_check() {
        let seen: Seen = Arc::default();

        let response = layer()
            .call(request("/", Some("clustering 9.9")), handler(seen.clone()))
            .await;

        assert_eq!(response.status(), StatusCode::MULTIPLE_CHOICES);
        assert!(response.headers().get("openstack-api-version").is_none());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn index_ignores_earlier_negotiation() {
        let seen: Seen = Arc::default();
        let mut req = request("/versions", Some("clustering 2.03"));
        req.extensions_mut().insert(NegotiatedVersion::new(
            ApiVersion::new(1, 0),
            VersionSource::Path,
        ));

        let response = layer().call(req, handler(seen.clone())).await;

        assert_eq!(response.status(), StatusCode::MULTIPLE_CHOICES);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn version_root_goes_to_controller() {
        let seen: Seen = Arc::default();

        let response = layer().call(request("/v1/", None), handler(seen.clone())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("openstack-api-version").unwrap(),
            "clustering 1.0"
        );
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn header_rejections_stop_the_chain() {
        let seen: Seen = Arc::default();

        let invalid = layer()
            .call(request("/v1.0/clusters", Some("clustering 2.03")), handler(seen.clone()))
            .await;
        let unsupported = layer()
            .call(request("/v1.0/clusters", Some("clustering 2.3")), handler(seen.clone()))
            .await;

        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(unsupported.status(), StatusCode::NOT_ACCEPTABLE);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unversioned_request_is_not_found() {
        let seen: Seen = Arc::default();

        let response = layer()
            .call(request("/clusters", None), handler(seen.clone()))
            .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(seen.lock().unwrap().is_empty());
    }
}
