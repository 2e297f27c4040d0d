//! Request types for apiver

use crate::error::Result;
use bytes::Bytes;
use http::{request::Parts, Extensions, HeaderMap, Method, Uri, Version};

/// HTTP Request wrapper
///
/// Besides read access to the request parts, the wrapper lets middleware
/// consume leading path segments. Consumed segments move into
/// [`Request::path_prefix`], so downstream routing only sees what is left.
pub struct Request {
    pub(crate) parts: Parts,
    pub(crate) body: Option<Bytes>,
    pub(crate) path_prefix: String,
}

impl Request {
    /// Create a new request from parts
    pub fn new(parts: Parts, body: Bytes) -> Self {
        Self {
            parts,
            body: Some(body),
            path_prefix: String::new(),
        }
    }

    /// Get the HTTP method
    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    /// Get the URI
    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    /// Get the HTTP version
    pub fn version(&self) -> Version {
        self.parts.version
    }

    /// Get the headers
    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// Get mutable headers
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.parts.headers
    }

    /// Get a header value as `&str`, skipping values that are not visible ASCII
    pub fn header_str(&self, name: impl http::header::AsHeaderName) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get request extensions
    pub fn extensions(&self) -> &Extensions {
        &self.parts.extensions
    }

    /// Get mutable extensions
    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.parts.extensions
    }

    /// Get the request path
    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    /// Get the query string
    pub fn query_string(&self) -> Option<&str> {
        self.parts.uri.query()
    }

    /// Path segments consumed so far, e.g. `/v1.0` after popping the version
    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    /// Look at the first path segment without consuming it
    ///
    /// Leading slashes are skipped, so both `/` and the empty path yield `""`.
    pub fn peek_path_segment(&self) -> &str {
        let path = self.path().trim_start_matches('/');
        path.split_once('/').map_or(path, |(first, _)| first)
    }

    /// Consume the first path segment
    ///
    /// `/v1.0/clusters?limit=1` becomes `/clusters?limit=1` and `v1.0` is
    /// returned. Returns `Ok(None)` when there is no segment left.
    pub fn pop_path_segment(&mut self) -> Result<Option<String>> {
        let path = self.path().trim_start_matches('/');
        if path.is_empty() {
            return Ok(None);
        }

        let (segment, rest) = match path.split_once('/') {
            Some((segment, rest)) => (segment.to_string(), format!("/{}", rest)),
            None => (path.to_string(), "/".to_string()),
        };

        self.set_path(&rest)?;
        self.path_prefix.push('/');
        self.path_prefix.push_str(&segment);
        Ok(Some(segment))
    }

    /// Replace the request path, keeping scheme, authority and query
    pub fn set_path(&mut self, path: &str) -> Result<()> {
        let path_and_query = match self.parts.uri.query() {
            Some(query) => format!("{}?{}", path, query),
            None => path.to_string(),
        };

        let mut uri_parts = self.parts.uri.clone().into_parts();
        uri_parts.path_and_query = Some(path_and_query.parse().map_err(http::Error::from)?);
        self.parts.uri = Uri::from_parts(uri_parts).map_err(http::Error::from)?;
        Ok(())
    }

    /// Take the body bytes (can only be called once)
    pub fn take_body(&mut self) -> Option<Bytes> {
        self.body.take()
    }
}

impl From<http::Request<Bytes>> for Request {
    fn from(req: http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        Self::new(parts, body)
    }
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.parts.method)
            .field("uri", &self.parts.uri)
            .field("version", &self.parts.version)
            .field("path_prefix", &self.path_prefix)
            .finish()
    }
}
