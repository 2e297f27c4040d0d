//! Version index document
//!
//! Answers `/` and `/versions` with `300 Multiple Choices` and a JSON list of
//! the major versions the service exposes.

use crate::range::VersionRange;
use crate::registry::Controller;
use crate::version::ApiVersion;
use apiver_core::{IntoResponse, Json, Request, ResponseFuture};
use http::StatusCode;
use serde::Serialize;

/// Timestamp reported for every listed version
pub const VERSION_UPDATED: &str = "2016-01-18T00:00:00Z";

/// The whole index document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionsDocument {
    /// One entry per major version
    pub versions: Vec<VersionEntry>,
}

/// One listed major version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionEntry {
    /// `"<major>.0"`
    pub id: String,
    /// `CURRENT` for the newest major, `SUPPORTED` otherwise
    pub status: String,
    /// Last update of this major version
    pub updated: String,
    /// Lowest supported version within this major
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_version: Option<ApiVersion>,
    /// Highest supported version within this major
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_version: Option<ApiVersion>,
    /// Where the version root lives
    pub links: Vec<Link>,
    /// Media types selecting this version
    #[serde(rename = "media-types")]
    pub media_types: Vec<MediaTypeEntry>,
}

/// Hyperlink to a version root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Relation, always `self`
    pub rel: String,
    /// Target
    pub href: String,
}

/// Media type selecting a version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaTypeEntry {
    /// Base type the vendor type builds on
    pub base: String,
    /// Vendor media type
    #[serde(rename = "type")]
    pub media_type: String,
}

/// Controller rendering the version index
#[derive(Debug, Clone)]
pub struct VersionIndex {
    document: VersionsDocument,
}

impl VersionIndex {
    /// Build the index for the given majors
    ///
    /// Falls back to the range's maximum major when `majors` is empty.
    pub fn new(range: &VersionRange, vendor_prefix: &str, majors: &[u32]) -> Self {
        let mut majors = if majors.is_empty() {
            vec![range.maximum().major]
        } else {
            majors.to_vec()
        };
        majors.sort_unstable();
        majors.dedup();

        let newest = majors.last().copied().unwrap_or_default();
        let versions = majors
            .into_iter()
            .map(|major| {
                let current = major == newest;
                VersionEntry {
                    id: ApiVersion::new(major, 0).to_string(),
                    status: if current { "CURRENT" } else { "SUPPORTED" }.to_string(),
                    updated: VERSION_UPDATED.to_string(),
                    min_version: current.then(|| range.minimum().max(ApiVersion::new(major, 0))),
                    max_version: current.then(|| range.maximum()),
                    links: vec![Link {
                        rel: "self".to_string(),
                        href: format!("/v{}/", major),
                    }],
                    media_types: vec![MediaTypeEntry {
                        base: "application/json".to_string(),
                        media_type: format!("{}v{}+json", vendor_prefix, major),
                    }],
                }
            })
            .collect();

        Self {
            document: VersionsDocument { versions },
        }
    }

    /// The rendered document
    pub fn document(&self) -> &VersionsDocument {
        &self.document
    }
}

impl Controller for VersionIndex {
    fn call(&self, _req: Request) -> ResponseFuture {
        let response = (StatusCode::MULTIPLE_CHOICES, Json(self.document.clone())).into_response();
        Box::pin(async move { response })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PREFIX: &str = "application/vnd.openstack.clustering-";

    #[test]
    fn single_major_document() {
        let range = VersionRange::new(ApiVersion::new(1, 0), ApiVersion::new(1, 2)).unwrap();
        let index = VersionIndex::new(&range, PREFIX, &[1]);

        assert_eq!(
            serde_json::to_value(index.document()).unwrap(),
            json!({
                "versions": [{
                    "id": "1.0",
                    "status": "CURRENT",
                    "updated": "2016-01-18T00:00:00Z",
                    "min_version": "1.0",
                    "max_version": "1.2",
                    "links": [{"rel": "self", "href": "/v1/"}],
                    "media-types": [{
                        "base": "application/json",
                        "type": "application/vnd.openstack.clustering-v1+json"
                    }]
                }]
            })
        );
    }

    #[test]
    fn older_majors_are_supported_without_bounds() {
        let range = VersionRange::new(ApiVersion::new(1, 3), ApiVersion::new(2, 1)).unwrap();
        let index = VersionIndex::new(&range, PREFIX, &[2, 1]);
        let versions = &index.document().versions;

        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].id, "1.0");
        assert_eq!(versions[0].status, "SUPPORTED");
        assert_eq!(versions[0].max_version, None);
        assert_eq!(versions[1].status, "CURRENT");
        assert_eq!(versions[1].min_version, Some(ApiVersion::new(2, 0)));
        assert_eq!(versions[1].max_version, Some(ApiVersion::new(2, 1)));
    }

    #[test]
    fn empty_registry_lists_range_major() {
        let index = VersionIndex::new(&VersionRange::default(), PREFIX, &[]);
        assert_eq!(index.document().versions.len(), 1);
        assert_eq!(index.document().versions[0].id, "1.0");
    }

    #[tokio::test]
    async fn responds_with_multiple_choices() {
        let index = VersionIndex::new(&VersionRange::default(), PREFIX, &[1]);
        let req: Request = http::Request::builder()
            .uri("/versions")
            .body(bytes::Bytes::new())
            .unwrap()
            .into();

        let response = index.call(req).await;
        assert_eq!(response.status(), StatusCode::MULTIPLE_CHOICES);
    }
}
