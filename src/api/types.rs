// src/api/types.rs
//! Type definitions for the upstream API module.

use crate::types::{RecordUid, Resource, UpstreamPageRequest};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// A flat upstream record: snake_case field names to scalar values, in the
/// order the upstream sent them.
pub type RawRecord = IndexMap<String, Value>;

// --- API Request Types ---

/// A GET against the upstream, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl UpstreamRequest {
    /// `GET {resource}`
    pub fn collection(resource: Resource) -> Self {
        Self {
            path: resource.path().to_string(),
            query: Vec::new(),
        }
    }

    /// `GET {resource}/{uid}`
    pub fn item(resource: Resource, uid: &RecordUid) -> Self {
        Self {
            path: format!("{}/{}", resource.path(), uid.as_str()),
            query: Vec::new(),
        }
    }

    /// `GET {resource}?page=P&limit=L`
    pub fn page(resource: Resource, request: UpstreamPageRequest) -> Self {
        Self::collection(resource)
            .with_param("page", request.page.value().to_string())
            .with_param("limit", request.limit.get().to_string())
    }

    /// `GET {resource}?{param}=Q`
    pub fn filtered(resource: Resource, param: &str, term: &str) -> Self {
        Self::collection(resource).with_param(param, term)
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for UpstreamRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PageNumber, PageSize};

    #[test]
    fn page_request_renders_one_based_query() {
        let request = UpstreamRequest::page(
            Resource::Starships,
            UpstreamPageRequest::new(PageNumber::new(2).unwrap(), PageSize::new(10).unwrap()),
        );
        assert_eq!(request.to_string(), "starships?page=2&limit=10");
    }

    #[test]
    fn item_request_uses_uid_segment() {
        let uid = RecordUid::parse("4").unwrap();
        assert_eq!(UpstreamRequest::item(Resource::Films, &uid).to_string(), "films/4");
    }
}
