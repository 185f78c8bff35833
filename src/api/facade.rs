// src/api/facade.rs
//! The single entry point onto the upstream catalog.
//!
//! Every operation here is best-effort: upstream failures are logged and
//! come back as empty or absent results, never as errors.

use super::decoder::{decode, decode_batch, FromRecord};
use super::full_scan::{scan_all, ScanOptions, ScanOutcome};
use super::normalizer::{normalize_body, RawEnvelope};
use super::types::UpstreamRequest;
use super::CatalogSource;
use crate::error::{AdaptationFailure, AppError};
use crate::model::{PageEnvelope, SearchField};
use crate::types::{RecordUid, Resource, UpstreamPageRequest};
use serde_json::Value;
use std::sync::Arc;

/// Normalizing, never-failing client over a `CatalogSource`.
#[derive(Clone)]
pub struct UpstreamCatalog {
    source: Arc<dyn CatalogSource>,
    scan_options: ScanOptions,
}

impl UpstreamCatalog {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            scan_options: ScanOptions::default(),
        }
    }

    pub fn with_scan_options(self, scan_options: ScanOptions) -> Self {
        Self {
            scan_options,
            ..self
        }
    }

    /// Every record of `resource`, up to the full-scan page bound.
    ///
    /// Records beyond `max_pages * batch_size` are not returned; use
    /// [`scan_all`](Self::scan_all) to find out whether that happened.
    pub async fn fetch_all<T: FromRecord>(&self, resource: Resource) -> Vec<T> {
        self.scan_all(resource).await.records
    }

    /// Like [`fetch_all`](Self::fetch_all), also reporting how the walk ended.
    pub async fn scan_all<T: FromRecord>(&self, resource: Resource) -> ScanOutcome<T> {
        scan_all(self.source.as_ref(), resource, &self.scan_options).await
    }

    /// One record by uid. `None` when the upstream does not have it, fails,
    /// or sends something that does not decode.
    pub async fn fetch_by_id<T: FromRecord>(&self, resource: Resource, uid: &RecordUid) -> Option<T> {
        let request = UpstreamRequest::item(resource, uid);
        let body = self.fetch_body(&request).await?;

        let item = match RawEnvelope::detect(body) {
            RawEnvelope::Flat(items) => items.into_iter().next()?,
            RawEnvelope::CursorPaged(_) => {
                log::warn!("Expected a single item from {}, got a paged envelope", request);
                return None;
            }
            RawEnvelope::Unrecognized { keys } => {
                log::warn!(
                    "{} from {}",
                    AdaptationFailure::ShapeUnrecognized { keys },
                    request
                );
                return None;
            }
        };

        match decode::<T>(&item.into_record()) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!(
                    "{} for {}",
                    AdaptationFailure::FieldDecodeFailure {
                        cause: e.to_string()
                    },
                    request
                );
                None
            }
        }
    }

    /// One natively paginated page. On failure, an envelope with no
    /// results and no metadata.
    pub async fn fetch_page<T: FromRecord>(
        &self,
        resource: Resource,
        page: UpstreamPageRequest,
    ) -> PageEnvelope<T> {
        let request = UpstreamRequest::page(resource, page);
        let Some(body) = self.fetch_body(&request).await else {
            return PageEnvelope::empty();
        };

        let normalized = normalize_body(body);
        let results = decode_batch::<T>(normalized.records);
        log::debug!("Fetched {} - {} results", request, results.len());

        PageEnvelope {
            results,
            total_records: normalized.meta.total_records,
            total_pages: normalized.meta.total_pages,
            previous: normalized.meta.previous,
            next: normalized.meta.next,
        }
    }

    /// Records whose name the upstream matches against `name`.
    pub async fn fetch_by_name<T: FromRecord>(&self, resource: Resource, name: &str) -> Vec<T> {
        self.fetch_by_query(resource, SearchField::Name, name).await
    }

    /// Records whose model the upstream matches against `model`.
    pub async fn fetch_by_model<T: FromRecord>(&self, resource: Resource, model: &str) -> Vec<T> {
        self.fetch_by_query(resource, SearchField::Model, model).await
    }

    /// Records the upstream returns for `?{field}={term}`.
    ///
    /// The upstream's matching rules are its own; callers that need
    /// case-insensitive substring semantics filter the result again.
    pub async fn fetch_by_query<T: FromRecord>(
        &self,
        resource: Resource,
        field: SearchField,
        term: &str,
    ) -> Vec<T> {
        let request = UpstreamRequest::filtered(resource, field.upstream_param(), term);
        let Some(body) = self.fetch_body(&request).await else {
            return Vec::new();
        };

        let results = decode_batch::<T>(normalize_body(body).records);
        log::debug!("Fetched {} items from {}", results.len(), request);
        results
    }

    /// Runs one request, logging and swallowing any failure.
    async fn fetch_body(&self, request: &UpstreamRequest) -> Option<Value> {
        match self.source.get_json(request).await {
            Ok(body) => Some(body),
            Err(e) => {
                log_failure(request, &e);
                None
            }
        }
    }
}

fn log_failure(request: &UpstreamRequest, error: &AppError) {
    if error.is_not_found() {
        log::debug!("{} not found upstream", request);
    } else {
        log::warn!("Request {} failed: {}", request, AdaptationFailure::from(error));
    }
}
