// src/api/full_scan.rs
//! Bounded walk over every page of an upstream collection.
//!
//! Pages are requested one after another, never concurrently, and the walk
//! is a counted loop: it ends when the upstream stops handing out a `next`
//! cursor or when `max_pages` requests have been made, whichever comes
//! first.

use super::decoder::{decode_batch, FromRecord};
use super::normalizer::normalize_body;
use super::types::UpstreamRequest;
use super::CatalogSource;
use crate::constants::{FULL_SCAN_BATCH_SIZE, FULL_SCAN_MAX_PAGES};
use crate::error::AdaptationFailure;
use crate::types::{OneBased, PageNumber, PageSize, Resource, UpstreamPageRequest};
use std::time::Duration;
use tokio::time::Instant;

/// Limits for one full scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Records requested per upstream page.
    pub batch_size: PageSize,
    /// Upstream pages requested at most.
    pub max_pages: u32,
    /// Wall-clock budget for the whole walk. Once spent, no further page is
    /// requested and an in-flight request is abandoned.
    pub deadline: Option<Duration>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            batch_size: PageSize::from(FULL_SCAN_BATCH_SIZE),
            max_pages: FULL_SCAN_MAX_PAGES,
            deadline: None,
        }
    }
}

impl ScanOptions {
    pub fn with_deadline(self, deadline: Option<Duration>) -> Self {
        Self { deadline, ..self }
    }
}

/// Why a scan ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStop {
    /// The upstream had no further pages.
    Exhausted,
    /// `max_pages` pages were read and the upstream still had more.
    PageBoundReached,
    /// A page request failed; later pages were not requested.
    Aborted { cause: String },
    /// The deadline passed before the upstream ran out of pages.
    DeadlineElapsed,
}

/// Records aggregated by a scan, with how it ended.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome<T> {
    pub records: Vec<T>,
    pub pages_fetched: u32,
    pub stop: ScanStop,
}

impl<T> ScanOutcome<T> {
    /// Whether the upstream may hold records this scan did not see.
    pub fn is_truncated(&self) -> bool {
        self.stop != ScanStop::Exhausted
    }
}

/// Walks `resource` from upstream page 1, decoding every record it can.
///
/// Never fails: whatever was aggregated before an error, the page bound,
/// or the deadline is returned, and `stop` says which of those happened.
pub async fn scan_all<T: FromRecord>(
    source: &dyn CatalogSource,
    resource: Resource,
    options: &ScanOptions,
) -> ScanOutcome<T> {
    let deadline = options.deadline.map(|budget| Instant::now() + budget);
    let mut records = Vec::new();
    let mut page = PageNumber::<OneBased>::first();
    let mut pages_fetched = 0u32;
    let mut stop = ScanStop::PageBoundReached;

    for _ in 0..options.max_pages {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            stop = ScanStop::DeadlineElapsed;
            break;
        }

        let request =
            UpstreamRequest::page(resource, UpstreamPageRequest::new(page, options.batch_size));
        let fetched = match deadline {
            Some(d) => match tokio::time::timeout_at(d, source.get_json(&request)).await {
                Ok(result) => result,
                Err(_) => {
                    stop = ScanStop::DeadlineElapsed;
                    break;
                }
            },
            None => source.get_json(&request).await,
        };

        let body = match fetched {
            Ok(body) => body,
            Err(e) => {
                let failure = AdaptationFailure::from(&e);
                log::warn!("Full scan of {} aborted at {}: {}", resource, request, failure);
                stop = ScanStop::Aborted {
                    cause: e.to_string(),
                };
                break;
            }
        };
        pages_fetched += 1;

        let normalized = normalize_body(body);
        let has_next = normalized.meta.has_next();
        records.extend(decode_batch::<T>(normalized.records));

        if !has_next {
            stop = ScanStop::Exhausted;
            break;
        }
        page = page.next();
    }

    match &stop {
        ScanStop::PageBoundReached => log::warn!(
            "{} on {}; returning {} records",
            AdaptationFailure::PageBoundExceeded {
                pages: pages_fetched
            },
            resource,
            records.len()
        ),
        ScanStop::DeadlineElapsed => log::warn!(
            "Full scan of {} ran out of time after {} pages",
            resource,
            pages_fetched
        ),
        ScanStop::Exhausted | ScanStop::Aborted { .. } => {}
    }
    log::info!(
        "Full scan of {}: {} records from {} pages",
        resource,
        records.len(),
        pages_fetched
    );

    ScanOutcome {
        records,
        pages_fetched,
        stop,
    }
}
