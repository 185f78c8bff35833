// src/api/pagination.rs
//! Bridges caller page conventions and the upstream's one-based page/limit.

use crate::model::{Page, PageEnvelope};
use crate::types::{PageBase, PageNumber, PageSize, UpstreamPageRequest};

/// Translates a caller page into the upstream's terms.
///
/// The upstream counts from 1 whatever the caller's convention, and its
/// `limit` is the caller's page size.
pub fn to_upstream_page<B: PageBase>(page: PageNumber<B>, size: PageSize) -> UpstreamPageRequest {
    UpstreamPageRequest::new(page.rebase(), size)
}

/// Rebuilds a caller page from an upstream envelope.
///
/// The page number is echoed from the request, never inferred from how
/// many results came back, and totals are the envelope's own even when
/// the page is past the end.
pub fn to_internal_page<T, B: PageBase>(
    envelope: PageEnvelope<T>,
    requested: PageNumber<B>,
    size: PageSize,
) -> Page<T, B> {
    let last = !envelope.has_next();
    Page {
        content: envelope.results,
        page_number: requested,
        page_size: size.get(),
        total_elements: envelope.total_records.unwrap_or(0),
        total_pages: envelope.total_pages.unwrap_or(0),
        first: requested.is_first(),
        last,
    }
}
