// src/catalog.rs
//! Per-entity catalog queries: listing, lookup by uid, and search.
//!
//! The upstream paginates some collections natively and not others, and
//! cannot do case-insensitive substring search at all. This layer picks the
//! cheapest strategy per entity kind and always answers with a `Page`.

use crate::api::full_scan::ScanStop;
use crate::api::pagination::{to_internal_page, to_upstream_page};
use crate::api::search::{paginate, search_and_paginate, text_filter};
use crate::api::UpstreamCatalog;
use crate::error::AppError;
use crate::model::{CatalogEntity, Page, SearchField};
use crate::types::{PageBase, Pagination, RecordUid};

/// A caller page, plus how the full scan behind it ended when there was one.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T, B> {
    pub page: Page<T, B>,
    /// `None` when the page came straight from the upstream's own pagination.
    pub scan_stop: Option<ScanStop>,
}

impl<T, B> Listing<T, B> {
    fn native(page: Page<T, B>) -> Self {
        Self {
            page,
            scan_stop: None,
        }
    }

    fn scanned(page: Page<T, B>, stop: ScanStop) -> Self {
        Self {
            page,
            scan_stop: Some(stop),
        }
    }

    /// Whether records may be missing because the scan did not finish.
    pub fn is_truncated(&self) -> bool {
        self.scan_stop
            .as_ref()
            .is_some_and(|stop| *stop != ScanStop::Exhausted)
    }
}

/// Catalog queries over an [`UpstreamCatalog`].
#[derive(Clone)]
pub struct Catalog {
    upstream: UpstreamCatalog,
}

impl Catalog {
    pub fn new(upstream: UpstreamCatalog) -> Self {
        Self { upstream }
    }

    /// One page of every record of kind `E`.
    ///
    /// Natively paginated kinds go straight to the upstream for a requested
    /// page. Everything else, and any unpaged request, is a full scan sliced
    /// locally.
    pub async fn list<E: CatalogEntity, B: PageBase>(&self, pagination: Pagination<B>) -> Listing<E, B> {
        match pagination {
            Pagination::Paged { page, size } if E::NATIVE_PAGINATION => {
                let envelope = self
                    .upstream
                    .fetch_page::<E>(E::RESOURCE, to_upstream_page(page, size))
                    .await;
                Listing::native(to_internal_page(envelope, page, size))
            }
            _ => {
                let outcome = self.upstream.scan_all::<E>(E::RESOURCE).await;
                Listing::scanned(paginate(outcome.records, pagination), outcome.stop)
            }
        }
    }

    /// The record of kind `E` with the given uid, if the upstream has one.
    pub async fn find<E: CatalogEntity>(&self, uid: &RecordUid) -> Option<E> {
        self.upstream.fetch_by_id::<E>(E::RESOURCE, uid).await
    }

    /// Case-insensitive substring search over a full scan of kind `E`.
    ///
    /// Only `E::SCAN_FIELD` can be searched this way; other fields go
    /// through [`lookup`](Self::lookup).
    pub async fn search<E: CatalogEntity, B: PageBase>(
        &self,
        field: SearchField,
        term: &str,
        pagination: Pagination<B>,
    ) -> Result<Listing<E, B>, AppError> {
        ensure_scannable::<E>(field)?;

        let outcome = self.upstream.scan_all::<E>(E::RESOURCE).await;
        log::debug!(
            "Searching {} {} records for {}={:?}",
            outcome.records.len(),
            E::RESOURCE,
            field,
            term
        );
        let page = search_and_paginate(outcome.records, text_filter::<E>(field, term), pagination);
        Ok(Listing::scanned(page, outcome.stop))
    }

    /// Asks the upstream to filter by `field`, then applies the local
    /// case-insensitive match to what comes back.
    pub async fn lookup<E: CatalogEntity, B: PageBase>(
        &self,
        field: SearchField,
        term: &str,
        pagination: Pagination<B>,
    ) -> Result<Listing<E, B>, AppError> {
        ensure_searchable::<E>(field)?;

        let candidates = self
            .upstream
            .fetch_by_query::<E>(E::RESOURCE, field, term)
            .await;
        let page = search_and_paginate(candidates, text_filter::<E>(field, term), pagination);
        Ok(Listing::native(page))
    }
}

fn ensure_searchable<E: CatalogEntity>(field: SearchField) -> Result<(), AppError> {
    if E::supports(field) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{} cannot be searched by {}",
            E::RESOURCE,
            field
        )))
    }
}

fn ensure_scannable<E: CatalogEntity>(field: SearchField) -> Result<(), AppError> {
    ensure_searchable::<E>(field)?;
    if field == E::SCAN_FIELD {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{} can only be scanned by {}; use lookup for {}",
            E::RESOURCE,
            E::SCAN_FIELD,
            field
        )))
    }
}
