// src/api/search.rs
//! Client-side text filtering and slicing into caller pages.
//!
//! Used where the upstream cannot search or paginate itself, and over
//! name/model query results whose upstream matching rules are not ours.

use crate::model::{CatalogEntity, Page, SearchField};
use crate::types::{PageBase, PageNumber, Pagination};

/// Case-insensitive substring match on one field. A record without the
/// field never matches.
pub fn text_filter<E: CatalogEntity>(field: SearchField, term: &str) -> impl Fn(&E) -> bool {
    let needle = term.to_lowercase();
    move |entity: &E| {
        entity
            .search_text(field)
            .is_some_and(|text| text.to_lowercase().contains(&needle))
    }
}

/// Keeps the records matching `predicate`, in order, and cuts out the
/// requested page.
///
/// A page past the end is empty but still reports how many records
/// matched, so "beyond the last page" and "nothing matched" differ in
/// `total_elements`.
pub fn search_and_paginate<T, B, P>(records: Vec<T>, predicate: P, pagination: Pagination<B>) -> Page<T, B>
where
    B: PageBase,
    P: Fn(&T) -> bool,
{
    let filtered: Vec<T> = records.into_iter().filter(|r| predicate(r)).collect();
    paginate(filtered, pagination)
}

/// Slices an already filtered collection.
pub fn paginate<T, B: PageBase>(records: Vec<T>, pagination: Pagination<B>) -> Page<T, B> {
    let total = records.len();

    let (page, size) = match pagination {
        Pagination::Unpaged => {
            return Page {
                page_size: len_u32(total),
                total_elements: total as u64,
                total_pages: u32::from(total > 0),
                content: records,
                page_number: PageNumber::first(),
                first: true,
                last: true,
            };
        }
        Pagination::Paged { page, size } => (page, size),
    };

    let size_usize = size.get() as usize;
    let total_pages = len_u32(total.div_ceil(size_usize));
    let offset = (page.index() as usize).saturating_mul(size_usize);

    let content: Vec<T> = if offset >= total {
        Vec::new()
    } else {
        records.into_iter().skip(offset).take(size_usize).collect()
    };

    Page {
        content,
        page_number: page,
        page_size: size.get(),
        total_elements: total as u64,
        total_pages,
        first: page.is_first(),
        last: offset.saturating_add(size_usize) >= total,
    }
}

fn len_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
