use crate::types::{PageBase, PageNumber};
use serde::Serialize;

/// One page of results as the upstream described it.
///
/// Metadata is whatever the upstream sent, so every field may be absent.
/// A non-empty `next` is the only signal that more pages exist.
#[derive(Debug, Clone, PartialEq)]
pub struct PageEnvelope<T> {
    pub results: Vec<T>,
    pub total_records: Option<u64>,
    pub total_pages: Option<u32>,
    pub previous: Option<String>,
    pub next: Option<String>,
}

impl<T> PageEnvelope<T> {
    /// The value a failed page fetch produces: no results, no metadata.
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            total_records: None,
            total_pages: None,
            previous: None,
            next: None,
        }
    }

    pub fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|n| !n.is_empty())
    }
}

impl<T> Default for PageEnvelope<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Caller-facing page.
///
/// `page_number` is in the caller's convention `B`, and `first` is true
/// exactly when it is that convention's first page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", bound(serialize = "T: Serialize"))]
pub struct Page<T, B> {
    pub content: Vec<T>,
    pub page_number: PageNumber<B>,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub first: bool,
    pub last: bool,
}

impl<T, B: PageBase> Page<T, B> {
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
