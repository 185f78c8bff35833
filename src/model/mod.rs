//! Catalog domain model: the entity kinds served by the upstream and the
//! page shapes results travel in.

mod entities;
mod page;

pub use entities::{Film, Person, Starship, Vehicle};
pub use page::{Page, PageEnvelope};

use crate::api::decoder::FromRecord;
use crate::types::Resource;
use std::fmt;

/// A text field a caller can search an entity kind by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Name,
    Title,
    Model,
}

impl SearchField {
    /// Query parameter the upstream filters this field with.
    pub fn upstream_param(self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Title => "title",
            SearchField::Model => "model",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.upstream_param())
    }
}

/// An entity kind served by one upstream collection.
pub trait CatalogEntity: FromRecord + fmt::Debug + Send + Sync + 'static {
    /// The upstream collection holding this kind.
    const RESOURCE: Resource;

    /// Whether the upstream paginates this collection with `page`/`limit`.
    /// Collections without native pagination answer with the flat shape and
    /// are paginated client-side.
    const NATIVE_PAGINATION: bool;

    /// Fields the upstream can filter this kind by.
    const SEARCH_FIELDS: &'static [SearchField];

    /// The one field every record of a full scan carries. Cursor-paged
    /// listings hold only uid, name and url, so a scan cannot match on
    /// anything else.
    const SCAN_FIELD: SearchField;

    /// Text of the given field, if the kind has it and the record carries it.
    fn search_text(&self, field: SearchField) -> Option<&str>;

    fn supports(field: SearchField) -> bool {
        Self::SEARCH_FIELDS.contains(&field)
    }
}
