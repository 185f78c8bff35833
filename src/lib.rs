// src/lib.rs
//! swapi-bridge library: a normalized, paginated facade over the Star Wars API.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`, `AdaptationFailure`
//! - **Configuration**: `BridgeConfig`, `CommandLineInput`
//! - **Domain model**: `Film`, `Person`, `Starship`, `Vehicle`, `Page`
//! - **Domain types**: `PageNumber`, `PageSize`, `Pagination`, `RecordUid`
//! - **API client**: `CatalogSource`, `SwapiHttpClient`, `UpstreamCatalog`
//! - **Queries**: `Catalog`, `Listing`

pub mod api;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod output;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AdaptationFailure, AppError, UpstreamErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{BridgeConfig, CommandLineInput, Operation, PagingArgs};

// --- Domain Model ---
pub use crate::model::{
    CatalogEntity, Film, Page, PageEnvelope, Person, SearchField, Starship, Vehicle,
};

// --- Domain Types ---
pub use crate::types::{
    BaseUrl, OneBased, PageBase, PageNumber, PageSize, Pagination, RecordUid, Resource,
    UpstreamPageRequest, ZeroBased,
};

// --- API Client ---
pub use crate::api::{
    decoder::{DecodeError, FromRecord},
    full_scan::{ScanOptions, ScanOutcome, ScanStop},
    types::{RawRecord, UpstreamRequest},
    CatalogSource, SwapiHttpClient, UpstreamCatalog,
};

// --- Queries ---
pub use crate::catalog::{Catalog, Listing};
