// src/api/mod.rs
//! Upstream API interaction: the ability to read the catalog.
//!
//! This module separates I/O (`client`, `parser`) from shape handling
//! (`normalizer`, `decoder`) and from the paging logic built on top
//! (`pagination`, `full_scan`, `search`). `facade` ties them together.

pub mod client;
pub mod decoder;
pub mod facade;
pub mod full_scan;
pub mod normalizer;
pub mod pagination;
pub mod parser;
pub mod search;
pub mod types;

use crate::error::AppError;
use serde_json::Value;
use types::UpstreamRequest;

/// The ability to fetch raw JSON bodies from the upstream.
///
/// This is the seam between the adaptation logic and HTTP. Everything above
/// it depends on this trait, never on reqwest.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Issues one GET and returns the decoded JSON body.
    ///
    /// Non-success statuses and bodies that are not JSON are errors.
    async fn get_json(&self, request: &UpstreamRequest) -> Result<Value, AppError>;
}

// Re-export the public interface
pub use client::SwapiHttpClient;
pub use facade::UpstreamCatalog;
