use thiserror::Error;

mod domain_types;
mod ids;
mod paging;

pub use domain_types::*;
pub use ids::*;
pub use paging::*;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Invalid record uid: {0}")]
    InvalidUid(String),

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Page number {value} is below the first page ({base})")]
    PageBelowBase { value: u32, base: u32 },

    #[error("Page size must be greater than zero")]
    ZeroPageSize,

    #[error("Unknown resource: {0}")]
    UnknownResource(String),
}
