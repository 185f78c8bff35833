// src/output/mod.rs
//! Delivery of rendered results to stdout or a file.

mod writer;

// Re-export the public interface
pub use writer::{deliver, render_json, DeliveryTarget};
