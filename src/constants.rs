// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the upstream behaviour it constrains. Reading
//! these tells you how far a full scan walks, how big its batches are, and
//! where the upstream lives by default.

use std::num::NonZeroU32;

// ---------------------------------------------------------------------------
// Upstream API boundaries
// ---------------------------------------------------------------------------

/// Default root of the upstream catalog API.
pub const DEFAULT_BASE_URL: &str = "https://www.swapi.tech/api";

/// Default per-request timeout applied by the HTTP client, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Full-scan boundaries
// ---------------------------------------------------------------------------

/// How many records a full scan asks the upstream for per page.
pub const FULL_SCAN_BATCH_SIZE: NonZeroU32 = match NonZeroU32::new(100) {
    Some(size) => size,
    None => panic!("full-scan batch size must be non-zero"),
};

/// Maximum number of upstream pages a full scan will request.
///
/// The upstream gives no guaranteed page count, and its `next` cursor chain
/// could be unbounded or cyclic. A scan stops here even if the upstream still
/// reports more pages, so at most `FULL_SCAN_BATCH_SIZE * FULL_SCAN_MAX_PAGES`
/// records are ever seen for one resource.
pub const FULL_SCAN_MAX_PAGES: u32 = 10;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
