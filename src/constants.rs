//! Global constants for the stackhaul application.
//!
//! This module centralizes all hardcoded values to improve maintainability
//! and make configuration changes easier.

// Segmentation constants
//
// Swift rejects single-part objects above 5 GiB, so anything strictly
// larger is uploaded in segments. The segment size sits below the ceiling
// so every segment is accepted as an ordinary object.

/// Object size above which uploads are segmented (5 GiB)
pub const SEGMENT_THRESHOLD: u64 = 5 * 1024 * 1024 * 1024;

/// Segment size for segmented uploads (4.5 GiB)
pub const SEGMENT_SIZE: u64 = 4 * 1024 * 1024 * 1024 + 500 * 1024 * 1024;

/// Suffix appended to the target container to name the segment container
pub const SEGMENT_CONTAINER_SUFFIX: &str = "_segments";

// Timeout and retry constants

/// Maximum upload attempts per file
pub const MAX_UPLOAD_RETRIES: u32 = 5;

/// Delay between retry attempts in milliseconds.
///
/// The reference behavior is an immediate identical retry; this is a named
/// constant so adding backoff is a configuration change rather than a
/// hidden one.
pub const RETRY_DELAY_MS: u64 = 0;

/// Per-file upload timeout in seconds (4 hours, large file safety net)
pub const UPLOAD_TIMEOUT_SECS: u64 = 14_400;

/// Timeout for lightweight control calls in seconds (auth, stat, create)
pub const CONTROL_TIMEOUT_SECS: u64 = 30;

// Credential constants

/// Environment variable carrying the OpenStack secret
pub const SECRET_VAR: &str = "OS_PASSWORD";

/// Default name of the external Swift command-line client
pub const DEFAULT_SWIFT_BIN: &str = "swift";

// Prune constants

/// File extension kept by the `clean` subcommand
pub const PRUNE_KEEP_EXTENSION: &str = "zip";

/// Directory name kept by the `clean` subcommand
pub const PRUNE_KEEP_DIR: &str = "SimpleArchiveFormat";

/// Maximum number of prune candidates shown before confirmation
pub const PRUNE_PREVIEW_LIMIT: usize = 20;

// Size helpers

/// Bytes per mebibyte, for progress reporting
pub const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;
