use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

/// Result of an authentication attempt.
///
/// Ordinary rejection is a normal outcome, not an error: callers need to
/// tell "check credentials" apart from "check connectivity", so a timeout
/// is a distinct variant rather than a folded-in failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// A token was obtained.
    Ok { message: String },
    /// The store answered and said no.
    Rejected { message: String },
    /// No answer within the control timeout.
    TimedOut,
}

impl AuthOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, AuthOutcome::Ok { .. })
    }
}

/// Result of a single `put_object` attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutOutcome {
    Success,
    /// The transfer exceeded the caller-specified timeout.
    TimedOut,
    /// The transfer failed; `detail` is a short human-readable reason.
    Failed { detail: String },
}

/// One upload request, segmentation policy included.
///
/// The segmentation thresholds are the caller's policy; the client merely
/// honors the segment size and companion container it is handed.
#[derive(Debug, Clone)]
pub struct PutRequest {
    pub container: String,
    pub local_path: PathBuf,
    pub object_name: String,
    pub segmented: bool,
    pub segment_size: u64,
    pub segment_container: String,
}

/// Blocking-style capability against the remote object store.
///
/// Each operation translates lower-level failures into one of three
/// outcomes: success, a recoverable value (timeout, rejection, transient
/// failure), or an `Err` for the genuinely fatal cases. A non-existent
/// container is the `false` branch of [`container_exists`], not an error.
///
/// [`container_exists`]: ObjectStore::container_exists
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Obtain a session token using the full credential context.
    async fn authenticate(&self) -> Result<AuthOutcome>;

    /// Check whether a container exists.
    async fn container_exists(&self, name: &str) -> Result<bool>;

    /// Create a container. Failure here is fatal to the run: without a
    /// destination no upload can proceed.
    async fn create_container(&self, name: &str) -> Result<()>;

    /// Upload one file, segmented if the request says so.
    async fn put_object(&self, request: &PutRequest) -> Result<PutOutcome>;
}
