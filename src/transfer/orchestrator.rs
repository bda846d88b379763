//! The upload run itself: container-ensure, bounded per-file retry,
//! segmentation decision, and result aggregation.
//!
//! The run is sequential per invocation. Per-file failures are retried up
//! to the bound and then skipped; only a missing destination container
//! that cannot be created aborts the whole run.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::time::sleep;

use crate::constants::{
    MAX_UPLOAD_RETRIES, RETRY_DELAY_MS, SEGMENT_CONTAINER_SUFFIX, SEGMENT_SIZE,
    SEGMENT_THRESHOLD,
};
use crate::store::{ObjectStore, PutOutcome, PutRequest};
use crate::transfer::plan::{plan_transfer, UploadTask};
use crate::transfer::progress::{ProgressEvent, ProgressSink};

/// Tunable knobs for one transfer run.
///
/// The defaults reproduce the reference policy bit-exactly; retargeting a
/// store with a different object size ceiling is a matter of configuration.
#[derive(Debug, Clone)]
pub struct TransferOptions {
    /// Maximum attempts per file.
    pub max_retries: u32,
    /// Pause between attempts. Zero by default: immediate identical retry.
    pub retry_delay: Duration,
    /// Strictly-greater-than threshold for segmentation.
    pub segment_threshold: u64,
    /// Segment size handed to the store client for segmented uploads.
    pub segment_size: u64,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            max_retries: MAX_UPLOAD_RETRIES,
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
            segment_threshold: SEGMENT_THRESHOLD,
            segment_size: SEGMENT_SIZE,
        }
    }
}

/// Aggregate outcome of one run, transcript included.
///
/// Callers can distinguish "nothing to upload", "all succeeded", and
/// "N of M succeeded" from the counts alone; per-file detail lives in the
/// ordered transcript.
#[derive(Debug, Default)]
pub struct TransferReport {
    pub succeeded: usize,
    pub total: usize,
    /// Object names abandoned after exhausting retries, in run order.
    pub abandoned: Vec<String>,
    /// Every progress line emitted, in order.
    pub lines: Vec<String>,
}

impl TransferReport {
    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.total
    }
}

/// Cooperative cancellation flag, checked between tasks and between retry
/// attempts. A cancelled run returns whatever partial tally accumulated.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Terminal state of one upload task.
enum TaskOutcome {
    Succeeded,
    Abandoned,
    Cancelled,
}

/// Upload every file under `root` into `container`.
///
/// Ensures the container exists (creating it if absent; creation failure
/// aborts before any task is attempted), enumerates tasks deterministically,
/// then uploads them one at a time with bounded retries. Progress events
/// stream to `sink` as they happen and are also recorded in the returned
/// report.
pub async fn transfer_directory(
    store: &dyn ObjectStore,
    root: &Path,
    container: &str,
    options: &TransferOptions,
    sink: &dyn ProgressSink,
    cancel: &CancelToken,
) -> Result<TransferReport> {
    // Precondition check before any network activity.
    if !root.is_dir() {
        bail!("source directory does not exist: {}", root.display());
    }

    let mut report = TransferReport::default();

    if store
        .container_exists(container)
        .await
        .with_context(|| format!("failed to check container '{}'", container))?
    {
        record(
            &mut report,
            sink,
            ProgressEvent::ContainerFound {
                container: container.to_string(),
            },
        );
    } else {
        record(
            &mut report,
            sink,
            ProgressEvent::ContainerCreating {
                container: container.to_string(),
            },
        );
        store
            .create_container(container)
            .await
            .with_context(|| format!("could not create container '{}'", container))?;
    }

    let tasks = plan_transfer(root)?;
    report.total = tasks.len();

    if tasks.is_empty() {
        record(&mut report, sink, ProgressEvent::NoFilesFound);
        return Ok(report);
    }

    let source_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    record(
        &mut report,
        sink,
        ProgressEvent::TransferStarting {
            file_count: tasks.len(),
            source: source_name,
            container: container.to_string(),
        },
    );

    for (index, task) in tasks.iter().enumerate() {
        if cancel.is_cancelled() {
            record(
                &mut report,
                sink,
                ProgressEvent::Cancelled {
                    completed: index,
                    total: tasks.len(),
                },
            );
            return Ok(report);
        }

        match upload_with_retry(store, container, task, options, sink, cancel, &mut report)
            .await
        {
            TaskOutcome::Succeeded => report.succeeded += 1,
            TaskOutcome::Abandoned => report.abandoned.push(task.object_name.clone()),
            TaskOutcome::Cancelled => {
                record(
                    &mut report,
                    sink,
                    ProgressEvent::Cancelled {
                        completed: index,
                        total: tasks.len(),
                    },
                );
                return Ok(report);
            }
        }
    }

    Ok(report)
}

/// Attempt one task up to `options.max_retries` times.
///
/// An explicit loop rather than recursion: the attempt counter is an
/// ordinary variable and the call stack stays flat regardless of the
/// retry bound.
async fn upload_with_retry(
    store: &dyn ObjectStore,
    container: &str,
    task: &UploadTask,
    options: &TransferOptions,
    sink: &dyn ProgressSink,
    cancel: &CancelToken,
    report: &mut TransferReport,
) -> TaskOutcome {
    let request = put_request_for(task, container, options);
    let mut attempt = 1u32;

    loop {
        // Transport-level faults degrade to a failed attempt; nothing
        // escapes mid-run as an unhandled fault.
        let outcome = match store.put_object(&request).await {
            Ok(outcome) => outcome,
            Err(e) => PutOutcome::Failed {
                detail: e.to_string(),
            },
        };

        match outcome {
            PutOutcome::Success => {
                record(
                    report,
                    sink,
                    ProgressEvent::Uploaded {
                        object: task.object_name.clone(),
                        size_mib: task.size_mib(),
                    },
                );
                return TaskOutcome::Succeeded;
            }
            PutOutcome::TimedOut => record(
                report,
                sink,
                ProgressEvent::AttemptTimedOut {
                    object: task.object_name.clone(),
                    attempt,
                },
            ),
            PutOutcome::Failed { detail } => record(
                report,
                sink,
                ProgressEvent::AttemptFailed {
                    object: task.object_name.clone(),
                    attempt,
                    detail,
                },
            ),
        }

        if attempt >= options.max_retries {
            record(
                report,
                sink,
                ProgressEvent::GivingUp {
                    object: task.object_name.clone(),
                    attempts: options.max_retries,
                },
            );
            return TaskOutcome::Abandoned;
        }

        if cancel.is_cancelled() {
            return TaskOutcome::Cancelled;
        }

        attempt += 1;
        record(
            report,
            sink,
            ProgressEvent::Retrying {
                object: task.object_name.clone(),
                next_attempt: attempt,
                max_attempts: options.max_retries,
            },
        );
        if !options.retry_delay.is_zero() {
            sleep(options.retry_delay).await;
        }
    }
}

/// Build the store request for one task, deciding segmentation.
///
/// Strictly greater than the threshold: a file at exactly the ceiling is
/// still a single-part upload.
fn put_request_for(task: &UploadTask, container: &str, options: &TransferOptions) -> PutRequest {
    PutRequest {
        container: container.to_string(),
        local_path: task.local_path.clone(),
        object_name: task.object_name.clone(),
        segmented: task.size > options.segment_threshold,
        segment_size: options.segment_size,
        segment_container: format!("{}{}", container, SEGMENT_CONTAINER_SUFFIX),
    }
}

/// Emit an event to the sink and append its rendered line to the report.
fn record(report: &mut TransferReport, sink: &dyn ProgressSink, event: ProgressEvent) {
    sink.emit(&event);
    report.lines.push(event.to_string());
}
