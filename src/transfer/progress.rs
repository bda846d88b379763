//! Progress events emitted during a transfer run.
//!
//! Every outcome (success, retry, give-up, fatal abort) produces at least
//! one line, so a long batch transfer is auditable from the transcript
//! alone.

use std::fmt;
use std::sync::Mutex;

use log::{info, warn};

/// One discrete, human-readable progress event.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    ContainerFound { container: String },
    ContainerCreating { container: String },
    TransferStarting {
        file_count: usize,
        source: String,
        container: String,
    },
    NoFilesFound,
    Uploaded { object: String, size_mib: f64 },
    AttemptTimedOut { object: String, attempt: u32 },
    AttemptFailed {
        object: String,
        attempt: u32,
        detail: String,
    },
    Retrying {
        object: String,
        next_attempt: u32,
        max_attempts: u32,
    },
    GivingUp { object: String, attempts: u32 },
    Cancelled { completed: usize, total: usize },
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::ContainerFound { container } => {
                write!(f, "Container '{}' exists.", container)
            }
            ProgressEvent::ContainerCreating { container } => {
                write!(f, "Container '{}' not found - creating...", container)
            }
            ProgressEvent::TransferStarting {
                file_count,
                source,
                container,
            } => write!(
                f,
                "Uploading {} file(s) from '{}' to container '{}'",
                file_count, source, container
            ),
            ProgressEvent::NoFilesFound => {
                write!(f, "No files found in the selected directory.")
            }
            ProgressEvent::Uploaded { object, size_mib } => {
                write!(f, "Uploaded {} ({:.1} MiB)", object, size_mib)
            }
            ProgressEvent::AttemptTimedOut { object, attempt } => {
                write!(f, "Timeout: {} (attempt {})", object, attempt)
            }
            ProgressEvent::AttemptFailed {
                object,
                attempt,
                detail,
            } => write!(f, "Failed: {} - {} (attempt {})", object, detail, attempt),
            ProgressEvent::Retrying {
                object,
                next_attempt,
                max_attempts,
            } => write!(f, "Retrying {} ({}/{})...", object, next_attempt, max_attempts),
            ProgressEvent::GivingUp { object, attempts } => {
                write!(f, "Giving up on {} after {} attempts.", object, attempts)
            }
            ProgressEvent::Cancelled { completed, total } => {
                write!(f, "Cancelled after {} of {} file(s).", completed, total)
            }
        }
    }
}

impl ProgressEvent {
    /// Whether the event reports something going wrong.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ProgressEvent::AttemptTimedOut { .. }
                | ProgressEvent::AttemptFailed { .. }
                | ProgressEvent::GivingUp { .. }
                | ProgressEvent::Cancelled { .. }
        )
    }
}

/// Caller-supplied destination for progress events.
///
/// The orchestrator emits strictly in run order from a single worker; the
/// sink must merely be safe to call from whichever thread that is.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: &ProgressEvent);
}

/// Sink that routes events to the `log` facade. Used by the CLI.
pub struct LogSink;

impl ProgressSink for LogSink {
    fn emit(&self, event: &ProgressEvent) {
        if event.is_warning() {
            warn!("{}", event);
        } else {
            info!("{}", event);
        }
    }
}

/// Sink that buffers rendered lines, for embedding and for tests.
#[derive(Default)]
pub struct BufferSink {
    lines: Mutex<Vec<String>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("progress buffer poisoned").clone()
    }
}

impl ProgressSink for BufferSink {
    fn emit(&self, event: &ProgressEvent) {
        self.lines
            .lock()
            .expect("progress buffer poisoned")
            .push(event.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_line_has_object_and_size() {
        let event = ProgressEvent::Uploaded {
            object: "MyData/a.pdf".to_string(),
            size_mib: 12.34,
        };
        assert_eq!(event.to_string(), "Uploaded MyData/a.pdf (12.3 MiB)");
        assert!(!event.is_warning());
    }

    #[test]
    fn test_failure_lines_carry_attempt_number() {
        let timeout = ProgressEvent::AttemptTimedOut {
            object: "MyData/a.pdf".to_string(),
            attempt: 2,
        };
        assert_eq!(timeout.to_string(), "Timeout: MyData/a.pdf (attempt 2)");

        let failed = ProgressEvent::AttemptFailed {
            object: "MyData/a.pdf".to_string(),
            attempt: 3,
            detail: "503 Service Unavailable".to_string(),
        };
        assert_eq!(
            failed.to_string(),
            "Failed: MyData/a.pdf - 503 Service Unavailable (attempt 3)"
        );
        assert!(failed.is_warning());
    }

    #[test]
    fn test_giving_up_line() {
        let event = ProgressEvent::GivingUp {
            object: "MyData/a.pdf".to_string(),
            attempts: 5,
        };
        assert_eq!(
            event.to_string(),
            "Giving up on MyData/a.pdf after 5 attempts."
        );
        assert!(event.is_warning());
    }

    #[test]
    fn test_buffer_sink_preserves_order() {
        let sink = BufferSink::new();
        sink.emit(&ProgressEvent::NoFilesFound);
        sink.emit(&ProgressEvent::Cancelled {
            completed: 1,
            total: 3,
        });

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "No files found in the selected directory.");
        assert_eq!(lines[1], "Cancelled after 1 of 3 file(s).");
    }
}
