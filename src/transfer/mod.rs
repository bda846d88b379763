//! The bulk upload orchestrator.
//!
//! [`plan`] enumerates a local tree into upload tasks with stable remote
//! object names, [`orchestrator`] drives the store client with bounded
//! retries and segmentation, and [`progress`] carries the ordered stream
//! of human-readable events a run emits.

pub mod orchestrator;
pub mod plan;
pub mod progress;

pub use orchestrator::{transfer_directory, CancelToken, TransferOptions, TransferReport};
pub use plan::{plan_transfer, UploadTask};
pub use progress::{BufferSink, LogSink, ProgressEvent, ProgressSink};
