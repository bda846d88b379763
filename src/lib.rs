//! # stackhaul
//!
//! Bulk transfer tool for digitized archival collections: walk a local
//! directory tree and upload every file to an OpenStack Swift container,
//! preserving folder structure, with bounded retries, large-object
//! segmentation, and an auditable progress transcript.
//!
//! ## Overview
//!
//! The core is [`transfer::transfer_directory`]: it ensures the target
//! container exists, enumerates files deterministically, derives stable
//! remote object names (the selected directory's own name stays as a path
//! prefix), uploads one file at a time with up to five attempts each, and
//! returns a `(succeeded, total)` tally plus the ordered transcript.
//! Partial failure is a normal, fully-reported outcome.
//!
//! The remote store is reached through the [`store::ObjectStore`]
//! capability trait; production use shells out to the external `swift`
//! client ([`store::SwiftCli`]), while tests script the trait directly.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use stackhaul::credentials::Credentials;
//! use stackhaul::store::SwiftCli;
//! use stackhaul::transfer::{transfer_directory, CancelToken, LogSink, TransferOptions};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut credentials = Credentials::from_openrc(Path::new("openrc.sh"))?;
//! credentials.set_secret("...");
//!
//! let store = SwiftCli::new(credentials);
//! let report = transfer_directory(
//!     &store,
//!     Path::new("/data/1935"),
//!     "newspapers-1935",
//!     &TransferOptions::default(),
//!     &LogSink,
//!     &CancelToken::new(),
//! )
//! .await?;
//!
//! println!("{} of {} uploaded", report.succeeded, report.total);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`cli`]: Command-line interface definitions and argument parsing
//! - [`commands`]: Subcommand drivers (`upload`, `clean`)
//! - [`credentials`]: OpenStack credential context and openrc parsing
//! - [`store`]: Object store capability trait and the Swift CLI client
//! - [`transfer`]: Task planning, upload orchestration, progress events
//! - [`prep`]: Local collection-directory pruning
//! - [`report`]: JSON run summaries
//! - [`constants`]: Application-wide constants

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Subcommand drivers
pub mod commands;

/// Application constants and policy values
pub mod constants;

/// OpenStack credential context
pub mod credentials;

/// Local preparation utilities
pub mod prep;

/// JSON run summaries
pub mod report;

/// Object store access
pub mod store;

/// Upload orchestration
pub mod transfer;
