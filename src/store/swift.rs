//! [`ObjectStore`] implementation backed by the external Swift CLI.
//!
//! Every operation spawns `swift` (or a caller-supplied binary) with the
//! credential context injected as child environment variables, bounded by
//! a timeout. The child is killed when the timeout fires; a timed-out call
//! is a recoverable outcome, never a crash.

use std::process::Stdio;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use log::debug;
use tokio::process::Command;
use tokio::time;

use crate::constants::{CONTROL_TIMEOUT_SECS, DEFAULT_SWIFT_BIN, UPLOAD_TIMEOUT_SECS};
use crate::credentials::Credentials;
use crate::store::client::{AuthOutcome, ObjectStore, PutOutcome, PutRequest};

/// Marker the Swift client prints on stdout when a token was issued.
const AUTH_TOKEN_MARKER: &str = "OS_AUTH_TOKEN=";

/// Swift CLI invoker.
pub struct SwiftCli {
    binary: String,
    credentials: Credentials,
    control_timeout: Duration,
    upload_timeout: Duration,
}

/// Captured result of one CLI invocation.
struct CliRun {
    success: bool,
    timed_out: bool,
    stdout: String,
    stderr: String,
}

impl SwiftCli {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            binary: DEFAULT_SWIFT_BIN.to_string(),
            credentials,
            control_timeout: Duration::from_secs(CONTROL_TIMEOUT_SECS),
            upload_timeout: Duration::from_secs(UPLOAD_TIMEOUT_SECS),
        }
    }

    /// Use a different executable, e.g. a wrapper script or an absolute
    /// path to a virtualenv's `swift`.
    pub fn with_binary(mut self, binary: &str) -> Self {
        self.binary = binary.to_string();
        self
    }

    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    async fn run(&self, args: &[String], timeout: Duration) -> Result<CliRun> {
        debug!("swift {}", args.join(" "));

        let mut cmd = Command::new(&self.binary);
        cmd.args(args)
            .envs(self.credentials.env_pairs())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        match time::timeout(timeout, cmd.output()).await {
            Ok(output) => {
                let output = output
                    .with_context(|| format!("failed to spawn '{}'", self.binary))?;
                Ok(CliRun {
                    success: output.status.success(),
                    timed_out: false,
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                })
            }
            // Dropping the output future kills the child (kill_on_drop).
            Err(_) => Ok(CliRun {
                success: false,
                timed_out: true,
                stdout: String::new(),
                stderr: String::new(),
            }),
        }
    }
}

#[async_trait]
impl ObjectStore for SwiftCli {
    async fn authenticate(&self) -> Result<AuthOutcome> {
        let run = self
            .run(&["auth".to_string()], self.control_timeout)
            .await?;

        if run.timed_out {
            return Ok(AuthOutcome::TimedOut);
        }
        if run.success && run.stdout.contains(AUTH_TOKEN_MARKER) {
            return Ok(AuthOutcome::Ok {
                message: "Authenticated successfully.".to_string(),
            });
        }
        if run.success {
            return Ok(AuthOutcome::Rejected {
                message: "Authentication failed - no token received.".to_string(),
            });
        }
        Ok(AuthOutcome::Rejected {
            message: format!("Auth error: {}", last_line(&run.stderr)),
        })
    }

    async fn container_exists(&self, name: &str) -> Result<bool> {
        let args = vec!["stat".to_string(), name.to_string()];
        let run = self.run(&args, self.control_timeout).await?;
        if run.timed_out {
            bail!("container check for '{}' timed out", name);
        }
        Ok(run.success)
    }

    async fn create_container(&self, name: &str) -> Result<()> {
        let args = vec!["post".to_string(), name.to_string()];
        let run = self.run(&args, self.control_timeout).await?;
        if run.timed_out {
            bail!("container creation for '{}' timed out", name);
        }
        if !run.success {
            bail!(
                "could not create container '{}': {}",
                name,
                last_line(&run.stderr)
            );
        }
        Ok(())
    }

    async fn put_object(&self, request: &PutRequest) -> Result<PutOutcome> {
        let args = build_upload_args(request);
        let run = self.run(&args, self.upload_timeout).await?;

        if run.timed_out {
            return Ok(PutOutcome::TimedOut);
        }
        if run.success {
            return Ok(PutOutcome::Success);
        }
        Ok(PutOutcome::Failed {
            detail: last_line(&run.stderr),
        })
    }
}

/// Build the argument vector for one `swift upload` invocation.
///
/// Kept as a pure function so the exact CLI contract is unit-testable
/// without spawning anything.
fn build_upload_args(request: &PutRequest) -> Vec<String> {
    let mut args = vec!["upload".to_string()];
    if request.segmented {
        args.push("--segment-size".to_string());
        args.push(request.segment_size.to_string());
        args.push("--segment-container".to_string());
        args.push(request.segment_container.clone());
    }
    args.push(request.container.clone());
    args.push(request.local_path.display().to_string());
    args.push("--object-name".to_string());
    args.push(request.object_name.clone());
    args
}

/// Last non-empty line of a stderr dump, as the human-readable detail.
fn last_line(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("unknown error")
        .to_string()
}
