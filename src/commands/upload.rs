//! The `upload` subcommand: resolve credentials, authenticate, run the
//! transfer, report the tally.

use std::env;
use std::fs;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use dialoguer::Password;
use log::info;

use crate::cli::UploadOpts;
use crate::constants::SECRET_VAR;
use crate::credentials::Credentials;
use crate::report::create_run_report;
use crate::store::{AuthOutcome, ObjectStore, SwiftCli};
use crate::transfer::{transfer_directory, CancelToken, LogSink, TransferOptions};

pub async fn run(opts: &UploadOpts) -> Result<()> {
    let credentials = resolve_credentials(opts)?;

    info!(
        "Auth URL : {}",
        credentials.auth_url().unwrap_or("(not set)")
    );
    info!(
        "Project  : {}",
        credentials.project().unwrap_or("(not set)")
    );
    info!(
        "Username : {}",
        credentials.username().unwrap_or("(not set)")
    );

    let store = SwiftCli::new(credentials)
        .with_binary(&opts.swift_bin)
        .with_upload_timeout(Duration::from_secs(opts.timeout));

    info!("Requesting token...");
    match store.authenticate().await? {
        AuthOutcome::Ok { message } => info!("{}", message),
        AuthOutcome::Rejected { message } => {
            bail!("{} Check your credentials.", message)
        }
        AuthOutcome::TimedOut => {
            bail!("Auth request timed out. Check network connectivity and the auth URL.")
        }
    }

    let options = TransferOptions {
        max_retries: opts.retries,
        ..Default::default()
    };
    let report = transfer_directory(
        &store,
        &opts.source,
        &opts.container,
        &options,
        &LogSink,
        &CancelToken::new(),
    )
    .await?;

    info!(
        "{} of {} file(s) uploaded to container '{}'",
        report.succeeded, report.total, opts.container
    );

    if let Some(path) = &opts.report {
        let rendered = create_run_report(&opts.source, &opts.container, &report)?;
        fs::write(path, rendered)
            .with_context(|| format!("failed to write run report {}", path.display()))?;
        info!("Run report written to {}", path.display());
    }

    if !report.all_succeeded() {
        bail!(
            "{} file(s) could not be uploaded",
            report.total - report.succeeded
        );
    }
    Ok(())
}

/// Build the credential context: openrc file, CLI overrides, then the
/// secret from the environment or an interactive prompt. The secret is
/// never echoed and never read from the openrc file.
fn resolve_credentials(opts: &UploadOpts) -> Result<Credentials> {
    let mut credentials = match &opts.openrc {
        Some(path) => Credentials::from_openrc(path)?,
        None => Credentials::new(),
    };

    if let Some(username) = &opts.username {
        credentials.set("OS_USERNAME", username);
    }

    if !credentials.has_secret() {
        if let Ok(secret) = env::var(SECRET_VAR) {
            credentials.set_secret(&secret);
        }
    }

    if !credentials.has_secret() {
        let prompt = format!(
            "OpenStack password for {}",
            credentials.username().unwrap_or("(unknown user)")
        );
        let secret = Password::new()
            .with_prompt(prompt)
            .interact()
            .context("failed to read password from terminal")?;
        credentials.set_secret(&secret);
    }

    Ok(credentials)
}
