//! Resolved OpenStack connection parameters for one upload session.
//!
//! A [`Credentials`] value is an immutable-after-construction bag of `OS_*`
//! key/value pairs passed as environment variables to the external Swift
//! client. The secret (`OS_PASSWORD`) is handled write-only: it is never
//! logged, never part of `Debug` output, and never written back to disk.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;

use crate::constants::SECRET_VAR;

lazy_static! {
    /// Matches static `export VAR=VALUE` lines in an openrc shell script
    static ref EXPORT_LINE: Regex =
        Regex::new(r"^\s*export\s+(\w+)=(.+)$").expect("valid openrc regex");
}

/// Connection parameters for the remote object store.
#[derive(Clone, Default)]
pub struct Credentials {
    vars: BTreeMap<String, String>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the static `export VAR=VALUE` entries of an openrc shell
    /// script.
    ///
    /// Surrounding single or double quotes are stripped from values.
    /// `OS_PASSWORD` is deliberately never imported from the file; the
    /// secret is supplied interactively or through the process
    /// environment.
    pub fn from_openrc(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read openrc file {}", path.display()))?;

        let mut creds = Self::new();
        for line in content.lines() {
            if let Some(caps) = EXPORT_LINE.captures(line.trim()) {
                let key = &caps[1];
                if key == SECRET_VAR {
                    continue;
                }
                let value = caps[2].trim().trim_matches('"').trim_matches('\'');
                creds.vars.insert(key.to_string(), value.to_string());
            }
        }
        Ok(creds)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Store the secret for this session. Supplied only at spawn time,
    /// never echoed.
    pub fn set_secret(&mut self, secret: &str) {
        self.vars.insert(SECRET_VAR.to_string(), secret.to_string());
    }

    pub fn has_secret(&self) -> bool {
        self.vars.contains_key(SECRET_VAR)
    }

    pub fn username(&self) -> Option<&str> {
        self.get("OS_USERNAME")
    }

    pub fn auth_url(&self) -> Option<&str> {
        self.get("OS_AUTH_URL")
    }

    pub fn project(&self) -> Option<&str> {
        self.get("OS_PROJECT_NAME")
    }

    /// Key/value pairs to inject into the child process environment.
    pub fn env_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.vars {
            if key == SECRET_VAR {
                map.entry(key, &"<redacted>");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}
