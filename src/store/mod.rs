//! Object store access.
//!
//! The orchestrator only ever talks to the remote store through the
//! [`ObjectStore`](client::ObjectStore) capability trait, so its logic and
//! tests are independent of how the remote call is transported. The
//! production implementation ([`swift::SwiftCli`]) shells out to the
//! external Swift command-line client.

pub mod client;
pub mod swift;

pub use client::{AuthOutcome, ObjectStore, PutOutcome, PutRequest};
pub use swift::SwiftCli;
