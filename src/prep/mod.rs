//! Local preparation utilities for collection directories.

pub mod prune;

pub use prune::{execute_prune, plan_prune, PruneItem, PruneKind, PruneStats};
