//! Keeps the ssh routing file in sync with the stored profiles.
//!
//! Each profile with an existing key owns one marker-delimited block in the
//! file. Everything else in the file is left exactly as found.

pub mod block;
pub mod reconcile;
pub mod scan;

pub use block::{BlockTemplate, MARKER_TOKEN};
pub use reconcile::{
    ReconcileError, ReconcileReport, Reconciler, Rendered, Skipped, backup_path, reconcile,
};
