pub mod add;
pub mod clone;
pub mod current;
pub mod list;
pub mod remove;
pub mod switch;
pub mod sync;

use crate::routing::{ReconcileReport, Skipped};

/// Text lines describing what a reconciliation did to the ssh config.
pub(crate) fn describe_report(report: &ReconcileReport) -> Vec<String> {
    let mut lines = vec![format!(
        "updated {} ({} host entries)",
        report.path.display(),
        report.included.len()
    )];
    if let Some(backup) = report.backup.as_ref() {
        lines.push(format!("previous version saved to {}", backup.display()));
    }
    for skipped in &report.skipped {
        lines.push(match skipped {
            Skipped::EmptyKeyPath { alias } => {
                format!("skipped '{alias}': empty ssh key path")
            }
            Skipped::MissingKey { alias, path } => {
                format!("skipped '{alias}': ssh key not found at {path}")
            }
            Skipped::InvalidUsername { alias, problem } => {
                format!("skipped '{alias}': username {problem}")
            }
            Skipped::InvalidKeyPath { alias, problem } => {
                format!("skipped '{alias}': ssh key path {problem}")
            }
        });
    }
    lines
}
