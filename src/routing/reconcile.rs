use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::config::{Profile, ProfileSet, Service, key_path_problem, username_problem};

use super::block::BlockTemplate;
use super::scan;

const TEMP_PREFIX: &str = ".gh-switcher-";
const TEMP_SUFFIX: &str = ".tmp";

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("failed to read {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write backup {}: {source}", .path.display())]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write temporary file in {}: {source}", .path.display())]
    TempWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to replace {}: {source}", .path.display())]
    RenameFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A profile that produced no managed block.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Skipped {
    EmptyKeyPath { alias: String },
    MissingKey { alias: String, path: String },
    InvalidUsername { alias: String, problem: &'static str },
    InvalidKeyPath { alias: String, problem: &'static str },
}

/// New file content plus what went into it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Rendered {
    pub content: Vec<u8>,
    pub included: Vec<String>,
    pub skipped: Vec<Skipped>,
    pub removed_blocks: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    pub path: PathBuf,
    pub backup: Option<PathBuf>,
    pub included: Vec<String>,
    pub skipped: Vec<Skipped>,
    pub removed_blocks: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    template: BlockTemplate,
}

impl Reconciler {
    pub fn new(service: &Service) -> Self {
        Self {
            template: BlockTemplate::new(service),
        }
    }

    /// Rewrites the managed blocks of `path` so they match `profiles`.
    ///
    /// The prior content is copied to `<path>.bak` first, and the new content
    /// replaces `path` through a rename from a sibling temporary file. On any
    /// error the target is left untouched.
    pub fn reconcile(
        &self,
        profiles: &ProfileSet,
        path: &Path,
    ) -> Result<ReconcileReport, ReconcileError> {
        self.reconcile_with(profiles, path, persist)
    }

    fn reconcile_with<F>(
        &self,
        profiles: &ProfileSet,
        path: &Path,
        commit: F,
    ) -> Result<ReconcileReport, ReconcileError>
    where
        F: FnOnce(NamedTempFile, &Path) -> io::Result<()>,
    {
        let existing = read_existing(path)?;
        let rendered = self.render(existing.as_deref().unwrap_or_default(), profiles);

        let backup = match existing.as_deref() {
            Some(original) if !original.is_empty() => Some(write_backup(path, original)?),
            _ => None,
        };

        let temp = write_temp(path, &rendered.content)?;
        commit(temp, path).map_err(|source| ReconcileError::RenameFailed {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(
            path = %path.display(),
            included = rendered.included.len(),
            skipped = rendered.skipped.len(),
            removed = rendered.removed_blocks,
            "routing file reconciled"
        );

        Ok(ReconcileReport {
            path: path.to_path_buf(),
            backup,
            included: rendered.included,
            skipped: rendered.skipped,
            removed_blocks: rendered.removed_blocks,
        })
    }

    /// Pure part of reconciliation: existing content in, new content out.
    pub fn render(&self, existing: &[u8], profiles: &ProfileSet) -> Rendered {
        let scan = scan::extract_foreign(existing, &self.template);
        if scan.ended_inside {
            tracing::debug!("routing file ended inside a managed block");
        }

        let mut content = pad_foreign(scan.foreign);
        let mut included = Vec::new();
        let mut skipped = Vec::new();

        for (alias, profile) in profiles {
            if let Some(reason) = skip_reason(alias, profile) {
                tracing::warn!(%alias, ?reason, "skipping routing block");
                skipped.push(reason);
                continue;
            }

            let block = self
                .template
                .render(&profile.username, &profile.key_reference);
            content.extend_from_slice(block.as_bytes());
            included.push(alias.clone());
        }

        Rendered {
            content,
            included,
            skipped,
            removed_blocks: scan.removed_blocks,
        }
    }
}

/// Profiles that cannot produce a well-formed block. Values with line breaks
/// would split the block and keep re-entering the file as foreign lines.
fn skip_reason(alias: &str, profile: &Profile) -> Option<Skipped> {
    let alias = alias.to_string();
    if let Some(problem) = username_problem(&profile.username) {
        return Some(Skipped::InvalidUsername { alias, problem });
    }

    let key = profile.key_reference.as_str();
    if key.trim().is_empty() {
        return Some(Skipped::EmptyKeyPath { alias });
    }
    if let Some(problem) = key_path_problem(key) {
        return Some(Skipped::InvalidKeyPath { alias, problem });
    }
    if !Path::new(key).is_file() {
        return Some(Skipped::MissingKey {
            alias,
            path: key.to_string(),
        });
    }
    None
}

/// Reconciles `path` against `profiles` using the default service.
pub fn reconcile(profiles: &ProfileSet, path: &Path) -> Result<ReconcileReport, ReconcileError> {
    Reconciler::default().reconcile(profiles, path)
}

pub fn backup_path(path: &Path) -> PathBuf {
    let mut raw = OsString::from(path.as_os_str());
    raw.push(".bak");
    PathBuf::from(raw)
}

fn read_existing(path: &Path) -> Result<Option<Vec<u8>>, ReconcileError> {
    match fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ReconcileError::ReadFailed {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn pad_foreign(mut foreign: Vec<u8>) -> Vec<u8> {
    if foreign.is_empty() {
        return foreign;
    }
    if !foreign.ends_with(b"\n") {
        foreign.push(b'\n');
    }
    if !foreign.ends_with(b"\n\n") {
        foreign.push(b'\n');
    }
    foreign
}

fn write_backup(path: &Path, original: &[u8]) -> Result<PathBuf, ReconcileError> {
    let backup = backup_path(path);
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;

        options.mode(0o600);
    }

    // `mode` only applies on creation, so a pre-existing backup is narrowed after.
    let result = options
        .open(&backup)
        .and_then(|mut file| file.write_all(original))
        .and_then(|()| restrict_permissions(&backup));
    result.map_err(|source| ReconcileError::BackupFailed {
        path: backup.clone(),
        source,
    })?;
    Ok(backup)
}

fn write_temp(path: &Path, content: &[u8]) -> Result<NamedTempFile, ReconcileError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let fail = |source| ReconcileError::TempWriteFailed {
        path: dir.to_path_buf(),
        source,
    };

    fs::create_dir_all(dir).map_err(fail)?;
    let mut temp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
        .map_err(fail)?;
    temp.write_all(content).map_err(fail)?;
    temp.as_file().sync_all().map_err(fail)?;
    Ok(temp)
}

fn persist(temp: NamedTempFile, target: &Path) -> io::Result<()> {
    temp.persist(target).map(drop).map_err(|err| err.error)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o600);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
