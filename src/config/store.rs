use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppResult;

use super::profile::ProfileSet;
use super::service::ServiceSettings;

/// On-disk profile file: `{"accounts": {alias: {...}}, "service": {...}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    pub accounts: ProfileSet,
    #[serde(default, skip_serializing_if = "ServiceSettings::is_empty")]
    pub service: ServiceSettings,
}

pub fn load(path: &Path) -> AppResult<Store> {
    if !path.exists() {
        return Ok(Store::default());
    }

    let raw = fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(Store::default());
    }
    let store = serde_json::from_str(&raw)?;
    Ok(store)
}

pub fn save(path: &Path, store: &Store) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let payload = serde_json::to_string_pretty(store)?;
    fs::write(path, payload)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }

    tracing::debug!(path = %path.display(), profiles = store.accounts.len(), "profile store saved");
    Ok(())
}
