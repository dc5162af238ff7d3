use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

const STORE_FILE: &str = ".github-switcher.json";
const SSH_DIR: &str = ".ssh";
const SSH_CONFIG: &str = "config";

#[derive(Debug, Clone)]
pub struct AppPaths {
    home_dir: PathBuf,
    store_file: PathBuf,
    ssh_config: PathBuf,
}

impl AppPaths {
    pub fn discover(store_file: Option<PathBuf>, ssh_config: Option<PathBuf>) -> AppResult<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| AppError::Config("unable to resolve home directory".to_string()))?;
        Ok(Self::with_home(home_dir, store_file, ssh_config))
    }

    pub fn with_home(
        home_dir: PathBuf,
        store_file: Option<PathBuf>,
        ssh_config: Option<PathBuf>,
    ) -> Self {
        let store_file = store_file.unwrap_or_else(|| home_dir.join(STORE_FILE));
        let ssh_config = ssh_config.unwrap_or_else(|| home_dir.join(SSH_DIR).join(SSH_CONFIG));

        Self {
            home_dir,
            store_file,
            ssh_config,
        }
    }

    pub fn store_file(&self) -> &Path {
        &self.store_file
    }

    pub fn ssh_config(&self) -> &Path {
        &self.ssh_config
    }

    pub fn ssh_dir(&self) -> PathBuf {
        self.home_dir.join(SSH_DIR)
    }

    pub fn default_key(&self, username: &str) -> PathBuf {
        self.ssh_dir().join(format!("id_rsa_{username}"))
    }

    /// Relative key paths live under `~/.ssh`; `~/` expands to home.
    pub fn resolve_key(&self, raw: &str) -> PathBuf {
        let raw = raw.trim();
        if let Some(rest) = raw.strip_prefix("~/") {
            return self.home_dir.join(rest);
        }

        let path = Path::new(raw);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.ssh_dir().join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> AppPaths {
        AppPaths::with_home(PathBuf::from("/home/u"), None, None)
    }

    #[test]
    fn defaults_live_in_home() {
        let paths = paths();
        assert_eq!(paths.store_file(), Path::new("/home/u/.github-switcher.json"));
        assert_eq!(paths.ssh_config(), Path::new("/home/u/.ssh/config"));
        assert_eq!(
            paths.default_key("alice"),
            PathBuf::from("/home/u/.ssh/id_rsa_alice")
        );
    }

    #[test]
    fn resolves_key_paths() {
        let paths = paths();
        assert_eq!(paths.resolve_key("id_work"), PathBuf::from("/home/u/.ssh/id_work"));
        assert_eq!(paths.resolve_key("~/keys/k"), PathBuf::from("/home/u/keys/k"));
        assert_eq!(paths.resolve_key("/abs/k"), PathBuf::from("/abs/k"));
    }

    #[test]
    fn overrides_win() {
        let paths = AppPaths::with_home(
            PathBuf::from("/home/u"),
            Some(PathBuf::from("/tmp/store.json")),
            Some(PathBuf::from("/tmp/ssh_config")),
        );
        assert_eq!(paths.store_file(), Path::new("/tmp/store.json"));
        assert_eq!(paths.ssh_config(), Path::new("/tmp/ssh_config"));
    }
}
