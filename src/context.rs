use std::path::PathBuf;

use crate::config::{self, AppPaths, ProfileSet, Service, Store};
use crate::error::AppResult;
use crate::git::SystemRunner;
use crate::output::Output;
use crate::routing::{ReconcileReport, Reconciler};

#[derive(Debug)]
pub struct AppContext {
    pub verbose: u8,
    pub paths: AppPaths,
    pub store: Store,
    pub runner: SystemRunner,
    pub output: Output,
}

impl AppContext {
    pub fn bootstrap(
        config: Option<PathBuf>,
        ssh_config: Option<PathBuf>,
        json: bool,
        verbose: u8,
    ) -> AppResult<Self> {
        let paths = AppPaths::discover(config, ssh_config)?;
        Self::from_paths(paths, json, verbose)
    }

    pub fn from_paths(paths: AppPaths, json: bool, verbose: u8) -> AppResult<Self> {
        let store = config::load_store(&paths)?;
        let output = Output::new(json);

        tracing::debug!(
            store = %paths.store_file().display(),
            ssh_config = %paths.ssh_config().display(),
            profiles = store.accounts.len(),
            "context ready"
        );

        Ok(Self {
            verbose,
            paths,
            store,
            runner: SystemRunner,
            output,
        })
    }

    pub fn service(&self) -> Service {
        self.store.service.resolve()
    }

    /// Brings the ssh config in line with `profiles`.
    pub fn sync_routing(&self, profiles: &ProfileSet) -> AppResult<ReconcileReport> {
        let reconciler = Reconciler::new(&self.service());
        Ok(reconciler.reconcile(profiles, self.paths.ssh_config())?)
    }
}
