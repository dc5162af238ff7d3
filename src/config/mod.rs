pub mod paths;
pub mod profile;
pub mod service;
pub mod store;

pub use paths::AppPaths;
pub use profile::{Profile, ProfileSet, key_path_problem, resolve_alias, username_problem};
pub use service::{Service, ServiceSettings};
pub use store::Store;

use crate::error::AppResult;

pub fn load_store(paths: &AppPaths) -> AppResult<Store> {
    store::load(paths.store_file())
}

pub fn save_store(paths: &AppPaths, store: &Store) -> AppResult<()> {
    store::save(paths.store_file(), store)
}
