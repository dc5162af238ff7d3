use serde::Serialize;

use crate::cli::AliasArgs;
use crate::config;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::routing::ReconcileReport;

#[derive(Debug, Serialize)]
struct RemoveResult {
    alias: String,
    ssh_config: ReconcileReport,
}

pub fn run(ctx: &AppContext, args: AliasArgs) -> AppResult<()> {
    let alias = config::resolve_alias(&args.alias)?;

    let mut store = ctx.store.clone();
    if store.accounts.remove(&alias).is_none() {
        return Err(AppError::InvalidInput(format!("account '{alias}' not found")));
    }
    config::save_store(&ctx.paths, &store)?;
    let report = ctx.sync_routing(&store.accounts)?;

    let mut lines = vec![format!("account '{alias}' removed")];
    lines.extend(super::describe_report(&report));
    ctx.output.emit(
        &lines,
        &RemoveResult {
            alias,
            ssh_config: report,
        },
    )
}
