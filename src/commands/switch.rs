use std::env;

use crate::cli::AliasArgs;
use crate::config;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::git;

pub fn run(ctx: &AppContext, args: AliasArgs) -> AppResult<()> {
    let alias = config::resolve_alias(&args.alias)?;
    let profile = ctx
        .store
        .accounts
        .get(&alias)
        .ok_or_else(|| AppError::InvalidInput(format!("account '{alias}' not found")))?;

    let cwd = env::current_dir()?;
    let outcome = git::apply_profile(&ctx.runner, &cwd, &alias, profile)?;

    let mut lines = Vec::new();
    match (&outcome.signing_key, &outcome.signing_warning) {
        (Some(key_id), _) => lines.push(format!(
            "Configured GPG key {key_id} for email {}",
            outcome.email
        )),
        (None, Some(_)) => lines.push("You may need to set up GPG keys manually.".to_string()),
        (None, None) => {}
    }
    lines.push(format!(
        "Switched to {} account: {alias} ({}, {}) for current repository",
        ctx.service().label,
        outcome.name,
        outcome.email
    ));

    ctx.output.emit(&lines, &outcome)
}
