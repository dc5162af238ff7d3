use serde::Serialize;

use crate::config::Profile;
use crate::context::AppContext;
use crate::error::AppResult;

#[derive(Debug, Serialize)]
struct ListedProfile<'a> {
    alias: &'a str,
    #[serde(flatten)]
    profile: &'a Profile,
}

pub fn run(ctx: &AppContext) -> AppResult<()> {
    let accounts = &ctx.store.accounts;
    let label = ctx.service().label;

    let mut lines = vec![format!("Available {label} accounts:")];
    if accounts.is_empty() {
        lines.push("  No accounts configured yet.".to_string());
    }
    lines.extend(
        accounts
            .iter()
            .map(|(alias, profile)| format_row(alias, profile)),
    );

    let listed: Vec<ListedProfile<'_>> = accounts
        .iter()
        .map(|(alias, profile)| ListedProfile { alias, profile })
        .collect();
    ctx.output.emit(&lines, &listed)
}

fn format_row(alias: &str, profile: &Profile) -> String {
    format!(
        " {alias:<15} ({}, {})",
        profile.display_name, profile.email
    )
}
