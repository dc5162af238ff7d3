use std::env;

use serde::Serialize;

use crate::config::profile;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::git::{self, Identity};

#[derive(Debug, Serialize)]
struct CurrentIdentity {
    #[serde(flatten)]
    identity: Identity,
    alias: Option<String>,
}

pub fn run(ctx: &AppContext) -> AppResult<()> {
    let cwd = env::current_dir()?;
    let identity = git::read_identity(&ctx.runner, &cwd)?;
    let alias = profile::find_by_email(&ctx.store.accounts, &identity.email)
        .map(|(alias, _)| alias.clone());

    let current = CurrentIdentity { identity, alias };
    ctx.output.emit(&describe(&current), &current)
}

fn describe(current: &CurrentIdentity) -> Vec<String> {
    let mut lines = vec![
        "Current repository configuration:".to_string(),
        format!("Name:  {}", current.identity.name),
        format!("Email: {}", current.identity.email),
    ];
    if let Some(key) = current.identity.signing_key.as_ref() {
        lines.push(format!("GPG:   {key}"));
    }
    if let Some(alias) = current.alias.as_ref() {
        lines.push(format!("Account: {alias}"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_identity_with_optional_fields() {
        let current = CurrentIdentity {
            identity: Identity {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                signing_key: Some("ABC".to_string()),
            },
            alias: None,
        };
        assert_eq!(
            describe(&current),
            [
                "Current repository configuration:",
                "Name:  Alice",
                "Email: alice@example.com",
                "GPG:   ABC",
            ]
        );
    }
}
