use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::cli::AddArgs;
use crate::config::{self, Profile, key_path_problem, resolve_alias, username_problem};
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::git::{CommandRunner, Invocation};
use crate::prompt;
use crate::routing::{BlockTemplate, ReconcileReport};

#[derive(Debug, Serialize)]
struct AddResult {
    alias: String,
    replaced: bool,
    profile: Profile,
    clone_hint: String,
    ssh_config: ReconcileReport,
}

pub fn run(ctx: &AppContext, args: AddArgs) -> AppResult<()> {
    let service = ctx.service();
    let AddArgs {
        alias,
        username,
        name,
        email,
        key,
        generate_key,
    } = args;

    let alias = resolve_alias(&prompt::value_or_prompt(
        alias,
        "alias",
        "Enter account alias (e.g., work, personal): ",
    )?)?;
    let username = prompt::value_or_prompt(
        username,
        "username",
        &format!("Enter {} username: ", service.label),
    )?;
    if let Some(problem) = username_problem(&username) {
        return Err(AppError::InvalidInput(format!(
            "username {username:?} {problem}"
        )));
    }
    let name = prompt::value_or_prompt(name, "name", "Enter your name: ")?;
    let email = prompt::value_or_prompt(email, "email", "Enter your email: ")?;

    let default_key = ctx.paths.default_key(&username);
    let raw_key = match key {
        Some(key) => key,
        None if prompt::is_interactive() => prompt::optional(&format!(
            "Enter SSH key path (default: {}): ",
            default_key.display()
        ))?,
        None => String::new(),
    };
    let key_path = if raw_key.trim().is_empty() {
        default_key
    } else {
        ctx.paths.resolve_key(&raw_key)
    };

    let key_reference = key_path.display().to_string();
    if let Some(problem) = key_path_problem(&key_reference) {
        return Err(AppError::InvalidInput(format!(
            "ssh key path {key_reference:?} {problem}"
        )));
    }

    if !key_path.exists() {
        let generate = generate_key
            || (prompt::is_interactive()
                && prompt::confirm(&format!(
                    "SSH key not found. Generate new key at {}? [Y/n]: ",
                    key_path.display()
                ))?);
        if generate {
            generate_ssh_key(&ctx.runner, &key_path, &email)?;
            eprintln!("SSH key generated. Add this public key to your account:");
            eprintln!("cat {}.pub", key_path.display());
        }
    }

    if !key_path.is_file() {
        return Err(AppError::InvalidInput(format!(
            "ssh key not found at {}. create it before adding the account",
            key_path.display()
        )));
    }

    let profile = Profile {
        display_name: name,
        email,
        username,
        key_reference,
    };

    let mut store = ctx.store.clone();
    let replaced = store
        .accounts
        .insert(alias.clone(), profile.clone())
        .is_some();
    config::save_store(&ctx.paths, &store)?;
    let report = ctx.sync_routing(&store.accounts)?;

    let clone_hint = clone_hint(&BlockTemplate::new(&service), &profile.username);
    let verb = if replaced { "updated" } else { "added" };
    let mut lines = vec![format!("account '{alias}' {verb}")];
    lines.extend(super::describe_report(&report));
    lines.push(String::new());
    lines.push("To clone repositories, use:".to_string());
    lines.push(clone_hint.clone());

    ctx.output.emit(
        &lines,
        &AddResult {
            alias,
            replaced,
            profile,
            clone_hint,
            ssh_config: report,
        },
    )
}

fn clone_hint(template: &BlockTemplate, username: &str) -> String {
    format!(
        "git clone git@{}:owner/repo.git",
        template.host_alias(username)
    )
}

/// Creates a passphrase-less RSA key at `key_path` through `ssh-keygen`.
fn generate_ssh_key(runner: &dyn CommandRunner, key_path: &Path, email: &str) -> AppResult<()> {
    if let Some(dir) = key_path.parent() {
        fs::create_dir_all(dir)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
        }
    }

    let key = key_path.display().to_string();
    let invocation = Invocation::new(
        "ssh-keygen",
        ["-t", "rsa", "-b", "4096", "-C", email, "-f", key.as_str(), "-N", ""],
    )
    .interactive();

    let output = runner.run(&invocation)?;
    if !output.success {
        return Err(AppError::Config(format!(
            "ssh-keygen failed to create {key}"
        )));
    }
    Ok(())
}
