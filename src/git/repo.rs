use std::path::Path;

use serde::Serialize;

use crate::config::Profile;
use crate::error::{AppError, AppResult};

use super::runner::{CommandRunner, Invocation};
use super::signing;

#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub signing_key: Option<String>,
}

/// What applying a profile to a repository did.
#[derive(Debug, Clone, Serialize)]
pub struct SwitchOutcome {
    pub alias: String,
    pub name: String,
    pub email: String,
    pub signing_key: Option<String>,
    pub signing_warning: Option<String>,
}

pub fn ensure_repository(dir: &Path) -> AppResult<()> {
    // `.git` is a directory in plain clones and a file in worktrees.
    if !dir.join(".git").exists() {
        return Err(AppError::Git(format!(
            "{} is not a git repository",
            dir.display()
        )));
    }
    Ok(())
}

pub fn set_config(runner: &dyn CommandRunner, dir: &Path, key: &str, value: &str) -> AppResult<()> {
    let output = runner.run(&Invocation::new("git", ["config", key, value]).in_dir(dir))?;
    if !output.success {
        return Err(AppError::Git(format!(
            "failed to set git {key}: {}",
            output.stderr.trim()
        )));
    }
    Ok(())
}

/// Effective value of `key`, or `None` when git reports it unset.
pub fn get_config(runner: &dyn CommandRunner, dir: &Path, key: &str) -> AppResult<Option<String>> {
    let output = runner.run(&Invocation::new("git", ["config", key]).in_dir(dir))?;
    if !output.success {
        return Ok(None);
    }

    let value = output.stdout.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

/// Points the repository at `dir` to `profile`'s identity.
///
/// Name and email must succeed. Signing setup is best effort: a missing gpg
/// key only produces a warning.
pub fn apply_profile(
    runner: &dyn CommandRunner,
    dir: &Path,
    alias: &str,
    profile: &Profile,
) -> AppResult<SwitchOutcome> {
    ensure_repository(dir)?;
    set_config(runner, dir, "user.name", &profile.display_name)?;
    set_config(runner, dir, "user.email", &profile.email)?;

    let mut outcome = SwitchOutcome {
        alias: alias.to_string(),
        name: profile.display_name.clone(),
        email: profile.email.clone(),
        signing_key: None,
        signing_warning: None,
    };

    let signing = signing::find_key_id(runner, &profile.email).and_then(|key_id| {
        set_config(runner, dir, "user.signingkey", &key_id)?;
        set_config(runner, dir, "commit.gpgsign", "true")?;
        Ok(key_id)
    });

    match signing {
        Ok(key_id) => outcome.signing_key = Some(key_id),
        Err(err) => {
            tracing::warn!(%alias, error = %err, "commit signing not configured");
            outcome.signing_warning = Some(err.to_string());
        }
    }

    Ok(outcome)
}

pub fn read_identity(runner: &dyn CommandRunner, dir: &Path) -> AppResult<Identity> {
    ensure_repository(dir)?;
    let name = get_config(runner, dir, "user.name")?
        .ok_or_else(|| AppError::Git("user.name is not set".to_string()))?;
    let email = get_config(runner, dir, "user.email")?
        .ok_or_else(|| AppError::Git("user.email is not set".to_string()))?;
    let signing_key = get_config(runner, dir, "user.signingkey")?;

    Ok(Identity {
        name,
        email,
        signing_key,
    })
}
