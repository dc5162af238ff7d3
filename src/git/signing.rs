use crate::error::{AppError, AppResult};

use super::runner::{CommandRunner, Invocation};

/// Looks up the long id of the secret signing key registered for `email`.
pub fn find_key_id(runner: &dyn CommandRunner, email: &str) -> AppResult<String> {
    let invocation = Invocation::new(
        "gpg",
        ["--list-secret-keys", "--keyid-format", "LONG", email],
    );
    let output = runner
        .run(&invocation)
        .map_err(|err| AppError::Git(format!("failed to list gpg keys: {err}")))?;
    if !output.success {
        return Err(AppError::Git(format!(
            "failed to list gpg keys: {}",
            output.stderr.trim()
        )));
    }

    parse_key_id(&output.stdout)
        .ok_or_else(|| AppError::Git(format!("no gpg key found for email: {email}")))
}

/// Key id from the first `sec   rsa4096/KEYID ...` line.
pub fn parse_key_id(listing: &str) -> Option<String> {
    listing
        .lines()
        .filter(|line| line.trim_start().starts_with("sec"))
        .find_map(|line| {
            let (_, rest) = line.split_once('/')?;
            let id = rest.split_whitespace().next()?;
            (!id.is_empty()).then(|| id.to_string())
        })
}
