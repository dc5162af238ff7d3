use serde::Serialize;
use url::Url;

use crate::error::{AppError, AppResult};

/// `owner/repo` pair taken from a clone URL.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct RemoteRepo {
    pub owner: String,
    pub repo: String,
}

impl RemoteRepo {
    /// scp-style URL that goes through the per-account host alias.
    pub fn routed_url(&self, host_alias: &str) -> String {
        format!("git@{host_alias}:{}/{}.git", self.owner, self.repo)
    }
}

/// Accepts `git@<host>:owner/repo(.git)`, `ssh://git@<host>/owner/repo(.git)`
/// and `https://<host>/owner/repo(.git)`.
pub fn parse_remote(raw: &str, hostname: &str) -> AppResult<RemoteRepo> {
    let raw = raw.trim();

    if let Some(rest) = raw.strip_prefix("git@") {
        let path = rest
            .strip_prefix(hostname)
            .and_then(|rest| rest.strip_prefix(':'))
            .ok_or_else(|| unsupported(raw))?;
        return split_path(path.split('/'), raw);
    }

    let url = Url::parse(raw)?;
    let host_matches = url.host_str() == Some(hostname);
    let scheme_ok = match url.scheme() {
        "https" => true,
        "ssh" => url.username() == "git",
        _ => false,
    };
    if !host_matches || !scheme_ok {
        return Err(unsupported(raw));
    }

    let segments = url
        .path_segments()
        .ok_or_else(|| unsupported(raw))?
        .filter(|segment| !segment.is_empty());
    split_path(segments, raw)
}

fn split_path<'a>(segments: impl Iterator<Item = &'a str>, raw: &str) -> AppResult<RemoteRepo> {
    let parts: Vec<&str> = segments.collect();
    let [owner, repo] = parts[..] else {
        return Err(AppError::InvalidInput(format!(
            "expected owner/repo in repository url: {raw}"
        )));
    };

    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    if owner.is_empty() || repo.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "expected owner/repo in repository url: {raw}"
        )));
    }

    Ok(RemoteRepo {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}

fn unsupported(raw: &str) -> AppError {
    AppError::InvalidInput(format!("unsupported repository url: {raw}"))
}
