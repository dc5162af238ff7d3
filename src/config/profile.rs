use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Profiles keyed by alias. Iteration is alias-ascending.
pub type ProfileSet = BTreeMap<String, Profile>;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "name")]
    pub display_name: String,
    pub email: String,
    pub username: String,
    #[serde(rename = "ssh_key_path")]
    pub key_reference: String,
}

pub fn resolve_alias(requested: &str) -> AppResult<String> {
    let trimmed = requested.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput("alias must not be empty".to_string()));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(AppError::InvalidInput(format!(
            "alias `{trimmed}` must not contain whitespace"
        )));
    }

    Ok(trimmed.to_string())
}

/// Why `username` cannot be embedded in an ssh host alias, if it cannot.
pub fn username_problem(username: &str) -> Option<&'static str> {
    if username.is_empty() {
        Some("is empty")
    } else if username.chars().any(char::is_control) {
        Some("contains control characters")
    } else if username.chars().any(char::is_whitespace) {
        Some("contains whitespace")
    } else {
        None
    }
}

/// Why `key` cannot be written on an `IdentityFile` line, if it cannot.
pub fn key_path_problem(key: &str) -> Option<&'static str> {
    key.chars()
        .any(char::is_control)
        .then_some("contains control characters")
}

/// First profile, in alias order, whose username matches `username`.
pub fn find_by_username<'a>(
    profiles: &'a ProfileSet,
    username: &str,
) -> Option<(&'a String, &'a Profile)> {
    profiles
        .iter()
        .find(|(_, profile)| profile.username == username)
}

pub fn find_by_email<'a>(profiles: &'a ProfileSet, email: &str) -> Option<(&'a String, &'a Profile)> {
    profiles
        .iter()
        .find(|(_, profile)| profile.email.eq_ignore_ascii_case(email))
}
