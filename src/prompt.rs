use std::io::{self, IsTerminal, Write};

use crate::error::{AppError, AppResult};

pub fn is_interactive() -> bool {
    io::stdin().is_terminal()
}

/// Uses `provided` when present, otherwise asks until a value is given.
pub fn value_or_prompt(provided: Option<String>, flag: &str, prompt: &str) -> AppResult<String> {
    if let Some(value) = provided
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    {
        return Ok(value);
    }

    if !is_interactive() {
        return Err(AppError::InvalidInput(format!(
            "missing --{flag}. pass it explicitly or run in an interactive terminal"
        )));
    }
    required(prompt)
}

pub fn required(prompt: &str) -> AppResult<String> {
    loop {
        let value = line(prompt)?;
        if !value.is_empty() {
            return Ok(value);
        }
        eprintln!("value is required");
    }
}

pub fn optional(prompt: &str) -> AppResult<String> {
    line(prompt)
}

/// `[Y/n]` question; an empty answer counts as yes.
pub fn confirm(prompt: &str) -> AppResult<bool> {
    Ok(is_yes(&line(prompt)?))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "" | "y" | "yes")
}

fn line(prompt: &str) -> AppResult<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;

    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_answer_means_yes() {
        assert!(is_yes(""));
        assert!(is_yes("Y"));
        assert!(is_yes("yes"));
        assert!(!is_yes("n"));
        assert!(!is_yes("nope"));
    }

    #[test]
    fn provided_value_skips_prompt() {
        let value = value_or_prompt(Some("  work ".to_string()), "alias", "alias: ")
            .expect("provided value");
        assert_eq!(value, "work");
    }
}
