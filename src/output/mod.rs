pub mod json;
pub mod text;

use serde::Serialize;

use crate::error::AppResult;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(json: bool) -> Self {
        let mode = if json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };
        Self { mode }
    }

    /// Prints `text_lines` in text mode, or `json_value` with `--json`.
    pub fn emit<T, S>(&self, text_lines: &[S], json_value: &T) -> AppResult<()>
    where
        T: Serialize,
        S: AsRef<str>,
    {
        match self.mode {
            OutputMode::Text => text::print_lines(text_lines),
            OutputMode::Json => json::print(json_value),
        }
    }
}
