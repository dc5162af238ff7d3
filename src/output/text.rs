use std::io::{self, Write};

use crate::error::AppResult;

pub fn print_lines<S: AsRef<str>>(lines: &[S]) -> AppResult<()> {
    let mut stdout = io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{}", line.as_ref())?;
    }
    Ok(())
}
