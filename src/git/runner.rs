use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// One external program call.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    /// Child shares the terminal instead of having its output captured.
    pub inherit_stdio: bool,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
            inherit_stdio: false,
        }
    }

    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    pub fn interactive(mut self) -> Self {
        self.inherit_stdio = true;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: &str) -> Self {
        Self {
            success: true,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn failed(stderr: &str) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

/// Narrow seam over process spawning so callers can be tested without a shell.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        tracing::debug!(command = %invocation, cwd = ?invocation.cwd, "running");

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(cwd) = invocation.cwd.as_ref() {
            command.current_dir(cwd);
        }

        if invocation.inherit_stdio {
            let status = command
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()?;
            return Ok(CommandOutput {
                success: status.success(),
                ..CommandOutput::default()
            });
        }

        let output = command.stdin(Stdio::null()).output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_command_line() {
        let invocation = Invocation::new("git", ["config", "user.name", "Alice"]);
        assert_eq!(invocation.to_string(), "git config user.name Alice");
        assert!(!invocation.inherit_stdio);
    }

    #[test]
    fn builder_sets_dir_and_stdio() {
        let invocation = Invocation::new("git", ["clone", "x"])
            .in_dir(Path::new("/tmp"))
            .interactive();
        assert_eq!(invocation.cwd.as_deref(), Some(Path::new("/tmp")));
        assert!(invocation.inherit_stdio);
    }
}
