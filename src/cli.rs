use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "gh-switcher",
    version,
    about = "Switch between GitHub accounts per repository",
    arg_required_else_help = true
)]
pub struct Cli {
    #[arg(long, global = true, help = "Profile store file [default: ~/.github-switcher.json]")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "SSH config file to manage [default: ~/.ssh/config]")]
    pub ssh_config: Option<PathBuf>,
    #[arg(long, global = true, help = "Emit JSON output")]
    pub json: bool,
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Verbose logging")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add an account and configure SSH for it
    Add(AddArgs),
    /// List configured accounts
    List,
    /// Remove an account and its SSH host entry
    Remove(AliasArgs),
    /// Apply an account to the repository in the current directory
    Switch(AliasArgs),
    /// Show the current repository's git identity
    Current,
    /// Clone a repository, routing through the owner's account when known
    Clone(CloneArgs),
    /// Rewrite the SSH config from the stored accounts
    Sync,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long, help = "Account alias (e.g. work, personal)")]
    pub alias: Option<String>,
    #[arg(long, help = "Username on the hosting service")]
    pub username: Option<String>,
    #[arg(long, help = "Name used for commits")]
    pub name: Option<String>,
    #[arg(long, help = "Email used for commits")]
    pub email: Option<String>,
    #[arg(long, help = "SSH private key path; relative paths resolve under ~/.ssh")]
    pub key: Option<String>,
    #[arg(long, help = "Generate the key without asking when it does not exist")]
    pub generate_key: bool,
}

#[derive(Debug, Args)]
pub struct AliasArgs {
    #[arg(help = "Account alias")]
    pub alias: String,
}

#[derive(Debug, Args)]
pub struct CloneArgs {
    #[arg(help = "Repository URL (ssh or https)")]
    pub url: String,
    #[arg(help = "Target directory")]
    pub dir: Option<PathBuf>,
}
