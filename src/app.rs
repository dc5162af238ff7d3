use crate::cli::{Cli, Command};
use crate::commands;
use crate::context::AppContext;
use crate::error::AppResult;

pub fn run(cli: Cli) -> AppResult<()> {
    let Cli {
        config,
        ssh_config,
        json,
        verbose,
        command,
    } = cli;

    let ctx = AppContext::bootstrap(config, ssh_config, json, verbose)?;

    match command {
        Command::Add(args) => commands::add::run(&ctx, args),
        Command::List => commands::list::run(&ctx),
        Command::Remove(args) => commands::remove::run(&ctx, args),
        Command::Switch(args) => commands::switch::run(&ctx, args),
        Command::Current => commands::current::run(&ctx),
        Command::Clone(args) => commands::clone::run(&ctx, args),
        Command::Sync => commands::sync::run(&ctx),
    }
}
