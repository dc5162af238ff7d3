use clap::Parser;

fn main() {
    let cli = gh_switcher::cli::Cli::parse();

    if let Err(err) = gh_switcher::run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
