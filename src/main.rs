use clap::Parser;
use key_stretcher::cli::{init_logging, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match &cli.command {
        Some(Commands::Completions { shell }) => {
            key_stretcher::cli::commands::completions::execute(*shell)
        }
        None => key_stretcher::cli::commands::derive::execute(&cli),
    };

    if let Err(e) = result {
        key_stretcher::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
