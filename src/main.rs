//! xcstrings-tool CLI entry point.

use clap::Parser;
use xcstrings_tool::cli::{self, Cli, Commands, EXIT_ERROR};

fn main() {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Audit(args) => cli::run_audit(args),
        Commands::Validate(args) => cli::run_validate(args),
        Commands::Export(args) => cli::run_export(args),
        Commands::Stats(args) => cli::run_stats(args),
        Commands::Init(args) => cli::run_init(args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
