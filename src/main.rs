//! Entry point for the dfind CLI.

use clap::Parser;
use dfind::{cli::Cli, error::ExitCode, logging};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    match dfind::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            eprintln!("error - {err}");
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    }
}
