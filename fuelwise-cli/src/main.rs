//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use fuelwise_cli::CliError;

#[expect(clippy::print_stderr, reason = "the binary reports fatal errors")]
fn main() {
    match fuelwise_cli::run() {
        Ok(()) => {}
        // Clap renders help, version and usage errors with its own exit codes.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("fuelwise: {err}");
            std::process::exit(1);
        }
    }
}
