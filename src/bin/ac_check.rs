//! `ac-check` binary entry point. Thin shim: response-file expansion,
//! argument parsing, logging init, and exit-code mapping live here; all
//! domain logic is in `autocheck::cli::check::run`.

use ac_utils::exit_codes::ExitCode;
use ac_utils::logging::{self, Verbosity};
use autocheck::cli::args::{expand_response_file, CheckArgs};
use clap::Parser;

fn main() {
    logging::init(Verbosity::from_env());

    let raw_args: Vec<String> = std::env::args().skip(1).collect();
    let expanded = match expand_response_file(raw_args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("ac-check: could not read response file: {e}");
            std::process::exit(ExitCode::STRUCTURAL.as_i32());
        }
    };

    let args = CheckArgs::parse_from(std::iter::once("ac-check".to_string()).chain(expanded));

    if let Err(err) = autocheck::cli::check::run(&args) {
        eprintln!("ac-check: {err}");
        std::process::exit(ExitCode::from(&err).as_i32());
    }
}
