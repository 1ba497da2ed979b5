//! repowiz binary entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    match repowiz::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            repowiz::ui::output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
