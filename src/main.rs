use std::process::ExitCode;

fn main() -> ExitCode {
    valexport::cli::run()
}
