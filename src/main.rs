use std::process;

use archscore::cli::{exit_code, report_error, Args, Command};

fn main() {
    let args = Args::parse_args();
    let command = Command::from_args(args);

    let result = command.execute();
    if let Err(err) = &result {
        report_error(err);
    }

    process::exit(exit_code(&result));
}
