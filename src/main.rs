use clap::Parser;
use std::io;
use std::process::ExitCode;
use topsort_runner::arguments::Arguments;
use topsort_runner::logger::{LogLevel, Logger};
use topsort_runner::session::Session;

fn main() -> ExitCode {
    let arguments = Arguments::parse();

    let level = if arguments.debug {
        LogLevel::DEBUG
    } else {
        LogLevel::INFO
    };
    let action_logger = Logger::new(arguments.action_logfile(), level);
    action_logger.debug(&format!("{:?}", arguments));

    let session = Session::new(arguments, action_logger);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    match session.run(stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
