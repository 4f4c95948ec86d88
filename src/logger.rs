use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    DEBUG,
    INFO,
    WARNING,
    ERROR,
}

/// Appends timestamped action lines to a log file.
///
/// Messages below `level` are dropped. Failing to write the log never stops a run.
pub struct Logger {
    log_file: String,
    level: LogLevel,
}

impl Logger {
    pub fn new(log_file: String, level: LogLevel) -> Self {
        Self { log_file, level }
    }

    pub fn enabled(&self, level: &LogLevel) -> bool {
        *level >= self.level
    }

    pub fn log(&self, level: &LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }

        let now: DateTime<Local> = Local::now();
        let formatted_time = now.format("%Y-%m-%d %H:%M:%S").to_string();
        let log_message = format!("{:?} {:?} {}", formatted_time, level, message);

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.log_file);

        match file {
            Ok(mut file) => {
                if let Err(e) = writeln!(file, "{}", log_message) {
                    eprintln!("Couldn't write to {}: {}", self.log_file, e);
                }
            }
            Err(e) => eprintln!("Couldn't open {}: {}", self.log_file, e),
        }
    }

    pub fn info(&self, message: &str) {
        self.log(&LogLevel::INFO, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(&LogLevel::DEBUG, message);
    }

    pub fn warning(&self, message: &str) {
        self.log(&LogLevel::WARNING, message);
    }

    pub fn error(&self, message: &str) {
        self.log(&LogLevel::ERROR, message);
    }
}
