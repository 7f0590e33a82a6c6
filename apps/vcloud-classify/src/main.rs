use vcloud_classify::cli::Cli;
use vcloud_classify::exchange::run;
use vcloud_classify::logger::{QUIET_LEVEL, initialize as LoggerInitialize};

use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, error};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_dir = cli.log_dir.clone().unwrap_or_else(std::env::temp_dir);
    let console_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        QUIET_LEVEL
    };
    let logger_ready = match LoggerInitialize(&log_dir, console_level) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("{e}");
            false
        }
    };

    let rendered = run(&cli).and_then(|report| Ok(report.to_json(cli.pretty)?));

    match rendered {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            if logger_ready {
                error!("{e}");
            } else {
                eprintln!("{e}");
            }
            ExitCode::FAILURE
        }
    }
}
