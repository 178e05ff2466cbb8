use std::process::ExitCode;

use crate::cli::run;

pub mod catalog;
pub mod cli;
mod config;
pub mod domain;
pub mod error;
pub mod storage;

fn main() -> ExitCode {
    run()
}
