// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::convert::TryFrom;
use std::env;

use clap::ArgMatches;
use tracing::{debug, error, info};

use blscan::app::cli_parser::create_parser;
use blscan::app::console::{Console, ConsoleOpts};
use blscan::app::logging::Logging;
use blscan::app::output::styles;
use blscan::app::{run, AppConfig, ExitStatus};

#[tokio::main]
async fn main() {
    let args = match create_parser().try_get_matches() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            // Help and version are no failures
            let exit_status = if err.use_stderr() {
                ExitStatus::CliParsingFailed
            } else {
                ExitStatus::Ok
            };
            std::process::exit(exit_status as i32);
        }
    };

    setup_terminal(&args);

    if let Err(err) = start_logging_for(&args) {
        eprintln!("Failed to initialize logging: {:#}", err);
        std::process::exit(ExitStatus::UnrecoverableError as i32);
    }
    debug!("Parsed args and set up logging.");

    let app_config = match AppConfig::try_from(&args) {
        Ok(config) => config,
        Err(err) => {
            error!("Failed to parse configuration: {:#}", err);
            Console::new(ConsoleOpts::default()).error(format!("Failed to parse configuration: {:#}", err));
            std::process::exit(ExitStatus::ConfigParsingFailed as i32);
        }
    };
    info!("Running with {:?}.", &app_config);

    let exit_status = match run::run(&app_config).await {
        Ok(exit_status) => exit_status,
        Err(err) => {
            error!("Failed: {:#}", err);
            Console::new(ConsoleOpts::default()).error(format!("Error: {:#}", err));
            ExitStatus::UnrecoverableError
        }
    };
    debug!("Exiting with {:?}.", exit_status);

    std::process::exit(exit_status as i32);
}

fn setup_terminal(args: &ArgMatches) {
    if args.get_flag("no-color") {
        styles::no_color_mode();
    }
    if args.get_flag("ascii") {
        styles::ascii_mode();
    }
}

fn start_logging_for(args: &ArgMatches) -> anyhow::Result<()> {
    let color = !args.get_flag("no-color");
    let debug = args.get_flag("debug");
    let logging = Logging::new(args.get_count("v"), env::var_os("RUST_LOG"), color, debug);
    logging.start()
}
