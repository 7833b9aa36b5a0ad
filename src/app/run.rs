// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::app::console::{Console, ConsoleOpts};
use crate::app::output;
use crate::app::resolver::{scan_opts, AppResolver};
use crate::app::{AppConfig, ExitStatus};
use crate::registry::Registry;
use crate::resolver::IpLookup;
use crate::scan::Scanner;
use crate::target::Target;

pub async fn run(app_config: &AppConfig) -> Result<ExitStatus> {
    let console = Console::new(ConsoleOpts::from(app_config));
    let registry = load_registry(app_config).await?;

    if app_config.list_registry {
        console.print_registry(&registry);
        return Ok(ExitStatus::Ok);
    }

    let app_resolver = AppResolver::create_resolver(app_config)?;
    let scan_opts = scan_opts(app_config);
    console.print_opts(&app_resolver.name(), app_resolver.resolver_opts(), &scan_opts);

    let session = Session {
        app_config,
        console,
        resolver: app_resolver.resolver(),
        scanner: Scanner::new(app_resolver.resolver(), scan_opts),
        registry,
    };

    if app_config.is_interactive() {
        session.interactive().await
    } else {
        session.one_shot().await
    }
}

async fn load_registry(app_config: &AppConfig) -> Result<Registry> {
    let registry = match app_config.registry_path {
        Some(ref path) => Registry::from_file(path)
            .await
            .with_context(|| format!("Failed to load registry from '{}'", path))?,
        None => Registry::builtin(),
    };
    info!("Loaded {} DNSBLs.", registry.len());

    Ok(registry)
}

struct Session<'a> {
    app_config: &'a AppConfig,
    console: Console,
    resolver: Arc<dyn IpLookup>,
    scanner: Scanner,
    registry: Registry,
}

impl Session<'_> {
    async fn one_shot(&self) -> Result<ExitStatus> {
        let mut exit_status = ExitStatus::Ok;
        for input in &self.app_config.targets {
            let status = self.scan(input).await?;
            exit_status = exit_status.max(status);
        }
        self.console.print_finished();

        Ok(exit_status)
    }

    /// Reads targets from stdin until `exit` or EOF.
    ///
    /// Failures of single scans are reported and don't end the loop.
    async fn interactive(&self) -> Result<ExitStatus> {
        info!("Starting interactive mode.");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            self.console
                .prompt("Enter IP address or host name ('exit' to quit):")
                .context("Failed to print prompt")?;
            let line = match lines.next_line().await.context("Failed to read from stdin")? {
                Some(line) => line,
                None => break,
            };
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if input == "exit" {
                break;
            }
            let status = self.scan(input).await?;
            debug!("Scan of '{}' finished with {:?}.", input, status);
        }
        self.console.print_finished();

        Ok(ExitStatus::Ok)
    }

    async fn scan(&self, input: &str) -> Result<ExitStatus> {
        let target = match Target::resolve(input, self.resolver.as_ref()).await {
            Ok(target) => target,
            Err(err) => {
                self.console.error(err.to_string());
                return Ok(ExitStatus::Failed);
            }
        };

        self.console.print_estimates(&target, &self.registry);
        let result = self.scanner.scan(&target, &self.registry).await;
        self.console.print_statistics(&result);

        output::output(&self.app_config.output_config, &result)?;

        self.console.print_verdict(&target, result.listed().count());
        self.console.print_error_counts(&result);

        if self.app_config.fail_on_listed && result.is_listed() {
            Ok(ExitStatus::CheckFailed)
        } else {
            Ok(ExitStatus::Ok)
        }
    }
}
