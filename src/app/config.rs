// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::convert::TryFrom;
use std::net::IpAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::app::output::json::JsonOptions;
use crate::app::output::summary::SummaryOptions;
use crate::app::output::{OutputConfig, OutputType};

#[derive(Debug)]
pub struct AppConfig {
    /// Targets to scan; empty means interactive mode
    pub targets: Vec<String>,
    pub timeout: Duration,
    pub retries: usize,
    pub max_concurrent: Option<usize>,
    /// Replace the system nameservers if not empty
    pub nameservers: Vec<IpAddr>,
    pub use_system_resolv_opt: bool,
    /// Alternative resolv.conf; also the source of nameservers unless `nameservers` is set
    pub resolv_conf_path: Option<String>,
    pub registry_path: Option<String>,
    pub list_registry: bool,
    pub show_errors: bool,
    pub fail_on_listed: bool,
    pub quiet: bool,
    pub no_color: bool,
    pub ascii_only: bool,
    pub output: OutputType,
    pub output_config: OutputConfig,
}

pub const DEFAULT_RESOLV_CONF_PATH: &str = "/etc/resolv.conf";

impl AppConfig {
    pub fn is_interactive(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn resolv_conf_path(&self) -> &str {
        self.resolv_conf_path.as_deref().unwrap_or(DEFAULT_RESOLV_CONF_PATH)
    }
}

impl TryFrom<&ArgMatches> for AppConfig {
    type Error = anyhow::Error;

    fn try_from(args: &ArgMatches) -> std::result::Result<Self, Self::Error> {
        let output = args
            .get_one::<String>("output")
            .map(|x| OutputType::try_from(x.as_str()).context("failed to parse output type"))
            .transpose()?
            .unwrap_or(OutputType::Summary);
        let config = AppConfig {
            targets: args
                .get_many::<String>("targets")
                .map(|xs| xs.cloned().collect())
                .unwrap_or_default(),
            timeout: args
                .get_one::<Duration>("timeout")
                .copied()
                .context("no timeout specified")?,
            retries: args
                .get_one::<usize>("retries")
                .copied()
                .context("no retries specified")?,
            max_concurrent: args.get_one::<usize>("max-concurrent").copied(),
            nameservers: args
                .get_many::<IpAddr>("nameservers")
                .map(|xs| xs.copied().collect())
                .unwrap_or_default(),
            use_system_resolv_opt: !args.get_flag("no-system-resolv-opt"),
            resolv_conf_path: args.get_one::<String>("resolv-conf").cloned(),
            registry_path: args.get_one::<String>("registry").cloned(),
            list_registry: args.get_flag("list-registry"),
            show_errors: args.get_flag("show-errors"),
            fail_on_listed: args.get_flag("fail-on-listed"),
            quiet: args.get_flag("quiet"),
            no_color: args.get_flag("no-color"),
            ascii_only: args.get_flag("ascii"),
            output_config: output_config(output, args)?,
            output,
        };

        if config.max_concurrent == Some(0) {
            return Err(anyhow::anyhow!("max-concurrent must be at least 1"));
        }

        Ok(config)
    }
}

fn output_config(output_type: OutputType, args: &ArgMatches) -> Result<OutputConfig> {
    let options: Vec<&str> = args
        .get_many::<String>("output-options")
        .map(|xs| xs.map(String::as_str).collect())
        .unwrap_or_default();
    parse_output_options(output_type, options)
}

fn parse_output_options(output_type: OutputType, options: Vec<&str>) -> Result<OutputConfig> {
    match output_type {
        OutputType::Json => {
            let options = JsonOptions::try_from(options).context("failed to parse json options")?;
            Ok(OutputConfig::json(options))
        }
        OutputType::Summary => {
            let options = SummaryOptions::try_from(options).context("failed to parse summary options")?;
            Ok(OutputConfig::summary(options))
        }
    }
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use crate::app::cli_parser::create_parser;

    use super::*;

    fn config(args: Vec<&str>) -> Result<AppConfig> {
        let args = create_parser().try_get_matches_from(args)?;
        AppConfig::try_from(&args)
    }

    #[test]
    fn defaults() {
        let config = config(vec!["blscan"]);

        assert_that(&config).is_ok();
        let config = config.unwrap();
        assert_that(&config.is_interactive()).is_true();
        assert_that(&config.timeout).is_equal_to(Duration::from_secs(5));
        assert_that(&config.retries).is_equal_to(1);
        assert_that(&config.max_concurrent).is_none();
        assert_that(&config.use_system_resolv_opt).is_true();
        assert_that(&config.resolv_conf_path()).is_equal_to("/etc/resolv.conf");
        assert_that(&config.output).is_equal_to(OutputType::Summary);
    }

    #[test]
    fn all_options() {
        let config = config(vec![
            "blscan",
            "--timeout",
            "750ms",
            "--retries",
            "3",
            "--max-concurrent",
            "10",
            "--nameserver",
            "9.9.9.9",
            "--no-system-resolv-opt",
            "--registry",
            "lists.conf",
            "--output",
            "json",
            "--output-options",
            "pretty",
            "--fail-on-listed",
            "1.2.3.4",
        ]);

        assert_that(&config).is_ok();
        let config = config.unwrap();
        assert_that(&config.targets).is_equal_to(vec!["1.2.3.4".to_string()]);
        assert_that(&config.timeout).is_equal_to(Duration::from_millis(750));
        assert_that(&config.retries).is_equal_to(3);
        assert_that(&config.max_concurrent).is_equal_to(Some(10));
        assert_that(&config.nameservers).has_length(1);
        assert_that(&config.use_system_resolv_opt).is_false();
        assert_that(&config.registry_path).is_equal_to(Some("lists.conf".to_string()));
        assert_that(&config.output).is_equal_to(OutputType::Json);
        assert_that(&config.fail_on_listed).is_true();
    }

    #[test]
    fn output_options_must_match_format() {
        let config = config(vec!["blscan", "--output", "summary", "--output-options", "pretty"]);

        assert_that(&config.is_err()).is_true();
    }

    #[test]
    fn zero_max_concurrent_is_rejected() {
        let config = config(vec!["blscan", "--max-concurrent", "0", "1.2.3.4"]);

        assert_that(&config.is_err()).is_true();
    }
}
