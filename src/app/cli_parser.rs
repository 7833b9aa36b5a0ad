// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::net::IpAddr;

use clap::{crate_name, value_parser, Arg, ArgAction, Command};

pub static SUPPORTED_OUTPUT_FORMATS: &[&str] = &["json", "summary"];

pub fn create_parser() -> Command {
    Command::new(crate_name!())
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::new("targets")
                .value_name("IP ADDR | HOSTNAME")
                .num_args(0..)
                .action(ArgAction::Append)
                .help("Scans these targets and exits; starts an interactive prompt if none are given"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("DURATION")
                .default_value("5s")
                .value_parser(humantime::parse_duration)
                .help("Sets the timeout of each DNSBL query, e.g. 500ms or 5s"),
        )
        .arg(
            Arg::new("retries")
                .long("retries")
                .value_name("NUMBER")
                .default_value("1")
                .value_parser(value_parser!(usize))
                .help("Sets the number of attempts the resolver makes per query"),
        )
        .arg(
            Arg::new("max-concurrent")
                .long("max-concurrent")
                .value_name("NUMBER")
                .value_parser(value_parser!(usize))
                .help("Limits the number of DNSBL queries in flight; all queries run at once by default"),
        )
        .arg(
            Arg::new("nameservers")
                .short('s')
                .long("nameserver")
                .value_name("IP ADDR")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .value_parser(value_parser!(IpAddr))
                .help("Uses these nameservers instead of the system nameservers"),
        )
        .arg(
            Arg::new("resolv-conf")
                .long("resolv-conf")
                .value_name("FILE")
                .help("Reads nameservers and resolver options from this file instead of /etc/resolv.conf"),
        )
        .arg(
            Arg::new("no-system-resolv-opt")
                .long("no-system-resolv-opt")
                .action(ArgAction::SetTrue)
                .help("Ignores options set in /etc/resolv.conf"),
        )
        .arg(
            Arg::new("registry")
                .short('r')
                .long("registry")
                .value_name("FILE")
                .help("Loads DNSBLs from file instead of using the built-in registry")
                .long_help(
                    r#"Loads DNSBLs from file instead of using the built-in registry. The file contains one DNSBL per line in the form 'name = domain', e.g.,
Spamhaus Zen = zen.spamhaus.org
Empty lines and lines starting with '#' or '//' are ignored."#,
                ),
        )
        .arg(
            Arg::new("list-registry")
                .long("list-registry")
                .action(ArgAction::SetTrue)
                .conflicts_with("targets")
                .help("Lists all DNSBLs of the registry and exits"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FORMAT")
                .default_value("summary")
                .value_parser(SUPPORTED_OUTPUT_FORMATS.to_vec())
                .help("Sets the output format for result presentation"),
        )
        .arg(
            Arg::new("output-options")
                .long("output-options")
                .value_name("OPTIONS")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .help("Sets output options")
                .long_help(
                    r#"* Summary: condensed, show-domains
  condensed: only show DNSBLs listing the target and failed queries
  show-domains: show the domain of each DNSBL
* Json: pretty
  pretty: pretty print JSON"#,
                ),
        )
        .arg(
            Arg::new("show-errors")
                .long("show-errors")
                .action(ArgAction::SetTrue)
                .help("Shows error counts"),
        )
        .arg(
            Arg::new("fail-on-listed")
                .long("fail-on-listed")
                .action(ArgAction::SetTrue)
                .help("Exits with status 11 if a target is listed on any DNSBL"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Does not print anything but results"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .action(ArgAction::SetTrue)
                .help("Disables colorful output"),
        )
        .arg(
            Arg::new("ascii")
                .long("ascii")
                .action(ArgAction::SetTrue)
                .help("Uses only ASCII compatible characters for output"),
        )
        .arg(
            Arg::new("v")
                .short('v')
                .action(ArgAction::Count)
                .help("Sets the level of verbosity"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Uses debug formatting for logging -- much more verbose"),
        )
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;

    #[test]
    fn parser_is_valid() {
        create_parser().debug_assert();
    }

    #[test]
    fn parser_is_named_after_crate() {
        let parser = create_parser();

        assert_that(&parser.get_name()).is_equal_to("blscan");
    }

    #[test]
    fn parses_targets_and_nameservers() {
        let args = create_parser().try_get_matches_from(vec![
            "blscan",
            "--nameserver",
            "127.0.0.1,::1",
            "1.2.3.4",
            "mail.example.com",
        ]);

        assert_that(&args.is_ok()).is_true();
        let args = args.unwrap();
        let targets: Vec<_> = args.get_many::<String>("targets").unwrap().cloned().collect();
        assert_that(&targets).is_equal_to(vec!["1.2.3.4".to_string(), "mail.example.com".to_string()]);
        assert_that(&args.get_many::<IpAddr>("nameservers").map(|x| x.count())).is_equal_to(Some(2));
    }

    #[test]
    fn rejects_invalid_timeout() {
        let args = create_parser().try_get_matches_from(vec!["blscan", "--timeout", "soon", "1.2.3.4"]);

        assert_that(&args.is_err()).is_true();
    }

    #[test]
    fn rejects_unknown_output_format() {
        let args = create_parser().try_get_matches_from(vec!["blscan", "--output", "xml"]);

        assert_that(&args.is_err()).is_true();
    }
}
