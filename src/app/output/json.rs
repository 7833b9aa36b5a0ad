// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::collections::HashSet;

use serde::Serialize;

use super::*;

#[derive(Debug, Default)]
pub struct JsonOptions {
    /// Pretty formatting
    pretty: bool,
}

impl JsonOptions {
    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

impl<'a> TryFrom<Vec<&'a str>> for JsonOptions {
    type Error = Error;

    fn try_from(values: Vec<&'a str>) -> std::result::Result<Self, Self::Error> {
        let options: HashSet<&str> = values.into_iter().collect();
        if let Some(unknown) = options.iter().find(|x| **x != "pretty") {
            return Err(Error::ParserError {
                what: unknown.to_string(),
                to: "JsonOptions",
                why: "unknown option".to_string(),
            });
        }

        Ok(JsonOptions {
            pretty: options.contains("pretty"),
        })
    }
}

#[derive(Debug, Default)]
pub struct JsonFormat {
    opts: JsonOptions,
}

impl JsonFormat {
    pub fn new(opts: JsonOptions) -> JsonFormat {
        JsonFormat { opts }
    }
}

impl<T: Serialize> OutputFormat<T> for JsonFormat {
    fn output<W: Write>(&self, writer: &mut W, data: &T) -> Result<()> {
        if self.opts.pretty {
            serde_json::to_writer_pretty(&mut *writer, data)?;
        } else {
            serde_json::to_writer(&mut *writer, data)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;

    use chrono::Utc;
    use spectral::prelude::*;

    use crate::probe::ProbeOutcome;
    use crate::registry::DnsblEntry;
    use crate::resolver;
    use crate::scan::ScanResult;
    use crate::target::Target;

    use super::*;

    fn scan_result() -> ScanResult {
        let target = Target::from_ip(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)));
        let outcomes = vec![
            ProbeOutcome::not_listed(DnsblEntry::new("SpamCop", "bl.spamcop.net"), Duration::from_millis(12)),
            ProbeOutcome::failed(
                DnsblEntry::new("SORBS", "dnsbl.sorbs.net"),
                resolver::Error::Timeout,
                Duration::from_millis(5000),
            ),
        ];
        ScanResult::new(target, Utc::now(), Duration::from_millis(5001), outcomes)
    }

    #[test]
    fn json_serialization() {
        crate::utils::tests::logging::init();
        let config = OutputConfig::json(JsonOptions::default());
        let output = Output::new(&config);

        let mut buf = Vec::new();
        let res = output.output(&mut buf, &scan_result());

        assert_that(&res).is_ok();
        let json: serde_json::Value = serde_json::from_slice(&buf).expect("output is not valid JSON");
        assert_that(&json["outcomes"].as_array().map(|x| x.len())).is_equal_to(Some(2));
        assert_that(&json["outcomes"][1]["verdict"].as_str()).is_equal_to(Some("QueryFailed"));
        assert_that(&json["outcomes"][1]["detail"].as_str()).is_equal_to(Some("request timed out"));
        assert_that(&json["outcomes"][0]["detail"].is_null()).is_true();
        assert_that(&json["target"]["address"].as_str()).is_equal_to(Some("192.0.2.1"));
    }

    #[test]
    fn unknown_option() {
        let opts = JsonOptions::try_from(vec!["pretty", "colorful"]);

        assert_that(&opts.is_err()).is_true();
    }
}
