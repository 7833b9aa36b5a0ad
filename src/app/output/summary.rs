// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::collections::HashSet;

use tabwriter::TabWriter;
use yansi::Paint;

use super::*;
use crate::app::output::styles::{self, itemization_prefix};
use crate::probe::{ProbeOutcome, Verdict};
use crate::scan::ScanResult;

static SUPPORTED_OPTIONS: &[&str] = &["condensed", "show-domains"];

#[derive(Debug, Default)]
pub struct SummaryOptions {
    /// Only show DNSBLs listing the target and failed queries
    condensed: bool,
    /// Show the domain of each DNSBL
    show_domains: bool,
}

impl SummaryOptions {
    pub fn new(condensed: bool, show_domains: bool) -> SummaryOptions {
        SummaryOptions {
            condensed,
            show_domains,
        }
    }

    pub fn condensed(&self) -> bool {
        self.condensed
    }

    pub fn show_domains(&self) -> bool {
        self.show_domains
    }
}

impl<'a> TryFrom<Vec<&'a str>> for SummaryOptions {
    type Error = Error;

    fn try_from(values: Vec<&'a str>) -> std::result::Result<Self, Self::Error> {
        let options: HashSet<&str> = values.into_iter().collect();
        if let Some(unknown) = options.iter().find(|x| !SUPPORTED_OPTIONS.contains(*x)) {
            return Err(Error::ParserError {
                what: unknown.to_string(),
                to: "SummaryOptions",
                why: "unknown option".to_string(),
            });
        }

        Ok(SummaryOptions {
            condensed: options.contains("condensed"),
            show_domains: options.contains("show-domains"),
        })
    }
}

#[derive(Debug, Default)]
pub struct SummaryFormat {
    opts: SummaryOptions,
}

impl SummaryFormat {
    pub fn new(opts: SummaryOptions) -> SummaryFormat {
        SummaryFormat { opts }
    }

    pub fn opts(&self) -> &SummaryOptions {
        &self.opts
    }
}

pub trait SummaryFormatter {
    fn output<W: Write>(&self, writer: &mut W, opts: &SummaryOptions) -> Result<()>;
}

impl<T: SummaryFormatter> OutputFormat<T> for SummaryFormat {
    fn output<W: Write>(&self, writer: &mut W, data: &T) -> Result<()> {
        data.output(writer, &self.opts)
    }
}

trait Rendering {
    fn render(&self, opts: &SummaryOptions) -> String;
}

impl SummaryFormatter for ScanResult {
    fn output<W: Write>(&self, writer: &mut W, opts: &SummaryOptions) -> Result<()> {
        let mut tw = TabWriter::new(vec![]);

        let target = self.target().to_string();
        for outcome in self.sorted() {
            if opts.condensed() && outcome.verdict().is_not_listed() {
                continue;
            }
            writeln!(
                tw,
                " {} {}\t{}\t{}",
                itemization_prefix(),
                &target,
                outcome.render(opts),
                render_verdict(outcome)
            )?;
        }

        let text_buffer = tw.into_inner().map_err(|_| Error::InternalError {
            msg: "finish TabWriter buffer",
        })?;
        let out = String::from_utf8(text_buffer).map_err(|_| Error::InternalError {
            msg: "convert TabWriter buffer to output",
        })?;
        write!(writer, "{}", out)?;

        Ok(())
    }
}

impl Rendering for ProbeOutcome {
    fn render(&self, opts: &SummaryOptions) -> String {
        if opts.show_domains() {
            format!("{} ({})", self.entry().name(), self.entry().domain())
        } else {
            self.entry().name().to_string()
        }
    }
}

fn render_verdict(outcome: &ProbeOutcome) -> String {
    match outcome.verdict() {
        Verdict::Listed => {
            let answers: Vec<_> = outcome.answers().iter().map(ToString::to_string).collect();
            format!("{} [{}]", "LISTED".paint(styles::ERROR), answers.join(", "))
        }
        Verdict::NotListed => format!("{}", "not listed".paint(styles::OK)),
        Verdict::QueryFailed => format!(
            "{}: {}",
            "query failed".paint(styles::ATTENTION),
            outcome.detail().unwrap_or_default()
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;

    use chrono::Utc;
    use smallvec::smallvec;
    use spectral::prelude::*;

    use crate::registry::DnsblEntry;
    use crate::resolver;
    use crate::target::Target;

    use super::*;

    fn scan_result() -> ScanResult {
        let target = Target::new("mail.example.com", IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)));
        let outcomes = vec![
            ProbeOutcome::not_listed(DnsblEntry::new("SpamCop", "bl.spamcop.net"), Duration::from_millis(12)),
            ProbeOutcome::listed(
                DnsblEntry::new("Barracuda", "b.barracudacentral.org"),
                smallvec![IpAddr::V4(Ipv4Addr::new(127, 0, 0, 2))],
                Duration::from_millis(20),
            ),
            ProbeOutcome::failed(
                DnsblEntry::new("SORBS", "dnsbl.sorbs.net"),
                resolver::Error::ServerFailure,
                Duration::from_millis(40),
            ),
        ];
        ScanResult::new(target, Utc::now(), Duration::from_millis(41), outcomes)
    }

    fn render(opts: SummaryOptions) -> String {
        yansi::disable();
        let config = OutputConfig::summary(opts);
        let output = Output::new(&config);

        let mut buf = Vec::new();
        output
            .output(&mut buf, &scan_result())
            .expect("failed to render summary");

        String::from_utf8(buf).expect("summary is not valid UTF-8")
    }

    #[test]
    fn summary() {
        crate::utils::tests::logging::init();

        let out = render(SummaryOptions::default());
        let lines: Vec<_> = out.lines().collect();

        assert_that(&lines.len()).is_equal_to(3);
        assert_that(&lines[0].contains("Barracuda")).is_true();
        assert_that(&lines[0].contains("LISTED [127.0.0.2]")).is_true();
        assert_that(&lines[1].contains("SORBS")).is_true();
        assert_that(&lines[1].contains("query failed: nameserver responded with server failure")).is_true();
        assert_that(&lines[2].contains("SpamCop")).is_true();
        assert_that(&lines[2].contains("not listed")).is_true();
    }

    #[test]
    fn condensed_summary_hides_not_listed() {
        let out = render(SummaryOptions::new(true, true));

        assert_that(&out.lines().count()).is_equal_to(2);
        assert_that(&out.contains("SpamCop")).is_false();
        assert_that(&out.contains("(b.barracudacentral.org)")).is_true();
    }

    #[test]
    fn unknown_option() {
        let opts = SummaryOptions::try_from(vec!["condensed", "human"]);

        assert_that(&opts.is_err()).is_true();
    }
}
