// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

use yansi::Paint;

use crate::app::output::styles::{
    self, attention_prefix, caption_prefix, error_prefix, finished_prefix, info_prefix, itemization_prefix, ok_prefix,
};
use crate::app::output::OutputType;
use crate::app::AppConfig;
use crate::error::Errors;
use crate::registry::Registry;
use crate::resolver::ResolverOpts;
use crate::scan::ScanOpts;
use crate::statistics::Statistics;
use crate::target::Target;

#[derive(Debug, Default)]
pub struct ConsoleOpts {
    quiet: bool,
    show_errors: bool,
}

impl From<&AppConfig> for ConsoleOpts {
    fn from(app_config: &AppConfig) -> Self {
        ConsoleOpts {
            // Keep stdout clean for JSON consumers
            quiet: app_config.quiet || app_config.output == OutputType::Json,
            show_errors: app_config.show_errors,
        }
    }
}

#[derive(Debug)]
pub struct Console {
    opts: ConsoleOpts,
}

impl Console {
    pub fn new(opts: ConsoleOpts) -> Console {
        Console { opts }
    }

    pub fn print_opts(&self, resolver_name: &str, resolver_opts: &ResolverOpts, scan_opts: &ScanOpts) {
        if self.not_quiet() {
            self.caption(format!(
                "{}: nameservers={}, timeout={}ms, retries={}, concurrent probes={}",
                Fmt::emph("Options"),
                resolver_name,
                scan_opts.timeout.as_millis(),
                resolver_opts.retries,
                scan_opts
                    .max_concurrent
                    .map(|x| x.to_string())
                    .unwrap_or_else(|| "unlimited".to_string()),
            ));
        }
    }

    pub fn print_estimates(&self, target: &Target, registry: &Registry) {
        if self.not_quiet() {
            self.info(format!(
                "Checking {} against {} DNSBLs.",
                Fmt::emph(target),
                registry.len()
            ));
        }
    }

    pub fn print_statistics<'a, T: Statistics<'a>>(&self, data: &'a T)
    where
        <T as Statistics<'a>>::StatsOut: fmt::Display,
    {
        if self.not_quiet() {
            let statistics = data.statistics();
            self.info(format!("Finished {}.", statistics));
        }
    }

    pub fn print_verdict(&self, target: &Target, listed_on: usize) {
        if self.not_quiet() {
            if listed_on == 0 {
                self.ok(format!("{} is not listed on any DNSBL.", target));
            } else {
                self.attention(format!(
                    "{} is listed on {} {}.",
                    target,
                    Fmt::error(listed_on),
                    if listed_on == 1 { "DNSBL" } else { "DNSBLs" }
                ));
            }
        }
    }

    pub fn print_error_counts<E: Errors>(&self, results: &E) {
        if !self.show_errors() {
            return;
        }
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();

        for err in results.errors() {
            let val = counts.entry(err.to_string()).or_insert(0);
            *val += 1;
        }

        self.info("Error counts");
        if counts.is_empty() {
            self.ok("No errors occurred.");
        } else {
            for (k, v) in counts.iter() {
                self.itemize(format!("Err '{}' occurred {} times", k, v));
            }
        }
    }

    pub fn print_registry(&self, registry: &Registry) {
        self.caption(format!("Registry of {} DNSBLs:", registry.len()));
        for entry in registry.iter() {
            self.itemize(entry.to_string());
        }
    }

    pub fn print_finished(&self) {
        if self.not_quiet() {
            self.finished();
        }
    }

    /// Prints a prompt without a line break.
    pub fn prompt<T: AsRef<str>>(&self, str: T) -> io::Result<()> {
        if self.not_quiet() {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write!(handle, "{} {} ", Fmt::emph(caption_prefix()), str.as_ref())?;
            handle.flush()?;
        }

        Ok(())
    }

    pub fn emphasize<T: fmt::Display>(&self, item: T) {
        println!("{}", Fmt::emph(item))
    }

    pub fn info<T: AsRef<str>>(&self, str: T) {
        println!("{} {}", info_prefix(), str.as_ref());
    }

    pub fn attention<T: AsRef<str>>(&self, str: T) {
        println!("{} {}", Fmt::attention(attention_prefix()), str.as_ref());
    }

    pub fn finished(&self) {
        self.emphasize(format!("{} Finished.", finished_prefix()));
    }

    pub fn caption<T: AsRef<str>>(&self, str: T) {
        self.emphasize(format!("{} {}", caption_prefix(), str.as_ref()));
    }

    pub fn failed<T: AsRef<str>>(&self, str: T) {
        println!("{} {}", Fmt::error(error_prefix()), str.as_ref());
    }

    pub fn error<T: AsRef<str>>(&self, str: T) {
        eprintln!("{} {}", Fmt::error(error_prefix()), str.as_ref());
    }

    pub fn ok<T: AsRef<str>>(&self, str: T) {
        println!("{} {}", Fmt::ok(ok_prefix()), str.as_ref());
    }

    pub fn itemize<T: AsRef<str>>(&self, str: T) {
        println!(" {} {}", itemization_prefix(), str.as_ref());
    }

    pub fn not_quiet(&self) -> bool {
        !self.opts.quiet
    }

    /// Detailed error counts are printed if `quiet` is not set and `show_errors` is set.
    pub fn show_errors(&self) -> bool {
        !self.opts.quiet && self.opts.show_errors
    }
}

pub struct Fmt {}

impl Fmt {
    pub fn emph<T: fmt::Display>(item: T) -> String {
        item.paint(styles::EMPH).to_string()
    }

    pub fn attention<T: fmt::Display>(item: T) -> String {
        item.paint(styles::ATTENTION).to_string()
    }

    pub fn error<T: fmt::Display>(item: T) -> String {
        item.paint(styles::ERROR).to_string()
    }

    pub fn ok<T: fmt::Display>(item: T) -> String {
        item.paint(styles::OK).to_string()
    }
}
