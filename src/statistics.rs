// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::scan::ScanResult;

pub trait Statistics<'a> {
    type StatsOut;

    fn statistics(&'a self) -> Self::StatsOut;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary<T: Ord + Clone> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: Ord + Clone> Summary<T> {
    pub fn summary(values: &[T]) -> Summary<T> {
        let min = values.iter().min().cloned();
        let max = values.iter().max().cloned();

        Summary { min, max }
    }
}

#[derive(Debug, Serialize)]
pub struct ScanStatistics<'a> {
    pub probes: usize,
    pub listed: usize,
    pub not_listed: usize,
    pub failed: usize,
    pub timeouts: usize,
    pub response_times: Summary<Duration>,
    pub run_time: Duration,
    /// Names of the DNSBLs listing the target
    pub listed_on: Vec<&'a str>,
}

impl<'a> fmt::Display for ScanStatistics<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn fmt_ms(duration: Option<Duration>) -> String {
            duration
                .map(|x| format!("{} ms", x.as_millis()))
                .unwrap_or_else(|| "-".to_string())
        }

        let str = format!(
            "{probes} probes in {run_time} ms: {listed} listed, {not_listed} not listed, {failed} failed [{timeouts} timeouts], response times min {min}, max {max}",
            probes = self.probes,
            run_time = self.run_time.as_millis(),
            listed = self.listed,
            not_listed = self.not_listed,
            failed = self.failed,
            timeouts = self.timeouts,
            min = fmt_ms(self.response_times.min),
            max = fmt_ms(self.response_times.max),
        );
        f.write_str(&str)
    }
}

impl<'a> Statistics<'a> for ScanResult {
    type StatsOut = ScanStatistics<'a>;

    fn statistics(&'a self) -> Self::StatsOut {
        let response_times: Vec<_> = self.iter().map(|x| x.response_time()).collect();
        let mut listed_on: Vec<_> = self.listed().map(|x| x.entry().name()).collect();
        listed_on.sort_unstable();

        ScanStatistics {
            probes: self.len(),
            listed: listed_on.len(),
            not_listed: self.not_listed().count(),
            failed: self.failed().count(),
            timeouts: self
                .failed()
                .filter(|x| x.error().map(|e| e.is_timeout()).unwrap_or(false))
                .count(),
            response_times: Summary::summary(&response_times),
            run_time: self.run_time(),
            listed_on,
        }
    }
}
