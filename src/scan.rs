// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Fans out one probe per DNSBL and collects every outcome.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tokio::task;
use tracing::{debug, debug_span, info, instrument, warn};
use tracing_futures::Instrument;

use crate::error::Errors;
use crate::probe::{probe, ProbeOutcome};
use crate::registry::{DnsblEntry, Registry};
use crate::resolver::IpLookup;
use crate::target::Target;
use crate::utils::serialize::ser_duration_ms;

#[derive(Debug, Clone)]
pub struct ScanOpts {
    /// Maximum number of simultaneous probes; `None` starts all probes at once
    pub max_concurrent: Option<usize>,
    /// Timeout of each single probe
    pub timeout: Duration,
}

impl Default for ScanOpts {
    fn default() -> Self {
        ScanOpts {
            max_concurrent: None,
            timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scanner {
    resolver: Arc<dyn IpLookup>,
    opts: Arc<ScanOpts>,
}

impl Scanner {
    pub fn new(resolver: Arc<dyn IpLookup>, opts: ScanOpts) -> Scanner {
        Scanner {
            resolver,
            opts: Arc::new(opts),
        }
    }

    pub fn opts(&self) -> &ScanOpts {
        &self.opts
    }

    /// Checks `target` against every entry of `registry`.
    ///
    /// Each probe runs in its own task. Returns once all probes are done with exactly one outcome
    /// per entry, in order of completion.
    #[instrument(name = "scan", level = "info", skip(self, target, registry), fields(target = %target.address()))]
    pub async fn scan(&self, target: &Target, registry: &Registry) -> ScanResult {
        let started_at = Utc::now();
        let start_time = Instant::now();
        let max_concurrent = self.opts.max_concurrent.unwrap_or_else(|| registry.len()).max(1);
        info!("Scanning {} DNSBLs with up to {} concurrent probes", registry.len(), max_concurrent);

        let probes = registry
            .iter()
            .cloned()
            .map(|entry| spawn_probe(self.resolver.clone(), target.address(), entry, self.opts.timeout));
        let outcomes: Vec<_> = stream::iter(probes).buffer_unordered(max_concurrent).collect().await;

        let run_time = Instant::now() - start_time;
        debug!("Collected {} outcomes after {} ms", outcomes.len(), run_time.as_millis());

        ScanResult::new(target.clone(), started_at, run_time, outcomes)
    }
}

async fn spawn_probe(resolver: Arc<dyn IpLookup>, ip: IpAddr, entry: DnsblEntry, timeout: Duration) -> ProbeOutcome {
    let span = debug_span!("probe", dnsbl = %entry.name());
    let start_time = Instant::now();

    let task_entry = entry.clone();
    let handle = task::spawn(async move { probe(resolver.as_ref(), ip, task_entry, timeout).await }.instrument(span));

    match handle.await {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!("Probe for {} did not finish: {}", entry.name(), &err);
            ProbeOutcome::failed(entry, err.into(), Instant::now() - start_time)
        }
    }
}

/// Complete outcome set of one scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    target: Target,
    started_at: DateTime<Utc>,
    #[serde(rename = "run_time_ms", serialize_with = "ser_duration_ms")]
    run_time: Duration,
    outcomes: Vec<ProbeOutcome>,
}

impl ScanResult {
    pub fn new(target: Target, started_at: DateTime<Utc>, run_time: Duration, outcomes: Vec<ProbeOutcome>) -> Self {
        ScanResult {
            target,
            started_at,
            run_time,
            outcomes,
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn started_at(&self) -> &DateTime<Utc> {
        &self.started_at
    }

    pub fn run_time(&self) -> Duration {
        self.run_time
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProbeOutcome> {
        self.outcomes.iter()
    }

    pub fn listed(&self) -> impl Iterator<Item = &ProbeOutcome> {
        self.outcomes.iter().filter(|x| x.verdict().is_listed())
    }

    pub fn not_listed(&self) -> impl Iterator<Item = &ProbeOutcome> {
        self.outcomes.iter().filter(|x| x.verdict().is_not_listed())
    }

    pub fn failed(&self) -> impl Iterator<Item = &ProbeOutcome> {
        self.outcomes.iter().filter(|x| x.verdict().is_failed())
    }

    /// True if at least one DNSBL lists the target.
    pub fn is_listed(&self) -> bool {
        self.listed().next().is_some()
    }

    /// Outcomes ordered by DNSBL name.
    pub fn sorted(&self) -> Vec<&ProbeOutcome> {
        let mut outcomes: Vec<_> = self.outcomes.iter().collect();
        outcomes.sort_by(|a, b| a.entry().name().cmp(b.entry().name()));
        outcomes
    }
}

impl IntoIterator for ScanResult {
    type Item = ProbeOutcome;
    type IntoIter = std::vec::IntoIter<ProbeOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl<'a> IntoIterator for &'a ScanResult {
    type Item = &'a ProbeOutcome;
    type IntoIter = std::slice::Iter<'a, ProbeOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

impl Errors for ScanResult {
    fn errors(&self) -> Box<dyn Iterator<Item = Box<&dyn std::error::Error>> + '_> {
        Box::new(
            self.outcomes
                .iter()
                .filter_map(|x| x.error())
                .map(|x| Box::new(x as &dyn std::error::Error)),
        )
    }
}
