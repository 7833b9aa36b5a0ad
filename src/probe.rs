// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! A single DNSBL check.
//!
//! DNSBLs answer "not listed" with DNS' own "no such name". That answer must never be confused
//! with a failed query: a resolver outage reported as "not listed" would wrongly vouch for an
//! address.

use std::fmt;
use std::net::IpAddr;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::time;
use tracing::{debug, trace};

use crate::registry::DnsblEntry;
use crate::resolver::{self, Addresses, IpLookup, LookupResult};
use crate::reverse::query_name;
use crate::utils::serialize::{ser_duration_ms, ser_to_string};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Verdict {
    Listed,
    NotListed,
    QueryFailed,
}

impl Verdict {
    pub fn is_listed(&self) -> bool {
        matches!(self, Verdict::Listed)
    }

    pub fn is_not_listed(&self) -> bool {
        matches!(self, Verdict::NotListed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Verdict::QueryFailed)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let str = match self {
            Verdict::Listed => "listed",
            Verdict::NotListed => "not listed",
            Verdict::QueryFailed => "query failed",
        };
        f.write_str(str)
    }
}

/// Result of checking one address against one DNSBL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    entry: DnsblEntry,
    verdict: Verdict,
    /// Return codes of the DNSBL, e.g. `127.0.0.2`
    answers: Addresses,
    #[serde(rename = "detail", serialize_with = "ser_opt_error")]
    error: Option<resolver::Error>,
    #[serde(rename = "response_time_ms", serialize_with = "ser_duration_ms")]
    response_time: Duration,
}

impl ProbeOutcome {
    pub fn listed(entry: DnsblEntry, answers: Addresses, response_time: Duration) -> ProbeOutcome {
        ProbeOutcome {
            entry,
            verdict: Verdict::Listed,
            answers,
            error: None,
            response_time,
        }
    }

    pub fn not_listed(entry: DnsblEntry, response_time: Duration) -> ProbeOutcome {
        ProbeOutcome {
            entry,
            verdict: Verdict::NotListed,
            answers: Addresses::new(),
            error: None,
            response_time,
        }
    }

    pub fn failed(entry: DnsblEntry, error: resolver::Error, response_time: Duration) -> ProbeOutcome {
        ProbeOutcome {
            entry,
            verdict: Verdict::QueryFailed,
            answers: Addresses::new(),
            error: Some(error),
            response_time,
        }
    }

    fn from_lookup_result(entry: DnsblEntry, result: LookupResult, response_time: Duration) -> ProbeOutcome {
        match result {
            LookupResult::Response(answers) if !answers.is_empty() => {
                ProbeOutcome::listed(entry, answers, response_time)
            }
            LookupResult::Response(_) | LookupResult::NxDomain => ProbeOutcome::not_listed(entry, response_time),
            LookupResult::Error(error) => ProbeOutcome::failed(entry, error, response_time),
        }
    }

    pub fn entry(&self) -> &DnsblEntry {
        &self.entry
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn answers(&self) -> &[IpAddr] {
        &self.answers
    }

    pub fn error(&self) -> Option<&resolver::Error> {
        self.error.as_ref()
    }

    /// Description of the failure; set if and only if the query failed.
    pub fn detail(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn response_time(&self) -> Duration {
        self.response_time
    }
}

fn ser_opt_error<S>(data: &Option<resolver::Error>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match data {
        Some(error) => ser_to_string(error, serializer),
        None => serializer.serialize_none(),
    }
}

/// Checks `ip` against the DNSBL `entry`.
///
/// The query is bounded by `timeout`; when it elapses the outcome is a failed query. Never
/// retries.
pub async fn probe(resolver: &dyn IpLookup, ip: IpAddr, entry: DnsblEntry, timeout: Duration) -> ProbeOutcome {
    let name = query_name(&ip, entry.domain());
    trace!("Probing '{}' for {}.", &name, entry.name());

    let start_time = Instant::now();
    let result = match time::timeout(timeout, resolver.lookup_ip(&name)).await {
        Ok(result) => result,
        Err(elapsed) => LookupResult::Error(elapsed.into()),
    };
    let response_time = Instant::now() - start_time;

    let outcome = ProbeOutcome::from_lookup_result(entry, result, response_time);
    debug!(
        "Probe for '{}' returned after {} ms: {}",
        &name,
        response_time.as_millis(),
        outcome.verdict()
    );

    outcome
}
