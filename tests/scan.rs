// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::collections::{HashMap, HashSet};
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rand::Rng;
use spectral::prelude::*;
use tokio::time;

use blscan::resolver::{self, IpLookup, LookupResult};
use blscan::{DnsblEntry, Error, Registry, ScanOpts, Scanner, Target, Verdict};

/// Resolver double answering from a table; unknown names don't exist.
#[derive(Debug, Default)]
struct TableLookup {
    answers: HashMap<String, LookupResult>,
    delays: HashMap<String, Duration>,
    queries: AtomicUsize,
}

impl TableLookup {
    fn answer(mut self, name: &str, result: LookupResult) -> Self {
        self.answers.insert(name.to_string(), result);
        self
    }

    fn delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IpLookup for TableLookup {
    async fn lookup_ip(&self, name: &str) -> LookupResult {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(name) {
            time::sleep(*delay).await;
        }
        self.answers.get(name).cloned().unwrap_or(LookupResult::NxDomain)
    }

    fn name(&self) -> String {
        "table".to_string()
    }
}

fn listed() -> LookupResult {
    vec![IpAddr::V4(Ipv4Addr::new(127, 0, 0, 2))].into()
}

#[tokio::test]
async fn host_name_to_verdicts() {
    let resolver = TableLookup::default()
        .answer("mail.example.com", vec![IpAddr::V4(Ipv4Addr::new(1, 2, 3, 4))].into())
        .answer("4.3.2.1.a.example.", listed());
    let resolver = Arc::new(resolver);
    let registry = Registry::from_str("A = a.example\nB = b.example\n").expect("failed to parse registry");

    let target = Target::resolve("mail.example.com", resolver.as_ref())
        .await
        .expect("failed to resolve target");
    let scanner = Scanner::new(resolver.clone(), ScanOpts::default());
    let result = scanner.scan(&target, &registry).await;

    let verdicts: HashMap<_, _> = result
        .iter()
        .map(|x| (x.entry().name().to_string(), x.verdict()))
        .collect();
    assert_that(&verdicts.len()).is_equal_to(2);
    assert_that(&verdicts.get("A")).is_equal_to(Some(&Verdict::Listed));
    assert_that(&verdicts.get("B")).is_equal_to(Some(&Verdict::NotListed));
    // One forward lookup plus one probe per DNSBL
    assert_that(&resolver.queries()).is_equal_to(3);
}

#[tokio::test]
async fn unresolvable_target_launches_no_probe() {
    let resolver = Arc::new(TableLookup::default());

    let target = Target::resolve("not-a-real-host.invalid", resolver.as_ref()).await;

    assert_that(&matches!(target, Err(Error::ResolutionError { .. }))).is_true();
    assert_that(&resolver.queries()).is_equal_to(1);
}

#[tokio::test]
async fn duplicate_domains_are_independent_checks() {
    let resolver = TableLookup::default().answer("4.3.2.1.zen.spamhaus.org.", listed());
    let registry = Registry::from_entries(vec![
        DnsblEntry::new("Spamhaus Zen", "zen.spamhaus.org"),
        DnsblEntry::new("Spamhaus Zen (alias)", "zen.spamhaus.org"),
    ])
    .expect("failed to create registry");
    let scanner = Scanner::new(Arc::new(resolver), ScanOpts::default());

    let result = scanner.scan(&Target::from_ip(IpAddr::V4(Ipv4Addr::new(1, 2, 3, 4))), &registry).await;

    assert_that(&result.listed().count()).is_equal_to(2);
}

#[tokio::test]
async fn timeouts_and_failures_are_never_clean() {
    let resolver = TableLookup::default()
        .answer("4.3.2.1.servfail.example.", resolver::Error::ServerFailure.into())
        .delay("4.3.2.1.slow.example.", Duration::from_secs(30));
    let registry = Registry::from_str("ServFail = servfail.example\nSlow = slow.example\n").expect("failed to parse registry");
    let opts = ScanOpts {
        timeout: Duration::from_millis(100),
        ..Default::default()
    };
    let scanner = Scanner::new(Arc::new(resolver), opts);

    let result = scanner.scan(&Target::from_ip(IpAddr::V4(Ipv4Addr::new(1, 2, 3, 4))), &registry).await;

    assert_that(&result.failed().count()).is_equal_to(2);
    assert_that(&result.not_listed().count()).is_equal_to(0);
    for outcome in result.iter() {
        assert_that(&outcome.detail().map(|x| !x.is_empty())).is_equal_to(Some(true));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn hundred_dnsbls_with_random_delays() {
    let mut rng = rand::rng();
    let mut resolver = TableLookup::default();
    let mut entries = Vec::new();
    let mut slowest = Duration::ZERO;
    for i in 0..100 {
        let domain = format!("dnsbl-{}.example", i);
        let delay = Duration::from_millis(rng.random_range(0..500));
        slowest = slowest.max(delay);
        resolver = resolver.delay(&format!("4.3.2.1.{}.", domain), delay);
        if i % 10 == 0 {
            resolver = resolver.answer(&format!("4.3.2.1.{}.", domain), listed());
        }
        entries.push(DnsblEntry::new(format!("DNSBL {}", i), domain));
    }
    let registry = Registry::from_entries(entries).expect("failed to create registry");
    let scanner = Scanner::new(Arc::new(resolver), ScanOpts::default());

    let start_time = Instant::now();
    let result = scanner.scan(&Target::from_ip(IpAddr::V4(Ipv4Addr::new(1, 2, 3, 4))), &registry).await;
    let run_time = Instant::now() - start_time;

    assert_that(&result.len()).is_equal_to(100);
    let names: HashSet<_> = result.iter().map(|x| x.entry().name().to_string()).collect();
    assert_that(&names.len()).is_equal_to(100);
    assert_that(&result.listed().count()).is_equal_to(10);
    assert_that(&result.not_listed().count()).is_equal_to(90);
    // Sequential probing would take about 25 s
    assert_that(&(run_time < slowest + Duration::from_millis(1500))).is_true();
}
