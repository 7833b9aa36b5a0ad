// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;

use crate::{Error, Result};

pub mod builtin;
pub mod load;
mod parser;

/// A single DNSBL: a human readable name and the DNS zone to query.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize)]
pub struct DnsblEntry {
    name: String,
    domain: String,
}

impl DnsblEntry {
    pub fn new<N: Into<String>, D: Into<String>>(name: N, domain: D) -> DnsblEntry {
        DnsblEntry {
            name: name.into(),
            domain: domain.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl fmt::Display for DnsblEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.domain)
    }
}

/// Read-only set of DNSBLs to scan against.
///
/// Names are unique, domains are not: two names pointing to the same zone are two independent
/// checks. Iteration follows insertion order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Registry {
    #[serde(rename = "entries", serialize_with = "ser_entries")]
    inner: IndexMap<String, DnsblEntry>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Creates the registry of well-known public DNSBLs shipped with this crate.
    pub fn builtin() -> Registry {
        let inner = builtin::dnsbl_entries()
            .map(|entry| (entry.name.clone(), entry))
            .collect();
        Registry { inner }
    }

    pub fn from_entries<I: IntoIterator<Item = DnsblEntry>>(entries: I) -> Result<Registry> {
        let mut registry = Registry::new();
        for entry in entries {
            registry.add(entry)?;
        }

        Ok(registry)
    }

    /// Adds an entry; fails if an entry with the same name already exists.
    pub fn add(&mut self, entry: DnsblEntry) -> Result<()> {
        if self.inner.contains_key(&entry.name) {
            return Err(Error::DuplicateEntry { name: entry.name });
        }
        self.inner.insert(entry.name.clone(), entry);

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&DnsblEntry> {
        self.inner.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DnsblEntry> {
        self.inner.values()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl FromStr for Registry {
    type Err = Error;

    /// Parses one `name = domain` entry per line; empty lines and lines starting with `#` or
    /// `//` are skipped.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut registry = Registry::new();
        for line in s.lines() {
            let line = line.trim();
            if is_skippable(line) {
                continue;
            }
            registry.add(DnsblEntry::from_str(line)?)?;
        }

        Ok(registry)
    }
}

pub(crate) fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with("//")
}

impl FromStr for DnsblEntry {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match parser::parsed_dnsbl_entry(s) {
            Ok((_, (name, domain))) => Ok(DnsblEntry::new(name, domain)),
            Err(nom::Err::Incomplete(_)) => Err(Error::ParserError {
                what: s.to_string(),
                to: "DnsblEntry",
                why: "input is incomplete".to_string(),
            }),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(Error::ParserError {
                what: s.to_string(),
                to: "DnsblEntry",
                why: format!("{} at '{}'", e.code.description(), e.input),
            }),
        }
    }
}

fn ser_entries<S>(data: &IndexMap<String, DnsblEntry>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(data.values())
}
