// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! blscan checks an IP address against a registry of DNS blackhole lists (DNSBLs).
//!
//! Every list is queried concurrently by its own task. Each probe ends in exactly one
//! [`ProbeOutcome`] -- listed, not listed, or query failed -- and a scan only returns once all
//! outcomes are in.
//!
//! # Example
//! ```no_run
//! # use std::sync::Arc;
//! # use blscan::resolver::{Resolver, ResolverConfig, ResolverOpts};
//! # use blscan::{Registry, ScanOpts, Scanner, Target};
//! # async fn scan() -> blscan::Result<()> {
//! let resolver = Arc::new(Resolver::new(ResolverConfig::system(), ResolverOpts::default())?);
//! let registry = Arc::new(Registry::builtin());
//! let target = Target::resolve("mail.example.com", resolver.as_ref()).await?;
//!
//! let scanner = Scanner::new(resolver, ScanOpts::default());
//! let result = scanner.scan(&target, &registry).await;
//! assert_eq!(result.len(), registry.len());
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "app-cli")]
pub mod app;
pub mod error;
pub mod probe;
pub mod registry;
pub mod resolver;
pub mod reverse;
pub mod scan;
pub mod statistics;
pub mod system_config;
pub mod target;
mod utils;

pub use error::Error;
pub use probe::{probe, ProbeOutcome, Verdict};
pub use registry::{DnsblEntry, Registry};
pub use reverse::{query_name, reverse, reverse_dotted};
pub use scan::{ScanOpts, ScanResult, Scanner};
pub use target::Target;

pub type Result<T> = std::result::Result<T, Error>;
