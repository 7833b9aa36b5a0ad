// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::fmt;
use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::config::NameServerConfigGroup;
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::rr::Name;
use hickory_resolver::TokioResolver;
use tracing::trace;

pub use error::Error;
pub use lookup::{Addresses, LookupResult};

use crate::resolver::lookup::IntoLookupResult;
use crate::system_config;
use crate::Result;

pub mod error;
pub mod lookup;

pub type ResolverResult<T> = std::result::Result<T, Error>;

/// Address lookup capability used by probes and target resolution.
///
/// Implementations classify every answer into the tri-state `LookupResult` themselves, so
/// callers never have to look at error messages to tell "no such record" from a failure.
#[async_trait]
pub trait IpLookup: Send + Sync + fmt::Debug {
    /// Looks up the IPv4 and IPv6 addresses of `name`.
    ///
    /// Names ending with a dot are treated as fully qualified.
    async fn lookup_ip(&self, name: &str) -> LookupResult;

    /// Human readable description of this resolver, e.g. its nameservers.
    fn name(&self) -> String;
}

/// Nameservers to send queries to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    name_servers: Vec<IpAddr>,
}

impl ResolverConfig {
    /// Uses the nameservers of the local system configuration.
    pub fn system() -> Self {
        ResolverConfig::default()
    }

    /// Uses the given nameservers via UDP and TCP on port 53.
    pub fn with_name_servers<T: Into<Vec<IpAddr>>>(name_servers: T) -> Self {
        ResolverConfig {
            name_servers: name_servers.into(),
        }
    }

    /// Uses the nameservers listed in a resolv.conf file.
    ///
    /// Falls back to the system configuration if the file lists none.
    pub fn from_system_config_path<P: AsRef<Path>>(path: P) -> Result<ResolverConfig> {
        let config = system_config::load_from_system_config_path(path)?;
        Ok(config)
    }

    pub fn name_servers(&self) -> &[IpAddr] {
        &self.name_servers
    }

    pub fn is_system(&self) -> bool {
        self.name_servers.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ResolverOpts {
    /// Number of attempts per query and nameserver
    pub retries: usize,
    /// Maximum number of concurrent requests per query
    pub max_concurrent_requests: usize,
    pub ndots: usize,
    /// Per attempt timeout of the underlying resolver
    pub timeout: Duration,
}

impl ResolverOpts {
    /// Reads `ResolverOpts` from a resolv.conf file.
    pub fn from_system_config_path<P: AsRef<Path>>(path: P) -> Result<ResolverOpts> {
        let opts = system_config::load_from_system_config_path(path)?;
        Ok(opts)
    }
}

impl Default for ResolverOpts {
    fn default() -> Self {
        ResolverOpts {
            retries: 1,
            max_concurrent_requests: 2,
            ndots: 1,
            timeout: Duration::from_secs(5),
        }
    }
}

/// `IpLookup` backed by hickory's tokio resolver.
#[derive(Clone)]
pub struct Resolver {
    inner: Arc<TokioResolver>,
    opts: Arc<ResolverOpts>,
    name: Arc<String>,
}

impl Resolver {
    pub fn new(config: ResolverConfig, opts: ResolverOpts) -> ResolverResult<Self> {
        let (hickory_config, name) = if config.is_system() {
            let (system_config, _) =
                hickory_resolver::system_conf::read_system_conf().map_err(|err| Error::ResolveError {
                    reason: err.to_string(),
                })?;
            (system_config, "system".to_string())
        } else {
            let group = NameServerConfigGroup::from_ips_clear(config.name_servers(), 53, true);
            let name = config
                .name_servers()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            (
                hickory_resolver::config::ResolverConfig::from_parts(None, Vec::new(), group),
                name,
            )
        };

        let inner = TokioResolver::builder_with_config(hickory_config, TokioConnectionProvider::default())
            .with_options(opts.clone().into())
            .build();

        Ok(Resolver {
            inner: Arc::new(inner),
            opts: Arc::new(opts),
            name: Arc::new(name),
        })
    }

    pub fn opts(&self) -> &ResolverOpts {
        &self.opts
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("name", &self.name)
            .field("opts", &self.opts)
            .finish()
    }
}

#[async_trait]
impl IpLookup for Resolver {
    async fn lookup_ip(&self, name: &str) -> LookupResult {
        let name = match Name::from_ascii(name) {
            Ok(name) => name,
            Err(err) => return Error::from(err).into(),
        };
        trace!("Sending query for '{}' to {}.", &name, &self.name);

        self.inner.lookup_ip(name).await.into_lookup_result()
    }

    fn name(&self) -> String {
        self.name.to_string()
    }
}

#[doc(hidden)]
impl From<resolv_conf::Config> for ResolverOpts {
    fn from(config: resolv_conf::Config) -> Self {
        ResolverOpts {
            retries: config.attempts as usize,
            ndots: config.ndots as usize,
            timeout: Duration::from_secs(config.timeout as u64),
            ..Default::default()
        }
    }
}

#[doc(hidden)]
impl From<resolv_conf::Config> for ResolverConfig {
    fn from(config: resolv_conf::Config) -> Self {
        let name_servers: Vec<IpAddr> = config.nameservers.into_iter().map(Into::into).collect();
        ResolverConfig::with_name_servers(name_servers)
    }
}

#[doc(hidden)]
impl From<ResolverOpts> for hickory_resolver::config::ResolverOpts {
    fn from(opts: ResolverOpts) -> Self {
        let mut hickory_opts = hickory_resolver::config::ResolverOpts::default();
        hickory_opts.attempts = opts.retries;
        hickory_opts.ndots = opts.ndots;
        hickory_opts.num_concurrent_reqs = opts.max_concurrent_requests;
        hickory_opts.timeout = opts.timeout;

        hickory_opts
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    use spectral::prelude::*;

    use super::*;

    #[test]
    fn resolver_opts_from_resolv_conf() {
        let config = resolv_conf::Config::parse(b"nameserver 127.0.0.1\noptions ndots:2 timeout:3 attempts:4\n")
            .expect("failed to parse resolv.conf");

        let opts = ResolverOpts::from(config);

        assert_that(&opts.ndots).is_equal_to(2);
        assert_that(&opts.timeout).is_equal_to(Duration::from_secs(3));
        assert_that(&opts.retries).is_equal_to(4);
    }

    #[test]
    fn resolver_config_from_resolv_conf() {
        let config = resolv_conf::Config::parse(b"nameserver 192.0.2.53\nnameserver 2001:db8::53\n")
            .expect("failed to parse resolv.conf");

        let config = ResolverConfig::from(config);

        assert_that(&config.is_system()).is_false();
        assert_that(&config.name_servers().to_vec()).is_equal_to(vec![
            IpAddr::V4(Ipv4Addr::new(192, 0, 2, 53)),
            IpAddr::from_str("2001:db8::53").expect("invalid IPv6 address"),
        ]);
    }

    #[test]
    fn resolver_config_without_nameservers_is_system() {
        let config = resolv_conf::Config::parse(b"options ndots:2\n").expect("failed to parse resolv.conf");

        let config = ResolverConfig::from(config);

        assert_that(&config.is_system()).is_true();
    }

    #[test]
    fn hickory_opts_from_resolver_opts() {
        let opts = ResolverOpts {
            retries: 3,
            max_concurrent_requests: 1,
            ndots: 0,
            timeout: Duration::from_millis(500),
        };

        let hickory_opts: hickory_resolver::config::ResolverOpts = opts.into();

        assert_that(&hickory_opts.attempts).is_equal_to(3);
        assert_that(&hickory_opts.timeout).is_equal_to(Duration::from_millis(500));
    }

    #[tokio::test]
    async fn resolver_with_name_servers() {
        let config = ResolverConfig::with_name_servers(vec![IpAddr::V4(Ipv4Addr::new(127, 0, 0, 53))]);

        let resolver = Resolver::new(config, ResolverOpts::default());

        assert_that(&resolver).is_ok();
        assert_that(&resolver.unwrap().name()).is_equal_to("127.0.0.53".to_string());
    }
}
