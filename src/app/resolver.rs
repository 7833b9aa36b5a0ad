// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::convert::TryFrom;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::app::AppConfig;
use crate::resolver::{IpLookup, Resolver, ResolverConfig, ResolverOpts};
use crate::scan::ScanOpts;

/// The resolver used for target resolution and probes together with its settings.
pub struct AppResolver {
    resolver: Arc<Resolver>,
}

impl AppResolver {
    pub fn create_resolver(app_config: &AppConfig) -> Result<AppResolver> {
        let resolver_opts = load_resolver_opts(app_config)?;
        let resolver_config = resolver_config(app_config)?;

        let resolver = Resolver::new(resolver_config, resolver_opts).context("Failed to create resolver")?;
        info!("Created resolver using {}.", resolver.name());

        Ok(AppResolver {
            resolver: Arc::new(resolver),
        })
    }

    pub fn resolver(&self) -> Arc<dyn IpLookup> {
        self.resolver.clone()
    }

    pub fn resolver_opts(&self) -> &ResolverOpts {
        self.resolver.opts()
    }

    pub fn name(&self) -> String {
        self.resolver.name()
    }
}

/// Nameservers given on the command line win over those of an alternative resolv.conf.
pub fn resolver_config(config: &AppConfig) -> Result<ResolverConfig> {
    if !config.nameservers.is_empty() {
        return Ok(ResolverConfig::with_name_servers(config.nameservers.clone()));
    }
    match config.resolv_conf_path {
        Some(ref path) => ResolverConfig::from_system_config_path(path)
            .with_context(|| format!("Failed to load nameservers from '{}'", path)),
        None => Ok(ResolverConfig::system()),
    }
}

pub fn load_resolver_opts(config: &AppConfig) -> Result<ResolverOpts> {
    let default_opts = if config.use_system_resolv_opt {
        ResolverOpts::from_system_config_path(config.resolv_conf_path())
            .context("Failed to load system resolver options")?
    } else {
        ResolverOpts::default()
    };

    // Command line settings override resolv.conf
    let resolver_opts = ResolverOpts {
        retries: config.retries,
        timeout: config.timeout,
        ..default_opts
    };

    Ok(resolver_opts)
}

/// Grace period on top of all resolver attempts before a probe is given up.
const PROBE_TIMEOUT_SLACK: Duration = Duration::from_millis(500);

pub fn scan_opts(config: &AppConfig) -> ScanOpts {
    ScanOpts {
        max_concurrent: config.max_concurrent,
        timeout: probe_timeout(config.timeout, config.retries),
    }
}

/// Bounds a whole probe so that every resolver attempt gets its full per-attempt timeout.
pub fn probe_timeout(timeout: Duration, retries: usize) -> Duration {
    let attempts = u32::try_from(retries.max(1)).unwrap_or(u32::MAX);
    timeout.saturating_mul(attempts).saturating_add(PROBE_TIMEOUT_SLACK)
}
