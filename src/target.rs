// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::resolver::{IpLookup, LookupResult};
use crate::{Error, Result};

/// The address to scan together with the input it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    input: String,
    address: IpAddr,
}

impl Target {
    pub fn new<T: Into<String>>(input: T, address: IpAddr) -> Target {
        Target {
            input: input.into(),
            address,
        }
    }

    pub fn from_ip(address: IpAddr) -> Target {
        Target::new(address.to_string(), address)
    }

    /// Turns user input into a `Target`.
    ///
    /// IP addresses are used as they are. Host names are resolved using `resolver` and the first
    /// returned address is chosen; use `resolve_all` to get all of them.
    pub async fn resolve(input: &str, resolver: &dyn IpLookup) -> Result<Target> {
        Target::resolve_all(input, resolver)
            .await?
            .into_iter()
            .next()
            .ok_or(Error::InternalError {
                msg: "resolution succeeded without addresses",
            })
    }

    /// Turns user input into one `Target` per address, in resolver order.
    pub async fn resolve_all(input: &str, resolver: &dyn IpLookup) -> Result<Vec<Target>> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::ResolutionError {
                name: input.to_string(),
                reason: "it is empty".to_string(),
            });
        }

        if let Ok(address) = IpAddr::from_str(input) {
            return Ok(vec![Target::new(input, address)]);
        }

        debug!("Resolving '{}' using {}.", input, resolver.name());
        match resolver.lookup_ip(input).await {
            LookupResult::Response(addresses) if !addresses.is_empty() => {
                Ok(addresses.into_iter().map(|x| Target::new(input, x)).collect())
            }
            LookupResult::Response(_) | LookupResult::NxDomain => Err(Error::ResolutionError {
                name: input.to_string(),
                reason: "no addresses have been found".to_string(),
            }),
            LookupResult::Error(err) => Err(Error::ResolutionError {
                name: input.to_string(),
                reason: err.to_string(),
            }),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    /// True if the input has been an IP address rather than a host name.
    pub fn is_literal(&self) -> bool {
        IpAddr::from_str(&self.input).is_ok()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_literal() {
            write!(f, "{}", self.address)
        } else {
            write!(f, "{} ({})", self.input, self.address)
        }
    }
}
