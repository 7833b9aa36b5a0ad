// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::net::IpAddr;

use hickory_resolver::lookup_ip::LookupIp;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::ProtoErrorKind;
use hickory_resolver::ResolveError;
use serde::Serialize;
use smallvec::SmallVec;
use tracing::debug;

use crate::resolver::Error;

pub type Addresses = SmallVec<[IpAddr; 4]>;

/// Tri-state answer of an address lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LookupResult {
    /// The name exists and has at least one address.
    Response(Addresses),
    /// The name does not exist or has no addresses.
    NxDomain,
    Error(Error),
}

impl LookupResult {
    pub fn is_response(&self) -> bool {
        matches!(self, LookupResult::Response { .. })
    }

    pub fn is_nxdomain(&self) -> bool {
        matches!(self, LookupResult::NxDomain)
    }

    pub fn is_err(&self) -> bool {
        matches!(self, LookupResult::Error { .. })
    }

    pub fn response(&self) -> Option<&Addresses> {
        match self {
            LookupResult::Response(ref response) => Some(response),
            _ => None,
        }
    }
}

impl From<Vec<IpAddr>> for LookupResult {
    fn from(addresses: Vec<IpAddr>) -> Self {
        if addresses.is_empty() {
            LookupResult::NxDomain
        } else {
            LookupResult::Response(addresses.into())
        }
    }
}

impl From<Error> for LookupResult {
    fn from(error: Error) -> Self {
        LookupResult::Error(error)
    }
}

#[doc(hidden)]
pub(crate) trait IntoLookupResult {
    fn into_lookup_result(self) -> LookupResult;
}

#[doc(hidden)]
impl IntoLookupResult for std::result::Result<LookupIp, ResolveError> {
    fn into_lookup_result(self) -> LookupResult {
        match self {
            Ok(lookup) => lookup.iter().collect::<Vec<_>>().into(),
            Err(err) if is_negative_answer(&err) => LookupResult::NxDomain,
            Err(err) => {
                let err = Error::from(err);
                debug!("Lookup error: {}", &err);
                LookupResult::Error(err)
            }
        }
    }
}

/// Only NXDOMAIN and empty NOERROR answers count as "no such record"; a SERVFAIL or REFUSED
/// without records is a failed query.
fn is_negative_answer(err: &ResolveError) -> bool {
    match err.proto().map(|x| x.kind()) {
        Some(ProtoErrorKind::NoRecordsFound { response_code, .. }) => {
            matches!(response_code, ResponseCode::NXDomain | ResponseCode::NoError)
        }
        _ => false,
    }
}
