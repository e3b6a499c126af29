//! Host-based sub-multiplexing.
//!
//! Routes a request to an inner handler by its `Host` header (port
//! stripped). Like the routing tree's static children, the lookup is a
//! linear scan for a few hosts and a hash map past the same cutoff — the
//! form is chosen once at build time from the registration count.

use std::collections::HashMap;
use std::fmt;

use http::StatusCode;
use thiserror::Error;

use crate::errors::RouteError;
use crate::handler::{BoxHttpError, Handler, HttpError};
use crate::request::Request;
use crate::response::Response;

/// Host count at which list lookup gives way to a map.
const HOST_MAP_THRESHOLD: usize = 8;

/// The request carried a host nothing is registered for.
///
/// Displays as a bare not-found; the offending host rides along for
/// logging, not for echoing back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not found")]
pub struct UnknownHost {
    /// The unmatched host name.
    pub host: String,
}

impl HttpError for UnknownHost {
    fn status_code(&self) -> StatusCode {
        StatusCode::NOT_FOUND
    }
}

enum HostLookup {
    List(Vec<(String, Box<dyn Handler>)>),
    Map(HashMap<String, Box<dyn Handler>>),
}

/// Multiplexes on the request `Host` header.
pub struct HostMux {
    lookup: HostLookup,
}

impl HostMux {
    #[must_use]
    pub fn builder() -> HostMuxBuilder {
        HostMuxBuilder {
            registrations: Vec::new(),
        }
    }
}

impl fmt::Debug for HostMux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hosts = match &self.lookup {
            HostLookup::List(entries) => entries.len(),
            HostLookup::Map(entries) => entries.len(),
        };
        f.debug_struct("HostMux")
            .field("hosts", &hosts)
            .finish_non_exhaustive()
    }
}

impl Handler for HostMux {
    fn serve(&self, req: &mut Request) -> Result<Response, BoxHttpError> {
        let host = req.host().unwrap_or_default().to_string();
        let handler = match &self.lookup {
            HostLookup::List(entries) => entries
                .iter()
                .find(|(name, _)| *name == host)
                .map(|(_, handler)| handler),
            HostLookup::Map(entries) => entries.get(&host),
        };
        match handler {
            Some(handler) => handler.serve(req),
            None => Err(Box::new(UnknownHost { host })),
        }
    }
}

/// Builder for a [`HostMux`]. Hosts must be unique and non-empty, and at
/// least one must be registered.
pub struct HostMuxBuilder {
    registrations: Vec<(String, Box<dyn Handler>)>,
}

impl HostMuxBuilder {
    #[must_use]
    pub fn host(mut self, host: impl Into<String>, handler: impl Handler + 'static) -> Self {
        self.registrations.push((host.into(), Box::new(handler)));
        self
    }

    pub fn build(self) -> Result<HostMux, RouteError> {
        if self.registrations.is_empty() {
            return Err(RouteError::EmptyHostList);
        }
        for (index, (host, _)) in self.registrations.iter().enumerate() {
            if host.is_empty() {
                return Err(RouteError::EmptyHostName);
            }
            if self.registrations[..index]
                .iter()
                .any(|(known, _)| known == host)
            {
                return Err(RouteError::DuplicateHostHandler { host: host.clone() });
            }
        }
        let lookup = if self.registrations.len() >= HOST_MAP_THRESHOLD {
            HostLookup::Map(self.registrations.into_iter().collect())
        } else {
            HostLookup::List(self.registrations)
        };
        Ok(HostMux { lookup })
    }
}
