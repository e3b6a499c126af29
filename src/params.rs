//! Typed access to the path fields captured by a matched route.

use std::collections::HashMap;
use std::sync::Arc;

use http::StatusCode;
use thiserror::Error;

use crate::handler::HttpError;
use crate::route::Route;

/// A path parameter lookup or coercion failure.
///
/// Coercion failures are ordinary request-time conditions (the capture text
/// came from the URL) and translate to 422. An [`Unknown`](Self::Unknown)
/// field is different: the handler asked for a name its own route pattern
/// does not bind, which is a programming error and translates to 500.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// The matched route pattern binds no field under the requested name.
    #[error("route pattern {pattern:?} does not bind a field named {field:?}")]
    Unknown {
        /// Canonical pattern of the matched route.
        pattern: String,
        /// The requested field name.
        field: String,
    },

    /// The capture does not parse as an integer.
    #[error("field {field:?} value {value:?} is not an integer")]
    NotInteger { field: String, value: String },

    /// The capture parses as an integer but is negative.
    #[error("field {field:?} value {value:?} is not an unsigned integer")]
    NotUnsigned { field: String, value: String },

    /// The capture parses as an integer but is not a one-based page number.
    #[error("field {field:?} value {value:?} is not a page number")]
    NotPage { field: String, value: String },
}

impl HttpError for ParamError {
    fn status_code(&self) -> StatusCode {
        match self {
            ParamError::Unknown { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// Name→value view over the fields captured by a matched route.
///
/// Built by zipping the route's field names, in pattern order, with the
/// captured values. An unnamed catch-all capture is positional only and
/// does not appear here; it remains reachable through
/// [`RoutingContext::captures`](crate::request::RoutingContext::captures).
#[derive(Debug, Clone)]
pub struct PathParams {
    route: Arc<Route>,
    bindings: HashMap<String, String>,
}

impl PathParams {
    pub(crate) fn new(route: Arc<Route>, captures: &[String]) -> Self {
        let bindings = route
            .fields()
            .iter()
            .zip(captures)
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        Self { route, bindings }
    }

    /// The route these fields were captured for.
    #[must_use]
    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    /// Raw field lookup.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.bindings.get(field).map(String::as_str)
    }

    /// Field lookup that treats absence as an error.
    pub fn str_field(&self, field: &str) -> Result<&str, ParamError> {
        self.get(field).ok_or_else(|| ParamError::Unknown {
            pattern: self.route.to_string(),
            field: field.to_string(),
        })
    }

    /// Signed integer coercion.
    pub fn int(&self, field: &str) -> Result<i64, ParamError> {
        let raw = self.str_field(field)?;
        raw.parse::<i64>().map_err(|_| ParamError::NotInteger {
            field: field.to_string(),
            value: raw.to_string(),
        })
    }

    /// Unsigned integer coercion. A parseable negative number reports
    /// [`ParamError::NotUnsigned`] rather than `NotInteger`.
    pub fn uint(&self, field: &str) -> Result<u64, ParamError> {
        let raw = self.str_field(field)?;
        let value = raw.parse::<i64>().map_err(|_| ParamError::NotInteger {
            field: field.to_string(),
            value: raw.to_string(),
        })?;
        u64::try_from(value).map_err(|_| ParamError::NotUnsigned {
            field: field.to_string(),
            value: raw.to_string(),
        })
    }

    /// One-based page number coercion: an integer that is at least 1.
    pub fn page(&self, field: &str) -> Result<i64, ParamError> {
        let raw = self.str_field(field)?;
        let value = raw.parse::<i64>().map_err(|_| ParamError::NotInteger {
            field: field.to_string(),
            value: raw.to_string(),
        })?;
        if value < 1 {
            return Err(ParamError::NotPage {
                field: field.to_string(),
                value: raw.to_string(),
            });
        }
        Ok(value)
    }

    /// Number of bound fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
