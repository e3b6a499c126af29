//! Method-based sub-multiplexing: one handler slot per HTTP verb.

use std::fmt;

use http::{Method, StatusCode};
use thiserror::Error;

use crate::errors::RouteError;
use crate::handler::{BoxHttpError, Handler, HttpError};
use crate::request::Request;
use crate::response::Response;

/// The request used a verb this mux has no handler for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("method not allowed: {method}")]
pub struct MethodNotAllowed {
    /// The rejected verb.
    pub method: Method,
}

impl HttpError for MethodNotAllowed {
    fn status_code(&self) -> StatusCode {
        StatusCode::METHOD_NOT_ALLOWED
    }
}

/// Dispatches on the request method.
///
/// GET handlers also serve HEAD. OPTIONS is answered directly with the
/// accumulated `Allow` set. Everything else without a slot is a 405.
pub struct MethodMux {
    get: Option<Box<dyn Handler>>,
    post: Option<Box<dyn Handler>>,
    put: Option<Box<dyn Handler>>,
    patch: Option<Box<dyn Handler>>,
    delete: Option<Box<dyn Handler>>,
    allowed: String,
}

impl MethodMux {
    #[must_use]
    pub fn builder() -> MethodMuxBuilder {
        MethodMuxBuilder {
            registrations: Vec::new(),
        }
    }

    /// The `Allow` header value reported to OPTIONS requests.
    #[must_use]
    pub fn allowed(&self) -> &str {
        &self.allowed
    }
}

impl fmt::Debug for MethodMux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodMux")
            .field("allowed", &self.allowed)
            .finish_non_exhaustive()
    }
}

impl Handler for MethodMux {
    fn serve(&self, req: &mut Request) -> Result<Response, BoxHttpError> {
        let method = req.method().clone();
        if method == Method::OPTIONS {
            let mut response = Response::empty(StatusCode::OK);
            response.set_header("allow", self.allowed.clone());
            return Ok(response);
        }
        let slot = if method == Method::GET || method == Method::HEAD {
            self.get.as_ref()
        } else if method == Method::POST {
            self.post.as_ref()
        } else if method == Method::PUT {
            self.put.as_ref()
        } else if method == Method::PATCH {
            self.patch.as_ref()
        } else if method == Method::DELETE {
            self.delete.as_ref()
        } else {
            None
        };
        match slot {
            Some(handler) => handler.serve(req),
            None => Err(Box::new(MethodNotAllowed { method })),
        }
    }
}

/// Builder for a [`MethodMux`]. Assigning the same verb twice is a
/// registration error reported by [`build`](Self::build).
pub struct MethodMuxBuilder {
    registrations: Vec<(Method, Box<dyn Handler>)>,
}

impl MethodMuxBuilder {
    #[must_use]
    pub fn get(self, handler: impl Handler + 'static) -> Self {
        self.register(Method::GET, handler)
    }

    #[must_use]
    pub fn post(self, handler: impl Handler + 'static) -> Self {
        self.register(Method::POST, handler)
    }

    #[must_use]
    pub fn put(self, handler: impl Handler + 'static) -> Self {
        self.register(Method::PUT, handler)
    }

    #[must_use]
    pub fn patch(self, handler: impl Handler + 'static) -> Self {
        self.register(Method::PATCH, handler)
    }

    #[must_use]
    pub fn delete(self, handler: impl Handler + 'static) -> Self {
        self.register(Method::DELETE, handler)
    }

    fn register(mut self, method: Method, handler: impl Handler + 'static) -> Self {
        self.registrations.push((method, Box::new(handler)));
        self
    }

    pub fn build(self) -> Result<MethodMux, RouteError> {
        let mut mux = MethodMux {
            get: None,
            post: None,
            put: None,
            patch: None,
            delete: None,
            allowed: Method::OPTIONS.to_string(),
        };
        for (method, handler) in self.registrations {
            let slot = if method == Method::GET {
                &mut mux.get
            } else if method == Method::POST {
                &mut mux.post
            } else if method == Method::PUT {
                &mut mux.put
            } else if method == Method::PATCH {
                &mut mux.patch
            } else {
                &mut mux.delete
            };
            if slot.is_some() {
                return Err(RouteError::DuplicateMethodHandler { method });
            }
            if method == Method::GET {
                mux.allowed.push_str(",GET,HEAD");
            } else {
                mux.allowed.push(',');
                mux.allowed.push_str(method.as_str());
            }
            *slot = Some(handler);
        }
        Ok(mux)
    }
}
