//! The handler contract.
//!
//! A handler takes the parsed request and yields either a [`Response`] or a
//! typed error carrying an HTTP status code. Plain functions and closures
//! with the right signature are handlers; so are [`Mux`](crate::router::Mux),
//! [`MethodMux`](crate::method::MethodMux) and
//! [`HostMux`](crate::host::HostMux), which is what lets them nest.

use http::StatusCode;

use crate::request::Request;
use crate::response::Response;

/// An error that knows the HTTP status it should surface as.
///
/// Request-time conditions ([`NotFound`](crate::errors::NotFound), parameter
/// coercion failures, …) implement this so the serving boundary can
/// translate them uniformly; see [`error_response`].
pub trait HttpError: std::error::Error + Send + Sync {
    /// The status code this error translates to at the boundary.
    fn status_code(&self) -> StatusCode;
}

/// A boxed [`HttpError`], the error half of every handler result.
pub type BoxHttpError = Box<dyn HttpError>;

impl<E: HttpError + 'static> From<E> for BoxHttpError {
    fn from(error: E) -> Self {
        Box::new(error)
    }
}

/// A request handler.
pub trait Handler: Send + Sync {
    /// Handle one request.
    fn serve(&self, req: &mut Request) -> Result<Response, BoxHttpError>;
}

impl<F> Handler for F
where
    F: Fn(&mut Request) -> Result<Response, BoxHttpError> + Send + Sync,
{
    fn serve(&self, req: &mut Request) -> Result<Response, BoxHttpError> {
        self(req)
    }
}

/// Translate a handler error into a response at the serving boundary.
#[must_use]
pub fn error_response(error: &dyn HttpError) -> Response {
    Response::error(error.status_code(), &error.to_string())
}
