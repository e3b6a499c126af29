//! A handler answering every request with a redirect to a fixed location.

use http::StatusCode;

use crate::handler::{BoxHttpError, Handler};
use crate::request::Request;
use crate::response::Response;

/// Fixed-location redirect handler.
///
/// The redirect injector binds temporary redirects to the synthesized
/// slash-variant routes; both flavors are also usable directly as ordinary
/// handlers.
#[derive(Debug, Clone)]
pub struct Redirect {
    location: String,
    status: StatusCode,
}

impl Redirect {
    /// 307: retry this request, same method, at `to`.
    #[must_use]
    pub fn temporary(to: impl Into<String>) -> Self {
        Self {
            location: to.into(),
            status: StatusCode::TEMPORARY_REDIRECT,
        }
    }

    /// 308: this resource has moved to `to` for good.
    #[must_use]
    pub fn permanent(to: impl Into<String>) -> Self {
        Self {
            location: to.into(),
            status: StatusCode::PERMANENT_REDIRECT,
        }
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl Handler for Redirect {
    fn serve(&self, _req: &mut Request) -> Result<Response, BoxHttpError> {
        Ok(Response::redirect(self.status, &self.location))
    }
}
