use actix_web::{dev::Payload, http::header::HeaderMap, FromRequest, HttpRequest};
use futures::future::{ready, Ready};

use crate::app::AppError;

/// Header the upstream auth layer sets to the authenticated user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user a request acts on behalf of.
///
/// Session validation happens upstream; this extractor only reads the
/// resolved id. A missing or malformed header is a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub i32);

impl Caller {
    pub fn id(&self) -> i32 {
        self.0
    }

    fn from_headers(headers: &HeaderMap) -> Result<Caller, AppError> {
        headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i32>().ok())
            .filter(|id| *id > 0)
            .map(Caller)
            .ok_or(AppError::Validation("Invalid user ID"))
    }
}

impl FromRequest for Caller {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Caller::from_headers(req.headers()))
    }
}
