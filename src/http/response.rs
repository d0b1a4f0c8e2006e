//! Response rendering.
//!
//! Canned responses are written as configured: headers, then status, then
//! the body bytes verbatim. No content type is inferred.

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::routing::table::{CannedResponse, Dispatch};

impl IntoResponse for &CannedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body.clone()));
        *response.headers_mut() = self.headers.clone();
        *response.status_mut() = self.status;
        response
    }
}

impl IntoResponse for Dispatch<'_> {
    fn into_response(self) -> Response {
        match self {
            Dispatch::Matched(canned) => canned.into_response(),
            Dispatch::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED.into_response(),
            Dispatch::NotFound => (StatusCode::NOT_FOUND, "404 page not found\n").into_response(),
        }
    }
}
