//! Per-request correlation ids.
//!
//! Catalog errors carry the id in their JSON body, so a client report can be
//! matched to the server log line for the same lookup.

use axum::http::{HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Tag the request with a caller-supplied or fresh id.
///
/// The handler future runs inside a `request` span carrying the id, and
/// the id is copied onto the response whether the lookup succeeded or not.
pub async fn request_id_middleware(
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let id = incoming_id(&request).unwrap_or_else(|| Uuid::new_v4().to_string());
    request.extensions_mut().insert(RequestId(id.clone()));

    let span = tracing::info_span!("request", request_id = %id);
    let mut response = next.run(request).instrument(span).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(X_REQUEST_ID.clone(), val);
    }
    response
}

/// A usable id from the caller: printable and non-empty.
fn incoming_id<B>(request: &Request<B>) -> Option<String> {
    request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Id of the current request, read by catalog handlers to stamp error bodies.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);
