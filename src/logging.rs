//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::{request, response},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::Error;

/// The number of characters of a message body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body_text) = match request_text(request).await {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };
    log_request(&parts, &body_text);

    let request = Request::from_parts(parts, Body::from(body_text));
    let response = next.run(request).await;

    let (parts, body_text) = match response_text(response).await {
        Ok(response) => response,
        Err(error) => return error.into_response(),
    };
    log_response(&parts, &body_text);

    Response::from_parts(parts, Body::from(body_text))
}

async fn request_text(request: Request) -> Result<(request::Parts, String), Error> {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|error| Error::BodyRead(error.to_string()))?;

    Ok((parts, String::from_utf8_lossy(&bytes).to_string()))
}

async fn response_text(response: Response) -> Result<(response::Parts, String), Error> {
    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|error| Error::BodyRead(error.to_string()))?;

    Ok((parts, String::from_utf8_lossy(&bytes).to_string()))
}

/// The first [LOG_BODY_LENGTH_LIMIT] characters of `body`, or `None` if `body` is short enough to log in full.
fn truncate(body: &str) -> Option<&str> {
    body.char_indices()
        .nth(LOG_BODY_LENGTH_LIMIT)
        .map(|(end, _)| &body[..end])
}

fn log_request(parts: &request::Parts, body: &str) {
    match truncate(body) {
        Some(start) => {
            tracing::info!(
                "Received request: {} {}\nbody: {start}...",
                parts.method,
                parts.uri
            );
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!(
            "Received request: {} {}\nbody: {body:?}",
            parts.method,
            parts.uri
        ),
    }
}

fn log_response(parts: &response::Parts, body: &str) {
    match truncate(body) {
        Some(start) => {
            tracing::info!("Sending response: {}\nbody: {start}...", parts.status);
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response: {}\nbody: {body:?}", parts.status),
    }
}
