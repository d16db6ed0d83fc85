//! Request ID middleware for correlating logs with requests.
//!
//! Takes the correlation id from the inbound `X-Request-ID` header, or generates
//! a UUID v4 when the header is absent, empty or not UTF-8, and creates a tracing span that
//! wraps the entire request lifecycle. Exactly one `request_started` and one
//! `request_completed` record are emitted per request on the
//! `lg_deploy::request` target, and the id is echoed in the response header.
//!
//! A panicking handler is caught here and turned into a `500` response, so the
//! completion record and the response header are produced on that path too.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use axum::{
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures::FutureExt;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{REQUEST_ID_HEADER, REQUEST_LOG_TARGET};
use crate::error::AppError;

/// Correlation identifier for one in-flight request.
///
/// Inserted into request extensions by [`request_id_layer`]; handlers take it
/// as an extractor argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// A fresh, random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The caller-supplied identifier, if the header is present, non-empty and
    /// valid UTF-8. Non-ASCII text is kept verbatim.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
            .filter(|value| !value.is_empty())
            .map(|value| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestId>()
            .cloned()
            .ok_or_else(|| AppError::Internal("request id middleware not installed".to_string()))
    }
}

/// Middleware that assigns a request ID, logs start and completion, and
/// stamps the ID on the response.
///
/// This should be the outermost middleware layer so the span wraps
/// all request processing, including other middleware and handlers.
pub async fn request_id_layer(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_headers(request.headers()).unwrap_or_else(RequestId::generate);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    request.extensions_mut().insert(request_id.clone());

    async move {
        tracing::info!(
            target: REQUEST_LOG_TARGET,
            request_id = %request_id,
            method = %method,
            path = %path,
            "request_started"
        );

        let start = Instant::now();
        let mut response = match AssertUnwindSafe(next.run(request)).catch_unwind().await {
            Ok(response) => response,
            Err(panic) => {
                let detail = panic_message(panic.as_ref());
                tracing::error!(
                    target: REQUEST_LOG_TARGET,
                    request_id = %request_id,
                    panic = %detail,
                    "Handler panicked"
                );
                AppError::HandlerPanicked(detail).into_response()
            }
        };
        let duration_ms = start.elapsed().as_millis() as u64;
        let status_code = response.status().as_u16();

        if response.status().is_server_error() {
            tracing::warn!(
                target: REQUEST_LOG_TARGET,
                request_id = %request_id,
                method = %method,
                path = %path,
                status_code,
                duration_ms,
                "request_completed"
            );
        } else {
            tracing::info!(
                target: REQUEST_LOG_TARGET,
                request_id = %request_id,
                method = %method,
                path = %path,
                status_code,
                duration_ms,
                "request_completed"
            );
        }

        if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        response
    }
    .instrument(span)
    .await
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
