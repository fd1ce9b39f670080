//! Per-request logging and HTTP metrics.
//!
//! Every line carries the endpoint label used by the metrics, and chat
//! requests also log which link of the reply chain answered.

use super::super::{server::degraded_response, state::ServerState};
use crate::chat::ReplySource;
use crate::server::metrics::{categorize_endpoint, record_error, record_http_request};
use axum::extract::State;
use axum::{
    body::{Body, Bytes},
    http::{header::HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::{error, info};

#[derive(PartialEq, PartialOrd, Clone, Debug, Default, clap::ValueEnum)]
pub enum RequestsLoggingLevel {
    None,
    #[default]
    Path,
    Headers,
    Body,
}

impl std::fmt::Display for RequestsLoggingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Chat messages and playlist bodies are short, anything larger is summarized.
const MAX_LOGGABLE_BODY_LENGTH: usize = 1024;

#[derive(Clone, Copy)]
enum Direction {
    Req,
    Resp,
}

impl Direction {
    fn label(self) -> &'static str {
        match self {
            Direction::Req => "Req",
            Direction::Resp => "Resp",
        }
    }
}

fn content_length(headers: &HeaderMap) -> Result<usize, &'static str> {
    let value = headers
        .get("content-length")
        .ok_or("Content-length not set.")?;
    value
        .to_str()
        .map_err(|_| "Could not get Content-length string value.")?
        .parse::<usize>()
        .map_err(|_| "Could not parse Content-length numeric value.")
}

fn log_headers(endpoint: &str, direction: Direction, headers: &HeaderMap) {
    info!(endpoint, "  {} Headers:", direction.label());
    for (name, value) in headers.iter() {
        info!(endpoint, "    {:?}: {:?}", name, value);
    }
}

enum BodyLog {
    /// Body was read and logged, hand these bytes on.
    Buffered(Bytes),
    /// Body was left alone (unknown or oversized length).
    Untouched(Body),
    /// Reading the body failed.
    Failed,
}

async fn log_body(
    endpoint: &str,
    direction: Direction,
    headers: &HeaderMap,
    body: Body,
) -> BodyLog {
    let size = match content_length(headers) {
        Ok(size) => size,
        Err(reason) => {
            info!(endpoint, "  {} Body: {}", direction.label(), reason);
            return BodyLog::Untouched(body);
        }
    };
    if size >= MAX_LOGGABLE_BODY_LENGTH {
        info!(
            endpoint,
            "  {} Body: Too big to log ({:#})",
            direction.label(),
            byte_unit::Byte::from(size)
        );
        return BodyLog::Untouched(body);
    }

    match axum::body::to_bytes(body, size).await {
        Ok(bytes) => {
            info!(
                endpoint,
                "  {} Body:\n{}",
                direction.label(),
                String::from_utf8_lossy(&bytes)
            );
            BodyLog::Buffered(bytes)
        }
        Err(err) => {
            error!(endpoint, "Failed to read {} body: {:?}", direction.label(), err);
            BodyLog::Failed
        }
    }
}

/// Answers with the endpoint's own failure payload so `/get` and `/forward/`
/// stay on HTTP 200; other endpoints get a bare 500.
fn body_read_failure(state: &ServerState, path: &str) -> Response {
    record_error("body_read", path);
    degraded_response(state, path)
        .unwrap_or_else(|| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

pub async fn log_requests(
    State(state): State<ServerState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let level = state.config.requests_logging_level.clone();
    let start = Instant::now();

    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let endpoint = categorize_endpoint(&path);

    if level > RequestsLoggingLevel::None {
        info!(endpoint, ">>> {} {}", method, request.uri());
    }
    if level >= RequestsLoggingLevel::Headers {
        log_headers(endpoint, Direction::Req, request.headers());
    }

    let request = if level >= RequestsLoggingLevel::Body {
        let (parts, body) = request.into_parts();
        match log_body(endpoint, Direction::Req, &parts.headers, body).await {
            BodyLog::Buffered(bytes) => Request::from_parts(parts, Body::from(bytes)),
            BodyLog::Untouched(body) => Request::from_parts(parts, body),
            // The handler sees an empty body and answers with its failure payload
            BodyLog::Failed => Request::from_parts(parts, Body::empty()),
        }
    } else {
        request
    };

    let mut response = next.run(request).await;

    if level >= RequestsLoggingLevel::Headers {
        log_headers(endpoint, Direction::Resp, response.headers());
    }
    if level >= RequestsLoggingLevel::Body {
        let (parts, body) = response.into_parts();
        response = match log_body(endpoint, Direction::Resp, &parts.headers, body).await {
            BodyLog::Buffered(bytes) => Response::from_parts(parts, Body::from(bytes)),
            BodyLog::Untouched(body) => Response::from_parts(parts, body),
            BodyLog::Failed => body_read_failure(&state, &path),
        };
    }

    let status = response.status().as_u16();
    let duration = start.elapsed();

    if level > RequestsLoggingLevel::None {
        match response.extensions().get::<ReplySource>() {
            Some(source) => info!(
                endpoint,
                source = source.as_str(),
                "<<< {} ({}ms)",
                status,
                duration.as_millis()
            ),
            None => info!(endpoint, "<<< {} ({}ms)", status, duration.as_millis()),
        }
    }

    record_http_request(&method, &path, status, duration);

    response
}
