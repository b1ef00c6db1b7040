//! Per-request logging and HTTP metrics.

use super::super::metrics::record_http_request;
use super::super::state::ServerState;
use axum::extract::{MatchedPath, State};
use axum::{
    body::Body,
    http::{header::CONTENT_LENGTH, HeaderMap, Request, StatusCode},
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

const MAX_LOGGABLE_BODY_LENGTH: usize = 1024;

/// Label for requests that did not match any route.
const UNMATCHED_PATH: &str = "unmatched";

fn content_length(headers: &HeaderMap) -> Result<usize, &'static str> {
    let value = headers
        .get(CONTENT_LENGTH)
        .ok_or("content-length not set")?;
    value
        .to_str()
        .ok()
        .and_then(|value| value.parse().ok())
        .ok_or("content-length unreadable")
}

fn log_headers(direction: &str, headers: &HeaderMap) {
    info!("  {} headers:", direction);
    for (name, value) in headers {
        info!("    {:?}: {:?}", name, value);
    }
}

/// Prints `body` when it is small enough and hands back an equivalent body.
async fn log_body(direction: &str, headers: &HeaderMap, body: Body) -> Result<Body, axum::Error> {
    match content_length(headers) {
        Err(reason) => {
            info!("  {} body: {}", direction, reason);
            Ok(body)
        }
        Ok(size) if size >= MAX_LOGGABLE_BODY_LENGTH => {
            info!(
                "  {} body: too big to log ({:#})",
                direction,
                byte_unit::Byte::from(size)
            );
            Ok(body)
        }
        Ok(size) => {
            let bytes = axum::body::to_bytes(body, size).await?;
            info!("  {} body:\n{}", direction, String::from_utf8_lossy(&bytes));
            Ok(Body::from(bytes))
        }
    }
}

pub async fn log_requests(
    State(state): State<ServerState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let level = &state.config.requests_logging_level;
    let start = Instant::now();

    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_PATH.to_owned());

    if *level > RequestsLoggingLevel::None {
        info!(">>> {} {}", method, request.uri());
    }
    if *level >= RequestsLoggingLevel::Headers {
        log_headers("Req", request.headers());
    }

    let request = if *level >= RequestsLoggingLevel::Body {
        let (parts, body) = request.into_parts();
        match log_body("Req", &parts.headers, body).await {
            Ok(body) => Request::from_parts(parts, body),
            Err(err) => {
                error!("Failed to read request body: {}", err);
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }
    } else {
        request
    };

    let mut response = next.run(request).await;

    if *level >= RequestsLoggingLevel::Headers {
        log_headers("Resp", response.headers());
    }
    if *level >= RequestsLoggingLevel::Body {
        let (parts, body) = response.into_parts();
        response = match log_body("Resp", &parts.headers, body).await {
            Ok(body) => Response::from_parts(parts, body),
            Err(err) => {
                error!("Failed to read response body: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        };
    }

    let status = response.status().as_u16();
    let elapsed = start.elapsed();
    if *level > RequestsLoggingLevel::None {
        info!("<<< {} ({}ms)", status, elapsed.as_millis());
    }
    record_http_request(method.as_str(), &route, status, elapsed);

    response
}
