//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. The canonical-host redirect
//! check runs before any routing; requests that no redirect rule matches
//! proceed to the normal routes (health probes, then 404).

use crate::config::{AppState, RoutesConfig};
use crate::http;
use crate::logger;
use crate::logger::AccessLogEntry;
use crate::redirect;
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{header, Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let response = dispatch(&req, &state);

    if state.config.logging.access_log {
        let entry = build_access_entry(&req, peer_addr, &response, &started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Process a request through the pre-routing hook and the route table
fn dispatch<B>(req: &Request<B>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    // 1. Check HTTP method
    if let Some(resp) = check_http_method(req.method(), state.config.http.enable_cors) {
        return resp;
    }

    // 2. Check body size
    if let Some(resp) = check_body_size(req, state.config.http.max_body_size) {
        return resp;
    }

    // 3. Log headers if enabled
    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    // 4. Canonical-host enforcement, before any routing
    if let Some(location) = check_canonical_host(req, state) {
        return http::build_301_response(&location);
    }

    // 5. Normal routing
    route_request(req.uri().path(), &state.config.routes)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get(header::CONTENT_LENGTH)?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Run the redirect rules against the request's host.
///
/// The host comes from the Host header (absolute-form URIs as fallback);
/// the scheme from X-Forwarded-Proto when the PaaS proxy sets it,
/// otherwise from configuration. Requests without a usable host fall
/// through with no redirect.
fn check_canonical_host<B>(req: &Request<B>, state: &Arc<AppState>) -> Option<String> {
    let authority = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| req.uri().authority().map(hyper::http::uri::Authority::as_str))?;

    let scheme = req
        .headers()
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or(state.config.redirect.default_scheme.as_str());

    let path_and_query = req.uri().path_and_query().map_or("/", |pq| pq.as_str());

    let location = redirect::redirect_location(&state.rules, authority, scheme, path_and_query)?;
    logger::log_redirect(authority, &location);
    Some(location)
}

/// Route request based on path and configuration
fn route_request(path: &str, routes: &RoutesConfig) -> Response<Full<Bytes>> {
    // Health check endpoints (highest priority, always fast)
    if routes.health.enabled {
        if path == routes.health.liveness_path {
            return http::build_health_response("ok");
        }
        if path == routes.health.readiness_path {
            return http::build_health_response("ok");
        }
    }

    // This server only enforces canonical hosts; everything else is unknown
    http::build_404_response()
}

/// Fill an access log entry from the request/response pair
fn build_access_entry(
    req: &Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    response: &Response<Full<Bytes>>,
    started: &Instant,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = match req.version() {
        Version::HTTP_10 => "1.0".to_string(),
        Version::HTTP_2 => "2".to_string(),
        _ => "1.1".to_string(),
    };
    entry.status = response.status().as_u16();
    entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
        .unwrap_or(usize::MAX);
    entry.referer = req
        .headers()
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry.user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}
