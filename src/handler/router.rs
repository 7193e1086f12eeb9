//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for route
//! matching, method validation, and dispatching.

use crate::config::{AppState, HealthConfig};
use crate::handler::{greeting, pages, travellers};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, SERVER, USER_AGENT};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Known endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    Hello,
    Travellers,
    Liveness,
    Readiness,
}

impl Route {
    /// Match a request path against the fixed routes and health probes
    pub fn resolve(path: &str, health: &HealthConfig) -> Option<Self> {
        match path {
            "/" => Some(Self::Index),
            "/hello" => Some(Self::Hello),
            "/travellers" => Some(Self::Travellers),
            p if health.enabled && p == health.liveness_path => Some(Self::Liveness),
            p if health.enabled && p == health.readiness_path => Some(Self::Readiness),
            _ => None,
        }
    }

    /// Value of the `Allow` header
    pub const fn allow(self) -> &'static str {
        match self {
            Self::Travellers => "PUT, POST, OPTIONS",
            _ => "GET, HEAD, OPTIONS",
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let access_log = state.config.logging.access_log;
    let mut entry = access_log.then(|| access_entry(&req, remote_addr));

    let route = Route::resolve(req.uri().path(), &state.config.health);
    let mut response = dispatch(req, route, &state).await;

    if let Ok(server_name) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server_name);
    }

    if let Some(entry) = entry.as_mut() {
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(response.body().size_hint().lower()).unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

async fn dispatch<B>(req: Request<B>, route: Option<Route>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let Some(route) = route else {
        return http::build_404_response();
    };
    let method = req.method().clone();
    let is_head = method == Method::HEAD;

    match (route, method) {
        (_, Method::OPTIONS) => {
            http::build_options_response(route.allow(), state.config.http.enable_cors)
        }
        (Route::Index, Method::GET | Method::HEAD) => {
            http::build_html_response(pages::render_index(), is_head)
        }
        (Route::Hello, Method::GET | Method::HEAD) => {
            greeting::handle_greeting(req.uri().query(), is_head)
        }
        (Route::Travellers, Method::PUT | Method::POST) => {
            travellers::handle_travellers(req, state).await
        }
        (Route::Liveness | Route::Readiness, Method::GET | Method::HEAD) => {
            http::build_health_response("ok", is_head)
        }
        (_, method) => {
            logger::log_warning(&format!("Method not allowed: {method} {}", req.uri().path()));
            http::build_405_response(route.allow())
        }
    }
}

fn access_entry<B>(req: &Request<B>, remote_addr: SocketAddr) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        remote_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = format!("{:?}", req.version())
        .trim_start_matches("HTTP/")
        .to_string();
    entry.user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry
}
