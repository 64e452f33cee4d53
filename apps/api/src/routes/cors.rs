//! CORS with an explicit origin allow-list.
//!
//! Unlisted origins receive the primary production origin rather than no
//! header, so browsers reject them while the response shape stays uniform.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::Config;
use crate::state::AppState;

const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
const MAX_AGE_SECS: &str = "86400";

/// Picks the `Access-Control-Allow-Origin` value for a request origin.
pub fn resolve_origin<'a>(config: &'a Config, origin: Option<&'a str>) -> &'a str {
    origin
        .map(|o| o.trim_end_matches('/'))
        .filter(|o| config.allowed_origins.iter().any(|allowed| allowed == o))
        .unwrap_or_else(|| config.primary_origin())
}

fn apply_cors_headers(response: &mut Response, origin: &str) {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(origin) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static(MAX_AGE_SECS),
    );
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));
}

/// Answers preflight requests directly and decorates every other response.
pub async fn cors_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let allow_origin = resolve_origin(&state.config, origin.as_deref()).to_string();

    if req.method() == Method::OPTIONS {
        let mut response = StatusCode::OK.into_response();
        apply_cors_headers(&mut response, &allow_origin);
        return response;
    }

    let mut response = next.run(req).await;
    apply_cors_headers(&mut response, &allow_origin);
    response
}
