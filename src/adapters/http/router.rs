//! Top-level router assembly: routes, CORS and request tracing.

use axum::http::{HeaderName, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::CorsConfig;

use super::decision::{decision_router, DecisionAppState};

/// Builds the full application router.
pub fn build_router(state: DecisionAppState, cors: &CorsConfig) -> Router {
    decision_router()
        .with_state(state)
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
}

/// Translates the CORS allow-lists into a layer.
///
/// A credentialed wildcard is mirrored from the request; browsers reject a
/// literal `*` alongside credentials.
pub fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let mirror = cors.allow_credentials;

    let origins = if cors.allows_any_origin() {
        if mirror {
            AllowOrigin::mirror_request()
        } else {
            AllowOrigin::any()
        }
    } else {
        AllowOrigin::list(parse_all(&cors.allow_origins, "origin", |o| {
            HeaderValue::from_str(o).ok()
        }))
    };

    let methods = if cors.allows_any_method() {
        if mirror {
            AllowMethods::mirror_request()
        } else {
            AllowMethods::any()
        }
    } else {
        AllowMethods::list(parse_all(&cors.allow_methods, "method", |m| {
            Method::from_bytes(m.to_ascii_uppercase().as_bytes()).ok()
        }))
    };

    let headers = if cors.allows_any_header() {
        if mirror {
            AllowHeaders::mirror_request()
        } else {
            AllowHeaders::any()
        }
    } else {
        AllowHeaders::list(parse_all(&cors.allow_headers, "header", |h| {
            HeaderName::from_bytes(h.as_bytes()).ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(cors.allow_credentials)
}

fn parse_all<T>(values: &[String], kind: &str, parse: impl Fn(&str) -> Option<T>) -> Vec<T> {
    values
        .iter()
        .map(|v| v.trim())
        .filter_map(|v| {
            let parsed = parse(v);
            if parsed.is_none() {
                warn!(kind, value = v, "Ignoring invalid CORS entry");
            }
            parsed
        })
        .collect()
}
