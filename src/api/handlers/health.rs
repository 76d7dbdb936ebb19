//! Liveness probe for the banner service.
//!
//! `/health` is the target of the page's "Health Check" button and of load
//! balancer probes. It has no dependencies to check: if the process answers,
//! the slot is alive.

use crate::{display::Display, short_commit, GIT_COMMIT_HASH};
use axum::{
    body::Body,
    extract::Extension,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    environment: String,
    uptime_seconds: u64,
}

#[utoipa::path(
    get,
    path= "/health",
    responses (
        (status = 200, description = "Service is alive", body = Health)
    ),
    tag = "health",
)]
/// Report liveness with build and environment details.
pub async fn health(method: Method, display: Extension<Arc<Display>>) -> impl IntoResponse {
    let (environment, uptime_seconds) = {
        let session = display.session().await;
        (session.environment().to_string(), session.uptime_seconds())
    };

    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: display.settings().version.clone(),
        environment,
        uptime_seconds,
    };

    let body = if method == Method::GET {
        Json(&health).into_response()
    } else {
        Body::empty().into_response()
    };

    (StatusCode::OK, x_app_headers(&health), body)
}

fn x_app_headers(health: &Health) -> HeaderMap {
    format!(
        "{}:{}:{}",
        health.name,
        health.version,
        short_commit(&health.commit)
    )
    .parse::<HeaderValue>()
    .map(|x_app_header_value| {
        debug!("X-App header: {:?}", x_app_header_value);

        let mut headers = HeaderMap::new();
        headers.insert("X-App", x_app_header_value);
        headers
    })
    .map_err(|err| {
        debug!("Failed to parse X-App header: {}", err);
    })
    .unwrap_or_else(|()| HeaderMap::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health(version: &str) -> Health {
        Health {
            commit: "0123456789abcdef".to_string(),
            name: "envbanner".to_string(),
            version: version.to_string(),
            environment: "blue".to_string(),
            uptime_seconds: 0,
        }
    }

    #[test]
    fn x_app_header_uses_short_commit() {
        let headers = x_app_headers(&health("1.2.0"));
        assert_eq!(
            headers.get("X-App").and_then(|v| v.to_str().ok()),
            Some("envbanner:1.2.0:0123456")
        );
    }

    #[test]
    fn health_serializes_all_fields() -> serde_json::Result<()> {
        let json = serde_json::to_value(health("1.2.0"))?;
        assert_eq!(json["commit"], "0123456789abcdef");
        assert_eq!(json["name"], "envbanner");
        assert_eq!(json["version"], "1.2.0");
        assert_eq!(json["environment"], "blue");
        assert_eq!(json["uptime_seconds"], 0);
        assert_eq!(json.as_object().map(serde_json::Map::len), Some(5));
        Ok(())
    }

    #[test]
    fn x_app_header_skipped_when_invalid() {
        let headers = x_app_headers(&health("1.2.0\n"));
        assert!(headers.get("X-App").is_none());
    }
}
