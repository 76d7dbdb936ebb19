use crate::{
    api::handlers::{environment, health, page, refresh},
    display::{Display, Settings},
};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Method, Request},
    routing::{get, options},
    Extension, Router,
};
use std::{future::Future, net::IpAddr, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{debug_span, info, Span};
use ulid::Ulid;
use utoipa::openapi::{InfoBuilder, License, OpenApiBuilder, Tag};
use utoipa_axum::{router::OpenApiRouter, routes};

pub mod handlers;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Reuse the same router wiring and only return the generated OpenAPI document.
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Build the router that also drives the `OpenAPI` document.
///
/// The HTML page (`GET /`) and `OPTIONS /health` are added outside and stay
/// undocumented.
fn api_router() -> OpenApiRouter {
    let mut router = OpenApiRouter::with_openapi(cargo_openapi())
        .routes(routes!(health::health))
        .routes(routes!(environment::environment))
        .routes(routes!(refresh::refresh));

    let mut environment_tag = Tag::new("environment");
    environment_tag.description = Some("Deployment environment display".to_string());
    let mut health_tag = Tag::new("health");
    health_tag.description = Some("Liveness probe".to_string());
    router.get_openapi_mut().tags = Some(vec![environment_tag, health_tag]);

    router
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(Some(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    let mut license = License::new(env!("CARGO_PKG_LICENSE"));
    license.identifier = Some(env!("CARGO_PKG_LICENSE").to_string());
    info.license = Some(license);

    OpenApiBuilder::new().info(info).build()
}

/// Assemble the full application around a shared display.
pub fn app(display: Arc<Display>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    let (router, _openapi) = api_router().split_for_parts();
    router
        .route("/", get(page::page))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors),
        )
        // outside the CORS layer, which would answer OPTIONS as a preflight
        .route("/health", options(health::health))
        .layer(Extension(display))
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// The display, and with it the uptime ticker, is dropped before returning.
///
/// # Errors
/// Returns an error if the server fails while accepting connections.
pub async fn serve<F>(listener: TcpListener, display: Arc<Display>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = app(Arc::clone(&display));

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")?;

    let uptime = display.session().await.uptime();
    info!(uptime = %uptime, "display torn down");

    Ok(())
}

/// Bind and run the banner service until Ctrl-C or SIGTERM.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn new(bind: IpAddr, port: u16, settings: Settings) -> Result<()> {
    let addr = SocketAddr::new(bind, port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Listening on {}", addr);

    let display = Arc::new(Display::new(settings));

    serve(listener, display, async {
        shutdown_signal().await;
        info!("Gracefully shutdown");
    })
    .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let headers = request.headers();
    let path = request.uri().path();
    let request_id = headers
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, ?headers, request_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::resolve_environment;
    use anyhow::Result;
    use axum::{
        body::to_bytes,
        http::{header, StatusCode},
    };
    use serde_json::Value;
    use tokio::time::{sleep, Duration};
    use tower::ServiceExt;

    fn display(environment: Option<&str>) -> Arc<Display> {
        Arc::new(Display::new(Settings {
            environment: resolve_environment([environment]),
            version: "1.2.0".to_string(),
        }))
    }

    fn request(method: Method, uri: &str) -> Result<Request<Body>> {
        Ok(Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())?)
    }

    async fn body_text(response: axum::response::Response) -> Result<String> {
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        Ok(String::from_utf8(body.to_vec())?)
    }

    #[tokio::test]
    async fn root_renders_page() -> Result<()> {
        let response = app(display(Some("Green")))
            .oneshot(request(Method::GET, "/")?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/html")));

        let body = body_text(response).await?;
        assert!(body.contains(r#"<span id="environment">GREEN</span>"#));
        Ok(())
    }

    #[tokio::test]
    async fn root_without_environment_shows_default() -> Result<()> {
        let response = app(display(None))
            .oneshot(request(Method::GET, "/")?)
            .await?;
        let body = body_text(response).await?;
        assert!(body.contains(r#"<span id="environment">DEVELOPMENT</span>"#));
        assert!(!body.contains(r#"<span id="deployed-at"></span>"#));
        Ok(())
    }

    #[tokio::test]
    async fn health_get_returns_payload() -> Result<()> {
        let response = app(display(Some("blue")))
            .oneshot(request(Method::GET, "/health")?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let x_app = response
            .headers()
            .get("X-App")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        assert!(x_app.is_some_and(|v| v.starts_with("envbanner:1.2.0:")));

        let json: Value = serde_json::from_str(&body_text(response).await?)?;
        assert_eq!(json["name"], "envbanner");
        assert_eq!(json["version"], "1.2.0");
        assert_eq!(json["environment"], "blue");
        assert_eq!(json["commit"], crate::GIT_COMMIT_HASH);
        Ok(())
    }

    #[tokio::test]
    async fn health_options_has_empty_body() -> Result<()> {
        let response = app(display(Some("blue")))
            .oneshot(request(Method::OPTIONS, "/health")?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("X-App"));
        assert!(body_text(response).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn health_options_with_cors_headers_reaches_handler() -> Result<()> {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/health")
            .header(header::ORIGIN, "https://lb.internal")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())?;

        let response = app(display(Some("green"))).oneshot(request).await?;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get("X-App")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("envbanner:1.2.0:")));
        assert!(body_text(response).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn environment_returns_snapshot() -> Result<()> {
        let response = app(display(Some("PRODUCTION")))
            .oneshot(request(Method::GET, "/api/environment")?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let json: Value = serde_json::from_str(&body_text(response).await?)?;
        assert_eq!(json["environment"], "PRODUCTION");
        assert_eq!(json["label"], "PRODUCTION");
        assert_eq!(json["slot"], "production");
        assert_eq!(json["display"]["color"], "#17a2b8");
        assert_eq!(
            json["announcement"],
            "Currently running on PRODUCTION environment!"
        );
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_redirects_and_resets_uptime() -> Result<()> {
        let display = display(Some("green"));
        sleep(Duration::from_millis(3_500)).await;
        assert_eq!(display.session().await.uptime_seconds(), 3);

        let response = app(Arc::clone(&display))
            .oneshot(request(Method::POST, "/refresh")?)
            .await?;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/")
        );
        assert_eq!(display.session().await.uptime_seconds(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn request_id_is_propagated() -> Result<()> {
        let response = app(display(None))
            .oneshot(request(Method::GET, "/health")?)
            .await?;
        assert!(response.headers().contains_key("x-request-id"));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() -> Result<()> {
        let response = app(display(None))
            .oneshot(request(Method::GET, "/nope")?)
            .await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[test]
    fn openapi_documents_routes() {
        let doc = openapi();
        assert_eq!(doc.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(doc.info.version, env!("CARGO_PKG_VERSION"));
        for path in ["/health", "/api/environment", "/refresh"] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }
        assert!(!doc.paths.paths.contains_key("/"));
    }
}
