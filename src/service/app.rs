//! The application handle and its factory.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{middleware, routing::get, Router};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{validate_config, ConfigError, ServiceConfig};
use crate::http::request::{make_span, UuidRequestId, X_REQUEST_ID};
use crate::observability::metrics;
use crate::security;
use crate::service::error::ServiceError;
use crate::service::handlers;

pub const SERVICE_NAME: &str = "sheriff-config";

/// Static facts about the running service.
#[derive(Debug)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub started_at: Instant,
}

/// State injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub info: Arc<ServiceInfo>,
}

/// A ready-to-serve application.
///
/// Holds the fully layered router; cloning the router out is cheap.
pub struct App {
    router: Router,
    info: Arc<ServiceInfo>,
}

impl App {
    /// The router to hand to a server.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn info(&self) -> &ServiceInfo {
        &self.info
    }
}

/// Assemble the application from `config`.
///
/// Intended to be called once, through [`crate::lifecycle::bootstrap`].
pub fn create_app(config: ServiceConfig) -> Result<App, ServiceError> {
    validate_config(&config).map_err(ConfigError::Validation)?;

    let info = Arc::new(ServiceInfo {
        name: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        started_at: Instant::now(),
    });
    let state = AppState { info: info.clone() };

    let router = build_router(&config, state);
    tracing::debug!(
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.security.max_body_size,
        security_headers = config.security.enable_headers,
        "Router assembled"
    );

    Ok(App { router, info })
}

/// Build the Axum router with all middleware layers.
fn build_router(config: &ServiceConfig, state: AppState) -> Router {
    let routes = Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/status", get(handlers::get_status))
        .fallback(handlers::not_found)
        .with_state(state);

    apply_middleware(routes, config)
}

/// Wrap `routes`, inner to outer: metrics, body limit, timeout, trace,
/// request-id propagation, request-id generation, security headers.
#[allow(deprecated)]
fn apply_middleware(routes: Router, config: &ServiceConfig) -> Router {
    let router = routes.layer(middleware::from_fn(metrics::track_requests));
    let router = security::limits::apply(router, &config.security)
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(TraceLayer::new_for_http().make_span_with(make_span))
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId));

    if config.security.enable_headers {
        security::headers::apply(router)
    } else {
        router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{Request, StatusCode}};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::ServiceExt;

    fn get_request(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    fn metric_line<'a>(rendered: &'a str, name: &str, labels: &[&str]) -> Option<&'a str> {
        rendered.lines().find(|line| {
            line.starts_with(&format!("{name}{{"))
                && labels.iter().all(|label| line.contains(label))
        })
    }

    #[tokio::test]
    async fn test_slow_handler_times_out() {
        let mut config = ServiceConfig::default();
        config.timeouts.request_secs = 1;

        let routes = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let router = apply_middleware(routes, &config);

        let res = router.oneshot(get_request("/slow")).await.unwrap();

        assert_eq!(res.status(), StatusCode::REQUEST_TIMEOUT);
        assert!(res.headers().contains_key("x-request-id"));
    }

    #[test]
    fn test_matched_and_unmatched_requests_recorded() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        ::metrics::with_local_recorder(&recorder, || {
            runtime.block_on(async {
                let app = create_app(ServiceConfig::default()).unwrap();
                let ok = app.router().oneshot(get_request("/healthz")).await.unwrap();
                assert_eq!(ok.status(), StatusCode::OK);
                let missing = app.router().oneshot(get_request("/configs/validate")).await.unwrap();
                assert_eq!(missing.status(), StatusCode::NOT_FOUND);
            })
        });

        let rendered = handle.render();
        assert!(
            metric_line(
                &rendered,
                metrics::REQUESTS_TOTAL,
                &[r#"method="GET""#, r#"route="/healthz""#, r#"status="200""#],
            )
            .is_some(),
            "healthz not counted:\n{rendered}"
        );
        assert!(
            metric_line(
                &rendered,
                metrics::REQUESTS_TOTAL,
                &[r#"route="unmatched""#, r#"status="404""#],
            )
            .is_some(),
            "fallback not counted:\n{rendered}"
        );
        assert!(rendered.contains(metrics::REQUEST_DURATION_SECONDS));
    }
}
