pub mod models;
pub mod review;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use models::*;

use crate::config::CorsConfig;
use axum::{Json, Router, http::HeaderValue, routing::get};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::warn;

pub const SERVICE_NAME: &str = "AI Code Review API";

pub async fn root_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "running".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

/// All routes, served at the root and again under `/api`.
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(root_handler))
        .merge(review::routes());

    Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .with_state(state)
}

/// Credentials are always allowed, so "any origin" (no list, or a list with a
/// `*` entry) mirrors the caller's `Origin` instead of sending `*`. Methods
/// and headers are mirrored too. An empty list admits no cross-origin caller.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = match &config.origins {
        None => AllowOrigin::mirror_request(),
        Some(origins) if origins.iter().any(|origin| origin.trim() == "*") => {
            AllowOrigin::mirror_request()
        }
        Some(origins) => {
            let values: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(%origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(values)
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::testing::{FakeCompletion, MemoryStore, state_with};
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        router(state_with(
            Arc::new(FakeCompletion::replying("{}")),
            Arc::new(MemoryStore::default()),
        ))
    }

    #[tokio::test]
    async fn root_reports_running() {
        for uri in ["/", "/api"] {
            let response = app()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(
                json,
                serde_json::json!({"status": "running", "service": "AI Code Review API"})
            );
        }
    }

    #[tokio::test]
    async fn unrestricted_cors_mirrors_origin_with_credentials() {
        let app = app().layer(cors_layer(&CorsConfig { origins: None }));
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/review")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
    }

    async fn allowed_origin(config: &CorsConfig, origin: &str) -> Option<HeaderValue> {
        app()
            .layer(cors_layer(config))
            .oneshot(
                Request::get("/")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .cloned()
    }

    #[tokio::test]
    async fn wildcard_entry_in_list_allows_any_origin() {
        let from_env = CorsConfig {
            origins: crate::config::parse_origins("http://localhost:5173,*"),
        };
        let from_file = CorsConfig {
            origins: Some(vec!["https://app.example".to_string(), "*".to_string()]),
        };

        for config in [from_env, from_file] {
            assert_eq!(
                allowed_origin(&config, "https://other.example").await.unwrap(),
                "https://other.example"
            );
        }
    }

    #[tokio::test]
    async fn empty_list_allows_no_origin() {
        for raw in ["", ",,"] {
            let config = CorsConfig {
                origins: crate::config::parse_origins(raw),
            };
            assert!(allowed_origin(&config, "http://localhost:5173").await.is_none());
        }
    }

    #[tokio::test]
    async fn allow_list_rejects_other_origins() {
        let config = CorsConfig {
            origins: Some(vec!["https://app.example".to_string()]),
        };

        let allowed = app()
            .layer(cors_layer(&config))
            .oneshot(
                Request::get("/")
                    .header(header::ORIGIN, "https://app.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://app.example"
        );

        let denied = app()
            .layer(cors_layer(&config))
            .oneshot(
                Request::get("/")
                    .header(header::ORIGIN, "https://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(
            denied
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }
}
