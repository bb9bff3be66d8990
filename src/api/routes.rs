//! HTTP API route definitions.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{
    add_chemo_session, add_medicine_reminder, get_chemo_sessions, get_medicine_reminders,
    health, metrics_text, AppState,
};
use crate::config::Config;

/// Create the API router.
pub fn create_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        // Chemo sessions
        .route("/add_chemo_session", post(add_chemo_session))
        .route("/get_chemo_sessions", get(get_chemo_sessions))
        // Medicine reminders
        .route("/add_medicine_reminder", post(add_medicine_reminder))
        .route("/get_medicine_reminders", get(get_medicine_reminders))
        // Operations
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> (AppState, Router) {
        let state = AppState::new();
        let router = create_router(state.clone(), &Config::default());
        (state, router)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let (_, app) = app();

        let response = app.oneshot(get_req("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn listings_start_empty() {
        let (_, app) = app();

        for uri in ["/get_chemo_sessions", "/get_medicine_reminders"] {
            let response = app.clone().oneshot(get_req(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(json_body(response).await, json!([]));
        }
    }

    #[tokio::test]
    async fn chemo_session_is_echoed_and_listed() {
        let (_, app) = app();
        let body = r#"{"date":"2024-01-01","drug":"X"}"#;

        let response = app
            .clone()
            .oneshot(post_json("/add_chemo_session", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            json_body(response).await,
            json!({
                "message": "Chemo session added",
                "data": {"date": "2024-01-01", "drug": "X"}
            })
        );

        let response = app.oneshot(get_req("/get_chemo_sessions")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!([{"date": "2024-01-01", "drug": "X"}])
        );
    }

    #[tokio::test]
    async fn reminders_keep_order_and_stay_separate() {
        let (_, app) = app();

        for body in [r#"{"time":"08:00"}"#, r#"{"time":"20:00"}"#] {
            let response = app
                .clone()
                .oneshot(post_json("/add_medicine_reminder", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
            let echoed = json_body(response).await;
            assert_eq!(echoed["message"], "Medicine reminder added");
        }

        let response = app
            .clone()
            .oneshot(get_req("/get_medicine_reminders"))
            .await
            .unwrap();
        assert_eq!(
            json_body(response).await,
            json!([{"time": "08:00"}, {"time": "20:00"}])
        );

        let response = app.oneshot(get_req("/get_chemo_sessions")).await.unwrap();
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn repeated_gets_are_identical() {
        let (state, app) = app();
        state
            .store
            .append(crate::store::LogKind::ChemoSession, json!({"cycle": 3}))
            .await;

        let first = json_body(
            app.clone()
                .oneshot(get_req("/get_chemo_sessions"))
                .await
                .unwrap(),
        )
        .await;
        let second = json_body(app.oneshot(get_req("/get_chemo_sessions")).await.unwrap()).await;

        assert_eq!(first, second);
        assert_eq!(first, json!([{"cycle": 3}]));
    }

    #[tokio::test]
    async fn non_object_json_is_stored_verbatim() {
        let (state, app) = app();

        for body in ["null", "[1,2]", "\"text\"", "42.5"] {
            let response = app
                .clone()
                .oneshot(post_json("/add_chemo_session", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        assert_eq!(
            state.store.list(crate::store::LogKind::ChemoSession).await,
            vec![json!(null), json!([1, 2]), json!("text"), json!(42.5)]
        );
    }

    #[tokio::test]
    async fn malformed_json_is_rejected_with_400() {
        let (state, app) = app();

        let response = app
            .oneshot(post_json("/add_chemo_session", r#"{"date": "#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"].is_string());
        assert_eq!(state.store.len(crate::store::LogKind::ChemoSession).await, 0);
    }

    #[tokio::test]
    async fn empty_body_is_rejected_with_400() {
        let (_, app) = app();

        let response = app
            .oneshot(post_json("/add_medicine_reminder", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_content_type_is_rejected_with_415() {
        let (state, app) = app();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/add_medicine_reminder")
            .body(Body::from(r#"{"time":"08:00"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(
            state.store.len(crate::store::LogKind::MedicineReminder).await,
            0
        );
    }

    #[tokio::test]
    async fn oversized_body_is_rejected_with_413() {
        let state = AppState::new();
        let config = Config {
            max_body_bytes: 16,
            ..Config::default()
        };
        let app = create_router(state, &config);

        let body = format!(r#"{{"note":"{}"}}"#, "x".repeat(64));
        let response = app
            .oneshot(post_json("/add_chemo_session", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn wrong_method_is_rejected() {
        let (_, app) = app();

        let response = app
            .oneshot(get_req("/add_chemo_session"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn metrics_without_recorder_is_empty() {
        let (_, app) = app();

        let response = app.oneshot(get_req("/metrics")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }
}
