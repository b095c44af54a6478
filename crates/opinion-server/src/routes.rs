//! Router

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{
    admin_stats, check_update, health_check, opinion_handler, panic_response, root, usage_hint,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        // Opinion API
        .route("/finans-uzmani", get(usage_hint).post(opinion_handler))
        // Maintenance
        .route("/check-update", post(check_update))
        .route("/admin/stats", get(admin_stats))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(cors),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use market_opinion::{phrases, Advisor, AdvisorConfig};
    use opinion_core::{MemorySessionStore, SessionId};

    use super::*;
    use crate::config::ServerConfig;
    use crate::usage::UsageTracker;

    fn state_with(config: ServerConfig) -> AppState {
        let advisor = Advisor::new(
            &AdvisorConfig::default(),
            Arc::new(MemorySessionStore::default()),
        )
        .unwrap();
        AppState::new(advisor, config)
    }

    fn app() -> Router {
        build_router(state_with(ServerConfig::default()))
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_empty_message_is_bad_request() {
        let response = app()
            .oneshot(post_json("/finans-uzmani", &json!({ "message": "" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Mesaj boş");
        assert!(body["reply"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let request = Request::post("/finans-uzmani")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_first_question_asks_horizon() {
        let response = app()
            .oneshot(post_json("/finans-uzmani", &json!({ "message": "gram alınır mı" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let reply = body["reply"].as_str().unwrap();
        assert!(reply.contains(phrases::HORIZON_QUESTION));
    }

    #[tokio::test]
    async fn test_second_question_gets_decision() {
        let app = app();
        let payload = json!({ "message": "gram alınır mı", "sessionId": "abc", "trend": "UP" });

        app.clone()
            .oneshot(post_json("/finans-uzmani", &payload))
            .await
            .unwrap();
        let response = app
            .oneshot(post_json("/finans-uzmani", &payload))
            .await
            .unwrap();

        let body = body_json(response).await;
        assert!(body["reply"].as_str().unwrap().contains("Kararım: **AL**"));
    }

    #[tokio::test]
    async fn test_daily_quota() {
        let app = build_router(state_with(ServerConfig {
            daily_request_limit: Some(1),
            ..Default::default()
        }));
        let payload = json!({ "message": "dolar ne olur", "sessionId": "q" });

        let first = app
            .clone()
            .oneshot(post_json("/finans-uzmani", &payload))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .clone()
            .oneshot(post_json("/finans-uzmani", &payload))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body_json(second).await["error"], "Günlük limit aşıldı");

        // A different caller is unaffected
        let other = app
            .oneshot(post_json(
                "/finans-uzmani",
                &json!({ "message": "dolar ne olur", "sessionId": "r" }),
            ))
            .await
            .unwrap();
        assert_eq!(other.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_admin_stats_auth() {
        let app = build_router(state_with(ServerConfig {
            admin_token: Some("secret".into()),
            ..Default::default()
        }));

        let missing = app
            .clone()
            .oneshot(Request::get("/admin/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let wrong = app
            .clone()
            .oneshot(
                Request::get("/admin/stats")
                    .header(header::AUTHORIZATION, "Bearer nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

        app.clone()
            .oneshot(post_json("/finans-uzmani", &json!({ "message": "ons?" })))
            .await
            .unwrap();

        let ok = app
            .oneshot(
                Request::get("/admin/stats")
                    .header(header::AUTHORIZATION, "Bearer secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let body = body_json(ok).await;
        assert_eq!(body["requests"], 1);
        assert_eq!(body["uniqueCallers"], 1);
        assert_eq!(body["sessions"], 1);
        assert!(body["date"].is_string());
    }

    #[tokio::test]
    async fn test_admin_stats_disabled_without_token() {
        let response = app()
            .oneshot(Request::get("/admin/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_check_update_is_idempotent() {
        let response = app()
            .oneshot(Request::post("/check-update").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        // Counters were created today, so nothing rolls over
        assert_eq!(body["refreshed"], false);
        assert!(body["date"].is_string());
    }

    #[tokio::test]
    async fn test_first_chat_of_new_day_runs_refresh() {
        let mut state = state_with(ServerConfig {
            clear_sessions_on_refresh: true,
            ..Default::default()
        });
        let yesterday = chrono::Utc::now().date_naive() - chrono::Days::new(1);
        state.usage = Arc::new(UsageTracker::starting_on(None, yesterday));
        state
            .advisor
            .store()
            .update(&SessionId::from_string("old"), &mut |s| s.asked_horizon = true)
            .unwrap();
        let app = build_router(state.clone());

        let response = app
            .clone()
            .oneshot(post_json(
                "/finans-uzmani",
                &json!({ "message": "dolar ne olur", "sessionId": "new" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Yesterday's session is gone; only the new caller remains
        assert_eq!(state.session_count(), 1);
        let old = state
            .advisor
            .store()
            .get(&SessionId::from_string("old"))
            .unwrap();
        assert!(!old.asked_horizon);

        let refresh = app
            .oneshot(Request::post("/check-update").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(refresh).await["refreshed"], false);
    }

    #[tokio::test]
    async fn test_plain_text_routes() {
        for uri in ["/", "/finans-uzmani"] {
            let response = app()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let health = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(health).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let response = app()
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}
