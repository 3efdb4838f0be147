use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::{livez, readyz},
        samples::{create_sample, get_sample, update_sample},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let sample_routes = Router::new()
        .route("/samples", post(create_sample).patch(update_sample))
        .route("/samples/{sample_id}", get(get_sample))
        .layer(cors);

    let request_timeout = state.request_timeout;

    Router::new()
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .merge(sample_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, Response, StatusCode},
    };
    use http_body_util::BodyExt;
    use sampletrack_core::events::EventSubscriber;
    use tower::ServiceExt;

    async fn json_body(response: Response<Body>) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn create_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/samples")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(sample_id: &str, token: &str) -> Request<Body> {
        Request::builder()
            .uri(format!("/samples/{sample_id}"))
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    fn update_request(body: serde_json::Value, token: &str) -> Request<Body> {
        Request::builder()
            .method("PATCH")
            .uri("/samples")
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn stephen() -> serde_json::Value {
        serde_json::json!({
            "patient_pseudonym": "Stephen Nehigh",
            "submitter_email": "byro93@live.com",
            "collection_date": "2023-02-02T11:37"
        })
    }

    async fn create(app: &Router) -> (String, String) {
        let response = app.clone().oneshot(create_request(stephen())).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        (
            json["sample_id"].as_str().unwrap().to_string(),
            json["access_token"].as_str().unwrap().to_string(),
        )
    }

    #[tokio::test]
    async fn test_livez_and_readyz() {
        let app = create_app(AppState::default());

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/livez").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri("/readyz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["healthy"], true);
    }

    #[tokio::test]
    async fn test_create_returns_token_once() {
        let app = create_app(AppState::default());

        let response = app.oneshot(create_request(stephen())).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        assert!(json["access_token"].as_str().unwrap().len() >= 16);
        assert_eq!(json["sample_id"].as_str().unwrap().len(), 10);
        assert_eq!(json["status"], "pending");
        assert_eq!(json["test_result"], "inconclusive");
        assert!(json["test_date"].is_null());
        assert!(json.get("access_token_hash").is_none());
    }

    #[tokio::test]
    async fn test_create_invalid_email_is_bad_request() {
        let app = create_app(AppState::default());
        let mut body = stephen();
        body["submitter_email"] = "not-an-email".into();

        let response = app.oneshot(create_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert!(json["error"].as_str().unwrap().contains("email"));
    }

    #[tokio::test]
    async fn test_create_malformed_json_is_unprocessable() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(create_request(serde_json::json!({ "patient_pseudonym": 7 })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_get_requires_bearer_token() {
        let app = create_app(AppState::default());
        let (sample_id, _) = create(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/samples/{sample_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            json_body(response).await["error"],
            "Unauthorized access requested"
        );
    }

    #[tokio::test]
    async fn test_unknown_sample_is_not_found() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(get_request("doesnotexist", "whatever"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await["error"],
            "Specified resource was not found."
        );
    }

    #[tokio::test]
    async fn test_fabricated_token_cannot_update() {
        let app = create_app(AppState::default());
        let (sample_id, token) = create(&app).await;

        let update = serde_json::json!({
            "sample_id": sample_id,
            "status": "completed",
            "test_result": "positive",
            "test_date": "2023-02-03T11:45"
        });
        let response = app
            .clone()
            .oneshot(update_request(update, "doesnotexist"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app.oneshot(get_request(&sample_id, &token)).await.unwrap();
        let json = json_body(response).await;
        assert_eq!(json["status"], "pending");
        assert_eq!(json["test_result"], "inconclusive");
    }

    #[tokio::test]
    async fn test_update_with_unknown_status_is_unprocessable() {
        let app = create_app(AppState::default());
        let (sample_id, token) = create(&app).await;

        let update = serde_json::json!({
            "sample_id": sample_id,
            "status": "lost",
            "test_result": "positive",
            "test_date": "2023-02-03T11:45"
        });
        let response = app.oneshot(update_request(update, &token)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_stephen_nehigh_journey() {
        let state = AppState::default();
        let mut updates = state.events.subscribe("sample_updates").await.unwrap();
        let app = create_app(state);

        let (sample_id, token) = create(&app).await;
        assert!(token.len() >= 16);

        let response = app
            .clone()
            .oneshot(get_request(&sample_id, &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["status"], "pending");
        assert_eq!(json["test_result"], "inconclusive");

        let update = serde_json::json!({
            "sample_id": sample_id,
            "status": "completed",
            "test_result": "negative",
            "test_date": "2023-02-03T11:45"
        });
        let response = app
            .clone()
            .oneshot(update_request(update, &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.oneshot(get_request(&sample_id, &token)).await.unwrap();
        let json = json_body(response).await;
        assert_eq!(json["status"], "completed");
        assert_eq!(json["test_result"], "negative");
        assert_eq!(json["test_date"], "2023-02-03T11:45");

        let notification = updates.recv().await.unwrap();
        assert_eq!(notification.key, sample_id);
        assert_eq!(notification.payload["submitter_email"], "byro93@live.com");
        assert!(updates.try_recv().is_err());
    }
}
