// tests/client_test.rs — Integration test: HTTP client against a local stub backend

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

use studydesk::client::types::ProfileUpdate;
use studydesk::client::{ApiClient, HttpAuthenticator, Transport};
use studydesk::infra::config::ApiConfig;
use studydesk::infra::errors::StudyError;
use studydesk::session::{SessionStore, TOKEN_KEY, USER_KEY};
use studydesk::storage::{KeyValueStore, MemoryStore};

const TOKEN: &str = "tok-valid";

fn user_json(name: &str) -> Value {
    json!({
        "_id": "u1",
        "name": name,
        "email": "sari@example.com",
        "role": "student",
        "grade": "12",
    })
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "sari@example.com" && body["password"] == "rahasia" {
        let mut user = user_json("Sari");
        user["token"] = json!(TOKEN);
        (StatusCode::OK, Json(user))
    } else if body["email"] == "silent@example.com" {
        (StatusCode::BAD_REQUEST, Json(json!({})))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Email atau kata sandi salah."})),
        )
    }
}

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["grade"] != "12" || body["role"] != "student" {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "bad defaults"})));
    }
    let mut user = user_json(body["name"].as_str().unwrap_or_default());
    user["token"] = json!(TOKEN);
    (StatusCode::CREATED, Json(user))
}

async fn courses(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if !bearer_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Not authorized"})));
    }
    let all = vec![
        json!({"_id": "c1", "title": "Biologi", "category": "ipa"}),
        json!({"_id": "c2", "title": "Sejarah", "category": "ips"}),
    ];
    let filtered: Vec<Value> = match params.get("category") {
        Some(cat) => all.into_iter().filter(|c| c["category"] == *cat).collect(),
        None => all,
    };
    (StatusCode::OK, Json(Value::Array(filtered)))
}

async fn expired() -> (StatusCode, Json<Value>) {
    (StatusCode::UNAUTHORIZED, Json(json!({"message": "Token expired"})))
}

async fn broken() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "database down"})),
    )
}

async fn profile(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !bearer_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    let name = body["name"].as_str().unwrap_or("Sari");
    (StatusCode::OK, Json(json!({ "user": user_json(name) })))
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/courses", get(courses))
        .route("/api/progress", get(expired))
        .route("/api/dashboard", get(broken))
        .route("/api/users/profile", put(profile));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

struct Harness {
    kv: Arc<MemoryStore>,
    sessions: Arc<SessionStore>,
    api: ApiClient,
}

fn harness(base_url: String) -> Harness {
    let transport = Transport::new(&ApiConfig {
        base_url,
        timeout_seconds: 5,
    })
    .unwrap();
    let kv = Arc::new(MemoryStore::new());
    let auth = Arc::new(HttpAuthenticator::new(transport.clone()));
    let sessions = Arc::new(SessionStore::new(kv.clone(), auth));
    let api = ApiClient::new(transport, sessions.clone());
    Harness { kv, sessions, api }
}

#[tokio::test]
async fn test_login_then_authorized_request() {
    let h = harness(spawn_backend().await);
    h.sessions.restore().await;

    let user = h.sessions.login("sari@example.com", "rahasia").await.unwrap();
    assert_eq!(user.name, "Sari");

    let courses = h.api.courses(None).await.unwrap();
    assert_eq!(courses.len(), 2);

    let ipa = h.api.courses(Some("ipa")).await.unwrap();
    assert_eq!(ipa.len(), 1);
    assert_eq!(ipa[0].title, "Biologi");
}

#[tokio::test]
async fn test_request_without_token_triggers_logout_path() {
    let h = harness(spawn_backend().await);
    h.sessions.restore().await;

    let err = h.api.courses(None).await.unwrap_err();
    assert!(matches!(err, StudyError::Unauthorized));
    assert!(!h.sessions.is_authenticated());
}

#[tokio::test]
async fn test_unauthorized_response_clears_session() {
    let h = harness(spawn_backend().await);
    h.sessions.login("sari@example.com", "rahasia").await.unwrap();
    assert!(h.kv.get(TOKEN_KEY).await.unwrap().is_some());

    let err = h.api.progress().await.unwrap_err();
    assert!(matches!(err, StudyError::Unauthorized));
    assert!(err.is_auth_failure());

    assert!(h.sessions.current_user().is_none());
    assert!(h.sessions.current_token().is_none());
    assert!(h.kv.get(TOKEN_KEY).await.unwrap().is_none());
    assert!(h.kv.get(USER_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn test_rejected_login_carries_server_message() {
    let h = harness(spawn_backend().await);

    let err = h.sessions.login("sari@example.com", "salah").await.unwrap_err();
    match err {
        StudyError::Authentication { message } => {
            assert_eq!(message, "Email atau kata sandi salah.");
        }
        other => panic!("expected authentication error, got {other:?}"),
    }
    assert!(!h.sessions.is_authenticated());
}

#[tokio::test]
async fn test_rejected_login_without_message_uses_default() {
    let h = harness(spawn_backend().await);

    let err = h.sessions.login("silent@example.com", "x").await.unwrap_err();
    assert_eq!(err.to_string(), "Authentication failed: Invalid credentials");
}

#[tokio::test]
async fn test_register_sends_defaults() {
    let h = harness(spawn_backend().await);

    let user = h
        .sessions
        .register("Budi", "budi@example.com", "pw", None)
        .await
        .unwrap();
    assert_eq!(user.name, "Budi");
    assert_eq!(h.sessions.current_token().as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn test_server_error_keeps_session() {
    let h = harness(spawn_backend().await);
    h.sessions.login("sari@example.com", "rahasia").await.unwrap();

    let err = h.api.dashboard().await.unwrap_err();
    match err {
        StudyError::Network { status, message } => {
            assert_eq!(status, Some(500));
            assert_eq!(message, "database down");
        }
        other => panic!("expected network error, got {other:?}"),
    }
    assert!(h.sessions.is_authenticated());
}

#[tokio::test]
async fn test_profile_update_mirrors_into_session() {
    let h = harness(spawn_backend().await);
    h.sessions.login("sari@example.com", "rahasia").await.unwrap();

    let update = ProfileUpdate {
        name: Some("Sari Dewi".into()),
        ..Default::default()
    };
    let user = h.api.update_profile(&update).await.unwrap();
    assert_eq!(user.name, "Sari Dewi");
    assert_eq!(h.sessions.current_user().unwrap().name, "Sari Dewi");
    assert_eq!(h.sessions.current_token().as_deref(), Some(TOKEN));

    let stored = h.kv.get(USER_KEY).await.unwrap().unwrap();
    assert!(stored.contains("Sari Dewi"));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let h = harness("http://127.0.0.1:1".into());

    let err = h.sessions.login("sari@example.com", "rahasia").await.unwrap_err();
    assert!(matches!(err, StudyError::Network { status: None, .. }));
    assert!(!h.sessions.is_authenticated());
}
