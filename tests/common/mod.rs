#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use housing_hub::{AppConfig, AppState, NavigatorState, RecordingNavigator};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const GOOD_PASSWORD: &str = "correct-horse";

/// One request as the stub backend saw it.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub request_id: Option<String>,
    pub query: Option<String>,
    pub body: Option<Value>,
}

/// Stub
///
/// In-process stand-in for the REST backend. Tokens are issued at login and can
/// be revoked to simulate server-side expiry.
#[derive(Default)]
pub struct Stub {
    valid_token: Mutex<Option<String>>,
    identity: Mutex<Option<Value>>,
    issued: AtomicUsize,
    pub fail_logout: AtomicBool,
    seen: Mutex<Vec<Seen>>,
}

impl Stub {
    pub fn revoke(&self) {
        *self.valid_token.lock() = None;
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().clone()
    }

    pub fn seen_path(&self, path: &str) -> Vec<Seen> {
        self.seen().into_iter().filter(|s| s.path == path).collect()
    }

    fn record(&self, method: Method, path: &str, headers: &HeaderMap, query: Option<String>, body: Option<Value>) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.seen.lock().push(Seen {
            method,
            path: path.to_string(),
            authorization: header("authorization"),
            request_id: header("x-request-id"),
            query,
            body,
        });
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let presented = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        match (presented, self.valid_token.lock().as_deref()) {
            (Some(presented), Some(valid)) => presented == valid,
            _ => false,
        }
    }

    fn current_role(&self) -> Option<String> {
        self.identity
            .lock()
            .as_ref()
            .and_then(|i| i["role"].as_str().map(str::to_string))
    }
}

type StubState = Arc<Stub>;

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": "token expired" }))).into_response()
}

fn property_json(id: &str) -> Value {
    json!({
        "id": id,
        "title": "Lake house",
        "price": 450000.0,
        "area": 180.0,
        "description": "Three bedrooms by the water",
        "type": "FOR_SALE",
        "images": ["https://img.example/1.jpg"],
        "approved": true
    })
}

// --- Auth endpoints ---

async fn login(State(stub): State<StubState>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    stub.record(Method::POST, "/login", &headers, None, Some(body.clone()));

    if body["password"] != GOOD_PASSWORD {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad credentials" }))).into_response();
    }

    let email = body["email"].as_str().unwrap_or_default().to_string();
    let role = if email.starts_with("seller") {
        "SELLER"
    } else if email.starts_with("admin") {
        "ADMIN"
    } else {
        "BUYER"
    };
    let n = stub.issued.fetch_add(1, Ordering::SeqCst) + 1;
    let token = format!("tok-{n}");
    let identity = json!({
        "id": format!("user-{}", email.split('@').next().unwrap_or_default()),
        "email": email,
        "fullName": "Dana Example",
        "role": role
    });

    *stub.valid_token.lock() = Some(token.clone());
    *stub.identity.lock() = Some(identity.clone());
    Json(json!({ "user": identity, "token": token })).into_response()
}

async fn logout(State(stub): State<StubState>, headers: HeaderMap) -> Response {
    stub.record(Method::POST, "/logout", &headers, None, None);
    if stub.fail_logout.load(Ordering::SeqCst) {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    stub.revoke();
    StatusCode::NO_CONTENT.into_response()
}

async fn update_user(State(stub): State<StubState>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    stub.record(Method::PUT, "/user", &headers, None, Some(body.clone()));
    if !stub.authorized(&headers) {
        return unauthorized();
    }
    if body["email"] == "rejected@example.com" {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    }

    let mut guard = stub.identity.lock();
    let Some(identity) = guard.as_mut() else {
        return unauthorized();
    };
    if let Some(email) = body["email"].as_str() {
        identity["email"] = json!(email.to_lowercase());
    }
    if let Some(name) = body["fullName"].as_str() {
        identity["fullName"] = json!(name);
    }
    Json(identity.clone()).into_response()
}

async fn profile(State(stub): State<StubState>, headers: HeaderMap) -> Response {
    stub.record(Method::GET, "/user/profile", &headers, None, None);
    if !stub.authorized(&headers) {
        return unauthorized();
    }
    // Give concurrent callers time to overlap.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    Json(json!({ "fullName": "Dana Example", "email": "dana@example.com", "phone": null })).into_response()
}

async fn signup(State(stub): State<StubState>, Path(role): Path<String>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    stub.record(Method::POST, &format!("/{role}/signup"), &headers, None, Some(body));
    StatusCode::CREATED.into_response()
}

// --- Listing endpoints ---

async fn search(State(stub): State<StubState>, headers: HeaderMap, RawQuery(query): RawQuery) -> Response {
    stub.record(Method::GET, "/properties", &headers, query, None);
    if headers.contains_key("authorization") && !stub.authorized(&headers) {
        return unauthorized();
    }
    Json(json!([property_json("p-1"), { "id": "p-2", "title": "Loft", "price": 210000.0, "area": 60.0 }])).into_response()
}

async fn create_property(State(stub): State<StubState>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    stub.record(Method::POST, "/properties", &headers, None, Some(body.clone()));
    if !stub.authorized(&headers) {
        return unauthorized();
    }
    let mut created = body;
    created["id"] = json!("p-new");
    created["approved"] = json!(false);
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn property(State(stub): State<StubState>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    stub.record(Method::GET, &format!("/properties/{id}"), &headers, None, None);
    if id == "missing" {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(property_json(&id)).into_response()
}

async fn update_property(State(stub): State<StubState>, Path(id): Path<String>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    stub.record(Method::PUT, &format!("/properties/{id}"), &headers, None, Some(body.clone()));
    if !stub.authorized(&headers) {
        return unauthorized();
    }
    let mut updated = property_json(&id);
    if let Some(title) = body["title"].as_str() {
        updated["title"] = json!(title);
    }
    Json(updated).into_response()
}

async fn reviews(State(stub): State<StubState>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    stub.record(Method::GET, &format!("/properties/{id}/reviews"), &headers, None, None);
    Json(json!([{
        "rating": 4,
        "comment": "Lovely light",
        "user": { "fullName": "Sam Reviewer" },
        "createdAt": "2024-05-01T10:00:00Z"
    }]))
    .into_response()
}

async fn post_review(State(stub): State<StubState>, Path(id): Path<String>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    stub.record(Method::POST, &format!("/properties/{id}/reviews"), &headers, None, Some(body));
    if !stub.authorized(&headers) {
        return unauthorized();
    }
    StatusCode::CREATED.into_response()
}

async fn post_inquiry(State(stub): State<StubState>, Path(id): Path<String>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    stub.record(Method::POST, &format!("/properties/{id}/inquiries"), &headers, None, Some(body));
    if !stub.authorized(&headers) {
        return unauthorized();
    }
    StatusCode::CREATED.into_response()
}

async fn seller_inquiries(State(stub): State<StubState>, headers: HeaderMap) -> Response {
    stub.record(Method::GET, "/seller/inquiries", &headers, None, None);
    if !stub.authorized(&headers) {
        return unauthorized();
    }
    Json(json!([{
        "id": "i-1",
        "message": "Is the price negotiable?",
        "property": { "id": "p-1", "title": "Lake house", "price": 450000.0, "area": 180.0, "approved": true },
        "buyer": { "fullName": "Bo Buyer" },
        "createdAt": "2024-06-02T08:30:00Z"
    }]))
    .into_response()
}

async fn remove_favorite(State(stub): State<StubState>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    stub.record(Method::DELETE, &format!("/user/favorites/{id}"), &headers, None, None);
    if !stub.authorized(&headers) {
        return unauthorized();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn appointments(State(stub): State<StubState>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    stub.record(Method::POST, "/appointments", &headers, None, Some(body));
    if !stub.authorized(&headers) {
        return unauthorized();
    }
    StatusCode::CREATED.into_response()
}

// --- Admin endpoints ---

async fn admin_users(State(stub): State<StubState>, headers: HeaderMap) -> Response {
    stub.record(Method::GET, "/admin/users", &headers, None, None);
    if !stub.authorized(&headers) {
        return unauthorized();
    }
    if stub.current_role().as_deref() != Some("ADMIN") {
        return StatusCode::FORBIDDEN.into_response();
    }
    let identity = stub.identity.lock().clone().unwrap_or(Value::Null);
    Json(json!([identity])).into_response()
}

async fn approve(State(stub): State<StubState>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    stub.record(Method::POST, &format!("/admin/properties/{id}/approve"), &headers, None, None);
    if !stub.authorized(&headers) {
        return unauthorized();
    }
    if stub.current_role().as_deref() != Some("ADMIN") {
        return StatusCode::FORBIDDEN.into_response();
    }
    StatusCode::OK.into_response()
}

/// spawn_stub
///
/// Binds the stub to an ephemeral port and returns it with the API base URL.
pub async fn spawn_stub() -> (Arc<Stub>, String) {
    let stub = Arc::new(Stub::default());

    let router = Router::new()
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/user", axum::routing::put(update_user))
        .route("/api/user/profile", get(profile))
        .route("/api/user/favorites/{id}", delete(remove_favorite))
        .route("/api/{role}/signup", post(signup))
        .route("/api/properties", get(search).post(create_property))
        .route("/api/properties/{id}", get(property).put(update_property))
        .route("/api/properties/{id}/reviews", get(reviews).post(post_review))
        .route("/api/properties/{id}/inquiries", post(post_inquiry))
        .route("/api/seller/inquiries", get(seller_inquiries))
        .route("/api/appointments", post(appointments))
        .route("/api/admin/users", get(admin_users))
        .route("/api/admin/properties/{id}/approve", post(approve))
        .with_state(stub.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (stub, format!("http://127.0.0.1:{}/api", port))
}

/// App wired against the stub, with a navigator the test can inspect.
pub async fn spawn_app() -> (AppState, Arc<Stub>, Arc<RecordingNavigator>) {
    let (stub, api_url) = spawn_stub().await;
    let navigator = Arc::new(RecordingNavigator::new());
    let config = AppConfig {
        api_url,
        ..AppConfig::default()
    };
    let state = AppState::new(config, navigator.clone() as NavigatorState).unwrap();
    (state, stub, navigator)
}
