use std::sync::{Arc, Mutex};

use assetdesk_client::{ApiClient, ClientConfig, ClientError};
use assetdesk_core::{Operation, Resource, ResourceId};
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{Value, json};

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    authorization: Option<String>,
    body: Value,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

struct StubServer {
    base_url: String,
    log: Log,
    handle: tokio::task::JoinHandle<()>,
}

impl StubServer {
    async fn spawn() -> Self {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new().fallback(record).with_state(log.clone());

        // Bind to an ephemeral port; the client talks to it over real HTTP.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            log,
            handle,
        }
    }

    fn client(&self) -> ApiClient {
        ApiClient::new(ClientConfig::new(&self.base_url).with_token("test-token")).unwrap()
    }

    fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    fn last(&self) -> Recorded {
        self.requests().last().cloned().expect("no request recorded")
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Records every request and answers by path:
/// - `*/404` -> 404 with a JSON error body
/// - `*/broken` -> 200 with a non-JSON body
/// - DELETE -> 204 with no body
/// - anything else -> 200 echoing what was received
async fn record(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let path = uri.path().to_string();

    log.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        authorization,
        body: parsed.clone(),
    });

    if path.ends_with("/404") {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Asset not found" }))).into_response();
    }
    if path.ends_with("/broken") {
        return (StatusCode::OK, "<html>oops</html>").into_response();
    }
    if method == Method::DELETE {
        return StatusCode::NO_CONTENT.into_response();
    }

    Json(json!({
        "data": { "method": method.to_string(), "path": path, "received": parsed },
        "meta": { "total": 1 }
    }))
    .into_response()
}

fn id(n: u64) -> ResourceId {
    ResourceId::new(n).unwrap()
}

#[tokio::test]
async fn list_hits_collection_path_with_bearer_token() {
    let server = StubServer::spawn().await;
    let client = server.client();

    let body = client.assets().list().await.unwrap();

    let req = server.last();
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/api/assets");
    assert_eq!(req.authorization.as_deref(), Some("Bearer test-token"));
    // Payload is forwarded as-is, envelope included.
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"]["path"], "/api/assets");
}

#[tokio::test]
async fn create_and_update_send_json_bodies() {
    let server = StubServer::spawn().await;
    let client = server.client();

    let category = json!({ "name": "Laptops", "description": "Portable", "is_active": true });
    let created = client.categories().create(&category).await.unwrap();
    assert_eq!(created["data"]["received"], category);
    let req = server.last();
    assert_eq!((req.method.as_str(), req.path.as_str()), ("POST", "/api/categories"));
    assert_eq!(req.body, category);

    let patch = json!({ "renewal_cost": 120.5, "auto_renew": true });
    client.licenses().update(id(9), &patch).await.unwrap();
    let req = server.last();
    assert_eq!((req.method.as_str(), req.path.as_str()), ("PUT", "/api/licenses/9"));
    assert_eq!(req.body, patch);
}

#[tokio::test]
async fn every_collection_uses_its_own_path() {
    let server = StubServer::spawn().await;
    let client = server.client();

    for resource in Resource::ALL {
        client.resource(resource).get(id(3)).await.unwrap();
        let req = server.last();
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, format!("/api{}/3", resource.path()));
    }
}

#[tokio::test]
async fn delete_with_empty_response_yields_null() {
    let server = StubServer::spawn().await;
    let body = server.client().users().delete(id(4)).await.unwrap();

    assert_eq!(body, Value::Null);
    let req = server.last();
    assert_eq!((req.method.as_str(), req.path.as_str()), ("DELETE", "/api/users/4"));
}

#[tokio::test]
async fn asset_and_license_extras_use_nested_paths() {
    let server = StubServer::spawn().await;
    let client = server.client();

    client.assets().restore(id(5)).await.unwrap();
    let req = server.last();
    assert_eq!((req.method.as_str(), req.path.as_str()), ("POST", "/api/assets/5/restore"));

    client.assets().depreciation(id(5)).await.unwrap();
    let req = server.last();
    assert_eq!((req.method.as_str(), req.path.as_str()), ("GET", "/api/assets/5/deprec"));

    let renewal = json!({ "new_renewal_date": "2027-01-01", "renewal_cost": 300 });
    client.licenses().renew(id(2), &renewal).await.unwrap();
    let req = server.last();
    assert_eq!((req.method.as_str(), req.path.as_str()), ("POST", "/api/licenses/2/renew"));
    assert_eq!(req.body, renewal);
}

#[tokio::test]
async fn unsupported_operations_fail_before_any_request() {
    let server = StubServer::spawn().await;
    let client = server.client();

    let err = client.audit_logs().create(&json!({})).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Unsupported {
            resource: Resource::AuditLogs,
            operation: Operation::Create
        }
    ));
    let err = client.users().restore(id(1)).await.unwrap_err();
    assert!(matches!(err, ClientError::Unsupported { .. }));

    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn non_success_status_maps_to_api_error_with_raw_body() {
    let server = StubServer::spawn().await;
    let err = server.client().assets().get(id(404)).await.unwrap_err();

    match err {
        ClientError::Api { status, body } => {
            assert_eq!(status, 404);
            let parsed: Value = serde_json::from_str(&body).unwrap();
            assert_eq!(parsed["message"], "Asset not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_success_body_is_a_parse_error() {
    let server = StubServer::spawn().await;
    let err = server.client().get("/broken").await.unwrap_err();
    assert!(matches!(err, ClientError::Parse(_)));
}

#[tokio::test]
async fn token_can_be_cleared_at_runtime() {
    let server = StubServer::spawn().await;
    let client = server.client();

    client.set_token(None);
    assert!(!client.has_token());
    client.locations().list().await.unwrap();
    assert_eq!(server.last().authorization, None);
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(ClientConfig::new(format!("http://{addr}/api"))).unwrap();
    let err = client.departments().list().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = ApiClient::new(ClientConfig::new("not a url")).unwrap_err();
    assert!(matches!(err, ClientError::InvalidUrl { .. }));
}
