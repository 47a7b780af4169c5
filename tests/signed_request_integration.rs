use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request as MockRequest, ResponseTemplate};

use pritunl_api_client::auth::{
    AuthContext, Credentials, NonceProvider, StaticCredentials, sign_request,
};
use pritunl_api_client::rest::{PritunlClient, Request};
use pritunl_api_client::{ErrorKind, PritunlError};

const TOKEN: &str = "test_token";
const SECRET: &str = "test_secret";

struct FixedNonce(&'static str);

impl NonceProvider for FixedNonce {
    fn next_nonce(&self) -> String {
        self.0.to_string()
    }
}

/// Recomputes the signature from the received auth headers, method and path.
struct ValidSignature;

impl Match for ValidSignature {
    fn matches(&self, request: &MockRequest) -> bool {
        let get = |name: &str| {
            request
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let (Some(token), Some(timestamp), Some(nonce), Some(signature)) = (
            get("Auth-Token"),
            get("Auth-Timestamp"),
            get("Auth-Nonce"),
            get("Auth-Signature"),
        ) else {
            return false;
        };
        let Ok(timestamp) = timestamp.parse::<i64>() else {
            return false;
        };

        let credentials = Credentials::new("unused", token, SECRET);
        let context = AuthContext::new(timestamp, nonce);
        sign_request(
            &credentials,
            &context,
            request.method.as_str(),
            request.url.path(),
        )
        .map(|expected| expected == signature)
        .unwrap_or(false)
    }
}

fn build_client(server: &MockServer) -> PritunlClient {
    let credentials = Arc::new(StaticCredentials::new("vpn.invalid", TOKEN, SECRET));
    PritunlClient::builder()
        .base_url(server.uri())
        .credentials(credentials)
        .build()
        .unwrap()
}

fn build_client_with_nonce(server: &MockServer, nonce: &'static str) -> PritunlClient {
    let credentials = Arc::new(StaticCredentials::new("vpn.invalid", TOKEN, SECRET));
    PritunlClient::builder()
        .base_url(server.uri())
        .credentials(credentials)
        .nonce_provider(Arc::new(FixedNonce(nonce)))
        .build()
        .unwrap()
}

#[derive(Debug, Deserialize)]
struct KeyUsers {
    users: Vec<KeyUser>,
}

#[derive(Debug, Deserialize)]
struct KeyUser {
    id: String,
    name: String,
}

#[tokio::test]
async fn test_get_with_query_validates_signature_and_decodes() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "users": [
            { "id": "u1", "name": "alice" },
            { "id": "u2", "name": "bob" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/key/users"))
        .and(query_param("org", "5f1a2b3c4d5e6f7a8b9c0d1e"))
        .and(header("Auth-Token", TOKEN))
        .and(header_exists("Auth-Timestamp"))
        .and(header_exists("Auth-Nonce"))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let decoded = client
        .execute_json::<KeyUsers>(
            Request::get("/key/users").query("org", "5f1a2b3c4d5e6f7a8b9c0d1e"),
        )
        .await
        .unwrap();

    assert_eq!(decoded.status(), 200);
    let out = decoded.into_value().unwrap();
    assert_eq!(out.users.len(), 2);
    assert_eq!(out.users[0].id, "u1");
    assert_eq!(out.users[1].name, "bob");
}

#[tokio::test]
async fn test_signature_ignores_query_and_payload() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/user/org1/u1"))
        .and(header("Auth-Nonce", "0123456789abcdef0123456789abcdef"))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let client = build_client_with_nonce(&server, "0123456789abcdef0123456789abcdef");
    client
        .execute(Request::put("/user/org1/u1"))
        .await
        .unwrap();
    client
        .execute(
            Request::put("/user/org1/u1")
                .query("verbose", "true")
                .json(&serde_json::json!({ "name": "alice", "disabled": true })),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_content_type_only_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/organization"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organization"))
        .and(|request: &MockRequest| !request.headers.contains_key("content-type"))
        .and(|request: &MockRequest| request.body.is_empty())
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    client
        .execute(Request::post("/organization").json(&serde_json::json!({ "name": "acme" })))
        .await
        .unwrap();
    client.execute(Request::get("/organization")).await.unwrap();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    groups: Vec<String>,
    disabled: bool,
    pin: Option<String>,
}

#[tokio::test]
async fn test_payload_round_trips_through_echo_server() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/echo"))
        .respond_with(|request: &MockRequest| {
            ResponseTemplate::new(200).set_body_raw(request.body.clone(), "application/json")
        })
        .mount(&server)
        .await;

    let profile = Profile {
        name: "alice".to_string(),
        groups: vec!["ops".to_string(), "dev".to_string()],
        disabled: false,
        pin: None,
    };

    let client = build_client(&server);
    let echoed = client
        .execute_json::<Profile>(Request::post("/echo").json(&profile))
        .await
        .unwrap()
        .into_value()
        .unwrap();

    assert_eq!(echoed, profile);
}

#[tokio::test]
async fn test_not_found_is_not_an_error_and_not_parsed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organization/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>not found</html>"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let decoded = client
        .execute_json::<KeyUsers>(Request::get("/organization/missing"))
        .await
        .unwrap();

    assert!(decoded.response.is_not_found());
    assert!(decoded.value.is_none());
    assert_eq!(decoded.response.text(), "<html>not found</html>");
}

#[tokio::test]
async fn test_unauthorized_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organization"))
        .respond_with(ResponseTemplate::new(401).set_body_string("{"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let decoded = client
        .execute_json::<serde_json::Value>(Request::get("/organization"))
        .await
        .unwrap();

    assert!(decoded.response.is_unauthorized());
    assert!(decoded.value.is_none());
}

#[tokio::test]
async fn test_server_error_is_request_error_with_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/server"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.execute(Request::get("/server")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Request);
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
    assert!(err.to_string().contains("500"));
    match err {
        PritunlError::Status { body, .. } => assert_eq!(body, "boom"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_json_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/key/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"users\": [oops"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .execute_json::<KeyUsers>(Request::get("/key/users"))
        .await
        .unwrap_err();

    assert!(matches!(err, PritunlError::Parse(_)));
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[tokio::test]
async fn test_raw_execute_does_not_parse() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let response = client.execute(Request::get("/status")).await.unwrap();
    assert!(response.is_success());
    assert_eq!(&response.body[..], b"not json");
}

#[tokio::test]
async fn test_serialization_error_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut bad = std::collections::HashMap::new();
    bad.insert(vec![1u8], "value");

    let client = build_client(&server);
    let err = client
        .execute(Request::post("/organization").json(&bad))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Serialization);
}

#[tokio::test]
async fn test_relative_path_is_rejected() {
    let server = MockServer::start().await;
    let client = build_client(&server);

    let err = client.execute(Request::get("organization")).await.unwrap_err();
    assert!(matches!(err, PritunlError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_connection_refused_is_request_error() {
    let credentials = Arc::new(StaticCredentials::new("vpn.invalid", TOKEN, SECRET));
    let client = PritunlClient::builder()
        .base_url("http://127.0.0.1:1")
        .credentials(credentials)
        .build()
        .unwrap();

    let err = client.execute(Request::get("/organization")).await.unwrap_err();
    assert!(matches!(err, PritunlError::Request(_)));
    assert_eq!(err.kind(), ErrorKind::Request);
}

#[tokio::test]
async fn test_timeout_is_request_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let credentials = Arc::new(StaticCredentials::new("vpn.invalid", TOKEN, SECRET));
    let client = PritunlClient::builder()
        .base_url(server.uri())
        .credentials(credentials)
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let err = client.execute(Request::get("/slow")).await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err:?}");
    assert_eq!(err.kind(), ErrorKind::Request);
}

#[tokio::test]
async fn test_concurrent_requests_use_fresh_nonces() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organization"))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(8)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.execute(Request::get("/organization")).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let received = server.received_requests().await.unwrap();
    let nonces: HashSet<_> = received
        .iter()
        .filter_map(|r| r.headers.get("Auth-Nonce"))
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(nonces.len(), 8);

    let signatures: HashSet<_> = received
        .iter()
        .filter_map(|r| r.headers.get("Auth-Signature"))
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(signatures.len(), 8);
}

#[tokio::test]
async fn test_redirect_is_not_followed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/b"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.execute(Request::get("/a")).await.unwrap_err();

    assert!(matches!(err, PritunlError::Status { .. }));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(302));
    assert_eq!(err.kind(), ErrorKind::Request);
}

#[tokio::test]
async fn test_default_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .and(header(
            "user-agent",
            format!("pritunl-api-client/{}", env!("CARGO_PKG_VERSION")),
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    client.execute(Request::get("/status")).await.unwrap();
}

#[tokio::test]
async fn test_custom_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .and(header("user-agent", "terraform-provider-pritunl/1.0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = Arc::new(StaticCredentials::new("vpn.invalid", TOKEN, SECRET));
    let client = PritunlClient::builder()
        .base_url(server.uri())
        .credentials(credentials)
        .user_agent("terraform-provider-pritunl/1.0")
        .build()
        .unwrap();
    client.execute(Request::get("/status")).await.unwrap();
}
