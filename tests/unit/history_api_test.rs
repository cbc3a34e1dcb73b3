//! Tests for the HTTP history fetcher against a mock backend.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tickerlens::services::backend_client::BackendClient;
use tickerlens::services::history_api::HistoryFetcher;
use tickerlens::types::errors::ApiError;
use tickerlens::types::session::AccessToken;
use tickerlens::types::settings::ApiSettings;

fn client(base_url: &str, page_size: u32) -> BackendClient {
    let settings = ApiSettings {
        base_url: base_url.to_string(),
        request_timeout_secs: 5,
    };
    BackendClient::new(&settings, page_size).unwrap()
}

fn token() -> AccessToken {
    AccessToken::new("secret-token")
}

#[tokio::test]
async fn test_fetch_sends_page_limit_and_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search/search_history"))
        .and(query_param("page", "3"))
        .and(query_param("limit", "30"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "label": "Search History",
            "searches": [
                {
                    "search_id": 61,
                    "ticker": "AAPL",
                    "href": "/search/PQ",
                    "label": "Apple Inc.",
                    "created_at": "Tue, 15 Oct 2024 12:00:00 GMT",
                    "active": false
                },
                {
                    "search_id": 60,
                    "ticker": "MSFT",
                    "href": "/search/PA",
                    "label": "Microsoft Corporation",
                    "created_at": "Mon, 14 Oct 2024 09:30:00 GMT",
                    "active": false
                }
            ],
            "has_more": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server.uri(), 30)
        .fetch_history_page(&token(), 3)
        .await
        .unwrap();

    assert_eq!(page.label, "Search History");
    assert!(page.has_more);
    let ids: Vec<u64> = page.searches.iter().map(|e| e.search_id).collect();
    assert_eq!(ids, vec![61, 60]);
    assert_eq!(page.searches[0].ticker, "AAPL");
}

#[tokio::test]
async fn test_missing_optional_fields_use_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search/search_history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searches": [
                {"search_id": 1, "ticker": "IBM", "href": "/search/AQ", "created_at": "2024-10-15T12:00:00Z"}
            ]
        })))
        .mount(&server)
        .await;

    let page = client(&server.uri(), 30)
        .fetch_history_page(&token(), 1)
        .await
        .unwrap();

    assert_eq!(page.label, "");
    assert!(!page.has_more);
    assert_eq!(page.searches[0].label, "");
    assert!(!page.searches[0].active);
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search/search_history"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Token has expired"})),
        )
        .mount(&server)
        .await;

    let err = client(&server.uri(), 30)
        .fetch_history_page(&token(), 1)
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Auth("Token has expired".to_string()));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_server_error_carries_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search/search_history"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "database unavailable"})),
        )
        .mount(&server)
        .await;

    let err = client(&server.uri(), 30)
        .fetch_history_page(&token(), 1)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Server {
            status: 500,
            message: "database unavailable".to_string()
        }
    );
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_unreadable_body_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search/search_history"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server.uri(), 30)
        .fetch_history_page(&token(), 1)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Server { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let err = client(&uri, 30)
        .fetch_history_page(&token(), 1)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Network(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_empty_token_is_rejected_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server.uri(), 30)
        .fetch_history_page(&AccessToken::new(""), 1)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Auth(_)));
}
