//! Tests for the HTTP company search collaborator against a mock backend.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tickerlens::services::backend_client::BackendClient;
use tickerlens::services::company_search::CompanySearch;
use tickerlens::types::errors::ApiError;
use tickerlens::types::session::AccessToken;
use tickerlens::types::settings::ApiSettings;

fn client(base_url: &str) -> BackendClient {
    let settings = ApiSettings {
        base_url: base_url.to_string(),
        request_timeout_secs: 5,
    };
    BackendClient::new(&settings, 30).unwrap()
}

fn token() -> AccessToken {
    AccessToken::new("secret-token")
}

#[tokio::test]
async fn test_search_company_normalizes_ticker() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search/search_company"))
        .and(header("authorization", "Bearer secret-token"))
        .and(body_json(json!({"ticker": "NVDA", "days_ago": 14})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "company_name": "NVIDIA Corporation",
            "ticker": "NVDA",
            "search_id": 300,
            "search_id_b64": "ASw",
            "company_id": 12,
            "analysis": {"score": 0.4}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server.uri())
        .search_company(&token(), "  nvda ", 14)
        .await
        .unwrap();

    assert_eq!(result.search_id, 300);
    assert_eq!(result.search_id_b64, "ASw");
    assert_eq!(result.company_id, Some(12));
    assert_eq!(result.analysis["score"], json!(0.4));
}

#[tokio::test]
async fn test_unknown_ticker_message_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search/search_company"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Company not found"})),
        )
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .search_company(&token(), "ZZZZ", 7)
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::NotFound("Company not found".to_string()));
}

#[tokio::test]
async fn test_daily_limit_is_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search/search_company"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(json!({"message": "Daily search limit reached."})),
        )
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .search_company(&token(), "AAPL", 7)
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::RateLimited("Daily search limit reached.".to_string()));
}

#[tokio::test]
async fn test_get_search_decodes_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search/get_search/61"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 61,
            "company_name": "Apple Inc.",
            "ticker": "AAPL",
            "positive_summaries": [{"summary": "strong quarter"}],
            "negative_summaries": [],
            "top_sources": [],
            "score": 0.25,
            "created_by": "user-1",
            "created_at": "Tue, 15 Oct 2024 12:00:00 GMT"
        })))
        .mount(&server)
        .await;

    let detail = client(&server.uri()).get_search(&token(), 61).await.unwrap();

    assert_eq!(detail.id, 61);
    assert_eq!(detail.ticker, "AAPL");
    assert_eq!(detail.positive_summaries.len(), 1);
    assert_eq!(detail.score, 0.25);
}

#[tokio::test]
async fn test_get_missing_search_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search/get_search/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Search not found"})))
        .mount(&server)
        .await;

    let err = client(&server.uri()).get_search(&token(), 404).await.unwrap_err();

    assert_eq!(err, ApiError::NotFound("Search not found".to_string()));
}

#[tokio::test]
async fn test_delete_search() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/search/delete/61"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Search deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server.uri()).delete_search(&token(), 61).await.unwrap();
}

#[tokio::test]
async fn test_delete_forbidden_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/search/delete/61"))
        .respond_with(ResponseTemplate::new(403).set_body_string(""))
        .mount(&server)
        .await;

    let err = client(&server.uri()).delete_search(&token(), 61).await.unwrap_err();

    assert_eq!(err, ApiError::Auth("An unexpected error occurred".to_string()));
}
