use httpmock::prelude::*;
use serde_json::json;

use showcase::content::Layout;
use showcase::http::JsonClient;
use showcase::{Config, ContentClient, FetchError};

const QUERY_PATH: &str = "/v2025-09-29/data/query/production";

fn config(server: &MockServer) -> Config {
  let mut config = Config::default();
  config.content.api_url = Some(server.base_url());
  config.http.backoff_base_ms = 1;
  config.http.timeout_ms = 2_000;
  config
}

fn client(config: &Config) -> ContentClient {
  ContentClient::new(config, JsonClient::new().unwrap()).unwrap()
}

fn documents() -> serde_json::Value {
  json!({
    "query": "*[_type == \"project\"]",
    "ms": 4,
    "result": [
      {
        "_id": "proj-1",
        "_type": "project",
        "title": "Booking Platform",
        "category": "fullstack",
        "mainImage": {"asset": {"_ref": "image-9f8e7d-1920x1080-png"}},
        "layout": "tall"
      },
      {"_id": "proj-2", "_type": "project", "category": "nodejs"},
      {"_id": "proj-3", "_type": "project", "category": "ux-ui"},
      {"_id": "proj-4", "_type": "project", "category": "node"}
    ]
  })
}

#[tokio::test]
async fn queries_and_normalizes_projects() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when
        .method(GET)
        .path(QUERY_PATH)
        .query_param("query", r#"*[_type == "project"]"#)
        .query_param("perspective", "drafts");
      then.status(200).json_body(documents());
    })
    .await;

  let mut client = client(&config(&server));
  let projects = client.projects().await.unwrap();

  assert_eq!(projects.len(), 4);
  assert_eq!(projects[0].title, "Booking Platform");
  assert_eq!(projects[0].category, "FullStack");
  assert_eq!(projects[0].layout, Layout::Tall);
  assert!(projects[0]
    .image
    .starts_with("https://cdn.sanity.io/images/kysyrox3/production/9f8e7d-1920x1080.png?"));

  // Positional layouts for documents without a hint
  assert_eq!(projects[1].layout, Layout::Square);
  assert_eq!(projects[2].layout, Layout::Tall);
  assert_eq!(projects[3].layout, Layout::Square);
  assert_eq!(projects[1].image, "/placeholder-project.jpg");

  mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn lookups_reuse_the_cached_query() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when.method(GET).path(QUERY_PATH);
      then.status(200).json_body(documents());
    })
    .await;

  let mut client = client(&config(&server));

  assert_eq!(
    client.categories().await.unwrap(),
    vec!["FullStack", "Backend", "UI UX"]
  );
  let found = client.project_by_id("proj-3").await.unwrap().unwrap();
  assert_eq!(found.category, "UI UX");
  assert!(client.project_by_id("missing").await.unwrap().is_none());

  let backend = client.projects_in("backend").await.unwrap();
  let ids: Vec<&str> = backend.iter().map(|p| p.id.as_str()).collect();
  assert_eq!(ids, vec!["proj-2", "proj-4"]);

  mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn empty_result_is_a_successful_empty_list() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path(QUERY_PATH);
      then.status(200).json_body(json!({"query": "*", "ms": 1}));
    })
    .await;

  let mut client = client(&config(&server));
  assert!(client.projects().await.unwrap().is_empty());
  assert!(client.categories().await.unwrap().is_empty());
}

#[tokio::test]
async fn not_found_is_retried_then_reported_with_status() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when.method(GET).path(QUERY_PATH);
      then.status(404);
    })
    .await;

  let mut client = client(&config(&server));
  let err = client.projects().await.unwrap_err();

  assert!(matches!(err, FetchError::Status { status: 404, .. }));
  mock.assert_calls_async(3).await;
}

#[tokio::test]
async fn failed_catalog_fetch_is_not_retried_for_categories() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when.method(GET).path(QUERY_PATH);
      then.status(503);
    })
    .await;

  let mut config = config(&server);
  config.http.max_retries = 3;
  let mut client = client(&config);

  let err = client.projects_with_categories().await.unwrap_err();
  assert_eq!(err.status(), Some(503));
  mock.assert_calls_async(3).await;
}

#[tokio::test]
async fn catalog_categories_follow_project_order() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path(QUERY_PATH);
      then.status(200).json_body(documents());
    })
    .await;

  let mut client = client(&config(&server));
  let (projects, categories) = client.projects_with_categories().await.unwrap();
  assert_eq!(projects.len(), 4);
  assert_eq!(categories, vec!["FullStack", "Backend", "UI UX"]);
}

#[tokio::test]
async fn one_mistyped_document_does_not_sink_the_batch() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when.method(GET).path(QUERY_PATH);
      then.status(200).json_body(json!({
        "result": [
          {"_id": "ok", "year": "2023"},
          {"_id": "odd", "year": 2024, "featured": "yes"}
        ]
      }));
    })
    .await;

  let mut client = client(&config(&server));
  let projects = client.projects().await.unwrap();

  assert_eq!(projects.len(), 2);
  assert_eq!(projects[0].year, "2023");
  assert_eq!(projects[1].year, "2024");
  assert!(!projects[1].featured);
  mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn expired_cache_goes_back_to_the_network() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when.method(GET).path(QUERY_PATH);
      then.status(200).json_body(documents());
    })
    .await;

  let mut config = config(&server);
  config.http.cache_ttl_ms = 300;
  let mut client = client(&config);

  client.projects().await.unwrap();
  client.projects().await.unwrap();
  mock.assert_calls_async(1).await;

  tokio::time::sleep(std::time::Duration::from_millis(400)).await;
  client.projects().await.unwrap();
  mock.assert_calls_async(2).await;
}
