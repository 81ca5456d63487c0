//! Integration tests for row CRUD against a mocked transport.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use glide_tables::api::Dialect;
use glide_tables::error::Error;
use glide_tables::error::TransportError;
use glide_tables::error::ValidationError;
use glide_tables::transport::HttpRequest;
use glide_tables::transport::HttpResponse;
use glide_tables::transport::Method;
use glide_tables::transport::Transport;
use glide_tables::ColumnType;
use glide_tables::Payload;
use glide_tables::Row;
use glide_tables::TableClient;
use glide_tables::TableConfig;
use glide_tables::TableSchema;

/// Transport double that records every request and replays canned responses.
#[derive(Clone, Default)]
struct MockTransport {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, String>>>>,
}

impl MockTransport {
    fn respond_with(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    fn fail_next(self) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err("connection refused".to_string()));
        self
    }

    fn recorded(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(url)) => Err(TransportError::invalid_url(url)),
            None => Ok(HttpResponse::new(200, "")),
        }
    }
}

fn schema() -> TableSchema {
    TableSchema::new()
        .column("name", ColumnType::String)
        .column("age", ColumnType::Number)
        .column("active", ColumnType::Boolean)
}

fn client_with(transport: MockTransport) -> TableClient {
    TableClient::builder()
        .config(TableConfig::new("tok", "app-1", "tbl-1").schema(schema()))
        .transport(transport)
        .build()
        .unwrap()
}

// =============================================================================
// Pre-flight validation
// =============================================================================

#[tokio::test]
async fn add_row_with_unknown_column_issues_no_request() {
    let transport = MockTransport::default();
    let client = client_with(transport.clone());

    let result = client
        .add_row(Row::new().set("nickname", "Ada"))
        .await;

    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::UnknownColumn { ref column })) if column == "nickname"
    ));
    assert!(transport.recorded().is_empty());
}

#[tokio::test]
async fn add_row_with_non_numeric_number_value_fails() {
    let transport = MockTransport::default();
    let client = client_with(transport.clone());

    let result = client.add_row(Row::new().set("age", "not a number")).await;

    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::TypeMismatch { ref column, .. })) if column == "age"
    ));
    assert!(transport.recorded().is_empty());
}

#[tokio::test]
async fn update_row_is_validated_like_add_row() {
    let transport = MockTransport::default();
    let client = client_with(transport.clone());

    let result = client
        .update_row("r1", Row::new().set("nickname", "Ada"))
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));
    assert!(transport.recorded().is_empty());
}

#[tokio::test]
async fn empty_strings_are_transmitted_as_null() {
    let transport = MockTransport::default().respond_with(200, "{}");
    let client = client_with(transport.clone());

    client
        .add_row(Row::new().set("name", "").set("age", ""))
        .await
        .unwrap();

    let requests = transport.recorded();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value =
        serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["rows"][0]["name"], serde_json::Value::Null);
    assert_eq!(body["rows"][0]["age"], serde_json::Value::Null);
}

// =============================================================================
// Error surface
// =============================================================================

#[tokio::test]
async fn every_method_surfaces_api_error_message() {
    let row = Row::new().set("name", "Ada");

    let transport = MockTransport::default().respond_with(500, r#"{"message":"boom"}"#);
    let err = client_with(transport).list_rows().await.unwrap_err();
    assert_api_error(err, 500, "boom");

    let transport = MockTransport::default().respond_with(500, r#"{"message":"boom"}"#);
    let err = client_with(transport).add_row(row.clone()).await.unwrap_err();
    assert_api_error(err, 500, "boom");

    let transport = MockTransport::default().respond_with(500, r#"{"message":"boom"}"#);
    let err = client_with(transport)
        .update_row("r1", row)
        .await
        .unwrap_err();
    assert_api_error(err, 500, "boom");

    let transport = MockTransport::default().respond_with(500, r#"{"message":"boom"}"#);
    let err = client_with(transport).delete_row("r1").await.unwrap_err();
    assert_api_error(err, 500, "boom");
}

fn assert_api_error(err: Error, status: u16, message: &str) {
    match err {
        Error::Api(api) => {
            assert_eq!(api.status_code(), status);
            assert_eq!(api.message(), message);
        }
        other => panic!("expected ApiError, got {:?}", other.to_string()),
    }
}

#[tokio::test]
async fn transport_failure_propagates_unmodified() {
    let transport = MockTransport::default().fail_next();
    let client = client_with(transport);

    let result = client.list_rows().await;
    assert!(matches!(result, Err(Error::Transport(_))));
}

// =============================================================================
// Success paths
// =============================================================================

#[tokio::test]
async fn list_rows_tolerates_non_json_body() {
    let transport = MockTransport::default().respond_with(200, "OK");
    let client = client_with(transport);

    let payload = client.list_rows().await.unwrap();
    assert_eq!(payload, Payload::Text("OK".into()));
}

#[tokio::test]
async fn list_rows_parses_rows_and_passes_pagination() {
    let transport =
        MockTransport::default().respond_with(200, r#"{"rows":[{"name":"Ada","age":36}]}"#);
    let client = client_with(transport.clone());

    let payload = client.list_rows().limit(25).offset(50).await.unwrap();
    let rows = payload.into_rows().unwrap();
    assert_eq!(rows[0].get_string("name").unwrap(), Some("Ada"));

    let requests = transport.recorded();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Get);
    assert!(requests[0].url.ends_with("/rows?limit=25&offset=50"));
    assert!(
        requests[0]
            .headers
            .contains(&("api-key".into(), "tok".into()))
    );
}

#[tokio::test]
async fn delete_row_issues_one_delete_to_the_row_url() {
    let transport = MockTransport::default().respond_with(204, "");
    let client = client_with(transport.clone());

    client.delete_row("r1").await.unwrap();

    let requests = transport.recorded();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Delete);
    assert_eq!(
        requests[0].url,
        "https://api.glideapp.io/api/data/v0/app-1/tables/tbl-1/rows/r1"
    );
    assert!(requests[0].body.is_none());
}

#[tokio::test]
async fn update_row_patches_values_wrapper() {
    let transport = MockTransport::default().respond_with(200, "{}");
    let client = client_with(transport.clone());

    client
        .update_row("r1", Row::new().set("name", "Grace"))
        .await
        .unwrap();

    let requests = transport.recorded();
    assert_eq!(requests[0].method, Method::Patch);
    let body: serde_json::Value =
        serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["values"]["name"], serde_json::json!("Grace"));
}

// =============================================================================
// Legacy REST dialect
// =============================================================================

#[tokio::test]
async fn rest_dialect_uses_bearer_auth_and_raw_row_body() {
    let transport = MockTransport::default().respond_with(200, "{}");
    let client = TableClient::builder()
        .config(TableConfig::new("tok", "app-1", "tbl-1").schema(schema()))
        .dialect(Dialect::Rest)
        .transport(transport.clone())
        .build()
        .unwrap();

    client.add_row(Row::new().set("name", "Ada")).await.unwrap();

    let requests = transport.recorded();
    assert_eq!(
        requests[0].url,
        "https://api.glideapp.io/api/v1/tables/app-1/tbl-1"
    );
    assert!(
        requests[0]
            .headers
            .contains(&("Authorization".into(), "Bearer tok".into()))
    );
    let body: serde_json::Value =
        serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({ "name": "Ada" }));
}

#[tokio::test]
async fn rest_dialect_rejects_update_and_delete_locally() {
    let transport = MockTransport::default();
    let client = TableClient::builder()
        .config(TableConfig::new("tok", "app-1", "tbl-1").schema(schema()))
        .dialect(Dialect::Rest)
        .transport(transport.clone())
        .build()
        .unwrap();

    assert!(matches!(
        client.update_row("r1", Row::new()).await,
        Err(Error::InvalidOperation(_))
    ));
    assert!(matches!(
        client.delete_row("r1").await,
        Err(Error::InvalidOperation(_))
    ));
    assert!(transport.recorded().is_empty());
}
