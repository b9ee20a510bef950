//! # Query Service
//!
//! Posts query text to the query endpoint and normalizes whatever comes back
//! into an [`ExecutionResult`]. Nothing here returns an error: transport
//! failures and unreadable bodies degrade into a result with blank fields.

use crate::panel::models::ExecutionResult;
use crate::panel::pretty::to_pretty_compact;
use crate::profile::PanelProfile;
use bytes::Bytes;
use encoding_rs::{Encoding, UTF_8};
use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE};
use tokio::sync::mpsc;

/// Completion of a query submitted with [`QueryRunner::submit`]
#[derive(Debug, Clone, PartialEq)]
pub struct QueryCompletion {
    pub sequence: u64,
    pub result: ExecutionResult,
}

/// Service for running queries against one endpoint
pub struct QueryRunner {
    client: reqwest::Client,
    endpoint: String,
    authorization: Option<String>,
    /// Channel for receiving completions of spawned runs
    completion_receiver: mpsc::Receiver<QueryCompletion>,
    /// Channel sender handed to spawned runs
    completion_sender: mpsc::Sender<QueryCompletion>,
}

impl QueryRunner {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let (completion_sender, completion_receiver) = mpsc::channel(10);
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            authorization: None,
            completion_receiver,
            completion_sender,
        }
    }

    /// Runner for the profile's query URL and credentials
    pub fn from_profile(profile: &PanelProfile) -> Self {
        Self::new(profile.query_url()).with_authorization(
            profile
                .credentials
                .as_ref()
                .map(|credentials| credentials.authorization_header()),
        )
    }

    pub fn with_authorization(mut self, authorization: Option<String>) -> Self {
        self.authorization = authorization;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post `text` verbatim and wait for the normalized result
    pub async fn run_query(&self, text: &str) -> ExecutionResult {
        execute(
            &self.client,
            &self.endpoint,
            self.authorization.as_deref(),
            text.to_string(),
        )
        .await
    }

    /// Run `text` on a spawned task; the result arrives as a [`QueryCompletion`]
    pub fn submit(&self, sequence: u64, text: String) {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let authorization = self.authorization.clone();
        let completion_sender = self.completion_sender.clone();

        tracing::debug!("Submitting query #{} to {}", sequence, endpoint);
        tokio::spawn(async move {
            let result = execute(&client, &endpoint, authorization.as_deref(), text).await;
            // Receiver may be gone if the console already exited
            let _ = completion_sender
                .send(QueryCompletion { sequence, result })
                .await;
        });
    }

    /// Next finished run, if any (non-blocking)
    pub fn poll_completion(&mut self) -> Option<QueryCompletion> {
        self.completion_receiver.try_recv().ok()
    }

    /// Wait for the next finished run
    pub async fn next_completion(&mut self) -> Option<QueryCompletion> {
        self.completion_receiver.recv().await
    }
}

async fn execute(
    client: &reqwest::Client,
    endpoint: &str,
    authorization: Option<&str>,
    body: String,
) -> ExecutionResult {
    let mut request = client
        .post(endpoint)
        .header(CONTENT_TYPE, "application/json")
        .body(body);
    if let Some(authorization) = authorization {
        request = request.header(AUTHORIZATION, authorization);
    }

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Query request to {} failed: {}", endpoint, e);
            let status = e.status();
            return ExecutionResult {
                status: status.map(|s| s.as_u16()),
                status_text: status
                    .and_then(|s| s.canonical_reason())
                    .map(str::to_string),
                ok: None,
                data: String::new(),
            };
        }
    };

    let status = response.status();
    let charset = charset_of(response.headers());
    let data = match response.bytes().await {
        Ok(body) => format_body(&body, charset.as_deref()),
        Err(e) => {
            tracing::warn!("Failed to read query response body: {}", e);
            String::new()
        }
    };

    tracing::info!("Query to {} returned {}", endpoint, status);
    ExecutionResult::from_status(
        status.as_u16(),
        status.canonical_reason().unwrap_or(""),
        data,
    )
}

/// Decode `body` and pretty-print it, or return an empty string if it is not JSON
pub fn format_body(body: &Bytes, charset: Option<&str>) -> String {
    let encoding = charset
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, _, had_errors) = encoding.decode(body);
    if had_errors {
        tracing::debug!("Response body contained invalid {} sequences", encoding.name());
    }

    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(value) => to_pretty_compact(&value),
        Err(e) => {
            tracing::debug!("Response body is not JSON: {}", e);
            String::new()
        }
    }
}

/// `charset` parameter of the Content-Type header
fn charset_of(headers: &HeaderMap) -> Option<String> {
    let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"').to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn runner_for(server: &mockito::ServerGuard) -> QueryRunner {
        QueryRunner::new(format!("{}/api/docs/query", server.url()))
    }

    #[tokio::test]
    async fn run_query_should_pretty_print_json_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/docs/query")
            .match_header("content-type", "application/json")
            .match_body(r#"{"site_id": "foo.com"}"#)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"a":1}"#)
            .create_async()
            .await;

        let result = runner_for(&server)
            .run_query(r#"{"site_id": "foo.com"}"#)
            .await;

        mock.assert_async().await;
        assert_eq!(
            result,
            ExecutionResult {
                status: Some(200),
                status_text: Some("OK".into()),
                ok: Some(true),
                data: r#"{"a": 1}"#.into(),
            }
        );
    }

    #[tokio::test]
    async fn run_query_should_keep_status_when_body_is_not_json() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/docs/query")
            .with_status(400)
            .with_body("oops")
            .create_async()
            .await;

        let result = runner_for(&server).run_query("not json").await;

        assert_eq!(result.status, Some(400));
        assert_eq!(result.status_text.as_deref(), Some("Bad Request"));
        assert_eq!(result.ok, Some(false));
        assert_eq!(result.data, "");
    }

    #[tokio::test]
    async fn run_query_should_send_authorization_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/docs/query")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let runner = runner_for(&server)
            .with_authorization(Some("Bearer secret".into()));
        let result = runner.run_query("{}").await;

        mock.assert_async().await;
        assert_eq!(result.data, "{}");
    }

    #[tokio::test]
    async fn run_query_should_survive_transport_failure() {
        // Nothing listens on port 1
        let runner = QueryRunner::new("http://127.0.0.1:1/api/docs/query");

        let result = runner.run_query("{}").await;

        assert_eq!(result.status, None);
        assert_eq!(result.status_text, None);
        assert_eq!(result.ok, None);
        assert_eq!(result.data, "");
    }

    #[tokio::test]
    async fn submit_should_deliver_completion_with_sequence() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/docs/query")
            .with_status(200)
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let mut runner = runner_for(&server);
        runner.submit(7, "{}".into());

        let completion = runner.next_completion().await.unwrap();
        assert_eq!(completion.sequence, 7);
        assert_eq!(completion.result.data, r#"{"ok": true}"#);
        assert!(runner.poll_completion().is_none());
    }

    #[test]
    fn format_body_should_honor_charset() {
        let body = Bytes::from_static(b"{\"name\":\"caf\xe9\"}");
        assert_eq!(
            format_body(&body, Some("iso-8859-1")),
            r#"{"name": "café"}"#
        );
    }

    #[test]
    fn format_body_should_return_empty_for_non_json() {
        assert_eq!(format_body(&Bytes::from_static(b"<html>"), None), "");
        assert_eq!(format_body(&Bytes::new(), None), "");
    }

    #[test]
    fn charset_of_should_read_content_type_parameter() {
        let mut headers = HeaderMap::new();
        assert_eq!(charset_of(&headers), None);

        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; Charset=\"windows-1252\""),
        );
        assert_eq!(charset_of(&headers).as_deref(), Some("windows-1252"));
    }
}
