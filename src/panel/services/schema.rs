//! # Schema Service
//!
//! Fetches the JSON Schema a query editor validates against.

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

/// A fetched schema and the URI it came from
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    pub uri: String,
    pub schema: Value,
}

impl SchemaDocument {
    pub fn new(uri: impl Into<String>, schema: Value) -> Self {
        Self {
            uri: uri.into(),
            schema,
        }
    }

    /// Compile into a validator
    pub fn compile(&self) -> Result<jsonschema::Validator> {
        jsonschema::validator_for(&self.schema)
            .map_err(|e| anyhow!("Invalid schema at {}: {}", self.uri, e))
    }
}

pub struct SchemaService {
    client: reqwest::Client,
}

impl SchemaService {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// GET `uri` and parse the body as a schema
    pub async fn fetch(&self, uri: &str) -> Result<SchemaDocument> {
        tracing::debug!("Fetching schema from {}", uri);
        let schema = self
            .client
            .get(uri)
            .send()
            .await
            .with_context(|| format!("Failed to request schema {uri}"))?
            .error_for_status()
            .with_context(|| format!("Schema request {uri} was not successful"))?
            .json::<Value>()
            .await
            .with_context(|| format!("Schema at {uri} is not JSON"))?;
        Ok(SchemaDocument::new(uri, schema))
    }

    /// Fetch the schema if one is configured, logging instead of failing
    pub async fn fetch_optional(&self, uri: Option<&str>) -> Option<SchemaDocument> {
        let uri = uri?;
        match self.fetch(uri).await {
            Ok(document) => Some(document),
            Err(e) => {
                tracing::warn!("Schema validation disabled: {:#}", e);
                None
            }
        }
    }
}

impl Default for SchemaService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn fetch_should_return_schema_document() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/docs/query/schema.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"type": "object", "required": ["site_id"]}"#)
            .create_async()
            .await;
        let uri = format!("{}/api/docs/query/schema.json", server.url());

        let document = SchemaService::new().fetch(&uri).await.unwrap();

        assert_eq!(document.uri, uri);
        assert_eq!(
            document.schema,
            json!({"type": "object", "required": ["site_id"]})
        );
        assert!(document.compile().is_ok());
    }

    #[tokio::test]
    async fn fetch_optional_should_swallow_http_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/schema.json")
            .with_status(404)
            .create_async()
            .await;
        let uri = format!("{}/schema.json", server.url());

        let service = SchemaService::new();
        assert!(service.fetch_optional(Some(&uri)).await.is_none());
        assert!(service.fetch_optional(None).await.is_none());
    }

    #[test]
    fn compile_should_reject_invalid_schema() {
        let document = SchemaDocument::new("mem://bad", json!({"type": 12}));
        assert!(document.compile().is_err());
    }
}
