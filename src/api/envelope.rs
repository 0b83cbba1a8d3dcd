//! Invocation contract: the runtime-neutral request and response shapes the
//! handler speaks. The HTTP adapter and the `invoke` command both translate
//! into and out of these.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};

pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
pub const CONTENT_TYPE: &str = "Content-Type";

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationRequest {
    #[serde(default = "default_method", alias = "httpMethod")]
    pub method: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(
        default,
        alias = "queryStringParameters",
        deserialize_with = "null_as_empty"
    )]
    pub query_parameters: BTreeMap<String, String>,
}

fn default_method() -> String {
    "GET".to_string()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl InvocationRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            body: None,
            query_parameters: BTreeMap::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_parameters.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl InvocationResponse {
    /// A JSON-bodied response carrying the allow-origin header.
    pub fn json(status: StatusCode, body: serde_json::Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), "application/json".to_string());
        headers.insert(ALLOW_ORIGIN.to_string(), "*".to_string());
        Self {
            status_code: status.as_u16(),
            headers,
            body: body.to_string(),
        }
    }

    /// Answer to a CORS preflight: empty body, no content type.
    pub fn preflight() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(ALLOW_ORIGIN.to_string(), "*".to_string());
        headers.insert(ALLOW_METHODS.to_string(), ALLOWED_METHODS.to_string());
        headers.insert(ALLOW_HEADERS.to_string(), ALLOWED_HEADERS.to_string());
        Self {
            status_code: StatusCode::OK.as_u16(),
            headers,
            body: String::new(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
