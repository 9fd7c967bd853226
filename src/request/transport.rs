//! Network seam of the request layer.
//!
//! The cache never talks to the network; the request layer reaches it
//! through [`Transport`], so the booking endpoints can run against reqwest in
//! production and against an in-process fake in tests.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::TransportError;
use crate::request::key::query_pairs;

// == Method ==
/// HTTP methods used by the booking API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Returns true for methods that change server state.
    pub fn is_mutating(self) -> bool {
        !matches!(self, Method::Get)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

// == Api Request ==
/// A request against the booking API, relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Sets query parameters from any serializable object; nulls are skipped.
    pub fn with_query<P: Serialize + ?Sized>(mut self, params: &P) -> serde_json::Result<Self> {
        self.query = query_pairs(params)?;
        Ok(self)
    }

    /// Sets the JSON body.
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> serde_json::Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

// == Api Response ==
/// A successful (2xx) response with its body still undecoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Response with a JSON body.
    pub fn json_body(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// Decodes the body as JSON. A blank body decodes as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return serde_json::from_value(Value::Null);
        }
        serde_json::from_slice(&self.body)
    }
}

// == Transport Trait ==
/// Sends a request. Only 2xx responses are `Ok`; anything else is a
/// [`TransportError`]. Bodies are left for the caller to decode.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        (**self).send(request).await
    }
}

// == Token Source ==
/// Supplies the bearer token attached to outgoing requests.
///
/// Token acquisition and refresh live outside this crate.
pub trait TokenSource: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

/// A fixed token, mostly useful for tools and tests.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl TokenSource for StaticToken {
    fn access_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}
