//! Single-request execution
//!
//! Turns a [`RequestSpec`] into one HTTP exchange:
//! - URL = configured base + path (+ query for non-null parameters)
//! - JSON content type, bearer token from the [`TokenStore`] when present
//! - Body parsed into an [`Envelope`]; anything unparseable becomes a
//!   status envelope
//!
//! Transport failures are the only errors returned.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use roster_common::TokenStore;
use roster_domain::{Envelope, RosterError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::client::HttpClient;
use super::url::{join_url, Query};
use crate::errors::InfraError;

/// Whether the session cookie store takes part in a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Credentials {
    /// Attach stored cookies and record `Set-Cookie` responses.
    #[default]
    Include,
    /// Leave the cookie store untouched.
    Omit,
}

/// Per-call overrides.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub credentials: Credentials,
    /// Extra headers, applied after the defaults so they can replace them.
    pub headers: HeaderMap,
    /// Inject `Authorization: Bearer <token>` when a token is stored.
    pub bearer: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { credentials: Credentials::Include, headers: HeaderMap::new(), bearer: true }
    }
}

impl RequestOptions {
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    #[must_use]
    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    pub fn without_bearer(mut self) -> Self {
        self.bearer = false;
        self
    }
}

/// Everything needed to (re)build one request.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub query: Query,
    pub body: Option<Value>,
}

impl RequestSpec {
    pub fn get(path: impl Into<String>, query: Query) -> Self {
        Self { method: Method::GET, path: path.into(), query, body: None }
    }

    pub fn post(path: impl Into<String>, body: Option<Value>) -> Self {
        Self { method: Method::POST, path: path.into(), query: Query::new(), body }
    }
}

/// HTTP status together with the envelope read from (or synthesized for)
/// the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange<T> {
    pub status: StatusCode,
    pub envelope: Envelope<T>,
}

impl<T> Exchange<T> {
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }
}

/// Sends requests against one base URL, reading the bearer token from a
/// shared [`TokenStore`] at send time.
#[derive(Clone)]
pub struct RequestExecutor {
    http: HttpClient,
    base_url: String,
    tokens: Arc<TokenStore>,
}

impl RequestExecutor {
    pub fn new(http: HttpClient, base_url: impl Into<String>, tokens: Arc<TokenStore>) -> Self {
        Self { http, base_url: base_url.into(), tokens }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    /// Send `spec` once.
    ///
    /// # Errors
    /// `RosterError::Network` / `RosterError::Timeout` when no response was
    /// received, `RosterError::Config` when the URL cannot be built.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        spec: &RequestSpec,
        options: &RequestOptions,
    ) -> Result<Exchange<T>, RosterError> {
        let url = join_url(&self.base_url, &spec.path, &spec.query)?;

        let mut builder = self
            .http
            .request(spec.method.clone(), url, options.credentials)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if options.bearer {
            if let Some(token) = self.tokens.get() {
                builder = builder.bearer_auth(token);
            }
        }

        if !options.headers.is_empty() {
            builder = builder.headers(options.headers.clone());
        }

        if let Some(body) = &spec.body {
            let bytes = serde_json::to_vec(body).map_err(|e| RosterError::from(InfraError::from(e)))?;
            builder = builder.body(bytes);
        }

        let response = self.http.send(builder).await?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| RosterError::from(InfraError::from(e)))?;

        let envelope = match serde_json::from_slice::<Envelope<T>>(&bytes) {
            Ok(envelope) => envelope,
            Err(err) => {
                debug!(%status, error = %err, "response body is not an envelope");
                Envelope::from_status(status.as_u16(), status.canonical_reason().unwrap_or_default())
            }
        };

        Ok(Exchange { status, envelope })
    }
}

#[allow(clippy::missing_fields_in_debug)]
impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor").field("base_url", &self.base_url).finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;

    fn executor(server: &MockServer, tokens: Arc<TokenStore>) -> RequestExecutor {
        RequestExecutor::new(HttpClient::new().unwrap(), format!("{}/api/", server.uri()), tokens)
    }

    #[tokio::test]
    async fn sends_json_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/students"))
            .and(header("authorization", "Bearer tok"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"name": "Ann"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": "ok", "data": 5})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let tokens = Arc::new(TokenStore::in_memory());
        tokens.set("tok");
        let exchange: Exchange<i64> = executor(&server, tokens)
            .execute(
                &RequestSpec::post("/students", Some(json!({"name": "Ann"}))),
                &RequestOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(exchange.status, StatusCode::OK);
        assert_eq!(exchange.envelope, Envelope { code: 0, message: "ok".into(), data: Some(5) });
    }

    #[tokio::test]
    async fn omits_authorization_without_token_or_when_disabled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .and(query_param("page", "2"))
            .respond_with(|req: &Request| {
                let has_auth = req.headers.contains_key("authorization");
                ResponseTemplate::new(200).set_body_json(json!({"code": 0, "data": has_auth}))
            })
            .mount(&server)
            .await;

        let tokens = Arc::new(TokenStore::in_memory());
        let exec = executor(&server, tokens.clone());
        let spec = RequestSpec::get("ping", Query::new().push("page", Some(2)));

        let anonymous: Exchange<bool> = exec.execute(&spec, &RequestOptions::default()).await.unwrap();
        assert_eq!(anonymous.envelope.data, Some(false));

        tokens.set("tok");
        let suppressed: Exchange<bool> =
            exec.execute(&spec, &RequestOptions::default().without_bearer()).await.unwrap();
        assert_eq!(suppressed.envelope.data, Some(false));

        let authed: Exchange<bool> = exec.execute(&spec, &RequestOptions::default()).await.unwrap();
        assert_eq!(authed.envelope.data, Some(true));
    }

    #[tokio::test]
    async fn non_json_body_becomes_status_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/broken"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let exchange: Exchange<Value> = executor(&server, Arc::new(TokenStore::in_memory()))
            .execute(&RequestSpec::get("/broken", Query::new()), &RequestOptions::default())
            .await
            .unwrap();

        assert_eq!(exchange.status, StatusCode::BAD_GATEWAY);
        assert_eq!(exchange.envelope, Envelope::failure(502, "Bad Gateway"));
    }

    #[tokio::test]
    async fn null_message_keeps_server_code_and_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/count"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": null, "data": 5})),
            )
            .mount(&server)
            .await;

        let exchange: Exchange<i64> = executor(&server, Arc::new(TokenStore::in_memory()))
            .execute(&RequestSpec::get("/count", Query::new()), &RequestOptions::default())
            .await
            .unwrap();

        assert_eq!(exchange.envelope, Envelope::success(5));
    }

    #[tokio::test]
    async fn http_errors_with_envelope_are_returned_as_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/me"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"code": 401, "message": "expired", "data": null})),
            )
            .mount(&server)
            .await;

        let exchange: Exchange<Value> = executor(&server, Arc::new(TokenStore::in_memory()))
            .execute(&RequestSpec::get("/me", Query::new()), &RequestOptions::default())
            .await
            .unwrap();

        assert!(exchange.is_unauthorized());
        assert_eq!(exchange.envelope.message, "expired");
        assert_eq!(exchange.envelope.data, None);
    }

    #[tokio::test]
    async fn extra_headers_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/x"))
            .and(header("accept-language", "zh-CN"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0, "data": null})))
            .expect(1)
            .mount(&server)
            .await;

        let options = RequestOptions::default().header(
            reqwest::header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("zh-CN"),
        );
        let exchange: Exchange<Value> = executor(&server, Arc::new(TokenStore::in_memory()))
            .execute(&RequestSpec::get("x", Query::new()), &options)
            .await
            .unwrap();

        assert!(exchange.envelope.is_success());
    }
}
