use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::CookieStore;
use reqwest::header::HeaderValue;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use roster_domain::constants::DEFAULT_TIMEOUT_SECS;
use roster_domain::RosterError;
use tracing::debug;
use url::Url;

use super::executor::Credentials;
use crate::errors::InfraError;

/// HTTP client with a fixed timeout and an optional session cookie store.
///
/// Two reqwest clients share the same settings: one attaches and records
/// cookies (`Credentials::Include`), the other never touches them
/// (`Credentials::Omit`). Requests are sent exactly once.
#[derive(Clone)]
pub struct HttpClient {
    with_cookies: ReqwestClient,
    without_cookies: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, RosterError> {
        Self::builder().build()
    }

    /// Create a request builder for the given credentials mode.
    pub fn request(&self, method: Method, url: Url, credentials: Credentials) -> RequestBuilder {
        let client = match credentials {
            Credentials::Include => &self.with_cookies,
            Credentials::Omit => &self.without_cookies,
        };
        client.request(method, url)
    }

    /// Execute the provided request builder.
    ///
    /// HTTP error statuses are returned as responses; only transport failures
    /// become errors.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, RosterError> {
        let (client, request) = builder.build_split();
        let request = request.map_err(|err| RosterError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

/// Builder for [`HttpClient`].
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    cookie_store: Option<Arc<dyn CookieStore>>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            cookie_store: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Cookie store used for `Credentials::Include` requests.
    ///
    /// Defaults to a fresh in-memory [`reqwest::cookie::Jar`].
    pub fn cookie_store(mut self, store: Arc<dyn CookieStore>) -> Self {
        self.cookie_store = Some(store);
        self
    }

    pub fn build(self) -> Result<HttpClient, RosterError> {
        let with_cookies = self
            .base()
            .cookie_provider(Arc::new(SharedCookies(self.session_cookies())))
            .build()
            .map_err(|err| RosterError::from(InfraError::from(err)))?;
        let without_cookies =
            self.base().build().map_err(|err| RosterError::from(InfraError::from(err)))?;

        Ok(HttpClient { with_cookies, without_cookies })
    }

    fn session_cookies(&self) -> Arc<dyn CookieStore> {
        self.cookie_store
            .clone()
            .unwrap_or_else(|| Arc::new(reqwest::cookie::Jar::default()) as Arc<dyn CookieStore>)
    }

    fn base(&self) -> reqwest::ClientBuilder {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        builder
    }
}

/// Sized adapter so a trait-object store can be handed to reqwest.
struct SharedCookies(Arc<dyn CookieStore>);

impl CookieStore for SharedCookies {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        self.0.set_cookies(cookie_headers, url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.0.cookies(url)
    }
}
