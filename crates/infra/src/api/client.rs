//! API client with transparent session refresh
//!
//! Every call runs the same protocol:
//! 1. Send the request.
//! 2. On HTTP 401 from a path that is not an auth endpoint, refresh the token
//!    (single-flight) and, if that worked, send the request once more with
//!    the new token. The second answer is final.
//! 3. If the refresh failed, drop the local session, send the user to the
//!    login view and answer with the `unauthorized` envelope.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::CookieStore;
use roster_common::TokenStore;
use roster_core::SessionNavigator;
use roster_domain::constants::{is_auth_endpoint, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS};
use roster_domain::{Envelope, RosterError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::refresh::RefreshCoordinator;
use crate::http::{HttpClient, Query, RequestExecutor, RequestOptions, RequestSpec};

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for API (e.g., "http://localhost:8000/api")
    pub base_url: String,
    /// Timeout for API requests
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
        }
    }
}

impl From<&roster_domain::ApiConfig> for ApiClientConfig {
    fn from(api: &roster_domain::ApiConfig) -> Self {
        Self {
            base_url: api.base_url.clone(),
            timeout: Duration::from_secs(api.timeout_secs),
            user_agent: api.user_agent.clone(),
        }
    }
}

/// Public facade over the request executor.
#[derive(Clone)]
pub struct ApiClient {
    executor: RequestExecutor,
    refresh: RefreshCoordinator,
    navigator: Arc<dyn SessionNavigator>,
}

impl ApiClient {
    pub fn new(executor: RequestExecutor, navigator: Arc<dyn SessionNavigator>) -> Self {
        let refresh = RefreshCoordinator::new(executor.clone());
        Self { executor, refresh, navigator }
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    #[must_use]
    pub fn tokens(&self) -> &Arc<TokenStore> {
        self.executor.tokens()
    }

    #[must_use]
    pub fn refresher(&self) -> &RefreshCoordinator {
        &self.refresh
    }

    /// Execute a GET request; `query` entries without a value are not sent.
    ///
    /// # Errors
    ///
    /// Only transport failures (`Network`, `Timeout`) and URL construction
    /// errors. HTTP and domain failures are returned as envelopes.
    #[instrument(skip(self, query, options), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query,
        options: &RequestOptions,
    ) -> Result<Envelope<T>, RosterError> {
        self.send(RequestSpec::get(path, query), options).await
    }

    /// Execute a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::get`], plus `Serialization` if `body` cannot be
    /// encoded.
    #[instrument(skip(self, body, options), fields(path = %path))]
    pub async fn post<T, B>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<Envelope<T>, RosterError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body =
            serde_json::to_value(body).map_err(|e| RosterError::Serialization(e.to_string()))?;
        self.send(RequestSpec::post(path, Some(body)), options).await
    }

    /// Execute a POST request without a body.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::get`].
    #[instrument(skip(self, options), fields(path = %path))]
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<Envelope<T>, RosterError> {
        self.send(RequestSpec::post(path, None), options).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        spec: RequestSpec,
        options: &RequestOptions,
    ) -> Result<Envelope<T>, RosterError> {
        let first = self.executor.execute::<T>(&spec, options).await?;
        if !first.is_unauthorized() {
            return Ok(first.envelope);
        }

        if is_auth_endpoint(&spec.path) {
            debug!("401 from auth endpoint, not refreshing");
            return Ok(first.envelope);
        }

        debug!("401 observed, refreshing session");
        if self.refresh.refresh().await {
            // Rebuilt from the spec so the new token is picked up.
            let retry = self.executor.execute::<T>(&spec, options).await?;
            return Ok(retry.envelope);
        }

        warn!("session expired, redirecting to login");
        self.executor.tokens().clear();
        self.navigator.redirect_to_login(None);
        Ok(Envelope::unauthorized())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("executor", &self.executor)
            .field("refresh", &self.refresh)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ApiClient`].
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    tokens: Option<Arc<TokenStore>>,
    navigator: Option<Arc<dyn SessionNavigator>>,
    cookie_store: Option<Arc<dyn CookieStore>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut config = self.config.take().unwrap_or_default();
        config.base_url = base_url.into();
        self.config = Some(config);
        self
    }

    /// Token store shared with the rest of the application.
    ///
    /// Defaults to a fresh in-memory store.
    pub fn tokens(mut self, tokens: Arc<TokenStore>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn SessionNavigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn cookie_store(mut self, store: Arc<dyn CookieStore>) -> Self {
        self.cookie_store = Some(store);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns `RosterError::Config` if the navigator is missing or the HTTP
    /// client cannot be created.
    pub fn build(self) -> Result<ApiClient, RosterError> {
        let config = self.config.unwrap_or_default();
        let navigator = self
            .navigator
            .ok_or_else(|| RosterError::Config("session navigator not set".to_string()))?;
        let tokens = self.tokens.unwrap_or_default();

        let mut http = HttpClient::builder().timeout(config.timeout);
        if let Some(agent) = config.user_agent {
            http = http.user_agent(agent);
        }
        if let Some(store) = self.cookie_store {
            http = http.cookie_store(store);
        }

        let executor = RequestExecutor::new(http.build()?, config.base_url, tokens);
        Ok(ApiClient::new(executor, navigator))
    }
}
