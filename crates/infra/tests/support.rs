#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use roster_common::TokenStore;
use roster_core::SessionNavigator;
use roster_infra::api::ApiClientConfig;
use roster_infra::ApiClient;

/// Navigator that records every redirect instead of performing it.
#[derive(Default)]
pub struct RecordingNavigator {
    pub logins: Mutex<Vec<Option<String>>>,
    pub homes: Mutex<usize>,
}

impl RecordingNavigator {
    pub fn login_redirects(&self) -> usize {
        self.logins.lock().len()
    }
}

impl SessionNavigator for RecordingNavigator {
    fn redirect_to_login(&self, next: Option<&str>) {
        self.logins.lock().push(next.map(str::to_string));
    }

    fn redirect_home(&self) {
        *self.homes.lock() += 1;
    }
}

/// Client, token store and navigator wired against `base_url`.
pub struct Harness {
    pub client: ApiClient,
    pub tokens: Arc<TokenStore>,
    pub navigator: Arc<RecordingNavigator>,
}

impl Harness {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_tokens(base_url, Arc::new(TokenStore::in_memory()))
    }

    pub fn with_tokens(base_url: impl Into<String>, tokens: Arc<TokenStore>) -> Self {
        let navigator = Arc::new(RecordingNavigator::default());
        let client = ApiClient::builder()
            .config(ApiClientConfig {
                base_url: base_url.into(),
                timeout: Duration::from_secs(5),
                user_agent: Some("roster-tests".into()),
            })
            .tokens(tokens.clone())
            .navigator(navigator.clone())
            .build()
            .expect("client should build");
        Self { client, tokens, navigator }
    }
}

/// URL of a local port with nothing listening on it.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let addr = listener.local_addr().expect("local addr should exist");
    drop(listener);
    format!("http://{addr}/api")
}
