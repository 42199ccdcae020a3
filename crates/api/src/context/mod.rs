//! Application context - dependency injection container

use std::sync::Arc;

use roster_common::auth::KeychainTokenPersistence;
use roster_common::{KeychainProvider, TokenStore};
use roster_core::CurrentUserService;
use roster_domain::constants::ACCESS_TOKEN_ACCOUNT;
use roster_domain::{Config, Result, TokenBackend};
use roster_infra::api::ApiClientConfig;
use roster_infra::{
    ApiClient, AuthService, FileTokenPersistence, PersistentCookieJar, StudentService,
};
use tracing::{debug, info};

use crate::navigator::CliNavigator;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub tokens: Arc<TokenStore>,
    /// `None` for the memory backend.
    pub cookies: Option<Arc<PersistentCookieJar>>,
    pub navigator: Arc<CliNavigator>,
    pub client: ApiClient,
    pub auth: Arc<AuthService>,
    pub students: StudentService,
    pub current_user: CurrentUserService,
}

impl AppContext {
    /// Build the context for `config`, choosing token and cookie storage
    /// from `config.storage.backend`.
    ///
    /// # Errors
    /// Returns error if the cookie file cannot be read or the HTTP client
    /// cannot be created.
    pub fn new(config: Config) -> Result<Self> {
        let storage = &config.storage;
        let (tokens, cookies) = match storage.backend {
            TokenBackend::Memory => (TokenStore::in_memory(), None),
            TokenBackend::File => {
                let persistence = FileTokenPersistence::new(storage.token_path());
                debug!(path = %persistence.path().display(), "using file token storage");
                (
                    TokenStore::with_persistence(Arc::new(persistence)),
                    Some(PersistentCookieJar::open(storage.cookie_path())?),
                )
            }
            TokenBackend::Keychain => {
                let provider = KeychainProvider::new(storage.keychain_service.clone());
                debug!(service = provider.service_name(), "using keychain token storage");
                (
                    TokenStore::with_persistence(Arc::new(KeychainTokenPersistence::new(
                        provider,
                        ACCESS_TOKEN_ACCOUNT,
                    ))),
                    Some(PersistentCookieJar::open(storage.cookie_path())?),
                )
            }
        };

        Self::assemble(config, Arc::new(tokens), cookies.map(Arc::new))
    }

    /// Build the context around an existing token store, without cookie
    /// persistence.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_tokens(config: Config, tokens: Arc<TokenStore>) -> Result<Self> {
        Self::assemble(config, tokens, None)
    }

    fn assemble(
        config: Config,
        tokens: Arc<TokenStore>,
        cookies: Option<Arc<PersistentCookieJar>>,
    ) -> Result<Self> {
        let navigator = Arc::new(CliNavigator::new());

        let mut builder = ApiClient::builder()
            .config(ApiClientConfig::from(&config.api))
            .tokens(Arc::clone(&tokens))
            .navigator(navigator.clone());
        if let Some(jar) = &cookies {
            builder = builder.cookie_store(jar.clone());
        }
        let client = builder.build()?;

        let auth = Arc::new(AuthService::new(client.clone()));
        let students = StudentService::new(client.clone());
        let current_user = CurrentUserService::new(Arc::clone(&tokens), auth.clone());

        info!(
            base_url = %config.api.base_url,
            backend = ?config.storage.backend,
            "application context ready"
        );

        Ok(Self { config, tokens, cookies, navigator, client, auth, students, current_user })
    }

    /// Forget the persisted session cookies (after logout).
    pub fn forget_cookies(&self) {
        if let Some(jar) = &self.cookies {
            jar.clear_persisted();
        }
    }
}
