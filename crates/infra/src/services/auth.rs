//! `/auth/*` endpoints.

use async_trait::async_trait;
use roster_core::ProfileSource;
use roster_domain::constants::{
    AUTH_LOGIN, AUTH_LOGOUT, AUTH_ME, AUTH_PASSWORD_CHANGE, AUTH_PASSWORD_RESET_CONFIRM,
    AUTH_PASSWORD_RESET_SEND_CODE, AUTH_REGISTER_SEND_CODE, AUTH_REGISTER_VERIFY,
};
use roster_domain::{
    AccessGrant, ChangePasswordRequest, EmailRequest, Envelope, LoginRequest,
    RegisterVerifyRequest, ResetPasswordRequest, Result, UserProfile,
};
use serde_json::Value;
use tracing::{info, instrument};

use crate::api::ApiClient;
use crate::http::{Query, RequestOptions};

/// Session and account endpoints.
///
/// Login and registration store the issued token; logout drops it.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    /// Transport failures only.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: &LoginRequest) -> Result<Envelope<AccessGrant>> {
        let envelope = self.client.post(AUTH_LOGIN, request, &RequestOptions::default()).await?;
        self.store_grant(&envelope);
        Ok(envelope)
    }

    /// Ends the server session. The local token is cleared whatever the
    /// server answers.
    ///
    /// # Errors
    /// Transport failures only.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<Envelope<Value>> {
        let result = self.client.post_empty(AUTH_LOGOUT, &RequestOptions::default()).await;
        self.client.tokens().clear();
        info!("signed out");
        result
    }

    /// # Errors
    /// Transport failures only.
    pub async fn me(&self) -> Result<Envelope<UserProfile>> {
        self.client.get(AUTH_ME, Query::new(), &RequestOptions::default()).await
    }

    /// # Errors
    /// `InvalidInput` when the confirmation does not match (nothing is sent),
    /// otherwise transport failures only.
    #[instrument(skip_all)]
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<Envelope<Value>> {
        request.validate()?;
        self.client.post(AUTH_PASSWORD_CHANGE, request, &RequestOptions::default()).await
    }

    /// # Errors
    /// Transport failures only.
    #[instrument(skip(self))]
    pub async fn send_reset_code(&self, email: &str) -> Result<Envelope<Value>> {
        let body = EmailRequest { email: email.to_string() };
        self.client.post(AUTH_PASSWORD_RESET_SEND_CODE, &body, &RequestOptions::default()).await
    }

    /// # Errors
    /// `InvalidInput` when the confirmation does not match (nothing is sent),
    /// otherwise transport failures only.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<Envelope<Value>> {
        request.validate()?;
        self.client.post(AUTH_PASSWORD_RESET_CONFIRM, request, &RequestOptions::default()).await
    }

    /// # Errors
    /// Transport failures only.
    #[instrument(skip(self))]
    pub async fn send_register_code(&self, email: &str) -> Result<Envelope<Value>> {
        let body = EmailRequest { email: email.to_string() };
        self.client.post(AUTH_REGISTER_SEND_CODE, &body, &RequestOptions::default()).await
    }

    /// Creates the account and signs in with the returned token.
    ///
    /// # Errors
    /// Transport failures only.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn verify_and_create(
        &self,
        request: &RegisterVerifyRequest,
    ) -> Result<Envelope<AccessGrant>> {
        let envelope =
            self.client.post(AUTH_REGISTER_VERIFY, request, &RequestOptions::default()).await?;
        self.store_grant(&envelope);
        Ok(envelope)
    }

    fn store_grant(&self, envelope: &Envelope<AccessGrant>) {
        if !envelope.is_success() {
            return;
        }
        if let Some(grant) = envelope.data.as_ref().filter(|grant| grant.has_token()) {
            self.client.tokens().set(grant.access_token.clone());
        }
    }
}

#[async_trait]
impl ProfileSource for AuthService {
    async fn fetch_profile(&self) -> Result<Envelope<UserProfile>> {
        self.me().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use roster_common::TokenStore;
    use roster_core::SessionNavigator;
    use roster_domain::RosterError;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    struct NoopNavigator;

    impl SessionNavigator for NoopNavigator {
        fn redirect_to_login(&self, _next: Option<&str>) {}
        fn redirect_home(&self) {}
    }

    fn service(server: &MockServer) -> (AuthService, Arc<TokenStore>) {
        let tokens = Arc::new(TokenStore::in_memory());
        let client = ApiClient::builder()
            .base_url(server.uri())
            .tokens(tokens.clone())
            .navigator(Arc::new(NoopNavigator))
            .build()
            .unwrap();
        (AuthService::new(client), tokens)
    }

    fn login_request() -> LoginRequest {
        LoginRequest { username: "ann".into(), password: "pw".into() }
    }

    #[tokio::test]
    async fn login_stores_issued_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({"username": "ann", "password": "pw"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"code": 0, "message": "ok", "data": {"access_token": "tok"}})),
            )
            .mount(&server)
            .await;

        let (auth, tokens) = service(&server);
        let envelope = auth.login(&login_request()).await.unwrap();

        assert!(envelope.is_success());
        assert_eq!(tokens.get().as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn failed_login_keeps_store_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"code": 1001, "message": "bad credentials", "data": null})),
            )
            .mount(&server)
            .await;

        let (auth, tokens) = service(&server);
        let envelope = auth.login(&login_request()).await.unwrap();

        assert_eq!(envelope.code, 1001);
        assert_eq!(tokens.get(), None);
    }

    #[tokio::test]
    async fn logout_clears_even_when_server_refuses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (auth, tokens) = service(&server);
        tokens.set("tok");
        let envelope = auth.logout().await.unwrap();

        assert_eq!(envelope.code, 500);
        assert_eq!(tokens.get(), None);
    }

    #[tokio::test]
    async fn mismatched_confirmation_is_rejected_locally() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (auth, _) = service(&server);
        let change = ChangePasswordRequest {
            old_password: "old".into(),
            new_password: "new".into(),
            confirm_password: "other".into(),
        };
        let reset = ResetPasswordRequest {
            email: "a@b.c".into(),
            code: "123456".into(),
            new_password: "new".into(),
            confirm_password: "other".into(),
        };

        assert!(matches!(auth.change_password(&change).await, Err(RosterError::InvalidInput(_))));
        assert!(matches!(auth.reset_password(&reset).await, Err(RosterError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn registration_signs_in() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register/send-code"))
            .and(body_json(json!({"email": "a@b.c"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0, "data": null})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/register/verify-and-create"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"code": 0, "data": {"access_token": "new-user"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (auth, tokens) = service(&server);
        assert!(auth.send_register_code("a@b.c").await.unwrap().is_success());
        let request = RegisterVerifyRequest {
            email: "a@b.c".into(),
            code: "123456".into(),
            password: "pw".into(),
        };
        assert!(auth.verify_and_create(&request).await.unwrap().is_success());
        assert_eq!(tokens.get().as_deref(), Some("new-user"));
    }

    #[tokio::test]
    async fn profile_source_reads_me() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "data": {
                    "id": "6f1c1a4e-2f7b-4c7e-9a51-1f0a3f0f7d11",
                    "username": "ann",
                    "role": "admin",
                    "is_active": true,
                    "token_version": 3
                }
            })))
            .mount(&server)
            .await;

        let (auth, _) = service(&server);
        let profile = auth.fetch_profile().await.unwrap().into_data().unwrap();
        assert_eq!(profile.username, "ann");
        assert_eq!(profile.token_version, 3);
    }
}
