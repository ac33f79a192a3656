//! Session and login endpoints.

use crate::client::BackendClient;
use crate::error::ClientResult;
use async_trait::async_trait;
use iam_console_core::models::{Application, Organization, User};
use iam_console_core::{ApiResponse, AuthBackend, BackendResult, LoginForm, OAuthParams};
use serde::Serialize;
use tracing::{debug, info};

/// The signed-in user and their organization (`GET /api/get-account`).
#[derive(Debug, Clone)]
pub struct AccountInfo {
    pub user: User,
    pub organization: Option<Organization>,
}

/// Body of `POST /api/signup`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub application: String,
    pub organization: String,
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub phone_prefix: String,
    pub affiliation: String,
    pub id_card: String,
    pub region: String,
    pub email_code: String,
    pub phone_code: String,
}

fn backend_query(oauth: Option<&OAuthParams>) -> String {
    oauth.map(OAuthParams::to_backend_query).unwrap_or_default()
}

impl BackendClient {
    /// `POST /api/login`, with the third-party request in the query string
    /// when there is one. The raw envelope is returned so callers can read
    /// `msg` on refusal.
    pub async fn login(
        &self,
        form: &LoginForm,
        oauth: Option<&OAuthParams>,
    ) -> ClientResult<ApiResponse> {
        let url = self.endpoint(&format!("login{}", backend_query(oauth)))?;
        let response = self.post_json(url, form).await?;
        debug!(
            "Login for application {} via {} answered {:?}",
            form.application,
            if form.provider.is_empty() { "password" } else { form.provider.as_str() },
            response.status
        );
        Ok(response)
    }

    pub async fn logout(&self) -> ClientResult<()> {
        let url = self.endpoint("logout")?;
        self.post_empty(url).await?.into_result()?;
        info!("Signed out");
        Ok(())
    }

    /// Detaches the signed-in user's identity at `provider_type`.
    pub async fn unlink(&self, provider_type: &str) -> ClientResult<()> {
        let url = self.endpoint("unlink")?;
        let body = serde_json::json!({ "providerType": provider_type });
        self.post_json(url, &body).await?.into_result()?;
        info!("Unlinked {} account", provider_type);
        Ok(())
    }

    /// `GET /api/get-saml-login`; `data` holds the IdP document or URL and
    /// `data2` the binding.
    pub async fn get_saml_login(
        &self,
        provider_id: &str,
        relay_state: &str,
    ) -> ClientResult<ApiResponse> {
        let url = self.endpoint_with_query(
            "get-saml-login",
            [("id", provider_id), ("relayState", relay_state)],
        )?;
        self.get_envelope(url).await
    }

    /// The application a third-party authorization request signs in to, or
    /// the built-in one for a same-site login.
    pub async fn get_app_login(&self, oauth: Option<&OAuthParams>) -> ClientResult<Application> {
        let url = self.endpoint(&format!("get-app-login{}", backend_query(oauth)))?;
        let response = self.get_envelope(url).await?.into_result()?;
        Ok(response.data_as()?)
    }

    pub async fn get_account(&self) -> ClientResult<AccountInfo> {
        let url = self.endpoint("get-account")?;
        let response = self.get_envelope(url).await?.into_result()?;

        let user: User = response.data_as()?;
        let organization = if response.data2.is_null() {
            None
        } else {
            Some(serde_json::from_value(response.data2.clone())?)
        };

        Ok(AccountInfo { user, organization })
    }

    pub async fn signup(&self, form: &SignupForm) -> ClientResult<ApiResponse> {
        let url = self.endpoint("signup")?;
        let response = self.post_json(url, form).await?.into_result()?;
        info!("Signed up {} in {}", form.username, form.application);
        Ok(response)
    }
}

#[async_trait]
impl AuthBackend for BackendClient {
    async fn login(
        &self,
        form: &LoginForm,
        oauth: Option<&OAuthParams>,
    ) -> BackendResult<ApiResponse> {
        Ok(BackendClient::login(self, form, oauth).await?)
    }

    async fn get_saml_login(
        &self,
        provider_id: &str,
        relay_state: &str,
    ) -> BackendResult<ApiResponse> {
        Ok(BackendClient::get_saml_login(self, provider_id, relay_state).await?)
    }
}
