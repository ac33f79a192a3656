use crate::error::BackendResult;
use crate::oauth::{LoginForm, OAuthParams};
use crate::response::ApiResponse;
use async_trait::async_trait;

/// The slice of the backend authentication API that login flows depend on.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// `POST /api/login[?clientId=...]`
    async fn login(
        &self,
        form: &LoginForm,
        oauth: Option<&OAuthParams>,
    ) -> BackendResult<ApiResponse>;

    /// `GET /api/get-saml-login?id=<owner>/<provider>&relayState=<b64>`
    async fn get_saml_login(&self, provider_id: &str, relay_state: &str)
    -> BackendResult<ApiResponse>;
}
