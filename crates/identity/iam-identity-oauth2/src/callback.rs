//! Provider callbacks: finish the login against the backend and decide where
//! the browser goes next.

use crate::error::{AuthFlowError, AuthFlowResult};
use crate::saml::RelayState;
use crate::state::{DecodedState, StateCodec};
use iam_console_core::{
    AuthBackend, AuthMethod, ApiResponse, ConsoleSettings, FlowKind, LoginForm, OAuthParams,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::{Url, form_urlencoded};

/// Where the browser goes once a callback has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Full page load.
    Redirect(String),
    /// In-app navigation, keeping the current session.
    Navigate(String),
    /// The backend refused the login; `msg` is shown in place.
    Failed { msg: String },
}

impl fmt::Display for CallbackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackOutcome::Redirect(target) => write!(f, "redirect {}", target),
            CallbackOutcome::Navigate(target) => write!(f, "navigate {}", target),
            CallbackOutcome::Failed { msg } => write!(f, "failed: {}", msg),
        }
    }
}

fn query_pairs(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

fn query_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// `{redirect_uri}?code=<code>&state=<state>`, keeping any query the
/// redirect URI already has.
fn code_redirect(redirect_uri: &str, code: &str, state: Option<&str>) -> AuthFlowResult<String> {
    let mut url = Url::parse(redirect_uri)?;
    {
        let mut params = url.query_pairs_mut();
        params.append_pair("code", code);
        if let Some(state) = state {
            params.append_pair("state", state);
        }
    }
    Ok(url.to_string())
}

/// Handles `/callback` and `/callback/saml`.
#[derive(Clone)]
pub struct CallbackDispatcher {
    backend: Arc<dyn AuthBackend>,
    settings: ConsoleSettings,
    codec: StateCodec,
}

impl CallbackDispatcher {
    pub fn new(backend: Arc<dyn AuthBackend>, settings: ConsoleSettings, codec: StateCodec) -> Self {
        Self {
            backend,
            settings,
            codec,
        }
    }

    /// `login` when the relying party is the authentication server itself
    /// (or there is none), `code` otherwise.
    fn classify_redirect(&self, redirect_uri: Option<&str>) -> FlowKind {
        match redirect_uri {
            None => FlowKind::Login,
            Some(uri) if self.settings.is_server_origin(uri) => FlowKind::Login,
            Some(_) => FlowKind::Code,
        }
    }

    /// How the flow recorded in `state` completes.
    pub fn classify(&self, state: &DecodedState) -> AuthFlowResult<FlowKind> {
        let kind = match state.method()? {
            AuthMethod::Signup | AuthMethod::Login => self.classify_redirect(state.redirect_uri()),
            AuthMethod::Link => FlowKind::Link,
        };
        debug!("Classified callback as {}", kind);
        Ok(kind)
    }

    /// Handles the OAuth provider redirect to `/callback?code=...&state=...`.
    pub async fn handle_oauth_callback(&self, query: &str) -> AuthFlowResult<CallbackOutcome> {
        let pairs = query_pairs(query);

        // WeCom sends `auth_code` instead of `code`.
        let code = query_value(&pairs, "code")
            .or_else(|| query_value(&pairs, "auth_code"))
            .ok_or(AuthFlowError::MissingAuthorizationCode)?;
        let state = query_value(&pairs, "state").ok_or(AuthFlowError::MissingParameter("state"))?;

        let inner = self.codec.decode(state)?;
        let kind = self.classify(&inner)?;
        let method = inner.method()?;
        let application = inner
            .application()
            .ok_or(AuthFlowError::MissingParameter("application"))?;
        let provider = inner
            .provider()
            .ok_or(AuthFlowError::MissingParameter("provider"))?;

        let form = LoginForm {
            kind: Some(kind),
            application: application.to_string(),
            provider: provider.to_string(),
            code: code.to_string(),
            state: application.to_string(),
            redirect_uri: self.settings.callback_url(),
            method: Some(method),
            ..Default::default()
        };
        let oauth = inner.oauth_params();

        let response = self.backend.login(&form, oauth.as_ref()).await?;
        if let Some(outcome) = Self::failure(&response, provider) {
            return Ok(outcome);
        }

        let outcome = match kind {
            FlowKind::Login => CallbackOutcome::Redirect("/".to_string()),
            FlowKind::Code => {
                let redirect_uri = inner
                    .redirect_uri()
                    .ok_or(AuthFlowError::MissingParameter("redirect_uri"))?;
                let code = response.data_str().unwrap_or_default();
                CallbackOutcome::Redirect(code_redirect(redirect_uri, code, inner.get("state"))?)
            }
            FlowKind::Link => {
                CallbackOutcome::Navigate(inner.return_path().unwrap_or("/").to_string())
            }
        };

        info!(
            "Completed {} callback from provider {} for application {}",
            kind, provider, application
        );
        Ok(outcome)
    }

    /// Handles the IdP post-back to `/callback/saml?relayState=...&samlResponse=...`.
    pub async fn handle_saml_callback(&self, query: &str) -> AuthFlowResult<CallbackOutcome> {
        let pairs = query_pairs(query);
        let relay_state = query_value(&pairs, "relayState")
            .ok_or(AuthFlowError::MissingParameter("relayState"))?;
        let saml_response = query_value(&pairs, "samlResponse")
            .ok_or(AuthFlowError::MissingParameter("samlResponse"))?;

        let relay = RelayState::decode(relay_state)?;
        let application = relay.application_or_default();
        let kind = self.classify_redirect(relay.real_redirect_uri.as_deref());
        debug!("Classified SAML callback as {}", kind);

        let form = LoginForm {
            kind: Some(kind),
            application: application.to_string(),
            provider: relay.provider.clone(),
            state: application.to_string(),
            redirect_uri: self.settings.callback_url(),
            method: Some(AuthMethod::Signup),
            relay_state: relay_state.to_string(),
            saml_response: form_urlencoded::byte_serialize(saml_response.as_bytes()).collect(),
            ..Default::default()
        };
        let oauth = relay.client_id.as_ref().map(|client_id| OAuthParams {
            client_id: client_id.clone(),
            response_type: Some(kind.as_str().to_string()),
            redirect_uri: relay.real_redirect_uri.clone(),
            scope: Some("read".to_string()),
            state: Some(application.to_string()),
            ..Default::default()
        });

        let response = self.backend.login(&form, oauth.as_ref()).await?;
        if let Some(outcome) = Self::failure(&response, &relay.provider) {
            return Ok(outcome);
        }

        let outcome = match (kind, relay.real_redirect_uri.as_deref()) {
            (FlowKind::Code, Some(redirect_uri)) => {
                let code = response.data_str().unwrap_or_default();
                CallbackOutcome::Redirect(code_redirect(redirect_uri, code, Some(application))?)
            }
            _ => CallbackOutcome::Redirect("/".to_string()),
        };

        info!(
            "Completed SAML {} callback from provider {} for application {}",
            kind, relay.provider, application
        );
        Ok(outcome)
    }

    fn failure(response: &ApiResponse, provider: &str) -> Option<CallbackOutcome> {
        if response.is_ok() {
            return None;
        }
        warn!("Login with provider {} refused: {}", provider, response.msg);
        Some(CallbackOutcome::Failed {
            msg: response.msg.clone(),
        })
    }
}
