//! Provider login links.

use crate::error::AuthFlowResult;
use crate::providers::{
    OAuthProviderKind, UrlShape, WECHAT_MP_ENDPOINT, WECHAT_MP_SCOPE, WECOM_INTERNAL_ENDPOINT,
    WECOM_SILENT_ENDPOINT,
};
use crate::state::{PageContext, StateCodec};
use iam_console_core::models::{Application, Provider};
use iam_console_core::{AuthMethod, ConsoleSettings};
use std::fmt;
use tracing::{debug, warn};
use url::Url;

/// A provider configuration the link builder cannot serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedProvider {
    Method(String),
    SubType(String),
    Type(String),
}

/// The `href` of a provider login button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthLink {
    Url(Url),
    /// Nothing to link to yet; renders as an empty string.
    Unavailable,
    /// Renders as `https://error:not-supported-provider-<what>:<value>` so
    /// the misconfiguration is visible on the button.
    Unsupported(UnsupportedProvider),
}

impl AuthLink {
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            AuthLink::Url(url) => Some(url),
            _ => None,
        }
    }

    pub fn is_url(&self) -> bool {
        matches!(self, AuthLink::Url(_))
    }
}

impl fmt::Display for AuthLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthLink::Url(url) => f.write_str(url.as_str()),
            AuthLink::Unavailable => Ok(()),
            AuthLink::Unsupported(UnsupportedProvider::Method(value)) => {
                write!(f, "https://error:not-supported-provider-method:{}", value)
            }
            AuthLink::Unsupported(UnsupportedProvider::SubType(value)) => {
                write!(f, "https://error:not-supported-provider-sub-type:{}", value)
            }
            AuthLink::Unsupported(UnsupportedProvider::Type(value)) => {
                write!(f, "https://error:not-supported-provider-type:{}", value)
            }
        }
    }
}

/// Builds provider authorization links for the console's login pages.
#[derive(Debug, Clone)]
pub struct AuthUrlBuilder {
    settings: ConsoleSettings,
    codec: StateCodec,
}

impl AuthUrlBuilder {
    pub fn new(settings: ConsoleSettings, codec: StateCodec) -> Self {
        Self { settings, codec }
    }

    pub fn codec(&self) -> &StateCodec {
        &self.codec
    }

    pub fn build(
        &self,
        application: Option<&Application>,
        provider: Option<&Provider>,
        method: AuthMethod,
        page: &PageContext,
    ) -> AuthFlowResult<AuthLink> {
        let (Some(application), Some(provider)) = (application, provider) else {
            return Ok(AuthLink::Unavailable);
        };

        if provider.is_saml() {
            // SAML buttons start through `initiate_saml_login` instead.
            debug!("No authorization link for SAML provider {}", provider.name);
            return Ok(AuthLink::Unavailable);
        }

        let Some(kind) = OAuthProviderKind::from_type(&provider.provider_type) else {
            warn!(
                "Provider {} has unsupported type {}",
                provider.name, provider.provider_type
            );
            return Ok(AuthLink::Unsupported(UnsupportedProvider::Type(
                provider.provider_type.clone(),
            )));
        };

        let state = self
            .codec
            .encode(page, &application.name, &provider.name, method);
        let redirect_uri = self.settings.callback_url();

        let link = match kind.spec().shape {
            UrlShape::Standard => self.standard_url(kind, provider, &redirect_uri, &state)?,
            UrlShape::WeChat => self.wechat_url(kind, provider, &redirect_uri, &state, page)?,
            UrlShape::WeCom => self.wecom_url(kind, provider, &redirect_uri, &state)?,
            UrlShape::Lark => {
                let spec = kind.spec();
                let mut url = Url::parse(spec.endpoint)?;
                url.query_pairs_mut()
                    .append_pair(spec.client_key, &provider.client_id)
                    .append_pair("redirect_uri", &redirect_uri)
                    .append_pair("state", &state);
                AuthLink::Url(url)
            }
            UrlShape::Infoflow => {
                let spec = kind.spec();
                let mut callback = Url::parse(&redirect_uri)?;
                callback.query_pairs_mut().append_pair("state", &state);

                let mut url = Url::parse(spec.endpoint)?;
                url.query_pairs_mut()
                    .append_pair(spec.client_key, &provider.client_id)
                    .append_pair("redirect_uri", callback.as_str());
                AuthLink::Url(url)
            }
        };

        if let AuthLink::Url(url) = &link {
            debug!(
                "Built {} link for provider {} ({}): {}",
                method,
                provider.name,
                kind,
                url.host_str().unwrap_or_default()
            );
        }

        Ok(link)
    }

    fn standard_url(
        &self,
        kind: OAuthProviderKind,
        provider: &Provider,
        redirect_uri: &str,
        state: &str,
    ) -> AuthFlowResult<AuthLink> {
        let spec = kind.spec();
        let mut url = Url::parse(spec.endpoint)?;

        let mut params = url.query_pairs_mut();
        params.append_pair(spec.client_key, &provider.client_id);
        params.append_pair("redirect_uri", redirect_uri);
        if let Some(scope) = spec.scope {
            params.append_pair("scope", scope);
        }
        params.append_pair("response_type", "code");
        params.append_pair("state", state);
        for (key, value) in spec.extra {
            params.append_pair(key, value);
        }
        drop(params);

        Ok(AuthLink::Url(url))
    }

    fn wechat_url(
        &self,
        kind: OAuthProviderKind,
        provider: &Provider,
        redirect_uri: &str,
        state: &str,
        page: &PageContext,
    ) -> AuthFlowResult<AuthLink> {
        let spec = kind.spec();

        let (endpoint, client_id, scope) = if page.is_wechat_browser() {
            (WECHAT_MP_ENDPOINT, &provider.client_id2, WECHAT_MP_SCOPE)
        } else {
            (spec.endpoint, &provider.client_id, spec.scope.unwrap_or_default())
        };

        let mut url = Url::parse(endpoint)?;
        url.query_pairs_mut()
            .append_pair(spec.client_key, client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("scope", scope)
            .append_pair("response_type", "code")
            .append_pair("state", state);
        url.set_fragment(Some("wechat_redirect"));

        Ok(AuthLink::Url(url))
    }

    fn wecom_url(
        &self,
        kind: OAuthProviderKind,
        provider: &Provider,
        redirect_uri: &str,
        state: &str,
    ) -> AuthFlowResult<AuthLink> {
        let spec = kind.spec();

        let endpoint = match (provider.sub_type.as_str(), provider.method.as_str()) {
            ("Internal" | "Third-party", "Silent") => {
                let mut url = Url::parse(WECOM_SILENT_ENDPOINT)?;
                url.query_pairs_mut()
                    .append_pair(spec.client_key, &provider.client_id)
                    .append_pair("redirect_uri", redirect_uri)
                    .append_pair("state", state)
                    .append_pair("scope", spec.scope.unwrap_or_default())
                    .append_pair("response_type", "code");
                url.set_fragment(Some("wechat_redirect"));
                return Ok(AuthLink::Url(url));
            }
            ("Internal", "Normal") => WECOM_INTERNAL_ENDPOINT,
            ("Third-party", "Normal") => spec.endpoint,
            ("Internal" | "Third-party", method) => {
                return Ok(AuthLink::Unsupported(UnsupportedProvider::Method(
                    method.to_string(),
                )));
            }
            (sub_type, _) => {
                return Ok(AuthLink::Unsupported(UnsupportedProvider::SubType(
                    sub_type.to_string(),
                )));
            }
        };

        let mut url = Url::parse(endpoint)?;
        let mut params = url.query_pairs_mut();
        params.append_pair(spec.client_key, &provider.client_id);
        if provider.sub_type == "Internal" {
            params.append_pair("agentid", &provider.app_id);
        }
        params.append_pair("redirect_uri", redirect_uri);
        params.append_pair("state", state);
        params.append_pair("usertype", "member");
        drop(params);

        Ok(AuthLink::Url(url))
    }
}
