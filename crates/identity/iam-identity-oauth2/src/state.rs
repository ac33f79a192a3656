//! OAuth `state` round trip.
//!
//! The state carries the query string of the page that rendered the login
//! link, extended with the application, provider and method (and the return
//! path for account linking), base64 encoded. When the provider redirects
//! back, decoding it recovers everything needed to finish the flow.

use crate::error::{AuthFlowError, AuthFlowResult};
use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};
use hmac::{Hmac, Mac};
use iam_console_core::{AuthMethod, OAuthParams};
use serde::Serialize;
use sha2::Sha256;
use tracing::{debug, warn};
use url::form_urlencoded;

type HmacSha256 = Hmac<Sha256>;

/// The page a login link is rendered on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    /// Path of the page, e.g. `/login/oauth/authorize`.
    pub path: String,
    /// Query string of the page, with or without the leading `?`.
    pub query: String,
    pub user_agent: String,
}

impl PageContext {
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: query.into(),
            user_agent: String::new(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Inside the WeChat in-app browser.
    pub fn is_wechat_browser(&self) -> bool {
        self.user_agent.contains("MicroMessenger")
    }
}

/// Encodes and decodes the `state` parameter, optionally HMAC-signed.
#[derive(Clone, Default)]
pub struct StateCodec {
    signing_key: Option<Vec<u8>>,
}

impl std::fmt::Debug for StateCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCodec")
            .field("signed", &self.signing_key.is_some())
            .finish()
    }
}

impl StateCodec {
    /// A codec producing the bare base64 form.
    pub fn new() -> Self {
        Self::default()
    }

    /// A codec that appends `.<mac>` and refuses states without a valid one.
    pub fn with_signing_key(key: impl Into<Vec<u8>>) -> Self {
        Self {
            signing_key: Some(key.into()),
        }
    }

    pub fn is_signed(&self) -> bool {
        self.signing_key.is_some()
    }

    pub fn encode(
        &self,
        page: &PageContext,
        application: &str,
        provider: &str,
        method: AuthMethod,
    ) -> String {
        let page_query = page.query.strip_prefix('?').unwrap_or(&page.query);

        let mut appended = form_urlencoded::Serializer::new(String::new());
        appended.append_pair("application", application);
        appended.append_pair("provider", provider);
        appended.append_pair("method", method.as_str());
        if method == AuthMethod::Link {
            appended.append_pair("from", &page.path);
        }
        let appended = appended.finish();

        let query = if page_query.is_empty() {
            format!("?{}", appended)
        } else {
            format!("?{}&{}", page_query, appended)
        };

        let encoded = STANDARD.encode(query);
        match self.mac(encoded.as_bytes()) {
            Some(mac) => format!("{}.{}", encoded, URL_SAFE_NO_PAD.encode(mac)),
            None => encoded,
        }
    }

    /// Recovers the query string carried by `state`.
    pub fn decode_query(&self, state: &str) -> AuthFlowResult<String> {
        let encoded = match &self.signing_key {
            Some(_) => self.verify(state)?,
            None => state,
        };

        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| AuthFlowError::InvalidState(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| AuthFlowError::InvalidState(e.to_string()))
    }

    pub fn decode(&self, state: &str) -> AuthFlowResult<DecodedState> {
        let query = self.decode_query(state)?;
        let decoded = DecodedState::from_query(&query);
        debug!(
            "Decoded state for application {:?}, provider {:?}, method {:?}",
            decoded.application(),
            decoded.provider(),
            decoded.method_str()
        );
        Ok(decoded)
    }

    fn mac(&self, data: &[u8]) -> Option<Vec<u8>> {
        let key = self.signing_key.as_ref()?;
        let mut mac = HmacSha256::new_from_slice(key).ok()?;
        mac.update(data);
        Some(mac.finalize().into_bytes().to_vec())
    }

    fn verify<'a>(&self, state: &'a str) -> AuthFlowResult<&'a str> {
        let key = self
            .signing_key
            .as_ref()
            .ok_or(AuthFlowError::StateSignatureMismatch)?;
        let (encoded, signature) = state
            .rsplit_once('.')
            .ok_or(AuthFlowError::StateSignatureMismatch)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AuthFlowError::StateSignatureMismatch)?;

        let mut mac =
            HmacSha256::new_from_slice(key).map_err(|_| AuthFlowError::StateSignatureMismatch)?;
        mac.update(encoded.as_bytes());
        if mac.verify_slice(&signature).is_err() {
            warn!("Rejected state with an invalid signature");
            return Err(AuthFlowError::StateSignatureMismatch);
        }

        Ok(encoded)
    }
}

/// The parameters recovered from a `state`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodedState {
    pairs: Vec<(String, String)>,
}

impl DecodedState {
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// First value of `key`, as carried over from the initiating page.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    // Appended fields come after the page query, so they win over a page
    // parameter of the same name.
    fn appended(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn application(&self) -> Option<&str> {
        self.appended("application")
    }

    pub fn provider(&self) -> Option<&str> {
        self.appended("provider")
    }

    pub fn method_str(&self) -> Option<&str> {
        self.appended("method")
    }

    pub fn method(&self) -> AuthFlowResult<AuthMethod> {
        let method = self
            .method_str()
            .ok_or(AuthFlowError::MissingParameter("method"))?;
        method.parse().map_err(AuthFlowError::UnsupportedMethod)
    }

    /// Return path recorded for account linking.
    pub fn return_path(&self) -> Option<&str> {
        self.appended("from")
    }

    /// `redirect_uri` of the relying party that started the flow, if any.
    pub fn redirect_uri(&self) -> Option<&str> {
        self.get("redirect_uri")
    }

    /// The third-party authorization request embedded in the page query.
    pub fn oauth_params(&self) -> Option<OAuthParams> {
        OAuthParams::from_pairs(&self.pairs)
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}
