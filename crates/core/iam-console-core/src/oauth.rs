//! OAuth request parameters and the login form posted to `/api/login`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

/// Why a provider login link was rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    Signup,
    Login,
    Link,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Signup => "signup",
            AuthMethod::Login => "login",
            AuthMethod::Link => "link",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signup" => Ok(AuthMethod::Signup),
            "login" => Ok(AuthMethod::Login),
            "link" => Ok(AuthMethod::Link),
            other => Err(other.to_string()),
        }
    }
}

/// How a returning login is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    /// Same authentication server as the initiating application; the backend
    /// issues the session cookie directly.
    Login,
    /// Cross-site; an authorization code goes back to the relying party.
    Code,
    /// Attach the provider identity to the signed-in account.
    Link,
}

impl FlowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowKind::Login => "login",
            FlowKind::Code => "code",
            FlowKind::Link => "link",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a third-party authorization request
/// (`/login/oauth/authorize?client_id=...`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthParams {
    pub client_id: String,
    pub response_type: Option<String>,
    pub redirect_uri: Option<String>,
    pub scope: Option<String>,
    pub state: Option<String>,
    pub nonce: Option<String>,
    pub challenge_method: Option<String>,
    pub code_challenge: Option<String>,
}

impl OAuthParams {
    /// Reads the parameters from decoded query pairs. Returns `None` when no
    /// `client_id` is present, which marks a same-site login.
    pub fn from_pairs<K, V>(pairs: &[(K, V)]) -> Option<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k.as_ref() == key)
                .map(|(_, v)| v.as_ref().to_string())
        };

        Some(Self {
            client_id: get("client_id")?,
            response_type: get("response_type"),
            redirect_uri: get("redirect_uri"),
            scope: get("scope"),
            state: get("state"),
            nonce: get("nonce"),
            challenge_method: get("code_challenge_method"),
            code_challenge: get("code_challenge"),
        })
    }

    /// Parses a raw query string, with or without the leading `?`.
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self::from_pairs(&pairs)
    }

    /// The query string the backend login endpoints expect, leading `?`
    /// included. Absent values are left out.
    pub fn to_backend_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("clientId", &self.client_id);

        let optional = [
            ("responseType", &self.response_type),
            ("redirectUri", &self.redirect_uri),
            ("scope", &self.scope),
            ("state", &self.state),
            ("nonce", &self.nonce),
            ("code_challenge_method", &self.challenge_method),
            ("code_challenge", &self.code_challenge),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                serializer.append_pair(key, value);
            }
        }

        format!("?{}", serializer.finish())
    }
}

/// Body of `POST /api/login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<FlowKind>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub organization: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub application: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub provider: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub redirect_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<AuthMethod>,
    #[serde(default)]
    pub auto_signin: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub relay_state: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub saml_response: String,
}
