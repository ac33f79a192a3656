use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderCategory {
    #[default]
    OAuth,
    Saml,
    Sms,
    Email,
    Storage,
    Payment,
    Other(String),
}

impl ProviderCategory {
    pub fn as_str(&self) -> &str {
        match self {
            ProviderCategory::OAuth => "OAuth",
            ProviderCategory::Saml => "SAML",
            ProviderCategory::Sms => "SMS",
            ProviderCategory::Email => "Email",
            ProviderCategory::Storage => "Storage",
            ProviderCategory::Payment => "Payment",
            ProviderCategory::Other(other) => other,
        }
    }
}

impl From<String> for ProviderCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "OAuth" => ProviderCategory::OAuth,
            "SAML" => ProviderCategory::Saml,
            "SMS" => ProviderCategory::Sms,
            "Email" => ProviderCategory::Email,
            "Storage" => ProviderCategory::Storage,
            "Payment" => ProviderCategory::Payment,
            _ => ProviderCategory::Other(value),
        }
    }
}

impl From<ProviderCategory> for String {
    fn from(value: ProviderCategory) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ProviderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An external identity, notification, storage or payment integration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Provider {
    pub owner: String,
    pub name: String,
    pub created_time: String,
    pub display_name: String,
    pub category: ProviderCategory,
    #[serde(rename = "type")]
    pub provider_type: String,
    /// WeCom: `Internal` or `Third-party`.
    pub sub_type: String,
    /// WeCom: `Normal` or `Silent`.
    pub method: String,
    pub client_id: String,
    pub client_secret: String,
    /// Secondary app id, used by WeChat inside its own mobile webview.
    pub client_id2: String,
    pub client_secret2: String,
    pub app_id: String,
    pub endpoint: String,
    /// SAML IdP metadata document as pasted by the administrator.
    pub metadata: String,
    /// SAML IdP signing certificate.
    #[serde(rename = "idP")]
    pub idp: String,
    pub issuer_url: String,
    pub enable_sign_authn_request: bool,
    pub provider_url: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Provider {
    pub fn is_saml(&self) -> bool {
        self.category == ProviderCategory::Saml
    }
}
