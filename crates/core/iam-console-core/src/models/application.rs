use super::Provider;
use serde::{Deserialize, Serialize};

/// A relying-party configuration end users authenticate into.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    pub owner: String,
    pub name: String,
    pub created_time: String,
    pub display_name: String,
    pub logo: String,
    pub homepage_url: String,
    pub description: String,
    pub organization: String,
    pub cert: String,
    pub enable_password: bool,
    pub enable_sign_up: bool,
    pub enable_signin_session: bool,
    pub enable_code_signin: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub providers: Vec<ProviderItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub signup_items: Vec<SignupItem>,
    pub client_id: String,
    pub client_secret: String,
    #[serde(deserialize_with = "null_as_default")]
    pub redirect_uris: Vec<String>,
    pub token_format: String,
    pub expire_in_hours: i64,
    pub refresh_expire_in_hours: i64,
    pub signup_url: String,
    pub signin_url: String,
    pub forget_url: String,
    pub affiliation_url: String,
    pub terms_of_use: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Application {
    pub fn provider_item(&self, name: &str) -> Option<&ProviderItem> {
        self.providers.iter().find(|item| item.name == name)
    }

    /// Providers that may be offered as sign-in buttons.
    pub fn sign_in_providers(&self) -> impl Iterator<Item = &Provider> {
        self.providers
            .iter()
            .filter(|item| item.can_sign_in)
            .filter_map(|item| item.provider.as_ref())
    }
}

/// A provider enabled on an application, with the application's policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderItem {
    pub name: String,
    pub can_sign_up: bool,
    pub can_sign_in: bool,
    pub can_unlink: bool,
    pub prompted: bool,
    pub alert_type: String,
    pub provider: Option<Provider>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupItem {
    pub name: String,
    pub visible: bool,
    pub required: bool,
    pub prompted: bool,
    pub rule: String,
}

/// The backend serialises empty Go slices as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_lists_deserialize_empty() {
        let json = r#"{
            "owner": "admin",
            "name": "app-built-in",
            "providers": null,
            "redirectUris": null,
            "signupItems": null
        }"#;

        let app: Application = serde_json::from_str(json).unwrap();
        assert!(app.providers.is_empty());
        assert!(app.redirect_uris.is_empty());
    }

    #[test]
    fn test_sign_in_providers_filters_items() {
        let json = r#"{
            "owner": "admin",
            "name": "app-built-in",
            "providers": [
                {"name": "provider_github", "canSignIn": true, "provider": {"name": "provider_github", "type": "GitHub"}},
                {"name": "provider_google", "canSignIn": false, "provider": {"name": "provider_google", "type": "Google"}},
                {"name": "provider_missing", "canSignIn": true, "provider": null}
            ]
        }"#;

        let app: Application = serde_json::from_str(json).unwrap();
        let names: Vec<_> = app.sign_in_providers().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["provider_github"]);
        assert!(app.provider_item("provider_google").is_some());
    }
}
