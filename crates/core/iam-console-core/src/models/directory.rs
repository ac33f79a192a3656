use super::application::null_as_default;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Organization {
    pub owner: String,
    pub name: String,
    pub created_time: String,
    pub display_name: String,
    pub website_url: String,
    pub favicon: String,
    pub password_type: String,
    pub phone_prefix: String,
    pub default_avatar: String,
    pub enable_soft_deletion: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub owner: String,
    pub name: String,
    pub created_time: String,
    pub updated_time: String,
    pub id: String,
    #[serde(rename = "type")]
    pub user_type: String,
    pub display_name: String,
    pub avatar: String,
    pub email: String,
    pub phone: String,
    pub affiliation: String,
    pub tag: String,
    pub region: String,
    pub is_admin: bool,
    pub is_global_admin: bool,
    pub is_forbidden: bool,
    pub is_deleted: bool,
    pub signup_application: String,
    #[serde(deserialize_with = "null_as_default")]
    pub properties: std::collections::HashMap<String, String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    /// Account id of a linked provider identity, stored under the lowercased
    /// provider type (`github`, `wechat`, ...).
    pub fn linked_account(&self, provider_type: &str) -> Option<&str> {
        self.extra
            .get(&provider_type.to_lowercase())
            .and_then(|value| value.as_str())
            .filter(|value| !value.is_empty())
    }

    /// Profile data the backend recorded for a linked provider, e.g.
    /// `oauth_GitHub_username`.
    pub fn linked_property(&self, provider_type: &str, property: &str) -> Option<&str> {
        self.properties
            .get(&format!("oauth_{}_{}", provider_type, property))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Role {
    pub owner: String,
    pub name: String,
    pub created_time: String,
    pub display_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub users: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
    pub is_enabled: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Permission {
    pub owner: String,
    pub name: String,
    pub created_time: String,
    pub display_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub users: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
    pub resource_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resources: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub actions: Vec<String>,
    pub effect: String,
    pub is_enabled: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
