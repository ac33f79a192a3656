use super::application::null_as_default;
use serde::{Deserialize, Serialize};

/// An LDAP directory users are imported from.
///
/// Unlike the other records an LDAP server is addressed by its generated
/// `id` alone; `owner` only scopes listing and import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ldap {
    pub id: String,
    pub owner: String,
    pub created_time: String,
    pub server_name: String,
    pub host: String,
    pub port: u16,
    pub admin: String,
    pub passwd: String,
    pub base_dn: String,
    /// Minutes between automatic syncs, 0 to disable.
    pub auto_sync: i64,
    pub last_sync: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Ldap {
    pub const DEFAULT_PORT: u16 = 389;

    /// A blank server for `owner` with the form defaults filled in.
    pub fn new(owner: impl Into<String>, server_name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            server_name: server_name.into(),
            port: Self::DEFAULT_PORT,
            ..Default::default()
        }
    }

    /// Fields the backend refuses to save without.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("owner", &self.owner),
            ("serverName", &self.server_name),
            ("host", &self.host),
            ("admin", &self.admin),
            ("passwd", &self.passwd),
            ("baseDn", &self.base_dn),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// A directory entry as read from an LDAP server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LdapUser {
    pub uid_number: String,
    pub uid: String,
    pub cn: String,
    pub group_id: String,
    pub uuid: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Answer of `get-ldap-user`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LdapUsers {
    #[serde(deserialize_with = "null_as_default")]
    pub users: Vec<LdapUser>,
}

/// Answer of `sync-ldap-users`: entries skipped because a user with the
/// same uuid exists, and entries the backend failed to import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LdapSyncResult {
    #[serde(deserialize_with = "null_as_default")]
    pub exist: Vec<LdapUser>,
    #[serde(deserialize_with = "null_as_default")]
    pub failed: Vec<LdapUser>,
}

impl LdapSyncResult {
    /// Number of `requested` entries that were imported.
    pub fn imported(&self, requested: usize) -> usize {
        requested.saturating_sub(self.exist.len() + self.failed.len())
    }
}
