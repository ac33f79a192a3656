use super::application::null_as_default;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cert {
    pub owner: String,
    pub name: String,
    pub created_time: String,
    pub display_name: String,
    pub scope: String,
    #[serde(rename = "type")]
    pub cert_type: String,
    pub crypto_algorithm: String,
    pub bit_size: i64,
    pub expire_in_years: i64,
    pub public_key: String,
    pub private_key: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// External database user-import configuration. Sync itself runs server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Syncer {
    pub owner: String,
    pub name: String,
    pub created_time: String,
    pub organization: String,
    #[serde(rename = "type")]
    pub syncer_type: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database_type: String,
    pub database: String,
    pub table: String,
    pub table_primary_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub table_columns: Vec<TableColumn>,
    pub affiliation_table: String,
    pub avatar_base_url: String,
    pub error_text: String,
    pub sync_interval: i64,
    pub is_enabled: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Mapping of one external column onto a user field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(rename = "bhojpurName")]
    pub user_field: String,
    pub is_hashed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Token {
    pub owner: String,
    pub name: String,
    pub created_time: String,
    pub application: String,
    pub organization: String,
    pub user: String,
    pub code: String,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub scope: String,
    pub token_type: String,
    pub code_challenge: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Audit log entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    pub id: i64,
    pub owner: String,
    pub name: String,
    pub created_time: String,
    pub organization: String,
    pub client_ip: String,
    pub user: String,
    pub method: String,
    pub request_uri: String,
    pub action: String,
    pub is_triggered: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Payment {
    pub owner: String,
    pub name: String,
    pub created_time: String,
    pub display_name: String,
    pub provider: String,
    #[serde(rename = "type")]
    pub payment_type: String,
    pub organization: String,
    pub user: String,
    pub good: String,
    pub amount: String,
    pub currency: String,
    pub state: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Webhook {
    pub owner: String,
    pub name: String,
    pub created_time: String,
    pub organization: String,
    pub url: String,
    pub method: String,
    pub content_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub headers: Vec<WebhookHeader>,
    #[serde(deserialize_with = "null_as_default")]
    pub events: Vec<String>,
    pub is_user_extended: bool,
    pub is_enabled: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookHeader {
    pub name: String,
    pub value: String,
}

/// An uploaded file tracked by the backend (`get-resources`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredResource {
    pub owner: String,
    pub name: String,
    pub created_time: String,
    pub user: String,
    pub provider: String,
    pub application: String,
    pub tag: String,
    pub parent: String,
    pub file_name: String,
    pub file_type: String,
    pub file_format: String,
    pub file_size: i64,
    pub url: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syncer_columns() {
        let json = r#"{
            "owner": "admin",
            "name": "syncer-hr",
            "type": "Database",
            "port": 3306,
            "tableColumns": [
                {"name": "emp_id", "type": "string", "bhojpurName": "Name", "isHashed": true, "values": null}
            ],
            "syncInterval": 10,
            "isEnabled": true
        }"#;

        let syncer: Syncer = serde_json::from_str(json).unwrap();
        assert_eq!(syncer.syncer_type, "Database");
        assert_eq!(syncer.port, 3306);
        assert_eq!(syncer.table_columns.len(), 1);
        assert_eq!(syncer.table_columns[0].user_field, "Name");
        assert!(syncer.table_columns[0].values.is_empty());
    }

    #[test]
    fn test_record_keeps_numeric_id() {
        let record: Record = serde_json::from_str(
            r#"{"id": 17, "owner": "built-in", "name": "a1b2", "method": "POST", "requestUri": "/api/login"}"#,
        )
        .unwrap();

        assert_eq!(record.id, 17);
        assert_eq!(record.request_uri, "/api/login");
    }
}
