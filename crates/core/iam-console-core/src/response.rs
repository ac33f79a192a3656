//! The `{status, msg, data, data2}` envelope returned by the backend.

use crate::error::{BackendError, BackendResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub data2: serde_json::Value,
}

impl ApiResponse {
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            status: ApiStatus::Ok,
            msg: String::new(),
            sub: String::new(),
            name: String::new(),
            data,
            data2: serde_json::Value::Null,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            status: ApiStatus::Error,
            msg: msg.into(),
            sub: String::new(),
            name: String::new(),
            data: serde_json::Value::Null,
            data2: serde_json::Value::Null,
        }
    }

    pub fn with_data2(mut self, data2: serde_json::Value) -> Self {
        self.data2 = data2;
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == ApiStatus::Ok
    }

    /// Turns an `error` status into [`BackendError::Rejected`].
    pub fn into_result(self) -> BackendResult<Self> {
        match self.status {
            ApiStatus::Ok => Ok(self),
            ApiStatus::Error => Err(BackendError::Rejected { msg: self.msg }),
        }
    }

    pub fn data_as<T: DeserializeOwned>(&self) -> BackendResult<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }

    /// `data` rendered as a plain string, as returned for authorization codes
    /// and SAML login documents.
    pub fn data_str(&self) -> Option<&str> {
        self.data.as_str()
    }

    pub fn data2_str(&self) -> Option<&str> {
        self.data2.as_str()
    }
}

/// Result of an add/update/delete call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Affected,
    Unaffected,
}

impl ActionOutcome {
    pub fn from_response(response: &ApiResponse) -> BackendResult<Self> {
        match response.data_str() {
            Some("Affected") => Ok(Self::Affected),
            Some("Unaffected") => Ok(Self::Unaffected),
            other => Err(BackendError::UnexpectedResponse(format!(
                "expected Affected/Unaffected, got {:?}",
                other
            ))),
        }
    }

    pub fn is_affected(self) -> bool {
        self == Self::Affected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_paginated_envelope() {
        let json = r#"{
            "status": "ok",
            "msg": "",
            "data": [{"owner": "admin", "name": "app-built-in"}],
            "data2": 1
        }"#;

        let response: ApiResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_ok());
        assert_eq!(response.data2, serde_json::json!(1));
        assert!(response.data.is_array());
    }

    #[test]
    fn test_error_status_becomes_rejected() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"status": "error", "msg": "Unauthorized operation"}"#)
                .unwrap();

        match response.into_result() {
            Err(BackendError::Rejected { msg }) => assert_eq!(msg, "Unauthorized operation"),
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_action_outcome() {
        let affected = ApiResponse::ok(serde_json::json!("Affected"));
        let unaffected = ApiResponse::ok(serde_json::json!("Unaffected"));
        let weird = ApiResponse::ok(serde_json::json!(42));

        assert_eq!(
            ActionOutcome::from_response(&affected).unwrap(),
            ActionOutcome::Affected
        );
        assert_eq!(
            ActionOutcome::from_response(&unaffected).unwrap(),
            ActionOutcome::Unaffected
        );
        assert!(ActionOutcome::from_response(&weird).is_err());
    }
}
