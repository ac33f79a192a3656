//! LDAP servers and user import from them.
//!
//! These endpoints are all `POST` and address a server by its bare id, so
//! they sit beside the generic record calls rather than going through them.
//! `update-ldap` in particular takes the record as the whole request, with no
//! `?id=`, and answers with the stored record in `data2`.

use crate::client::BackendClient;
use crate::error::{ClientError, ClientResult};
use iam_console_core::models::{Ldap, LdapSyncResult, LdapUser, LdapUsers};
use iam_console_core::{ActionOutcome, ApiResponse, BackendError, EditSession};
use tracing::{info, warn};

/// Outcome of an add or update, plus the record as the backend stored it
/// when the write took effect.
#[derive(Debug, Clone, PartialEq)]
pub struct LdapSaved {
    pub outcome: ActionOutcome,
    pub ldap: Option<Ldap>,
}

impl LdapSaved {
    fn from_response(response: &ApiResponse) -> ClientResult<Self> {
        let outcome = ActionOutcome::from_response(response)?;
        let ldap = if response.data2.is_null() {
            None
        } else {
            Some(serde_json::from_value(response.data2.clone())?)
        };
        Ok(Self { outcome, ldap })
    }
}

impl BackendClient {
    pub async fn list_ldaps(&self, owner: &str) -> ClientResult<Vec<Ldap>> {
        let url = self.endpoint_with_query("get-ldaps", [("owner", owner)])?;
        let response = self.post_empty(url).await?.into_result()?;
        let ldaps: Option<Vec<Ldap>> = response.data_as()?;
        Ok(ldaps.unwrap_or_default())
    }

    /// `None` when no server has this id.
    pub async fn get_ldap(&self, id: &str) -> ClientResult<Option<Ldap>> {
        let url = self.endpoint_with_query("get-ldap", [("id", id)])?;
        let response = self.post_empty(url).await?.into_result()?;
        Ok(response.data_as()?)
    }

    pub async fn add_ldap(&self, ldap: &Ldap) -> ClientResult<LdapSaved> {
        let url = self.endpoint("add-ldap")?;
        let response = self.post_json(url, ldap).await?.into_result()?;
        let saved = LdapSaved::from_response(&response)?;
        info!("Added LDAP server {} for {} ({:?})", ldap.server_name, ldap.owner, saved.outcome);
        Ok(saved)
    }

    /// Saves `ldap` over the server with the same id.
    pub async fn update_ldap(&self, ldap: &Ldap) -> ClientResult<LdapSaved> {
        let url = self.endpoint("update-ldap")?;
        let response = self.post_json(url, ldap).await?.into_result()?;
        let saved = LdapSaved::from_response(&response)?;
        info!("Updated LDAP server {} ({:?})", ldap.id, saved.outcome);
        Ok(saved)
    }

    pub async fn delete_ldap(&self, ldap: &Ldap) -> ClientResult<ActionOutcome> {
        let url = self.endpoint("delete-ldap")?;
        let response = self.post_json(url, ldap).await?.into_result()?;
        let outcome = ActionOutcome::from_response(&response)?;
        info!("Deleted LDAP server {} ({:?})", ldap.id, outcome);
        Ok(outcome)
    }

    /// Saves the draft of an LDAP edit session.
    ///
    /// On success the session takes the record the backend returned. A
    /// rejected save rolls the draft back; transport failures keep it.
    pub async fn submit_ldap_edit(
        &self,
        session: &mut EditSession<Ldap>,
    ) -> ClientResult<ActionOutcome> {
        match self.update_ldap(session.draft()).await {
            Ok(LdapSaved {
                outcome,
                ldap: Some(stored),
            }) => {
                session.accept(stored);
                Ok(outcome)
            }
            Ok(LdapSaved { outcome, ldap: None }) => {
                session.commit();
                Ok(outcome)
            }
            Err(error @ ClientError::BackendError(BackendError::Rejected { .. })) => {
                warn!(
                    "Save of LDAP server {} rejected, reverting draft: {}",
                    session.saved().id,
                    error
                );
                session.rollback();
                Err(error)
            }
            Err(error) => Err(error),
        }
    }

    /// Reads the user entries under the server's base DN. The backend binds
    /// with the connection fields of `ldap`, which need not be saved yet.
    pub async fn get_ldap_users(&self, ldap: &Ldap) -> ClientResult<Vec<LdapUser>> {
        let url = self.endpoint("get-ldap-user")?;
        let response = self.post_json(url, ldap).await?.into_result()?;
        let found: LdapUsers = response.data_as()?;
        Ok(found.users)
    }

    /// Uuids among `uuids` that already belong to users of `owner`.
    pub async fn check_ldap_users_exist(
        &self,
        owner: &str,
        uuids: &[String],
    ) -> ClientResult<Vec<String>> {
        let url = self.endpoint_with_query("check-ldap-users-exist", [("owner", owner)])?;
        let response = self.post_json(url, uuids).await?.into_result()?;
        let existing: Option<Vec<String>> = response.data_as()?;
        Ok(existing.unwrap_or_default())
    }

    /// Imports `users` into `owner` and stamps the server's last sync time.
    pub async fn sync_ldap_users(
        &self,
        owner: &str,
        ldap_id: &str,
        users: &[LdapUser],
    ) -> ClientResult<LdapSyncResult> {
        let url = self.endpoint_with_query(
            "sync-ldap-users",
            [("owner", owner), ("ldapId", ldap_id)],
        )?;
        let response = self.post_json(url, users).await?.into_result()?;
        let result: LdapSyncResult = response.data_as()?;

        info!(
            "Synced {} of {} LDAP user(s) from {} into {} ({} existing, {} failed)",
            result.imported(users.len()),
            users.len(),
            ldap_id,
            owner,
            result.exist.len(),
            result.failed.len()
        );
        Ok(result)
    }
}
