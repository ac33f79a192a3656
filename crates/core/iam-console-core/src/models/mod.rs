//! Records managed through the console.
//!
//! Every record but [`Ldap`] is addressed by `<owner>/<name>`. Fields the
//! console does not model are kept in `extra` so a fetched record can be
//! sent back on update without dropping anything.

mod application;
mod directory;
mod ldap;
mod provider;
mod records;

pub use application::{Application, ProviderItem, SignupItem};
pub use directory::{Organization, Permission, Role, User};
pub use ldap::{Ldap, LdapSyncResult, LdapUser, LdapUsers};
pub use provider::{Provider, ProviderCategory};
pub use records::{Cert, Payment, Record, StoredResource, Syncer, TableColumn, Token, Webhook, WebhookHeader};

use crate::error::BackendError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::str::FromStr;

/// A record exposed through the `get-<kind>s`/`get-<kind>`/`add-<kind>`/
/// `update-<kind>`/`delete-<kind>` endpoints.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Singular path segment, e.g. `application`.
    const KIND: &'static str;

    fn owner(&self) -> &str;
    fn name(&self) -> &str;

    fn id(&self) -> ResourceId {
        ResourceId::new(self.owner(), self.name())
    }
}

macro_rules! impl_resource {
    ($($ty:ty => $kind:literal),+ $(,)?) => {
        $(
            impl Resource for $ty {
                const KIND: &'static str = $kind;

                fn owner(&self) -> &str {
                    &self.owner
                }

                fn name(&self) -> &str {
                    &self.name
                }
            }
        )+
    };
}

impl_resource! {
    Organization => "organization",
    User => "user",
    Role => "role",
    Permission => "permission",
    Application => "application",
    Provider => "provider",
    Cert => "cert",
    Syncer => "syncer",
    Token => "token",
    Record => "record",
    Payment => "payment",
    Webhook => "webhook",
    StoredResource => "resource",
}

/// `<owner>/<name>` address of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    pub owner: String,
    pub name: String,
}

impl ResourceId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for ResourceId {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self::new(owner, name))
            }
            _ => Err(BackendError::InvalidResourceId(s.to_string())),
        }
    }
}
