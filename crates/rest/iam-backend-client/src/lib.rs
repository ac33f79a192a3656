//! Async client for the IAM backend REST API.
//!
//! [`BackendClient`] wraps the `/api/*` endpoints the console uses: generic
//! list/get/add/update/delete over every managed [`Resource`], LDAP servers
//! and user import, the session and login endpoints, and verification codes. Session cookies are
//! kept in the client's cookie store, so a login carries over to later calls.
//!
//! [`Resource`]: iam_console_core::models::Resource

mod auth;
mod client;
mod error;
mod ldap;
mod resources;
mod verification;

pub use auth::{AccountInfo, SignupForm};
pub use client::{BackendClient, BackendClientBuilder};
pub use error::{ClientError, ClientResult};
pub use ldap::LdapSaved;
pub use resources::{ListQuery, Page, SortOrder};
pub use verification::{Destination, HumanCheck, ResendCountdown, VerificationRequest};
