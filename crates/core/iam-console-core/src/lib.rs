//! Core types shared by the IAM console crates.
//!
//! This crate holds the records managed through the console, the backend
//! response envelope, the OAuth request parameters carried through login
//! flows, the explicit console settings, and the [`AuthBackend`] seam the
//! login dispatchers call into.

mod backend;
mod edit;
mod error;
mod oauth;
mod response;
mod settings;

pub mod models;

pub use backend::AuthBackend;
pub use edit::EditSession;
pub use error::{BackendError, BackendResult};
pub use oauth::{AuthMethod, FlowKind, LoginForm, OAuthParams};
pub use response::{ActionOutcome, ApiResponse, ApiStatus};
pub use settings::ConsoleSettings;
