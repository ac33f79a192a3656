//! Command-line front end for the IAM console: provider login links, OAuth
//! and SAML callbacks, SAML metadata import and record management.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

pub use cli::{Args, Command, ResourceKind};
pub use commands::Console;
pub use config::Config;
