use clap::{Parser, Subcommand, ValueEnum};
use iam_backend_client::SortOrder;
use iam_console_core::AuthMethod;
use iam_console_core::models::ResourceId;
use std::path::PathBuf;

/// Drive the IAM console login flows and manage backend records
#[derive(Debug, Parser)]
#[command(name = "iam-console")]
#[command(about = "Drive the IAM console login flows and manage backend records")]
#[command(version)]
pub struct Args {
    /// Configuration file (defaults to iam-console.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the authorization link for a provider of an application
    AuthUrl {
        /// Application as OWNER/NAME
        #[arg(long, value_name = "ID")]
        application: ResourceId,

        /// Provider name as listed on the application
        #[arg(long)]
        provider: String,

        /// signup, login or link
        #[arg(long, default_value = "signup")]
        method: AuthMethod,

        /// Path of the page the link is shown on
        #[arg(long, default_value = "/login")]
        page_path: String,

        /// Query string of that page, e.g. a third-party authorization request
        #[arg(long, default_value = "")]
        page_query: String,

        /// Browser user agent, for providers that link differently in their own app
        #[arg(long)]
        user_agent: Option<String>,
    },

    /// Decode an OAuth state parameter
    DecodeState {
        state: String,
    },

    /// Parse SAML IdP metadata, optionally storing it on a provider
    SamlMetadata {
        /// Metadata XML document
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,

        /// Provider to update, as OWNER/NAME
        #[arg(long, value_name = "ID")]
        apply: Option<ResourceId>,
    },

    /// Start a SAML login and print where the browser goes
    SamlLogin {
        /// Provider as OWNER/NAME
        #[arg(long, value_name = "ID")]
        provider: ResourceId,

        /// Query string of the login page
        #[arg(long, default_value = "")]
        login_query: String,
    },

    /// Complete an OAuth provider callback
    Callback {
        /// Callback query string (code, state, ...)
        #[arg(long)]
        query: String,
    },

    /// Complete a SAML callback
    SamlCallback {
        /// Callback query string (SAMLResponse, RelayState)
        #[arg(long)]
        query: String,
    },

    /// List records of an owner
    List {
        kind: ResourceKind,

        #[arg(long)]
        owner: String,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        page_size: u32,

        /// Search column
        #[arg(long, requires = "value")]
        field: Option<String>,

        /// Search value
        #[arg(long, requires = "field")]
        value: Option<String>,

        #[arg(long)]
        sort_field: Option<String>,

        /// ascend or descend
        #[arg(long, requires = "sort_field")]
        sort_order: Option<SortOrder>,
    },

    /// Print one record
    Get {
        kind: ResourceKind,

        /// OWNER/NAME, or OWNER/ID for an LDAP server
        id: ResourceId,
    },

    /// Delete one record
    Delete {
        kind: ResourceKind,

        /// OWNER/NAME, or OWNER/ID for an LDAP server
        id: ResourceId,
    },

    /// Import the users of an LDAP server that are not yet in its organization
    SyncLdap {
        /// LDAP server as OWNER/ID
        id: ResourceId,

        /// List what would be imported without importing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the signed-in account
    Account,

    /// Send a verification code to an email address or phone number
    SendCode {
        dest: String,

        /// Organization as OWNER/NAME
        #[arg(long)]
        org_id: String,

        /// Captcha id from the human check
        #[arg(long, requires = "captcha")]
        captcha_id: Option<String>,

        /// Captcha answer
        #[arg(long, requires = "captcha_id")]
        captcha: Option<String>,
    },

    /// Change the signed-in user's email address or phone number
    ResetEmailOrPhone {
        dest: String,

        /// Verification code sent to DEST
        #[arg(long)]
        code: String,
    },

    /// End the backend session
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Organization,
    User,
    Role,
    Permission,
    Application,
    Provider,
    Cert,
    Syncer,
    Token,
    Record,
    Payment,
    Webhook,
    Resource,
    Ldap,
}
