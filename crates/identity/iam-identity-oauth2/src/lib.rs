//! Login-flow plumbing for the IAM console.
//!
//! Builds the provider authorization links shown on login and signup pages,
//! carries the initiating page through the OAuth `state` parameter, parses
//! SAML IdP metadata and packs the SAML RelayState, and turns a provider
//! callback into a backend login plus the redirect that follows it.

mod authorization_url;
mod callback;
mod error;
mod providers;
mod saml;
mod state;


pub use authorization_url::{AuthLink, AuthUrlBuilder, UnsupportedProvider};
pub use callback::{CallbackDispatcher, CallbackOutcome};
pub use error::{AuthFlowError, AuthFlowResult};
pub use providers::{OAuthProviderKind, provider_homepage, provider_logo};
pub use saml::{
    RelayState, SamlLoginAction, SamlMetadata, apply_saml_metadata, initiate_saml_login,
    parse_saml_metadata,
};
pub use state::{DecodedState, PageContext, StateCodec};
