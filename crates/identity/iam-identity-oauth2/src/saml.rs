//! SAML IdP metadata and the RelayState round trip.

use crate::error::{AuthFlowError, AuthFlowResult};
use base64::{Engine, engine::general_purpose::STANDARD};
use iam_console_core::models::Provider;
use iam_console_core::{AuthBackend, ConsoleSettings};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde::Serialize;
use tracing::{debug, info};
use url::form_urlencoded;

/// The values the console copies from IdP metadata into a SAML provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamlMetadata {
    /// Text of the first `X509Certificate`; stored as the provider's `idP`.
    pub certificate: String,
    /// `Location` of the first `SingleSignOnService`.
    pub endpoint: String,
    /// `entityID` of the `EntityDescriptor`.
    pub issuer_url: String,
}

fn attribute(element: &BytesStart<'_>, name: &str) -> AuthFlowResult<Option<String>> {
    let attribute = element
        .try_get_attribute(name)
        .map_err(|e| AuthFlowError::MalformedMetadata(e.to_string()))?;

    match attribute {
        Some(attribute) => {
            let value = attribute
                .unescape_value()
                .map_err(|e| AuthFlowError::MalformedMetadata(e.to_string()))?;
            Ok(Some(value.trim().to_string()).filter(|value| !value.is_empty()))
        }
        None => Ok(None),
    }
}

/// Extracts certificate, SSO endpoint and issuer from an IdP metadata
/// document. Elements are matched by local name, so any namespace prefix
/// (`md:`, `ds:` or none) is accepted.
pub fn parse_saml_metadata(xml: &str) -> AuthFlowResult<SamlMetadata> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut certificate: Option<String> = None;
    let mut endpoint: Option<String> = None;
    let mut issuer_url: Option<String> = None;

    let mut in_certificate = false;
    let mut certificate_text = String::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| AuthFlowError::MalformedMetadata(e.to_string()))?;
        let is_start = matches!(event, Event::Start(_));

        match event {
            Event::Start(element) | Event::Empty(element) => {
                match element.local_name().as_ref() {
                    b"EntityDescriptor" if issuer_url.is_none() => {
                        issuer_url = attribute(&element, "entityID")?;
                    }
                    b"SingleSignOnService" if endpoint.is_none() => {
                        endpoint = attribute(&element, "Location")?;
                    }
                    b"X509Certificate" if certificate.is_none() => {
                        // An empty element has no closing event to wait for.
                        in_certificate = is_start;
                    }
                    _ => {}
                }
            }
            Event::Text(text) if in_certificate => {
                let text = text
                    .unescape()
                    .map_err(|e| AuthFlowError::MalformedMetadata(e.to_string()))?;
                certificate_text.push_str(&text);
            }
            Event::CData(data) if in_certificate => {
                certificate_text.push_str(&String::from_utf8_lossy(&data));
            }
            Event::End(element) if in_certificate => {
                if element.local_name().as_ref() == b"X509Certificate" {
                    in_certificate = false;
                    let text = certificate_text.trim();
                    if !text.is_empty() {
                        certificate = Some(text.to_string());
                    }
                    certificate_text.clear();
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(SamlMetadata {
        certificate: certificate.ok_or(AuthFlowError::MissingMetadataNode("X509Certificate"))?,
        endpoint: endpoint.ok_or(AuthFlowError::MissingMetadataNode(
            "SingleSignOnService Location",
        ))?,
        issuer_url: issuer_url.ok_or(AuthFlowError::MissingMetadataNode(
            "EntityDescriptor entityID",
        ))?,
    })
}

/// Returns a copy of `provider` with `idP`, `endpoint` and `issuerUrl` taken
/// from its `metadata` document.
pub fn apply_saml_metadata(provider: &Provider) -> AuthFlowResult<Provider> {
    let metadata = parse_saml_metadata(&provider.metadata)?;
    debug!(
        "Parsed SAML metadata for provider {}: issuer {}",
        provider.name, metadata.issuer_url
    );

    Ok(Provider {
        idp: metadata.certificate,
        endpoint: metadata.endpoint,
        issuer_url: metadata.issuer_url,
        ..provider.clone()
    })
}

/// What the console passes through the IdP and gets back on `/callback/saml`:
/// `clientId&application&provider&realRedirectUri&callbackUri`, base64
/// encoded. Absent values travel as the literal `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayState {
    pub client_id: Option<String>,
    pub application: Option<String>,
    pub provider: String,
    pub real_redirect_uri: Option<String>,
    pub callback_uri: String,
}

const NULL: &str = "null";
const DEFAULT_APPLICATION: &str = "app-built-in";

fn present(value: &str) -> Option<String> {
    match value {
        "" | NULL => None,
        value => Some(value.to_string()),
    }
}

impl RelayState {
    /// RelayState for a SAML login started from the login page with query
    /// `login_query` (`client_id`, `state` and `redirect_uri` of the relying
    /// party, if any).
    pub fn from_login_query(login_query: &str, provider: &str, settings: &ConsoleSettings) -> Self {
        let login_query = login_query.strip_prefix('?').unwrap_or(login_query);
        let pairs: Vec<(String, String)> = form_urlencoded::parse(login_query.as_bytes())
            .into_owned()
            .collect();
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .and_then(|(_, v)| present(v))
        };

        Self {
            client_id: get("client_id"),
            application: get("state"),
            provider: provider.to_string(),
            real_redirect_uri: get("redirect_uri"),
            callback_uri: settings.saml_callback_url(),
        }
    }

    /// The application to sign in to.
    pub fn application_or_default(&self) -> &str {
        self.application.as_deref().unwrap_or(DEFAULT_APPLICATION)
    }

    pub fn encode(&self) -> String {
        let or_null = |value: &Option<String>| value.clone().unwrap_or_else(|| NULL.to_string());
        let raw = [
            or_null(&self.client_id),
            or_null(&self.application),
            self.provider.clone(),
            or_null(&self.real_redirect_uri),
            self.callback_uri.clone(),
        ]
        .join("&");

        STANDARD.encode(raw)
    }

    pub fn decode(relay_state: &str) -> AuthFlowResult<Self> {
        let bytes = STANDARD
            .decode(relay_state)
            .map_err(|e| AuthFlowError::InvalidRelayState(e.to_string()))?;
        let raw =
            String::from_utf8(bytes).map_err(|e| AuthFlowError::InvalidRelayState(e.to_string()))?;

        let parts: Vec<&str> = raw.split('&').collect();
        if parts.len() < 4 {
            return Err(AuthFlowError::InvalidRelayState(format!(
                "expected at least 4 fields, got {}",
                parts.len()
            )));
        }

        Ok(Self {
            client_id: present(parts[0]),
            application: present(parts[1]),
            provider: parts[2].to_string(),
            real_redirect_uri: present(parts[3]),
            callback_uri: parts.get(4).map(|s| s.to_string()).unwrap_or_default(),
        })
    }
}

/// How the browser proceeds to the IdP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SamlLoginAction {
    /// HTTP-POST binding: an auto-submitting HTML form to render as-is.
    PostForm(String),
    /// HTTP-Redirect binding.
    Redirect(String),
}

/// Starts a SAML login for `provider` from the login page.
pub async fn initiate_saml_login(
    backend: &dyn AuthBackend,
    provider: &Provider,
    login_query: &str,
    settings: &ConsoleSettings,
) -> AuthFlowResult<SamlLoginAction> {
    let relay_state = RelayState::from_login_query(login_query, &provider.name, settings);
    let provider_id = format!("{}/{}", provider.owner, provider.name);

    let response = backend
        .get_saml_login(&provider_id, &relay_state.encode())
        .await?
        .into_result()?;

    let document = response.data_str().unwrap_or_default().to_string();
    let action = if response.data2_str() == Some("POST") {
        SamlLoginAction::PostForm(document)
    } else {
        SamlLoginAction::Redirect(document)
    };

    info!(
        "Started SAML login with provider {} for application {}",
        provider_id,
        relay_state.application_or_default()
    );

    Ok(action)
}
