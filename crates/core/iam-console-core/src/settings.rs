use url::Url;

/// Runtime settings handed to the URL builder, the callback dispatchers and
/// the backend client.
#[derive(Debug, Clone)]
pub struct ConsoleSettings {
    /// Base URL of the backend authentication server, e.g. `http://localhost:8000`.
    pub server_url: Url,
    /// Origin the console is served from; provider callbacks land on
    /// `{origin}/callback`.
    pub origin: Url,
    /// Base URL for provider logos.
    pub static_base_url: String,
}

impl ConsoleSettings {
    pub fn new(server_url: Url, origin: Url) -> Self {
        Self {
            server_url,
            origin,
            static_base_url: "/static".to_string(),
        }
    }

    pub fn with_static_base_url(mut self, static_base_url: impl Into<String>) -> Self {
        self.static_base_url = static_base_url.into();
        self
    }

    /// `scheme://host[:port]` of the backend server.
    pub fn server_origin(&self) -> String {
        self.server_url.origin().ascii_serialization()
    }

    /// `scheme://host[:port]` of the console.
    pub fn console_origin(&self) -> String {
        self.origin.origin().ascii_serialization()
    }

    pub fn callback_url(&self) -> String {
        format!("{}/callback", self.console_origin())
    }

    pub fn saml_callback_url(&self) -> String {
        format!("{}/callback/saml", self.console_origin())
    }

    /// Whether `redirect_uri` points back at the authentication server itself,
    /// in which case a flow is a direct login rather than a code hand-off.
    pub fn is_server_origin(&self, redirect_uri: &str) -> bool {
        match Url::parse(redirect_uri) {
            Ok(url) => url.origin().ascii_serialization() == self.server_origin(),
            Err(_) => false,
        }
    }
}
