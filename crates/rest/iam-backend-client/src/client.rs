use crate::error::{ClientError, ClientResult};
use iam_console_core::{ApiResponse, BackendError, ConsoleSettings};
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the backend `/api/*` endpoints.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    settings: ConsoleSettings,
}

/// Builder for [`BackendClient`].
pub struct BackendClientBuilder {
    settings: ConsoleSettings,
    timeout: Duration,
    client: Option<Client>,
}

impl BackendClientBuilder {
    pub fn new(settings: ConsoleSettings) -> Self {
        Self {
            settings,
            timeout: DEFAULT_TIMEOUT,
            client: None,
        }
    }

    /// Per-request timeout of the default HTTP client.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Uses a preconfigured HTTP client instead; it should keep cookies.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> ClientResult<BackendClient> {
        if self.timeout.is_zero() {
            return Err(ClientError::ConfigError(
                "timeout must be greater than zero".to_string(),
            ));
        }

        let http = match self.client {
            Some(client) => client,
            None => Client::builder()
                .timeout(self.timeout)
                .cookie_store(true)
                .build()?,
        };

        Ok(BackendClient {
            http,
            settings: self.settings,
        })
    }
}

impl BackendClient {
    pub fn builder(settings: ConsoleSettings) -> BackendClientBuilder {
        BackendClientBuilder::new(settings)
    }

    pub fn new(settings: ConsoleSettings, timeout: Duration) -> ClientResult<Self> {
        Self::builder(settings).with_timeout(timeout).build()
    }

    pub fn settings(&self) -> &ConsoleSettings {
        &self.settings
    }

    /// `{server}/api/{path}`
    pub(crate) fn endpoint(&self, path: &str) -> ClientResult<Url> {
        let base = self.settings.server_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}/api/{}", base, path))?)
    }

    /// `{server}/api/{path}?{query}`
    pub(crate) fn endpoint_with_query<'a, I>(&self, path: &str, query: I) -> ClientResult<Url>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut url = self.endpoint(path)?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> ClientResult<Response> {
        debug!("Calling backend {}", url.path());

        let response = request.send().await.map_err(|e| {
            error!("Request to {} failed: {}", url.path(), e);
            ClientError::HttpError(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Backend answered {} on {}: {}", status, url.path(), body);
            return Err(BackendError::UnexpectedResponse(format!("HTTP {}: {}", status, body)).into());
        }

        Ok(response)
    }

    /// GET returning a bare JSON document.
    pub(crate) async fn get_json<R: DeserializeOwned>(&self, url: Url) -> ClientResult<R> {
        let response = self.send(self.http.get(url.clone()), &url).await?;
        Ok(response.json().await?)
    }

    /// GET returning the `{status, msg, data, data2}` envelope.
    pub(crate) async fn get_envelope(&self, url: Url) -> ClientResult<ApiResponse> {
        self.get_json(url).await
    }

    pub(crate) async fn post_json<B>(&self, url: Url, body: &B) -> ClientResult<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(self.http.post(url.clone()).json(body), &url).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_empty(&self, url: Url) -> ClientResult<ApiResponse> {
        let response = self.send(self.http.post(url.clone()), &url).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_multipart(&self, url: Url, form: Form) -> ClientResult<ApiResponse> {
        let response = self.send(self.http.post(url.clone()).multipart(form), &url).await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(server: &str) -> ConsoleSettings {
        ConsoleSettings::new(
            Url::parse(server).unwrap(),
            Url::parse("http://localhost:7001").unwrap(),
        )
    }

    #[test]
    fn test_endpoint_joins_api_prefix() {
        let client = BackendClient::new(settings("http://localhost:8000/"), DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            client.endpoint("get-users").unwrap().as_str(),
            "http://localhost:8000/api/get-users"
        );

        let url = client
            .endpoint_with_query("get-user", [("id", "built-in/a b")])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/get-user?id=built-in%2Fa+b");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = BackendClient::new(settings("http://localhost:8000"), Duration::ZERO);
        assert!(matches!(result, Err(ClientError::ConfigError(_))));
    }
}
