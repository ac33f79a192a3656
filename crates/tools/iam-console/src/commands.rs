//! Execution of the CLI commands against the backend.

use crate::cli::{Command, ResourceKind};
use crate::config::Config;
use anyhow::{Context, Result};
use iam_backend_client::{
    BackendClient, ClientError, Destination, ListQuery, ResendCountdown, VerificationRequest,
};
use iam_console_core::models::{
    Application, Cert, Ldap, LdapUser, Organization, Payment, Permission, Provider, Record,
    Resource, ResourceId, Role, StoredResource, Syncer, Token, User, Webhook,
};
use iam_console_core::{AuthBackend, AuthMethod, ConsoleSettings, EditSession};
use iam_identity_oauth2::{
    AuthUrlBuilder, CallbackDispatcher, PageContext, SamlLoginAction, StateCodec,
    apply_saml_metadata, initiate_saml_login, parse_saml_metadata,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Runs `$body` with `$ty` bound to the record type of `$kind`. LDAP servers
/// are not addressed by name and run `$ldap` instead.
macro_rules! with_resource_type {
    ($kind:expr, $ty:ident => $body:expr, ldap => $ldap:expr) => {
        match $kind {
            ResourceKind::Organization => {
                type $ty = Organization;
                $body
            }
            ResourceKind::User => {
                type $ty = User;
                $body
            }
            ResourceKind::Role => {
                type $ty = Role;
                $body
            }
            ResourceKind::Permission => {
                type $ty = Permission;
                $body
            }
            ResourceKind::Application => {
                type $ty = Application;
                $body
            }
            ResourceKind::Provider => {
                type $ty = Provider;
                $body
            }
            ResourceKind::Cert => {
                type $ty = Cert;
                $body
            }
            ResourceKind::Syncer => {
                type $ty = Syncer;
                $body
            }
            ResourceKind::Token => {
                type $ty = Token;
                $body
            }
            ResourceKind::Record => {
                type $ty = Record;
                $body
            }
            ResourceKind::Payment => {
                type $ty = Payment;
                $body
            }
            ResourceKind::Webhook => {
                type $ty = Webhook;
                $body
            }
            ResourceKind::Resource => {
                type $ty = StoredResource;
                $body
            }
            ResourceKind::Ldap => $ldap,
        }
    };
}

/// Everything a command needs: settings, the state codec and a backend client.
pub struct Console {
    settings: ConsoleSettings,
    client: Arc<BackendClient>,
    links: AuthUrlBuilder,
    callbacks: CallbackDispatcher,
}

impl Console {
    pub fn new(config: &Config) -> Result<Self> {
        let settings = config.to_settings()?;
        let codec = config.state_codec();
        let client = Arc::new(
            BackendClient::new(settings.clone(), config.http_timeout())
                .context("Failed to create backend client")?,
        );

        let backend: Arc<dyn AuthBackend> = client.clone();
        let callbacks = CallbackDispatcher::new(backend, settings.clone(), codec.clone());
        let links = AuthUrlBuilder::new(settings.clone(), codec);

        Ok(Self {
            settings,
            client,
            links,
            callbacks,
        })
    }

    fn codec(&self) -> &StateCodec {
        self.links.codec()
    }

    /// Executes `command` and returns what should be printed.
    pub async fn run(&self, command: Command) -> Result<String> {
        match command {
            Command::AuthUrl {
                application,
                provider,
                method,
                page_path,
                page_query,
                user_agent,
            } => {
                let mut page = PageContext::new(page_path, page_query);
                if let Some(user_agent) = user_agent {
                    page = page.with_user_agent(user_agent);
                }
                self.auth_url(&application, &provider, method, &page).await
            }
            Command::DecodeState { state } => self.decode_state(&state),
            Command::SamlMetadata { file, apply } => self.saml_metadata(&file, apply.as_ref()).await,
            Command::SamlLogin {
                provider,
                login_query,
            } => self.saml_login(&provider, &login_query).await,
            Command::Callback { query } => {
                let outcome = self.callbacks.handle_oauth_callback(&query).await?;
                Ok(outcome.to_string())
            }
            Command::SamlCallback { query } => {
                let outcome = self.callbacks.handle_saml_callback(&query).await?;
                Ok(outcome.to_string())
            }
            Command::List {
                kind,
                owner,
                page,
                page_size,
                field,
                value,
                sort_field,
                sort_order,
            } => {
                let mut query = ListQuery::page(page, page_size);
                if let (Some(field), Some(value)) = (field, value) {
                    query = query.search(field, value);
                }
                if let (Some(sort_field), Some(sort_order)) = (sort_field, sort_order) {
                    query = query.sort(sort_field, sort_order);
                }
                with_resource_type!(
                    kind,
                    T => self.list_records::<T>(&owner, &query).await,
                    ldap => self.list_ldaps(&owner).await
                )
            }
            Command::Get { kind, id } => with_resource_type!(
                kind,
                T => self.get_record::<T>(&id).await,
                ldap => Ok(serde_json::to_string_pretty(&self.fetch_ldap(&id).await?)?)
            ),
            Command::Delete { kind, id } => with_resource_type!(
                kind,
                T => self.delete_record::<T>(&id).await,
                ldap => self.delete_ldap(&id).await
            ),
            Command::SyncLdap { id, dry_run } => self.sync_ldap(&id, dry_run).await,
            Command::Account => {
                let account = self.client.get_account().await?;
                Ok(serde_json::to_string_pretty(&account.user)?)
            }
            Command::SendCode {
                dest,
                org_id,
                captcha_id,
                captcha,
            } => self.send_code(&dest, &org_id, captcha_id, captcha).await,
            Command::ResetEmailOrPhone { dest, code } => {
                let destination = Destination::classify(&dest)
                    .ok_or_else(|| ClientError::InvalidDestination(dest.clone()))?;
                self.client
                    .reset_email_or_phone(&dest, destination, &code)
                    .await?;
                Ok(format!("Changed {} to {}", destination.as_str(), dest))
            }
            Command::Logout => {
                self.client.logout().await?;
                Ok("Signed out".to_string())
            }
        }
    }

    async fn fetch<T: Resource>(&self, id: &ResourceId) -> Result<T> {
        self.client
            .get::<T>(id)
            .await
            .with_context(|| format!("Failed to fetch {} {}", T::KIND, id))?
            .with_context(|| format!("{} {} not found", T::KIND, id))
    }

    async fn auth_url(
        &self,
        application_id: &ResourceId,
        provider_name: &str,
        method: AuthMethod,
        page: &PageContext,
    ) -> Result<String> {
        let application: Application = self.fetch(application_id).await?;

        // Applications normally embed their providers; fall back to the record.
        let provider = match application
            .provider_item(provider_name)
            .and_then(|item| item.provider.clone())
        {
            Some(provider) => Some(provider),
            None => {
                debug!(
                    "Provider {} not embedded in {}, fetching it",
                    provider_name, application_id
                );
                self.client
                    .get::<Provider>(&ResourceId::new(&application.owner, provider_name))
                    .await?
            }
        };

        let link = self
            .links
            .build(Some(&application), provider.as_ref(), method, page)?;
        Ok(link.to_string())
    }

    fn decode_state(&self, state: &str) -> Result<String> {
        let decoded = self.codec().decode(state).context("Failed to decode state")?;
        let lines: Vec<String> = decoded
            .pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        Ok(lines.join("\n"))
    }

    async fn saml_metadata(&self, file: &Path, apply: Option<&ResourceId>) -> Result<String> {
        let xml = tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read metadata file {}", file.display()))?;

        let Some(provider_id) = apply else {
            let metadata = parse_saml_metadata(&xml)?;
            return Ok(serde_json::to_string_pretty(&metadata)?);
        };

        let provider: Provider = self.fetch(provider_id).await?;
        if !provider.is_saml() {
            anyhow::bail!(
                "Provider {} is a {} provider, not SAML",
                provider_id,
                provider.category
            );
        }

        let mut session = EditSession::new(provider);
        session.update(|provider| Provider {
            metadata: xml,
            ..provider
        });
        session.try_update(apply_saml_metadata)?;

        let outcome = self.client.submit_edit(&mut session).await?;
        info!("Stored SAML metadata on provider {}", provider_id);
        Ok(format!(
            "Updated provider {} ({:?}), IdP endpoint {}",
            provider_id,
            outcome,
            session.saved().endpoint
        ))
    }

    async fn saml_login(&self, provider_id: &ResourceId, login_query: &str) -> Result<String> {
        let provider: Provider = self.fetch(provider_id).await?;
        let action =
            initiate_saml_login(self.client.as_ref(), &provider, login_query, &self.settings)
                .await?;

        Ok(match action {
            SamlLoginAction::PostForm(html) => html,
            SamlLoginAction::Redirect(url) => url,
        })
    }

    async fn list_records<T: Resource>(&self, owner: &str, query: &ListQuery) -> Result<String> {
        let page = self.client.list::<T>(owner, query).await?;
        let body = serde_json::to_string_pretty(&page.items)?;
        Ok(format!(
            "{}\n{} {} record(s), page {} of {}",
            body,
            page.total,
            T::KIND,
            query.page,
            page.page_count(query.page_size)
        ))
    }

    async fn get_record<T: Resource>(&self, id: &ResourceId) -> Result<String> {
        let record: T = self.fetch(id).await?;
        Ok(serde_json::to_string_pretty(&record)?)
    }

    async fn delete_record<T: Resource>(&self, id: &ResourceId) -> Result<String> {
        let record: T = self.fetch(id).await?;
        let outcome = self.client.delete(&record).await?;
        Ok(format!("Deleted {} {} ({:?})", T::KIND, id, outcome))
    }

    /// The LDAP server `id.name`, which must belong to `id.owner`.
    async fn fetch_ldap(&self, id: &ResourceId) -> Result<Ldap> {
        let ldap = self
            .client
            .get_ldap(&id.name)
            .await
            .with_context(|| format!("Failed to fetch LDAP server {}", id))?
            .filter(|ldap| ldap.owner == id.owner)
            .with_context(|| format!("LDAP server {} not found", id))?;
        Ok(ldap)
    }

    async fn list_ldaps(&self, owner: &str) -> Result<String> {
        let ldaps = self.client.list_ldaps(owner).await?;
        let body = serde_json::to_string_pretty(&ldaps)?;
        Ok(format!("{}\n{} LDAP server(s)", body, ldaps.len()))
    }

    async fn delete_ldap(&self, id: &ResourceId) -> Result<String> {
        let ldap = self.fetch_ldap(id).await?;
        let outcome = self.client.delete_ldap(&ldap).await?;
        Ok(format!("Deleted LDAP server {} ({:?})", id, outcome))
    }

    async fn sync_ldap(&self, id: &ResourceId, dry_run: bool) -> Result<String> {
        let ldap = self.fetch_ldap(id).await?;
        let users = self
            .client
            .get_ldap_users(&ldap)
            .await
            .with_context(|| format!("Failed to read users from {}", ldap.host))?;

        let uuids: Vec<String> = users.iter().map(|user| user.uuid.clone()).collect();
        let existing = self.client.check_ldap_users_exist(&ldap.owner, &uuids).await?;
        let fresh: Vec<LdapUser> = users
            .into_iter()
            .filter(|user| !existing.contains(&user.uuid))
            .collect();
        debug!(
            "{} new and {} known user(s) on {}",
            fresh.len(),
            existing.len(),
            id
        );

        if dry_run || fresh.is_empty() {
            let names: Vec<&str> = fresh.iter().map(|user| user.uid.as_str()).collect();
            return Ok(format!(
                "{} user(s) to import from {}: {}",
                fresh.len(),
                id,
                names.join(", ")
            ));
        }

        let result = self
            .client
            .sync_ldap_users(&ldap.owner, &ldap.id, &fresh)
            .await?;
        let mut summary = format!(
            "Imported {} of {} user(s) from {}",
            result.imported(fresh.len()),
            fresh.len(),
            id
        );
        for user in &result.failed {
            summary.push_str(&format!("\nfailed: {} ({})", user.uid, user.uuid));
        }
        Ok(summary)
    }

    async fn send_code(
        &self,
        dest: &str,
        org_id: &str,
        captcha_id: Option<String>,
        captcha: Option<String>,
    ) -> Result<String> {
        let mut request = VerificationRequest::new(dest, org_id)?;

        let check = self.client.get_human_check().await?;
        if check.is_required() {
            match (captcha_id, captcha) {
                (Some(captcha_id), Some(answer)) => {
                    request = request.with_captcha(captcha_id, answer);
                }
                _ => anyhow::bail!(
                    "The backend requires a captcha (id {}); pass --captcha-id and --captcha",
                    check.captcha_id
                ),
            }
        }

        self.client.send_verification_code(request).await?;
        Ok(format!(
            "Verification code sent to {}; another can be requested in {}s",
            dest,
            ResendCountdown::DEFAULT_SECONDS
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use std::io::Write;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const METADATA: &str = r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" entityID="https://idp.example.com/realms/main">
  <md:IDPSSODescriptor>
    <md:KeyDescriptor use="signing">
      <ds:KeyInfo xmlns:ds="http://www.w3.org/2000/09/xmldsig#">
        <ds:X509Data><ds:X509Certificate>MIICnTCCAYUCBgGBq</ds:X509Certificate></ds:X509Data>
      </ds:KeyInfo>
    </md:KeyDescriptor>
    <md:SingleSignOnService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST" Location="https://idp.example.com/saml/post"/>
  </md:IDPSSODescriptor>
</md:EntityDescriptor>"#;

    async fn setup() -> (MockServer, Console) {
        let server = MockServer::start().await;
        let config = Config {
            server: ServerConfig {
                url: server.uri(),
                ..Default::default()
            },
            ..Default::default()
        };
        let console = Console::new(&config).unwrap();
        (server, console)
    }

    fn ok(data: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok",
            "msg": "",
            "data": data,
        }))
    }

    #[tokio::test]
    async fn test_auth_url_uses_embedded_provider() {
        let (server, console) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/get-application"))
            .and(query_param("id", "admin/app-built-in"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "owner": "admin",
                "name": "app-built-in",
                "providers": [{
                    "name": "provider_github",
                    "canSignIn": true,
                    "provider": {
                        "owner": "admin",
                        "name": "provider_github",
                        "category": "OAuth",
                        "type": "GitHub",
                        "clientId": "gh-client"
                    }
                }]
            })))
            .mount(&server)
            .await;

        let command = Command::AuthUrl {
            application: ResourceId::new("admin", "app-built-in"),
            provider: "provider_github".to_string(),
            method: AuthMethod::Signup,
            page_path: "/login".to_string(),
            page_query: String::new(),
            user_agent: None,
        };
        let link = console.run(command).await.unwrap();

        assert!(link.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(link.contains("client_id=gh-client"));
        assert!(link.contains("redirect_uri=http%3A%2F%2Flocalhost%3A7001%2Fcallback"));
    }

    #[tokio::test]
    async fn test_decode_state_prints_pairs() {
        let (_server, console) = setup().await;

        let page = PageContext::new("/login", "?client_id=abc");
        let state = StateCodec::new().encode(&page, "app1", "github", AuthMethod::Signup);

        let output = console
            .run(Command::DecodeState { state })
            .await
            .unwrap();
        assert_eq!(
            output,
            "client_id=abc\napplication=app1\nprovider=github\nmethod=signup"
        );
    }

    #[tokio::test]
    async fn test_callback_logs_in() {
        let (server, console) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/login"))
            .and(body_partial_json(serde_json::json!({
                "type": "login",
                "application": "app1",
                "code": "xyz",
            })))
            .respond_with(ok(serde_json::Value::Null))
            .expect(1)
            .mount(&server)
            .await;

        let state = StateCodec::new().encode(
            &PageContext::new("/login", ""),
            "app1",
            "github",
            AuthMethod::Signup,
        );
        let query = format!("code=xyz&state={}", state.replace('+', "%2B").replace('=', "%3D"));

        let output = console.run(Command::Callback { query }).await.unwrap();
        assert_eq!(output, "redirect /");
    }

    #[tokio::test]
    async fn test_list_dispatches_on_kind() {
        let (server, console) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/get-webhooks"))
            .and(query_param("owner", "admin"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "msg": "",
                "data": [{"owner": "admin", "name": "hook-1", "url": "https://example.com/hook"}],
                "data2": 11,
            })))
            .mount(&server)
            .await;

        let command = Command::List {
            kind: ResourceKind::Webhook,
            owner: "admin".to_string(),
            page: 1,
            page_size: 10,
            field: None,
            value: None,
            sort_field: None,
            sort_order: None,
        };
        let output = console.run(command).await.unwrap();

        assert!(output.contains("hook-1"));
        assert!(output.ends_with("11 webhook record(s), page 1 of 2"));
    }

    #[tokio::test]
    async fn test_get_missing_record_fails() {
        let (server, console) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/get-cert"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::Value::Null))
            .mount(&server)
            .await;

        let command = Command::Get {
            kind: ResourceKind::Cert,
            id: ResourceId::new("admin", "cert-missing"),
        };
        let error = console.run(command).await.unwrap_err();
        assert!(error.to_string().contains("cert admin/cert-missing not found"));
    }

    #[tokio::test]
    async fn test_saml_metadata_applied_to_provider() {
        let (server, console) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/get-provider"))
            .and(query_param("id", "admin/saml-idp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "owner": "admin",
                "name": "saml-idp",
                "category": "SAML",
                "type": "Keycloak"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/update-provider"))
            .and(query_param("id", "admin/saml-idp"))
            .and(body_partial_json(serde_json::json!({
                "idP": "MIICnTCCAYUCBgGBq",
                "endpoint": "https://idp.example.com/saml/post",
                "issuerUrl": "https://idp.example.com/realms/main",
            })))
            .respond_with(ok(serde_json::json!("Affected")))
            .expect(1)
            .mount(&server)
            .await;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(METADATA.as_bytes()).unwrap();

        let command = Command::SamlMetadata {
            file: file.path().to_path_buf(),
            apply: Some(ResourceId::new("admin", "saml-idp")),
        };
        let output = console.run(command).await.unwrap();
        assert!(output.contains("Affected"));
        assert!(output.ends_with("https://idp.example.com/saml/post"));
    }

    #[tokio::test]
    async fn test_send_code_requires_captcha_answer() {
        let (server, console) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/get-human-check"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "captcha",
                "captchaId": "c-9",
            })))
            .mount(&server)
            .await;

        let command = Command::SendCode {
            dest: "alice@example.com".to_string(),
            org_id: "admin/built-in".to_string(),
            captcha_id: None,
            captcha: None,
        };
        let error = console.run(command).await.unwrap_err();
        assert!(error.to_string().contains("c-9"));
    }

    fn mount_ldap(owner: &str) -> Mock {
        Mock::given(method("POST"))
            .and(path("/api/get-ldap"))
            .and(query_param("id", "ldap_8f3c"))
            .respond_with(ok(serde_json::json!({
                "id": "ldap_8f3c",
                "owner": owner,
                "serverName": "Corp LDAP",
                "host": "ldap.example.com",
                "port": 389,
                "admin": "cn=admin,dc=example,dc=com",
                "passwd": "secret",
                "baseDn": "ou=People,dc=example,dc=com"
            })))
    }

    #[tokio::test]
    async fn test_get_ldap_checks_owner() {
        let (server, console) = setup().await;
        mount_ldap("built-in").mount(&server).await;

        let command = Command::Get {
            kind: ResourceKind::Ldap,
            id: ResourceId::new("built-in", "ldap_8f3c"),
        };
        let output = console.run(command).await.unwrap();
        assert!(output.contains("ldap.example.com"));

        let command = Command::Get {
            kind: ResourceKind::Ldap,
            id: ResourceId::new("other-org", "ldap_8f3c"),
        };
        let error = console.run(command).await.unwrap_err();
        assert!(error.to_string().contains("LDAP server other-org/ldap_8f3c not found"));
    }

    #[tokio::test]
    async fn test_sync_ldap_imports_new_users_only() {
        let (server, console) = setup().await;
        mount_ldap("built-in").mount(&server).await;

        Mock::given(method("POST"))
            .and(path("/api/get-ldap-user"))
            .respond_with(ok(serde_json::json!({
                "users": [
                    {"uid": "alice", "uuid": "u-1"},
                    {"uid": "bob", "uuid": "u-2"},
                    {"uid": "carol", "uuid": "u-3"}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/check-ldap-users-exist"))
            .and(query_param("owner", "built-in"))
            .respond_with(ok(serde_json::json!(["u-1"])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/sync-ldap-users"))
            .and(query_param("owner", "built-in"))
            .and(query_param("ldapId", "ldap_8f3c"))
            .and(body_partial_json(serde_json::json!([{"uid": "bob"}, {"uid": "carol"}])))
            .respond_with(ok(serde_json::json!({
                "exist": [],
                "failed": [{"uid": "carol", "uuid": "u-3"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let command = Command::SyncLdap {
            id: ResourceId::new("built-in", "ldap_8f3c"),
            dry_run: false,
        };
        let output = console.run(command).await.unwrap();
        assert!(output.starts_with("Imported 1 of 2 user(s) from built-in/ldap_8f3c"));
        assert!(output.ends_with("failed: carol (u-3)"));
    }

    #[tokio::test]
    async fn test_sync_ldap_dry_run_lists_users() {
        let (server, console) = setup().await;
        mount_ldap("built-in").mount(&server).await;

        Mock::given(method("POST"))
            .and(path("/api/get-ldap-user"))
            .respond_with(ok(serde_json::json!({"users": [{"uid": "bob", "uuid": "u-2"}]})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/check-ldap-users-exist"))
            .respond_with(ok(serde_json::Value::Null))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/sync-ldap-users"))
            .respond_with(ok(serde_json::Value::Null))
            .expect(0)
            .mount(&server)
            .await;

        let command = Command::SyncLdap {
            id: ResourceId::new("built-in", "ldap_8f3c"),
            dry_run: true,
        };
        let output = console.run(command).await.unwrap();
        assert_eq!(output, "1 user(s) to import from built-in/ldap_8f3c: bob");
    }

    #[tokio::test]
    async fn test_reset_email_or_phone_classifies_dest() {
        let (server, console) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/reset-email-or-phone"))
            .respond_with(ok(serde_json::Value::Null))
            .expect(1)
            .mount(&server)
            .await;

        let command = Command::ResetEmailOrPhone {
            dest: "alice@example.com".to_string(),
            code: "482913".to_string(),
        };
        assert_eq!(
            console.run(command).await.unwrap(),
            "Changed email to alice@example.com"
        );

        let command = Command::ResetEmailOrPhone {
            dest: "a@b..c".to_string(),
            code: "482913".to_string(),
        };
        assert!(console.run(command).await.is_err());
    }
}
