//! The OAuth provider table and the provider catalogue.

use iam_console_core::models::{Provider, ProviderCategory};
use std::fmt;
use url::Url;

pub(crate) const WECHAT_MP_ENDPOINT: &str = "https://open.weixin.qq.com/connect/oauth2/authorize";
pub(crate) const WECHAT_MP_SCOPE: &str = "snsapi_userinfo";
pub(crate) const WECOM_SILENT_ENDPOINT: &str =
    "https://open.weixin.qq.com/connect/oauth2/authorize";
pub(crate) const WECOM_INTERNAL_ENDPOINT: &str =
    "https://open.work.weixin.qq.com/wwopen/sso/qrConnect";

/// OAuth provider types with a known authorization endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OAuthProviderKind {
    Google,
    GitHub,
    QQ,
    WeChat,
    Facebook,
    DingTalk,
    Weibo,
    Gitee,
    LinkedIn,
    WeCom,
    Lark,
    GitLab,
    Baidu,
    Infoflow,
    Apple,
    AzureAD,
    Slack,
}

/// How the authorization URL of a provider is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UrlShape {
    /// `<client key>, redirect_uri, scope, response_type=code, state` plus
    /// any fixed extras.
    Standard,
    /// Standard on desktop, the in-app endpoint with `clientId2` inside the
    /// WeChat browser; both end in `#wechat_redirect`.
    WeChat,
    /// Chosen by sub-type and method.
    WeCom,
    /// `app_id, redirect_uri, state`.
    Lark,
    /// `appid` and a `redirect_uri` carrying the state.
    Infoflow,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ProviderSpec {
    pub endpoint: &'static str,
    pub scope: Option<&'static str>,
    pub client_key: &'static str,
    pub extra: &'static [(&'static str, &'static str)],
    pub shape: UrlShape,
}

impl ProviderSpec {
    const fn standard(endpoint: &'static str, scope: &'static str) -> Self {
        Self {
            endpoint,
            scope: Some(scope),
            client_key: "client_id",
            extra: &[],
            shape: UrlShape::Standard,
        }
    }

    const fn with_client_key(mut self, client_key: &'static str) -> Self {
        self.client_key = client_key;
        self
    }

    const fn with_extra(mut self, extra: &'static [(&'static str, &'static str)]) -> Self {
        self.extra = extra;
        self
    }

    const fn with_shape(mut self, shape: UrlShape) -> Self {
        self.shape = shape;
        self
    }

    const fn without_scope(mut self) -> Self {
        self.scope = None;
        self
    }
}

impl OAuthProviderKind {
    pub const ALL: [OAuthProviderKind; 17] = [
        OAuthProviderKind::Google,
        OAuthProviderKind::GitHub,
        OAuthProviderKind::QQ,
        OAuthProviderKind::WeChat,
        OAuthProviderKind::Facebook,
        OAuthProviderKind::DingTalk,
        OAuthProviderKind::Weibo,
        OAuthProviderKind::Gitee,
        OAuthProviderKind::LinkedIn,
        OAuthProviderKind::WeCom,
        OAuthProviderKind::Lark,
        OAuthProviderKind::GitLab,
        OAuthProviderKind::Baidu,
        OAuthProviderKind::Infoflow,
        OAuthProviderKind::Apple,
        OAuthProviderKind::AzureAD,
        OAuthProviderKind::Slack,
    ];

    /// Looks up the `type` field of a provider record.
    pub fn from_type(provider_type: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == provider_type)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProviderKind::Google => "Google",
            OAuthProviderKind::GitHub => "GitHub",
            OAuthProviderKind::QQ => "QQ",
            OAuthProviderKind::WeChat => "WeChat",
            OAuthProviderKind::Facebook => "Facebook",
            OAuthProviderKind::DingTalk => "DingTalk",
            OAuthProviderKind::Weibo => "Weibo",
            OAuthProviderKind::Gitee => "Gitee",
            OAuthProviderKind::LinkedIn => "LinkedIn",
            OAuthProviderKind::WeCom => "WeCom",
            OAuthProviderKind::Lark => "Lark",
            OAuthProviderKind::GitLab => "GitLab",
            OAuthProviderKind::Baidu => "Baidu",
            OAuthProviderKind::Infoflow => "Infoflow",
            OAuthProviderKind::Apple => "Apple",
            OAuthProviderKind::AzureAD => "AzureAD",
            OAuthProviderKind::Slack => "Slack",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        self.spec().endpoint
    }

    pub fn scope(&self) -> Option<&'static str> {
        self.spec().scope
    }

    pub(crate) fn spec(&self) -> ProviderSpec {
        use OAuthProviderKind::*;

        match self {
            Google => ProviderSpec::standard("https://accounts.google.com/signin/oauth", "profile email"),
            GitHub => ProviderSpec::standard("https://github.com/login/oauth/authorize", "user:email read:user"),
            QQ => ProviderSpec::standard("https://graph.qq.com/oauth2.0/authorize", "get_user_info"),
            WeChat => ProviderSpec::standard("https://open.weixin.qq.com/connect/qrconnect", "snsapi_login")
                .with_client_key("appid")
                .with_shape(UrlShape::WeChat),
            Facebook => ProviderSpec::standard("https://www.facebook.com/dialog/oauth", "email,public_profile"),
            DingTalk => ProviderSpec::standard("https://oapi.dingtalk.com/connect/oauth2/sns_authorize", "snsapi_login")
                .with_client_key("appid"),
            Weibo => ProviderSpec::standard("https://api.weibo.com/oauth2/authorize", "email"),
            Gitee => ProviderSpec::standard("https://gitee.com/oauth/authorize", "user_info emails"),
            LinkedIn => ProviderSpec::standard("https://www.linkedin.com/oauth/v2/authorization", "r_liteprofile r_emailaddress"),
            WeCom => ProviderSpec::standard("https://open.work.weixin.qq.com/wwopen/sso/3rd_qrConnect", "snsapi_userinfo")
                .with_client_key("appid")
                .with_shape(UrlShape::WeCom),
            Lark => ProviderSpec::standard("https://open.feishu.cn/open-apis/authen/v1/index", "")
                .without_scope()
                .with_client_key("app_id")
                .with_shape(UrlShape::Lark),
            GitLab => ProviderSpec::standard("https://gitlab.com/oauth/authorize", "read_user profile"),
            Baidu => ProviderSpec::standard("http://openapi.baidu.com/oauth/2.0/authorize", "basic")
                .with_extra(&[("display", "popup")]),
            Infoflow => ProviderSpec::standard("https://xpc.im.baidu.com/oauth2/authorize", "")
                .without_scope()
                .with_client_key("appid")
                .with_shape(UrlShape::Infoflow),
            Apple => ProviderSpec::standard("https://appleid.apple.com/auth/authorize", "name email")
                .with_extra(&[("response_mode", "form_post")]),
            AzureAD => ProviderSpec::standard("https://login.microsoftonline.com/common/oauth2/authorize", "user_impersonation")
                .with_extra(&[("resource", "https://graph.windows.net/")]),
            Slack => ProviderSpec::standard("https://slack.com/oauth/authorize", "users:read"),
        }
    }
}

impl fmt::Display for OAuthProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct CatalogueEntry {
    category: &'static str,
    provider_type: &'static str,
    logo: &'static str,
    url: &'static str,
}

/// Non-OAuth providers with a known logo and homepage. Logos are relative to
/// the static base URL.
const CATALOGUE: &[CatalogueEntry] = &[
    CatalogueEntry { category: "SMS", provider_type: "Aliyun SMS", logo: "image/social/aliyun.png", url: "https://aliyun.com/product/sms" },
    CatalogueEntry { category: "SMS", provider_type: "Tencent Cloud SMS", logo: "image/social/tencent_cloud.jpg", url: "https://cloud.tencent.com/product/sms" },
    CatalogueEntry { category: "SMS", provider_type: "Volc Engine SMS", logo: "image/social/volc_engine.jpg", url: "https://www.volcengine.com/products/cloud-sms" },
    CatalogueEntry { category: "Email", provider_type: "Default", logo: "image/social/default.png", url: "" },
    CatalogueEntry { category: "Storage", provider_type: "Local File System", logo: "image/social/file.png", url: "" },
    CatalogueEntry { category: "Storage", provider_type: "AWS S3", logo: "image/social/aws.png", url: "https://aws.amazon.com/s3" },
    CatalogueEntry { category: "Storage", provider_type: "Aliyun OSS", logo: "image/social/aliyun.png", url: "https://aliyun.com/product/oss" },
    CatalogueEntry { category: "Storage", provider_type: "Tencent Cloud COS", logo: "image/social/tencent_cloud.jpg", url: "https://cloud.tencent.com/product/cos" },
    CatalogueEntry { category: "SAML", provider_type: "Aliyun IDaaS", logo: "image/social/aliyun.png", url: "https://aliyun.com/product/idaas" },
    CatalogueEntry { category: "SAML", provider_type: "Keycloak", logo: "image/social/keycloak.png", url: "https://www.keycloak.org/" },
    CatalogueEntry { category: "Payment", provider_type: "Alipay", logo: "image/payment/alipay.png", url: "https://www.alipay.com/" },
    CatalogueEntry { category: "Payment", provider_type: "WeChat Pay", logo: "image/payment/wechat_pay.png", url: "https://pay.weixin.qq.com/" },
    CatalogueEntry { category: "Payment", provider_type: "PayPal", logo: "image/payment/paypal.png", url: "https://www.paypal.com/" },
];

fn catalogue_entry(provider: &Provider) -> Option<&'static CatalogueEntry> {
    CATALOGUE.iter().find(|entry| {
        entry.category == provider.category.as_str() && entry.provider_type == provider.provider_type
    })
}

/// Homepage of the company behind a provider, e.g. `https://google.com` for
/// Google. `None` when the provider has no known homepage.
pub fn provider_homepage(provider: &Provider) -> Option<String> {
    if provider.category == ProviderCategory::OAuth {
        let kind = OAuthProviderKind::from_type(&provider.provider_type)?;
        let endpoint = Url::parse(kind.endpoint()).ok()?;
        let host = endpoint.host_str()?;

        let labels: Vec<&str> = host.split('.').collect();
        let host = if labels.len() > 2 {
            labels[1..].join(".")
        } else {
            host.to_string()
        };

        return Some(format!("{}://{}", endpoint.scheme(), host));
    }

    catalogue_entry(provider)
        .map(|entry| entry.url)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

/// Logo shown next to a provider.
pub fn provider_logo(provider: &Provider, static_base_url: &str) -> Option<String> {
    let base = static_base_url.trim_end_matches('/');

    if provider.category == ProviderCategory::OAuth {
        return Some(format!(
            "{}/image/social/{}.png",
            base,
            provider.provider_type.to_lowercase()
        ));
    }

    catalogue_entry(provider).map(|entry| format!("{}/{}", base, entry.logo))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(category: ProviderCategory, provider_type: &str) -> Provider {
        Provider {
            category,
            provider_type: provider_type.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_type_lookup() {
        for kind in OAuthProviderKind::ALL {
            assert_eq!(OAuthProviderKind::from_type(kind.as_str()), Some(kind));
            assert!(kind.endpoint().starts_with("http"));
        }
        assert_eq!(OAuthProviderKind::from_type("github"), None);
        assert_eq!(OAuthProviderKind::from_type("Okta"), None);
    }

    #[test]
    fn test_scopes() {
        assert_eq!(OAuthProviderKind::Google.scope(), Some("profile email"));
        assert_eq!(OAuthProviderKind::Lark.scope(), None);
        assert_eq!(OAuthProviderKind::Infoflow.scope(), None);
    }

    #[test]
    fn test_homepage_drops_first_label() {
        let google = provider(ProviderCategory::OAuth, "Google");
        assert_eq!(provider_homepage(&google).as_deref(), Some("https://google.com"));

        let github = provider(ProviderCategory::OAuth, "GitHub");
        assert_eq!(provider_homepage(&github).as_deref(), Some("https://github.com"));

        let baidu = provider(ProviderCategory::OAuth, "Baidu");
        assert_eq!(provider_homepage(&baidu).as_deref(), Some("http://baidu.com"));
    }

    #[test]
    fn test_homepage_from_catalogue() {
        let s3 = provider(ProviderCategory::Storage, "AWS S3");
        assert_eq!(
            provider_homepage(&s3).as_deref(),
            Some("https://aws.amazon.com/s3")
        );

        let local = provider(ProviderCategory::Storage, "Local File System");
        assert_eq!(provider_homepage(&local), None);

        let unknown = provider(ProviderCategory::Sms, "Twilio");
        assert_eq!(provider_homepage(&unknown), None);
    }

    #[test]
    fn test_logos() {
        let wechat = provider(ProviderCategory::OAuth, "WeChat");
        assert_eq!(
            provider_logo(&wechat, "/static/").as_deref(),
            Some("/static/image/social/wechat.png")
        );

        let keycloak = provider(ProviderCategory::Saml, "Keycloak");
        assert_eq!(
            provider_logo(&keycloak, "https://cdn.example.com").as_deref(),
            Some("https://cdn.example.com/image/social/keycloak.png")
        );

        let alipay = provider(ProviderCategory::Payment, "Alipay");
        assert_eq!(
            provider_logo(&alipay, "/static").as_deref(),
            Some("/static/image/payment/alipay.png")
        );
    }
}
