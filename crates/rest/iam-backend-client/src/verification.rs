//! Verification codes, the human check in front of them, and the resend
//! countdown.

use crate::client::BackendClient;
use crate::error::{ClientError, ClientResult};
use regex::Regex;
use reqwest::multipart::Form;
use serde::Deserialize;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Where a verification code is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Email,
    Phone,
}

impl Destination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Destination::Email => "email",
            Destination::Phone => "phone",
        }
    }

    /// Classifies `dest` as an email address or a phone number.
    pub fn classify(dest: &str) -> Option<Self> {
        if matches_pattern(&EMAIL_REGEX, dest) {
            Some(Destination::Email)
        } else if matches_pattern(&PHONE_REGEX, dest) {
            Some(Destination::Phone)
        } else {
            None
        }
    }
}

// Dot-separated labels with an alphabetic top-level domain.
static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").ok()
});

static PHONE_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{5,15}$").ok());

fn matches_pattern(regex: &LazyLock<Option<Regex>>, value: &str) -> bool {
    regex.as_ref().is_some_and(|re| re.is_match(value))
}

/// Answer of `GET /api/get-human-check`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanCheck {
    /// `none` or `captcha`.
    #[serde(rename = "type")]
    pub check_type: String,
    #[serde(default)]
    pub captcha_id: String,
    /// Base64 PNG.
    #[serde(default)]
    pub captcha_image: Option<String>,
}

impl HumanCheck {
    pub fn is_required(&self) -> bool {
        self.check_type != "none"
    }
}

/// Form of `POST /api/send-verification-code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub dest: String,
    pub destination: Destination,
    /// `<owner>/<name>` of the organization the code is sent for.
    pub organization_id: String,
    pub check_type: String,
    pub check_id: String,
    pub check_key: String,
    /// Require the destination to belong to the signed-in user.
    pub check_user: bool,
}

impl VerificationRequest {
    /// A request for `dest`, classified as email or phone, with no human
    /// check answered yet.
    pub fn new(dest: impl Into<String>, organization_id: impl Into<String>) -> ClientResult<Self> {
        let dest = dest.into();
        let destination =
            Destination::classify(&dest).ok_or_else(|| ClientError::InvalidDestination(dest.clone()))?;

        Ok(Self {
            dest,
            destination,
            organization_id: organization_id.into(),
            check_type: "none".to_string(),
            check_id: String::new(),
            check_key: String::new(),
            check_user: false,
        })
    }

    /// Attaches the captcha answer.
    pub fn with_captcha(mut self, captcha_id: impl Into<String>, answer: impl Into<String>) -> Self {
        self.check_type = "captcha".to_string();
        self.check_id = captcha_id.into();
        self.check_key = answer.into();
        self
    }

    fn into_form(self) -> Form {
        Form::new()
            .text("checkType", self.check_type)
            .text("checkId", self.check_id)
            .text("checkKey", self.check_key)
            .text("dest", self.dest)
            .text("type", self.destination.as_str())
            .text("organizationId", self.organization_id)
            .text("checkUser", self.check_user.to_string())
    }
}

impl BackendClient {
    pub async fn get_human_check(&self) -> ClientResult<HumanCheck> {
        let url = self.endpoint("get-human-check")?;
        self.get_json(url).await
    }

    pub async fn send_verification_code(&self, request: VerificationRequest) -> ClientResult<()> {
        let url = self.endpoint("send-verification-code")?;
        let dest = request.dest.clone();
        let destination = request.destination;

        self.post_multipart(url, request.into_form())
            .await?
            .into_result()?;

        info!("Sent verification code to {} {}", destination.as_str(), dest);
        Ok(())
    }

    pub async fn set_password(
        &self,
        user_owner: &str,
        user_name: &str,
        old_password: &str,
        new_password: &str,
    ) -> ClientResult<()> {
        let url = self.endpoint("set-password")?;
        let form = Form::new()
            .text("userOwner", user_owner.to_string())
            .text("userName", user_name.to_string())
            .text("oldPassword", old_password.to_string())
            .text("newPassword", new_password.to_string());

        self.post_multipart(url, form).await?.into_result()?;
        info!("Changed password of {}/{}", user_owner, user_name);
        Ok(())
    }

    /// Replaces the signed-in user's email address or phone number with
    /// `dest`, proving ownership with the code sent to it.
    pub async fn reset_email_or_phone(
        &self,
        dest: &str,
        destination: Destination,
        code: &str,
    ) -> ClientResult<()> {
        let url = self.endpoint("reset-email-or-phone")?;
        let form = Form::new()
            .text("dest", dest.to_string())
            .text("type", destination.as_str())
            .text("code", code.to_string());

        self.post_multipart(url, form).await?.into_result()?;
        info!("Reset {} to {}", destination.as_str(), dest);
        Ok(())
    }
}

/// Seconds left before another code may be sent. Counts down once per second
/// on a background task; dropping the countdown stops it.
#[derive(Debug)]
pub struct ResendCountdown {
    remaining: watch::Receiver<u32>,
    task: JoinHandle<()>,
}

impl ResendCountdown {
    pub const DEFAULT_SECONDS: u32 = 60;

    /// Starts counting down from `seconds`. Must be called within a tokio
    /// runtime.
    pub fn start(seconds: u32) -> Self {
        let (sender, remaining) = watch::channel(seconds);

        let task = tokio::spawn(async move {
            let mut left = seconds;
            while left > 0 {
                tokio::time::sleep(Duration::from_secs(1)).await;
                left -= 1;
                if sender.send(left).is_err() {
                    return;
                }
            }
            debug!("Verification code resend unlocked");
        });

        Self { remaining, task }
    }

    pub fn remaining(&self) -> u32 {
        *self.remaining.borrow()
    }

    pub fn can_resend(&self) -> bool {
        self.remaining() == 0
    }

    /// Receiver that observes every tick.
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.remaining.clone()
    }

    /// Waits until resend is allowed.
    pub async fn finished(&self) {
        let mut remaining = self.remaining.clone();
        // The sender only goes away after the last tick, so an error here also
        // means the countdown is over.
        let _ = remaining.wait_for(|left| *left == 0).await;
    }
}

impl Drop for ResendCountdown {
    fn drop(&mut self) {
        self.task.abort();
    }
}
