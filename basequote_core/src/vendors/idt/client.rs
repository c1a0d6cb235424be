//! Wire client for the IDT ordering API: OAuth2 resource-owner password
//! grant against the identity server, then bearer-authenticated quote
//! calls.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::IdtSettings;
use crate::error::VendorError;
use crate::offers::{SequenceKey, SequenceRecord};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[allow(dead_code)]
    #[serde(default)]
    token_type: Option<String>,
    #[allow(dead_code)]
    #[serde(default)]
    expires_in: Option<i64>,
}

/// One batch line as the quote endpoint expects it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItem {
    pub key: SequenceKey,
    pub name: String,
    pub sequence: String,
}

impl QuoteItem {
    pub fn from_record(seq: &SequenceRecord) -> Self {
        Self {
            key: seq.key.clone(),
            name: seq.name.clone(),
            sequence: seq.sequence.clone(),
        }
    }
}

/// One quoted line item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub key: SequenceKey,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub turnaround_days: Option<i64>,
    #[serde(default)]
    pub messages: Vec<QuoteMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteMessage {
    #[serde(default)]
    pub level: String,
    pub text: String,
}

pub struct IdtClient {
    http: Client,
    token_url: String,
    api_base: Url,
    client_id: String,
    client_secret: String,
    username: String,
    password: String,
    scope: String,
}

impl IdtClient {
    pub fn new(settings: &IdtSettings) -> Result<Self, VendorError> {
        let http = Client::builder()
            .user_agent(concat!("basequote/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(settings.timeout))
            .build()?;
        let mut api = settings.api_url.clone();
        if !api.ends_with('/') {
            api.push('/');
        }
        Ok(Self {
            http,
            token_url: settings.token_url.clone(),
            api_base: Url::parse(&api)?,
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            username: settings.username.clone(),
            password: settings.password.clone(),
            scope: settings.scope.clone(),
        })
    }

    /// Exchange the configured credentials for an access token.
    pub async fn fetch_token(&self) -> Result<String, VendorError> {
        let body = [
            ("grant_type", "password".to_string()),
            ("username", self.username.clone()),
            ("password", self.password.clone()),
            ("scope", self.scope.clone()),
        ];
        let resp = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&body)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(VendorError::Authentication(format!(
                "token exchange failed with {}: {}",
                status, text
            )));
        }
        let tokens: TokenResponse = resp.json().await?;
        if tokens.access_token.is_empty() {
            return Err(VendorError::Authentication(
                "token exchange returned an empty access token".to_string(),
            ));
        }
        Ok(tokens.access_token)
    }

    /// Quote a batch of sequences.
    pub async fn quote(
        &self,
        token: &str,
        items: &[QuoteItem],
    ) -> Result<Vec<QuoteLine>, VendorError> {
        let url = self.api_base.join("pricing/quote")?;
        let resp = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "items": items }))
            .send()
            .await?;
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(VendorError::Authentication(
                "quote call rejected the access token".to_string(),
            ));
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(VendorError::Upstream(format!(
                "quote endpoint returned {}: {}",
                status, text
            )));
        }
        let value: serde_json::Value = resp.json().await?;
        let lines = value
            .get("items")
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        Ok(serde_json::from_value(lines)?)
    }
}
