//! Attachment text: resumes and job descriptions are stored as plain-text
//! attachments whose download URL sits on the record.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::record_store::Fields;

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch attachment text with status {status}")]
    Status { status: u16 },
}

/// Downloads the text behind an attachment URL.
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, AttachmentError>;
}

/// Plain unauthenticated GET. Attachment URLs are pre-signed by the platform.
#[derive(Clone)]
pub struct HttpTextSource {
    client: Client,
}

impl HttpTextSource {
    pub fn new() -> Result<Self, AttachmentError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()?,
        })
    }
}

#[async_trait]
impl TextSource for HttpTextSource {
    async fn fetch_text(&self, url: &str) -> Result<String, AttachmentError> {
        debug!(url, "Fetching attachment text");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AttachmentError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

/// URL of the first attachment in `field`. Works for attachment fields and for
/// lookups of attachment fields, both of which are arrays of `{url, ...}`.
pub fn first_attachment_url<'a>(fields: &'a Fields, field: &str) -> Option<&'a str> {
    fields
        .get(field)
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .and_then(|item| item.get("url"))
        .and_then(Value::as_str)
}
