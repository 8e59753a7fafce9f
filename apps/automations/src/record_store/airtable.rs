//! Airtable REST backend for `RecordStore`.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Fields, Record, RecordStore, StoreError, MAX_RECORDS_PER_REQUEST};

#[derive(Debug, Deserialize)]
struct ListResponse {
    records: Vec<Record>,
    /// Cursor for the next page; absent on the last page.
    #[serde(default)]
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    records: Vec<Record>,
}

#[derive(Debug, Serialize)]
struct NewRecord<'a> {
    fields: &'a Fields,
}

#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    records: Vec<NewRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct RecordUpdate<'a> {
    id: &'a str,
    fields: &'a Fields,
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    records: [RecordUpdate<'a>; 1],
}

/// Client for one Airtable base, authenticated with a personal access token.
#[derive(Clone)]
pub struct AirtableClient {
    client: Client,
    api_url: String,
    base_id: String,
    access_token: String,
}

impl AirtableClient {
    pub fn new(
        api_url: impl Into<String>,
        base_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()?,
            api_url: api_url.into(),
            base_id: base_id.into(),
            access_token: access_token.into(),
        })
    }

    /// `<api_url>/<base>/<table>[/<record>]`, each segment percent-encoded.
    fn table_url(&self, table: &str, record_id: Option<&str>) -> Result<Url, StoreError> {
        let mut url =
            Url::parse(&self.api_url).map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StoreError::InvalidUrl(self.api_url.clone()))?;
            segments.pop_if_empty().push(&self.base_id).push(table);
            if let Some(id) = record_id {
                segments.push(id);
            }
        }
        Ok(url)
    }
}

async fn error_body(response: Response) -> String {
    response.text().await.unwrap_or_default()
}

/// Error types Airtable uses for a record ID that does not exist. Other 404s,
/// such as `TABLE_NOT_FOUND`, mean the request itself is wrong.
const MISSING_RECORD_ERRORS: [&str; 2] = ["NOT_FOUND", "MODEL_ID_NOT_FOUND"];

/// Reads the error type from `{"error": {"type": ..}}` or `{"error": ".."}`.
fn error_type(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    error
        .get("type")
        .unwrap_or(error)
        .as_str()
        .map(str::to_string)
}

#[async_trait]
impl RecordStore for AirtableClient {
    async fn get_record(&self, table: &str, record_id: &str) -> Result<Option<Record>, StoreError> {
        let url = self.table_url(table, Some(record_id))?;
        debug!(table, record_id, "Fetching record");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            let body = error_body(response).await;
            if error_type(&body).is_some_and(|t| MISSING_RECORD_ERRORS.contains(&t.as_str())) {
                warn!(table, record_id, "Record not found: {body}");
                return Ok(None);
            }
            return Err(StoreError::Fetch {
                status: status.as_u16(),
                message: body,
            });
        }
        if !status.is_success() {
            return Err(StoreError::Fetch {
                status: status.as_u16(),
                message: error_body(response).await,
            });
        }

        Ok(Some(response.json::<Record>().await?))
    }

    async fn list_records(&self, table: &str, formula: &str) -> Result<Vec<Record>, StoreError> {
        let url = self.table_url(table, None)?;
        debug!(table, formula, "Listing records");

        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(url.clone())
                .bearer_auth(&self.access_token)
                .query(&[("filterByFormula", formula)]);
            if let Some(cursor) = &offset {
                request = request.query(&[("offset", cursor.as_str())]);
            }

            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(StoreError::Fetch {
                    status: status.as_u16(),
                    message: error_body(response).await,
                });
            }

            let page: ListResponse = response.json().await?;
            records.extend(page.records);
            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        debug!(table, count = records.len(), "Listed records");
        Ok(records)
    }

    async fn create_records(
        &self,
        table: &str,
        records: Vec<Fields>,
    ) -> Result<Vec<Record>, StoreError> {
        if records.len() > MAX_RECORDS_PER_REQUEST {
            return Err(StoreError::BatchTooLarge(records.len()));
        }
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.table_url(table, None)?;
        let body = CreateRequest {
            records: records.iter().map(|fields| NewRecord { fields }).collect(),
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Create {
                status: status.as_u16(),
                message: error_body(response).await,
            });
        }

        let created: CreateResponse = response.json().await?;
        debug!(table, count = created.records.len(), "Created records");
        Ok(created.records)
    }

    async fn update_record(
        &self,
        table: &str,
        record_id: &str,
        fields: Fields,
    ) -> Result<(), StoreError> {
        let url = self.table_url(table, None)?;
        let body = UpdateRequest {
            records: [RecordUpdate {
                id: record_id,
                fields: &fields,
            }],
        };

        let response = self
            .client
            .patch(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Update {
                status: status.as_u16(),
                message: error_body(response).await,
            });
        }

        debug!(table, record_id, "Updated record");
        Ok(())
    }
}
