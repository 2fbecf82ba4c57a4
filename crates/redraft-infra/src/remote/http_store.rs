//! HTTP client implementation of `DurableDraftStore`.
//!
//! Talks to the `/api/v1/draft` endpoints served by `redraft serve`. The
//! owner identity travels in the `x-owner-id` header, which the upstream auth
//! layer is expected to set in deployment.
//!
//! Status mapping: 401 means `Unauthenticated`; transport failures and every
//! other non-success status mean `StorageUnavailable`.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use redraft_core::draft::store::DurableDraftStore;
use redraft_types::document::ResumeDocument;
use redraft_types::draft::{DraftRecord, DraftResponse, OwnerId, SaveDraftRequest, Step};
use redraft_types::error::DraftStoreError;

/// Header carrying the caller's owner id.
pub const OWNER_HEADER: &str = "x-owner-id";

const DRAFT_PATH: &str = "/api/v1/draft";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// The `data` member of the response envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

pub struct HttpDraftStore {
    base_url: String,
    http: reqwest::Client,
}

impl HttpDraftStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("redraft/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    fn url(&self) -> String {
        format!("{}{DRAFT_PATH}", self.base_url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, DraftStoreError> {
        let response = request.send().await.map_err(|e| {
            tracing::debug!(error = %e, "draft API unreachable");
            DraftStoreError::StorageUnavailable(e.to_string())
        })?;
        check_status(response.status())?;
        Ok(response)
    }
}

fn check_status(status: StatusCode) -> Result<(), DraftStoreError> {
    if status == StatusCode::UNAUTHORIZED {
        Err(DraftStoreError::Unauthenticated)
    } else if status.is_success() {
        Ok(())
    } else {
        Err(DraftStoreError::StorageUnavailable(format!(
            "draft API returned {status}"
        )))
    }
}

async fn read_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, DraftStoreError> {
    let envelope: Envelope<T> = response
        .json()
        .await
        .map_err(|e| DraftStoreError::StorageUnavailable(format!("invalid draft API response: {e}")))?;
    envelope.data.ok_or_else(|| {
        DraftStoreError::StorageUnavailable("draft API response had no data".into())
    })
}

impl DurableDraftStore for HttpDraftStore {
    async fn load(&self, owner: &OwnerId) -> Result<Option<DraftRecord>, DraftStoreError> {
        let response = self
            .send(self.http.get(self.url()).header(OWNER_HEADER, owner.as_str()))
            .await?;
        let body: DraftResponse = read_data(response).await?;
        Ok(body.draft)
    }

    async fn save(
        &self,
        owner: &OwnerId,
        document: ResumeDocument,
        step: Option<Step>,
    ) -> Result<DraftRecord, DraftStoreError> {
        let payload = SaveDraftRequest {
            document,
            last_completed_step: step,
        };
        let response = self
            .send(
                self.http
                    .post(self.url())
                    .header(OWNER_HEADER, owner.as_str())
                    .json(&payload),
            )
            .await?;
        let body: DraftResponse = read_data(response).await?;
        body.draft.ok_or_else(|| {
            DraftStoreError::StorageUnavailable("draft API returned no record after save".into())
        })
    }

    async fn delete(&self, owner: &OwnerId) -> Result<(), DraftStoreError> {
        self.send(self.http.delete(self.url()).header(OWNER_HEADER, owner.as_str()))
            .await?;
        Ok(())
    }
}
