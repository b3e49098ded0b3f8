//! HTTP implementation of the backend collaborators.
//!
//! Talks to the page builder REST API (see `pagecraft-server` for the
//! reference implementation of the same routes).

use async_trait::async_trait;
use pagecraft_common::{
    BackendError, BackendResult, PageDirectory, PageId, PageRecord, PageType, Section,
    SectionStore, StructuralConfig, StructuralStore,
};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnsurePageBody {
    page_type: PageType,
}

#[derive(Debug, Deserialize)]
struct PublishBody {
    version: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// REST client for the page builder backend
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> BackendResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn sections_url(&self, page_id: &PageId) -> String {
        self.url(&format!("/api/pages/{}/sections", page_id))
    }
}

fn transport(e: reqwest::Error) -> BackendError {
    if e.is_decode() {
        BackendError::Decode(e.to_string())
    } else {
        BackendError::Transport(e.to_string())
    }
}

/// Map non-2xx responses to errors, carrying the server's message if any
async fn check(response: Response) -> BackendResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    Err(match status {
        StatusCode::NOT_FOUND => BackendError::NotFound(message),
        StatusCode::SERVICE_UNAVAILABLE => BackendError::Unavailable(message),
        _ => BackendError::Status {
            status: status.as_u16(),
            message,
        },
    })
}

async fn json<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
    let response = check(response).await?;
    response.json::<T>().await.map_err(transport)
}

#[async_trait]
impl SectionStore for HttpBackend {
    async fn load_sections(&self, page_id: &PageId) -> BackendResult<Vec<Section>> {
        tracing::debug!(%page_id, "GET sections");
        let response = self
            .client
            .get(self.sections_url(page_id))
            .send()
            .await
            .map_err(transport)?;
        json(response).await
    }

    async fn save_sections(&self, page_id: &PageId, sections: &[Section]) -> BackendResult<()> {
        tracing::debug!(%page_id, count = sections.len(), "PUT sections");
        let response = self
            .client
            .put(self.sections_url(page_id))
            .json(sections)
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl PageDirectory for HttpBackend {
    async fn ensure_page_exists(
        &self,
        company_id: &str,
        page_type: PageType,
    ) -> BackendResult<PageRecord> {
        let response = self
            .client
            .post(self.url(&format!("/api/companies/{}/pages/ensure", company_id)))
            .json(&EnsurePageBody { page_type })
            .send()
            .await
            .map_err(transport)?;
        json(response).await
    }
}

#[async_trait]
impl StructuralStore for HttpBackend {
    async fn fetch_structural(&self) -> BackendResult<StructuralConfig> {
        let response = self
            .client
            .get(self.url("/api/structural"))
            .send()
            .await
            .map_err(transport)?;
        json(response).await
    }

    async fn publish_structural(&self, config: &StructuralConfig) -> BackendResult<u64> {
        let response = self
            .client
            .post(self.url("/api/structural/publish"))
            .json(config)
            .send()
            .await
            .map_err(transport)?;
        let body: PublishBody = json(response).await?;
        Ok(body.version)
    }
}
