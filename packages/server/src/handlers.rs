use crate::error::ServerError;
use crate::state::BackendState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use pagecraft_common::{PageRecord, PageType, Section, StructuralConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsurePageRequest {
    pub page_type: PageType,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PublishResponse {
    pub version: u64,
}

fn parse_page_id(raw: &str) -> Result<u64, ServerError> {
    raw.parse()
        .map_err(|_| ServerError::PageNotFound(raw.to_string()))
}

pub async fn get_sections(
    State(state): State<BackendState>,
    Path(page_id): Path<String>,
) -> Result<Json<Vec<Section>>, ServerError> {
    let id = parse_page_id(&page_id)?;
    let sections = state.sections(id).await?;
    Ok(Json(sections))
}

pub async fn put_sections(
    State(state): State<BackendState>,
    Path(page_id): Path<String>,
    Json(sections): Json<Vec<Section>>,
) -> Result<StatusCode, ServerError> {
    let id = parse_page_id(&page_id)?;
    let count = sections.len();
    let version = state.replace_sections(id, sections).await?;
    tracing::info!(page_id = id, count, version, "Replaced page sections");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn ensure_page(
    State(state): State<BackendState>,
    Path(company_id): Path<String>,
    Json(request): Json<EnsurePageRequest>,
) -> Json<PageRecord> {
    let (id, created) = state.ensure_page(&company_id, request.page_type).await;
    if created {
        tracing::info!(%company_id, page_type = %request.page_type, id, "Created page");
    }
    Json(PageRecord { id })
}

pub async fn get_structural(State(state): State<BackendState>) -> Json<StructuralConfig> {
    Json(state.structural().await)
}

pub async fn publish_structural(
    State(state): State<BackendState>,
    Json(config): Json<StructuralConfig>,
) -> Json<PublishResponse> {
    let version = state.publish_structural(config).await;
    tracing::info!(version, "Published structural components");
    Json(PublishResponse { version })
}

pub async fn health() -> &'static str {
    "ok"
}
