//! `GET /api/jobs`: one upstream fetch, extracted and returned as JSON.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::extract::{ExtractOptions, extract_jobs};
use common::{JobRecord, Site};
use scraper::Html;
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

use crate::AppState;

const DEFAULT_PAGE_SIZE: u32 = 100;

/// Query parameters for the jobs endpoint. Anything that does not parse
/// falls back to the default; a repeated key keeps its first value.
#[derive(Debug, Default)]
pub struct JobsParams {
    pagesize: Option<String>,
    max: Option<String>,
}

impl From<Vec<(String, String)>> for JobsParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "pagesize" => &mut params.pagesize,
                "max" => &mut params.max,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

impl JobsParams {
    fn page_size(&self) -> u32 {
        self.pagesize
            .as_deref()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// 0 means unlimited.
    fn max(&self) -> usize {
        self.max
            .as_deref()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|max| *max > 0)
            .map_or(0, |max| max as usize)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to fetch upstream job listings")]
    Upstream(#[source] reqwest::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let details = match &self {
            ApiError::Upstream(e) => e.to_string(),
        };
        let body = json!({ "error": self.to_string(), "details": details });
        (StatusCode::BAD_GATEWAY, Json(body)).into_response()
    }
}

/// Handler for GET /api/jobs?pagesize=<int>&max=<int>
pub async fn jobs_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<JobRecord>>, ApiError> {
    let params = JobsParams::from(pairs);
    let url = state.site.listing_url(params.page_size(), None);

    let body = fetch_listing(&state.client, url.as_str())
        .await
        .map_err(|e| {
            warn!("upstream fetch failed for {}: {}", url, e);
            ApiError::Upstream(e)
        })?;

    let jobs = collect_jobs(&body, &state.site, params.max());
    info!("served {} jobs (pagesize={})", jobs.len(), params.page_size());

    Ok(Json(jobs))
}

async fn fetch_listing(client: &reqwest::Client, url: &str) -> Result<String, reqwest::Error> {
    client.get(url).send().await?.error_for_status()?.text().await
}

// `Html` is not `Send`, so parsing stays out of the async handler body.
fn collect_jobs(body: &str, site: &Site, max: usize) -> Vec<JobRecord> {
    let document = Html::parse_document(body);
    extract_jobs(&document, site, &ExtractOptions::LIVE.with_max(max))
}
