use axum::extract::rejection::JsonRejection;
use axum::extract::Query;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Deserializer, Serialize};

use crate::cleaner::{DeletionResult, ScanResult};
use crate::cleanup::{self, TracingObserver};
use crate::server::error::{AppError, AppResult};
use crate::server::AppState;
use crate::utils::parse_timestamp;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScanQuery {
    directory: Option<String>,
    file_type: Option<String>,
    before_timestamp: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CleanupRequest {
    #[serde(default)]
    directory: String,
    #[serde(default)]
    file_type: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    before_timestamp: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub success: bool,
    pub message: String,
    pub count: usize,
    pub total_size: u64,
    pub files: Vec<String>,
}

impl From<ScanResult> for ScanResponse {
    fn from(result: ScanResult) -> Self {
        Self {
            success: result.is_success(),
            count: result.match_count(),
            total_size: result.total_size_bytes,
            files: result
                .matches
                .iter()
                .map(|m| m.path.display().to_string())
                .collect(),
            message: result.message,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResponse {
    pub success: bool,
    pub message: String,
    pub count: usize,
    pub total_size: u64,
    pub failed: usize,
}

impl From<DeletionResult> for CleanupResponse {
    fn from(result: DeletionResult) -> Self {
        Self {
            success: result.success(),
            count: result.deleted_count(),
            total_size: result.deleted_size_bytes,
            failed: result.failed_count(),
            message: result.message,
        }
    }
}

/// Accepts a number or a numeric string; anything else is the epoch.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        serde_json::Value::String(s) => parse_timestamp(&s),
        _ => 0,
    })
}

fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

async fn scan_cleanup(Query(query): Query<ScanQuery>) -> AppResult<Json<ScanResponse>> {
    let (Some(directory), Some(file_type), Some(before)) = (
        required(query.directory.as_deref()),
        required(query.file_type.as_deref()),
        required(query.before_timestamp.as_deref()),
    ) else {
        return Err(AppError::BadRequest("Missing required parameters".into()));
    };

    let (directory, file_type) = (directory.to_string(), file_type.to_string());
    let before = parse_timestamp(before);
    let result = tokio::task::spawn_blocking(move || {
        cleanup::scan(&directory, &file_type, before, &TracingObserver)
    })
    .await?;

    Ok(Json(result.into()))
}

async fn execute_cleanup(
    payload: Result<Json<CleanupRequest>, JsonRejection>,
) -> AppResult<Json<CleanupResponse>> {
    let Json(req) = payload?;
    if required(Some(&req.directory)).is_none() || required(Some(&req.file_type)).is_none() {
        return Err(AppError::BadRequest("Missing required parameters".into()));
    }

    tracing::info!(
        directory = %req.directory,
        file_type = %req.file_type,
        before = req.before_timestamp,
        "Executing cleanup"
    );
    let result = tokio::task::spawn_blocking(move || {
        cleanup::scan_then_delete(
            &req.directory,
            &req.file_type,
            req.before_timestamp,
            &TracingObserver,
        )
    })
    .await?;

    Ok(Json(result.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/scan-cleanup", get(scan_cleanup))
        .route("/cleanup", post(execute_cleanup))
}
