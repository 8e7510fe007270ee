use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::disk_info::{self, DiskInfo};
use crate::server::error::AppResult;
use crate::server::AppState;

#[derive(Serialize)]
struct DrivesResponse {
    drives: Vec<String>,
    details: Vec<DiskInfo>,
}

async fn list_drives() -> AppResult<Json<DrivesResponse>> {
    let details = tokio::task::spawn_blocking(disk_info::list_drives).await?;
    Ok(Json(DrivesResponse {
        drives: disk_info::drive_roots(&details),
        details,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/drives", get(list_drives))
}
