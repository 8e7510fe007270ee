use std::path::PathBuf;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::browse::{self, DirectoryEntry, FileEntry};
use crate::cleanup::normalize::normalize_path;
use crate::server::error::{AppError, AppResult};
use crate::server::routes::directory_or;
use crate::server::AppState;

#[derive(Deserialize)]
struct DirectoriesQuery {
    path: Option<String>,
}

#[derive(Deserialize)]
struct FilesQuery {
    directory: Option<String>,
}

#[derive(Serialize)]
struct DirectoriesResponse {
    directories: Vec<DirectoryEntry>,
}

#[derive(Serialize)]
struct FilesResponse {
    files: Vec<FileEntry>,
}

#[derive(Deserialize)]
struct DeleteFileRequest {
    #[serde(default)]
    filepath: String,
}

#[derive(Deserialize)]
struct CreateFileRequest {
    #[serde(default)]
    directory: String,
    #[serde(default)]
    filename: String,
}

#[derive(Serialize)]
struct OperationResponse {
    success: bool,
    message: &'static str,
}

async fn list_directories(
    State(state): State<AppState>,
    Query(query): Query<DirectoriesQuery>,
) -> AppResult<Json<DirectoriesResponse>> {
    let dir = directory_or(query.path.as_deref(), &state.default_directory);
    let directories = tokio::task::spawn_blocking(move || browse::list_directories(&dir)).await??;
    Ok(Json(DirectoriesResponse { directories }))
}

async fn list_files(
    State(state): State<AppState>,
    Query(query): Query<FilesQuery>,
) -> AppResult<Json<FilesResponse>> {
    let dir = directory_or(query.directory.as_deref(), &state.default_directory);
    tracing::debug!(directory = %dir.display(), "Listing files");
    let files = tokio::task::spawn_blocking(move || browse::list_files(&dir)).await??;
    Ok(Json(FilesResponse { files }))
}

async fn delete_file(
    payload: Result<Json<DeleteFileRequest>, JsonRejection>,
) -> AppResult<Json<OperationResponse>> {
    let Json(req) = payload?;
    if req.filepath.trim().is_empty() {
        return Err(AppError::BadRequest("Missing required parameters".into()));
    }
    let path = PathBuf::from(req.filepath.trim());
    tracing::info!(path = %path.display(), "Deleting file");
    tokio::task::spawn_blocking(move || browse::delete_file(&path)).await??;
    Ok(Json(OperationResponse {
        success: true,
        message: "File deleted successfully",
    }))
}

async fn create_file(
    payload: Result<Json<CreateFileRequest>, JsonRejection>,
) -> AppResult<Json<OperationResponse>> {
    let Json(req) = payload?;
    if req.directory.trim().is_empty() || req.filename.is_empty() {
        return Err(AppError::BadRequest("Missing required parameters".into()));
    }
    let dir = normalize_path(&req.directory);
    let path =
        tokio::task::spawn_blocking(move || browse::create_file(&dir, &req.filename)).await??;
    tracing::info!(path = %path.display(), "Created file");
    Ok(Json(OperationResponse {
        success: true,
        message: "File created successfully",
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/directories", get(list_directories))
        .route("/files", get(list_files))
        .route("/file", post(create_file).delete(delete_file))
}
