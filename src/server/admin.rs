//! Admin API handlers
//!
//! Every route requires an admin bearer token; the check happens inside
//! [`AdminService`](crate::services::AdminService).

use super::request::{credential, upload_name};
use super::AppState;
use crate::models::Resource;
use crate::services::{ServiceError, ServiceResult};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

/// Resource named by a path segment; unknown names are a 404
pub(super) fn resource(name: &str) -> ServiceResult<Resource> {
    name.parse()
        .map_err(|_| ServiceError::NotFound(format!("Resource '{}'", name)))
}

pub async fn create_record(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Response, ServiceError> {
    let resource = resource(&name)?;
    let id = state
        .admin
        .create(credential(&headers), resource, body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "id": id })),
    )
        .into_response())
}

pub async fn update_record(
    State(state): State<AppState>,
    Path((name, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Response, ServiceError> {
    let resource = resource(&name)?;
    state
        .admin
        .update(credential(&headers), resource, &id, body)
        .await?;

    Ok(Json(json!({ "success": true })).into_response())
}

pub async fn delete_record(
    State(state): State<AppState>,
    Path((name, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, ServiceError> {
    let resource = resource(&name)?;
    state
        .admin
        .delete(credential(&headers), resource, &id)
        .await?;

    Ok(Json(json!({ "success": true })).into_response())
}

/// Raw image upload; the original file name travels in `x-file-name`
pub async fn upload_image(
    State(state): State<AppState>,
    Path(bucket): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ServiceError> {
    let url = state
        .admin
        .upload_image(credential(&headers), &bucket, upload_name(&headers), &body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "url": url })),
    )
        .into_response())
}
