use super::{build_query, request, request_empty, ApiError};
use crate::models::{Category, CategoryCreate, CategoryKind, CategoryUpdate};

pub async fn list(kind: Option<CategoryKind>) -> Result<Vec<Category>, ApiError> {
    let query = build_query(&[("type", kind.map(|k| k.value().to_string()))]);
    request("GET", &format!("/categories{}", query), None).await
}

pub async fn create(payload: CategoryCreate) -> Result<Category, ApiError> {
    let body = serde_json::to_string(&payload).map_err(|e| ApiError::Transport(e.to_string()))?;
    request("POST", "/categories", Some(body)).await
}

// The server updates through POST on the item path rather than PATCH.
pub async fn update(id: i64, payload: CategoryUpdate) -> Result<Category, ApiError> {
    let body = serde_json::to_string(&payload).map_err(|e| ApiError::Transport(e.to_string()))?;
    request("POST", &format!("/categories/{}", id), Some(body)).await
}

/// Soft-delete: the server flips `is_active` instead of removing the row.
pub async fn delete(id: i64) -> Result<(), ApiError> {
    request_empty("DELETE", &format!("/categories/{}", id), None).await
}
