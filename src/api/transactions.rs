use super::{request, request_empty, ApiError};
use crate::models::{Transaction, TransactionCreate, TransactionUpdate};

pub async fn list() -> Result<Vec<Transaction>, ApiError> {
    request("GET", "/transactions", None).await
}

pub async fn create(payload: TransactionCreate) -> Result<Transaction, ApiError> {
    let body = serde_json::to_string(&payload).map_err(|e| ApiError::Transport(e.to_string()))?;
    request("POST", "/transactions", Some(body)).await
}

pub async fn update(id: i64, payload: TransactionUpdate) -> Result<Transaction, ApiError> {
    let body = serde_json::to_string(&payload).map_err(|e| ApiError::Transport(e.to_string()))?;
    request("PATCH", &format!("/transactions/{}", id), Some(body)).await
}

pub async fn delete(id: i64) -> Result<(), ApiError> {
    request_empty("DELETE", &format!("/transactions/{}", id), None).await
}
