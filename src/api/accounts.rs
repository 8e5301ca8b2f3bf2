use super::{request, request_empty, ApiError};
use crate::models::{Account, AccountBalance, AccountCreate, AccountUpdate};

pub async fn list() -> Result<Vec<Account>, ApiError> {
    request("GET", "/accounts", None).await
}

pub async fn create(payload: AccountCreate) -> Result<Account, ApiError> {
    let body = serde_json::to_string(&payload).map_err(|e| ApiError::Transport(e.to_string()))?;
    request("POST", "/accounts", Some(body)).await
}

pub async fn update(id: i64, payload: AccountUpdate) -> Result<Account, ApiError> {
    let body = serde_json::to_string(&payload).map_err(|e| ApiError::Transport(e.to_string()))?;
    request("PATCH", &format!("/accounts/{}", id), Some(body)).await
}

pub async fn delete(id: i64) -> Result<(), ApiError> {
    request_empty("DELETE", &format!("/accounts/{}", id), None).await
}

pub async fn balance(id: i64) -> Result<AccountBalance, ApiError> {
    request("GET", &format!("/accounts/{}/balance", id), None).await
}
