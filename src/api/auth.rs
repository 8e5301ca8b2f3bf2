use super::{request, request_empty, ApiError};
use crate::models::{AuthTokenResponse, LoginPayload, RegisterPayload};

pub async fn login(payload: LoginPayload) -> Result<AuthTokenResponse, ApiError> {
    let body = serde_json::to_string(&payload).map_err(|e| ApiError::Transport(e.to_string()))?;
    request("POST", "/auth/login", Some(body)).await
}

pub async fn register(payload: RegisterPayload) -> Result<(), ApiError> {
    let body = serde_json::to_string(&payload).map_err(|e| ApiError::Transport(e.to_string()))?;
    request_empty("POST", "/auth/register", Some(body)).await
}
