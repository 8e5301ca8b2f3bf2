//! Thin HTTP layer over the tracker API: one module per REST resource,
//! all going through the `request` helpers below. No retries, no
//! caching, no pagination.

use thiserror::Error;
use urlencoding::encode;
use wasm_bindgen::JsCast;

pub mod accounts;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod transactions;

const API_BASE: &str = "http://localhost:8000";

/// The only failure taxonomy the API surface has: either the request
/// never produced a response, or the response was non-2xx and we keep
/// its status and raw body text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
}

pub(crate) fn build_query(params: &[(&str, Option<String>)]) -> String {
    let query_parts: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| format!("{}={}", encode(key), encode(v))))
        .collect();

    if query_parts.is_empty() {
        String::new()
    } else {
        format!("?{}", query_parts.join("&"))
    }
}

async fn send(method: &str, path: &str, body: Option<String>) -> Result<web_sys::Response, ApiError> {
    use web_sys::{RequestInit, RequestMode};

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);

    let headers = web_sys::Headers::new()
        .map_err(|_| ApiError::Transport("failed to create headers".to_string()))?;
    if let Some(token) = crate::auth::token() {
        headers
            .set("Authorization", &format!("Bearer {}", token))
            .map_err(|_| ApiError::Transport("failed to set auth header".to_string()))?;
    }
    if let Some(b) = body {
        headers
            .set("Content-Type", "application/json")
            .map_err(|_| ApiError::Transport("failed to set header".to_string()))?;
        opts.set_body(&wasm_bindgen::JsValue::from_str(&b));
    }
    opts.set_headers(&headers);

    let url = format!("{}{}", API_BASE, path);
    let window = web_sys::window().ok_or(ApiError::Transport("no window".to_string()))?;
    let request = web_sys::Request::new_with_str_and_init(&url, &opts)
        .map_err(|_| ApiError::Transport("failed to create request".to_string()))?;

    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| ApiError::Transport(format!("{} {} did not reach the server", method, path)))?;

    let resp: web_sys::Response = resp_value
        .dyn_into()
        .map_err(|_| ApiError::Transport("invalid response".to_string()))?;

    if !resp.ok() {
        let status = resp.status();
        let body = match resp.text() {
            Ok(promise) => wasm_bindgen_futures::JsFuture::from(promise)
                .await
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default(),
            Err(_) => String::new(),
        };
        return Err(ApiError::Http { status, body });
    }

    Ok(resp)
}

/// Issue a request and decode the JSON response body.
pub(crate) async fn request<T: serde::de::DeserializeOwned>(
    method: &str,
    path: &str,
    body: Option<String>,
) -> Result<T, ApiError> {
    let resp = send(method, path, body).await?;

    let json = wasm_bindgen_futures::JsFuture::from(
        resp.json()
            .map_err(|_| ApiError::Transport("failed to get json".to_string()))?,
    )
    .await
    .map_err(|_| ApiError::Transport("failed to parse json".to_string()))?;

    serde_wasm_bindgen::from_value(json).map_err(|e| ApiError::Transport(e.to_string()))
}

/// Issue a request and discard whatever the server answered with.
pub(crate) async fn request_empty(
    method: &str,
    path: &str,
    body: Option<String>,
) -> Result<(), ApiError> {
    send(method, path, body).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_query_skips_unset_params() {
        let query = build_query(&[
            ("period", Some("month".to_string())),
            ("base_date", None),
            ("currency", Some("RUB".to_string())),
        ]);
        assert_eq!(query, "?period=month&currency=RUB");
    }

    #[test]
    fn build_query_is_empty_without_params() {
        assert_eq!(build_query(&[]), "");
        assert_eq!(build_query(&[("type", None)]), "");
    }

    #[test]
    fn build_query_percent_encodes_values() {
        let query = build_query(&[("base_date", Some("2024-03-01 12:00".to_string()))]);
        assert_eq!(query, "?base_date=2024-03-01%2012%3A00");
    }

    #[test]
    fn http_error_carries_status_and_body() {
        let err = ApiError::Http {
            status: 422,
            body: "validation failed".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 422: validation failed");
    }
}
