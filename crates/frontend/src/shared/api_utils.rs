//! API utilities for frontend-backend communication
//!
//! Every call goes through [`get_json`] / [`put_json`] so that URL
//! building, the bearer header and error mapping live in one place.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::shared::config::current_config;
use crate::system::auth::storage;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Failed to send request: {0}")]
    Network(String),

    #[error("Server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to serialize request: {0}")]
    Encode(String),
}

/// Get the base URL for API requests
pub fn api_base() -> String {
    current_config().api_base()
}

/// Build a full API URL from a path such as `/booking`
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Encodes one path segment (ids come from the server and are not trusted)
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    if status == 401 {
        return Err(ApiError::NotAuthenticated);
    }
    let message = response
        .text()
        .await
        .ok()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| response.status_text());
    Err(ApiError::Status { status, message })
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let url = api_url(path);
    log::debug!("GET {}", url);

    let response = with_auth(Request::get(&url))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// PUT with a JSON body. The response body is ignored: endpoints answer with
/// either the updated document or a bare acknowledgement.
pub async fn put_json<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    let url = api_url(path);
    log::debug!("PUT {}", url);

    let response = with_auth(Request::put(&url))
        .json(body)
        .map_err(|e| ApiError::Encode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    check(response).await.map(|_| ())
}
