//! Transport helpers shared by the HTTP providers.

use std::time::Duration;

use ct_core::ports::{CancellationToken, ProviderError};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub(crate) const CLOUD_TIMEOUT: Duration = Duration::from_secs(30);
pub(crate) const LOCAL_TIMEOUT: Duration = Duration::from_secs(60);

pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Provider(format!("failed to build HTTP client: {e}")))
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Send `request` and return the body of a 2xx response.
///
/// The client timeout bounds the call; `cancel` aborts it early.
pub(crate) async fn execute(
    cancel: &CancellationToken,
    request: RequestBuilder,
) -> Result<String, ProviderError> {
    let call = async {
        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(status_error(status, &body))
        }
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ProviderError::Cancelled),
        result = call => result,
    }
}

/// Undecodable envelopes count as "no result".
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|_| ProviderError::NoResult)
}

pub(crate) fn non_empty(text: &str) -> Result<String, ProviderError> {
    let text = text.trim();
    if text.is_empty() {
        Err(ProviderError::NoResult)
    } else {
        Ok(text.to_string())
    }
}

/// `{"error": {"message": ...}}` (cloud APIs) or `{"error": "..."}` (Ollama).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ApiError {
    Object { message: String },
    Text(String),
}

impl ApiError {
    pub(crate) fn into_message(self) -> String {
        match self {
            ApiError::Object { message } | ApiError::Text(message) => message,
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

fn status_error(status: StatusCode, body: &str) -> ProviderError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.into_message())
        .unwrap_or_else(|_| {
            let body = body.trim();
            if body.is_empty() {
                format!("HTTP {status}")
            } else {
                format!("HTTP {status}: {body}")
            }
        });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Auth(message),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited(message),
        _ => ProviderError::Provider(message),
    }
}
