//! Request helper shared by the HTTP sources.

use crate::error::{Result, SourceError};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Send `request` once and decode a JSON body.
///
/// Non-success statuses become `SourceError::Status` carrying the body text.
pub(crate) async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();
    debug!("{} {}", status, response.url());

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| SourceError::MalformedPayload(e.to_string()))
}
