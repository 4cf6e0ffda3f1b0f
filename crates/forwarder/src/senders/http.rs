//! HttpSender - single POST per payload

use std::time::Duration;

use contracts::DEFAULT_HTTP_TIMEOUT_SECS;
use tracing::debug;

use crate::error::ForwardError;

/// Sender that POSTs the whole payload as an opaque byte body.
///
/// A non-2xx response or a timeout fails that call only; the next payload
/// gets a fresh attempt.
pub struct HttpSender {
    destination: String,
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl HttpSender {
    /// Create a sender with a bounded request timeout.
    pub fn new(
        destination: &str,
        url: String,
        token: Option<String>,
    ) -> Result<Self, ForwardError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| ForwardError::build(destination, e.to_string()))?;

        Ok(Self {
            destination: destination.to_string(),
            client,
            url,
            token,
        })
    }

    /// POST the payload with content-type `application/octet-stream`.
    pub async fn send(&self, payload: &[u8]) -> Result<(), ForwardError> {
        let mut request = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(payload.to_vec());

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ForwardError::delivery(&self.destination, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForwardError::delivery(
                &self.destination,
                format!("unexpected status {status} from {}", self.url),
            ));
        }

        debug!(destination = %self.destination, status = %status, "posted");
        Ok(())
    }
}
