use super::{BackendError, BackendResponse, Command, MediaBackend, StatusPayload};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Networked control-plane client. Stateless; one reused [`Client`] for
/// connection pooling.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .user_agent(concat!("remo/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn request(&self, endpoint: &str) -> Result<BackendResponse, BackendError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "control-plane request");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(BackendError::Status(response.status()));
        }

        // Command endpoints return a short text acknowledgment, not JSON
        let text = response.text().await?;
        Ok(BackendResponse::ok_with_message(text))
    }
}

#[async_trait]
impl MediaBackend for HttpBackend {
    async fn send_command(&self, command: &Command) -> Result<BackendResponse, BackendError> {
        let endpoint = command
            .endpoint()
            .ok_or(BackendError::Unsupported(command.label()))?;
        self.request(&endpoint).await
    }

    async fn status(&self) -> Result<BackendResponse, BackendError> {
        let url = format!("{}/api/status", self.base_url);
        debug!(%url, "status poll");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(BackendError::Status(response.status()));
        }

        // An unparseable body surfaces as Transport via the ? below and is
        // treated upstream exactly like a dead network
        let payload: StatusPayload = response.json().await?;
        Ok(BackendResponse {
            success: true,
            message: None,
            state: Some(payload.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let backend = HttpBackend::new("http://localhost:8080/");
        assert_eq!(backend.base_url, "http://localhost:8080");
    }
}
