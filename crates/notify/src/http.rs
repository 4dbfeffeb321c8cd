//! Shared request tail for every notifier: encode, POST, check status.

use crate::options::NotifyOptions;
use herald_core::notify::error::NotifyError;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::{debug, warn};

/// # Summary
/// Which response codes a vendor treats as delivered.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Acceptance {
    /// Any 2xx.
    Success,
    /// Exactly one of the listed codes.
    Only(&'static [u16]),
}

impl Acceptance {
    pub(crate) fn accepts(self, status: StatusCode) -> bool {
        match self {
            Self::Success => status.is_success(),
            Self::Only(codes) => codes.contains(&status.as_u16()),
        }
    }
}

/// # Summary
/// A single outbound JSON POST.
///
/// # Invariants
/// * `bearer` is only ever sent in the `Authorization` header, never logged.
/// * `redacted_url` is what shows up in logs when the real URL embeds a secret.
pub(crate) struct Dispatch<'a> {
    provider: &'static str,
    url: &'a str,
    redacted_url: Option<&'a str>,
    bearer: Option<&'a str>,
    acceptance: Acceptance,
}

impl<'a> Dispatch<'a> {
    pub(crate) fn post(provider: &'static str, url: &'a str) -> Self {
        Self {
            provider,
            url,
            redacted_url: None,
            bearer: None,
            acceptance: Acceptance::Success,
        }
    }

    pub(crate) fn bearer(mut self, token: &'a str) -> Self {
        self.bearer = Some(token);
        self
    }

    pub(crate) fn redacted(mut self, url: &'a str) -> Self {
        self.redacted_url = Some(url);
        self
    }

    pub(crate) fn accept(mut self, acceptance: Acceptance) -> Self {
        self.acceptance = acceptance;
        self
    }

    /// # Summary
    /// Serialises `body` and sends it.
    ///
    /// # Logic
    /// 1. Encode the body to JSON bytes (`Encoding` on failure).
    /// 2. POST with `Content-Type: application/json`, optional bearer auth and timeout.
    /// 3. Map network failures to `Transport`.
    /// 4. Map statuses outside the acceptance rule to `Remote`, keeping the response text.
    pub(crate) async fn send_json<T>(self, options: &NotifyOptions, body: &T) -> Result<(), NotifyError>
    where
        T: Serialize + ?Sized,
    {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| NotifyError::Encoding(format!("failed to marshal payload: {}", e)))?;

        debug!(
            provider = self.provider,
            url = self.redacted_url.unwrap_or(self.url),
            bytes = bytes.len(),
            "dispatching notification"
        );

        let mut request = options
            .client()
            .post(self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(bytes);
        if let Some(token) = self.bearer {
            request = request.bearer_auth(token);
        }
        if let Some(timeout) = options.timeout() {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NotifyError::Transport(format!("failed to send request: {}", e)))?;

        let status = response.status();
        if !self.acceptance.accepts(status) {
            let body = response.text().await.unwrap_or_default();
            warn!(provider = self.provider, status = status.as_u16(), "notification rejected");
            return Err(NotifyError::Remote {
                provider: self.provider,
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
