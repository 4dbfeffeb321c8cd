use herald_core::notify::error::NotifyError;
use std::sync::Once;
use std::time::Duration;
use tracing::debug;

static CRYPTO_PROVIDER: Once = Once::new();

/// # Summary
/// Installs the `ring` rustls crypto provider once per process.
///
/// # Invariants
/// * A provider installed earlier by the host application is kept.
fn ensure_crypto_provider() {
    CRYPTO_PROVIDER.call_once(|| {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            debug!("rustls crypto provider already installed, keeping it");
        }
    });
}

/// # Summary
/// Immutable HTTP settings shared by every notifier.
///
/// # Invariants
/// * Never modified after `NotifyOptionsBuilder::build`.
/// * `client` is cheap to clone and safe for concurrent reuse.
#[derive(Debug, Clone)]
pub struct NotifyOptions {
    client: reqwest::Client,
    timeout: Option<Duration>,
    api_base: Option<String>,
}

impl NotifyOptions {
    /// # Summary
    /// Starts building a set of options.
    pub fn builder() -> NotifyOptionsBuilder {
        NotifyOptionsBuilder::default()
    }

    /// # Summary
    /// Options with a fresh default client and no overrides.
    ///
    /// # Returns
    /// * `Err(NotifyError::Transport)` if the TLS backend cannot be initialised.
    pub fn standard() -> Result<Self, NotifyError> {
        Self::builder().build()
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// # Summary
    /// Overridden API base, if any.
    ///
    /// # Invariants
    /// * Only consulted by providers with a fixed vendor endpoint (LINE, Telegram).
    pub fn api_base(&self) -> Option<&str> {
        self.api_base.as_deref()
    }
}

/// # Summary
/// Builder for `NotifyOptions`.
#[derive(Debug, Default)]
pub struct NotifyOptionsBuilder {
    client: Option<reqwest::Client>,
    timeout: Option<Duration>,
    api_base: Option<String>,
}

impl NotifyOptionsBuilder {
    /// Use a caller-supplied client instead of building one.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Per-request timeout, applied on top of whatever the client enforces.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replace the fixed vendor endpoint (e.g. a self-hosted Telegram Bot API server).
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// # Summary
    /// Freezes the configuration.
    ///
    /// # Logic
    /// 1. Reuses the supplied client, or builds a default one.
    /// 2. Strips a trailing `/` from `api_base`.
    ///
    /// # Returns
    /// * `Err(NotifyError::Transport)` if the default client cannot be built.
    pub fn build(self) -> Result<NotifyOptions, NotifyError> {
        let client = match self.client {
            Some(client) => client,
            None => {
                ensure_crypto_provider();
                reqwest::Client::builder()
                    .build()
                    .map_err(|e| NotifyError::Transport(format!("failed to build HTTP client: {}", e)))?
            }
        };

        Ok(NotifyOptions {
            client,
            timeout: self.timeout,
            api_base: self
                .api_base
                .map(|base| base.trim_end_matches('/').to_string()),
        })
    }
}
