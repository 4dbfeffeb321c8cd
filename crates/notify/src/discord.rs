use crate::http::{Acceptance, Dispatch};
use crate::options::NotifyOptions;
use async_trait::async_trait;
use herald_core::notify::entity::{Message, Payload};
use herald_core::notify::error::NotifyError;
use herald_core::notify::port::Notifier;
use herald_core::notify::rich::discord::{Embed, EmbedImage, WebhookPayload};

const PROVIDER: &str = "discord";

/// # Summary
/// A notifier that posts to a Discord channel webhook.
///
/// # Invariants
/// * `webhook_url` must be non-empty for `send` to reach the network.
#[derive(Debug, Clone)]
pub struct DiscordNotifier {
    /// The full webhook URL (it embeds the webhook token).
    webhook_url: String,
    options: NotifyOptions,
}

impl DiscordNotifier {
    /// # Summary
    /// Creates a new `DiscordNotifier` with default HTTP options.
    ///
    /// # Arguments
    /// * `webhook_url` - The channel webhook URL.
    ///
    /// # Returns
    /// * A new instance, or `NotifyError::Transport` if no HTTP client could be built.
    pub fn new(webhook_url: impl Into<String>) -> Result<Self, NotifyError> {
        Ok(Self::with_options(webhook_url, NotifyOptions::standard()?))
    }

    pub fn with_options(webhook_url: impl Into<String>, options: NotifyOptions) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            options,
        }
    }

    /// # Summary
    /// Maps a payload onto the Discord webhook body.
    ///
    /// # Logic
    /// 1. Text becomes `content`.
    /// 2. A `Message` becomes a single embed.
    /// 3. Webhook payloads pass through, embeds are wrapped in `embeds`.
    pub(crate) fn build_payload(&self, payload: &Payload) -> Result<WebhookPayload, NotifyError> {
        match payload {
            Payload::Text(text) => Ok(WebhookPayload {
                content: Some(text.clone()),
                ..WebhookPayload::default()
            }),
            Payload::Message(message) => Ok(WebhookPayload {
                embeds: vec![message_embed(message)],
                ..WebhookPayload::default()
            }),
            Payload::DiscordWebhook(webhook) => Ok(webhook.clone()),
            Payload::DiscordEmbed(embed) => Ok(WebhookPayload {
                embeds: vec![embed.clone()],
                ..WebhookPayload::default()
            }),
            other => Err(NotifyError::UnsupportedPayload {
                provider: PROVIDER,
                kind: other.kind(),
            }),
        }
    }
}

fn message_embed(message: &Message) -> Embed {
    Embed {
        title: message.title().map(str::to_string),
        description: message.content().map(str::to_string),
        image: message.image_url().map(EmbedImage::new),
        // unparseable colors are dropped, not reported; black means unset
        color: message
            .color()
            .and_then(parse_color)
            .filter(|color| *color != 0),
        ..Embed::default()
    }
}

/// # Summary
/// Parses `"#RRGGBB"` (or bare hex) into Discord's integer color.
///
/// # Returns
/// * `None` when the string is not valid hex or overflows 32 bits.
pub fn parse_color(color: &str) -> Option<u32> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    u32::from_str_radix(hex, 16).ok()
}

#[async_trait]
impl Notifier for DiscordNotifier {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn validate(&self) -> Result<(), NotifyError> {
        if self.webhook_url.is_empty() {
            return Err(NotifyError::Config(
                "discord webhook url is missing".to_string(),
            ));
        }
        Ok(())
    }

    /// # Summary
    /// Sends a payload through the webhook.
    ///
    /// # Returns
    /// * `Ok(())` on any 2xx (Discord usually answers 204).
    async fn send(&self, payload: &Payload) -> Result<(), NotifyError> {
        self.validate()?;
        let body = self.build_payload(payload)?;

        Dispatch::post(PROVIDER, &self.webhook_url)
            .redacted("<discord webhook>")
            .accept(Acceptance::Success)
            .send_json(&self.options, &body)
            .await
    }
}
