use crate::http::{Acceptance, Dispatch};
use crate::options::NotifyOptions;
use async_trait::async_trait;
use herald_core::notify::entity::{Message, Payload};
use herald_core::notify::error::NotifyError;
use herald_core::notify::port::Notifier;
use herald_core::notify::rich::teams::{AdaptiveCard, CardElement, Image, TextBlock};
use serde::Serialize;

const PROVIDER: &str = "msteams";
const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

/// # Summary
/// A notifier that posts Adaptive Cards to a Teams incoming webhook.
///
/// # Invariants
/// * `webhook_url` must be non-empty for `send` to reach the network.
#[derive(Debug, Clone)]
pub struct TeamsNotifier {
    webhook_url: String,
    options: NotifyOptions,
}

/// Webhook envelope around a single card.
#[derive(Debug, Serialize)]
pub(crate) struct TeamsWebhookPayload {
    #[serde(rename = "type")]
    kind: &'static str,
    attachments: Vec<Attachment>,
}

#[derive(Debug, Serialize)]
struct Attachment {
    #[serde(rename = "contentType")]
    content_type: &'static str,
    content: AdaptiveCard,
}

impl TeamsWebhookPayload {
    fn wrap(card: AdaptiveCard) -> Self {
        Self {
            kind: "message",
            attachments: vec![Attachment {
                content_type: ADAPTIVE_CARD_CONTENT_TYPE,
                content: card,
            }],
        }
    }
}

impl TeamsNotifier {
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
    /// Maps a payload onto an Adaptive Card inside the webhook envelope.
    ///
    /// # Logic
    /// 1. Text becomes one wrapping text block.
    /// 2. A `Message` becomes title / content text blocks plus an image, each only when present.
    /// 3. A full card passes through with `$schema`, `type` and `version` backfilled.
    pub(crate) fn build_payload(&self, payload: &Payload) -> Result<TeamsWebhookPayload, NotifyError> {
        let card = match payload {
            Payload::Text(text) => AdaptiveCard::new(vec![content_block(text)]),
            Payload::Message(message) => message_card(message),
            Payload::TeamsCard(card) => card.clone().with_defaults(),
            other => {
                return Err(NotifyError::UnsupportedPayload {
                    provider: PROVIDER,
                    kind: other.kind(),
                });
            }
        };
        Ok(TeamsWebhookPayload::wrap(card))
    }
}

fn content_block(text: &str) -> CardElement {
    TextBlock {
        wrap: true,
        ..TextBlock::new(text)
    }
    .into()
}

fn message_card(message: &Message) -> AdaptiveCard {
    let mut body = Vec::new();
    if let Some(title) = message.title() {
        body.push(
            TextBlock {
                weight: Some("Bolder".to_string()),
                size: Some("Medium".to_string()),
                ..TextBlock::new(title)
            }
            .into(),
        );
    }
    if let Some(content) = message.content() {
        body.push(content_block(content));
    }
    if let Some(url) = message.image_url() {
        body.push(
            Image {
                url: url.to_string(),
                size: Some("Stretch".to_string()),
                alt_text: None,
            }
            .into(),
        );
    }
    AdaptiveCard::new(body)
}

#[async_trait]
impl Notifier for TeamsNotifier {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn validate(&self) -> Result<(), NotifyError> {
        if self.webhook_url.is_empty() {
            return Err(NotifyError::Config(
                "msteams webhook url is missing".to_string(),
            ));
        }
        Ok(())
    }

    /// # Summary
    /// Posts the card to the webhook.
    ///
    /// # Returns
    /// * `Ok(())` on HTTP 200 or 202.
    async fn send(&self, payload: &Payload) -> Result<(), NotifyError> {
        self.validate()?;
        let body = self.build_payload(payload)?;

        Dispatch::post(PROVIDER, &self.webhook_url)
            .redacted("<msteams webhook>")
            .accept(Acceptance::Only(&[200, 202]))
            .send_json(&self.options, &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::notify::rich::line::{BubbleContainer, FlexMessage};
    use herald_core::notify::rich::teams::{ADAPTIVE_CARD_SCHEMA, CardAction};
    use serde_json::json;

    fn notifier() -> TeamsNotifier {
        TeamsNotifier::new("https://example.webhook.office.com/webhookb2/abc").unwrap()
    }

    fn payload_json(payload: Payload) -> serde_json::Value {
        serde_json::to_value(notifier().build_payload(&payload).unwrap()).unwrap()
    }

    #[test]
    fn test_empty_message_produces_empty_body() {
        let value = payload_json(Message::default().into());
        assert_eq!(
            value,
            json!({
                "type": "message",
                "attachments": [{
                    "contentType": "application/vnd.microsoft.card.adaptive",
                    "content": {
                        "$schema": ADAPTIVE_CARD_SCHEMA,
                        "type": "AdaptiveCard",
                        "version": "1.2",
                        "body": []
                    }
                }]
            })
        );
    }

    #[test]
    fn test_full_message_blocks_in_order() {
        let message = Message::new("Nightly build failed")
            .with_title("CI")
            .with_image_url("https://example.com/graph.png");
        let value = payload_json(message.into());
        let body = &value["attachments"][0]["content"]["body"];

        assert_eq!(
            body,
            &json!([
                { "type": "TextBlock", "text": "CI", "weight": "Bolder", "size": "Medium" },
                { "type": "TextBlock", "text": "Nightly build failed", "wrap": true },
                { "type": "Image", "url": "https://example.com/graph.png", "size": "Stretch" }
            ])
        );
    }

    #[test]
    fn test_content_only_message_is_verbatim() {
        let value = payload_json(Message::new("just text").into());
        let body = value["attachments"][0]["content"]["body"].as_array().unwrap();
        assert_eq!(body.len(), 1);
        assert_eq!(body[0]["text"], "just text");
    }

    #[test]
    fn test_rich_card_is_backfilled() {
        let card = AdaptiveCard {
            version: Some("1.4".to_string()),
            body: vec![TextBlock::new("custom").into()],
            actions: vec![CardAction::OpenUrl {
                title: "Open".to_string(),
                url: "https://example.com".to_string(),
            }],
            ..AdaptiveCard::default()
        };
        let value = payload_json(card.into());
        let content = &value["attachments"][0]["content"];

        assert_eq!(content["$schema"], ADAPTIVE_CARD_SCHEMA);
        assert_eq!(content["type"], "AdaptiveCard");
        assert_eq!(content["version"], "1.4");
        assert_eq!(content["actions"][0]["type"], "Action.OpenUrl");
    }

    #[test]
    fn test_foreign_payload_is_unsupported() {
        let flex = FlexMessage::new("alt", BubbleContainer::default());
        let err = notifier().build_payload(&flex.into()).unwrap_err();
        assert!(matches!(err, NotifyError::UnsupportedPayload { kind: "line_flex", .. }));
    }

    #[test]
    fn test_empty_webhook_url_is_config_error() {
        let notifier = TeamsNotifier::new("").unwrap();
        assert!(matches!(notifier.validate(), Err(NotifyError::Config(_))));
    }
}
