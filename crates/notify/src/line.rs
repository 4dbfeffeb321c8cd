use crate::http::{Acceptance, Dispatch};
use crate::options::NotifyOptions;
use async_trait::async_trait;
use herald_core::notify::entity::{Message, Payload};
use herald_core::notify::error::NotifyError;
use herald_core::notify::port::Notifier;
use herald_core::notify::rich::line::FlexContainer;
use serde::Serialize;

const PROVIDER: &str = "line";
const LINE_API_BASE: &str = "https://api.line.me";
const PUSH_PATH: &str = "/v2/bot/message/push";

/// # Summary
/// A notifier that pushes messages through the LINE Messaging API.
///
/// # Invariants
/// * `channel_token` and `target_id` must both be non-empty.
/// * The token is only sent as a bearer header.
#[derive(Debug, Clone)]
pub struct LineNotifier {
    /// Channel access token.
    channel_token: String,
    /// User, group or room ID to push to.
    target_id: String,
    options: NotifyOptions,
    push_url: String,
}

/// Body of the push endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct PushRequest<'a> {
    to: &'a str,
    messages: Vec<LineMessage<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum LineMessage<'a> {
    Text {
        text: String,
    },
    Image {
        #[serde(rename = "originalContentUrl")]
        original_content_url: &'a str,
        #[serde(rename = "previewImageUrl")]
        preview_image_url: &'a str,
    },
    Flex {
        #[serde(rename = "altText")]
        alt_text: &'a str,
        contents: &'a FlexContainer,
    },
}

impl LineNotifier {
    /// # Summary
    /// Creates a new `LineNotifier` with default HTTP options.
    ///
    /// # Arguments
    /// * `channel_token` - The channel access token.
    /// * `target_id` - The user or group ID to push to.
    pub fn new(
        channel_token: impl Into<String>,
        target_id: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        Ok(Self::with_options(
            channel_token,
            target_id,
            NotifyOptions::standard()?,
        ))
    }

    pub fn with_options(
        channel_token: impl Into<String>,
        target_id: impl Into<String>,
        options: NotifyOptions,
    ) -> Self {
        let push_url = format!("{}{}", options.api_base().unwrap_or(LINE_API_BASE), PUSH_PATH);
        Self {
            channel_token: channel_token.into(),
            target_id: target_id.into(),
            options,
            push_url,
        }
    }

    /// # Summary
    /// Maps a payload onto the push request body.
    ///
    /// # Logic
    /// 1. Text becomes one text message.
    /// 2. A `Message` becomes an image message (if any) followed by a text message (if any).
    /// 3. Flex payloads are wrapped in a flex message.
    ///
    /// # Returns
    /// * `Err(NotifyError::NothingToSend)` when no message object was produced.
    pub(crate) fn build_request<'a>(&'a self, payload: &'a Payload) -> Result<PushRequest<'a>, NotifyError> {
        let messages = match payload {
            Payload::Text(text) => vec![LineMessage::Text { text: text.clone() }],
            Payload::Message(message) => message_objects(message),
            Payload::LineFlex(flex) => vec![LineMessage::Flex {
                alt_text: &flex.alt_text,
                contents: &flex.contents,
            }],
            other => {
                return Err(NotifyError::UnsupportedPayload {
                    provider: PROVIDER,
                    kind: other.kind(),
                });
            }
        };

        if messages.is_empty() {
            return Err(NotifyError::NothingToSend(PROVIDER));
        }

        Ok(PushRequest {
            to: &self.target_id,
            messages,
        })
    }
}

fn message_objects(message: &Message) -> Vec<LineMessage<'_>> {
    let mut messages = Vec::with_capacity(2);
    if let Some(url) = message.image_url() {
        messages.push(LineMessage::Image {
            original_content_url: url,
            preview_image_url: url,
        });
    }
    if let Some(content) = message.content() {
        let text = match message.title() {
            Some(title) => format!("{}\n{}", title, content),
            None => content.to_string(),
        };
        messages.push(LineMessage::Text { text });
    }
    messages
}

#[async_trait]
impl Notifier for LineNotifier {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn validate(&self) -> Result<(), NotifyError> {
        if self.channel_token.is_empty() || self.target_id.is_empty() {
            return Err(NotifyError::Config(
                "line channel token or target ID is missing".to_string(),
            ));
        }
        Ok(())
    }

    /// # Summary
    /// Pushes a payload to the configured target.
    ///
    /// # Returns
    /// * `Ok(())` only on HTTP 200.
    async fn send(&self, payload: &Payload) -> Result<(), NotifyError> {
        self.validate()?;
        let body = self.build_request(payload)?;

        Dispatch::post(PROVIDER, &self.push_url)
            .bearer(&self.channel_token)
            .accept(Acceptance::Only(&[200]))
            .send_json(&self.options, &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::notify::rich::line::{BubbleContainer, FlexMessage};
    use herald_core::notify::rich::telegram::TelegramPayload;
    use serde_json::json;

    fn notifier() -> LineNotifier {
        LineNotifier::new("channel-token", "U1234").unwrap()
    }

    fn request_json(payload: Payload) -> serde_json::Value {
        let notifier = notifier();
        let request = notifier.build_request(&payload).unwrap();
        serde_json::to_value(&request).unwrap()
    }

    #[test]
    fn test_push_url_defaults_to_line_api() {
        assert_eq!(notifier().push_url, "https://api.line.me/v2/bot/message/push");
    }

    #[test]
    fn test_content_only_message_is_single_text() {
        let value = request_json(Message::new("backup done").into());
        assert_eq!(
            value,
            json!({
                "to": "U1234",
                "messages": [{ "type": "text", "text": "backup done" }]
            })
        );
    }

    #[test]
    fn test_image_and_content_produce_two_messages_image_first() {
        let message = Message::new("see chart")
            .with_title("Weekly report")
            .with_image_url("https://example.com/chart.png");
        let value = request_json(message.into());

        let messages = value["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[0],
            json!({
                "type": "image",
                "originalContentUrl": "https://example.com/chart.png",
                "previewImageUrl": "https://example.com/chart.png"
            })
        );
        assert_eq!(
            messages[1],
            json!({ "type": "text", "text": "Weekly report\nsee chart" })
        );
    }

    #[test]
    fn test_title_without_content_is_dropped() {
        let message = Message::new("")
            .with_title("orphan title")
            .with_image_url("https://example.com/a.png");
        let value = request_json(message.into());
        assert_eq!(value["messages"].as_array().unwrap().len(), 1);
        assert_eq!(value["messages"][0]["type"], "image");
    }

    #[test]
    fn test_empty_message_has_nothing_to_send() {
        let payload = Payload::from(Message::new("").with_title("only a title"));
        let notifier = notifier();
        let err = notifier.build_request(&payload).unwrap_err();
        assert!(matches!(err, NotifyError::NothingToSend("line")));
    }

    #[test]
    fn test_flex_message_is_wrapped() {
        let flex = FlexMessage::new("Order shipped", BubbleContainer::default());
        let value = request_json(flex.into());
        assert_eq!(
            value["messages"][0],
            json!({
                "type": "flex",
                "altText": "Order shipped",
                "contents": { "type": "bubble" }
            })
        );
    }

    #[test]
    fn test_foreign_payload_is_unsupported() {
        let payload = Payload::from(TelegramPayload::default());
        let notifier = notifier();
        let err = notifier.build_request(&payload).unwrap_err();
        assert!(matches!(err, NotifyError::UnsupportedPayload { kind: "telegram", .. }));
    }

    #[test]
    fn test_missing_credentials_are_config_errors() {
        let missing_token = LineNotifier::new("", "U1234").unwrap();
        assert!(matches!(missing_token.validate(), Err(NotifyError::Config(_))));

        let missing_target = LineNotifier::new("token", "").unwrap();
        assert!(matches!(missing_target.validate(), Err(NotifyError::Config(_))));
    }
}
