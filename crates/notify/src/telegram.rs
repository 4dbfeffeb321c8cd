use crate::http::{Acceptance, Dispatch};
use crate::options::NotifyOptions;
use async_trait::async_trait;
use herald_core::notify::entity::{Message, Payload};
use herald_core::notify::error::NotifyError;
use herald_core::notify::port::Notifier;
use herald_core::notify::rich::telegram::{ParseMode, TelegramPayload};

const PROVIDER: &str = "telegram";
const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// # Summary
/// Bot API method a payload is sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelegramMethod {
    SendMessage,
    SendPhoto,
}

impl TelegramMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SendMessage => "sendMessage",
            Self::SendPhoto => "sendPhoto",
        }
    }
}

/// # Summary
/// A notifier implementation that sends messages via Telegram Bot API.
///
/// # Invariants
/// * `bot_token` must be valid.
/// * `chat_id` must be accessible by the bot.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    /// The Bot API token.
    bot_token: String,
    /// The target Chat ID.
    chat_id: String,
    options: NotifyOptions,
}

impl TelegramNotifier {
    /// # Summary
    /// Creates a new `TelegramNotifier`.
    ///
    /// # Logic
    /// Initializes the struct with provided credentials and a default HTTP client.
    ///
    /// # Arguments
    /// * `bot_token` - The Telegram Bot API token.
    /// * `chat_id` - The target chat ID to send messages to.
    ///
    /// # Returns
    /// * A new instance of `TelegramNotifier`.
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Result<Self, NotifyError> {
        Ok(Self::with_options(bot_token, chat_id, NotifyOptions::standard()?))
    }

    pub fn with_options(
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
        options: NotifyOptions,
    ) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            options,
        }
    }

    /// # Summary
    /// Full method URL, with the bot token embedded in the path.
    fn method_url(&self, method: TelegramMethod) -> String {
        format!(
            "{}/bot{}/{}",
            self.options.api_base().unwrap_or(TELEGRAM_API_BASE),
            self.bot_token,
            method.as_str()
        )
    }

    /// # Summary
    /// Picks the Bot API method and builds its body.
    ///
    /// # Logic
    /// 1. Text is sent as Markdown via `sendMessage`.
    /// 2. A `Message` is formatted as bold title + newline + content; an image switches to `sendPhoto`
    ///    with the text as caption.
    /// 3. A full payload passes through, with the default chat ID filled in and `sendPhoto`
    ///    chosen when `photo` is set.
    pub(crate) fn build_request(
        &self,
        payload: &Payload,
    ) -> Result<(TelegramMethod, TelegramPayload), NotifyError> {
        match payload {
            Payload::Text(text) => Ok((
                TelegramMethod::SendMessage,
                TelegramPayload {
                    chat_id: self.chat_id.clone(),
                    text: Some(text.clone()),
                    parse_mode: Some(ParseMode::Markdown),
                    ..TelegramPayload::default()
                },
            )),
            Payload::Message(message) => Ok(self.message_request(message)),
            Payload::Telegram(rich) => {
                let mut body = rich.clone();
                if body.chat_id.is_empty() {
                    body.chat_id = self.chat_id.clone();
                }
                let method = if body.has_photo() {
                    TelegramMethod::SendPhoto
                } else {
                    TelegramMethod::SendMessage
                };
                Ok((method, body))
            }
            other => Err(NotifyError::UnsupportedPayload {
                provider: PROVIDER,
                kind: other.kind(),
            }),
        }
    }

    fn message_request(&self, message: &Message) -> (TelegramMethod, TelegramPayload) {
        // Simple formatting: Bold subject + newline + content
        let text = match message.title() {
            Some(title) => format!("*{}*\n{}", title, message.content),
            None => message.content.clone(),
        };

        match message.image_url() {
            Some(photo) => (
                TelegramMethod::SendPhoto,
                TelegramPayload {
                    chat_id: self.chat_id.clone(),
                    photo: Some(photo.to_string()),
                    caption: Some(text),
                    parse_mode: Some(ParseMode::Markdown),
                    ..TelegramPayload::default()
                },
            ),
            None => (
                TelegramMethod::SendMessage,
                TelegramPayload {
                    chat_id: self.chat_id.clone(),
                    text: Some(text),
                    parse_mode: Some(ParseMode::Markdown),
                    ..TelegramPayload::default()
                },
            ),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn validate(&self) -> Result<(), NotifyError> {
        if self.bot_token.is_empty() || self.chat_id.is_empty() {
            return Err(NotifyError::Config(
                "telegram token or chat ID is missing".to_string(),
            ));
        }
        Ok(())
    }

    /// # Summary
    /// Sends a notification to the configured Telegram chat.
    ///
    /// # Logic
    /// 1. Validates credentials.
    /// 2. Chooses the method and builds the body.
    /// 3. Sends a POST request to the Telegram API.
    /// 4. Checks the response status and returns success or failure.
    ///
    /// # Returns
    /// * `Ok(())` if the API answered 200.
    /// * `Err(NotifyError)` if a network error occurs or the API returns another status.
    async fn send(&self, payload: &Payload) -> Result<(), NotifyError> {
        self.validate()?;
        let (method, body) = self.build_request(payload)?;
        let url = self.method_url(method);
        let redacted = format!("telegram:{}", method.as_str());

        Dispatch::post(PROVIDER, &url)
            .redacted(&redacted)
            .accept(Acceptance::Only(&[200]))
            .send_json(&self.options, &body)
            .await
    }
}
