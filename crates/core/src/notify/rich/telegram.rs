use serde::Serialize;

/// # Summary
/// Telegram Bot API `sendMessage` / `sendPhoto` 的完整请求体。
///
/// # Invariants
/// - `chat_id` 为空时由通知渠道填入默认 Chat ID。
/// - `photo` 非空时使用 `sendPhoto` 方法，`caption` 作为图片说明。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TelegramPayload {
    pub chat_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_web_page_preview: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_notification: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl TelegramPayload {
    /// # Summary
    /// 判断载荷是否携带图片。
    pub fn has_photo(&self) -> bool {
        self.photo.as_deref().is_some_and(|photo| !photo.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    Markdown,
    MarkdownV2,
    #[serde(rename = "HTML")]
    Html,
}

/// # Summary
/// 附加在消息下方的键盘。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Inline(InlineKeyboardMarkup),
    Keyboard(ReplyKeyboardMarkup),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub resize_keyboard: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub one_time_keyboard: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeyboardButton {
    pub text: String,
}
