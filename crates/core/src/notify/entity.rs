use crate::notify::rich::discord::{Embed, WebhookPayload};
use crate::notify::rich::line::FlexMessage;
use crate::notify::rich::teams::AdaptiveCard;
use crate::notify::rich::telegram::TelegramPayload;
use serde::{Deserialize, Serialize};

/// # Summary
/// 与渠道无关的通知消息。
///
/// # Invariants
/// - 构造后不可变，由调用方为每次发送单独创建。
/// - 空字符串与 `None` 等价，均视为字段缺失。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// 标题 (可选，Discord / Telegram / Teams 支持)
    #[serde(default)]
    pub title: Option<String>,
    /// 正文
    #[serde(default)]
    pub content: String,
    /// 图片地址 (可选)
    #[serde(default)]
    pub image_url: Option<String>,
    /// 颜色，形如 "#FF0000" 的十六进制字符串 (可选，Discord 支持)
    #[serde(default)]
    pub color: Option<String>,
}

impl Message {
    /// # Summary
    /// 以正文创建消息。
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// 非空标题
    pub fn title(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    /// 非空正文
    pub fn content(&self) -> Option<&str> {
        non_empty(Some(self.content.as_str()))
    }

    /// 非空图片地址
    pub fn image_url(&self) -> Option<&str> {
        non_empty(self.image_url.as_deref())
    }

    /// 非空颜色
    pub fn color(&self) -> Option<&str> {
        non_empty(self.color.as_deref())
    }

    /// # Summary
    /// 判断消息是否没有任何可展示的内容。
    pub fn is_empty(&self) -> bool {
        self.title().is_none() && self.content().is_none() && self.image_url().is_none()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// # Summary
/// 发送给通知渠道的载荷。
///
/// # Invariants
/// - `Text` 与 `Message` 所有渠道均可接受。
/// - 渠道专属变体仅被对应渠道接受，其余渠道返回 `UnsupportedPayload`。
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// 纯文本
    Text(String),
    /// 通用消息
    Message(Message),
    /// 完整的 Discord Webhook 请求体
    DiscordWebhook(WebhookPayload),
    /// 单个 Discord Embed
    DiscordEmbed(Embed),
    /// LINE Flex Message
    LineFlex(FlexMessage),
    /// 完整的 Telegram 请求体
    Telegram(TelegramPayload),
    /// Teams Adaptive Card
    TeamsCard(AdaptiveCard),
}

impl Payload {
    /// # Summary
    /// 返回载荷变体名称，用于日志和错误信息。
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Message(_) => "message",
            Self::DiscordWebhook(_) => "discord_webhook",
            Self::DiscordEmbed(_) => "discord_embed",
            Self::LineFlex(_) => "line_flex",
            Self::Telegram(_) => "telegram",
            Self::TeamsCard(_) => "teams_card",
        }
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Message> for Payload {
    fn from(message: Message) -> Self {
        Self::Message(message)
    }
}

impl From<WebhookPayload> for Payload {
    fn from(payload: WebhookPayload) -> Self {
        Self::DiscordWebhook(payload)
    }
}

impl From<Embed> for Payload {
    fn from(embed: Embed) -> Self {
        Self::DiscordEmbed(embed)
    }
}

impl From<FlexMessage> for Payload {
    fn from(flex: FlexMessage) -> Self {
        Self::LineFlex(flex)
    }
}

impl From<TelegramPayload> for Payload {
    fn from(payload: TelegramPayload) -> Self {
        Self::Telegram(payload)
    }
}

impl From<AdaptiveCard> for Payload {
    fn from(card: AdaptiveCard) -> Self {
        Self::TeamsCard(card)
    }
}
