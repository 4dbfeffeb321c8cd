use crate::notify::entity::Message;
use serde::{Deserialize, Serialize};

/// 全局应用配置
///
/// 渠道段落缺省时视为未启用。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default = "default_message")]
    pub message: Message,
    #[serde(default)]
    pub discord: Option<DiscordConfig>,
    #[serde(default)]
    pub line: Option<LineConfig>,
    #[serde(default)]
    pub telegram: Option<TelegramConfig>,
    #[serde(default)]
    pub teams: Option<TeamsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    /// 单次请求超时 (秒)，缺省时使用 HTTP 客户端自身配置
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    pub webhook_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineConfig {
    pub channel_token: String,
    /// 用户 ID 或群组 ID
    pub target_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamsConfig {
    pub webhook_url: String,
}

fn default_message() -> Message {
    Message::new("This is a test notification sent by herald.")
        .with_title("Hello from herald!")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            message: default_message(),
            discord: None,
            line: None,
            telegram: None,
            teams: None,
        }
    }
}

impl AppConfig {
    /// # Summary
    /// 已配置的渠道数量。
    pub fn enabled_providers(&self) -> usize {
        [
            self.discord.is_some(),
            self.line.is_some(),
            self.telegram.is_some(),
            self.teams.is_some(),
        ]
        .into_iter()
        .filter(|enabled| *enabled)
        .count()
    }
}
