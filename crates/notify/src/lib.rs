//! # `herald-notify` - 通知渠道实现
//!
//! 将 `herald-core` 中与渠道无关的 `Payload` 映射为各平台的 JSON 结构，
//! 并通过共享的 HTTP 发送逻辑投递。
//!
//! ## 渠道
//! - `discord`: Webhook + Embed
//! - `line`: Messaging API push (文本 / 图片 / Flex)
//! - `telegram`: Bot API `sendMessage` / `sendPhoto`
//! - `msteams`: Incoming Webhook + Adaptive Card

pub mod discord;
mod http;
pub mod line;
pub mod msteams;
pub mod options;
pub mod telegram;

pub use discord::DiscordNotifier;
pub use line::LineNotifier;
pub use msteams::TeamsNotifier;
pub use options::{NotifyOptions, NotifyOptionsBuilder};
pub use telegram::TelegramNotifier;
