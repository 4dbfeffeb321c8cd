//! 各渠道专属的富文本载荷实体。
//!
//! 这些类型只描述线上 JSON 结构，不包含任何发送逻辑。

pub mod discord;
pub mod line;
pub mod teams;
pub mod telegram;
