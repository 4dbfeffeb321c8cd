//! # `herald-core` - 通知领域核心
//!
//! 定义与渠道无关的消息模型、载荷类型、`Notifier` 端口与错误类型。
//! 具体渠道实现位于 `herald-notify`。

pub mod config;
pub mod notify;
