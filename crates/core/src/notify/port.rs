use crate::notify::entity::{Message, Payload};
use crate::notify::error::NotifyError;
use async_trait::async_trait;

/// # Summary
/// 发送通知到外部系统的接口定义。
///
/// # Invariants
/// - 实现必须是 `Send` 和 `Sync` 以支持并发调用。
/// - 实现构造后只持有不可变配置，不修改调用方传入的载荷。
/// - `send` 在发起任何网络请求前先调用 `validate`。
#[async_trait]
pub trait Notifier: Send + Sync {
    /// # Summary
    /// 渠道名称，用于日志与错误信息。
    fn name(&self) -> &'static str;

    /// # Summary
    /// 校验凭证与目标配置。
    ///
    /// # Returns
    /// * 配置完整返回 `Ok(())`。
    /// * 缺少必填字段返回 `NotifyError::Config`。
    fn validate(&self) -> Result<(), NotifyError> {
        Ok(())
    }

    /// # Summary
    /// 将载荷转换为渠道格式并发送。
    ///
    /// # Logic
    /// 1. 校验配置。
    /// 2. 根据目标平台要求映射载荷。
    /// 3. 通过 HTTP 发送并检查响应状态。
    ///
    /// # Arguments
    /// * `payload` - 待发送的载荷，仅借用不修改。
    ///
    /// # Returns
    /// * 成功返回 `Ok(())`。
    /// * 失败返回 `Err(NotifyError)`。
    async fn send(&self, payload: &Payload) -> Result<(), NotifyError>;
}

/// # Summary
/// 通知便捷扩展接口。
///
/// # Invariants
/// - 自动为所有实现 `Notifier` 的类型提供支持。
#[async_trait]
pub trait NotifierExt: Notifier {
    /// # Summary
    /// 发送纯文本。
    async fn send_text(&self, text: &str) -> Result<(), NotifyError> {
        self.send(&Payload::from(text)).await
    }

    /// # Summary
    /// 发送通用消息。
    async fn send_message(&self, message: &Message) -> Result<(), NotifyError> {
        self.send(&Payload::Message(message.clone())).await
    }
}

impl<T: Notifier + ?Sized> NotifierExt for T {}
