use thiserror::Error;

/// # Summary
/// 通知服务错误枚举。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 所有错误都直接返回给调用方，库内部不做重试。
#[derive(Error, Debug)]
pub enum NotifyError {
    /// 配置错误 (如缺少 Token、Webhook URL 或目标 ID)
    #[error("Configuration error: {0}")]
    Config(String),

    /// 当前通知渠道不支持该载荷类型
    #[error("{provider} does not support payload type: {kind}")]
    UnsupportedPayload {
        provider: &'static str,
        kind: &'static str,
    },

    /// 载荷没有可发送的内容 (如 LINE 消息既无图片也无正文)
    #[error("{0}: no messages to send")]
    NothingToSend(&'static str),

    /// 载荷序列化失败
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// 请求构造失败或网络传输错误
    #[error("Network error: {0}")]
    Transport(String),

    /// 推送平台返回了非成功状态码
    #[error("{provider} returned status: {status}")]
    Remote {
        provider: &'static str,
        status: u16,
        body: String,
    },
}

impl NotifyError {
    /// # Summary
    /// 若错误来自远端平台，返回其 HTTP 状态码。
    ///
    /// # Returns
    /// * `Remote` 变体返回 `Some(status)`，其余返回 `None`。
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
