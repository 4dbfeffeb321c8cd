use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use herald_core::config::AppConfig;
use herald_core::notify::entity::Payload;
use herald_core::notify::error::NotifyError;
use herald_core::notify::port::Notifier;
use herald_notify::{DiscordNotifier, LineNotifier, NotifyOptions, TeamsNotifier, TelegramNotifier};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// # Summary
/// 加载应用配置。
///
/// # Logic
/// 1. 读取可选的 `herald.toml` (或同名 yaml/json)。
/// 2. 叠加 `HERALD_` 前缀的环境变量，层级以 `__` 分隔 (如 `HERALD_TELEGRAM__CHAT_ID`)。
///
/// # Returns
/// * 反序列化后的 `AppConfig`，或 `ConfigError`。
fn load_config() -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(File::with_name("herald").required(false))
        .add_source(
            Environment::with_prefix("HERALD")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}

/// # Summary
/// 根据配置实例化所有已启用的通知渠道。
///
/// # Invariants
/// - 所有渠道共享同一份不可变的 `NotifyOptions` (及其连接池)。
fn build_notifiers(config: &AppConfig, options: &NotifyOptions) -> Vec<Box<dyn Notifier>> {
    let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();
    if let Some(line) = &config.line {
        notifiers.push(Box::new(LineNotifier::with_options(
            line.channel_token.clone(),
            line.target_id.clone(),
            options.clone(),
        )));
    }
    if let Some(telegram) = &config.telegram {
        notifiers.push(Box::new(TelegramNotifier::with_options(
            telegram.bot_token.clone(),
            telegram.chat_id.clone(),
            options.clone(),
        )));
    }
    if let Some(discord) = &config.discord {
        notifiers.push(Box::new(DiscordNotifier::with_options(
            discord.webhook_url.clone(),
            options.clone(),
        )));
    }
    if let Some(teams) = &config.teams {
        notifiers.push(Box::new(TeamsNotifier::with_options(
            teams.webhook_url.clone(),
            options.clone(),
        )));
    }
    notifiers
}

/// # Summary
/// 向每个渠道依次发送同一载荷，单个渠道失败不影响其余渠道。
///
/// # Returns
/// * 失败渠道的名称与错误列表。
async fn fan_out(
    notifiers: &[Box<dyn Notifier>],
    payload: &Payload,
) -> Vec<(&'static str, NotifyError)> {
    let mut failures = Vec::new();
    for notifier in notifiers {
        info!("Sending {} notification...", notifier.name());
        match notifier.send(payload).await {
            Ok(()) => info!("{} notification sent!", notifier.name()),
            Err(e) => {
                error!("Failed to send {} notification: {}", notifier.name(), e);
                failures.push((notifier.name(), e));
            }
        }
    }
    failures
}

/// # Summary
/// 演示程序入口：加载配置并将配置中的消息发送到所有已启用渠道。
///
/// # Logic
/// 1. 加载 .env 并初始化全局日志。
/// 2. 读取配置，构建共享 HTTP 选项。
/// 3. 实例化渠道并逐个发送。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化环境变量 (.env 可选) 与日志
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!("herald starting...");

    // 2. 读取配置
    let config = load_config()?;
    debug!("{} provider(s) configured", config.enabled_providers());

    let mut builder = NotifyOptions::builder();
    if let Some(secs) = config.http.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let options = builder.build()?;

    // 3. 发送
    let notifiers = build_notifiers(&config, &options);
    if notifiers.is_empty() {
        warn!("No provider configured. Set HERALD_<PROVIDER>__* variables or create herald.toml.");
        return Ok(());
    }

    let payload = Payload::Message(config.message.clone());
    let failures = fan_out(&notifiers, &payload).await;
    info!(
        "Done: {} sent, {} failed",
        notifiers.len() - failures.len(),
        failures.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::config::{DiscordConfig, LineConfig, TeamsConfig};

    #[test]
    fn test_build_notifiers_only_for_configured_sections() {
        let config = AppConfig {
            discord: Some(DiscordConfig {
                webhook_url: "https://discord.com/api/webhooks/1/x".to_string(),
            }),
            line: Some(LineConfig {
                channel_token: "token".to_string(),
                target_id: "U1".to_string(),
            }),
            teams: Some(TeamsConfig {
                webhook_url: "https://example.webhook.office.com/x".to_string(),
            }),
            ..AppConfig::default()
        };
        let options = NotifyOptions::standard().unwrap();

        let names: Vec<_> = build_notifiers(&config, &options)
            .iter()
            .map(|n| n.name())
            .collect();
        assert_eq!(names, vec!["line", "discord", "msteams"]);
    }

    #[test]
    fn test_env_values_are_kept_as_strings() {
        // SAFETY: no other test in this binary reads the environment.
        unsafe {
            std::env::set_var("HERALD_LINE__TARGET_ID", "0042");
            std::env::set_var("HERALD_LINE__CHANNEL_TOKEN", "true");
            std::env::set_var("HERALD_HTTP__TIMEOUT_SECS", "10");
        }

        let config = load_config().unwrap();
        let line = config.line.unwrap();
        assert_eq!(line.target_id, "0042");
        assert_eq!(line.channel_token, "true");
        assert_eq!(config.http.timeout_secs, Some(10));
    }

    #[tokio::test]
    async fn test_fan_out_continues_after_failure() {
        let config = AppConfig {
            discord: Some(DiscordConfig {
                webhook_url: String::new(),
            }),
            teams: Some(TeamsConfig {
                webhook_url: String::new(),
            }),
            ..AppConfig::default()
        };
        let options = NotifyOptions::standard().unwrap();
        let notifiers = build_notifiers(&config, &options);

        let failures = fan_out(&notifiers, &Payload::from("hello")).await;
        assert_eq!(failures.len(), 2);
        assert!(failures
            .iter()
            .all(|(_, e)| matches!(e, NotifyError::Config(_))));
    }
}
