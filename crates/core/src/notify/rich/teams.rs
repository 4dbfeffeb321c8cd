use serde::Serialize;

/// Adaptive Card 的 JSON Schema 地址
pub const ADAPTIVE_CARD_SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";
/// Adaptive Card 类型标识
pub const ADAPTIVE_CARD_TYPE: &str = "AdaptiveCard";
/// 默认使用的 Adaptive Card 版本 (Teams 兼容)
pub const ADAPTIVE_CARD_VERSION: &str = "1.2";

/// # Summary
/// Microsoft Teams 使用的 Adaptive Card。
///
/// # Invariants
/// - `schema` / `kind` / `version` 缺失时由 `with_defaults` 回填。
/// - `body` 即使为空也会序列化为 `[]`。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdaptiveCard {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub body: Vec<CardElement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<CardAction>,
}

impl AdaptiveCard {
    /// # Summary
    /// 以给定元素创建卡片，并填充默认头部字段。
    pub fn new(body: Vec<CardElement>) -> Self {
        Self {
            body,
            ..Self::default()
        }
        .with_defaults()
    }

    /// # Summary
    /// 回填缺失或为空的 `$schema`、`type`、`version` 字段。
    ///
    /// # Logic
    /// 1. 已存在的非空值保持不变。
    /// 2. 缺失值使用模块常量填充。
    pub fn with_defaults(mut self) -> Self {
        fill(&mut self.schema, ADAPTIVE_CARD_SCHEMA);
        fill(&mut self.kind, ADAPTIVE_CARD_TYPE);
        fill(&mut self.version, ADAPTIVE_CARD_VERSION);
        self
    }
}

fn fill(slot: &mut Option<String>, default: &str) {
    if slot.as_deref().is_none_or(str::is_empty) {
        *slot = Some(default.to_string());
    }
}

/// # Summary
/// 卡片正文元素。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CardElement {
    TextBlock(TextBlock),
    Image(Image),
    FactSet(FactSet),
}

impl From<TextBlock> for CardElement {
    fn from(block: TextBlock) -> Self {
        Self::TextBlock(block)
    }
}

impl From<Image> for CardElement {
    fn from(image: Image) -> Self {
        Self::Image(image)
    }
}

impl From<FactSet> for CardElement {
    fn from(facts: FactSet) -> Self {
        Self::FactSet(facts)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct TextBlock {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub wrap: bool,
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Image {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(rename = "altText", skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct FactSet {
    pub facts: Vec<Fact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Fact {
    pub title: String,
    pub value: String,
}

/// # Summary
/// 卡片底部动作按钮。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum CardAction {
    #[serde(rename = "Action.OpenUrl")]
    OpenUrl { title: String, url: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_defaults_backfills_missing_header() {
        let card = AdaptiveCard {
            version: Some(String::new()),
            ..AdaptiveCard::default()
        }
        .with_defaults();

        assert_eq!(card.schema.as_deref(), Some(ADAPTIVE_CARD_SCHEMA));
        assert_eq!(card.kind.as_deref(), Some(ADAPTIVE_CARD_TYPE));
        assert_eq!(card.version.as_deref(), Some(ADAPTIVE_CARD_VERSION));
    }

    #[test]
    fn test_with_defaults_keeps_explicit_version() {
        let card = AdaptiveCard {
            version: Some("1.5".to_string()),
            ..AdaptiveCard::default()
        }
        .with_defaults();
        assert_eq!(card.version.as_deref(), Some("1.5"));
    }

    #[test]
    fn test_elements_serialize_with_type_tags() {
        let card = AdaptiveCard {
            body: vec![
                TextBlock::new("Build #42").into(),
                FactSet {
                    facts: vec![Fact {
                        title: "Branch".to_string(),
                        value: "main".to_string(),
                    }],
                }
                .into(),
            ],
            actions: vec![CardAction::OpenUrl {
                title: "Logs".to_string(),
                url: "https://ci.example.com/42".to_string(),
            }],
            ..AdaptiveCard::default()
        };

        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(
            value,
            json!({
                "body": [
                    { "type": "TextBlock", "text": "Build #42" },
                    { "type": "FactSet", "facts": [{ "title": "Branch", "value": "main" }] }
                ],
                "actions": [
                    { "type": "Action.OpenUrl", "title": "Logs", "url": "https://ci.example.com/42" }
                ]
            })
        );
    }
}
