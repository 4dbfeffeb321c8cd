use serde::Serialize;

/// # Summary
/// LINE Flex Message 载荷。
///
/// # Invariants
/// - `alt_text` 为不支持 Flex 的客户端显示的替代文本，不应为空。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlexMessage {
    #[serde(rename = "altText")]
    pub alt_text: String,
    pub contents: FlexContainer,
}

impl FlexMessage {
    pub fn new(alt_text: impl Into<String>, contents: impl Into<FlexContainer>) -> Self {
        Self {
            alt_text: alt_text.into(),
            contents: contents.into(),
        }
    }
}

/// # Summary
/// Flex 容器 (Bubble 或 Carousel)。
///
/// # Invariants
/// - 各容器结构自行输出 `"type"` 字段，因此此处使用 untagged 表示。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlexContainer {
    Bubble(BubbleContainer),
    Carousel(CarouselContainer),
}

impl From<BubbleContainer> for FlexContainer {
    fn from(bubble: BubbleContainer) -> Self {
        Self::Bubble(bubble)
    }
}

impl From<CarouselContainer> for FlexContainer {
    fn from(carousel: CarouselContainer) -> Self {
        Self::Carousel(carousel)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "bubble")]
pub struct BubbleContainer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<BoxComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero: Option<FlexComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BoxComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<BoxComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<BubbleStyles>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "carousel")]
pub struct CarouselContainer {
    pub contents: Vec<BubbleContainer>,
}

/// # Summary
/// Flex 组件。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlexComponent {
    Box(BoxComponent),
    Text(TextComponent),
    Image(ImageComponent),
    Button(ButtonComponent),
    Separator(SeparatorComponent),
}

impl From<BoxComponent> for FlexComponent {
    fn from(component: BoxComponent) -> Self {
        Self::Box(component)
    }
}

impl From<TextComponent> for FlexComponent {
    fn from(component: TextComponent) -> Self {
        Self::Text(component)
    }
}

impl From<ImageComponent> for FlexComponent {
    fn from(component: ImageComponent) -> Self {
        Self::Image(component)
    }
}

impl From<ButtonComponent> for FlexComponent {
    fn from(component: ButtonComponent) -> Self {
        Self::Button(component)
    }
}

impl From<SeparatorComponent> for FlexComponent {
    fn from(component: SeparatorComponent) -> Self {
        Self::Separator(component)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxLayout {
    Horizontal,
    #[default]
    Vertical,
    Baseline,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "box")]
pub struct BoxComponent {
    pub layout: BoxLayout,
    pub contents: Vec<FlexComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

impl BoxComponent {
    pub fn new(layout: BoxLayout, contents: Vec<FlexComponent>) -> Self {
        Self {
            layout,
            contents,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "text")]
pub struct TextComponent {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub wrap: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

impl TextComponent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "image")]
pub struct ImageComponent {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(rename = "aspectRatio", skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(rename = "aspectMode", skip_serializing_if = "Option::is_none")]
    pub aspect_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

impl ImageComponent {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Link,
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "button")]
pub struct ButtonComponent {
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ButtonStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ButtonComponent {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            flex: None,
            margin: None,
            height: None,
            style: None,
            color: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "separator")]
pub struct SeparatorComponent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// # Summary
/// 组件被点击时触发的动作。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// 打开链接
    Uri {
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        uri: String,
    },
    /// 以用户身份发送文本
    Message {
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        text: String,
    },
    /// 回传数据给 Bot 服务端
    Postback {
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        data: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BubbleStyles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<BlockStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero: Option<BlockStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BlockStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<BlockStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlockStyle {
    #[serde(rename = "backgroundColor", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub separator: bool,
    #[serde(rename = "separatorColor", skip_serializing_if = "Option::is_none")]
    pub separator_color: Option<String>,
}
