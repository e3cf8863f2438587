//! Chat-style text component.
//!
//! [`TextComponent`] encodes to compact JSON in the shape book clients expect:
//! unset attributes are omitted, event keys are camel-cased, and nested
//! children live under `extra`.

use serde::{Deserialize, Serialize};

use crate::{ComponentError, FormattedComponent};

/// Named text color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

/// Action performed when the reader clicks a component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickAction {
    OpenUrl,
    RunCommand,
    SuggestCommand,
    ChangePage,
    CopyToClipboard,
}

/// Click handler attached to a component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// What the client does on click.
    pub action: ClickAction,
    /// Action argument (URL, command, page number, ...).
    pub value: String,
}

impl ClickEvent {
    /// Create a click event.
    #[must_use]
    pub fn new(action: ClickAction, value: impl Into<String>) -> Self {
        Self {
            action,
            value: value.into(),
        }
    }

    /// Open `url` in the reader's browser.
    #[must_use]
    pub fn open_url(url: impl Into<String>) -> Self {
        Self::new(ClickAction::OpenUrl, url)
    }

    /// Run `command` as the reader.
    #[must_use]
    pub fn run_command(command: impl Into<String>) -> Self {
        Self::new(ClickAction::RunCommand, command)
    }

    /// Put `command` into the reader's input line.
    #[must_use]
    pub fn suggest_command(command: impl Into<String>) -> Self {
        Self::new(ClickAction::SuggestCommand, command)
    }

    /// Jump to a 1-based page of the open book.
    #[must_use]
    pub fn change_page(page: usize) -> Self {
        Self::new(ClickAction::ChangePage, page.to_string())
    }

    /// Copy `text` to the reader's clipboard.
    #[must_use]
    pub fn copy_to_clipboard(text: impl Into<String>) -> Self {
        Self::new(ClickAction::CopyToClipboard, text)
    }
}

/// Tooltip attached to a component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "contents", rename_all = "snake_case")]
pub enum HoverEvent {
    /// Show a nested component as tooltip.
    ShowText(Box<TextComponent>),
}

impl HoverEvent {
    /// Tooltip showing `component`.
    #[must_use]
    pub fn show_text(component: impl Into<TextComponent>) -> Self {
        Self::ShowText(Box::new(component.into()))
    }
}

/// A rich text node with optional styling and nested children.
///
/// Decorations are tri-state: `None` inherits from the parent, while
/// `Some(false)` explicitly clears an inherited decoration and therefore
/// counts as styling.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextComponent {
    /// Literal text of this node.
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlined: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obfuscated: Option<bool>,
    /// Text inserted into the reader's input line on shift-click.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insertion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click_event: Option<ClickEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_event: Option<HoverEvent>,
    /// Nested children, rendered after `text`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<TextComponent>,
}

impl TextComponent {
    /// Create an unstyled component.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    #[must_use]
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    #[must_use]
    pub fn with_underlined(mut self, underlined: bool) -> Self {
        self.underlined = Some(underlined);
        self
    }

    #[must_use]
    pub fn with_strikethrough(mut self, strikethrough: bool) -> Self {
        self.strikethrough = Some(strikethrough);
        self
    }

    #[must_use]
    pub fn with_obfuscated(mut self, obfuscated: bool) -> Self {
        self.obfuscated = Some(obfuscated);
        self
    }

    #[must_use]
    pub fn with_insertion(mut self, insertion: impl Into<String>) -> Self {
        self.insertion = Some(insertion.into());
        self
    }

    #[must_use]
    pub fn with_click_event(mut self, event: ClickEvent) -> Self {
        self.click_event = Some(event);
        self
    }

    #[must_use]
    pub fn with_hover_event(mut self, event: HoverEvent) -> Self {
        self.hover_event = Some(event);
        self
    }

    /// Append a nested child.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<TextComponent>) -> Self {
        self.extra.push(child.into());
        self
    }

    /// Text of this node and all children, without any styling.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        self.push_plain_text(&mut out);
        out
    }

    fn push_plain_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.extra {
            child.push_plain_text(out);
        }
    }

    /// Whether this node alone (ignoring children) carries styling.
    fn has_own_styling(&self) -> bool {
        self.color.is_some()
            || self.bold.is_some()
            || self.italic.is_some()
            || self.underlined.is_some()
            || self.strikethrough.is_some()
            || self.obfuscated.is_some()
            || self.insertion.is_some()
            || self.click_event.is_some()
            || self.hover_event.is_some()
    }
}

impl From<&str> for TextComponent {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TextComponent {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl FormattedComponent for TextComponent {
    fn append_child(&mut self, child: Self) {
        self.extra.push(child);
    }

    fn has_styling(&self) -> bool {
        self.has_own_styling() || self.extra.iter().any(FormattedComponent::has_styling)
    }

    fn to_wire_text(&self) -> Result<String, ComponentError> {
        Ok(serde_json::to_string(self)?)
    }
}
