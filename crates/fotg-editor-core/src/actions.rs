//! Editor commands and keybindings.
//!
//! Toolbar buttons and keyboard shortcuts both resolve to an [`EditorCommand`];
//! the platform layer only translates its native events into [`KeyCombo`]s.

use smol_str::SmolStr;

/// Inline or block formatting applied around every selected range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatAction {
    Bold,
    Italic,
    Link,
    CodeBlock,
    DiagramBlock,
    Image,
    Video,
}

impl FormatAction {
    pub const ALL: [FormatAction; 7] = [
        Self::Bold,
        Self::Italic,
        Self::Link,
        Self::CodeBlock,
        Self::DiagramBlock,
        Self::Image,
        Self::Video,
    ];

    /// Text inserted before and after each selected range.
    pub fn markers(self) -> (&'static str, &'static str) {
        match self {
            Self::Bold => ("**", "**"),
            Self::Italic => ("*", "*"),
            Self::Link => ("[", "](url)"),
            Self::CodeBlock => ("\n```\n", "\n```\n"),
            Self::DiagramBlock => ("\n```mermaid\n", "\n```\n"),
            Self::Image => ("![alt text](", "image_url_here)"),
            Self::Video => ("![video](", "video_url_here)"),
        }
    }

    /// Id of the toolbar button bound to this action.
    pub fn button_id(self) -> &'static str {
        match self {
            Self::Bold => "btn-bold",
            Self::Italic => "btn-italic",
            Self::Link => "btn-link",
            Self::CodeBlock => "btn-code",
            Self::DiagramBlock => "btn-mermaid",
            Self::Image => "btn-image",
            Self::Video => "btn-video",
        }
    }
}

/// Something the user asked the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Format(FormatAction),
    SaveMarkdown,
}

/// A keyboard key, reduced to what the editor binds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character key, as reported by the platform.
    Character(SmolStr),
    /// Any named key (Enter, ArrowLeft, ...).
    Named(SmolStr),
}

impl Key {
    /// Classify a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(_), None) => Self::Character(key.into()),
            _ => Self::Named(key.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const META: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: true,
    };

    /// Ctrl on most platforms, Cmd on macOS. Either one counts.
    pub fn has_primary(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A key combination for triggering a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn ctrl(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::CTRL)
    }

    pub fn meta(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::META)
    }
}

/// Command bound to `combo`, if any.
///
/// Shift and Alt are ignored: Ctrl+Shift+B still means bold.
pub fn command_for(combo: &KeyCombo) -> Option<EditorCommand> {
    if !combo.modifiers.has_primary() {
        return None;
    }
    let Key::Character(c) = &combo.key else {
        return None;
    };
    match c.to_lowercase().as_str() {
        "b" => Some(EditorCommand::Format(FormatAction::Bold)),
        "i" => Some(EditorCommand::Format(FormatAction::Italic)),
        "k" => Some(EditorCommand::Format(FormatAction::Link)),
        "s" => Some(EditorCommand::SaveMarkdown),
        _ => None,
    }
}

/// Result of handling a keydown event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeydownResult {
    /// Event was handled, prevent default.
    Handled(EditorCommand),
    /// Event was not a keybinding, let platform handle it.
    NotHandled,
}

impl KeydownResult {
    pub fn for_combo(combo: &KeyCombo) -> Self {
        command_for(combo).map_or(Self::NotHandled, Self::Handled)
    }
}
