//! Script commands and how they drive an [`Editor`].

use std::fmt;

use vlake::{
    EditStatus, Editor, VlakeError,
    draw::LineStyle,
    edit::Direction,
    element::Side,
    geometry::Point,
};

/// What a `select` command moves the selection to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectTarget {
    Root,
    Parent,
    None,
    /// The n-th child of the selected join, counted from zero.
    Child(usize),
    /// The n-th connective or line of the selected join, counted from zero.
    Connective(usize),
}

impl fmt::Display for SelectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("root"),
            Self::Parent => f.write_str("parent"),
            Self::None => f.write_str("none"),
            Self::Child(index) => write!(f, "child {index}"),
            Self::Connective(index) => write!(f, "connective {index}"),
        }
    }
}

/// One parsed script command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(Direction),
    /// Empty text restores the placeholder.
    Text(String),
    /// A validated symbol key.
    Connective(&'static str),
    Line(LineStyle),
    Annotate(Side, String),
    ToggleBox,
    Select(SelectTarget),
    Click(Point),
    Copy,
    Paste,
    Delete { confirmed: bool },
    Reset { confirmed: bool },
}

impl Command {
    /// Runs the command against `editor`.
    ///
    /// `click` needs the editor to have been laid out since its last change.
    pub fn apply(&self, editor: &mut Editor) -> Result<EditStatus, VlakeError> {
        match self {
            Self::Add(direction) => editor.insert(*direction),
            Self::Text(text) => editor.set_text(text),
            Self::Connective(key) => editor.set_connective(key),
            Self::Line(style) => editor.set_line_style(*style),
            Self::Annotate(side, text) => editor.set_annotation(*side, text),
            Self::ToggleBox => editor.toggle_box(),
            Self::Select(target) => Ok(match target {
                SelectTarget::Root => editor.select_root(),
                SelectTarget::Parent => editor.select_parent(),
                SelectTarget::None => editor.select(None),
                SelectTarget::Child(index) => editor.select_child(*index),
                SelectTarget::Connective(index) => editor.select_connective(*index),
            }),
            Self::Click(point) => editor.click(*point).map(|_| EditStatus::Applied),
            Self::Copy => Ok(editor.copy()),
            Self::Paste => editor.paste(),
            Self::Delete { confirmed } => editor.remove(*confirmed),
            Self::Reset { confirmed } => Ok(editor.reset(*confirmed)),
        }
    }

    /// The command keyword, as written in scripts.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Text(_) => "text",
            Self::Connective(_) => "connective",
            Self::Line(_) => "line",
            Self::Annotate(..) => "annotate",
            Self::ToggleBox => "box",
            Self::Select(_) => "select",
            Self::Click(_) => "click",
            Self::Copy => "copy",
            Self::Paste => "paste",
            Self::Delete { confirmed: false } => "delete",
            Self::Delete { confirmed: true } => "delete!",
            Self::Reset { confirmed: false } => "reset",
            Self::Reset { confirmed: true } => "reset!",
        }
    }
}

/// Writes the command back in script syntax.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())?;
        match self {
            Self::Add(direction) => write!(f, " {direction}"),
            Self::Text(text) if text.is_empty() => Ok(()),
            Self::Text(text) => write!(f, " {}", quote(text)),
            Self::Connective(key) => write!(f, " {key}"),
            Self::Line(style) => write!(f, " {style}"),
            Self::Annotate(side, text) => write!(f, " {side} {}", quote(text)),
            Self::Select(target) => write!(f, " {target}"),
            Self::Click(point) => write!(f, " {} {}", point.x(), point.y()),
            Self::ToggleBox
            | Self::Copy
            | Self::Paste
            | Self::Delete { .. }
            | Self::Reset { .. } => Ok(()),
        }
    }
}

fn quote(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
