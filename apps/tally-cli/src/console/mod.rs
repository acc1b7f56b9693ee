//! # Console
//!
//! The two seams between the flows and the terminal.
//!
//! ```text
//! ┌──────────────┐   prompt(label) -> Option<String>   ┌───────────────────┐
//! │              │ ◄────────────────────────────────── │                   │
//! │   Terminal   │                                     │  router / flows   │
//! │              │ ◄── panel(title, body, kind) ────── │                   │
//! │              │ ◄── table(&Table) ───────────────── │                   │
//! └──────────────┘                                     └───────────────────┘
//! ```
//!
//! `None` from a prompt means the input stream ended; callers treat it the
//! same as `exit`.

mod render;
mod terminal;

pub use render::{render_panel, render_table};
pub use terminal::TextTerminal;

/// Reads one line of operator input.
pub trait Prompter {
    /// Shows `label` and returns the trimmed reply, or `None` at end of input.
    fn prompt(&mut self, label: &str) -> Option<String>;
}

/// Shows output to the operator.
pub trait Presenter {
    fn panel(&mut self, title: &str, body: &str, kind: MessageKind);

    fn table(&mut self, table: &Table);

    fn info(&mut self, title: &str, body: &str) {
        self.panel(title, body, MessageKind::Info);
    }

    fn success(&mut self, title: &str, body: &str) {
        self.panel(title, body, MessageKind::Success);
    }

    fn error(&mut self, body: &str) {
        self.panel("Error", body, MessageKind::Error);
    }
}

/// Both halves of the terminal.
pub trait Terminal: Prompter + Presenter {}

impl<T: Prompter + Presenter + ?Sized> Terminal for T {}

/// Tone of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

impl MessageKind {
    fn marker(&self) -> &'static str {
        match self {
            MessageKind::Info => "",
            MessageKind::Success => "✓ ",
            MessageKind::Warning => "! ",
            MessageKind::Error => "✗ ",
        }
    }
}

// =============================================================================
// Table
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub header: String,
    pub align: Align,
}

/// A titled grid of text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn column(mut self, header: impl Into<String>, align: Align) -> Self {
        self.columns.push(Column {
            header: header.into(),
            align,
        });
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}
