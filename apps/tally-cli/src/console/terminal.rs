//! Line-oriented terminal over any reader/writer pair.
//!
//! Production wires it to stdin/stdout; tests feed a scripted `&[u8]` and
//! capture the transcript in a `Vec<u8>`.

use std::io::{self, BufRead, Write};

use tracing::warn;

use super::render::{render_panel, render_table};
use super::{MessageKind, Presenter, Prompter, Table};

pub struct TextTerminal<R, W> {
    input: R,
    output: W,
}

impl TextTerminal<io::StdinLock<'static>, io::Stdout> {
    /// Terminal bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        TextTerminal::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TextTerminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = self
            .output
            .write_all(text.as_bytes())
            .and_then(|_| self.output.flush())
        {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<R: BufRead, W: Write> Prompter for TextTerminal<R, W> {
    fn prompt(&mut self, label: &str) -> Option<String> {
        self.write(&format!("{label}: "));

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => {
                self.write("\n");
                None
            }
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                warn!(error = %e, "Failed to read from terminal");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> Presenter for TextTerminal<R, W> {
    fn panel(&mut self, title: &str, body: &str, kind: MessageKind) {
        let text = render_panel(title, body, kind);
        self.write(&text);
    }

    fn table(&mut self, table: &Table) {
        let text = render_table(table);
        self.write(&text);
    }
}
