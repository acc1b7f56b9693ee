//! Plain-text rendering of panels and tables with box-drawing borders.
//!
//! ```text
//! ╭─ Sale Details ─────────╮      Receipt - Bill ID: 1
//! │ Product id: 2          │      ┌──────────────┬────────────┐
//! │ Store price: 18.00     │      │ Product Name │ Line Total │
//! ╰────────────────────────╯      ├──────────────┼────────────┤
//!                                 │ Pen          │      54.00 │
//!                                 └──────────────┴────────────┘
//! ```

use super::{Align, MessageKind, Table};

fn width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, to: usize, align: Align) -> String {
    let fill = " ".repeat(to.saturating_sub(width(text)));
    match align {
        Align::Left => format!("{text}{fill}"),
        Align::Right => format!("{fill}{text}"),
    }
}

/// Renders a bordered panel. Every line ends with a newline.
pub fn render_panel(title: &str, body: &str, kind: MessageKind) -> String {
    let heading = format!("{}{}", kind.marker(), title);
    let lines: Vec<&str> = body.lines().collect();
    let inner = lines
        .iter()
        .map(|l| width(l))
        .chain(std::iter::once(width(&heading) + 2))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "╭─ {heading} {}╮\n",
        "─".repeat(inner.saturating_sub(width(&heading) + 1))
    ));
    for line in &lines {
        out.push_str(&format!("│ {} │\n", pad(line, inner, Align::Left)));
    }
    out.push_str(&format!("╰{}╯\n", "─".repeat(inner + 2)));
    out
}

/// Renders a table with a header row. Missing cells render empty.
pub fn render_table(table: &Table) -> String {
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| width(cell))
                .chain(std::iter::once(width(&col.header)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = |left: &str, mid: &str, right: &str| -> String {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}\n", segments.join(mid))
    };

    let mut out = String::new();
    if let Some(title) = &table.title {
        out.push_str(title);
        out.push('\n');
    }

    out.push_str(&rule("┌", "┬", "┐"));
    let header: Vec<String> = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(col, w)| pad(&col.header, *w, Align::Left))
        .collect();
    out.push_str(&format!("│ {} │\n", header.join(" │ ")));
    out.push_str(&rule("├", "┼", "┤"));

    for row in &table.rows {
        let cells: Vec<String> = table
            .columns
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (col, w))| pad(row.get(i).map(String::as_str).unwrap_or(""), *w, col.align))
            .collect();
        out.push_str(&format!("│ {} │\n", cells.join(" │ ")));
    }
    out.push_str(&rule("└", "┴", "┘"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_layout() {
        let text = render_panel("Info", "short\na longer line", MessageKind::Info);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("╭─ Info "));
        assert_eq!(lines[1], "│ short         │");
        assert_eq!(lines[2], "│ a longer line │");
        assert_eq!(lines[3], "╰───────────────╯");
        // all rows share one width
        assert!(lines.iter().all(|l| l.chars().count() == lines[3].chars().count()));
    }

    #[test]
    fn test_error_panel_is_marked() {
        let text = render_panel("Error", "Invalid choice.", MessageKind::Error);
        assert!(text.starts_with("╭─ ✗ Error "));
    }

    #[test]
    fn test_table_alignment() {
        let mut table = Table::new()
            .titled("Receipt - Bill ID: 1")
            .column("Product Name", Align::Left)
            .column("Line Total", Align::Right);
        table.push_row(vec!["Pen".to_string(), "54.00".to_string()]);

        let text = render_table(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Receipt - Bill ID: 1");
        assert_eq!(lines[2], "│ Product Name │ Line Total │");
        assert_eq!(lines[4], "│ Pen          │      54.00 │");
        assert_eq!(lines.len(), 6);
    }
}
