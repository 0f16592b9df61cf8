use crate::modules::shared::{RenderContext, Style};

pub(crate) struct Cell {
    text: String,
    style: Style,
}

impl Cell {
    pub(crate) fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub(crate) fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::Plain)
    }
}

/// Column-aligned rows. Widths are measured before colouring.
pub(crate) fn render_table(ctx: &RenderContext, headers: &[&str], rows: &[Vec<Cell>]) -> String {
    let columns = headers
        .len()
        .max(rows.iter().map(Vec::len).max().unwrap_or(0));
    let mut widths = vec![0usize; columns];
    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = header.chars().count();
    }
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.text.chars().count());
        }
    }

    let mut out = String::new();
    if !headers.is_empty() {
        let line = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| pad(&header.to_uppercase(), widths[idx]))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    for row in rows {
        let line = row
            .iter()
            .enumerate()
            .map(|(idx, cell)| ctx.paint(&pad(&cell.text, widths[idx]), cell.style))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}
