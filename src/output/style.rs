// Cell emphasis for the document-topic table.
//
// Any numeric cell strictly above 0.1 is shown green and bold, everything
// else black at normal weight. The rule is a pure function of the value and
// never touches the table's data; renderers ask it for a style per cell.

use colored::Colorize;

use super::table::DocTopicTable;

/// Values strictly greater than this are emphasized.
pub const EMPHASIS_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellColor {
    Green,
    Black,
}

impl CellColor {
    pub fn css_name(&self) -> &'static str {
        match self {
            CellColor::Green => "green",
            CellColor::Black => "black",
        }
    }
}

/// Presentation attributes of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub color: CellColor,
    /// CSS font weight: 700 bold, 400 normal
    pub font_weight: u16,
}

impl CellStyle {
    pub fn is_emphasized(&self) -> bool {
        self.color == CellColor::Green
    }

    /// Inline CSS, e.g. `color: green; font-weight: 700`.
    pub fn css(&self) -> String {
        format!(
            "color: {}; font-weight: {}",
            self.color.css_name(),
            self.font_weight
        )
    }
}

/// Style for a numeric cell value.
pub fn cell_style(value: f64) -> CellStyle {
    if value > EMPHASIS_THRESHOLD {
        CellStyle {
            color: CellColor::Green,
            font_weight: 700,
        }
    } else {
        CellStyle {
            color: CellColor::Black,
            font_weight: 400,
        }
    }
}

/// A table with a style attached to every numeric cell, including the
/// `dominant_topic` column.
#[derive(Debug, Clone)]
pub struct StyledTable {
    pub table: DocTopicTable,
}

impl StyledTable {
    pub fn new(table: DocTopicTable) -> Self {
        Self { table }
    }

    /// Style for row `row`, column `col`; `col == num_topics` addresses the
    /// dominant topic column. Out-of-range cells get `None`.
    pub fn style(&self, row: usize, col: usize) -> Option<CellStyle> {
        if row >= self.table.num_docs() {
            return None;
        }
        let k = self.table.num_topics();
        if col < k {
            Some(cell_style(self.table.values[[row, col]]))
        } else if col == k {
            Some(cell_style(self.table.dominant_topic[row] as f64))
        } else {
            None
        }
    }

    /// Cell text for row `row`, column `col` (same addressing as `style`).
    fn cell_text(&self, row: usize, col: usize) -> String {
        if col < self.table.num_topics() {
            format!("{:.5}", self.table.values[[row, col]])
        } else {
            self.table.dominant_topic[row].to_string()
        }
    }

    /// Render for an ANSI terminal. Black cells use the terminal's default
    /// foreground so they stay readable on dark backgrounds.
    pub fn render_terminal(&self) -> String {
        let columns = self.table.columns();
        let widths: Vec<usize> = columns.iter().map(|c| c.len().max(7)).collect();
        let label_width = self
            .table
            .doc_names
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max(3);

        let mut out = String::new();
        out.push_str(&" ".repeat(label_width));
        for (name, &width) in columns.iter().zip(&widths) {
            out.push_str(&format!("  {}", format!("{name:>width$}").dimmed()));
        }
        out.push('\n');

        for row in 0..self.table.num_docs() {
            let label = &self.table.doc_names[row];
            out.push_str(&format!("{label:<label_width$}"));
            for (col, &width) in widths.iter().enumerate() {
                let text = format!("{:>width$}", self.cell_text(row, col));
                let painted = match self.style(row, col) {
                    Some(style) if style.is_emphasized() => text.green().bold(),
                    _ => text.normal(),
                };
                out.push_str(&format!("  {painted}"));
            }
            out.push('\n');
        }
        out
    }

    /// Render as an HTML table with inline CSS per cell, for notebook-style
    /// viewers.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<table>\n  <thead>\n    <tr><th></th>");
        for name in self.table.columns() {
            html.push_str(&format!("<th>{name}</th>"));
        }
        html.push_str("</tr>\n  </thead>\n  <tbody>\n");

        for row in 0..self.table.num_docs() {
            html.push_str(&format!("    <tr><th>{}</th>", self.table.doc_names[row]));
            for col in 0..=self.table.num_topics() {
                let css = self.style(row, col).map(|s| s.css()).unwrap_or_default();
                html.push_str(&format!(
                    "<td style=\"{css}\">{}</td>",
                    self.cell_text(row, col)
                ));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("  </tbody>\n</table>\n");
        html
    }
}

/// The first `max_docs` rows of `table` with the emphasis rule applied.
pub fn print_doc_topic_distribution(table: &DocTopicTable, max_docs: usize) -> StyledTable {
    StyledTable::new(table.head(max_docs))
}
