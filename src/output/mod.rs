// Output formatting — the document-topic table, its styling, and terminal display.

pub mod style;
pub mod table;
pub mod terminal;

pub use style::{cell_style, print_doc_topic_distribution, CellColor, CellStyle, StyledTable};
pub use table::{lda_output_to_dataframe, DocTopicRow, DocTopicTable};

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Counts characters, not bytes, so CJK text never gets cut mid code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
