// Colored terminal output for corpus summaries and topic reports.
//
// This module handles the terminal-specific formatting; main.rs delegates
// here after each pipeline stage.

use colored::Colorize;

use super::style::StyledTable;
use super::table::DocTopicTable;
use crate::corpus::{Corpus, SkippedRecord};

/// Display how much of the corpus loaded and how much was skipped.
pub fn display_corpus_summary(corpus: &Corpus) {
    println!(
        "\n{}",
        format!("=== Corpus ({} files) ===", corpus.files_read).bold()
    );
    println!("  Records seen:   {}", corpus.records_seen());
    println!("  Documents kept: {}", corpus.len());

    let skipped = corpus.skipped.len();
    if skipped > 0 {
        println!("  Skipped:        {}", skipped.to_string().yellow());
    } else {
        println!("  Skipped:        {}", "0".green());
    }
}

/// Display the records that were skipped, one line each.
pub fn display_skipped_records(skipped: &[SkippedRecord]) {
    if skipped.is_empty() {
        return;
    }

    println!(
        "\n{}",
        format!("=== Skipped records ({}) ===", skipped.len()).bold()
    );
    for record in skipped {
        let preview = super::truncate_chars(&record.record.to_string(), 100);
        println!(
            "  {}#{} ({})",
            record.path.display(),
            record.index,
            record.reason.to_string().yellow()
        );
        println!("      {}", preview.dimmed());
    }
}

/// Display the styled head of the document-topic table.
pub fn display_doc_topic_table(styled: &StyledTable, total_docs: usize) {
    println!(
        "\n{}",
        format!(
            "=== Document topics (first {} of {} documents) ===",
            styled.table.num_docs(),
            total_docs
        )
        .bold()
    );
    println!();
    print!("{}", styled.render_terminal());
}

/// Display how many documents each topic dominates, as a bar chart.
pub fn display_dominant_topics(table: &DocTopicTable) {
    let counts = table.dominant_topic_counts();
    let total = table.num_docs().max(1) as f64;
    let bar_width: usize = 20;

    println!("\n{}", "=== Dominant topics ===".bold());
    println!();

    for (topic, &count) in counts.iter().enumerate() {
        let share = count as f64 / total;
        let filled = (share * bar_width as f64).round() as usize;
        let empty = bar_width.saturating_sub(filled);
        let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(empty));

        let colored_bar = if share >= 0.25 {
            bar.bright_green()
        } else if share >= 0.10 {
            bar.bright_yellow()
        } else {
            bar.bright_blue()
        };

        println!(
            "  {:<8} {} {:>6} ({:.1}%)",
            table.topic_names[topic].bold(),
            colored_bar,
            count,
            share * 100.0
        );
    }
}
