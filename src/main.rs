use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use poem_topics::config::Config;
use poem_topics::corpus::load_corpus;
use poem_topics::output::{print_doc_topic_distribution, terminal};
use poem_topics::pipeline::{self, analysis::load_options};
use poem_topics::topics::print_topic_top_words;

/// poem-topics: LDA topic modeling over classical poem corpora.
///
/// Loads JSON poem files, strips punctuation and noise characters, fits a
/// topic model, and prints each topic's top words and a per-document
/// topic table.
#[derive(Parser)]
#[command(name = "poem-topics", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit a topic model and print top words and the document-topic table
    Analyze {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Number of LDA topics
        #[arg(long)]
        num_topics: Option<usize>,

        /// Words shown per topic
        #[arg(long)]
        num_top_words: Option<usize>,

        /// Rows shown in the document-topic table
        #[arg(long)]
        max_docs: Option<usize>,

        /// Vocabulary cap (0 = unbounded)
        #[arg(long)]
        max_features: Option<usize>,

        /// Gibbs sampling sweeps
        #[arg(long)]
        iterations: Option<usize>,

        /// Sampler seed
        #[arg(long)]
        seed: Option<u64>,

        /// Also write the styled table as HTML to this path
        #[arg(long)]
        html: Option<PathBuf>,

        /// Also write the full document-topic table as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Load the corpus and report kept and skipped records
    Corpus {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
}

#[derive(Args)]
struct CorpusArgs {
    /// Glob pattern selecting the corpus JSON files
    #[arg(long)]
    pattern: Option<String>,

    /// Record field holding the list of paragraphs
    #[arg(long)]
    text_field: Option<String>,
}

impl CorpusArgs {
    fn apply(self, config: &mut Config) {
        if let Some(pattern) = self.pattern {
            config.pattern = pattern;
        }
        if let Some(text_field) = self.text_field {
            config.text_field = text_field;
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("poem_topics=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;

    match cli.command {
        Commands::Analyze {
            corpus,
            num_topics,
            num_top_words,
            max_docs,
            max_features,
            iterations,
            seed,
            html,
            json,
        } => {
            corpus.apply(&mut config);
            if let Some(n) = num_topics {
                config.num_topics = n;
            }
            if let Some(n) = num_top_words {
                config.num_top_words = n;
            }
            if let Some(n) = max_docs {
                config.max_docs = n;
            }
            if let Some(n) = max_features {
                config.max_features = (n > 0).then_some(n);
            }
            if let Some(n) = iterations {
                config.iterations = n;
            }
            if let Some(s) = seed {
                config.seed = s;
            }

            println!("Loading corpus from {}...", config.pattern);
            let analysis = pipeline::run(&config, true)?;

            terminal::display_corpus_summary(&analysis.corpus);

            println!(
                "\n{}",
                format!("=== Top {} words per topic ===", config.num_top_words).bold()
            );
            print_topic_top_words(
                &analysis.model,
                analysis.counts.feature_names(),
                config.num_top_words,
            );

            let styled = print_doc_topic_distribution(&analysis.table, config.max_docs);
            terminal::display_doc_topic_table(&styled, analysis.table.num_docs());
            terminal::display_dominant_topics(&analysis.table);

            if let Some(path) = html {
                fs::write(&path, styled.to_html())
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(path = %path.display(), "Wrote HTML table");
                println!("\n{}", format!("HTML table saved to: {}", path.display()).bold());
            }

            if let Some(path) = json {
                fs::write(&path, analysis.table.to_json()?)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(path = %path.display(), "Wrote JSON table");
                println!("{}", format!("JSON table saved to: {}", path.display()).bold());
            }
        }

        Commands::Corpus { corpus } => {
            corpus.apply(&mut config);
            config.validate_corpus()?;

            let loaded = load_corpus(&config.pattern, &load_options(&config))?;
            terminal::display_corpus_summary(&loaded);
            terminal::display_skipped_records(&loaded.skipped);
        }
    }

    Ok(())
}
