// End-to-end analysis: corpus files → token strings → counts → LDA → table.
//
// Each stage's output is kept on the returned Analysis so callers can print
// top words, render the table, or export either without re-running anything.

use anyhow::{Context, Result};
use ndarray::Array2;
use tracing::info;

use crate::config::Config;
use crate::corpus::{load_corpus, Corpus, LoadOptions, NoiseFilter};
use crate::output::table::DocTopicTable;
use crate::topics::{CountVectorizer, LdaModel, LdaParams, TermCounts};

/// Everything one run produces.
#[derive(Debug)]
pub struct Analysis {
    pub corpus: Corpus,
    pub counts: TermCounts,
    pub model: LdaModel,
    /// Documents × topics distribution, unrounded
    pub doc_topic: Array2<f64>,
    pub table: DocTopicTable,
}

/// Loader options derived from the config.
pub fn load_options(config: &Config) -> LoadOptions {
    let filter = if config.extra_noise.is_empty() {
        NoiseFilter::default()
    } else {
        NoiseFilter::with_extra(config.extra_noise.iter().copied())
    };
    LoadOptions {
        text_field: config.text_field.clone(),
        filter,
    }
}

/// LDA parameters derived from the config.
pub fn lda_params(config: &Config) -> LdaParams {
    LdaParams {
        num_topics: config.num_topics,
        iterations: config.iterations,
        seed: config.seed,
        ..LdaParams::default()
    }
}

/// Run the full pipeline. `show_progress` draws a progress bar while sampling.
pub fn run(config: &Config, show_progress: bool) -> Result<Analysis> {
    config.validate()?;

    let corpus = load_corpus(&config.pattern, &load_options(config))?;

    let vectorizer = CountVectorizer {
        max_features: config.max_features,
        ..CountVectorizer::default()
    };
    let counts = vectorizer
        .fit_transform(&corpus.documents)
        .with_context(|| format!("Failed to vectorize corpus from {}", config.pattern))?;

    let params = lda_params(config);
    let (model, doc_topic) = if show_progress {
        LdaModel::fit_transform_with_progress(&counts.matrix, &params)?
    } else {
        LdaModel::fit_transform(&counts.matrix, &params)?
    };

    let table = DocTopicTable::from_distribution(&doc_topic);
    info!(
        documents = table.num_docs(),
        topics = table.num_topics(),
        "Analysis complete"
    );

    Ok(Analysis {
        corpus,
        counts,
        model,
        doc_topic,
        table,
    })
}
