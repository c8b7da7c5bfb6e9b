// Topic inspection — the highest-weighted terms of each topic.

use colored::Colorize;
use serde::Serialize;

use super::traits::TopicModel;

/// The top terms of one topic, highest weight first.
#[derive(Debug, Clone, Serialize)]
pub struct TopicWords {
    pub topic: usize,
    pub words: Vec<String>,
    pub weights: Vec<f64>,
}

/// Rank each topic's terms by weight and keep the first `num_top_words`.
///
/// Equal weights keep feature-index order; callers should not rely on it.
pub fn topic_top_words<M: TopicModel + ?Sized>(
    model: &M,
    feature_names: &[String],
    num_top_words: usize,
) -> Vec<TopicWords> {
    model
        .components()
        .outer_iter()
        .enumerate()
        .map(|(topic, weights)| {
            let mut ranked: Vec<(usize, f64)> = weights.iter().copied().enumerate().collect();
            ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
            ranked.truncate(num_top_words);

            let (words, weights): (Vec<String>, Vec<f64>) = ranked
                .into_iter()
                .filter_map(|(i, w)| feature_names.get(i).map(|name| (name.clone(), w)))
                .unzip();

            TopicWords {
                topic,
                words,
                weights,
            }
        })
        .collect()
}

/// Print `Topic N:` followed by its top words, one topic per line pair.
pub fn print_topic_top_words<M: TopicModel + ?Sized>(
    model: &M,
    feature_names: &[String],
    num_top_words: usize,
) {
    for topic in topic_top_words(model, feature_names, num_top_words) {
        println!("{}", format!("Topic {}:", topic.topic).bold());
        println!("{}", topic.words.join(" "));
    }
}
