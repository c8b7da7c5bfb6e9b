// Document-topic table — the LDA output as labeled rows with a dominant topic.
//
// Rows are `Doc0..DocN-1`, columns `Topic0..TopicK-1` plus `dominant_topic`.
// Values are rounded to five decimals before they are stored, and the
// dominant topic is computed from the stored (rounded) values, so two topics
// that round to the same probability resolve to the lower index.

use anyhow::Result;
use ndarray::{s, Array2};
use serde::Serialize;

/// Name of the extra column holding each row's argmax topic.
pub const DOMINANT_TOPIC_COLUMN: &str = "dominant_topic";

/// Decimal places kept in the table.
pub const ROUND_DECIMALS: i32 = 5;

/// Labeled documents × topics table.
#[derive(Debug, Clone, PartialEq)]
pub struct DocTopicTable {
    pub doc_names: Vec<String>,
    pub topic_names: Vec<String>,
    /// Rounded probabilities, documents × topics
    pub values: Array2<f64>,
    pub dominant_topic: Vec<usize>,
}

/// One table row, detached from the matrix for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocTopicRow {
    pub doc: String,
    pub topics: Vec<f64>,
    pub dominant_topic: usize,
}

/// Round half to even at `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

/// Index of the first maximum. Empty input yields 0.
pub fn argmax_first<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (i, &v) in values.into_iter().enumerate() {
        if v > best_value {
            best = i;
            best_value = v;
        }
    }
    best
}

impl DocTopicTable {
    /// Build the table from a documents × topics distribution matrix.
    pub fn from_distribution(lda_output: &Array2<f64>) -> Self {
        let (num_docs, num_topics) = lda_output.dim();
        let values = lda_output.mapv(|v| round_to(v, ROUND_DECIMALS));
        let dominant_topic = values.outer_iter().map(|row| argmax_first(row.iter())).collect();

        Self {
            doc_names: (0..num_docs).map(|i| format!("Doc{i}")).collect(),
            topic_names: (0..num_topics).map(|i| format!("Topic{i}")).collect(),
            values,
            dominant_topic,
        }
    }

    pub fn num_docs(&self) -> usize {
        self.doc_names.len()
    }

    pub fn num_topics(&self) -> usize {
        self.topic_names.len()
    }

    /// Column labels: the topics followed by `dominant_topic`.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = self.topic_names.clone();
        columns.push(DOMINANT_TOPIC_COLUMN.to_string());
        columns
    }

    /// The first `n` rows, in order. Asking for more rows than exist
    /// returns the whole table.
    pub fn head(&self, n: usize) -> Self {
        let n = n.min(self.num_docs());
        Self {
            doc_names: self.doc_names[..n].to_vec(),
            topic_names: self.topic_names.clone(),
            values: self.values.slice(s![..n, ..]).to_owned(),
            dominant_topic: self.dominant_topic[..n].to_vec(),
        }
    }

    pub fn row(&self, i: usize) -> Option<DocTopicRow> {
        if i >= self.num_docs() {
            return None;
        }
        Some(DocTopicRow {
            doc: self.doc_names[i].clone(),
            topics: self.values.row(i).to_vec(),
            dominant_topic: self.dominant_topic[i],
        })
    }

    pub fn rows(&self) -> Vec<DocTopicRow> {
        (0..self.num_docs()).filter_map(|i| self.row(i)).collect()
    }

    /// Number of documents whose dominant topic is each topic.
    pub fn dominant_topic_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.num_topics()];
        for &t in &self.dominant_topic {
            if let Some(c) = counts.get_mut(t) {
                *c += 1;
            }
        }
        counts
    }

    /// Serialize the rows as a pretty-printed JSON array.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.rows())?)
    }
}

/// Convert an LDA document-topic matrix into a labeled table.
pub fn lda_output_to_dataframe(lda_output: &Array2<f64>) -> DocTopicTable {
    DocTopicTable::from_distribution(lda_output)
}
