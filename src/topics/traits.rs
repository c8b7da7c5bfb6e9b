// Topic model trait — the seam between fitting and reporting.
//
// Reporting only needs the topic-term weights and a way to map count rows to
// topic distributions, so anything that can provide those can stand in for
// the Gibbs-sampled LDA.

use anyhow::Result;
use ndarray::Array2;

/// A fitted topic model over a fixed vocabulary.
pub trait TopicModel {
    /// Number of topics the model was built with.
    fn num_topics(&self) -> usize;

    /// Topic-term weight matrix (topics × vocabulary). Rows need not be
    /// normalized; larger means more characteristic of the topic.
    fn components(&self) -> &Array2<f64>;

    /// Map a documents × vocabulary count matrix to a documents × topics
    /// distribution whose rows sum to 1.
    fn transform(&self, counts: &Array2<u32>) -> Result<Array2<f64>>;
}
