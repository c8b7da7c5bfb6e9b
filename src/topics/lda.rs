// Latent Dirichlet Allocation via collapsed Gibbs sampling.
//
// Fitting resamples the topic of every token position given all others:
//
//   p(z = t) ∝ (n_dt + α) · (n_tw + β) / (n_t + V·β)
//
// The fitted model keeps the topic-term pseudo-counts (n_tw + β) as its
// components. New documents are folded in by sampling their token topics
// against the fixed, normalized topic-term distribution.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::{Array2, ArrayView1, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::traits::TopicModel;

/// Hyper-parameters for fitting.
#[derive(Debug, Clone)]
pub struct LdaParams {
    pub num_topics: usize,
    /// Dirichlet prior on document-topic distributions (default 1/K)
    pub doc_topic_prior: Option<f64>,
    /// Dirichlet prior on topic-term distributions (default 1/K)
    pub topic_word_prior: Option<f64>,
    /// Gibbs sweeps over the training corpus
    pub iterations: usize,
    /// Gibbs sweeps per document when folding in with `transform`
    pub transform_iterations: usize,
    pub seed: u64,
}

impl Default for LdaParams {
    fn default() -> Self {
        Self {
            num_topics: 10,
            doc_topic_prior: None,
            topic_word_prior: None,
            iterations: 50,
            transform_iterations: 20,
            seed: 0,
        }
    }
}

impl LdaParams {
    pub fn with_topics(num_topics: usize) -> Self {
        Self {
            num_topics,
            ..Self::default()
        }
    }

    fn alpha(&self) -> f64 {
        self.doc_topic_prior.unwrap_or(1.0 / self.num_topics as f64)
    }

    fn beta(&self) -> f64 {
        self.topic_word_prior.unwrap_or(1.0 / self.num_topics as f64)
    }
}

/// A fitted LDA model.
#[derive(Debug, Clone)]
pub struct LdaModel {
    num_topics: usize,
    alpha: f64,
    beta: f64,
    transform_iterations: usize,
    seed: u64,
    /// n_tw + β, topics × vocabulary
    components: Array2<f64>,
}

/// Sampler state for one fitting run.
struct GibbsState {
    docs: Vec<Vec<usize>>,
    z: Vec<Vec<usize>>,
    ndk: Array2<u32>,
    nkw: Array2<u32>,
    nk: Vec<u32>,
}

impl LdaModel {
    /// Fit a model to a documents × vocabulary count matrix.
    pub fn fit(counts: &Array2<u32>, params: &LdaParams) -> Result<Self> {
        let (model, _) = Self::gibbs(counts, params, &ProgressBar::hidden())?;
        Ok(model)
    }

    /// Fit and return the topic distribution of the training documents.
    pub fn fit_transform(
        counts: &Array2<u32>,
        params: &LdaParams,
    ) -> Result<(Self, Array2<f64>)> {
        Self::gibbs(counts, params, &ProgressBar::hidden())
    }

    /// `fit_transform` with a terminal progress bar ticking once per sweep.
    pub fn fit_transform_with_progress(
        counts: &Array2<u32>,
        params: &LdaParams,
    ) -> Result<(Self, Array2<f64>)> {
        let pb = ProgressBar::new(params.iterations as u64);
        pb.set_style(
            ProgressStyle::default_bar().template("  Sampling [{bar:30}] {pos}/{len} ({eta})")?,
        );
        let result = Self::gibbs(counts, params, &pb);
        pb.finish_and_clear();
        result
    }

    fn gibbs(
        counts: &Array2<u32>,
        params: &LdaParams,
        pb: &ProgressBar,
    ) -> Result<(Self, Array2<f64>)> {
        let k = params.num_topics;
        if k == 0 {
            anyhow::bail!("LDA needs at least one topic");
        }
        let (num_docs, vocab_size) = counts.dim();
        if num_docs == 0 {
            anyhow::bail!("Cannot fit LDA on an empty corpus");
        }
        if vocab_size == 0 {
            anyhow::bail!("Cannot fit LDA with an empty vocabulary");
        }

        let alpha = params.alpha();
        let beta = params.beta();
        let mut rng = StdRng::seed_from_u64(params.seed);

        let mut state = GibbsState::init(counts, k, &mut rng);
        let tokens: usize = state.docs.iter().map(Vec::len).sum();
        info!(
            documents = num_docs,
            vocabulary = vocab_size,
            tokens,
            topics = k,
            iterations = params.iterations,
            "Fitting LDA"
        );

        let vb = vocab_size as f64 * beta;
        let mut weights = vec![0.0f64; k];

        for it in 0..params.iterations {
            for d in 0..state.docs.len() {
                for pos in 0..state.docs[d].len() {
                    let w = state.docs[d][pos];
                    let old = state.z[d][pos];

                    state.ndk[[d, old]] -= 1;
                    state.nkw[[old, w]] -= 1;
                    state.nk[old] -= 1;

                    for (t, weight) in weights.iter_mut().enumerate() {
                        let left = state.ndk[[d, t]] as f64 + alpha;
                        let right = (state.nkw[[t, w]] as f64 + beta) / (state.nk[t] as f64 + vb);
                        *weight = left * right;
                    }

                    let new = sample(&weights, &mut rng);
                    state.z[d][pos] = new;
                    state.ndk[[d, new]] += 1;
                    state.nkw[[new, w]] += 1;
                    state.nk[new] += 1;
                }
            }

            pb.inc(1);
            if (it + 1) % 10 == 0 {
                debug!(iteration = it + 1, total = params.iterations, "Gibbs sweep");
            }
        }

        let components = state.nkw.mapv(|c| c as f64 + beta);
        let doc_topic = doc_topic_from_counts(&state.ndk, &state.docs, alpha);

        let model = Self {
            num_topics: k,
            alpha,
            beta,
            transform_iterations: params.transform_iterations,
            seed: params.seed,
            components,
        };
        Ok((model, doc_topic))
    }

    /// Vocabulary size the model was fitted on.
    pub fn vocabulary_size(&self) -> usize {
        self.components.ncols()
    }

    pub fn doc_topic_prior(&self) -> f64 {
        self.alpha
    }

    pub fn topic_word_prior(&self) -> f64 {
        self.beta
    }

    /// Row-normalized components: each topic's distribution over terms.
    pub fn topic_word_distribution(&self) -> Array2<f64> {
        let mut phi = self.components.clone();
        for mut row in phi.axis_iter_mut(Axis(0)) {
            let total = row.sum();
            if total > 0.0 {
                row /= total;
            }
        }
        phi
    }

    fn fold_in(&self, row: ArrayView1<u32>, phi: &Array2<f64>, rng: &mut StdRng) -> Vec<f64> {
        let k = self.num_topics;
        let tokens = expand_row(row);
        if tokens.is_empty() {
            return vec![1.0 / k as f64; k];
        }

        let mut ndk = vec![0u32; k];
        let mut z: Vec<usize> = Vec::with_capacity(tokens.len());
        for _ in &tokens {
            let t = rng.random_range(0..k);
            ndk[t] += 1;
            z.push(t);
        }

        let mut weights = vec![0.0f64; k];
        for _ in 0..self.transform_iterations {
            for (pos, &w) in tokens.iter().enumerate() {
                ndk[z[pos]] -= 1;
                for (t, weight) in weights.iter_mut().enumerate() {
                    *weight = (ndk[t] as f64 + self.alpha) * phi[[t, w]];
                }
                let new = sample(&weights, rng);
                z[pos] = new;
                ndk[new] += 1;
            }
        }

        let denom = tokens.len() as f64 + k as f64 * self.alpha;
        ndk.iter().map(|&n| (n as f64 + self.alpha) / denom).collect()
    }
}

impl TopicModel for LdaModel {
    fn num_topics(&self) -> usize {
        self.num_topics
    }

    fn components(&self) -> &Array2<f64> {
        &self.components
    }

    fn transform(&self, counts: &Array2<u32>) -> Result<Array2<f64>> {
        if counts.ncols() != self.vocabulary_size() {
            anyhow::bail!(
                "Count matrix has {} terms but the model was fitted on {}",
                counts.ncols(),
                self.vocabulary_size()
            );
        }

        let phi = self.topic_word_distribution();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut out = Array2::<f64>::zeros((counts.nrows(), self.num_topics));
        for (d, row) in counts.axis_iter(Axis(0)).enumerate() {
            let theta = self.fold_in(row, &phi, &mut rng);
            for (t, p) in theta.into_iter().enumerate() {
                out[[d, t]] = p;
            }
        }
        Ok(out)
    }
}

impl GibbsState {
    /// Expand counts into token positions and assign random initial topics.
    fn init(counts: &Array2<u32>, k: usize, rng: &mut StdRng) -> Self {
        let (num_docs, vocab_size) = counts.dim();
        let docs: Vec<Vec<usize>> = counts.axis_iter(Axis(0)).map(expand_row).collect();

        let mut ndk = Array2::<u32>::zeros((num_docs, k));
        let mut nkw = Array2::<u32>::zeros((k, vocab_size));
        let mut nk = vec![0u32; k];
        let mut z = Vec::with_capacity(num_docs);

        for (d, doc) in docs.iter().enumerate() {
            let mut assignments = Vec::with_capacity(doc.len());
            for &w in doc {
                let t = rng.random_range(0..k);
                ndk[[d, t]] += 1;
                nkw[[t, w]] += 1;
                nk[t] += 1;
                assignments.push(t);
            }
            z.push(assignments);
        }

        Self {
            docs,
            z,
            ndk,
            nkw,
            nk,
        }
    }
}

/// θ[d][t] = (n_dt + α) / (N_d + K·α). Empty documents come out uniform.
fn doc_topic_from_counts(ndk: &Array2<u32>, docs: &[Vec<usize>], alpha: f64) -> Array2<f64> {
    let k = ndk.ncols();
    let mut theta = Array2::<f64>::zeros(ndk.dim());
    for (d, doc) in docs.iter().enumerate() {
        let denom = doc.len() as f64 + k as f64 * alpha;
        for t in 0..k {
            theta[[d, t]] = (ndk[[d, t]] as f64 + alpha) / denom;
        }
    }
    theta
}

/// One entry per token occurrence: term `w` repeated `count` times.
fn expand_row(row: ArrayView1<u32>) -> Vec<usize> {
    row.iter()
        .enumerate()
        .flat_map(|(w, &count)| std::iter::repeat(w).take(count as usize))
        .collect()
}

/// Draw an index proportionally to non-negative weights.
fn sample(weights: &[f64], rng: &mut StdRng) -> usize {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return rng.random_range(0..weights.len());
    }

    let mut u = rng.random::<f64>() * total;
    for (i, &w) in weights.iter().enumerate() {
        if u < w {
            return i;
        }
        u -= w;
    }
    weights.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn two_theme_counts() -> Array2<u32> {
        // Terms 0-2 only ever co-occur with each other, terms 3-5 likewise
        array![
            [5, 4, 3, 0, 0, 0],
            [4, 5, 4, 0, 0, 0],
            [3, 4, 5, 0, 0, 0],
            [0, 0, 0, 5, 4, 3],
            [0, 0, 0, 4, 5, 4],
            [0, 0, 0, 3, 4, 5],
        ]
    }

    #[test]
    fn test_rows_sum_to_one() {
        let params = LdaParams {
            num_topics: 3,
            iterations: 20,
            ..LdaParams::default()
        };
        let (_model, theta) = LdaModel::fit_transform(&two_theme_counts(), &params).unwrap();
        assert_eq!(theta.dim(), (6, 3));
        for row in theta.axis_iter(Axis(0)) {
            assert!((row.sum() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_components_shape_and_prior() {
        let params = LdaParams::with_topics(2);
        let model = LdaModel::fit(&two_theme_counts(), &params).unwrap();
        assert_eq!(model.components().dim(), (2, 6));
        assert!((model.topic_word_prior() - 0.5).abs() < 1e-12);
        // Every token lands in exactly one topic
        let total: f64 = model.components().sum() - 0.5 * 12.0;
        assert!((total - two_theme_counts().sum() as f64).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let params = LdaParams {
            num_topics: 2,
            iterations: 15,
            seed: 7,
            ..LdaParams::default()
        };
        let (a, ta) = LdaModel::fit_transform(&two_theme_counts(), &params).unwrap();
        let (b, tb) = LdaModel::fit_transform(&two_theme_counts(), &params).unwrap();
        assert_eq!(a.components(), b.components());
        assert_eq!(ta, tb);
    }

    #[test]
    fn test_transform_empty_row_is_uniform() {
        let model = LdaModel::fit(&two_theme_counts(), &LdaParams::with_topics(4)).unwrap();
        let empty = Array2::<u32>::zeros((1, 6));
        let theta = model.transform(&empty).unwrap();
        for t in 0..4 {
            assert!((theta[[0, t]] - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_transform_rejects_wrong_width() {
        let model = LdaModel::fit(&two_theme_counts(), &LdaParams::with_topics(2)).unwrap();
        assert!(model.transform(&Array2::<u32>::zeros((1, 5))).is_err());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(LdaModel::fit(&two_theme_counts(), &LdaParams::with_topics(0)).is_err());
        assert!(LdaModel::fit(&Array2::<u32>::zeros((0, 3)), &LdaParams::default()).is_err());
        assert!(LdaModel::fit(&Array2::<u32>::zeros((2, 0)), &LdaParams::default()).is_err());
    }

    #[test]
    fn test_sample_zero_weights_falls_back() {
        let mut rng = StdRng::seed_from_u64(1);
        let i = sample(&[0.0, 0.0, 0.0], &mut rng);
        assert!(i < 3);
        assert_eq!(sample(&[0.0, 1.0, 0.0], &mut rng), 1);
    }
}
