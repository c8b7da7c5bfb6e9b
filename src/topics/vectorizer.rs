// Bag-of-words counting — token strings to a document-term count matrix.
//
// Tokens are regex matches over each document. The vocabulary is optionally
// capped to the most frequent terms across the corpus, and the surviving
// terms are indexed in sorted order so feature indexes are stable across runs.

use std::collections::HashMap;

use anyhow::{Context, Result};
use ndarray::Array2;
use regex_lite::Regex;
use tracing::info;

/// Default token pattern: any run of non-whitespace. Corpus documents are
/// already space-joined single characters, so this keeps one-character
/// tokens that a word-oriented pattern would drop.
///
/// regex-lite's `\S` is ASCII-only, so this pattern is not compiled: it
/// selects a Unicode whitespace split, which also drops U+3000 and U+00A0.
pub const DEFAULT_TOKEN_PATTERN: &str = r"\S+";

/// How documents are cut into tokens.
enum Tokenizer {
    /// Split on Unicode whitespace
    Whitespace,
    Pattern(Regex),
}

impl Tokenizer {
    fn tokens(&self, doc: &str) -> Vec<String> {
        match self {
            Tokenizer::Whitespace => doc.split_whitespace().map(str::to_string).collect(),
            Tokenizer::Pattern(re) => re.find_iter(doc).map(|m| m.as_str().to_string()).collect(),
        }
    }
}

/// A fitted vocabulary: terms in feature-index order plus a reverse lookup.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    fn from_sorted(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self { terms, index }
    }

    /// Terms in feature-index order.
    pub fn feature_names(&self) -> &[String] {
        &self.terms
    }

    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Documents × vocabulary count matrix with its vocabulary.
#[derive(Debug, Clone)]
pub struct TermCounts {
    pub matrix: Array2<u32>,
    pub vocabulary: Vocabulary,
}

impl TermCounts {
    pub fn feature_names(&self) -> &[String] {
        self.vocabulary.feature_names()
    }

    pub fn num_documents(&self) -> usize {
        self.matrix.nrows()
    }
}

/// Counting vectorizer configuration.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    /// Keep only this many of the most frequent terms (None = keep all)
    pub max_features: Option<usize>,
    /// Regex whose matches are the tokens
    pub token_pattern: String,
    /// Lowercase documents before tokenizing
    pub lowercase: bool,
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self {
            max_features: None,
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            lowercase: true,
        }
    }
}

impl CountVectorizer {
    pub fn with_max_features(max_features: usize) -> Self {
        Self {
            max_features: Some(max_features),
            ..Self::default()
        }
    }

    fn tokenizer(&self) -> Result<Tokenizer> {
        if self.token_pattern == DEFAULT_TOKEN_PATTERN {
            return Ok(Tokenizer::Whitespace);
        }
        let re = Regex::new(&self.token_pattern)
            .with_context(|| format!("Invalid token pattern: {}", self.token_pattern))?;
        Ok(Tokenizer::Pattern(re))
    }

    fn tokens(&self, tokenizer: &Tokenizer, doc: &str) -> Vec<String> {
        if self.lowercase {
            tokenizer.tokens(&doc.to_lowercase())
        } else {
            tokenizer.tokens(doc)
        }
    }

    /// Learn the vocabulary from a set of documents.
    pub fn fit<S: AsRef<str>>(&self, docs: &[S]) -> Result<Vocabulary> {
        let tokenizer = self.tokenizer()?;

        let mut totals: HashMap<String, u64> = HashMap::new();
        for doc in docs {
            for token in self.tokens(&tokenizer, doc.as_ref()) {
                *totals.entry(token).or_insert(0) += 1;
            }
        }

        if totals.is_empty() {
            anyhow::bail!(
                "Empty vocabulary: {} documents contain no tokens matching {}",
                docs.len(),
                self.token_pattern
            );
        }

        let mut ranked: Vec<(String, u64)> = totals.into_iter().collect();
        if let Some(limit) = self.max_features {
            // Most frequent first, ties by term so the cut is deterministic
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            ranked.truncate(limit);
        }

        let mut terms: Vec<String> = ranked.into_iter().map(|(t, _)| t).collect();
        terms.sort();

        info!(
            terms = terms.len(),
            max_features = ?self.max_features,
            "Vocabulary built"
        );

        Ok(Vocabulary::from_sorted(terms))
    }

    /// Count documents against an already fitted vocabulary.
    /// Terms outside the vocabulary are ignored.
    pub fn transform<S: AsRef<str>>(
        &self,
        docs: &[S],
        vocabulary: &Vocabulary,
    ) -> Result<Array2<u32>> {
        let tokenizer = self.tokenizer()?;
        let mut matrix = Array2::<u32>::zeros((docs.len(), vocabulary.len()));
        for (d, doc) in docs.iter().enumerate() {
            for token in self.tokens(&tokenizer, doc.as_ref()) {
                if let Some(j) = vocabulary.get(&token) {
                    matrix[[d, j]] += 1;
                }
            }
        }
        Ok(matrix)
    }

    pub fn fit_transform<S: AsRef<str>>(&self, docs: &[S]) -> Result<TermCounts> {
        let vocabulary = self.fit(docs)?;
        let matrix = self.transform(docs, &vocabulary)?;
        Ok(TermCounts { matrix, vocabulary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_transform_counts() {
        let docs = vec!["春 眠 春", "眠 晓"];
        let counts = CountVectorizer::default().fit_transform(&docs).unwrap();

        let names = counts.feature_names();
        assert_eq!(names.len(), 3);
        let chun = counts.vocabulary.get("春").unwrap();
        let mian = counts.vocabulary.get("眠").unwrap();
        let xiao = counts.vocabulary.get("晓").unwrap();

        assert_eq!(counts.matrix[[0, chun]], 2);
        assert_eq!(counts.matrix[[0, mian]], 1);
        assert_eq!(counts.matrix[[0, xiao]], 0);
        assert_eq!(counts.matrix[[1, xiao]], 1);
    }

    #[test]
    fn test_feature_names_sorted() {
        let docs = vec!["c a b", "b a"];
        let counts = CountVectorizer::default().fit_transform(&docs).unwrap();
        assert_eq!(counts.feature_names(), &["a", "b", "c"]);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let docs = vec!["a a a b b c", "a b d"];
        let counts = CountVectorizer::with_max_features(2)
            .fit_transform(&docs)
            .unwrap();
        assert_eq!(counts.feature_names(), &["a", "b"]);
        assert_eq!(counts.matrix.ncols(), 2);
        assert_eq!(counts.matrix[[0, 0]], 3);
    }

    #[test]
    fn test_lowercase() {
        let docs = vec!["Moon moon"];
        let counts = CountVectorizer::default().fit_transform(&docs).unwrap();
        assert_eq!(counts.feature_names(), &["moon"]);
        assert_eq!(counts.matrix[[0, 0]], 2);

        let keep_case = CountVectorizer {
            lowercase: false,
            ..CountVectorizer::default()
        };
        assert_eq!(keep_case.fit(&docs).unwrap().len(), 2);
    }

    #[test]
    fn test_transform_ignores_unknown_terms() {
        let vectorizer = CountVectorizer::default();
        let vocab = vectorizer.fit(&["山 水"]).unwrap();
        let m = vectorizer.transform(&["山 山 风"], &vocab).unwrap();
        assert_eq!(m.sum(), 2);
    }

    #[test]
    fn test_empty_corpus_fails() {
        let docs: Vec<String> = vec![];
        assert!(CountVectorizer::default().fit_transform(&docs).is_err());
        assert!(CountVectorizer::default().fit_transform(&["", "   "]).is_err());
    }

    #[test]
    fn test_unicode_whitespace_is_not_a_term() {
        let docs = vec!["春 眠\u{3000}不 觉\u{00A0}晓"];
        let counts = CountVectorizer::default().fit_transform(&docs).unwrap();
        assert_eq!(counts.feature_names().len(), 5);
        assert!(counts.vocabulary.get("\u{3000}").is_none());
        assert!(counts.vocabulary.get("\u{00A0}").is_none());
    }

    #[test]
    fn test_custom_pattern() {
        let v = CountVectorizer {
            token_pattern: "[a-z]+".to_string(),
            ..CountVectorizer::default()
        };
        let counts = v.fit_transform(&["moon, river; moon"]).unwrap();
        assert_eq!(counts.feature_names(), &["moon", "river"]);
    }

    #[test]
    fn test_invalid_pattern_fails() {
        let v = CountVectorizer {
            token_pattern: "(".to_string(),
            ..CountVectorizer::default()
        };
        assert!(v.fit(&["a"]).is_err());
    }
}
