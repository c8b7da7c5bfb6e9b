use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::corpus::loader::DEFAULT_TEXT_FIELD;

/// Default corpus location, following the chinese-poetry repository layout.
pub const DEFAULT_PATTERN: &str = "./data/poet.tang.*.json";

/// Run configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Every value has a
/// default; CLI flags override whatever is loaded here.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Glob pattern selecting the corpus files
    pub pattern: String,
    /// Record field holding the list of paragraph strings
    pub text_field: String,
    /// LDA topic count
    pub num_topics: usize,
    /// Words shown per topic
    pub num_top_words: usize,
    /// Rows shown in the final table
    pub max_docs: usize,
    /// Vocabulary cap for the counting vectorizer (None = unbounded)
    pub max_features: Option<usize>,
    /// Gibbs sweeps during fitting
    pub iterations: usize,
    /// Seed for the sampler
    pub seed: u64,
    /// Extra characters treated as noise on top of the built-in set
    pub extra_noise: Vec<char>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            text_field: DEFAULT_TEXT_FIELD.to_string(),
            num_topics: 10,
            num_top_words: 10,
            max_docs: 10,
            max_features: Some(1000),
            iterations: 50,
            seed: 0,
            extra_noise: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A variable that is set but does not parse is an error rather than a
    /// silent fallback to the default.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        // POEM_TOPICS_MAX_FEATURES=0 means "no cap"
        let max_features = match parse_var::<usize>("POEM_TOPICS_MAX_FEATURES")? {
            Some(0) => None,
            Some(n) => Some(n),
            None => defaults.max_features,
        };

        Ok(Self {
            pattern: env::var("POEM_TOPICS_PATTERN").unwrap_or(defaults.pattern),
            text_field: env::var("POEM_TOPICS_TEXT_FIELD").unwrap_or(defaults.text_field),
            num_topics: parse_var("POEM_TOPICS_NUM_TOPICS")?.unwrap_or(defaults.num_topics),
            num_top_words: parse_var("POEM_TOPICS_NUM_TOP_WORDS")?
                .unwrap_or(defaults.num_top_words),
            max_docs: parse_var("POEM_TOPICS_MAX_DOCS")?.unwrap_or(defaults.max_docs),
            max_features,
            iterations: parse_var("POEM_TOPICS_ITERATIONS")?.unwrap_or(defaults.iterations),
            seed: parse_var("POEM_TOPICS_SEED")?.unwrap_or(defaults.seed),
            extra_noise: env::var("POEM_TOPICS_EXTRA_NOISE")
                .map(|s| s.chars().filter(|c| !c.is_whitespace()).collect())
                .unwrap_or_default(),
        })
    }

    /// Check only what loading the corpus needs.
    pub fn validate_corpus(&self) -> Result<()> {
        if self.pattern.trim().is_empty() {
            anyhow::bail!(
                "Corpus pattern is empty. Set POEM_TOPICS_PATTERN or pass --pattern."
            );
        }
        Ok(())
    }

    /// Check the values the full pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.validate_corpus()?;
        if self.num_topics == 0 {
            anyhow::bail!("num_topics must be at least 1");
        }
        if self.num_top_words == 0 {
            anyhow::bail!("num_top_words must be at least 1");
        }
        if self.iterations == 0 {
            anyhow::bail!("iterations must be at least 1");
        }
        Ok(())
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{name} has an invalid value: {raw:?}")),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_topics_rejected() {
        let config = Config {
            num_topics: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_corpus_check_ignores_model_settings() {
        let config = Config {
            num_topics: 0,
            iterations: 0,
            ..Config::default()
        };
        assert!(config.validate_corpus().is_ok());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let config = Config {
            pattern: "  ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(config.validate_corpus().is_err());
    }

    #[test]
    fn test_parse_var_unset_and_invalid() {
        // Names unique to this test so parallel tests never race on them
        env::remove_var("POEM_TOPICS_TEST_UNSET");
        assert_eq!(parse_var::<usize>("POEM_TOPICS_TEST_UNSET").unwrap(), None);

        env::set_var("POEM_TOPICS_TEST_BAD", "ten");
        assert!(parse_var::<usize>("POEM_TOPICS_TEST_BAD").is_err());

        env::set_var("POEM_TOPICS_TEST_GOOD", " 12 ");
        assert_eq!(parse_var::<usize>("POEM_TOPICS_TEST_GOOD").unwrap(), Some(12));
    }
}
