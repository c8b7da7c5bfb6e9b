// Topic modeling — bag-of-words counting, LDA fitting, topic inspection.

pub mod inspect;
pub mod lda;
pub mod traits;
pub mod vectorizer;

pub use inspect::{print_topic_top_words, topic_top_words, TopicWords};
pub use lda::{LdaModel, LdaParams};
pub use traits::TopicModel;
pub use vectorizer::{CountVectorizer, TermCounts, Vocabulary};
