//! This crate is a stylometric authorship attribution engine built on TF-IDF n-gram vectors.
pub mod config;
pub mod engine;
pub mod error;
pub mod features;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod utils;
pub mod vectorizer;

/// Authorship Analyzer
/// The top-level struct of this crate. It takes aggregated candidate writing and
/// one target document and ranks every candidate by stylistic similarity.
///
/// Per run it:
/// - normalizes raw chat text (code, mentions, emoji and links become placeholders)
/// - tokenizes with the injected `Tokenizer`
/// - fits character and word n-gram TF-IDF vectorizers over all documents jointly
/// - extracts function-word frequencies
/// - stacks the three families into one sparse matrix, target row last
/// - scores candidates by cosine similarity and sorts them (stable)
///
/// `AuthorshipAnalyzer<'t, T>` borrows the tokenizer, so one model can serve many runs.
pub use pipeline::AuthorshipAnalyzer;

/// Candidate writing keyed by author identity, in input order.
pub use pipeline::{Candidate, CandidateCorpus, TargetDocument};

/// Per-run fitted state: both n-gram vectorizers, the function-word vocabulary
/// and the combined matrix. Never reused across runs.
pub use pipeline::FeatureSpace;

/// Run parameters (n-gram ranges, min document frequency, empty vocabulary policy).
pub use config::{AnalysisConfig, VocabularyPolicy};

/// Crate error and result alias.
pub use error::{AttrResult, AttributionError};

/// Text-to-tokens capability and its bundled providers.
pub use engine::tokenizer::{SnowballLemmatizer, Tokenizer, WhitespaceTokenizer};

/// Rule-based chat text cleaner.
pub use utils::normalizer::TextNormalizer;

/// N-gram TF-IDF vectorizer and its fitted form.
pub use vectorizer::{FittedVectorizer, NgramVectorizer};

/// Token Frequency
/// Counts how often each term occurs in one document.
pub use vectorizer::token::TokenFrequency;

/// Corpus
/// Document-frequency statistics of one fitting run: the number of documents and,
/// per term, how many documents contain it.
pub use vectorizer::corpus::Corpus;

/// TF-IDF engine trait and its default smoothed implementation.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Ranking results.
pub use vectorizer::evaluate::scoring::{HitEntry, Hits};

/// Sparse vector used for every feature row.
pub use utils::math::vector::ZeroSpVec;
