//! One-shot attribution run: raw text in, ranked candidates out.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::config::{AnalysisConfig, VocabularyPolicy};
use crate::engine::tokenizer::Tokenizer;
use crate::error::{AttrResult, AttributionError};
use crate::features::{FeatureBlock, FeatureFamily, FeatureMatrix, FunctionWordExtractor};
use crate::utils::math::vector::ZeroSpVec;
use crate::utils::normalizer::TextNormalizer;
use crate::vectorizer::evaluate::scoring::{rank_by_cosine, Hits};
use crate::vectorizer::{FittedVectorizer, NgramVectorizer};

/// All writing attributed to one author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    /// messages joined with single spaces
    pub text: String,
    /// display metadata; never part of the score
    pub message_count: u64,
}

/// Candidates keyed by identity, in input order.
#[derive(Debug, Clone, Default)]
pub struct CandidateCorpus {
    candidates: IndexMap<String, Candidate>,
}

impl CandidateCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute one more message to `id`.
    pub fn push_message(&mut self, id: &str, message: &str) {
        match self.candidates.get_mut(id) {
            Some(candidate) => {
                candidate.text.push(' ');
                candidate.text.push_str(message);
                candidate.message_count += 1;
            }
            None => {
                self.candidates.insert(
                    id.to_string(),
                    Candidate {
                        id: id.to_string(),
                        text: message.to_string(),
                        message_count: 1,
                    },
                );
            }
        }
    }

    /// Insert or replace a fully aggregated candidate.
    pub fn insert(&mut self, candidate: Candidate) {
        self.candidates.insert(candidate.id.clone(), candidate);
    }

    /// Build from an identity -> text mapping plus a count mapping keyed the
    /// same way. A missing count reads as 0.
    pub fn from_maps<I>(texts: I, counts: &HashMap<String, u64>) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut corpus = Self::new();
        for (id, text) in texts {
            let message_count = counts.get(&id).copied().unwrap_or(0);
            corpus.insert(Candidate { id, text, message_count });
        }
        corpus
    }

    pub fn get(&self, id: &str) -> Option<&Candidate> {
        self.candidates.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> + '_ {
        self.candidates.values()
    }
}

/// Text of unknown authorship, possibly assembled from several files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetDocument {
    text: String,
}

impl TargetDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Append one source part followed by a newline.
    pub fn push_part(&mut self, part: &str) {
        self.text.push_str(part);
        self.text.push('\n');
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// true when nothing but whitespace was collected
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A document after cleaning and tokenization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedDocument {
    pub normalized: String,
    pub tokens: Vec<String>,
}

/// Everything fitted during one run.
///
/// The vectorizers' columns are only meaningful for the rows of `matrix`;
/// nothing here is reused by a later run.
#[derive(Debug, Clone)]
pub struct FeatureSpace {
    pub char_ngrams: FittedVectorizer,
    pub word_ngrams: FittedVectorizer,
    pub function_words: FunctionWordExtractor,
    pub matrix: FeatureMatrix,
}

/// Stylometric attribution pipeline.
///
/// The tokenizer is injected by the caller and only borrowed, so one model
/// can serve many runs and tests can swap in a light one.
pub struct AuthorshipAnalyzer<'t, T>
where
    T: Tokenizer + ?Sized,
{
    tokenizer: &'t T,
    normalizer: TextNormalizer,
    config: AnalysisConfig,
}

impl<'t, T> AuthorshipAnalyzer<'t, T>
where
    T: Tokenizer + ?Sized,
{
    pub fn new(tokenizer: &'t T, config: AnalysisConfig) -> Self {
        Self {
            tokenizer,
            normalizer: TextNormalizer::new(),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Normalize then tokenize every raw text. Output aligns with `raw`.
    pub fn preprocess<S>(&self, raw: &[S]) -> Vec<ProcessedDocument>
    where
        S: AsRef<str>,
    {
        let normalized = self.normalizer.normalize_batch(raw);
        let tokens = self.tokenizer.tokenize_batch(&normalized);
        normalized
            .into_iter()
            .zip(tokens)
            .map(|(normalized, tokens)| ProcessedDocument { normalized, tokens })
            .collect()
    }

    /// Fit both n-gram vectorizers over all `docs` and build the combined
    /// matrix, rows aligned with `docs`.
    pub fn build_features(&self, docs: &[ProcessedDocument]) -> AttrResult<FeatureSpace> {
        let strings: Vec<&str> = docs.iter().map(|d| d.normalized.as_str()).collect();
        let token_strings: Vec<String> = docs.iter().map(|d| d.tokens.join(" ")).collect();

        let (char_ngrams, char_rows) =
            self.fit_family(FeatureFamily::CharNgram, self.config.char_vectorizer(), &strings)?;
        let (word_ngrams, word_rows) =
            self.fit_family(FeatureFamily::WordNgram, self.config.word_vectorizer(), &token_strings)?;

        let function_words = FunctionWordExtractor::from_tokenizer(self.tokenizer);
        let fw_rows: Vec<ZeroSpVec<f64>> = docs.iter().map(|d| function_words.extract(&d.tokens)).collect();

        let matrix = FeatureMatrix::hstack(vec![
            FeatureBlock::new(FeatureFamily::CharNgram, char_ngrams.n_features(), char_rows),
            FeatureBlock::new(FeatureFamily::WordNgram, word_ngrams.n_features(), word_rows),
            FeatureBlock::new(FeatureFamily::FunctionWord, function_words.len(), fw_rows),
        ])?;
        debug!(
            rows = matrix.n_rows(),
            cols = matrix.n_cols(),
            char_cols = char_ngrams.n_features(),
            word_cols = word_ngrams.n_features(),
            function_word_cols = function_words.len(),
            "combined feature matrix"
        );

        Ok(FeatureSpace {
            char_ngrams,
            word_ngrams,
            function_words,
            matrix,
        })
    }

    fn fit_family<S>(
        &self,
        family: FeatureFamily,
        vectorizer: NgramVectorizer,
        docs: &[S],
    ) -> AttrResult<(FittedVectorizer, Vec<ZeroSpVec<f64>>)>
    where
        S: AsRef<str> + Sync,
    {
        let (fitted, rows): (FittedVectorizer, _) = vectorizer.fit_transform(docs);
        if fitted.is_empty_vocabulary() {
            match self.config.empty_vocabulary {
                VocabularyPolicy::Strict => {
                    return Err(AttributionError::EmptyVocabulary {
                        family,
                        min_df: vectorizer.min_df,
                        documents: docs.len(),
                    });
                }
                VocabularyPolicy::Degrade => {
                    warn!(
                        %family,
                        min_df = vectorizer.min_df,
                        documents = docs.len(),
                        "no term reached min_df; family contributes zero columns"
                    );
                }
            }
        } else {
            info!(%family, vocabulary = fitted.n_features(), "vocabulary fitted");
        }
        Ok((fitted, rows))
    }

    /// Rank every candidate by stylistic similarity to `target`.
    ///
    /// # Errors
    /// `MissingInput` before any work when there are no candidates or the
    /// target is blank; `Config` when the analysis parameters are invalid.
    pub fn run(&self, candidates: &CandidateCorpus, target: &TargetDocument) -> AttrResult<Hits<String>> {
        self.analyze(candidates, target).map(|(hits, _)| hits)
    }

    /// Like [`run`](Self::run), also returning the fitted feature space.
    pub fn analyze(
        &self,
        candidates: &CandidateCorpus,
        target: &TargetDocument,
    ) -> AttrResult<(Hits<String>, FeatureSpace)> {
        if candidates.is_empty() {
            return Err(AttributionError::MissingInput("no candidate messages were loaded".to_string()));
        }
        if target.is_blank() {
            return Err(AttributionError::MissingInput("target document is empty".to_string()));
        }
        self.config.validate()?;

        let raw: Vec<&str> = candidates
            .iter()
            .map(|c| c.text.as_str())
            .chain(std::iter::once(target.text()))
            .collect();
        info!(candidates = candidates.len(), "preprocessing documents");
        let docs = self.preprocess(&raw);

        let space = self.build_features(&docs)?;
        let target_row = space
            .matrix
            .target_row()
            .ok_or_else(|| AttributionError::DimensionMismatch("feature matrix has no target row".to_string()))?;

        let scored: Vec<(String, &ZeroSpVec<f64>, u64)> = candidates
            .iter()
            .zip(space.matrix.candidate_rows())
            .map(|(c, row)| (c.id.clone(), row, c.message_count))
            .collect();
        let hits = rank_by_cosine(target_row, scored);
        Ok((hits, space))
    }
}
