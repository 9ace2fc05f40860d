use std::fs;
use std::path::Path;

use clap::{parser::ValueSource, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::{AttrResult, AttributionError};
use crate::vectorizer::NgramVectorizer;

/// What to do when an n-gram family keeps no term after min-df pruning.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyPolicy {
    /// warn and let the family contribute zero columns
    #[default]
    Degrade,
    /// fail the run
    Strict,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    // === Character n-grams ===
    #[arg(long, default_value_t = 3)]
    pub char_ngram_min: usize,
    #[arg(long, default_value_t = 5)]
    pub char_ngram_max: usize,
    #[arg(long, default_value_t = 3)]
    pub char_min_df: usize,

    // === Word n-grams ===
    #[arg(long, default_value_t = 1)]
    pub word_ngram_min: usize,
    #[arg(long, default_value_t = 2)]
    pub word_ngram_max: usize,
    #[arg(long, default_value_t = 3)]
    pub word_min_df: usize,

    #[arg(long, value_enum, default_value_t = VocabularyPolicy::Degrade)]
    pub empty_vocabulary: VocabularyPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            char_ngram_min: 3,
            char_ngram_max: 5,
            char_min_df: 3,
            word_ngram_min: 1,
            word_ngram_max: 2,
            word_min_df: 3,
            empty_vocabulary: VocabularyPolicy::Degrade,
        }
    }
}

impl AnalysisConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> AttrResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Overlay values the user typed on the command line onto a file config.
    pub fn merge_from_cli(&mut self, cli: &AnalysisConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(char_ngram_min);
        update_if_present!(char_ngram_max);
        update_if_present!(char_min_df);
        update_if_present!(word_ngram_min);
        update_if_present!(word_ngram_max);
        update_if_present!(word_min_df);
        update_if_present!(empty_vocabulary);
    }

    pub fn validate(&self) -> AttrResult<()> {
        check_range("char", self.char_ngram_min, self.char_ngram_max)?;
        check_range("word", self.word_ngram_min, self.word_ngram_max)?;
        if self.char_min_df == 0 || self.word_min_df == 0 {
            return Err(AttributionError::Config("min_df must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn char_vectorizer(&self) -> NgramVectorizer {
        NgramVectorizer::char_wb(self.char_ngram_min, self.char_ngram_max, self.char_min_df)
    }

    pub fn word_vectorizer(&self) -> NgramVectorizer {
        NgramVectorizer::word(self.word_ngram_min, self.word_ngram_max, self.word_min_df)
    }
}

fn check_range(name: &str, min: usize, max: usize) -> AttrResult<()> {
    if min == 0 {
        return Err(AttributionError::Config(format!("{name} n-gram length must start at 1 or more")));
    }
    if min > max {
        return Err(AttributionError::Config(format!(
            "{name} n-gram range {min}..={max} is empty"
        )));
    }
    Ok(())
}
