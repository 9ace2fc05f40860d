use thiserror::Error;

use crate::features::combine::FeatureFamily;

#[derive(Error, Debug)]
pub enum AttributionError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing Input: {0}")]
    MissingInput(String),

    #[error("Empty Vocabulary: no {family} term appears in at least {min_df} of {documents} documents")]
    EmptyVocabulary {
        family: FeatureFamily,
        min_df: usize,
        documents: usize,
    },

    #[error("Malformed Export: {0}")]
    MalformedExport(String),

    #[error("Dimension Mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type AttrResult<T> = Result<T, AttributionError>;
