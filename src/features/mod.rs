//! Per-document fingerprint families and their column-wise combination.

pub mod combine;
pub mod function_words;

pub use combine::{FeatureBlock, FeatureFamily, FeatureMatrix};
pub use function_words::FunctionWordExtractor;
