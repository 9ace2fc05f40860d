pub mod tokenizer;

pub use tokenizer::{SnowballLemmatizer, Tokenizer, WhitespaceTokenizer};
