//! Mixed-script tokenizer for full-text indexing.
//!
//! Turns a UTF-8 byte buffer into a lazy stream of fixed-capacity [`Token`]s:
//!
//! - Latin-class words (1- and 2-byte UTF-8 characters) are stripped of ASCII
//!   punctuation, lower-cased and capped at [`MAX_TOKEN_SIZE`] bytes.
//! - CJK-class runs (3+ byte characters) are cut into overlapping n-grams of
//!   up to three characters.
//! - Every [`MARKER_INTERVAL`] logical positions a `_MARKER_<n>` token records
//!   the byte offset reached, so consumers can map positions back to bytes
//!   (see [`MarkerIndex`]).
//!
//! The crate knows nothing about files, charsets, or index formats. Callers
//! hand it decoded bytes and persist the `(payload, position)` pairs.
//!
//! ```
//! use fts_tokenizer::Tokenizer;
//!
//! let words: Vec<String> = Tokenizer::new("Hello, World!")
//!     .map(|t| t.to_string())
//!     .collect();
//! assert_eq!(words, ["hello", "world"]);
//! ```

mod class;
mod cursor;
mod latin;
mod markers;
mod ngram;
mod token;
mod tokenizer;

pub use class::RuneClass;
pub use markers::MarkerIndex;
pub use token::{Token, TokenKind, MARKER_PREFIX, MAX_TOKEN_SIZE, TOKEN_BUF_SIZE};
pub use tokenizer::{tokenize, Completion, Tokenizer};

/// Number of logical positions between two consecutive marker tokens.
pub const MARKER_INTERVAL: i64 = 100;
