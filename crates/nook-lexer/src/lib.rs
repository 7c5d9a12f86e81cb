//! nook-lexer - Lexical Analyzer (Tokenizer)
//!
//! Transforms source text into a stream of [`Token`]s. The lexer is the
//! bottom of the interpreter pipeline: it has no knowledge of grammar or
//! precedence, only of how individual characters group into lexemes.
//!
//! ```text
//! "let x = 5;"  ->  [Let] [Ident("x")] [Assign] [Int("5")] [Semicolon] [Eof]
//! ```
//!
//! Two-character operators (`==`, `!=`) are assembled via one character
//! of lookahead; everything else is decided by the current character
//! alone. See [`Lexer::next_token`] for the full algorithm.

mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{classify_identifier, lookup_keyword, lookup_punctuation, Token, TokenKind};
