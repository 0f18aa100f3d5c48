//! Error taxonomy for the lex → parse → render → sink pipeline.
//!
//! Nothing here is retried or auto-corrected: the first failure aborts
//! the document and propagates to the caller. No partial HTML is ever
//! emitted for a document that failed to lex or parse.

use crate::token::{Token, TokenKind};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Tokenization failures. Both abort the document outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
    /// A quote was opened and never closed before end of input.
    #[error("unterminated string literal opened at byte {offset}")]
    UnterminatedString { offset: usize },
    /// A byte that cannot start or continue any token.
    #[error("unexpected character {byte:#04x} at byte {offset}")]
    UnexpectedCharacter { byte: u8, offset: usize },
}

/// Token-level structure violations found while building the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    /// A word in tag position that is not in the tag table.
    #[error("unknown tag '{0}'")]
    UnknownTag(String),
    #[error("expected {expected}, found {found}")]
    Unexpected {
        expected: &'static str,
        found: String,
    },
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("document must begin with an [article] tag")]
    MissingRoot,
    #[error("content after the closing bracket of [article]")]
    TrailingContent,
}

impl ParseError {
    pub(crate) fn unexpected(expected: &'static str, found: Token<'_>) -> Self {
        let found = match found.kind {
            TokenKind::Tag(_) | TokenKind::Word | TokenKind::Str | TokenKind::OptName => {
                format!("{} '{}'", found.kind.describe(), found.text)
            }
            _ => found.kind.describe().to_string(),
        };
        ParseError::Unexpected { expected, found }
    }
}

/// Generator-side consistency failure: a node kind reached the generic
/// element table without an entry. The node model and the generator have
/// drifted apart; never expected for trees built by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("no HTML element mapping for '{kind}' node")]
    UnknownTagKind { kind: &'static str },
}

/// Failure to commit the generated HTML to its destination.
#[derive(Debug, Error)]
#[error("failed to write '{}': {source}", .path.display())]
pub struct SinkError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl SinkError {
    pub(crate) fn new(path: &Path, source: io::Error) -> Self {
        SinkError {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Any failure the whole-document pipeline can surface.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Sink(#[from] SinkError),
}
