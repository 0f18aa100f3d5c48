//! # tagdoc Core
//!
//! Translates documents written in a small bracket-delimited markup
//! language into well-formed, human-readable HTML.
//!
//! Pipeline: source text → [`Lexer`] → token stream → [`Parser`] →
//! [`DocTree`] → [`html::render`] → HTML text → sink.
//!
//! ## Quick Start
//!
//! ```rust
//! let input = r#"[article [title "Hello"] [p Greetings, *world*]]"#;
//! let html = tagdoc_core::to_html(input).unwrap();
//!
//! assert!(html.contains("<strong>world</strong>"));
//! assert!(html.contains("<title>Hello</title>"));
//! ```
//!
//! ## Markup
//!
//! A document is a single `[article ...]` containing `[title]`, `[sec]`,
//! and `[p]` blocks. Paragraph bodies interleave plain text with inline
//! tags (`[b]`, `[i]`, `[u]`, `[code]`, `[math]`) and the `*bold*`
//! shorthand. Tags take options right after the keyword, as in
//! `[code lang=rust ...]`, and `[author "..."]` / `[date "..."]` attach
//! metadata to the article shell.

pub mod error;
pub mod html;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod tree;

pub use error::{Error, LexError, ParseError, RenderError, SinkError};
pub use html::{render, write_html};
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{TagName, Token, TokenKind};
pub use tree::{DocTree, Node, NodeId, NodeKind};

/// Translate a markup document straight to HTML text.
pub fn to_html(input: &str) -> Result<String, Error> {
    let tree = Parser::new(input)?.parse()?;
    Ok(html::render(&tree)?)
}
