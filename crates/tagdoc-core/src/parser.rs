//! Recursive-descent parser: token stream → document tree.
//!
//! The parser drives the lexer cursor and builds nodes exclusively through
//! the tree construction API. The first error aborts the document; there
//! is no recovery and no partial tree.
//!
//! Grammar decisions the lexical rules leave open are fixed here:
//!
//! - options are `name=value` pairs, comma separated, immediately after
//!   the tag name; a later duplicate overwrites the earlier value
//! - `[author ...]` and `[date ...]` are article metadata: they set
//!   options on the root and build no tree node
//! - `*` toggles a bold span inside paragraph content only, and the span
//!   must close before the enclosing tag does
//! - text sitting directly inside `[article]` or `[sec]` is wrapped into
//!   an implicit paragraph

use crate::error::ParseError;
use crate::lexer::Lexer;
use crate::token::{TagName, TokenKind};
use crate::tree::{DocTree, NodeId, NodeKind};

/// One-document parser over an eagerly tokenized input.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    tree: DocTree,
}

impl<'a> Parser<'a> {
    /// Tokenize `input` and set up an empty tree with its Article root.
    pub fn new(input: &'a str) -> Result<Self, ParseError> {
        Ok(Self {
            lexer: Lexer::new(input)?,
            tree: DocTree::new(),
        })
    }

    /// Consume the token stream and return the finished tree.
    pub fn parse(mut self) -> Result<DocTree, ParseError> {
        self.skip_blank_text();
        if self.lexer.current().kind != TokenKind::LBracket
            || self.lexer.peek().kind != TokenKind::Tag(TagName::Article)
        {
            return Err(ParseError::MissingRoot);
        }
        self.lexer.advance();
        self.lexer.advance();
        let root = self.tree.root();
        self.parse_options(root)?;
        self.parse_blocks(root)?;
        self.skip_blank_text();
        if self.lexer.current().kind != TokenKind::Eof {
            return Err(ParseError::TrailingContent);
        }
        Ok(self.tree)
    }

    /// Whitespace-only text runs separate blocks and carry no content.
    fn skip_blank_text(&mut self) {
        loop {
            let tok = self.lexer.current();
            if tok.kind == TokenKind::Str && tok.text.trim().is_empty() {
                self.lexer.advance();
            } else {
                break;
            }
        }
    }

    /// Parse the body of a block container up to and including its `]`.
    fn parse_blocks(&mut self, parent: NodeId) -> Result<(), ParseError> {
        loop {
            let tok = self.lexer.current();
            match tok.kind {
                TokenKind::RBracket => {
                    self.lexer.advance();
                    return Ok(());
                }
                TokenKind::Eof => return Err(ParseError::UnexpectedEof),
                TokenKind::LBracket => self.parse_block_tag(parent)?,
                TokenKind::Str => {
                    self.lexer.advance();
                    let text = tok.text.trim();
                    if !text.is_empty() {
                        // Stray body text gets an implicit paragraph.
                        let para = self.tree.alloc(NodeKind::Para);
                        self.tree.append_child(parent, para);
                        self.tree.append_text(para, text);
                    }
                }
                _ => return Err(ParseError::unexpected("a tag or text", tok)),
            }
        }
    }

    /// Dispatch one `[tag ...]` in block position. The `[` is still the
    /// current token; the tag keyword is one ahead.
    fn parse_block_tag(&mut self, parent: NodeId) -> Result<(), ParseError> {
        let tag = self.lexer.peek();
        let name = match tag.kind {
            TokenKind::Tag(name) => name,
            TokenKind::Word => return Err(ParseError::UnknownTag(tag.text.to_string())),
            _ => return Err(ParseError::unexpected("a tag name after '['", tag)),
        };
        self.lexer.advance();
        self.lexer.advance();
        match name {
            TagName::Title => self.parse_title(parent),
            TagName::Sec => {
                let sec = self.tree.alloc(NodeKind::Sec);
                self.tree.append_child(parent, sec);
                self.parse_options(sec)?;
                self.parse_blocks(sec)
            }
            TagName::Para => {
                let para = self.tree.alloc(NodeKind::Para);
                self.tree.append_child(parent, para);
                self.parse_options(para)?;
                self.parse_inline(para, false)
            }
            TagName::Author | TagName::Date => self.parse_metadata(parent, name),
            TagName::Article => Err(ParseError::unexpected("a block tag", tag)),
            TagName::Bold
            | TagName::Italic
            | TagName::Underline
            | TagName::Code
            | TagName::Math => Err(ParseError::unexpected(
                "a block tag (inline tags are only valid inside [p])",
                tag,
            )),
        }
    }

    /// `[title ...]` holds one plain text payload.
    fn parse_title(&mut self, parent: NodeId) -> Result<(), ParseError> {
        let title = self.tree.alloc(NodeKind::Title(String::new()));
        self.tree.append_child(parent, title);
        self.parse_options(title)?;
        let text = self.collect_text("title text")?;
        self.tree.append_text(title, text.trim());
        Ok(())
    }

    /// `[author ...]` / `[date ...]`: article metadata. Valid only
    /// directly inside the article; sets a root option, builds no node.
    fn parse_metadata(&mut self, parent: NodeId, name: TagName) -> Result<(), ParseError> {
        let root = self.tree.root();
        if parent != root {
            return Err(ParseError::Unexpected {
                expected: "author/date directly inside [article]",
                found: format!("tag '{}'", name.as_str()),
            });
        }
        let text = self.collect_text("metadata text")?;
        self.tree.set_option(root, name.as_str(), text.trim());
        Ok(())
    }

    /// Gather text tokens up to and including the closing `]`.
    fn collect_text(&mut self, expected: &'static str) -> Result<String, ParseError> {
        let mut text = String::new();
        loop {
            let tok = self.lexer.current();
            match tok.kind {
                TokenKind::RBracket => {
                    self.lexer.advance();
                    return Ok(text);
                }
                TokenKind::Str => {
                    self.lexer.advance();
                    text.push_str(tok.text);
                }
                TokenKind::Eof => return Err(ParseError::UnexpectedEof),
                _ => return Err(ParseError::unexpected(expected, tok)),
            }
        }
    }

    /// Parse inline content into `node` up to its closing delimiter: the
    /// `]` of the enclosing tag, or the star that closes a bold span when
    /// `until_star` is set.
    fn parse_inline(&mut self, node: NodeId, until_star: bool) -> Result<(), ParseError> {
        loop {
            let tok = self.lexer.current();
            match tok.kind {
                TokenKind::RBracket => {
                    if until_star {
                        return Err(ParseError::unexpected("a closing '*'", tok));
                    }
                    self.lexer.advance();
                    return Ok(());
                }
                TokenKind::Star => {
                    self.lexer.advance();
                    if until_star {
                        return Ok(());
                    }
                    let bold = self.tree.alloc(NodeKind::Bold);
                    self.tree.append_child(node, bold);
                    self.parse_inline(bold, true)?;
                }
                TokenKind::Str => {
                    self.lexer.advance();
                    // The run right before the closing bracket drops its
                    // trailing whitespace so `[p Hi ]` renders as `[p Hi]`.
                    let text = if !until_star && self.lexer.current().kind == TokenKind::RBracket
                    {
                        tok.text.trim_end()
                    } else {
                        tok.text
                    };
                    self.tree.append_text(node, text);
                }
                TokenKind::LBracket => {
                    let tag = self.lexer.peek();
                    let kind = match tag.kind {
                        TokenKind::Tag(TagName::Bold) => NodeKind::Bold,
                        TokenKind::Tag(TagName::Italic) => NodeKind::Italic,
                        TokenKind::Tag(TagName::Underline) => NodeKind::Underline,
                        TokenKind::Tag(TagName::Code) => NodeKind::Code,
                        TokenKind::Tag(TagName::Math) => NodeKind::Math,
                        TokenKind::Tag(_) => {
                            return Err(ParseError::unexpected("an inline tag", tag))
                        }
                        TokenKind::Word => {
                            return Err(ParseError::UnknownTag(tag.text.to_string()))
                        }
                        _ => return Err(ParseError::unexpected("a tag name after '['", tag)),
                    };
                    self.lexer.advance();
                    self.lexer.advance();
                    let child = self.tree.alloc(kind);
                    self.tree.append_child(node, child);
                    self.parse_options(child)?;
                    self.parse_inline(child, false)?;
                }
                TokenKind::Eof => return Err(ParseError::UnexpectedEof),
                _ => return Err(ParseError::unexpected("paragraph content", tok)),
            }
        }
    }

    /// Parse a `name=value,name=value` option list if one follows.
    fn parse_options(&mut self, node: NodeId) -> Result<(), ParseError> {
        while self.lexer.current().kind == TokenKind::OptName {
            let name = self.lexer.advance();
            let eq = self.lexer.advance();
            if eq.kind != TokenKind::Equal {
                return Err(ParseError::unexpected("'=' after an option name", eq));
            }
            let value = self.lexer.advance();
            match value.kind {
                TokenKind::Word | TokenKind::Str => {
                    self.tree.set_option(node, name.text, value.text);
                }
                _ => return Err(ParseError::unexpected("an option value", value)),
            }
            if self.lexer.current().kind == TokenKind::Comma {
                self.lexer.advance();
                if self.lexer.current().kind != TokenKind::OptName {
                    return Err(ParseError::unexpected(
                        "an option name after ','",
                        self.lexer.current(),
                    ));
                }
            } else {
                break;
            }
        }
        Ok(())
    }
}
