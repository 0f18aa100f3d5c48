//! Eager tokenizer for the bracket markup grammar.
//!
//! The whole input is tokenized in one O(n) pass before any parsing
//! begins; the parser then walks the token vector through a cursor with
//! two tokens of lookahead (`current`/`advance`/`peek`/`peek_next`).
//!
//! Structural characters (`[`, `]`, `*`, `"`, and `=`/`,` in option
//! position) delimit tokens; everything else accumulates into text runs
//! that borrow directly from the input. Closing quotes and run boundaries
//! are located with `memchr` (SIMD on supported platforms).
//!
//! # Option position
//!
//! `=` and `,` are punctuation only immediately after a tag keyword,
//! where `word=` begins an option list. Anywhere else they are ordinary
//! text, so `[p a=b]` carries an option while `[p x a=b]` is a paragraph
//! whose text is `x a=b`.

use crate::error::LexError;
use crate::token::{TagName, Token, TokenKind};
use memchr::{memchr, memchr3};

/// Tokenizer state between two tokens.
#[derive(Clone, Copy, PartialEq)]
enum Mode {
    /// Tag bodies and the top level: text runs, brackets, stars, quotes.
    Body,
    /// Right after `[`: the next word is looked up in the tag table.
    TagWord,
    /// Right after a tag keyword: `word=` starts an option list.
    TagHead,
    /// Right after an option name, sitting on the `=` that confirmed it.
    OptAssign,
    /// Right after `=`: a bare word or quoted string value.
    OptValue,
    /// Right after an option value: `,` continues the list.
    OptAfter,
    /// Right after `,`: the next option name.
    OptNext,
}

/// Characters that end a word and begin their own token (in context).
const fn is_structural(b: u8) -> bool {
    matches!(b, b'[' | b']' | b'*' | b'"' | b'=' | b',')
}

const fn is_word_end(b: u8) -> bool {
    b.is_ascii_whitespace() || is_structural(b)
}

/// Token stream over a source buffer: one-token current access, two-token
/// lookahead.
///
/// Construction runs the full tokenization pass; lexical failures surface
/// there, never later.
#[derive(Debug)]
pub struct Lexer<'a> {
    /// The complete input text.
    input: &'a str,
    /// Input as bytes for the character-level cursor.
    bytes: &'a [u8],
    /// Byte cursor, only used during tokenization.
    pos: usize,
    /// All tokens, terminated by the Eof sentinel.
    tokens: Vec<Token<'a>>,
    /// Cursor into `tokens`.
    cursor: usize,
}

impl<'a> Lexer<'a> {
    /// Tokenize `input` eagerly.
    pub fn new(input: &'a str) -> Result<Self, LexError> {
        let mut lexer = Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            tokens: Vec::with_capacity(input.len() / 8 + 4),
            cursor: 0,
        };
        lexer.tokenize()?;
        Ok(lexer)
    }

    /// The token at the cursor, without advancing.
    #[inline]
    pub fn current(&self) -> Token<'a> {
        self.token_at(self.cursor)
    }

    /// Return the current token and move the cursor one position.
    ///
    /// Once end of input is reached this keeps returning the Eof sentinel
    /// without moving further.
    #[inline]
    pub fn advance(&mut self) -> Token<'a> {
        let token = self.token_at(self.cursor);
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
        token
    }

    /// The token one position ahead of current, cursor unmoved.
    #[inline]
    pub fn peek(&self) -> Token<'a> {
        self.token_at(self.cursor + 1)
    }

    /// The token two positions ahead of current, cursor unmoved.
    #[inline]
    pub fn peek_next(&self) -> Token<'a> {
        self.token_at(self.cursor + 2)
    }

    #[inline]
    fn token_at(&self, index: usize) -> Token<'a> {
        // tokenize() always terminates the vector with Eof, so clamping
        // makes every out-of-range access resolve to the sentinel.
        let last = self.tokens.len() - 1;
        self.tokens[index.min(last)]
    }

    // ---- character-level primitives ----

    #[inline]
    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn bump(&mut self) -> Option<u8> {
        let b = self.peek_byte()?;
        self.pos += 1;
        Some(b)
    }

    /// Put the last read byte back. Exactly one byte of pushback is ever
    /// needed (the delimiter that ended a word).
    #[inline]
    fn putback(&mut self) {
        debug_assert!(self.pos > 0);
        self.pos -= 1;
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_byte(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    /// Read up to the next whitespace or structural character.
    fn read_word(&mut self) -> &'a str {
        let start = self.pos;
        loop {
            match self.bump() {
                Some(b) if !is_word_end(b) => {}
                Some(_) => {
                    self.putback();
                    break;
                }
                None => break,
            }
        }
        &self.input[start..self.pos]
    }

    /// Reject control bytes that cannot appear in any token.
    fn check_text(&self, text: &str, start: usize) -> Result<(), LexError> {
        for (i, b) in text.bytes().enumerate() {
            if (b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r')) || b == 0x7f {
                return Err(LexError::UnexpectedCharacter {
                    byte: b,
                    offset: start + i,
                });
            }
        }
        Ok(())
    }

    // ---- tokenization ----

    #[inline]
    fn push(&mut self, kind: TokenKind, text: &'a str) {
        self.tokens.push(Token { kind, text });
    }

    #[inline]
    fn last_kind(&self) -> Option<TokenKind> {
        self.tokens.last().map(|t| t.kind)
    }

    /// Emit a text run starting at `start` (which may precede the byte
    /// cursor when a probed word turned out to be body text) and ending at
    /// the next structural character or end of input.
    fn text_run(&mut self, start: usize) -> Result<(), LexError> {
        let rest = &self.bytes[self.pos..];
        let stop = match (memchr3(b'[', b']', b'*', rest), memchr(b'"', rest)) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => rest.len(),
        };
        self.pos += stop;
        let text = &self.input[start..self.pos];
        self.check_text(text, start)?;
        self.push(TokenKind::Str, text);
        Ok(())
    }

    /// Consume a double-quoted string. The closing quote must exist before
    /// end of input; there are no escape sequences, and newlines are legal
    /// inside the quotes.
    fn quoted_string(&mut self) -> Result<(), LexError> {
        let open = self.pos;
        self.bump();
        let rest = &self.bytes[self.pos..];
        match memchr(b'"', rest) {
            None => Err(LexError::UnterminatedString { offset: open }),
            Some(n) => {
                let text = &self.input[self.pos..self.pos + n];
                self.check_text(text, self.pos)?;
                self.pos += n + 1;
                self.push(TokenKind::Str, text);
                Ok(())
            }
        }
    }

    /// The single eager pass over the byte buffer.
    fn tokenize(&mut self) -> Result<(), LexError> {
        let mut mode = Mode::Body;
        loop {
            match mode {
                Mode::Body => {
                    // Whitespace after a closing bracket, a star, or a text
                    // token separates inline fragments, so it stays part of
                    // the next run; elsewhere it is skipped outright and
                    // never becomes a token.
                    let glue = matches!(
                        self.last_kind(),
                        Some(TokenKind::RBracket | TokenKind::Star | TokenKind::Str)
                    );
                    if !glue {
                        self.skip_whitespace();
                    }
                    let Some(b) = self.peek_byte() else { break };
                    match b {
                        b'[' => {
                            self.bump();
                            self.push(TokenKind::LBracket, "[");
                            mode = Mode::TagWord;
                        }
                        b']' => {
                            self.bump();
                            self.push(TokenKind::RBracket, "]");
                        }
                        b'*' => {
                            self.bump();
                            self.push(TokenKind::Star, "*");
                        }
                        b'"' => self.quoted_string()?,
                        _ => self.text_run(self.pos)?,
                    }
                }
                Mode::TagWord => {
                    self.skip_whitespace();
                    match self.peek_byte() {
                        None => break,
                        Some(b) if is_structural(b) => mode = Mode::Body,
                        Some(_) => {
                            let start = self.pos;
                            let word = self.read_word();
                            self.check_text(word, start)?;
                            match TagName::from_keyword(word) {
                                Some(tag) => {
                                    self.push(TokenKind::Tag(tag), word);
                                    mode = Mode::TagHead;
                                }
                                None => {
                                    self.push(TokenKind::Word, word);
                                    mode = Mode::Body;
                                }
                            }
                        }
                    }
                }
                Mode::TagHead => {
                    self.skip_whitespace();
                    match self.peek_byte() {
                        None => break,
                        Some(b) if is_structural(b) => mode = Mode::Body,
                        Some(_) => {
                            let start = self.pos;
                            let word = self.read_word();
                            if self.peek_byte() == Some(b'=') {
                                self.check_text(word, start)?;
                                self.push(TokenKind::OptName, word);
                                mode = Mode::OptAssign;
                            } else {
                                // Not an option list: the word opens the
                                // tag body.
                                self.text_run(start)?;
                                mode = Mode::Body;
                            }
                        }
                    }
                }
                Mode::OptAssign => {
                    // peek_byte was '=' when the option name was pushed.
                    self.bump();
                    self.push(TokenKind::Equal, "=");
                    mode = Mode::OptValue;
                }
                Mode::OptValue => {
                    self.skip_whitespace();
                    match self.peek_byte() {
                        None => break,
                        Some(b'"') => {
                            self.quoted_string()?;
                            mode = Mode::OptAfter;
                        }
                        Some(b) if is_structural(b) => mode = Mode::Body,
                        Some(_) => {
                            let start = self.pos;
                            let word = self.read_word();
                            self.check_text(word, start)?;
                            self.push(TokenKind::Word, word);
                            mode = Mode::OptAfter;
                        }
                    }
                }
                Mode::OptAfter => {
                    self.skip_whitespace();
                    if self.peek_byte() == Some(b',') {
                        self.bump();
                        self.push(TokenKind::Comma, ",");
                        mode = Mode::OptNext;
                    } else {
                        mode = Mode::Body;
                    }
                }
                Mode::OptNext => {
                    self.skip_whitespace();
                    match self.peek_byte() {
                        None => break,
                        Some(b) if is_structural(b) => mode = Mode::Body,
                        Some(_) => {
                            let start = self.pos;
                            let word = self.read_word();
                            if self.peek_byte() == Some(b'=') {
                                self.check_text(word, start)?;
                                self.push(TokenKind::OptName, word);
                                mode = Mode::OptAssign;
                            } else {
                                self.text_run(start)?;
                                mode = Mode::Body;
                            }
                        }
                    }
                }
            }
        }
        self.push(TokenKind::Eof, "");
        Ok(())
    }
}
