//! Token types produced by the lexer.
//!
//! Tokens are immutable values: a kind plus the lexeme text, borrowed
//! straight from the source buffer. They never outlive the lexer that
//! produced them.

/// A recognized tag keyword.
///
/// The table is closed: a word after `[` that is not listed here lexes as
/// a generic [`TokenKind::Word`] and the parser rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagName {
    Article,
    Title,
    Author,
    Date,
    Sec,
    Para,
    Bold,
    Italic,
    Underline,
    Code,
    Math,
}

impl TagName {
    /// Look a word up in the fixed tag-name table.
    pub fn from_keyword(word: &str) -> Option<TagName> {
        match word {
            "article" => Some(TagName::Article),
            "title" => Some(TagName::Title),
            "author" => Some(TagName::Author),
            "date" => Some(TagName::Date),
            "sec" => Some(TagName::Sec),
            "p" => Some(TagName::Para),
            "b" => Some(TagName::Bold),
            "i" => Some(TagName::Italic),
            "u" => Some(TagName::Underline),
            "code" => Some(TagName::Code),
            "math" => Some(TagName::Math),
            _ => None,
        }
    }

    /// The keyword as it appears in markup.
    pub const fn as_str(self) -> &'static str {
        match self {
            TagName::Article => "article",
            TagName::Title => "title",
            TagName::Author => "author",
            TagName::Date => "date",
            TagName::Sec => "sec",
            TagName::Para => "p",
            TagName::Bold => "b",
            TagName::Italic => "i",
            TagName::Underline => "u",
            TagName::Code => "code",
            TagName::Math => "math",
        }
    }
}

/// Closed set of token discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Stable end-of-input sentinel, returned repeatedly once reached.
    Eof,
    /// A recognized tag keyword following `[`.
    Tag(TagName),
    /// An option name (a word the lexer saw `=` directly after).
    OptName,
    /// A quoted string or a free text run.
    Str,
    /// A bare word: an unrecognized tag name or an unquoted option value.
    Word,
    LBracket,
    RBracket,
    Equal,
    Comma,
    Star,
}

impl TokenKind {
    /// Short human-readable description, used in parse errors.
    pub const fn describe(self) -> &'static str {
        match self {
            TokenKind::Eof => "end of input",
            TokenKind::Tag(_) => "tag",
            TokenKind::OptName => "option name",
            TokenKind::Str => "text",
            TokenKind::Word => "word",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Equal => "'='",
            TokenKind::Comma => "','",
            TokenKind::Star => "'*'",
        }
    }
}

/// A single token: discriminant plus lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// The lexeme text. Empty for the end-of-input sentinel; quoted
    /// strings carry the content between the quotes.
    pub text: &'a str,
}

impl Token<'_> {
    /// The end-of-input sentinel.
    pub const EOF: Token<'static> = Token {
        kind: TokenKind::Eof,
        text: "",
    };
}
