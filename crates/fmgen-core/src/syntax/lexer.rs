//! Lexer (tokenizer) for Go source
//!
//! Converts raw source text into a flat [`Token`] stream plus the file's
//! comment groups. Go's automatic semicolon insertion is applied here so the
//! parser only ever sees explicit `;` terminators.

use super::ast::{Comment, CommentGroup};
use super::{Position, SyntaxError};
use std::fmt;

/// Go reserved words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,
}

impl Keyword {
    pub fn from_ident(ident: &str) -> Option<Self> {
        let kw = match ident {
            "break" => Keyword::Break,
            "case" => Keyword::Case,
            "chan" => Keyword::Chan,
            "const" => Keyword::Const,
            "continue" => Keyword::Continue,
            "default" => Keyword::Default,
            "defer" => Keyword::Defer,
            "else" => Keyword::Else,
            "fallthrough" => Keyword::Fallthrough,
            "for" => Keyword::For,
            "func" => Keyword::Func,
            "go" => Keyword::Go,
            "goto" => Keyword::Goto,
            "if" => Keyword::If,
            "import" => Keyword::Import,
            "interface" => Keyword::Interface,
            "map" => Keyword::Map,
            "package" => Keyword::Package,
            "range" => Keyword::Range,
            "return" => Keyword::Return,
            "select" => Keyword::Select,
            "struct" => Keyword::Struct,
            "switch" => Keyword::Switch,
            "type" => Keyword::Type,
            "var" => Keyword::Var,
            _ => return None,
        };
        Some(kw)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Break => "break",
            Keyword::Case => "case",
            Keyword::Chan => "chan",
            Keyword::Const => "const",
            Keyword::Continue => "continue",
            Keyword::Default => "default",
            Keyword::Defer => "defer",
            Keyword::Else => "else",
            Keyword::Fallthrough => "fallthrough",
            Keyword::For => "for",
            Keyword::Func => "func",
            Keyword::Go => "go",
            Keyword::Goto => "goto",
            Keyword::If => "if",
            Keyword::Import => "import",
            Keyword::Interface => "interface",
            Keyword::Map => "map",
            Keyword::Package => "package",
            Keyword::Range => "range",
            Keyword::Return => "return",
            Keyword::Select => "select",
            Keyword::Struct => "struct",
            Keyword::Switch => "switch",
            Keyword::Type => "type",
            Keyword::Var => "var",
        }
    }

    /// Keywords after which a newline terminates the statement.
    fn ends_statement(self) -> bool {
        matches!(
            self,
            Keyword::Break | Keyword::Continue | Keyword::Fallthrough | Keyword::Return
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    Keyword(Keyword),
    /// Integer, float or imaginary literal as written
    Number(String),
    /// Rune literal, quotes included
    Rune(String),
    /// Interpreted or raw string literal, quotes included
    String(String),

    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Dot,
    Ellipsis,
    Colon,
    Assign,
    Star,
    Tilde,
    Arrow,
    /// Any other operator
    Operator(&'static str),

    Eof,
}

impl TokenKind {
    /// Source text of the token.
    pub fn text(&self) -> &str {
        match self {
            TokenKind::Ident(s) | TokenKind::Number(s) | TokenKind::Rune(s) | TokenKind::String(s) => {
                s.as_str()
            }
            TokenKind::Keyword(kw) => kw.as_str(),
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Dot => ".",
            TokenKind::Ellipsis => "...",
            TokenKind::Colon => ":",
            TokenKind::Assign => "=",
            TokenKind::Star => "*",
            TokenKind::Tilde => "~",
            TokenKind::Arrow => "<-",
            TokenKind::Operator(op) => op,
            TokenKind::Eof => "",
        }
    }

    fn ends_statement(&self) -> bool {
        match self {
            TokenKind::Ident(_)
            | TokenKind::Number(_)
            | TokenKind::Rune(_)
            | TokenKind::String(_)
            | TokenKind::RParen
            | TokenKind::RBracket
            | TokenKind::RBrace => true,
            TokenKind::Keyword(kw) => kw.ends_statement(),
            TokenKind::Operator(op) => matches!(*op, "++" | "--"),
            _ => false,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(s) => write!(f, "identifier '{s}'"),
            TokenKind::Keyword(kw) => write!(f, "'{}'", kw.as_str()),
            TokenKind::Number(s) => write!(f, "number {s}"),
            TokenKind::Rune(s) => write!(f, "rune {s}"),
            TokenKind::String(s) => write!(f, "string {s}"),
            TokenKind::Semicolon => write!(f, "';' or newline"),
            TokenKind::Eof => write!(f, "end of file"),
            other => write!(f, "'{}'", other.text()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Position,
}

/// Lexer output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub comments: Vec<CommentGroup>,
}

/// Multi-character operators, longest first so greedy matching works.
const OPERATORS: &[&str] = &[
    "<<=", ">>=", "&^=", "&&", "||", "++", "--", "==", "!=", "<=", ">=", ":=", "+=", "-=", "*=",
    "/=", "%=", "&=", "|=", "^=", "<<", ">>", "&^", "+", "-", "/", "%", "&", "|", "^", "<", ">",
    "!",
];

const BOM: char = '\u{feff}';

/// Lexer for Go source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
    groups: Vec<CommentGroup>,
    /// Set when a newline at this point would terminate a statement
    insert_semicolon: bool,
    /// A token was emitted after the most recent comment
    token_since_comment: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    ///
    /// A byte-order mark at the very start is dropped.
    pub fn new(input: &str) -> Self {
        let input = input.strip_prefix(BOM).unwrap_or(input);
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
            groups: Vec::new(),
            insert_semicolon: false,
            token_since_comment: true,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(mut self) -> Result<Lexed, SyntaxError> {
        loop {
            let Some(ch) = self.peek() else {
                break;
            };

            match ch {
                '\n' => {
                    let pos = self.current_position();
                    self.auto_semicolon(pos);
                    self.advance();
                }
                c if c.is_whitespace() => {
                    self.advance();
                }
                '/' if self.peek_next() == Some('/') => self.line_comment(),
                '/' if self.peek_next() == Some('*') => self.block_comment()?,
                _ => self.next_token()?,
            }
        }

        let pos = self.current_position();
        self.auto_semicolon(pos);
        self.push(TokenKind::Eof, pos);

        Ok(Lexed {
            tokens: self.tokens,
            comments: self.groups,
        })
    }

    fn next_token(&mut self) -> Result<(), SyntaxError> {
        let pos = self.current_position();
        let ch = match self.peek() {
            Some(c) => c,
            None => return Err(SyntaxError::new("unexpected end of file", pos)),
        };

        let kind = match ch {
            '"' => self.interpreted_string(pos)?,
            '`' => self.raw_string(pos)?,
            '\'' => self.rune(pos)?,
            c if c.is_ascii_digit() => self.number(),
            '.' if self.peek_next().is_some_and(|c| c.is_ascii_digit()) => self.number(),
            c if c.is_alphabetic() || c == '_' => self.identifier_or_keyword(),
            _ => self.punctuation(pos)?,
        };

        self.push(kind, pos);
        Ok(())
    }

    fn push(&mut self, kind: TokenKind, pos: Position) {
        self.insert_semicolon = kind.ends_statement();
        self.token_since_comment = true;
        self.tokens.push(Token { kind, pos });
    }

    fn auto_semicolon(&mut self, pos: Position) {
        if self.insert_semicolon {
            self.push(TokenKind::Semicolon, pos);
        }
    }

    fn identifier_or_keyword(&mut self) -> TokenKind {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }

        match Keyword::from_ident(&ident) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Ident(ident),
        }
    }

    fn number(&mut self) -> TokenKind {
        let mut literal = String::new();
        let hex = self.peek() == Some('0') && matches!(self.peek_next(), Some('x' | 'X'));

        while let Some(c) = self.peek() {
            let exponent_sign = matches!(c, '+' | '-')
                && match literal.chars().last() {
                    Some('e' | 'E') => !hex,
                    Some('p' | 'P') => hex,
                    _ => false,
                };

            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign {
                literal.push(c);
                self.advance();
            } else {
                break;
            }
        }

        TokenKind::Number(literal)
    }

    fn interpreted_string(&mut self, start: Position) -> Result<TokenKind, SyntaxError> {
        self.quoted('"', start, "string literal not terminated")
            .map(TokenKind::String)
    }

    fn rune(&mut self, start: Position) -> Result<TokenKind, SyntaxError> {
        self.quoted('\'', start, "rune literal not terminated")
            .map(TokenKind::Rune)
    }

    /// Single-line literal delimited by `quote` with backslash escapes.
    fn quoted(&mut self, quote: char, start: Position, error: &str) -> Result<String, SyntaxError> {
        let mut literal = String::new();
        literal.push(quote);
        self.advance();

        loop {
            match self.peek() {
                None | Some('\n') => return Err(SyntaxError::new(error, start)),
                Some('\\') => {
                    literal.push('\\');
                    self.advance();
                    match self.peek() {
                        None | Some('\n') => return Err(SyntaxError::new(error, start)),
                        Some(c) => {
                            literal.push(c);
                            self.advance();
                        }
                    }
                }
                Some(c) => {
                    literal.push(c);
                    self.advance();
                    if c == quote {
                        return Ok(literal);
                    }
                }
            }
        }
    }

    fn raw_string(&mut self, start: Position) -> Result<TokenKind, SyntaxError> {
        let mut literal = String::from('`');
        self.advance();

        loop {
            match self.advance() {
                None => {
                    return Err(SyntaxError::new("raw string literal not terminated", start));
                }
                Some('`') => {
                    literal.push('`');
                    return Ok(TokenKind::String(literal));
                }
                // carriage returns are discarded from raw strings
                Some('\r') => {}
                Some(c) => literal.push(c),
            }
        }
    }

    fn punctuation(&mut self, pos: Position) -> Result<TokenKind, SyntaxError> {
        let ch = self.advance().unwrap_or_default();
        let kind = match ch {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '~' => TokenKind::Tilde,
            '.' => {
                if self.peek() == Some('.') && self.peek_next() == Some('.') {
                    self.advance();
                    self.advance();
                    TokenKind::Ellipsis
                } else {
                    TokenKind::Dot
                }
            }
            ':' if self.peek() != Some('=') => TokenKind::Colon,
            '=' if self.peek() != Some('=') => TokenKind::Assign,
            '*' if self.peek() != Some('=') => TokenKind::Star,
            '<' if self.peek() == Some('-') => {
                self.advance();
                TokenKind::Arrow
            }
            _ => {
                let op = self.operator(ch).ok_or_else(|| {
                    SyntaxError::new(format!("unexpected character '{ch}'"), pos)
                })?;
                TokenKind::Operator(op)
            }
        };
        Ok(kind)
    }

    /// Greedy operator match; `first` has already been consumed.
    fn operator(&mut self, first: char) -> Option<&'static str> {
        for op in OPERATORS {
            let mut chars = op.chars();
            if chars.next() != Some(first) {
                continue;
            }
            let rest: Vec<char> = chars.collect();
            let matches = rest
                .iter()
                .enumerate()
                .all(|(i, c)| self.input.get(self.position + i) == Some(c));
            if matches {
                for _ in 0..rest.len() {
                    self.advance();
                }
                return Some(op);
            }
        }
        None
    }

    fn line_comment(&mut self) {
        let pos = self.current_position();
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            if c != '\r' {
                text.push(c);
            }
            self.advance();
        }
        self.record_comment(Comment {
            text,
            pos,
            end_line: pos.line,
        });
    }

    fn block_comment(&mut self) -> Result<(), SyntaxError> {
        let pos = self.current_position();
        let mut text = String::from("/*");
        self.advance();
        self.advance();

        loop {
            match self.advance() {
                None => return Err(SyntaxError::new("comment not terminated", pos)),
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    text.push_str("*/");
                    break;
                }
                Some('\r') => {}
                Some(c) => text.push(c),
            }
        }

        let end_line = self.line;
        // a comment spanning lines acts like a newline
        if end_line > pos.line {
            self.auto_semicolon(pos);
        }
        self.record_comment(Comment {
            text,
            pos,
            end_line,
        });
        Ok(())
    }

    fn record_comment(&mut self, comment: Comment) {
        let joins_previous = !self.token_since_comment
            && self
                .groups
                .last()
                .is_some_and(|g| comment.pos.line <= g.end_line() + 1);

        match self.groups.last_mut() {
            Some(group) if joins_previous => group.list.push(comment),
            _ => self.groups.push(CommentGroup {
                list: vec![comment],
            }),
        }
        self.token_since_comment = false;
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.input.get(self.position).copied()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }
}
