//! Recursive descent parser for Go declarations

use super::ast::*;
use super::lexer::{Keyword, Lexer, Token, TokenKind};
use super::{Position, SyntaxError};

type ParseResult<T> = Result<T, SyntaxError>;

/// Recursive descent parser over a lexed Go file
pub struct Parser {
    tokens: Vec<Token>,
    comments: Vec<CommentGroup>,
    position: usize,
}

impl Parser {
    pub fn new(source: &str) -> ParseResult<Self> {
        let lexed = Lexer::new(source).tokenize()?;
        Ok(Self {
            tokens: lexed.tokens,
            comments: lexed.comments,
            position: 0,
        })
    }

    /// Parse the whole file: package clause, imports, then declarations.
    pub fn parse_file(mut self) -> ParseResult<SourceFile> {
        self.expect_keyword(Keyword::Package)?;
        let package = self.expect_ident()?;
        self.expect_semicolon()?;

        let mut imports = Vec::new();
        let mut decls = Vec::new();

        while !self.at_eof() {
            match self.peek() {
                TokenKind::Semicolon => {
                    self.advance();
                }
                TokenKind::Keyword(Keyword::Import) => {
                    self.advance();
                    self.parse_import_decl(&mut imports)?;
                }
                TokenKind::Keyword(Keyword::Type) => {
                    self.advance();
                    decls.push(Decl::Type(self.parse_type_decl()?));
                }
                TokenKind::Keyword(Keyword::Func) => {
                    decls.push(Decl::Func(self.parse_func_decl()?));
                }
                TokenKind::Keyword(Keyword::Var) => {
                    decls.push(self.skip_value_decl(ValueKind::Var)?);
                }
                TokenKind::Keyword(Keyword::Const) => {
                    decls.push(self.skip_value_decl(ValueKind::Const)?);
                }
                other => {
                    return Err(self.error(format!("expected declaration, found {other}")));
                }
            }
        }

        Ok(SourceFile {
            package,
            imports,
            decls,
            comments: self.comments,
        })
    }

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------

    fn parse_import_decl(&mut self, imports: &mut Vec<ImportSpec>) -> ParseResult<()> {
        if self.eat(&TokenKind::LParen) {
            while !self.check(&TokenKind::RParen) {
                imports.push(self.parse_import_spec()?);
                self.expect_semicolon_or(&TokenKind::RParen)?;
            }
            self.expect(&TokenKind::RParen)?;
        } else {
            imports.push(self.parse_import_spec()?);
        }
        self.expect_semicolon()
    }

    fn parse_import_spec(&mut self) -> ParseResult<ImportSpec> {
        let pos = self.current_position();
        let name = match self.peek().clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Some(name)
            }
            TokenKind::Dot => {
                self.advance();
                Some(".".to_string())
            }
            _ => None,
        };

        match self.peek().clone() {
            TokenKind::String(path) => {
                self.advance();
                Ok(ImportSpec { name, path, pos })
            }
            other => Err(self.error(format!("expected import path, found {other}"))),
        }
    }

    fn parse_type_decl(&mut self) -> ParseResult<Vec<TypeSpec>> {
        let mut specs = Vec::new();
        if self.eat(&TokenKind::LParen) {
            while !self.check(&TokenKind::RParen) {
                specs.push(self.parse_type_spec()?);
                self.expect_semicolon_or(&TokenKind::RParen)?;
            }
            self.expect(&TokenKind::RParen)?;
        } else {
            specs.push(self.parse_type_spec()?);
        }
        self.expect_semicolon()?;
        Ok(specs)
    }

    fn parse_type_spec(&mut self) -> ParseResult<TypeSpec> {
        let name = self.expect_ident()?;

        let has_type_params = self.check(&TokenKind::LBracket) && self.starts_type_params();
        if has_type_params {
            self.skip_balanced()?;
        }

        let is_alias = self.eat(&TokenKind::Assign);
        let ty = self.parse_type()?;

        Ok(TypeSpec {
            name,
            has_type_params,
            is_alias,
            ty,
        })
    }

    /// Distinguishes `type L[T any] ...` from `type A [N]int`.
    fn starts_type_params(&self) -> bool {
        match (self.peek_at(1), self.peek_at(2)) {
            (
                TokenKind::Ident(_),
                TokenKind::RBracket | TokenKind::Dot | TokenKind::Star | TokenKind::Operator(_),
            ) => false,
            (TokenKind::Ident(_), _) => true,
            _ => false,
        }
    }

    fn parse_func_decl(&mut self) -> ParseResult<FuncDecl> {
        self.expect_keyword(Keyword::Func)?;

        let is_method = self.check(&TokenKind::LParen);
        if is_method {
            self.skip_balanced()?;
        }

        let name = self.expect_ident()?;
        if self.check(&TokenKind::LBracket) {
            self.skip_balanced()?;
        }
        self.parse_signature()?;

        if self.check(&TokenKind::LBrace) {
            self.skip_balanced()?;
        }
        self.expect_semicolon()?;

        Ok(FuncDecl { name, is_method })
    }

    /// Skips `(params) [results]`.
    fn parse_signature(&mut self) -> ParseResult<()> {
        if !self.check(&TokenKind::LParen) {
            return Err(self.error(format!("expected '(', found {}", self.peek())));
        }
        self.skip_balanced()?;

        if self.check(&TokenKind::LParen) {
            self.skip_balanced()?;
        } else if self.starts_type() {
            self.parse_type()?;
        }
        Ok(())
    }

    fn skip_value_decl(&mut self, kind: ValueKind) -> ParseResult<Decl> {
        let pos = self.current_position();
        self.advance();

        if self.check(&TokenKind::LParen) {
            self.skip_balanced()?;
        } else {
            while !self.check(&TokenKind::Semicolon) && !self.at_eof() {
                if self.is_open_bracket() {
                    self.skip_balanced()?;
                } else {
                    self.advance();
                }
            }
        }
        self.expect_semicolon()?;

        Ok(Decl::Value { kind, pos })
    }

    // ------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------

    fn starts_type(&self) -> bool {
        matches!(
            self.peek(),
            TokenKind::Ident(_)
                | TokenKind::Star
                | TokenKind::LBracket
                | TokenKind::LParen
                | TokenKind::Arrow
                | TokenKind::Keyword(
                    Keyword::Map
                        | Keyword::Chan
                        | Keyword::Func
                        | Keyword::Interface
                        | Keyword::Struct
                )
        )
    }

    fn parse_type(&mut self) -> ParseResult<TypeExpr> {
        match self.peek().clone() {
            TokenKind::Ident(_) => self.parse_type_name(),
            TokenKind::Star => {
                self.advance();
                Ok(TypeExpr::Pointer(Box::new(self.parse_type()?)))
            }
            TokenKind::LBracket => self.parse_array_type(),
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_type()?;
                self.expect(&TokenKind::RParen)?;
                Ok(TypeExpr::Paren(Box::new(inner)))
            }
            TokenKind::Arrow => {
                self.advance();
                self.expect_keyword(Keyword::Chan)?;
                let elem = self.parse_type()?;
                Ok(TypeExpr::Chan {
                    dir: ChanDir::Recv,
                    elem: Box::new(elem),
                })
            }
            TokenKind::Keyword(Keyword::Chan) => {
                self.advance();
                let dir = if self.eat(&TokenKind::Arrow) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                let elem = self.parse_type()?;
                Ok(TypeExpr::Chan {
                    dir,
                    elem: Box::new(elem),
                })
            }
            TokenKind::Keyword(Keyword::Map) => {
                self.advance();
                self.expect(&TokenKind::LBracket)?;
                let key = self.parse_type()?;
                self.expect(&TokenKind::RBracket)?;
                let value = self.parse_type()?;
                Ok(TypeExpr::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                })
            }
            TokenKind::Keyword(Keyword::Func) => {
                self.advance();
                self.parse_signature()?;
                Ok(TypeExpr::Func)
            }
            TokenKind::Keyword(Keyword::Interface) => {
                self.advance();
                if !self.check(&TokenKind::LBrace) {
                    return Err(self.error(format!("expected '{{', found {}", self.peek())));
                }
                self.skip_balanced()?;
                Ok(TypeExpr::Interface)
            }
            TokenKind::Keyword(Keyword::Struct) => {
                self.advance();
                Ok(TypeExpr::Struct(self.parse_struct_body()?))
            }
            other => Err(self.error(format!("expected type, found {other}"))),
        }
    }

    /// `T`, `pkg.T`, optionally followed by type arguments.
    fn parse_type_name(&mut self) -> ParseResult<TypeExpr> {
        let first = self.expect_ident()?;
        let base = if self.eat(&TokenKind::Dot) {
            let name = self.expect_ident()?;
            TypeExpr::Qualified {
                package: first,
                name,
            }
        } else {
            TypeExpr::Named(first)
        };

        if !self.check(&TokenKind::LBracket) {
            return Ok(base);
        }

        self.advance();
        let mut args = Vec::new();
        while !self.check(&TokenKind::RBracket) {
            args.push(self.parse_type()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBracket)?;

        Ok(TypeExpr::Generic {
            base: Box::new(base),
            args,
        })
    }

    fn parse_array_type(&mut self) -> ParseResult<TypeExpr> {
        self.expect(&TokenKind::LBracket)?;

        let len = if self.eat(&TokenKind::RBracket) {
            None
        } else {
            let mut text = String::new();
            let mut depth = 0usize;
            loop {
                match self.peek() {
                    TokenKind::RBracket if depth == 0 => break,
                    TokenKind::Eof => return Err(self.error("unterminated array length")),
                    TokenKind::LBracket | TokenKind::LParen | TokenKind::LBrace => depth += 1,
                    TokenKind::RBracket | TokenKind::RParen | TokenKind::RBrace => {
                        depth = depth.saturating_sub(1)
                    }
                    _ => {}
                }
                text.push_str(self.peek().text());
                self.advance();
            }
            self.expect(&TokenKind::RBracket)?;
            Some(text)
        };

        let elem = self.parse_type()?;
        Ok(TypeExpr::Array {
            len,
            elem: Box::new(elem),
        })
    }

    /// `{ field; field; ... }` after the `struct` keyword.
    fn parse_struct_body(&mut self) -> ParseResult<StructType> {
        self.expect(&TokenKind::LBrace)?;

        let mut fields = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.eat(&TokenKind::Semicolon) {
                continue;
            }
            fields.push(self.parse_field()?);
            self.expect_semicolon_or(&TokenKind::RBrace)?;
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(StructType { fields })
    }

    fn parse_field(&mut self) -> ParseResult<Field> {
        let pos = self.current_position();

        let embedded = match self.peek() {
            TokenKind::Star => true,
            TokenKind::Ident(_) => matches!(
                self.peek_at(1),
                TokenKind::Semicolon | TokenKind::RBrace | TokenKind::String(_) | TokenKind::Dot
            ),
            other => return Err(self.error(format!("expected field, found {other}"))),
        };

        let mut names = Vec::new();
        if !embedded {
            names.push(self.expect_ident()?);
            while self.eat(&TokenKind::Comma) {
                names.push(self.expect_ident()?);
            }
        }

        let ty = self.parse_type()?;

        let tag = match self.peek().clone() {
            TokenKind::String(tag) => {
                self.advance();
                Some(tag)
            }
            _ => None,
        };

        Ok(Field {
            names,
            ty,
            tag,
            pos,
        })
    }

    // ------------------------------------------------------------------
    // Token helpers
    // ------------------------------------------------------------------

    fn peek(&self) -> &TokenKind {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> &TokenKind {
        self.tokens
            .get(self.position + offset)
            .or_else(|| self.tokens.last())
            .map_or(&TokenKind::Eof, |t| &t.kind)
    }

    fn current_position(&self) -> Position {
        self.tokens
            .get(self.position)
            .or_else(|| self.tokens.last())
            .map_or_else(Position::default, |t| t.pos)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek(), TokenKind::Eof)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek() == kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> ParseResult<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.error(format!("expected {kind}, found {}", self.peek())))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> ParseResult<()> {
        self.expect(&TokenKind::Keyword(keyword))
    }

    fn expect_ident(&mut self) -> ParseResult<Ident> {
        let pos = self.current_position();
        match self.peek().clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Ident::new(name, pos))
            }
            other => Err(self.error(format!("expected identifier, found {other}"))),
        }
    }

    fn expect_semicolon(&mut self) -> ParseResult<()> {
        if self.eat(&TokenKind::Semicolon) || self.at_eof() {
            Ok(())
        } else {
            Err(self.error(format!("expected ';' or newline, found {}", self.peek())))
        }
    }

    /// A terminator may be omitted right before a closing bracket.
    fn expect_semicolon_or(&mut self, closing: &TokenKind) -> ParseResult<()> {
        if self.check(closing) {
            Ok(())
        } else {
            self.expect_semicolon()
        }
    }

    fn is_open_bracket(&self) -> bool {
        matches!(
            self.peek(),
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace
        )
    }

    /// Skips from an opening bracket through its matching closer.
    fn skip_balanced(&mut self) -> ParseResult<()> {
        let start = self.current_position();
        let mut stack: Vec<TokenKind> = Vec::new();

        loop {
            let closer = match self.peek() {
                TokenKind::LParen => Some(TokenKind::RParen),
                TokenKind::LBracket => Some(TokenKind::RBracket),
                TokenKind::LBrace => Some(TokenKind::RBrace),
                _ => None,
            };

            if let Some(closer) = closer {
                stack.push(closer);
            } else if matches!(
                self.peek(),
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace
            ) {
                if stack.last() != Some(self.peek()) {
                    return Err(self.error(format!("unexpected {}", self.peek())));
                }
                stack.pop();
            } else if self.at_eof() {
                return Err(SyntaxError::new("unbalanced brackets", start));
            }

            self.advance();
            if stack.is_empty() {
                return Ok(());
            }
        }
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(message, self.current_position())
    }
}
