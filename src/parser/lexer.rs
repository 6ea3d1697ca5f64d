//! Lexer (scanner) for source programs
//!
//! Converts raw source text into [`SpannedToken`]s consumed one at a time by
//! the parser through the [`Scanner`] trait. The parser never looks more than
//! one token ahead, so the lexer produces tokens on demand instead of
//! materialising the whole stream.

use crate::errors::CompileError;
use std::collections::VecDeque;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// All token variants produced by the lexer.
///
/// Identifiers and literals carry their payload; every other variant is
/// fully described by its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    IntLiteral(i64),
    RealLiteral(f64),

    // Identifiers
    Ident(String),

    // Keywords
    Void,
    Main,
    Int,
    Float,
    Boolean,
    If,
    Else,
    While,
    Do,
    Print,
    True,
    False,

    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    // Comparison
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    Le,    // <=
    Gt,    // >
    Ge,    // >=

    // Logical
    AndAnd, // &&
    OrOr,   // ||
    Bang,   // !

    // Assignment
    Eq, // =

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Semicolon, // ;
    Comma,     // ,

    // End of input
    Eof,
}

/// Payload-free mirror of [`Token`], used for matching and FIRST sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    IntLiteral,
    RealLiteral,
    Ident,
    Void,
    Main,
    Int,
    Float,
    Boolean,
    If,
    Else,
    While,
    Do,
    Print,
    True,
    False,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Bang,
    Eq,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Eof,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::IntLiteral(_) => TokenKind::IntLiteral,
            Token::RealLiteral(_) => TokenKind::RealLiteral,
            Token::Ident(_) => TokenKind::Ident,
            Token::Void => TokenKind::Void,
            Token::Main => TokenKind::Main,
            Token::Int => TokenKind::Int,
            Token::Float => TokenKind::Float,
            Token::Boolean => TokenKind::Boolean,
            Token::If => TokenKind::If,
            Token::Else => TokenKind::Else,
            Token::While => TokenKind::While,
            Token::Do => TokenKind::Do,
            Token::Print => TokenKind::Print,
            Token::True => TokenKind::True,
            Token::False => TokenKind::False,
            Token::Plus => TokenKind::Plus,
            Token::Minus => TokenKind::Minus,
            Token::Star => TokenKind::Star,
            Token::Slash => TokenKind::Slash,
            Token::Percent => TokenKind::Percent,
            Token::EqEq => TokenKind::EqEq,
            Token::NotEq => TokenKind::NotEq,
            Token::Lt => TokenKind::Lt,
            Token::Le => TokenKind::Le,
            Token::Gt => TokenKind::Gt,
            Token::Ge => TokenKind::Ge,
            Token::AndAnd => TokenKind::AndAnd,
            Token::OrOr => TokenKind::OrOr,
            Token::Bang => TokenKind::Bang,
            Token::Eq => TokenKind::Eq,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::LBrace => TokenKind::LBrace,
            Token::RBrace => TokenKind::RBrace,
            Token::LBracket => TokenKind::LBracket,
            Token::RBracket => TokenKind::RBracket,
            Token::Semicolon => TokenKind::Semicolon,
            Token::Comma => TokenKind::Comma,
            Token::Eof => TokenKind::Eof,
        }
    }
}

impl TokenKind {
    /// Human-readable name used in "X expected" diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::IntLiteral => "integer literal",
            TokenKind::RealLiteral => "real literal",
            TokenKind::Ident => "identifier",
            TokenKind::Void => "'void'",
            TokenKind::Main => "'main'",
            TokenKind::Int => "'int'",
            TokenKind::Float => "'float'",
            TokenKind::Boolean => "'boolean'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::Do => "'do'",
            TokenKind::Print => "'print'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Bang => "'!'",
            TokenKind::Eq => "'='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::IntLiteral(n) => write!(f, "integer literal {}", n),
            Token::RealLiteral(x) => write!(f, "real literal {:?}", x),
            Token::Ident(s) => write!(f, "identifier '{}'", s),
            other => f.write_str(other.kind().describe()),
        }
    }
}

/// A token together with where it starts in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub location: SourceLocation,
}

impl SpannedToken {
    pub fn new(token: Token, location: SourceLocation) -> Self {
        Self { token, location }
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind()
    }
}

/// Source of tokens for the parser.
///
/// Implementations must keep returning [`Token::Eof`] once the input is
/// exhausted.
pub trait Scanner {
    /// Produce the next token, advancing past it.
    fn next_token(&mut self) -> Result<SpannedToken, CompileError>;

    /// Line the scanner is currently positioned on.
    fn line(&self) -> usize;
}

/// Lexer for source programs
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input, ending with a single `Eof` token.
    pub fn tokenize(&mut self) -> Result<Vec<SpannedToken>, CompileError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token.kind() == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    fn scan(&mut self) -> Result<SpannedToken, CompileError> {
        self.skip_whitespace_and_comments()?;

        let loc = self.current_location();
        let Some(ch) = self.advance() else {
            return Ok(SpannedToken::new(Token::Eof, loc));
        };

        let token = match ch {
            '0'..='9' => self.number_literal(ch, loc)?,

            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(ch),

            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '=' => self.either('=', Token::EqEq, Token::Eq),
            '!' => self.either('=', Token::NotEq, Token::Bang),
            '<' => self.either('=', Token::Le, Token::Lt),
            '>' => self.either('=', Token::Ge, Token::Gt),
            '&' => self.doubled('&', Token::AndAnd, loc)?,
            '|' => self.doubled('|', Token::OrOr, loc)?,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            ';' => Token::Semicolon,
            ',' => Token::Comma,

            _ => {
                return Err(lex_error(loc, format!("Unexpected character: '{}'", ch)));
            }
        };

        Ok(SpannedToken::new(token, loc))
    }

    /// Two-character operator when `next` follows, otherwise the single one.
    fn either(&mut self, next: char, double: Token, single: Token) -> Token {
        if self.peek() == Some(next) {
            self.advance();
            double
        } else {
            single
        }
    }

    /// Operator that only exists in doubled form (`&&`, `||`).
    fn doubled(
        &mut self,
        ch: char,
        token: Token,
        loc: SourceLocation,
    ) -> Result<Token, CompileError> {
        if self.peek() == Some(ch) {
            self.advance();
            Ok(token)
        } else {
            Err(lex_error(loc, format!("Expected '{ch}{ch}', found lone '{ch}'")))
        }
    }

    /// Parse numeric literal: `digits` or `digits '.' digits`
    fn number_literal(
        &mut self,
        first_digit: char,
        loc: SourceLocation,
    ) -> Result<Token, CompileError> {
        let mut num_str = String::new();
        num_str.push(first_digit);
        self.take_digits(&mut num_str);

        let is_real = self.peek() == Some('.')
            && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit());

        if !is_real {
            let value = num_str.parse::<i64>().map_err(|_| {
                lex_error(loc, format!("Invalid integer literal: {}", num_str))
            })?;
            return Ok(Token::IntLiteral(value));
        }

        self.advance(); // consume '.'
        num_str.push('.');
        self.take_digits(&mut num_str);

        let value = num_str
            .parse::<f64>()
            .map_err(|_| lex_error(loc, format!("Invalid real literal: {}", num_str)))?;
        Ok(Token::RealLiteral(value))
    }

    fn take_digits(&mut self, buf: &mut String) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                buf.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "void" => Token::Void,
            "main" => Token::Main,
            "int" => Token::Int,
            "float" => Token::Float,
            "boolean" => Token::Boolean,
            "if" => Token::If,
            "else" => Token::Else,
            "while" => Token::While,
            "do" => Token::Do,
            "print" => Token::Print,
            "true" => Token::True,
            "false" => Token::False,
            _ => Token::Ident(ident),
        }
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), CompileError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), CompileError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }

        Err(lex_error(start_loc, "Unterminated block comment".to_string()))
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl Scanner for Lexer {
    fn next_token(&mut self) -> Result<SpannedToken, CompileError> {
        self.scan()
    }

    fn line(&self) -> usize {
        self.line
    }
}

/// Replays a pre-built token sequence, e.g. one produced by another scanner.
#[derive(Debug, Default)]
pub struct TokenBuffer {
    tokens: VecDeque<SpannedToken>,
    last_line: usize,
}

impl TokenBuffer {
    pub fn new(tokens: impl IntoIterator<Item = SpannedToken>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
            last_line: 1,
        }
    }
}

impl Scanner for TokenBuffer {
    fn next_token(&mut self) -> Result<SpannedToken, CompileError> {
        match self.tokens.pop_front() {
            Some(token) => {
                self.last_line = token.location.line;
                Ok(token)
            }
            None => Ok(SpannedToken::new(
                Token::Eof,
                SourceLocation::new(self.last_line, 1),
            )),
        }
    }

    fn line(&self) -> usize {
        self.last_line
    }
}

fn lex_error(location: SourceLocation, message: String) -> CompileError {
    CompileError::Lexical {
        line: location.line,
        column: location.column,
        message,
    }
}
