use logos::Logos;
use tracing::debug;

use crate::error::{LexError, LexErrorKind};

/// The kind of a lexical token.
///
/// This enum defines every token the language recognizes. The keyword table
/// lives in the `#[token]` attributes: an identifier that spells a keyword
/// lexes as that keyword, anything else as [`TokenKind::Identifier`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(extras = LexerExtras)]
#[logos(error = LexErrorKind)]
pub enum TokenKind {
    /// `(`
    #[token("(")]
    LeftParen,
    /// `)`
    #[token(")")]
    RightParen,
    /// `{`
    #[token("{")]
    LeftBrace,
    /// `}`
    #[token("}")]
    RightBrace,
    /// `[`
    #[token("[")]
    LeftBracket,
    /// `]`
    #[token("]")]
    RightBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `-`
    #[token("-")]
    Minus,
    /// `+`
    #[token("+")]
    Plus,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `/`
    #[token("/")]
    Slash,
    /// `*`
    #[token("*")]
    Star,
    /// `%`
    #[token("%")]
    Percent,
    /// `!`
    #[token("!")]
    Bang,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `=`
    #[token("=")]
    Equal,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,

    /// Variable or function names such as `x` or `Math_sqrt`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
    /// String literals, delimited by matching `'` or `"`.
    #[token("\"", lex_string)]
    #[token("'", lex_string)]
    String,
    /// Numeric literals such as `42` or `12.5`.
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    /// `and`
    #[token("and")]
    And,
    /// `const`
    #[token("const")]
    Const,
    /// `else`
    #[token("else")]
    Else,
    /// `false`
    #[token("false")]
    False,
    /// `for`
    #[token("for")]
    For,
    /// `fun`
    #[token("fun")]
    Fun,
    /// `if`
    #[token("if")]
    If,
    /// `let`
    #[token("let")]
    Let,
    /// `nil`
    #[token("nil")]
    Nil,
    /// `or`
    #[token("or")]
    Or,
    /// `print`
    #[token("print")]
    Print,
    /// `return`
    #[token("return")]
    Return,
    /// `true`
    #[token("true")]
    True,
    /// `var`
    #[token("var")]
    Var,
    /// `while`
    #[token("while")]
    While,

    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Line breaks. Advances the line counter and is never emitted.
    #[token("\n", |lex| {
        let next_line_start = lex.span().end;
        lex.extras.new_line(next_line_start);
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,

    /// End of input. Appended by [`tokenize`], never matched.
    Eof,
}

/// The literal value carried by number and string tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A parsed numeric literal.
    Number(f64),
    /// The contents of a string literal, without its quotes.
    Str(String),
}

/// A lexical token: its kind, the source text it was matched from, its
/// literal value (if any) and where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:    TokenKind,
    /// The raw source text matched for this token.
    pub lexeme:  String,
    /// The parsed value of number and string literals.
    pub literal: Option<Literal>,
    /// 1-based source line of the first character.
    pub line:    usize,
    /// 1-based column of the first character.
    pub column:  usize,
}

impl Token {
    /// Builds the end-of-input token for the given position.
    #[must_use]
    pub const fn eof(line: usize, column: usize) -> Self {
        Self { kind: TokenKind::Eof,
               lexeme: String::new(),
               literal: None,
               line,
               column }
    }

    /// Returns `true` if this token is the end-of-input marker.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and the byte offset where it starts, so that
/// every token can be given a line and column for diagnostics.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

impl LexerExtras {
    /// Records a line break ending at byte offset `next_line_start`.
    pub const fn new_line(&mut self, next_line_start: usize) {
        self.line += 1;
        self.line_start = next_line_start;
    }

    /// Returns the `(line, column)` of byte offset `offset` in `source`.
    ///
    /// Columns count characters, not bytes.
    #[must_use]
    pub fn position(&self, source: &str, offset: usize) -> (usize, usize) {
        let column = source.get(self.line_start..offset)
                           .map_or(0, |prefix| prefix.chars().count());
        (self.line, column + 1)
    }

    /// Accounts for line breaks inside a token that starts at byte offset
    /// `start`. Only string literals may span lines.
    pub fn consume(&mut self, lexeme: &str, start: usize) {
        for (i, _) in lexeme.match_indices('\n') {
            self.new_line(start + i + 1);
        }
    }
}

/// Scans the rest of a string literal after its opening quote.
///
/// The closing quote must be the same character as the opening one. Line
/// breaks inside the literal are allowed.
fn lex_string(lex: &mut logos::Lexer<TokenKind>) -> Result<(), LexErrorKind> {
    let quote = lex.slice().chars().next().unwrap_or('"');
    let remainder = lex.remainder();

    match remainder.find(quote) {
        Some(end) => {
            lex.bump(end + quote.len_utf8());
            Ok(())
        },
        None => {
            lex.bump(remainder.len());
            Err(LexErrorKind::UnterminatedString)
        },
    }
}

/// Converts source text into a sequence of tokens terminated by
/// [`TokenKind::Eof`].
///
/// # Errors
/// Returns a [`LexError`] for an unterminated string literal or for any
/// character that cannot start a token.
///
/// # Example
/// ```
/// use arcanesigil::interpreter::lexer::{Literal, TokenKind, tokenize};
///
/// let tokens = tokenize("let x = 12.50;").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            [TokenKind::Let,
///             TokenKind::Identifier,
///             TokenKind::Equal,
///             TokenKind::Number,
///             TokenKind::Semicolon,
///             TokenKind::Eof]);
/// assert_eq!(tokens[3].literal, Some(Literal::Number(12.5)));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer_with_extras(source, LexerExtras::default());

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let lexeme = lexer.slice();
        let (line, column) = lexer.extras.position(source, span.start);

        let kind = result.map_err(|kind| LexError { kind,
                                                    lexeme: lexeme.to_string(),
                                                    line,
                                                    column })?;

        let literal = match kind {
            TokenKind::Number => {
                let value = lexeme.parse().map_err(|_| LexError { kind: LexErrorKind::InvalidNumber,
                                                                  lexeme: lexeme.to_string(),
                                                                  line,
                                                                  column })?;
                Some(Literal::Number(value))
            },
            TokenKind::String => Some(Literal::Str(lexeme[1..lexeme.len() - 1].to_string())),
            _ => None,
        };

        tokens.push(Token { kind,
                            lexeme: lexeme.to_string(),
                            literal,
                            line,
                            column });
        lexer.extras.consume(lexeme, span.start);
    }

    let (line, column) = lexer.extras.position(source, source.len());
    tokens.push(Token::eof(line, column));

    debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}
