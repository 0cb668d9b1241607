//! SQL Tokens - the atomic units of SQL output.
//!
//! Tokens are layout-agnostic; whitespace tokens decide at serialization time
//! whether the query renders on a single line or across indented lines.

/// How whitespace tokens are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Everything on one line, clauses separated by single spaces.
    #[default]
    Compact,
    /// One clause per line, nested subqueries indented by paren depth.
    Pretty,
}

/// SQL Token - every element the funnel compiler emits.
///
/// Adding a new variant here will cause compile errors everywhere
/// it needs to be handled (exhaustive matching).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Select,
    From,
    Where,
    And,
    As,
    On,
    Join,
    Full,
    Outer,
    /// Legacy BigQuery shuffle hint: `JOIN EACH`.
    Each,
    GroupBy,
    OrderBy,
    Desc,

    // === Punctuation ===
    Comma,
    Dot,
    LParen,
    RParen,

    // === Operators ===
    Eq,

    // === Whitespace / Formatting ===
    Space,
    /// Clause separator: a space in compact layout, a line break in pretty layout.
    Newline,
    /// Subquery boundary: nothing in compact layout, a line break in pretty layout.
    Break,
    Indent(usize),

    // === Dynamic Content ===
    /// Simple identifier (column, alias). Emitted unquoted.
    Ident(String),
    /// Integer literal
    LitInt(i64),
    /// Function name, uppercased on output.
    FunctionName(String),

    // === Escape Hatch ===
    /// Raw SQL passed directly to output without escaping.
    ///
    /// Funnel inputs (table expressions, date literals, patterns, filter
    /// operands) are trusted SQL fragments and travel through this variant.
    Raw(String),
}

impl Token {
    /// Serialize a non-layout token.
    ///
    /// Whitespace tokens that depend on nesting depth (`Newline`, `Break`)
    /// are resolved by [`TokenStream::serialize`]; here they fall back to
    /// their compact form.
    pub fn serialize(&self, layout: Layout) -> String {
        match self {
            // Keywords
            Token::Select => "SELECT".into(),
            Token::From => "FROM".into(),
            Token::Where => "WHERE".into(),
            Token::And => "AND".into(),
            Token::As => "AS".into(),
            Token::On => "ON".into(),
            Token::Join => "JOIN".into(),
            Token::Full => "FULL".into(),
            Token::Outer => "OUTER".into(),
            Token::Each => "EACH".into(),
            Token::GroupBy => "GROUP BY".into(),
            Token::OrderBy => "ORDER BY".into(),
            Token::Desc => "DESC".into(),

            // Punctuation
            Token::Comma => ",".into(),
            Token::Dot => ".".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),

            // Operators
            Token::Eq => "=".into(),

            // Whitespace
            Token::Space => " ".into(),
            Token::Newline => " ".into(),
            Token::Break => String::new(),
            Token::Indent(n) => match layout {
                Layout::Compact => String::new(),
                Layout::Pretty => "  ".repeat(*n),
            },

            // Dynamic
            Token::Ident(name) => name.clone(),
            Token::LitInt(n) => n.to_string(),
            Token::FunctionName(name) => name.to_uppercase(),

            // Escape hatch
            Token::Raw(s) => s.clone(),
        }
    }
}

/// A stream of tokens that can be serialized to SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Append another token stream.
    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    /// Serialize all tokens to a SQL string.
    ///
    /// In pretty layout, line tokens indent by the number of parentheses open
    /// at that point; a line token directly before `)` dedents by one so the
    /// closing paren lines up with the line that opened it.
    pub fn serialize(&self, layout: Layout) -> String {
        if layout == Layout::Compact {
            return self.tokens.iter().map(|t| t.serialize(layout)).collect();
        }

        let mut out = String::new();
        let mut depth: usize = 0;
        for (i, token) in self.tokens.iter().enumerate() {
            match token {
                Token::LParen => {
                    depth += 1;
                    out.push('(');
                }
                Token::RParen => {
                    depth = depth.saturating_sub(1);
                    out.push(')');
                }
                Token::Newline | Token::Break => {
                    let closing = matches!(self.tokens.get(i + 1), Some(Token::RParen));
                    let level = if closing {
                        depth.saturating_sub(1)
                    } else {
                        depth
                    };
                    out.push('\n');
                    out.push_str(&"  ".repeat(level));
                }
                other => out.push_str(&other.serialize(layout)),
            }
        }
        out
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn newline(&mut self) -> &mut Self {
        self.push(Token::Newline)
    }
    pub fn brk(&mut self) -> &mut Self {
        self.push(Token::Break)
    }
    pub fn indent(&mut self, n: usize) -> &mut Self {
        self.push(Token::Indent(n))
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
}
