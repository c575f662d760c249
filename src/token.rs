use std::fmt;

#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum TokenType {
    // Single-character tokens.
    LeftParen, RightParen, LeftBrace, RightBrace,
    Comma, Dot, Minus, Plus, Semicolon, Slash, Star,
    Question, Colon,

    // One or two character tokens.
    Bang, BangEqual,
    Equal, EqualEqual,
    Greater, GreaterEqual,
    Less, LessEqual,

    // Literals.
    Identifier, String, Number,

    // Keywords.
    And, Class, Else, False, Fun, For, If, Nil, Or,
    Print, Return, Super, This, True, Var, While,

    Eof,
}

// The parsed value of a string or number token.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Literal<'a> {
    Number(f64),
    Str(&'a str),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token<'a> {
    pub token_type: TokenType,
    pub lexeme: &'a str,
    pub literal: Option<Literal<'a>>,
    pub line: u32,
    pub column: u16,
}

impl<'a> Token<'a> {
    pub fn new(token_type: TokenType,
               lexeme: &'a str,
               literal: Option<Literal<'a>>,
               line: u32,
               column: u16)
        -> Token<'a>
    {
        Token {
            token_type,
            lexeme,
            literal,
            line,
            column,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.token_type == TokenType::Eof
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.literal {
            None => write!(f, "{:?} {}", self.token_type, self.lexeme),
            Some(Literal::Number(x)) => write!(f, "{:?} {} {}", self.token_type, self.lexeme, x),
            Some(Literal::Str(s)) => write!(f, "{:?} {} {}", self.token_type, self.lexeme, s),
        }
    }
}
