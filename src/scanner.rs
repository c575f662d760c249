use std::iter::Peekable;
use std::mem;

use fnv::FnvHashMap;
use unicode_segmentation::{GraphemeIndices, UnicodeSegmentation};

use crate::error::*;
use crate::source_loc::*;
use crate::token::*;

lazy_static! {
    static ref KEYWORDS: FnvHashMap<&'static str, TokenType> = {
        let mut m = FnvHashMap::default();
        use crate::token::TokenType::*;
        m.insert("and", And);
        m.insert("class", Class);
        m.insert("else", Else);
        m.insert("false", False);
        m.insert("for", For);
        m.insert("fun", Fun);
        m.insert("if", If);
        m.insert("nil", Nil);
        m.insert("or", Or);
        m.insert("print", Print);
        m.insert("return", Return);
        m.insert("super", Super);
        m.insert("this", This);
        m.insert("true", True);
        m.insert("var", Var);
        m.insert("while", While);

        m
    };
}

#[derive(Clone)]
pub struct Scanner<'source, 'g> {
    source: &'source str,
    tokens: Vec<Token<'source>>,
    errors: Vec<ParseErrorCause>,
    grapheme_indices: Peekable<GraphemeIndices<'g>>,
    start: usize,
    current: usize,
    line: u32,
    column: u16,
    start_column: u16,
    eof: bool,
}

impl<'source, 'g> Scanner<'source, 'g> where 'source: 'g {
    pub fn new(source: &'source str) -> Scanner<'source, 'g> {
        Scanner {
            source,
            grapheme_indices: source.grapheme_indices(true).peekable(),
            tokens: Vec::new(),
            errors: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            start_column: 1,
            eof: false,
        }
    }

    // Scans everything and fails if there were any lexical errors.
    #[allow(dead_code)]
    pub fn scan_tokens(&mut self) -> Result<Vec<Token<'source>>, ParseError> {
        let (tokens, errors) = self.scan();

        if errors.is_empty() {
            Ok(tokens)
        } else {
            Err(ParseError::new(errors))
        }
    }

    // Scans everything, returning the tokens that could be recognized along
    // with every lexical error.  The parser still runs on the tokens so that
    // syntax errors get reported in the same pass.
    pub fn scan_all(mut self) -> (Vec<Token<'source>>, Vec<ParseErrorCause>) {
        self.scan()
    }

    fn scan(&mut self) -> (Vec<Token<'source>>, Vec<ParseErrorCause>) {
        while ! self.is_at_end() {
            // We are at the beginning of the next lexeme.
            self.start = self.peek_index();
            self.scan_token();
        }

        self.start = self.source.len();
        self.start_column = self.column.saturating_sub(1);
        self.add_token(TokenType::Eof);

        let tokens = mem::take(&mut self.tokens);
        let errors = mem::take(&mut self.errors);

        (tokens, errors)
    }

    fn scan_token(&mut self) {
        self.start_column = self.column;
        match self.advance() {
            None => (),
            Some((_, grapheme_cluster)) => {
                use crate::token::TokenType::*;
                match grapheme_cluster {
                    "(" => self.add_token(LeftParen),
                    ")" => self.add_token(RightParen),
                    "{" => self.add_token(LeftBrace),
                    "}" => self.add_token(RightBrace),
                    "," => self.add_token(Comma),
                    "." => self.add_token(Dot),
                    "-" => self.add_token(Minus),
                    "+" => self.add_token(Plus),
                    ";" => self.add_token(Semicolon),
                    "*" => self.add_token(Star),
                    "?" => self.add_token(Question),
                    ":" => self.add_token(Colon),
                    "!" => {
                        if self.matches("=") {
                            self.add_token(BangEqual);
                        } else {
                            self.add_token(Bang);
                        }
                    }
                    "=" => {
                        if self.matches("=") {
                            self.add_token(EqualEqual);
                        } else {
                            self.add_token(Equal);
                        }
                    }
                    "<" => {
                        if self.matches("=") {
                            self.add_token(LessEqual);
                        } else {
                            self.add_token(Less);
                        }
                    }
                    ">" => {
                        if self.matches("=") {
                            self.add_token(GreaterEqual);
                        } else {
                            self.add_token(Greater);
                        }
                    }
                    "/" => {
                        if self.matches("/") {
                            // A comment until the end of the line.
                            self.advance_to_eol();
                        } else if self.matches("*") {
                            self.scan_block_comment();
                        } else {
                            self.add_token(Slash);
                        }
                    }
                    " " | "\r" | "\t" => (), // Ignore whitespace.
                    "\n" | "\r\n" => self.new_line(),
                    // A combining mark can join onto the quote.
                    _ if is_quote(grapheme_cluster) => self.scan_string(),
                    _ => {
                        if is_digit(grapheme_cluster) {
                            self.scan_number();
                        }
                        else if is_alphabetic(grapheme_cluster) {
                            self.scan_identifier();
                        }
                        else {
                            let loc = SourceLoc::new(self.line, self.start_column);
                            self.error(ParseErrorCause::new(loc, "Unexpected character."));
                        }
                    }
                };
            }
        }
    }

    // Conditionally advance if the next grapheme cluster matches an expected
    // string.  Returns true if we matched.
    fn matches(&mut self, expected: &str) -> bool {
        if self.is_at_end() {
            return false;
        }

        if ! self.is_match(expected) {
            return false;
        }

        // Consume this cluster when it's expected.
        self.advance();

        true
    }

    fn peek_index(&mut self) -> usize {
        match self.grapheme_indices.peek() {
            None => self.source.len(),
            Some((i, _)) => *i,
        }
    }

    fn peek_grapheme(&mut self) -> Option<&'g str> {
        self.grapheme_indices.peek().map(|(_, grapheme_cluster)| *grapheme_cluster)
    }

    // This is looking ahead 2 characters.
    fn peek_next_grapheme(&mut self) -> Option<&'g str> {
        let mut cloned = self.grapheme_indices.clone();
        cloned.next()?;

        cloned.peek().map(|(_, grapheme_cluster)| *grapheme_cluster)
    }

    fn is_match(&mut self, expected: &str) -> bool {
        self.peek_grapheme() == Some(expected)
    }

    // Advance the grapheme cluster iterator.
    fn advance(&mut self) -> Option<(usize, &'g str)> {
        self.column = self.column.saturating_add(1);

        match self.grapheme_indices.next() {
            None => {
                self.eof = true;

                None
            }
            Some((i, cluster)) => {
                self.current = i;

                Some((i, cluster))
            }
        }
    }

    // Called after a newline has been consumed.
    fn new_line(&mut self) {
        self.line = self.line.saturating_add(1);
        self.column = 1;
    }

    fn advance_to_eol(&mut self) {
        while let Some(grapheme_cluster) = self.peek_grapheme() {
            if is_newline(grapheme_cluster) {
                // Keep the newline next.
                break;
            }
            self.advance();
        }
    }

    // Block comments don't nest.  The first "*/" ends the comment.
    fn scan_block_comment(&mut self) {
        loop {
            match self.peek_grapheme() {
                None => {
                    let loc = SourceLoc::new(self.line, self.column);
                    self.error(ParseErrorCause::new(loc, "Comment does not terminate."));
                    // Step onto the end so scanning stops.
                    self.advance();
                    return;
                }
                Some("*") if self.peek_next_grapheme() == Some("/") => {
                    self.advance();
                    self.advance();
                    return;
                }
                Some(grapheme_cluster) => {
                    self.advance();
                    if is_newline(grapheme_cluster) {
                        self.new_line();
                    }
                }
            }
        }
    }

    fn scan_string(&mut self) {
        // Anything joined onto the opening quote is content.
        let start_index = self.start + '"'.len_utf8();
        let start_line = self.line;

        while ! self.peek_grapheme().map_or(false, is_quote) && ! self.is_at_end() {
            if let Some(grapheme_cluster) = self.peek_grapheme() {
                if is_newline(grapheme_cluster) {
                    self.line = self.line.saturating_add(1);
                    self.column = 0;
                }
            }
            self.advance();
        }

        // Unterminated string.
        if self.is_at_end() {
            let column = self.column.saturating_sub(1);
            self.error(ParseErrorCause::new(SourceLoc::new(self.line, column), "Unterminated string."));
            return;
        }

        // The closing quote.  Anything joined onto it stays out of the value.
        self.advance();

        // Trim the surrounding quotes.
        let value = &self.source[start_index..self.current];
        self.add_string_literal_token(value, start_line);
    }

    fn scan_number(&mut self) {
        self.advance_while_digit();

        // Look for a fractional part.  A trailing dot isn't part of the number.
        if self.is_match(".") {
            if let Some(c) = self.peek_next_grapheme() {
                if is_digit(c) {
                    // Consume the dot.
                    self.advance();
                    self.advance_while_digit();
                }
            }
        }

        let value = &self.source[self.start..self.peek_index()];
        match value.parse::<f64>() {
            Ok(number) => self.add_number_literal_token(number),
            Err(_) => {
                let loc = SourceLoc::new(self.line, self.start_column);
                self.error(ParseErrorCause::new(loc, &format!("Invalid number: {}", value)));
            }
        }
    }

    fn advance_while_digit(&mut self) {
        while let Some(grapheme_cluster) = self.peek_grapheme() {
            if ! is_digit(grapheme_cluster) {
                break;
            }
            self.advance();
        }
    }

    fn scan_identifier(&mut self) {
        while let Some(grapheme_cluster) = self.peek_grapheme() {
            if ! is_alphanumeric(grapheme_cluster) {
                break;
            }
            self.advance();
        }

        let text = &self.source[self.start..self.peek_index()];

        // See if the identifier is a reserved word.
        let token_type = match KEYWORDS.get(text) {
            None => TokenType::Identifier,
            Some(token_type) => *token_type,
        };

        self.add_token(token_type);
    }

    fn is_at_end(&self) -> bool {
        self.eof
    }

    fn error(&mut self, error: ParseErrorCause) {
        self.errors.push(error);
    }

    // Add a token to the output.
    fn add_token(&mut self, token_type: TokenType) {
        let text = &self.source[self.start..self.peek_index()];
        let token = Token::new(token_type, text, None, self.line, self.start_column);
        self.tokens.push(token);
    }

    fn add_string_literal_token(&mut self, value: &'source str, start_line: u32) {
        let text = &self.source[self.start..self.peek_index()];
        let token = Token::new(TokenType::String, text, Some(Literal::Str(value)), start_line, self.start_column);
        self.tokens.push(token);
    }

    fn add_number_literal_token(&mut self, value: f64) {
        let text = &self.source[self.start..self.peek_index()];
        let token = Token::new(TokenType::Number, text, Some(Literal::Number(value)), self.line, self.start_column);
        self.tokens.push(token);
    }
}

fn is_quote(grapheme: &str) -> bool {
    grapheme.starts_with('"')
}

fn is_newline(grapheme: &str) -> bool {
    // "\r\n" is a single grapheme cluster.
    grapheme == "\n" || grapheme == "\r\n"
}

fn is_digit(grapheme: &str) -> bool {
    // Note: built-in is_numeric() uses a more complicated unicode definition of
    // numeric.
    matches!(grapheme, "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9")
}

fn is_alphabetic(grapheme: &str) -> bool {
    // Only look at the first base character.
    match grapheme.chars().next() {
        None => false,
        Some(c) => c.is_alphabetic() || c == '_',
    }
}

fn is_alphanumeric(grapheme: &str) -> bool {
    // Only look at the first base character.
    match grapheme.chars().next() {
        None => false,
        Some(c) => c.is_alphanumeric() || c == '_',
    }
}
