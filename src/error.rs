use std::fmt;

use crate::source_loc::*;
use crate::token::Token;

// All lexical and syntax errors found in one pass over a source.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    pub causes: Vec<ParseErrorCause>,
}

impl ParseError {
    pub fn new(causes: Vec<ParseErrorCause>) -> ParseError {
        ParseError {
            causes,
        }
    }
}

// Where on its line an error is reported.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorSite {
    // Only the line is known, e.g. for lexical errors.
    Line,
    End,
    Lexeme(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseErrorCause {
    pub source_loc: SourceLoc,
    pub site: ErrorSite,
    pub message: String,
}

impl ParseErrorCause {
    pub fn new(source_loc: SourceLoc, message: &str) -> ParseErrorCause {
        ParseErrorCause {
            source_loc,
            site: ErrorSite::Line,
            message: message.to_string(),
        }
    }

    pub fn new_with_location(source_loc: SourceLoc, token: &str, message: &str) -> ParseErrorCause {
        ParseErrorCause {
            source_loc,
            site: ErrorSite::Lexeme(token.to_string()),
            message: message.to_string(),
        }
    }

    pub fn new_at_end(source_loc: SourceLoc, message: &str) -> ParseErrorCause {
        ParseErrorCause {
            source_loc,
            site: ErrorSite::End,
            message: message.to_string(),
        }
    }

    pub fn at_token(token: &Token, message: &str) -> ParseErrorCause {
        let source_loc = SourceLoc::from(token);
        if token.is_eof() {
            ParseErrorCause::new_at_end(source_loc, message)
        } else {
            ParseErrorCause::new_with_location(source_loc, token.lexeme, message)
        }
    }
}

impl From<ParseErrorCause> for ParseError {
    fn from(error: ParseErrorCause) -> ParseError {
        ParseError { causes: vec![error] }
    }
}

impl fmt::Display for ErrorSite {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorSite::Line => Ok(()),
            ErrorSite::End => write!(f, " at end"),
            ErrorSite::Lexeme(lexeme) => write!(f, " at '{}'", lexeme),
        }
    }
}

impl fmt::Display for ParseErrorCause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[Line {}] Error{}: {}", self.source_loc.line, self.site, self.message)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, cause) in self.causes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", cause)?;
        }

        Ok(())
    }
}
