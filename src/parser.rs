use crate::ast::*;
use crate::error::*;
use crate::scanner::*;
use crate::source_loc::*;
use crate::token::*;

type ParseResult<T> = Result<T, ParseErrorCause>;

// Scans and parses a whole program.  Lexical and syntax errors are collected
// together; if there were any, no statements are returned.
pub fn parse(source: &str) -> Result<Vec<Stmt>, ParseError> {
    let (tokens, mut errors) = Scanner::new(source).scan_all();

    #[cfg(feature = "debug-print-tokens")]
    {
        for token in tokens.iter() {
            eprintln!("{}", token);
        }
    }

    let mut parser = Parser::new(tokens);
    let statements = parser.parse();
    errors.append(&mut parser.errors);

    if ! errors.is_empty() {
        return Err(ParseError::new(errors));
    }

    #[cfg(feature = "debug-print-ast")]
    {
        for statement in statements.iter() {
            eprintln!("{}", statement);
        }
    }

    Ok(statements)
}

// Parses a single expression that must span the entire source.
#[allow(dead_code)]
pub fn parse_expression(source: &str) -> Result<Expr, ParseError> {
    let tokens = Scanner::new(source).scan_tokens()?;
    let mut parser = Parser::new(tokens);

    let result = parser.expression()
        .and_then(|expr| parser.expect_end().map(|_| expr));

    match result {
        Ok(expr) => Ok(expr),
        Err(cause) => {
            let mut causes = std::mem::take(&mut parser.errors);
            causes.push(cause);

            Err(ParseError::new(causes))
        }
    }
}

#[derive(Debug)]
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    current: usize,
    errors: Vec<ParseErrorCause>,
}

impl<'a> Parser<'a> {
    pub fn new(mut tokens: Vec<Token<'a>>) -> Parser<'a> {
        // The token stream always ends with an end marker.
        if tokens.last().map_or(true, |token| ! token.is_eof()) {
            let line = tokens.last().map_or(1, |token| token.line);
            tokens.push(Token::new(TokenType::Eof, "", None, line, 1));
        }

        Parser {
            tokens,
            current: 0,
            errors: Vec::new(),
        }
    }

    // Parses declarations until the end of input.  A declaration with a
    // syntax error is dropped and parsing resumes at the next statement
    // boundary.
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();

        while ! self.is_at_end() {
            match self.declaration() {
                Ok(statement) => statements.push(statement),
                Err(cause) => {
                    self.errors.push(cause);
                    self.synchronize();
                }
            }
        }

        statements
    }

    fn declaration(&mut self) -> ParseResult<Stmt> {
        match self.matches(&[TokenType::Var]) {
            Some(_) => self.var_declaration(),
            None => self.statement(),
        }
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenType::Identifier, "Expect variable name.")?;

        let initializer = match self.matches(&[TokenType::Equal]) {
            Some(_) => Some(self.expression()?),
            None => None,
        };
        self.consume(TokenType::Semicolon, "Expect ';' after variable declaration.")?;

        Ok(Stmt::Var(name.lexeme.to_string(), initializer, SourceLoc::from(&name)))
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        match self.matches(&[TokenType::Print]) {
            Some(_) => {
                let loc = SourceLoc::from(self.previous());
                self.print_statement(loc)
            }
            None => self.expression_statement(),
        }
    }

    fn print_statement(&mut self, loc: SourceLoc) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(TokenType::Semicolon, "Expect ';' after value.")?;

        Ok(Stmt::Print(expr, loc))
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(TokenType::Semicolon, "Expect ';' after value.")?;

        Ok(Stmt::Expression(expr))
    }

    fn expression(&mut self) -> ParseResult<Expr> {
        self.conditional()
    }

    // The else branch chains to the right: a ? b : c ? d : e.
    fn conditional(&mut self) -> ParseResult<Expr> {
        let expr = self.equality()?;

        match self.matches(&[TokenType::Question]) {
            None => Ok(expr),
            Some(_) => {
                let then_expr = self.expression()?;
                self.consume(TokenType::Colon, "Expect ':' after then branch of conditional expression.")?;
                let else_expr = self.conditional()?;

                Ok(Expr::Conditional(Box::new(expr), Box::new(then_expr), Box::new(else_expr)))
            }
        }
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;

        while let Some(operator) = self.matches(&[TokenType::BangEqual, TokenType::EqualEqual]) {
            let loc = SourceLoc::from(self.previous());
            let right = self.comparison()?;
            let bin_op = match operator {
                TokenType::BangEqual => BinaryOperator::NotEqual,
                TokenType::EqualEqual => BinaryOperator::Equal,
                _ => unreachable!(),
            };
            expr = Expr::Binary(Box::new(expr), bin_op, Box::new(right), loc);
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.addition()?;

        while let Some(operator) = self.matches(&[TokenType::Less,
                                                  TokenType::Greater,
                                                  TokenType::LessEqual,
                                                  TokenType::GreaterEqual]) {
            let loc = SourceLoc::from(self.previous());
            let right = self.addition()?;
            let bin_op = match operator {
                TokenType::Less => BinaryOperator::Less,
                TokenType::LessEqual => BinaryOperator::LessEqual,
                TokenType::Greater => BinaryOperator::Greater,
                TokenType::GreaterEqual => BinaryOperator::GreaterEqual,
                _ => unreachable!(),
            };
            expr = Expr::Binary(Box::new(expr), bin_op, Box::new(right), loc);
        }

        Ok(expr)
    }

    fn addition(&mut self) -> ParseResult<Expr> {
        let mut expr = self.multiplication()?;

        while let Some(operator) = self.matches(&[TokenType::Minus, TokenType::Plus]) {
            let loc = SourceLoc::from(self.previous());
            let right = self.multiplication()?;
            let bin_op = match operator {
                TokenType::Minus => BinaryOperator::Minus,
                TokenType::Plus => BinaryOperator::Plus,
                _ => unreachable!(),
            };
            expr = Expr::Binary(Box::new(expr), bin_op, Box::new(right), loc);
        }

        Ok(expr)
    }

    fn multiplication(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;

        while let Some(operator) = self.matches(&[TokenType::Slash, TokenType::Star]) {
            let loc = SourceLoc::from(self.previous());
            let right = self.unary()?;
            let bin_op = match operator {
                TokenType::Slash => BinaryOperator::Divide,
                TokenType::Star => BinaryOperator::Multiply,
                _ => unreachable!(),
            };
            expr = Expr::Binary(Box::new(expr), bin_op, Box::new(right), loc);
        }

        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        match self.matches(&[TokenType::Bang, TokenType::Minus]) {
            None => self.primary(),
            Some(operator) => {
                let loc = SourceLoc::from(self.previous());
                let right = self.unary()?;

                let unary_op = match operator {
                    TokenType::Bang => UnaryOperator::Not,
                    TokenType::Minus => UnaryOperator::Minus,
                    _ => unreachable!(),
                };

                Ok(Expr::Unary(unary_op, Box::new(right), loc))
            }
        }
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();

        let expr = match (token.token_type, token.literal) {
            (TokenType::False, _) => Expr::LiteralBool(false),
            (TokenType::True, _) => Expr::LiteralBool(true),
            (TokenType::Nil, _) => Expr::LiteralNil,
            (TokenType::Number, Some(Literal::Number(x))) => Expr::LiteralNumber(x),
            (TokenType::String, Some(Literal::Str(s))) => Expr::LiteralString(s.to_string()),
            (TokenType::Identifier, _) => {
                Expr::Variable(token.lexeme.to_string(), SourceLoc::from(&token))
            }
            (TokenType::LeftParen, _) => {
                self.advance();
                let expr = self.expression()?;
                self.consume(TokenType::RightParen, "Expect ')' after expression.")?;

                return Ok(Expr::Grouping(Box::new(expr)));
            }
            // A binary operator with nothing on its left.  Skip its right
            // operand so parsing picks up after the whole malformed operation.
            (TokenType::BangEqual, _) |
            (TokenType::EqualEqual, _) => return self.missing_left_operand(Self::equality),
            (TokenType::Greater, _) |
            (TokenType::GreaterEqual, _) |
            (TokenType::Less, _) |
            (TokenType::LessEqual, _) => return self.missing_left_operand(Self::comparison),
            (TokenType::Plus, _) => return self.missing_left_operand(Self::addition),
            (TokenType::Slash, _) |
            (TokenType::Star, _) => return self.missing_left_operand(Self::multiplication),
            _ => return Err(ParseErrorCause::at_token(&token, "Expect expression.")),
        };

        self.advance();

        Ok(expr)
    }

    // Reports the operator at the current token, then parses and discards
    // the right-hand operand.  Never produces an expression.
    fn missing_left_operand(&mut self, operand: fn(&mut Parser<'a>) -> ParseResult<Expr>)
        -> ParseResult<Expr>
    {
        let cause = ParseErrorCause::at_token(self.peek(), "Missing left-hand operand.");
        self.advance();

        match operand(self) {
            Ok(_) => Err(cause),
            Err(operand_cause) => {
                self.errors.push(cause);

                Err(operand_cause)
            }
        }
    }

    // Discards tokens until the start of the next statement.
    fn synchronize(&mut self) {
        self.advance();

        while ! self.is_at_end() {
            if self.previous().token_type == TokenType::Semicolon {
                return;
            }

            match self.peek().token_type {
                TokenType::Class |
                TokenType::Fun |
                TokenType::Var |
                TokenType::For |
                TokenType::If |
                TokenType::While |
                TokenType::Print |
                TokenType::Return => return,
                _ => (),
            };

            self.advance();
        }
    }

    fn expect_end(&mut self) -> ParseResult<()> {
        if self.is_at_end() {
            Ok(())
        } else {
            Err(ParseErrorCause::at_token(self.peek(), "Expect end of expression."))
        }
    }

    fn consume(&mut self, token_type: TokenType, message: &str) -> ParseResult<Token<'a>> {
        if self.check(token_type) {
            let token = self.peek().clone();
            self.advance();

            return Ok(token);
        }

        Err(ParseErrorCause::at_token(self.peek(), message))
    }

    fn matches(&mut self, token_types: &[TokenType]) -> Option<TokenType> {
        let token_type = token_types.iter()
            .copied()
            .find(|token_type| self.check(*token_type));

        if token_type.is_some() {
            self.advance();
        }

        token_type
    }

    fn check(&self, token_type: TokenType) -> bool {
        ! self.is_at_end() && self.peek().token_type == token_type
    }

    fn advance(&mut self) {
        if self.is_at_end() {
            return;
        }
        self.current += 1;
    }

    fn peek(&self) -> &Token<'a> {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token<'a> {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }
}
