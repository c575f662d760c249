use crate::ast::*;
use crate::ast::Expr::*;
use crate::error::*;
use crate::parser::*;
use crate::source_loc::*;

fn print_expression(source: &str) -> String {
    parse_expression(source).expect("unexpected parse error").to_string()
}

fn print_statements(source: &str) -> Vec<String> {
    parse(source).expect("unexpected parse error")
        .iter()
        .map(|statement| statement.to_string())
        .collect()
}

fn error_messages(source: &str) -> Vec<String> {
    match parse(source) {
        Ok(_) => Vec::new(),
        Err(err) => err.causes.iter().map(|cause| cause.to_string()).collect(),
    }
}

#[test]
fn test_parse_literal() {
    assert_eq!(parse_expression("42"), Ok(LiteralNumber(42.0)));
    assert_eq!(parse_expression("\"hello\""), Ok(LiteralString("hello".to_string())));
    assert_eq!(parse_expression("true"), Ok(LiteralBool(true)));
    assert_eq!(parse_expression("false"), Ok(LiteralBool(false)));
    assert_eq!(parse_expression("nil"), Ok(LiteralNil));
}

#[test]
fn test_parse_binary_op() {
    assert_eq!(parse_expression("40 + 2"), Ok(Binary(Box::new(LiteralNumber(40.0)),
                                                     BinaryOperator::Plus,
                                                     Box::new(LiteralNumber(2.0)),
                                                     SourceLoc::new(1, 4))));
}

#[test]
fn test_parse_unary_op() {
    assert_eq!(parse_expression("-42"), Ok(Unary(UnaryOperator::Minus,
                                                 Box::new(LiteralNumber(42.0)),
                                                 SourceLoc::new(1, 1))));
    assert_eq!(parse_expression("!true"), Ok(Unary(UnaryOperator::Not,
                                                   Box::new(LiteralBool(true)),
                                                   SourceLoc::new(1, 1))));
    assert_eq!(print_expression("-!x"), "(- (! x))");
}

#[test]
fn test_parse_grouping() {
    assert_eq!(parse_expression("(40)"), Ok(Grouping(Box::new(LiteralNumber(40.0)))));
    assert_eq!(print_expression("(1 + 2) * 3"), "(* (group (+ 1 2)) 3)");
}

#[test]
fn test_parse_variable() {
    assert_eq!(parse_expression("answer"), Ok(Variable("answer".to_string(), SourceLoc::new(1, 1))));
}

#[test]
fn test_parse_precedence() {
    assert_eq!(print_expression("2 + 3 * 4"), "(+ 2 (* 3 4))");
    assert_eq!(print_expression("2 * 3 + 4"), "(+ (* 2 3) 4)");
    assert_eq!(print_expression("1 - 2 - 3"), "(- (- 1 2) 3)");
    assert_eq!(print_expression("8 / 4 / 2"), "(/ (/ 8 4) 2)");
    assert_eq!(print_expression("1 < 2 == 3 >= 4"), "(== (< 1 2) (>= 3 4))");
    assert_eq!(print_expression("-1 + 2"), "(+ (- 1) 2)");
}

#[test]
fn test_parse_comparison() {
    assert_eq!(parse_expression("42 == 40 + 2"),
               Ok(Binary(Box::new(LiteralNumber(42.0)),
                         BinaryOperator::Equal,
                         Box::new(Binary(Box::new(LiteralNumber(40.0)),
                                         BinaryOperator::Plus,
                                         Box::new(LiteralNumber(2.0)),
                                         SourceLoc::new(1, 10))),
                         SourceLoc::new(1, 4))));
}

#[test]
fn test_parse_conditional() {
    assert_eq!(parse_expression("true ? 1 : 2"),
               Ok(Conditional(Box::new(LiteralBool(true)),
                              Box::new(LiteralNumber(1.0)),
                              Box::new(LiteralNumber(2.0)))));
    // The else branch is right-associative.
    assert_eq!(print_expression("a ? b : c ? d : e"), "(?: a b (?: c d e))");
    assert_eq!(print_expression("a ? b ? c : d : e"), "(?: a (?: b c d) e)");
    // The condition binds looser than equality.
    assert_eq!(print_expression("1 == 2 ? 3 : 4 + 5"), "(?: (== 1 2) 3 (+ 4 5))");
}

#[test]
fn test_parse_expression_trailing_tokens() {
    let causes = vec![ParseErrorCause::new_with_location(SourceLoc::new(1, 3), "2", "Expect end of expression.")];
    assert_eq!(parse_expression("1 2"), Err(ParseError::new(causes)));
}

#[test]
fn test_parse_statements() {
    assert_eq!(parse("print \"one\";"), Ok(vec![Stmt::Print(LiteralString("one".into()), SourceLoc::new(1, 1))]));
    assert_eq!(parse("1;"), Ok(vec![Stmt::Expression(LiteralNumber(1.0))]));
    assert_eq!(parse("var x;"), Ok(vec![Stmt::Var("x".into(), None, SourceLoc::new(1, 5))]));
    assert_eq!(parse("var x = 1;"), Ok(vec![Stmt::Var("x".into(),
                                                      Some(LiteralNumber(1.0)),
                                                      SourceLoc::new(1, 5))]));
    assert_eq!(print_statements("var x = 1 + 2;\nprint x;\nx ? 1 : 2;"),
               vec!["(var x (+ 1 2))", "(print x)", "(; (?: x 1 2))"]);
    assert_eq!(parse(""), Ok(Vec::new()));
    assert_eq!(parse("// nothing here"), Ok(Vec::new()));
}

#[test]
fn test_parse_invalid() {
    let causes = vec![
        ParseErrorCause::new_with_location(SourceLoc::new(1, 1), "and", "Expect expression."),
    ];
    assert_eq!(parse("and;"), Err(ParseError::new(causes)));
}

#[test]
fn test_parse_missing_semicolon() {
    let causes = vec![ParseErrorCause::new_at_end(SourceLoc::new(1, 8), "Expect ';' after value.")];
    assert_eq!(parse("print 1"), Err(ParseError::new(causes)));
    assert_eq!(error_messages("var x = 1"),
               vec!["[Line 1] Error at end: Expect ';' after variable declaration."]);
}

#[test]
fn test_parse_error_messages() {
    assert_eq!(error_messages("1 ? 2;"),
               vec!["[Line 1] Error at ';': Expect ':' after then branch of conditional expression."]);
    assert_eq!(error_messages("(1 + 2;"),
               vec!["[Line 1] Error at ';': Expect ')' after expression."]);
    assert_eq!(error_messages("var 1;"),
               vec!["[Line 1] Error at '1': Expect variable name."]);
}

#[test]
fn test_parse_missing_left_operand() {
    let causes = vec![
        ParseErrorCause::new_with_location(SourceLoc::new(1, 1), "*", "Missing left-hand operand."),
    ];
    assert_eq!(parse("* 3;"), Err(ParseError::new(causes)));

    assert_eq!(error_messages("== 1;"), vec!["[Line 1] Error at '==': Missing left-hand operand."]);
    assert_eq!(error_messages(">= 1;"), vec!["[Line 1] Error at '>=': Missing left-hand operand."]);
    assert_eq!(error_messages("print + 1;"), vec!["[Line 1] Error at '+': Missing left-hand operand."]);
    assert_eq!(error_messages("1 + / 2 * 3;"), vec!["[Line 1] Error at '/': Missing left-hand operand."]);
}

#[test]
fn test_parse_missing_left_operand_without_right_operand() {
    assert_eq!(error_messages("== ;"), vec!["[Line 1] Error at '==': Missing left-hand operand.",
                                            "[Line 1] Error at ';': Expect expression."]);
}

#[test]
fn test_parse_recovers_at_statement_boundary() {
    // One error per bad statement; the good ones in between don't add any.
    assert_eq!(error_messages("* 3;\nprint 1;\nprint 2 print 3;\n4;\nvar = 5;"),
               vec!["[Line 1] Error at '*': Missing left-hand operand.",
                    "[Line 3] Error at 'print': Expect ';' after value.",
                    "[Line 5] Error at '=': Expect variable name."]);
    // Recovery stops before a keyword that starts a statement.
    assert_eq!(error_messages("1 + ) print 2;\nprint ;"),
               vec!["[Line 1] Error at ')': Expect expression.",
                    "[Line 2] Error at ';': Expect expression."]);
}

#[test]
fn test_parse_reports_lexical_and_syntax_errors_together() {
    assert_eq!(error_messages("@ 1 +;"), vec!["[Line 1] Error: Unexpected character.",
                                              "[Line 1] Error at ';': Expect expression."]);
    assert_eq!(error_messages("print \"abc"), vec!["[Line 1] Error: Unterminated string.",
                                                   "[Line 1] Error at end: Expect expression."]);
}
