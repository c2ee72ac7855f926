//! Tokenizer and precedence-climbing parser for standard mode

use crate::core::{parse_literal, CalcError, CalcResult, Operation};

/// Lexical token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary operator, or a sign when it starts an operand
    Operator(Operation),
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// The `sqrt` function name
    Sqrt,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Operator(op) => write!(f, "'{op}'"),
            Self::LeftParen => f.write_str("'('"),
            Self::RightParen => f.write_str("')'"),
            Self::Sqrt => f.write_str("'sqrt'"),
        }
    }
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
    /// Square root of the argument
    Sqrt(Box<AstNode>),
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }

    /// Creates a new square root node
    #[must_use]
    pub fn sqrt(inner: AstNode) -> Self {
        Self::Sqrt(Box::new(inner))
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            c if c.is_ascii_alphabetic() => self.read_function()?,
            c => match Operation::from_symbol(c) {
                Some(op) => {
                    self.advance();
                    Token::Operator(op)
                }
                None => {
                    return Err(CalcError::invalid(format!("unexpected character '{c}'")));
                }
            },
        };

        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.input[start..self.pos];
        parse_literal(text)?
            .map(Token::Number)
            .ok_or_else(|| CalcError::invalid(format!("invalid number '{text}'")))
    }

    fn read_function(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        while self.current_char().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.advance();
        }

        match &self.input[start..self.pos] {
            "sqrt" => Ok(Token::Sqrt),
            name => Err(CalcError::invalid(format!("unknown function '{name}'"))),
        }
    }
}

/// Precedence-climbing parser over a token list
///
/// Grammar:
/// ```text
/// expression ::= unary (OP unary)*        // climbing on Operation::precedence
/// unary      ::= ('+' | '-')* primary
/// primary    ::= NUMBER | '(' expression ')' | 'sqrt' '(' expression ')'
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parses a non-empty string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let tokens = Tokenizer::new(input).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses all tokens into an AST
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::invalid("empty expression"));
        }

        let ast = self.parse_binary(0)?;

        if let Some(token) = self.current() {
            return Err(CalcError::invalid(format!(
                "unexpected {token} at token {}",
                self.pos
            )));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_binary(&mut self, min_precedence: u8) -> CalcResult<AstNode> {
        let mut left = self.parse_unary()?;

        while let Some(&Token::Operator(op)) = self.current() {
            if op.precedence() < min_precedence {
                break;
            }
            self.advance();
            // Left-associative: the right side only absorbs tighter operators
            let right = self.parse_binary(op.precedence() + 1)?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        let mut negate = false;
        while let Some(&Token::Operator(op @ (Operation::Add | Operation::Subtract))) =
            self.current()
        {
            negate ^= op == Operation::Subtract;
            self.advance();
        }

        let operand = self.parse_primary()?;
        Ok(if negate {
            AstNode::negate(operand)
        } else {
            operand
        })
    }

    fn parse_primary(&mut self) -> CalcResult<AstNode> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(AstNode::number(n)),
            Some(Token::LeftParen) => self.parse_group(),
            Some(Token::Sqrt) => match self.advance() {
                Some(Token::LeftParen) => Ok(AstNode::sqrt(self.parse_group()?)),
                Some(t) => Err(CalcError::invalid(format!(
                    "expected '(' after 'sqrt' but found {t}"
                ))),
                None => Err(CalcError::invalid("expected '(' after 'sqrt'")),
            },
            Some(t) => Err(CalcError::invalid(format!(
                "expected a number but found {t}"
            ))),
            None => Err(CalcError::invalid("unexpected end of expression")),
        }
    }

    /// Parses the inside of a group whose `(` was just consumed
    fn parse_group(&mut self) -> CalcResult<AstNode> {
        if matches!(self.current(), Some(Token::RightParen)) {
            return Err(CalcError::invalid("empty parentheses"));
        }

        let inner = self.parse_binary(0)?;
        match self.advance() {
            Some(Token::RightParen) => Ok(inner),
            Some(t) => Err(CalcError::invalid(format!("expected ')' but found {t}"))),
            None => Err(CalcError::MismatchedParentheses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Tokenizer tests =====

    #[test]
    fn test_tokenize_single_number() {
        let tokens = Tokenizer::new("42").tokenize().unwrap();
        assert_eq!(tokens, vec![Token::Number(42.0)]);
    }

    #[test]
    fn test_tokenize_leading_decimal() {
        let tokens = Tokenizer::new(".5").tokenize().unwrap();
        assert_eq!(tokens, vec![Token::Number(0.5)]);
    }

    #[test]
    fn test_tokenize_operators() {
        let tokens = Tokenizer::new("+ - * /").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Operator(Operation::Add),
                Token::Operator(Operation::Subtract),
                Token::Operator(Operation::Multiply),
                Token::Operator(Operation::Divide),
            ]
        );
    }

    #[test]
    fn test_tokenize_sqrt_call() {
        let tokens = Tokenizer::new("sqrt(16)").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Sqrt,
                Token::LeftParen,
                Token::Number(16.0),
                Token::RightParen
            ]
        );
    }

    #[test]
    fn test_tokenize_no_spaces() {
        let tokens = Tokenizer::new("1+2*3").tokenize().unwrap();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0], Token::Number(1.0));
        assert_eq!(tokens[1], Token::Operator(Operation::Add));
    }

    #[test]
    fn test_tokenize_unknown_function() {
        assert!(matches!(
            Tokenizer::new("cos(1)").tokenize(),
            Err(CalcError::InvalidExpression(_))
        ));
    }

    #[test]
    fn test_tokenize_invalid_char() {
        assert!(matches!(
            Tokenizer::new("2 @ 3").tokenize(),
            Err(CalcError::InvalidExpression(_))
        ));
        assert!(matches!(
            Tokenizer::new("2 ^ 3").tokenize(),
            Err(CalcError::InvalidExpression(_))
        ));
    }

    #[test]
    fn test_tokenize_whitespace_only() {
        assert!(Tokenizer::new("   ").tokenize().unwrap().is_empty());
    }

    #[test]
    fn test_tokenizer_step_by_step() {
        let mut t = Tokenizer::new("1 + 2");
        assert_eq!(t.next_token(), Ok(Some(Token::Number(1.0))));
        assert_eq!(t.next_token(), Ok(Some(Token::Operator(Operation::Add))));
        assert_eq!(t.next_token(), Ok(Some(Token::Number(2.0))));
        assert_eq!(t.next_token(), Ok(None));
    }

    // ===== Parser tests =====

    #[test]
    fn test_parse_single_number() {
        assert_eq!(Parser::parse_str("42").unwrap(), AstNode::Number(42.0));
    }

    #[test]
    fn test_parse_precedence_mul_over_add() {
        let ast = Parser::parse_str("2 + 3 * 4").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::number(2.0),
                Operation::Add,
                AstNode::binary(
                    AstNode::number(3.0),
                    Operation::Multiply,
                    AstNode::number(4.0)
                )
            )
        );
    }

    #[test]
    fn test_parse_subtraction_left_associative() {
        let ast = Parser::parse_str("10 - 2 - 3").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::binary(
                    AstNode::number(10.0),
                    Operation::Subtract,
                    AstNode::number(2.0)
                ),
                Operation::Subtract,
                AstNode::number(3.0)
            )
        );
    }

    #[test]
    fn test_parse_division_left_associative() {
        let ast = Parser::parse_str("8 / 4 / 2").unwrap();
        match ast {
            AstNode::BinaryOp {
                left,
                op: Operation::Divide,
                right,
            } => {
                assert_eq!(*right, AstNode::Number(2.0));
                assert!(matches!(
                    *left,
                    AstNode::BinaryOp {
                        op: Operation::Divide,
                        ..
                    }
                ));
            }
            _ => panic!("Expected Divide at top level"),
        }
    }

    #[test]
    fn test_parse_parentheses() {
        let ast = Parser::parse_str("(2 + 3) * 4").unwrap();
        match ast {
            AstNode::BinaryOp {
                op: Operation::Multiply,
                left,
                ..
            } => assert!(matches!(
                *left,
                AstNode::BinaryOp {
                    op: Operation::Add,
                    ..
                }
            )),
            _ => panic!("Expected Multiply at top level"),
        }
    }

    #[test]
    fn test_parse_sqrt() {
        let ast = Parser::parse_str("sqrt(9 + 7)").unwrap();
        assert_eq!(
            ast,
            AstNode::sqrt(AstNode::binary(
                AstNode::number(9.0),
                Operation::Add,
                AstNode::number(7.0)
            ))
        );
    }

    #[test]
    fn test_parse_unary_minus() {
        assert_eq!(
            Parser::parse_str("-5").unwrap(),
            AstNode::negate(AstNode::number(5.0))
        );
        assert_eq!(Parser::parse_str("--5").unwrap(), AstNode::number(5.0));
        assert_eq!(Parser::parse_str("+5").unwrap(), AstNode::number(5.0));
    }

    #[test]
    fn test_parse_unary_after_operator() {
        let ast = Parser::parse_str("2 * -3").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::number(2.0),
                Operation::Multiply,
                AstNode::negate(AstNode::number(3.0))
            )
        );
    }

    #[test]
    fn test_parse_missing_operand() {
        assert!(matches!(
            Parser::parse_str("2 +"),
            Err(CalcError::InvalidExpression(_))
        ));
        assert!(matches!(
            Parser::parse_str("* 2"),
            Err(CalcError::InvalidExpression(_))
        ));
    }

    #[test]
    fn test_parse_empty_groups() {
        assert!(matches!(
            Parser::parse_str("()"),
            Err(CalcError::InvalidExpression(_))
        ));
        assert!(matches!(
            Parser::parse_str("sqrt()"),
            Err(CalcError::InvalidExpression(_))
        ));
    }

    #[test]
    fn test_parse_sqrt_without_paren() {
        assert!(matches!(
            Parser::parse_str("sqrt 4"),
            Err(CalcError::InvalidExpression(_))
        ));
    }

    #[test]
    fn test_parse_adjacent_numbers() {
        assert!(matches!(
            Parser::parse_str("1 2"),
            Err(CalcError::InvalidExpression(_))
        ));
        assert!(matches!(
            Parser::parse_str("1.2.3"),
            Err(CalcError::InvalidExpression(_))
        ));
    }

    #[test]
    fn test_parse_unclosed_group() {
        assert_eq!(
            Parser::parse_str("(2 + 3"),
            Err(CalcError::MismatchedParentheses)
        );
    }

    #[test]
    fn test_parser_parse_empty_tokens() {
        assert!(matches!(
            Parser::new(vec![]).parse(),
            Err(CalcError::InvalidExpression(_))
        ));
    }
}
