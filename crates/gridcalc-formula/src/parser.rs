//! Arithmetic expression parser
//!
//! A recursive descent evaluator for the sanitized arithmetic subset that
//! reference substitution produces: decimal numbers, `+ - * /`, unary sign,
//! and parentheses. Expressions are evaluated directly while parsing, with
//! no AST and no dynamic evaluation facility.
//!
//! Arithmetic follows IEEE 754: division by zero yields an infinity here,
//! and the evaluation pipeline rejects non-finite results afterwards.

use crate::error::{FormulaError, FormulaResult};

/// Evaluate an arithmetic expression
///
/// # Examples
///
/// ```
/// use gridcalc_formula::eval_expression;
///
/// assert_eq!(eval_expression("1+2*3").unwrap(), 7.0);
/// assert_eq!(eval_expression("(1+2)*3").unwrap(), 9.0);
/// assert_eq!(eval_expression("-2.5 * 4").unwrap(), -10.0);
/// assert!(eval_expression("1+").is_err());
/// ```
pub fn eval_expression(input: &str) -> FormulaResult<f64> {
    let mut parser = ExprParser::new(input)?;
    let value = parser.parse_expression()?;

    // Make sure the whole input was consumed
    if parser.current_token() != Token::Eof {
        return Err(FormulaError::Parse(format!(
            "Unexpected token {:?} after expression",
            parser.current_token()
        )));
    }

    Ok(value)
}

/// Tokens in an arithmetic expression
#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    /// Numeric literal
    Number(f64),
    /// Addition operator
    Plus,
    /// Subtraction operator
    Minus,
    /// Multiplication operator
    Star,
    /// Division operator
    Slash,
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
    /// End of input
    Eof,
}

/// Recursive descent expression parser
struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
    current: Token,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str) -> FormulaResult<Self> {
        let mut parser = Self {
            input,
            pos: 0,
            current: Token::Eof,
        };
        parser.advance_token()?;
        Ok(parser)
    }

    // === Token scanning ===

    fn advance_token(&mut self) -> FormulaResult<()> {
        self.current = self.scan_token()?;
        Ok(())
    }

    fn scan_token(&mut self) -> FormulaResult<Token> {
        self.skip_whitespace();

        let c = match self.peek_char() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        match c {
            '+' => {
                self.advance();
                Ok(Token::Plus)
            }
            '-' => {
                self.advance();
                Ok(Token::Minus)
            }
            '*' => {
                self.advance();
                Ok(Token::Star)
            }
            '/' => {
                self.advance();
                Ok(Token::Slash)
            }
            '(' => {
                self.advance();
                Ok(Token::LeftParen)
            }
            ')' => {
                self.advance();
                Ok(Token::RightParen)
            }
            _ => {
                if c.is_ascii_digit()
                    || (c == '.' && self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()))
                {
                    Ok(self.scan_number())
                } else {
                    Err(FormulaError::Parse(format!("Unexpected character '{}'", c)))
                }
            }
        }
    }

    fn scan_number(&mut self) -> Token {
        let start = self.pos;

        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let num_str = &self.input[start..self.pos];
        Token::Number(num_str.parse().unwrap_or(0.0))
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn current_token(&self) -> Token {
        self.current
    }

    fn consume(&mut self) -> FormulaResult<Token> {
        let token = self.current;
        self.advance_token()?;
        Ok(token)
    }

    fn expect(&mut self, expected: Token) -> FormulaResult<()> {
        if self.current == expected {
            self.consume()?;
            Ok(())
        } else {
            Err(FormulaError::Parse(format!(
                "Expected {:?}, got {:?}",
                expected, self.current
            )))
        }
    }

    // === Expression parsing with precedence ===
    // Lowest to highest:
    //   additive:       + -
    //   multiplicative: * /
    //   unary:          - + (prefix)
    //   primary:        numbers, parentheses

    fn parse_expression(&mut self) -> FormulaResult<f64> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> FormulaResult<f64> {
        let mut left = self.parse_multiplicative()?;

        loop {
            match self.current_token() {
                Token::Plus => {
                    self.consume()?;
                    left += self.parse_multiplicative()?;
                }
                Token::Minus => {
                    self.consume()?;
                    left -= self.parse_multiplicative()?;
                }
                _ => break,
            }
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<f64> {
        let mut left = self.parse_unary()?;

        loop {
            match self.current_token() {
                Token::Star => {
                    self.consume()?;
                    left *= self.parse_unary()?;
                }
                Token::Slash => {
                    self.consume()?;
                    left /= self.parse_unary()?;
                }
                _ => break,
            }
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> FormulaResult<f64> {
        match self.current_token() {
            Token::Minus => {
                self.consume()?;
                Ok(-self.parse_unary()?)
            }
            // Prefix plus is a no-op
            Token::Plus => {
                self.consume()?;
                self.parse_unary()
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> FormulaResult<f64> {
        match self.current_token() {
            Token::Number(n) => {
                self.consume()?;
                Ok(n)
            }
            Token::LeftParen => {
                self.consume()?;
                let value = self.parse_expression()?;
                self.expect(Token::RightParen)?;
                Ok(value)
            }
            token => Err(FormulaError::Parse(format!("Unexpected token {:?}", token))),
        }
    }
}
