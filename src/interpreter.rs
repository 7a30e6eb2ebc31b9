use std::collections::HashMap;

use crate::parser::{tokenize, Error, Expression, Operator, SyntaxError, Token, TokenType};

/// Evaluates arithmetic over `+ - * / %` with parentheses and variables.
/// Variables live as long as the interpreter does.
#[derive(Debug, Default)]
pub struct Interpreter {
    variables: HashMap<String, f64>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizes and evaluates one line. An empty line yields `Ok(None)`.
    ///
    /// `x = <expr>` stores the value of `<expr>` under `x` and returns it.
    /// Assignments may also appear at the start of a parenthesized group, e.g.
    /// `(x = 3) + 1`.
    pub fn interpret(&mut self, line: &str) -> Result<Option<f64>, Error> {
        let tokens = tokenize(line);
        // Only the totals are compared, so `) (` passes here.
        if !is_balanced(&tokens) {
            return Err(SyntaxError::UnbalancedParentheses.into());
        }
        let mut cursor = 0;
        self.evaluate(&tokens, &mut cursor)
    }

    pub fn variable(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    fn lookup(&self, name: &str) -> Result<f64, Error> {
        self.variable(name)
            .ok_or_else(|| Error::UndefinedVariable(name.to_string()))
    }

    /// Evaluates from `cursor` until the tokens run out or a `)` closes the
    /// current group. The cursor is left just past the last consumed token.
    fn evaluate(&mut self, tokens: &[Token], cursor: &mut usize) -> Result<Option<f64>, Error> {
        let rest = &tokens[*cursor..];
        if rest.is_empty() {
            return Ok(None);
        }

        if rest.len() > 2 && rest[1].typ() == TokenType::Equal {
            let name = rest[0].lexeme().to_string();
            *cursor += 2;
            let value = self
                .evaluate(tokens, cursor)?
                .ok_or(SyntaxError::MissingValue)?;
            self.variables.insert(name, value);
            return Ok(Some(value));
        }

        let mut frame = Frame::default();
        while let Some(token) = tokens.get(*cursor) {
            if frame.current().is_satisfied() {
                frame.regroup(token)?;
            }
            *cursor += 1;
            match token.typ() {
                TokenType::RPar => return Ok(Some(frame.finish()?)),
                TokenType::LPar => {
                    let value = self.evaluate(tokens, cursor)?;
                    frame.current().push_value(value)?;
                }
                TokenType::Number => {
                    let value = parse_number(token.lexeme())?;
                    frame.current().push_value(Some(value))?;
                }
                TokenType::Operator => frame.current().set_operator(token.lexeme())?,
                // `=` outside an assignment and `=>` are looked up like any name.
                TokenType::Name | TokenType::Equal | TokenType::Arrow => {
                    let value = self.lookup(token.lexeme())?;
                    frame.current().push_value(Some(value))?;
                }
            }
        }
        Ok(Some(frame.finish()?))
    }
}

/// Expression nodes of one group. `nested` is the node a high-precedence
/// operator descended into; it stands in for the right operand of `root`
/// until it is closed.
#[derive(Debug, Default)]
struct Frame {
    root: Expression,
    nested: Option<Expression>,
}

impl Frame {
    fn current(&mut self) -> &mut Expression {
        match &mut self.nested {
            Some(expr) => expr,
            None => &mut self.root,
        }
    }

    /// Called when the current node is full and `incoming` is about to be
    /// consumed. Keeps `* / %` binding tighter than `+ -` and both levels
    /// left-associative.
    ///
    /// A full node's value can no longer change, so it is reduced to a literal
    /// before being wrapped. Long chains therefore stay shallow.
    fn regroup(&mut self, incoming: &Token) -> Result<(), SyntaxError> {
        let incoming = match incoming.typ() {
            TokenType::Operator => Operator::try_from(incoming.lexeme()).ok(),
            _ => None,
        };
        match incoming {
            Some(op) if !op.is_low_precedence() => match self.nested.take() {
                Some(nested) => {
                    self.nested = Some(Expression::with_lhs(Some(nested.value()?.into())))
                }
                None if self.root.is_low_precedence() => {
                    self.nested = Some(Expression::with_lhs(self.root.take_rhs()))
                }
                None => self.wrap_root()?,
            },
            _ => {
                self.close();
                self.wrap_root()?;
            }
        }
        Ok(())
    }

    fn wrap_root(&mut self) -> Result<(), SyntaxError> {
        let value = std::mem::take(&mut self.root).value()?;
        self.root = Expression::with_lhs(Some(value.into()));
        Ok(())
    }

    fn close(&mut self) {
        if let Some(nested) = self.nested.take() {
            self.root.set_rhs(nested.into());
        }
    }

    fn finish(mut self) -> Result<f64, SyntaxError> {
        self.close();
        self.root.value()
    }
}

fn is_balanced(tokens: &[Token]) -> bool {
    let scopes: isize = tokens
        .iter()
        .map(|token| match token.typ() {
            TokenType::LPar => 1,
            TokenType::RPar => -1,
            _ => 0,
        })
        .sum();
    scopes == 0
}

fn parse_number(lexeme: &str) -> Result<f64, SyntaxError> {
    lexeme
        .parse()
        .map_err(|_| SyntaxError::InvalidLiteral(lexeme.to_string()))
}
