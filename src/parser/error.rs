use super::ast::Operator;

/// Malformed input. Raised at the point of detection and aborts the whole
/// `interpret` call.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("Unbalanced parentheses.")]
    UnbalancedParentheses,
    #[error("Invalid syntax: missing value.")]
    MissingValue,
    #[error("Invalid syntax: missing second operand for operator '{0}'.")]
    MissingOperand(Operator),
    #[error("Invalid syntax: missing operator.")]
    MissingOperator,
    #[error("Invalid syntax: another operator was not expected.")]
    DuplicateOperator,
    #[error("Invalid operator: '{0}'.")]
    InvalidOperator(String),
    #[error("Invalid input: did not expect additional value.")]
    UnexpectedValue,
    #[error("Invalid input: missing value.")]
    AbsentValue,
    #[error("Invalid number literal: '{0}'.")]
    InvalidLiteral(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("Undefined variable {0}")]
    UndefinedVariable(String),
}

impl Error {
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }
}
