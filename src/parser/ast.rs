use super::error::SyntaxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl Operator {
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
            Self::Rem => lhs % rhs,
        }
    }
    pub fn is_low_precedence(self) -> bool {
        matches!(self, Self::Add | Self::Sub)
    }
}

impl TryFrom<&str> for Operator {
    type Error = SyntaxError;

    fn try_from(token: &str) -> Result<Self, Self::Error> {
        match token {
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Sub),
            "*" => Ok(Self::Mul),
            "/" => Ok(Self::Div),
            "%" => Ok(Self::Rem),
            _ => Err(SyntaxError::InvalidOperator(token.to_string())),
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
        };
        write!(f, "{symbol}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Operand {
    Literal(f64),
    SubExpression(Box<Expression>),
}

impl Operand {
    fn value(&self) -> Result<f64, SyntaxError> {
        match self {
            Self::Literal(value) => Ok(*value),
            Self::SubExpression(expr) => expr.value(),
        }
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Self::Literal(value)
    }
}

impl From<Expression> for Operand {
    fn from(expr: Expression) -> Self {
        Self::SubExpression(Box::new(expr))
    }
}

/// A binary operation under construction. Without an operator it evaluates
/// to its left operand.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Expression {
    lhs: Option<Operand>,
    rhs: Option<Operand>,
    operator: Option<Operator>,
}

impl Expression {
    pub(crate) fn with_lhs(lhs: Option<Operand>) -> Self {
        Self {
            lhs,
            ..Self::default()
        }
    }

    /// Moves the right operand out, leaving the slot open for a regrouped node.
    pub(crate) fn take_rhs(&mut self) -> Option<Operand> {
        self.rhs.take()
    }

    pub(crate) fn set_operator(&mut self, token: &str) -> Result<(), SyntaxError> {
        if self.operator.is_some() {
            return Err(SyntaxError::DuplicateOperator);
        }
        self.operator = Some(Operator::try_from(token)?);
        Ok(())
    }

    pub(crate) fn set_rhs(&mut self, operand: Operand) {
        self.rhs = Some(operand);
    }

    pub(crate) fn push_value(&mut self, value: Option<f64>) -> Result<(), SyntaxError> {
        match value {
            Some(value) => self.push_operand(value.into()),
            None => Err(SyntaxError::AbsentValue),
        }
    }

    pub(crate) fn push_operand(&mut self, operand: Operand) -> Result<(), SyntaxError> {
        if self.lhs.is_none() {
            self.lhs = Some(operand);
        } else if self.rhs.is_none() {
            self.rhs = Some(operand);
        } else {
            return Err(SyntaxError::UnexpectedValue);
        }
        Ok(())
    }

    pub(crate) fn is_satisfied(&self) -> bool {
        self.rhs.is_some()
    }

    pub(crate) fn is_low_precedence(&self) -> bool {
        self.operator.is_some_and(Operator::is_low_precedence)
    }

    pub(crate) fn value(&self) -> Result<f64, SyntaxError> {
        let lhs = self.lhs.as_ref().ok_or(SyntaxError::MissingValue)?;
        match (&self.rhs, self.operator) {
            (None, Some(op)) => Err(SyntaxError::MissingOperand(op)),
            (None, None) => lhs.value(),
            (Some(_), None) => Err(SyntaxError::MissingOperator),
            (Some(rhs), Some(op)) => Ok(op.apply(lhs.value()?, rhs.value()?)),
        }
    }
}
