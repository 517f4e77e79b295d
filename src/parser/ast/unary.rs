use std::fmt::Display;

use crate::lexer::Position;

use super::Expression;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UnaryOperator {
    Minus,
    Not,
}

impl UnaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "not",
        }
    }
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application of `-` or `not` to a single operand. Parsed by
/// `Expression::parse_unary`, which recurses for chains like `- not - a`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UnaryExpression<T> {
    pub op: UnaryOperator,
    pub operand: Expression<T>,
    pub position: Position,
    pub info: T,
}

impl<T> From<UnaryExpression<T>> for Expression<T> {
    fn from(value: UnaryExpression<T>) -> Self {
        Expression::Unary(Box::new(value))
    }
}

impl<T> Display for UnaryExpression<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {})", self.op, self.operand)
    }
}
