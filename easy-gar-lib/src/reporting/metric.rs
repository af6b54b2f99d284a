use super::request::MetricFragment;
use core::fmt::{self, Display, Formatter};
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Advisory formatting hint attached to a metric.
///
/// The remote API echoes this back in column headers; values are always
/// decoded as floating point regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormattingType {
    Integer,
    Float,
    Currency,
    Percent,
    Time,
}

/// Arithmetic operator joining two metric expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    #[must_use]
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }
}

/// A metric to request: either a single field reference or an arithmetic
/// composition of other metrics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricExpr {
    expression: String,
    alias: Option<String>,
    formatting_type: Option<FormattingType>,
}

impl MetricExpr {
    pub fn new(expression: impl Into<String>, alias: impl Into<String>, formatting_type: Option<FormattingType>) -> Self {
        let alias = alias.into();

        Self {
            expression: expression.into(),
            alias: (!alias.is_empty()).then_some(alias),
            formatting_type,
        }
    }

    /// A metric with no alias and no formatting hint.
    pub fn from_expression(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            alias: None,
            formatting_type: None,
        }
    }

    #[must_use]
    pub fn with_alias(self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        Self {
            alias: (!alias.is_empty()).then_some(alias),
            ..self
        }
    }

    #[must_use]
    pub fn with_formatting_type(self, formatting_type: Option<FormattingType>) -> Self {
        Self { formatting_type, ..self }
    }

    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    #[must_use]
    pub const fn formatting_type(&self) -> Option<FormattingType> {
        self.formatting_type
    }

    /// The name this metric's column carries in a report: the alias, or the
    /// expression itself when there is none.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.expression)
    }

    /// Combine two metrics into a derived one.
    ///
    /// Both operands are parenthesized so the remote side parses the result
    /// unambiguously. Division always yields a `FLOAT` metric; the other
    /// operators keep the formatting type only when both operands agree.
    #[must_use]
    pub fn compose(&self, other: &Self, op: Operator) -> Self {
        let symbol = op.symbol();

        let formatting_type = match op {
            Operator::Divide => Some(FormattingType::Float),
            _ if self.formatting_type == other.formatting_type => self.formatting_type,
            _ => None,
        };

        Self {
            expression: format!("({}){symbol}({})", self.expression, other.expression),
            alias: Some(format!("{} {symbol} {}", self.display_name(), other.display_name())),
            formatting_type,
        }
    }

    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        self.compose(other, Operator::Add)
    }

    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        self.compose(other, Operator::Subtract)
    }

    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        self.compose(other, Operator::Multiply)
    }

    #[must_use]
    pub fn divide(&self, other: &Self) -> Self {
        self.compose(other, Operator::Divide)
    }

    /// The wire fragment placed in a request's metric list.
    #[must_use]
    pub fn request_fragment(&self) -> MetricFragment {
        MetricFragment {
            expression: self.expression.clone(),
            alias: self.alias.clone(),
            formatting_type: self.formatting_type,
        }
    }
}

impl Display for MetricExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}
