//! Core data types for tabprep.
//!
//! A dataset cell is a [`Value`]: a number, a piece of text, or missing.
//! Columns are classified once, at fit time, into a [`ColumnKind`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single scalar cell of a tabular dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Numeric value
    Number(f64),
    /// Non-numeric (categorical) value
    Text(String),
    /// Missing value
    Missing,
}

impl Value {
    /// Whether the cell is missing. A `NaN` number counts as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Number(v) => v.is_nan(),
            Value::Text(_) => false,
        }
    }

    /// Numeric view of the cell, if it holds a (non-NaN) number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    /// Numeric reading of the cell: numbers as-is, text that parses as a
    /// number, `None` for missing cells and non-numeric text.
    pub fn parse_numeric(&self) -> Option<f64> {
        match self {
            Value::Number(v) if !v.is_nan() => Some(*v),
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|v| !v.is_nan()),
            _ => None,
        }
    }

    /// Text form used as a category key.
    ///
    /// Numbers use their shortest display form, so `1.0` keys as `"1"`.
    pub fn category_key(&self) -> Option<String> {
        match self {
            Value::Text(s) => Some(s.clone()),
            Value::Number(v) if !v.is_nan() => Some(v.to_string()),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Missing
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) if v.is_nan() => Ok(()),
            Value::Number(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
            Value::Missing => Ok(()),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Missing)
    }
}

/// How a column is treated by the preprocessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Every non-missing entry is numeric: imputed, then standardized
    Numerical,
    /// At least one non-missing entry is non-numeric: imputed, then one-hot encoded
    Categorical,
    /// Emitted unchanged
    Passthrough,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numerical => write!(f, "numerical"),
            ColumnKind::Categorical => write!(f, "categorical"),
            ColumnKind::Passthrough => write!(f, "passthrough"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_detection() {
        assert!(Value::Missing.is_missing());
        assert!(Value::Number(f64::NAN).is_missing());
        assert!(!Value::Number(0.0).is_missing());
        assert!(!Value::Text(String::new()).is_missing());
    }

    #[test]
    fn test_category_key() {
        assert_eq!(Value::Number(1.0).category_key().as_deref(), Some("1"));
        assert_eq!(Value::Number(2.5).category_key().as_deref(), Some("2.5"));
        assert_eq!(Value::from("male").category_key().as_deref(), Some("male"));
        assert_eq!(Value::Missing.category_key(), None);
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(Value::Number(1.5).parse_numeric(), Some(1.5));
        assert_eq!(Value::from(" 22 ").parse_numeric(), Some(22.0));
        assert_eq!(Value::from("male").parse_numeric(), None);
        assert_eq!(Value::from("NaN").parse_numeric(), None);
        assert_eq!(Value::Missing.parse_numeric(), None);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(Some(3.0)), Value::Number(3.0));
        assert_eq!(Value::from(None::<f64>), Value::Missing);
        assert_eq!(Value::from(7), Value::Number(7.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Number(22.0).to_string(), "22");
        assert_eq!(Value::Missing.to_string(), "");
        assert_eq!(ColumnKind::Categorical.to_string(), "categorical");
    }
}
