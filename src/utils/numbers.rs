// ABOUTME: Lenient numeric request fields accepting JSON numbers or numeric strings
// ABOUTME: Web form submissions send quantities as either representation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Deserialize;
use tafclub_core::errors::{AppError, AppResult};

/// A quantity sent as `12.5` or `"12.5"`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Quantity {
    /// JSON number
    Number(f64),
    /// Numeric string
    Text(String),
}

impl Quantity {
    /// Numeric value; blank strings are treated as absent
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming `field` if the string is not a number
    pub fn value(&self, field: &str) -> AppResult<Option<f64>> {
        match self {
            Self::Number(n) => Ok(Some(*n)),
            Self::Text(s) if s.trim().is_empty() => Ok(None),
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| AppError::invalid_input(format!("{field} must be a number"))),
        }
    }
}

/// Optional macro quantity where zero and blank mean "not recorded"
///
/// # Errors
///
/// Returns `InvalidInput` if the value is present but not numeric
pub fn optional_macro(value: Option<&Quantity>, field: &str) -> AppResult<Option<f64>> {
    Ok(match value {
        Some(q) => q.value(field)?.filter(|v| v.abs() > 0.0),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_and_text_forms() {
        let number: Quantity = serde_json::from_str("12.5").unwrap();
        let text: Quantity = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(number.value("x").unwrap(), Some(12.5));
        assert_eq!(text.value("x").unwrap(), Some(12.5));
    }

    #[test]
    fn test_blank_and_garbage_text() {
        assert_eq!(Quantity::Text("  ".to_owned()).value("x").unwrap(), None);
        assert!(Quantity::Text("lots".to_owned()).value("calories").is_err());
    }

    #[test]
    fn test_zero_macro_is_absent() {
        assert_eq!(optional_macro(Some(&Quantity::Number(0.0)), "fat").unwrap(), None);
        assert_eq!(optional_macro(Some(&Quantity::Number(3.0)), "fat").unwrap(), Some(3.0));
        assert_eq!(optional_macro(None, "fat").unwrap(), None);
    }
}
