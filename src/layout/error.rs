//! Error types for the layout engine

use thiserror::Error;

/// Errors that can occur while deriving or resolving box geometry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// An unknown leaf has no value in the resolution context
    #[error("unresolved unknown '{name}'")]
    UnresolvedUnknown { name: String },

    /// A division expression evaluated a zero denominator
    #[error("division by zero in {expr}")]
    DivisionByZero { expr: String },

    /// A length whose variant is not accepted by the slot it was placed in
    #[error("malformed length for '{property}': expected {expected}, found {found}")]
    MalformedLength {
        property: String,
        expected: String,
        found: String,
    },
}

impl LayoutError {
    /// Create an unresolved unknown error
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self::UnresolvedUnknown { name: name.into() }
    }

    /// Create a division by zero error for the offending expression
    pub fn division_by_zero(expr: impl ToString) -> Self {
        Self::DivisionByZero {
            expr: expr.to_string(),
        }
    }

    /// Create a malformed length error
    pub fn malformed_length(
        property: impl Into<String>,
        expected: impl Into<String>,
        found: impl ToString,
    ) -> Self {
        Self::MalformedLength {
            property: property.into(),
            expected: expected.into(),
            found: found.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_display() {
        let err = LayoutError::unresolved("screen-width");
        assert_eq!(err.to_string(), "unresolved unknown 'screen-width'");
    }

    #[test]
    fn test_division_by_zero_display() {
        let err = LayoutError::division_by_zero("(1 / 0)");
        assert!(err.to_string().contains("(1 / 0)"));
    }

    #[test]
    fn test_malformed_length_display() {
        let err = LayoutError::malformed_length("item_height", "an absolute length", "50%");
        assert!(err.to_string().contains("item_height"));
        assert!(err.to_string().contains("50%"));
    }
}
