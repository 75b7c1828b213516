//! # Validation Module
//!
//! Operator input validation for the back-office.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Rendering front end                                          │
//! │  └── Raw text from date pickers and expense fields                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: tally-session                                                │
//! │  └── Lenient number parsing (never fails)                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  └── Presence and sign rules, checked BEFORE any mutation             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//! use tally_core::validation::{validate_expense_amount, validate_expense_description};
//!
//! assert_eq!(validate_expense_description("  Ice  ").unwrap(), "Ice");
//! assert!(validate_expense_amount(Money::zero()).is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length for an expense description.
pub const MAX_DESCRIPTION_LEN: usize = 200;

// =============================================================================
// Expense Validators
// =============================================================================

/// Validates an expense description and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_DESCRIPTION_LEN`] characters
pub fn validate_expense_description(description: &str) -> ValidationResult<String> {
    let trimmed = description.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Blank {
            field: "description".to_string(),
        });
    }

    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(trimmed.to_string())
}

/// Validates an expense amount.
///
/// Expenses are cash taken out of the drawer, so zero and negative values
/// are rejected.
pub fn validate_expense_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Requires both ends of a report date range.
///
/// A reversed range is NOT an error here; it simply matches no sales.
pub fn validate_date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> ValidationResult<(NaiveDate, NaiveDate)> {
    let start = start.ok_or_else(|| ValidationError::required("start date"))?;
    let end = end.ok_or_else(|| ValidationError::required("end date"))?;
    Ok((start, end))
}

/// Parses a date picker value (`YYYY-MM-DD`).
///
/// Blank input is missing, anything else unreadable is an invalid format.
pub fn parse_date_input(field: &str, input: &str) -> ValidationResult<Option<NaiveDate>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: e.to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_validate_expense_description() {
        assert_eq!(validate_expense_description("Ice").unwrap(), "Ice");
        assert_eq!(validate_expense_description("  Gas refill ").unwrap(), "Gas refill");

        let err = validate_expense_description("   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "description must not be blank");

        let long = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert_eq!(
            validate_expense_description(&long).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_validate_expense_amount() {
        assert!(validate_expense_amount(Money::from_cents(1)).is_ok());
        assert!(validate_expense_amount(Money::zero()).is_err());
        assert_eq!(
            validate_expense_amount(Money::from_cents(-500)).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_validate_date_range() {
        let may1 = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let may3 = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();

        assert_eq!(validate_date_range(Some(may1), Some(may3)).unwrap(), (may1, may3));
        // Reversed is accepted
        assert_eq!(validate_date_range(Some(may3), Some(may1)).unwrap(), (may3, may1));

        let err = validate_date_range(None, Some(may1)).unwrap_err();
        assert_eq!(err.to_string(), "start date is required");
        let err = validate_date_range(Some(may1), None).unwrap_err();
        assert_eq!(err.to_string(), "end date is required");
    }

    #[test]
    fn test_parse_date_input() {
        assert_eq!(
            parse_date_input("start date", "2024-05-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        assert_eq!(parse_date_input("start date", "  ").unwrap(), None);
        assert!(matches!(
            parse_date_input("start date", "05/01/2024"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
