//! Input-validation helpers producing typed business errors.

use std::fmt::Display;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::DomainError;

/// Trim a required text field, rejecting values that are empty afterwards.
pub(crate) fn required_text(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field, collapsing whitespace-only values to `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|text| {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Reject a numeric range whose minimum exceeds its maximum. Either bound may
/// be absent; only a fully-specified pair is comparable.
pub(crate) fn ordered_range<T: PartialOrd + Display>(
    field: &'static str,
    min: Option<T>,
    max: Option<T>,
) -> Result<(), DomainError> {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(DomainError::validation(format!(
                "{field} minimum {min} exceeds maximum {max}"
            )));
        }
    }
    Ok(())
}

/// Reject a date window that ends before it starts.
pub(crate) fn ordered_dates<T: PartialOrd>(
    field: &'static str,
    start: Option<T>,
    end: Option<T>,
) -> Result<(), DomainError> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(DomainError::validation(format!(
                "{field} start date must not be after the end date"
            )));
        }
    }
    Ok(())
}

static SLUG_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Validate an organization slug: lowercase alphanumeric words joined by
/// single hyphens.
pub(crate) fn slug(value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(
            "organization slug must not be empty",
        ));
    }

    let pattern = SLUG_PATTERN
        .get_or_init(|| Regex::new("^[a-z0-9]+(-[a-z0-9]+)*$").expect("slug pattern compiles"));
    if !pattern.is_match(trimmed) {
        return Err(DomainError::validation(format!(
            "organization slug '{trimmed}' must contain only lowercase letters, digits, and single hyphens"
        )));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(
            required_text("first name", "  Ada  ").expect("valid"),
            "Ada"
        );
        let error = required_text("first name", "   ").expect_err("blank rejected");
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[test]
    fn optional_text_collapses_whitespace_to_none() {
        assert_eq!(optional_text(Some("  ".to_string())), None);
        assert_eq!(
            optional_text(Some(" a@b.example ".to_string())),
            Some("a@b.example".to_string())
        );
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn ordered_range_only_compares_full_pairs() {
        assert!(ordered_range("age range", Some(10u32), Some(5)).is_err());
        assert!(ordered_range("age range", Some(5u32), Some(10)).is_ok());
        assert!(ordered_range::<u32>("age range", Some(10), None).is_ok());
        assert!(ordered_range::<u32>("age range", None, Some(5)).is_ok());
    }

    #[test]
    fn slug_accepts_hyphenated_words() {
        assert_eq!(slug("west-side-players").expect("valid"), "west-side-players");
        assert_eq!(slug("studio54").expect("valid"), "studio54");
    }

    #[test]
    fn slug_rejects_uppercase_spaces_and_edge_hyphens() {
        for invalid in ["My Org", "UPPER", "double--hyphen", "-leading", "trailing-", ""] {
            assert!(slug(invalid).is_err(), "expected rejection for {invalid:?}");
        }
    }
}
