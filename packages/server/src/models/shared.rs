use std::collections::HashSet;
use std::hash::Hash;

use crate::error::AppError;

/// Validate a trimmed title (1-256 Unicode characters).
pub fn validate_title(title: &str) -> Result<(), AppError> {
    validate_text(title, "Title", 256)
}

/// Validate a trimmed, required text field of at most `max` characters.
pub fn validate_text(value: &str, field: &str, max: usize) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(())
}

/// Validate an optional text field: when present it must fit in `max` characters.
pub fn validate_optional_text(value: Option<&str>, field: &str, max: usize) -> Result<(), AppError> {
    if let Some(value) = value
        && value.chars().count() > max
    {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Validate a reference list (no duplicates, max length). Empty lists are allowed.
pub fn validate_unique_refs<T>(refs: &[T], name: &str, max: usize) -> Result<(), AppError>
where
    T: Eq + Hash + std::fmt::Display,
{
    if refs.len() > max {
        return Err(AppError::Validation(format!("Too many {name}: max {max}")));
    }
    let mut seen = HashSet::new();
    for item in refs {
        if !seen.insert(item) {
            return Err(AppError::Validation(format!("Duplicate {name}: {item}")));
        }
    }
    Ok(())
}
