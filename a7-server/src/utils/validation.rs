//! Input validation helpers
//!
//! Centralized text length limits and numeric checks, run by services
//! before anything reaches a store.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: inventory item, menu item, category, staff, table label
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: SKU, unit, order number, ids
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

// ── Numeric limits ──────────────────────────────────────────────────

/// Maximum stock quantity / par level for a single item
pub const MAX_QUANTITY: f64 = 1_000_000.0;

/// Maximum price or amount (€1,000,000)
pub const MAX_AMOUNT: f64 = 1_000_000.0;

/// Maximum quantity on a single order line
pub const MAX_ITEM_QTY: u32 = 9_999;

// ── Text ────────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Loose shape check: `local@domain.tld`, within [`MAX_EMAIL_LEN`]
pub fn validate_email(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_EMAIL_LEN)?;
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    };
    if !valid || value.chars().any(char::is_whitespace) {
        return Err(AppError::validation(format!(
            "{field} is not a valid email address"
        )));
    }
    Ok(())
}

// ── Numbers ─────────────────────────────────────────────────────────

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
pub fn require_finite(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

/// Finite, `>= 0` and at most `max`
pub fn require_non_negative(value: f64, field: &str, max: f64) -> Result<(), AppError> {
    require_finite(value, field)?;
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    if value > max {
        return Err(AppError::validation(format!(
            "{field} exceeds maximum allowed ({max}), got {value}"
        )));
    }
    Ok(())
}

/// Finite and at most `max` in magnitude; stock on hand may go negative
/// after over-selling
pub fn require_bounded(value: f64, field: &str, max: f64) -> Result<(), AppError> {
    require_finite(value, field)?;
    if value.abs() > max {
        return Err(AppError::validation(format!(
            "{field} exceeds maximum allowed ({max}), got {value}"
        )));
    }
    Ok(())
}
