//! Form-field validation performed before any store mutation.
//!
//! The store accepts whatever it is given; these checks are how callers keep
//! names non-blank, amounts positive and spending within the allocation.

use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::models::Category;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ValidationError {
    #[error("Enter a category name")]
    EmptyName,
    #[error("Enter a description")]
    EmptyDescription,
    #[error("Enter a valid amount greater than zero")]
    InvalidAmount,
    #[error("Amount cannot exceed {max}")]
    AmountTooLarge { max: Decimal },
    #[error("Not enough budget ({remaining} left)")]
    InsufficientBudget { remaining: Decimal },
}

/// Trimmed category name, or `EmptyName` if nothing is left.
pub(crate) fn category_name(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

pub(crate) fn description(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    Ok(trimmed.to_string())
}

/// Largest single allocation or transaction accepted.
pub(crate) fn max_amount() -> Decimal {
    Decimal::from(1_000_000_000_000_u64)
}

/// Parse a strictly positive decimal amount no larger than [`max_amount`].
pub(crate) fn positive_amount(input: &str) -> Result<Decimal, ValidationError> {
    let amount =
        Decimal::from_str(input.trim()).map_err(|_| ValidationError::InvalidAmount)?;
    check_amount(amount)?;
    Ok(amount)
}

fn check_amount(amount: Decimal) -> Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::InvalidAmount);
    }
    if amount > max_amount() {
        return Err(ValidationError::AmountTooLarge { max: max_amount() });
    }
    Ok(())
}

/// Parse a transaction amount and check it fits in what is left of the
/// category's allocation.
pub(crate) fn transaction_amount(
    category: &Category,
    input: &str,
) -> Result<Decimal, ValidationError> {
    let amount = positive_amount(input)?;
    let remaining = category.remaining();
    if amount > remaining {
        return Err(ValidationError::InsufficientBudget {
            remaining: remaining.max(Decimal::ZERO),
        });
    }
    Ok(amount)
}

/// Per-field outcome of validating a two-field form. A mutation is only
/// attempted when both fields are `Ok`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldErrors {
    pub(crate) first: Option<ValidationError>,
    pub(crate) second: Option<ValidationError>,
}

/// Validate a category editor (name, allocated amount).
pub(crate) fn category_form(
    name: &str,
    allocated: &str,
) -> Result<(String, Decimal), FieldErrors> {
    match (category_name(name), positive_amount(allocated)) {
        (Ok(name), Ok(allocated)) => Ok((name, allocated)),
        (name, allocated) => Err(FieldErrors {
            first: name.err(),
            second: allocated.err(),
        }),
    }
}

/// Validate a transaction entry (description, amount) against a category.
pub(crate) fn transaction_form(
    category: &Category,
    desc: &str,
    amount: &str,
) -> Result<(String, Decimal), FieldErrors> {
    match (description(desc), transaction_amount(category, amount)) {
        (Ok(desc), Ok(amount)) => Ok((desc, amount)),
        (desc, amount) => Err(FieldErrors {
            first: desc.err(),
            second: amount.err(),
        }),
    }
}
