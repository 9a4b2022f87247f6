use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use super::errors::OrderError;

// ============================================================================
// Schema Rules
// ============================================================================
//
// Predicate chain used by every validating constructor. Each rule returns
// the first violation as an OrderError::Validation, so chaining rules with
// `?` reports only the first failure in schema field order.
//
// ============================================================================

pub const MIN_ITEMS: usize = 1;
pub const MAX_ITEMS: usize = 10;
pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 100;
pub const MIN_CANCEL_REASON_LEN: usize = 5;

static CURRENCY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("currency pattern is valid"));

pub(crate) type RuleResult = Result<(), OrderError>;

pub(crate) fn non_negative(value: Decimal) -> RuleResult {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(OrderError::validation(
            "Number must be greater than or equal to 0",
        ));
    }
    Ok(())
}

pub(crate) fn currency_code(value: &str) -> RuleResult {
    if !CURRENCY_CODE.is_match(value) {
        return Err(OrderError::validation("Invalid"));
    }
    Ok(())
}

/// Length is counted in characters, not bytes
pub(crate) fn min_chars(value: &str, min: usize) -> RuleResult {
    if value.chars().count() < min {
        return Err(OrderError::validation(format!(
            "String must contain at least {min} character(s)"
        )));
    }
    Ok(())
}

pub(crate) fn quantity_in_range(quantity: u32) -> RuleResult {
    if quantity < MIN_QUANTITY {
        return Err(OrderError::validation("Number must be greater than 0"));
    }
    if quantity > MAX_QUANTITY {
        return Err(OrderError::validation(format!(
            "Number must be less than or equal to {MAX_QUANTITY}"
        )));
    }
    Ok(())
}

pub(crate) fn item_count(count: usize) -> RuleResult {
    if count < MIN_ITEMS {
        return Err(OrderError::validation(format!(
            "Array must contain at least {MIN_ITEMS} element(s)"
        )));
    }
    if count > MAX_ITEMS {
        return Err(OrderError::validation(format!(
            "Array must contain at most {MAX_ITEMS} element(s)"
        )));
    }
    Ok(())
}
