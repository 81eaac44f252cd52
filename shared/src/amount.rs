use thiserror::Error;
use tracing::debug;

use crate::model::{Currency, TEST_AMOUNT_CAP};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("amount {0} is negative")]
    Negative(f64),
}

/// Parses the raw field text as a finite, non-negative number.
pub fn parse_amount(raw: &str) -> Result<f64, AmountError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| AmountError::NotANumber(trimmed.to_string()))?;

    if !value.is_finite() {
        return Err(AmountError::NotANumber(trimmed.to_string()));
    }
    if value < 0.0 {
        return Err(AmountError::Negative(value));
    }

    Ok(value)
}

/// Normalizes the amount field: fractions are floored and the test token
/// is capped. Anything unparseable leaves the amount unset.
#[must_use]
pub fn normalize_amount(raw: &str, currency: Currency) -> Option<u64> {
    normalize_amount_with_cap(raw, currency, TEST_AMOUNT_CAP)
}

#[must_use]
pub fn normalize_amount_with_cap(raw: &str, currency: Currency, cap: u64) -> Option<u64> {
    let value = match parse_amount(raw) {
        Ok(value) => value,
        Err(AmountError::Empty) => return None,
        Err(e) => {
            debug!(error = %e, "amount input ignored");
            return None;
        }
    };

    // `as` saturates for values beyond u64::MAX.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let floored = value.floor() as u64;

    // Compared before flooring so 100.5 on the test token still lands on the cap.
    #[allow(clippy::cast_precision_loss)]
    let over_cap = value > cap as f64;

    if over_cap && currency.is_capped() {
        Some(cap)
    } else {
        Some(floored)
    }
}

/// Re-applies the test token cap to an already normalized amount.
#[must_use]
pub fn clamp_for_currency(amount: Option<u64>, currency: Currency, cap: u64) -> Option<u64> {
    match amount {
        Some(value) if currency.is_capped() && value > cap => Some(cap),
        other => other,
    }
}
