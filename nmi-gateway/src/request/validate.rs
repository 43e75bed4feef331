//! Shared field checks.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::{NmiError, Result};

fn invalid(message: String) -> NmiError {
    NmiError::InvalidInput(message)
}

/// `value` must be non-empty after trimming.
pub(crate) fn required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{field} is required")));
    }
    Ok(())
}

/// `value` must be present and non-empty.
pub(crate) fn required_opt(field: &str, value: Option<&str>) -> Result<()> {
    required(field, value.unwrap_or_default())
}

/// `value` must be present.
pub(crate) fn present<T>(field: &str, value: Option<&T>) -> Result<()> {
    if value.is_none() {
        return Err(invalid(format!("{field} is required")));
    }
    Ok(())
}

/// None of the `(field, is_set)` pairs may be set when sending `operation`.
pub(crate) fn not_accepted(operation: &str, fields: &[(&str, bool)]) -> Result<()> {
    match fields.iter().find(|(_, set)| *set) {
        Some((field, _)) => Err(invalid(format!("{field} is not accepted by {operation}"))),
        None => Ok(()),
    }
}

/// `value`, when present, must lie in `min..=max`.
pub(crate) fn in_range(field: &str, value: Option<u32>, min: u32, max: u32) -> Result<()> {
    match value {
        Some(v) if !(min..=max).contains(&v) => {
            Err(invalid(format!("{field} must be between {min} and {max}, got {v}")))
        }
        _ => Ok(()),
    }
}

/// `value` must be present and strictly positive.
pub(crate) fn positive_amount(field: &str, value: Option<Decimal>) -> Result<()> {
    match value {
        None => Err(invalid(format!("{field} is required"))),
        Some(v) if v <= Decimal::ZERO => Err(invalid(format!("{field} must be greater than 0"))),
        Some(_) => Ok(()),
    }
}

/// `value`, when present, must not be negative.
pub(crate) fn non_negative(field: &str, value: Option<Decimal>) -> Result<()> {
    match value {
        Some(v) if v.is_sign_negative() && !v.is_zero() => {
            Err(invalid(format!("{field} must not be negative")))
        }
        _ => Ok(()),
    }
}

/// `value`, when present, must have exactly `len` characters.
pub(crate) fn exact_len(field: &str, value: Option<&str>, len: usize) -> Result<()> {
    match value {
        Some(v) if v.chars().count() != len => {
            Err(invalid(format!("{field} must be exactly {len} characters")))
        }
        _ => Ok(()),
    }
}

/// `value`, when present, must look like `local@domain.tld`.
pub(crate) fn email(field: &str, value: Option<&str>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && domain.contains('.')
            && !value.chars().any(char::is_whitespace)
            && !domain.contains('@')
    });
    if !valid {
        return Err(invalid(format!("{field} must be a valid email address")));
    }
    Ok(())
}

/// Which end of a window a bare date stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DayBound {
    /// `00:00:00`.
    Start,
    /// `23:59:59`.
    End,
}

/// Parses `YYYYMMDD` or `YYYYMMDDhhmmss` into a calendar timestamp.
pub(crate) fn parse_gateway_date(field: &str, value: &str, bound: DayBound) -> Result<NaiveDateTime> {
    let digits = value.bytes().all(|b| b.is_ascii_digit());
    let parsed = match value.len() {
        8 if digits => NaiveDate::parse_from_str(value, "%Y%m%d").ok().and_then(|day| match bound {
            DayBound::Start => day.and_hms_opt(0, 0, 0),
            DayBound::End => day.and_hms_opt(23, 59, 59),
        }),
        14 if digits => NaiveDateTime::parse_from_str(value, "%Y%m%d%H%M%S").ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        invalid(format!("{field} must be a valid YYYYMMDD or YYYYMMDDhhmmss date, got '{value}'"))
    })
}

/// `value`, when present, must be a real `YYYYMMDD` or `YYYYMMDDhhmmss` date.
pub(crate) fn gateway_date(field: &str, value: Option<&str>) -> Result<()> {
    if let Some(v) = value {
        parse_gateway_date(field, v, DayBound::Start)?;
    }
    Ok(())
}

/// Recurrence fields shared by plans and subscriptions.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Schedule {
    pub(crate) day_frequency: Option<u32>,
    pub(crate) month_frequency: Option<u32>,
    pub(crate) day_of_month: Option<u32>,
}

impl Schedule {
    fn any(self) -> bool {
        self.day_frequency.is_some() || self.month_frequency.is_some() || self.day_of_month.is_some()
    }

    /// The day group and the month group are mutually exclusive.
    fn check_exclusive(self) -> Result<()> {
        if self.day_frequency.is_some()
            && (self.month_frequency.is_some() || self.day_of_month.is_some())
        {
            return Err(invalid(
                "day_frequency cannot be combined with month_frequency or day_of_month".to_owned(),
            ));
        }
        in_range("day_frequency", self.day_frequency, 1, u32::MAX)?;
        in_range("month_frequency", self.month_frequency, 1, 24)?;
        in_range("day_of_month", self.day_of_month, 1, 31)
    }

    /// Exactly one complete group is set.
    pub(crate) fn require_complete(self) -> Result<()> {
        self.check_exclusive()?;
        let month_group = self.month_frequency.is_some() && self.day_of_month.is_some();
        if self.day_frequency.is_none() && !month_group {
            return Err(invalid(
                "either day_frequency or both month_frequency and day_of_month are required"
                    .to_owned(),
            ));
        }
        Ok(())
    }

    /// If any field is set, exactly one complete group is set.
    pub(crate) fn require_complete_if_any(self) -> Result<()> {
        if self.any() { self.require_complete() } else { Ok(()) }
    }
}
