//! Field-level redaction.

use crate::wire::FlatWireRequest;

/// Wire fields whose values never appear in logs.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "security_key",
    "ccnumber",
    "cc_number",
    "cvv",
    "checkaba",
    "checkaccount",
    "cavv",
    "xid",
];

/// Fields where the last four characters may be shown.
const LAST_FOUR_FIELDS: &[&str] = &["ccnumber", "cc_number", "checkaccount"];

/// Whether `name` holds sensitive data.
#[must_use]
pub fn is_sensitive(name: &str) -> bool {
    SENSITIVE_FIELDS.contains(&name)
}

/// Masks `value` if `name` is sensitive.
///
/// Card and account numbers keep their last four characters; other
/// sensitive values become `***`.
#[must_use]
pub fn redact_value(name: &str, value: &str) -> String {
    if !is_sensitive(name) {
        return value.to_owned();
    }

    let chars: Vec<char> = value.chars().collect();
    if LAST_FOUR_FIELDS.contains(&name) && chars.len() > 8 {
        let visible = chars.len() - 4;
        let mut masked = "*".repeat(visible);
        masked.extend(&chars[visible..]);
        return masked;
    }

    "***".to_owned()
}

/// Stringified wire pairs with sensitive values masked.
#[must_use]
pub fn redacted_pairs(body: &FlatWireRequest) -> Vec<(String, String)> {
    body.iter()
        .map(|(name, value)| (name.to_owned(), redact_value(name, &value.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_card_number_keeps_last_four() {
        assert_eq!(redact_value("ccnumber", "4111111111111111"), "************1111");
    }

    #[test]
    fn test_redact_short_values_fully() {
        assert_eq!(redact_value("ccnumber", "4111"), "***");
        assert_eq!(redact_value("cvv", "123"), "***");
        assert_eq!(redact_value("security_key", "abcdefghijklmnop"), "***");
    }

    #[test]
    fn test_non_sensitive_passthrough() {
        assert_eq!(redact_value("first_name", "Ada"), "Ada");
        assert!(!is_sensitive("amount"));
    }
}
