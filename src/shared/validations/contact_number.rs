//! Contact number format check
//!
//! Whitespace, parentheses and hyphens are formatting noise and are dropped
//! before matching. What remains must be an optional leading `+` followed by
//! 7 to 15 ASCII digits.

/// Minimum number of digits in a contact number.
pub const MIN_DIGITS: usize = 7;
/// Maximum number of digits in a contact number.
pub const MAX_DIGITS: usize = 15;

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '-')
}

/// Returns `true` when `raw` is an acceptable contact number.
pub fn is_valid_contact_number(raw: &str) -> bool {
    let cleaned: String = raw.chars().filter(|c| !is_separator(*c)).collect();

    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);

    (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len())
        && digits.bytes().all(|b| b.is_ascii_digit())
}
