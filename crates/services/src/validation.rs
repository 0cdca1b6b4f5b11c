//! Checks applied to raw command arguments before they reach a handler.

use quiz_core::model::QuizId;

use crate::error::CommandError;

/// Turn the `<id>` token of a command line into a `QuizId`.
///
/// Only the leading integer of the token counts, so `"12x"` is `12`. Whether
/// a quiz with that id exists is up to the caller.
///
/// # Errors
///
/// Returns `CommandError::MissingParameter` when there is no token and
/// `CommandError::NotANumber` when it does not start with an integer.
pub fn validate_id(raw: Option<&str>) -> Result<QuizId, CommandError> {
    let raw = raw.ok_or(CommandError::MissingParameter)?;
    parse_leading_int(raw)
        .map(QuizId::new)
        .ok_or(CommandError::NotANumber)
}

/// Parse the integer prefix of `raw`: optional leading whitespace, one
/// optional sign, then ASCII digits. Anything after the digits is ignored.
///
/// Returns `None` when there are no digits or the value does not fit in `i64`.
#[must_use]
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits_len = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    s[..sign_len + digits_len].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_is_missing_parameter() {
        assert!(matches!(
            validate_id(None),
            Err(CommandError::MissingParameter)
        ));
    }

    #[test]
    fn non_numeric_token_is_not_a_number() {
        for raw in ["abc", "", "-", "+x", "x12"] {
            assert!(
                matches!(validate_id(Some(raw)), Err(CommandError::NotANumber)),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn numeric_prefix_is_kept() {
        assert_eq!(validate_id(Some("12x")).unwrap(), QuizId::new(12));
        assert_eq!(validate_id(Some("7")).unwrap(), QuizId::new(7));
        assert_eq!(validate_id(Some("3.9")).unwrap(), QuizId::new(3));
        assert_eq!(validate_id(Some("  42")).unwrap(), QuizId::new(42));
    }

    #[test]
    fn signs_are_accepted() {
        assert_eq!(parse_leading_int("+5"), Some(5));
        assert_eq!(parse_leading_int("-5abc"), Some(-5));
    }

    #[test]
    fn hex_prefix_is_read_as_decimal_zero() {
        assert_eq!(validate_id(Some("0x1A")).unwrap(), QuizId::new(0));
    }

    #[test]
    fn overflow_is_not_a_number() {
        assert_eq!(parse_leading_int("99999999999999999999"), None);
    }
}
