//! Form-level validation helpers. First violation wins.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

pub fn require_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError(format!("{field} is required")))
    } else {
        Ok(())
    }
}

/// Loose shape check: something before and after a single-ish `@`.
///
/// Real validation happens server-side; this only catches obvious typos
/// before a round trip.
pub fn require_email(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let valid = match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError("email address is not valid".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_values_fail() {
        assert!(require_non_empty("name", "").is_err());
        assert!(require_non_empty("name", "   ").is_err());
        assert!(require_non_empty("name", "ok").is_ok());
    }

    #[test]
    fn email_shape_vectors() {
        assert!(require_email("a@b.com").is_ok());
        assert!(require_email(" a@b ").is_ok());
        assert!(require_email("nope").is_err());
        assert!(require_email("@b.com").is_err());
        assert!(require_email("a@").is_err());
        assert!(require_email("a@@b").is_err());
    }
}
