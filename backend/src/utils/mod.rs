//! Collection of general utility functions shared across modules.

pub mod jwt;
pub mod password;
pub mod random;

use validator::ValidationError;

/// Accepts E.164 phone numbers: a leading `+` followed by 7 to 15 digits,
/// the first of which is not zero.
pub fn validate_e164(phone: &str) -> Result<(), ValidationError> {
    let digits = phone
        .strip_prefix('+')
        .ok_or_else(|| ValidationError::new("e164").with_message("Phone must start with '+'".into()))?;

    let well_formed = (7..=15).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0');

    if !well_formed {
        return Err(ValidationError::new("e164")
            .with_message("Phone must be in E.164 format, e.g. +14155552671".into()));
    }
    Ok(())
}

/// Accepts strings made only of ASCII digits.
pub fn validate_numeric(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("numeric").with_message("Must contain only digits".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_e164() {
        assert!(validate_e164("+14155552671").is_ok());
        assert!(validate_e164("+2348012345678").is_ok());
        assert!(validate_e164("+1234567").is_ok());
        assert!(validate_e164("+123456789012345").is_ok());

        assert!(validate_e164("14155552671").is_err());
        assert!(validate_e164("+0123456789").is_err());
        assert!(validate_e164("+1415-555-2671").is_err());
        assert!(validate_e164("+1234").is_err());
        assert!(validate_e164("+123456").is_err());
        assert!(validate_e164("+1234567890123456").is_err());
    }

    #[test]
    fn test_validate_numeric() {
        assert!(validate_numeric("123456").is_ok());
        assert!(validate_numeric("12a456").is_err());
    }
}
