//! PhoneNumber - E.164 normalized destination number

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Minimum number of national digits a customer number must carry.
const MIN_NATIONAL_DIGITS: usize = 10;

/// A phone number in E.164 form (`+` followed by digits only).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize free-form input such as `(416) 555-1234`.
    ///
    /// All non-digit characters are stripped and the country code is
    /// prefixed. Input that already starts with the country code and is
    /// longer than a national number keeps its digits as they are.
    pub fn normalize(raw: &str, country_code: &str) -> Result<Self, DomainError> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.len() < MIN_NATIONAL_DIGITS {
            return Err(DomainError::validation(format!(
                "Valid phone number is required (got {} digits)",
                digits.len()
            )));
        }

        let already_prefixed = digits.len() == MIN_NATIONAL_DIGITS + country_code.len()
            && digits.starts_with(country_code);

        if already_prefixed {
            Ok(Self(format!("+{}", digits)))
        } else {
            Ok(Self(format!("+{}{}", country_code, digits)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_digits_get_country_code() {
        let phone = PhoneNumber::normalize("4165551234", "1").unwrap();
        assert_eq!(phone.as_str(), "+14165551234");
    }

    #[test]
    fn test_formatting_is_stripped() {
        let phone = PhoneNumber::normalize("(416) 555-1234", "1").unwrap();
        assert_eq!(phone.as_str(), "+14165551234");
    }

    #[test]
    fn test_existing_country_code_is_kept() {
        let phone = PhoneNumber::normalize("+1 416 555 1234", "1").unwrap();
        assert_eq!(phone.as_str(), "+14165551234");
    }

    #[test]
    fn test_too_short_is_rejected() {
        let err = PhoneNumber::normalize("555-1234", "1").unwrap_err();
        assert!(err.is_validation());
    }
}
