//! Field rules shared by every entity input

use validator::ValidationError;

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 15;

/// Entity names: 2 to 15 lowercase ASCII letters or digits, with hyphens
/// allowed between them as in a DNS label
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.len();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(ValidationError::new("name_length"));
    }

    if !name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    {
        return Err(ValidationError::new("name_charset"));
    }

    if name.starts_with('-') || name.ends_with('-') {
        return Err(ValidationError::new("name_hyphen"));
    }

    Ok(())
}

/// Emails are stored and compared lowercase
pub fn validate_lowercase(value: &str) -> Result<(), ValidationError> {
    if value.chars().any(char::is_uppercase) {
        return Err(ValidationError::new("not_lowercase"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_name("ab").is_ok());
        assert!(validate_name("acme1").is_ok());
        assert!(validate_name("acme-1").is_ok());
        assert!(validate_name("abcdefghijklmno").is_ok());
    }

    #[test]
    fn test_name_length_bounds() {
        assert!(validate_name("a").is_err());
        assert!(validate_name("").is_err());
        assert!(validate_name("abcdefghijklmnop").is_err());
    }

    #[test]
    fn test_name_charset() {
        assert!(validate_name("Acme").is_err());
        assert!(validate_name("acme_1").is_err());
        assert!(validate_name("-acme").is_err());
        assert!(validate_name("acme-").is_err());
        assert!(validate_name("acme 1").is_err());
        assert!(validate_name("äcme").is_err());
    }

    #[test]
    fn test_lowercase() {
        assert!(validate_lowercase("alice@example.com").is_ok());
        assert!(validate_lowercase("Alice@example.com").is_err());
    }
}
