/// Upper bound for each requester field, counted in characters.
pub const MAX_FIELD_LEN: usize = 300;

/// Validate a required field on its trimmed value. Returns the message to show on failure.
pub fn validate_required(value: &str, message: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(message.to_string());
    }
    None
}

/// Validate trimmed requester fields. Emptiness is checked field by field first,
/// then length across all three.
pub fn validate_submission(name: &str, email: &str, mobile: &str) -> Option<String> {
    validate_required(name, "Name is required.")
        .or_else(|| validate_required(email, "Email is required."))
        .or_else(|| validate_required(mobile, "Mobile number is required."))
        .or_else(|| {
            let too_long = [name, email, mobile]
                .iter()
                .any(|v| v.trim().chars().count() > MAX_FIELD_LEN);
            too_long.then(|| "One or more fields too long.".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complete_submission() {
        assert_eq!(validate_submission("Ada", "ada@example.com", "+44 7700 900000"), None);
    }

    #[test]
    fn whitespace_only_fields_are_missing() {
        assert_eq!(
            validate_submission("   ", "ada@example.com", "123"),
            Some("Name is required.".to_string())
        );
        assert_eq!(
            validate_submission("Ada", "\t", "123"),
            Some("Email is required.".to_string())
        );
        assert_eq!(
            validate_submission("Ada", "ada@example.com", ""),
            Some("Mobile number is required.".to_string())
        );
    }

    #[test]
    fn first_missing_field_wins() {
        assert_eq!(validate_submission("", "", ""), Some("Name is required.".to_string()));
    }

    #[test]
    fn length_limit_is_inclusive() {
        let at_limit = "a".repeat(MAX_FIELD_LEN);
        let over_limit = "a".repeat(MAX_FIELD_LEN + 1);
        assert_eq!(validate_submission(&at_limit, "e@x.io", "1"), None);
        assert_eq!(
            validate_submission("Ada", &over_limit, "1"),
            Some("One or more fields too long.".to_string())
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let accented = "é".repeat(MAX_FIELD_LEN);
        assert!(accented.len() > MAX_FIELD_LEN);
        assert_eq!(validate_submission(&accented, "e@x.io", "1"), None);
    }

    #[test]
    fn surrounding_whitespace_does_not_count() {
        let padded = format!("  {}  ", "a".repeat(MAX_FIELD_LEN));
        assert_eq!(validate_submission(&padded, "e@x.io", "1"), None);
    }
}
