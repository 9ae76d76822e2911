//! Phone number formatting.

/// Keep only the ASCII digits of `text`.
pub fn digits(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Format a phone number for display.
///
/// Ten digits become `(AAA) BBB-CCCC`, eleven become `+D AAA BBB CCCC`.
/// Anything else is returned unchanged.
pub fn format_phone(phone: &str) -> String {
    let d = digits(phone);
    match d.len() {
        10 => format!("({}) {}-{}", &d[..3], &d[3..6], &d[6..]),
        11 => format!("+{} {} {} {}", &d[..1], &d[1..4], &d[4..7], &d[7..]),
        _ => phone.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ten_digits() {
        assert_eq!(format_phone("9876543210"), "(987) 654-3210");
        assert_eq!(format_phone("987.654.3210"), "(987) 654-3210");
    }

    #[test]
    fn test_format_eleven_digits() {
        assert_eq!(format_phone("19876543210"), "+1 987 654 3210");
        assert_eq!(format_phone("+1-987-654-3210"), "+1 987 654 3210");
    }

    #[test]
    fn test_other_lengths_unchanged() {
        assert_eq!(format_phone("5550123"), "5550123");
        assert_eq!(format_phone("+1-555-0123"), "+1-555-0123");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn test_digits() {
        assert_eq!(digits("+1 (555) 0123"), "15550123");
        assert_eq!(digits("٣٤٥"), "");
    }
}
