//! Contact field normalization and phone format checks

/// Lowercase and trim an email address for storage and comparison
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// North American display format: `(555) 123-4567`
pub fn is_valid_phone(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    if bytes.len() != 14 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        0 => *b == b'(',
        4 => *b == b')',
        5 => *b == b' ',
        9 => *b == b'-',
        _ => b.is_ascii_digit(),
    })
}
