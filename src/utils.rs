pub const fn const_unwrap<T: Copy>(x: Option<T>) -> T {
    if let Some(x) = x { x } else { panic!("Failed to const unwrap.") }
}

// The grammar only knows the English alphabet, so non-ASCII letters are rejected.
pub const fn is_letter(c: u8) -> bool {
    c.is_ascii_alphabetic()
}

pub const fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

pub const fn is_stop_char(c: u8) -> bool {
    is_letter(c) || c == b'_' || c == b'^'
}

pub const fn is_ticket_name_char(c: u8) -> bool {
    is_letter(c) || c == b' '
}

pub fn digit_value(c: u8) -> u64 {
    (c - b'0') as u64
}

// Strip the carriage return left behind by CRLF input.
pub fn trim_line_ending(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_chars() {
        assert!(is_stop_char(b'a'));
        assert!(is_stop_char(b'Z'));
        assert!(is_stop_char(b'_'));
        assert!(is_stop_char(b'^'));
        assert!(!is_stop_char(b' '));
        assert!(!is_stop_char(b'1'));
        assert!(!is_stop_char(0xc3));
    }

    #[test]
    fn ticket_name_chars() {
        assert!(is_ticket_name_char(b' '));
        assert!(is_ticket_name_char(b'q'));
        assert!(!is_ticket_name_char(b'_'));
    }

    #[test]
    fn line_endings() {
        assert_eq!(trim_line_ending("1 5:55 A\r"), "1 5:55 A");
        assert_eq!(trim_line_ending("1 5:55 A"), "1 5:55 A");
    }
}
