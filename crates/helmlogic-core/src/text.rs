//! Leaf text helpers shared by the parser and the evaluator.

/// Returns true if the trimmed string is wrapped in a pair of double quotes.
pub fn is_quoted(s: &str) -> bool {
    let s = s.trim();
    s.len() >= 2 && s.starts_with('"') && s.ends_with('"')
}

/// Removes one layer of surrounding double quotes, if present.
///
/// Unquoted input is returned unchanged (not trimmed).
pub fn strip_quotes(s: &str) -> &str {
    if is_quoted(s) {
        let s = s.trim();
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// Returns true if the string is a plain decimal number.
///
/// Accepts an optional leading sign, digits and at most one decimal point,
/// surrounded by optional blanks. Exponents, `inf` and `nan` are rejected.
pub fn is_number(s: &str) -> bool {
    let s = s.trim();
    let body = s.strip_prefix(&['-', '+'][..]).unwrap_or(s);

    let mut digits = 0;
    let mut dots = 0;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

/// Parses a numeric string, returning None unless [`is_number`] holds.
pub fn parse_number(s: &str) -> Option<f64> {
    if !is_number(s) {
        return None;
    }
    s.trim().parse::<f64>().ok()
}

/// Returns true if the string contains whitespace anywhere.
pub fn contains_white(s: &str) -> bool {
    s.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotes() {
        assert!(is_quoted("\"abc\""));
        assert!(is_quoted("  \"abc\" "));
        assert!(!is_quoted("\""));
        assert!(!is_quoted("abc\""));
        assert_eq!(strip_quotes("\"abc\""), "abc");
        assert_eq!(strip_quotes("\"\""), "");
        assert_eq!(strip_quotes("abc"), "abc");
    }

    #[test]
    fn test_is_number() {
        assert!(is_number("5"));
        assert!(is_number("-3.25"));
        assert!(is_number("+0.5"));
        assert!(is_number(" 12 "));
        assert!(is_number(".5"));
        assert!(!is_number(""));
        assert!(!is_number("-"));
        assert!(!is_number("1.2.3"));
        assert!(!is_number("1e5"));
        assert!(!is_number("inf"));
        assert!(!is_number("12a"));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("-3.5"), Some(-3.5));
        assert_eq!(parse_number("abc"), None);
    }
}
