//! Syntax predicates for condition text
//!
//! Characters reserved by the condition grammar: `"` `>` `<` `=` `!` `(` `)`.
//! Variable names may not contain any of them; literals may contain a quote
//! only as one surrounding pair.

const RESERVED: &[char] = &['"', '>', '<', '=', '!', ')', '('];

fn has_reserved(s: &str) -> bool {
    s.contains(RESERVED)
}

fn is_keyword(s: &str) -> bool {
    s.eq_ignore_ascii_case("or") || s.eq_ignore_ascii_case("and")
}

/// Parentheses balance: scanning left to right the depth never drops below
/// zero and ends at zero.
pub fn legal_parens(s: &str) -> bool {
    let mut depth: i64 = 0;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

/// True if the string is wrapped in one pair of parentheses that closes at
/// the final character.
///
/// ```
/// use helmlogic_parser::validate::global_parens;
///
/// assert!(global_parens("(A=1)"));
/// assert!(global_parens("((A=2) and (C<4))"));
/// assert!(!global_parens("(A=2) and (C<4)"));
/// assert!(!global_parens("A=1"));
/// ```
pub fn global_parens(s: &str) -> bool {
    let s = s.trim();
    if !legal_parens(s) || s.len() < 2 {
        return false;
    }
    if !s.starts_with('(') || !s.ends_with(')') {
        return false;
    }
    legal_parens(&s[1..s.len() - 1])
}

/// True if the string has the form `!(...)`
pub fn global_not_parens(s: &str) -> bool {
    let s = s.trim();
    if s.len() < 3 {
        return false;
    }
    match s.strip_prefix('!') {
        Some(rest) => global_parens(rest),
        None => false,
    }
}

/// Strip redundant outer parentheses, repeatedly.
///
/// `((A=2))` gives `A=2`; `(A=2)or(B=3)` is returned unchanged.
pub fn prune_parens(s: &str) -> &str {
    let mut s = s.trim();
    while global_parens(s) {
        s = s[1..s.len() - 1].trim();
    }
    s
}

/// Whether a string may be used as a variable name.
///
/// Rejects empty names, names containing whitespace or a reserved
/// character, and the keywords `or` / `and` in any case.
pub fn is_valid_variable(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() || has_reserved(s) || s.chars().any(char::is_whitespace) {
        return false;
    }
    !is_keyword(s)
}

/// Whether a string may be used as a literal on the right of a comparison.
///
/// Any single character is accepted, reserved or not. Bare `or` / `and`
/// are rejected, while the quoted forms `"or"` / `"and"` are accepted.
/// After removing one pair of surrounding quotes no reserved character may
/// remain.
pub fn is_valid_literal(s: &str) -> bool {
    let s = s.trim();
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (None, _) => return false,
        (Some(_), None) => return true,
        _ => {}
    }

    // Check before stripping quotes: quoted keywords are acceptable.
    if is_keyword(s) {
        return false;
    }

    let inner = if s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    };
    !has_reserved(inner)
}

/// Whether a string is a right-hand variable reference of the form `$(NAME)`
pub fn is_valid_right_variable(s: &str) -> bool {
    right_variable_name(s).is_some()
}

/// Extract `NAME` from a `$(NAME)` reference, if the reference is valid
pub fn right_variable_name(s: &str) -> Option<&str> {
    let s = s.trim();
    if s.len() < 3 {
        return None;
    }
    let rest = s.strip_prefix('$')?;
    if !global_parens(rest) {
        return None;
    }
    let rest = rest.trim();
    let name = rest[1..rest.len() - 1].trim();
    if is_valid_variable(name) {
        Some(name)
    } else {
        None
    }
}
