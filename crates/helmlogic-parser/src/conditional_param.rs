//! Conditional parameters
//!
//! A configuration line may carry a trailing bracketed condition that gates
//! when the parameter applies:
//!
//! ```text
//! speed = 2.0 [DEPLOY = true]
//! speed = 1.0 [(DEPLOY = true) and (RETURN = true)]   // slow on return
//! ```
//!
//! The bracketed segment must be the final one on the (comment-stripped)
//! line.

use crate::condition::Condition;
use crate::error::{ParseError, Result};

/// Remove everything from the first occurrence of `header` onwards
fn strip_comment<'a>(line: &'a str, header: &str) -> &'a str {
    if header.is_empty() {
        return line;
    }
    match line.find(header) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// True if the line ends with a bracketed segment.
///
/// ```
/// use helmlogic_parser::is_conditional_param_string;
///
/// assert!(is_conditional_param_string("abcdedfg [1234]   ", ""));
/// assert!(is_conditional_param_string("abcd[90] [1234]", ""));
/// assert!(is_conditional_param_string("abcd [1234] // comment ", "//"));
/// assert!(!is_conditional_param_string("abcd [sdfb] sdf ", ""));
/// ```
pub fn is_conditional_param_string(line: &str, comment_header: &str) -> bool {
    let line = strip_comment(line, comment_header).trim();
    line.ends_with(']') && line.contains('[')
}

/// Split `text [condition]` into the text before the last `[` and the
/// bracketed condition.
fn split_bracketed(line: &str) -> Result<(&str, &str)> {
    if !line.ends_with(']') {
        return Err(ParseError::InvalidConditionalParam(format!(
            "missing closing bracket: {}",
            line
        )));
    }
    match line.rfind('[') {
        Some(pos) if pos > 0 => Ok((line[..pos].trim(), line[pos + 1..line.len() - 1].trim())),
        _ => Err(ParseError::InvalidConditionalParam(format!(
            "missing parameter before condition: {}",
            line
        ))),
    }
}

/// A parameter assignment gated by a condition
#[derive(Debug, Clone, Default)]
pub struct ConditionalParam {
    parameter: String,
    param_val: String,
    condition: Condition,
    comment_header: String,
    ok: bool,
}

impl ConditionalParam {
    pub fn new() -> Self {
        Self::default()
    }

    /// Comment marker stripped from lines before parsing (e.g. `//`)
    pub fn set_comment_header(&mut self, header: &str) {
        self.comment_header = header.to_string();
    }

    /// Forget the previous parse, keeping the comment header
    fn reset(&mut self) {
        let allow_double_equals = self.condition.allow_double_equals();
        self.parameter.clear();
        self.param_val.clear();
        self.condition = Condition::new();
        self.condition.set_allow_double_equals(allow_double_equals);
        self.ok = false;
    }

    /// Parse a full line of the form `param = value [condition]`.
    ///
    /// A failed parse leaves the parameter empty with no condition.
    pub fn set_from_string(&mut self, line: &str) -> Result<()> {
        self.reset();
        let line = strip_comment(line, &self.comment_header).trim();
        let (assignment, condition) = split_bracketed(line)?;

        let eq = match assignment.find('=') {
            Some(pos) if pos > 0 && pos + 1 < assignment.len() => pos,
            _ => {
                return Err(ParseError::InvalidConditionalParam(format!(
                    "expected param = value: {}",
                    assignment
                )))
            }
        };

        self.set_parts(&assignment[..eq], &assignment[eq + 1..], condition)
    }

    /// Parse a parameter name plus a value of the form `value [condition]`
    pub fn set_from_pair(&mut self, param: &str, value: &str) -> Result<()> {
        self.reset();
        let value = strip_comment(value, &self.comment_header).trim();
        let (param_val, condition) = split_bracketed(value)?;
        self.set_parts(param, param_val, condition)
    }

    fn set_parts(&mut self, param: &str, value: &str, condition: &str) -> Result<()> {
        let param = param.trim();
        let value = value.trim();
        if param.is_empty() || value.is_empty() {
            return Err(ParseError::InvalidConditionalParam(format!(
                "empty parameter or value: '{}' = '{}'",
                param, value
            )));
        }

        self.condition.set_condition(condition)?;
        self.parameter = param.to_string();
        self.param_val = value.to_string();
        self.ok = true;
        Ok(())
    }

    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    pub fn param_val(&self) -> &str {
        &self.param_val
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Mutable access for binding variable values
    pub fn condition_mut(&mut self) -> &mut Condition {
        &mut self.condition
    }

    /// True after a successful parse
    pub fn is_ok(&self) -> bool {
        self.ok
    }
}
