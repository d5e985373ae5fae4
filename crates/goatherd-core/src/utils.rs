/// Quote text as a Go interpreted string literal.
///
/// Follows `strconv.Quote`: printable characters are kept, the usual escapes
/// are used for quotes, backslashes and whitespace controls, and other
/// control characters are hex or unicode escaped.
///
/// # Examples
/// ```
/// use goatherd_core::utils::go_quote;
/// assert_eq!(go_quote("name"), r#""name""#);
/// assert_eq!(go_quote("a \"b\"\n"), r#""a \"b\"\n""#);
/// ```
pub fn go_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{b}' => out.push_str("\\v"),
            '\u{c}' => out.push_str("\\f"),
            c if c.is_control() => {
                let code = c as u32;
                if code < 0x80 {
                    out.push_str(&format!("\\x{code:02x}"));
                } else if code <= 0xffff {
                    out.push_str(&format!("\\u{code:04x}"));
                } else {
                    out.push_str(&format!("\\U{code:08x}"));
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// The empty Go string literal, used for absent usage text.
pub const EMPTY_STRING_LITERAL: &str = "\"\"";
