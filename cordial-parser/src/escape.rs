//! Escaping rules for tag values.
//!
//! See: https://ircv3.net/specs/extensions/message-tags#escaping-values
use std::borrow::Cow;

fn is_escapable(c: char) -> bool {
    matches!(c, ';' | ' ' | '\r' | '\n' | '\\')
}

fn escaped(c: char) -> Option<&'static str> {
    let s = match c {
        ';' => "\\:",
        ' ' => "\\s",
        '\r' => "\\r",
        '\n' => "\\n",
        '\\' => "\\\\",
        _ => return None,
    };
    Some(s)
}

fn unescaped(c: char) -> Option<char> {
    let c = match c {
        ':' => ';',
        's' => ' ',
        'r' => '\r',
        'n' => '\n',
        '\\' => '\\',
        _ => return None,
    };
    Some(c)
}

pub(crate) fn contains_escapable(value: &str) -> bool {
    value.chars().any(is_escapable)
}

/// Number of characters in `value` that take two bytes once escaped.
pub(crate) fn count_escapable(value: &str) -> usize {
    value.chars().filter(|&c| is_escapable(c)).count()
}

fn contains_unescapable(value: &str) -> bool {
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.next().and_then(unescaped).is_some() {
            return true;
        }
    }
    false
}

/// Writes `value` to `out` with the escapable characters replaced.
pub(crate) fn write_escaped<W: std::fmt::Write>(out: &mut W, value: &str) -> std::fmt::Result {
    let mut start = 0;
    for (i, c) in value.char_indices() {
        if let Some(replacement) = escaped(c) {
            out.write_str(&value[start..i])?;
            out.write_str(replacement)?;
            start = i + c.len_utf8();
        }
    }
    out.write_str(&value[start..])
}

pub fn escape_tag_value(value: &str) -> Cow<'_, str> {
    if !contains_escapable(value) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + count_escapable(value));
    // writing into a String cannot fail
    let _ = write_escaped(&mut out, value);
    Cow::Owned(out)
}

/// Reverts [`escape_tag_value`].
///
/// A backslash followed by anything other than `:`, `s`, `r`, `n` or `\` is kept as is,
/// along with the character that follows it.
pub fn unescape_tag_value(value: &str) -> Cow<'_, str> {
    if !contains_unescapable(value) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.peek().copied().and_then(unescaped) {
            Some(u) => {
                out.push(u);
                chars.next();
            }
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}
