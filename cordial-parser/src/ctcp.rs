//! Client-to-client commands embedded in the trailing parameter: `\x01COMMAND args\x01`.
use crate::CtcpError;

const DELIMITER: char = '\x01';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ctcp<'a> {
    pub command: &'a str,
    pub args: &'a str,
}

/// Returns `None` when `s` is not delimited by `\x01` on both ends.
pub fn parse_ctcp(s: &str) -> Option<Ctcp<'_>> {
    if s.len() < 2 {
        return None;
    }
    let inner = s.strip_prefix(DELIMITER)?.strip_suffix(DELIMITER)?;
    let (command, args) = inner.split_once(' ').unwrap_or((inner, ""));
    Some(Ctcp { command, args })
}

pub fn encode_ctcp(command: &str, args: &str) -> Result<String, CtcpError> {
    if command.is_empty() {
        return Err(CtcpError::EmptyCommand);
    }

    let mut out = String::with_capacity(command.len() + args.len() + 3);
    out.push(DELIMITER);
    out.push_str(command);
    if !args.is_empty() {
        out.push(' ');
        out.push_str(args);
    }
    out.push(DELIMITER);
    Ok(out)
}
