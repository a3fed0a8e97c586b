use std::fmt::{self, Write};

use crate::{
    escape::{contains_escapable, count_escapable, write_escaped},
    Message,
};

pub const LINE_TERMINATOR: &str = "\r\n";

impl Message {
    fn has_tag_block(&self) -> bool {
        !self.tags.is_empty() || self.forced_tags
    }

    fn prefix_to_write(&self) -> Option<&crate::Prefix> {
        self.prefix.as_ref().filter(|p| !p.name.is_empty())
    }

    /// Writes the message without the line terminator.
    pub fn write_to<W: Write>(&self, out: &mut W) -> fmt::Result {
        if self.has_tag_block() {
            out.write_char('@')?;
            for (i, (key, value)) in self.tags.iter().enumerate() {
                if i > 0 {
                    out.write_char(';')?;
                }
                out.write_str(key)?;
                if !value.is_empty() {
                    out.write_char('=')?;
                    if contains_escapable(value) {
                        write_escaped(out, value)?;
                    } else {
                        out.write_str(value)?;
                    }
                }
            }
            out.write_char(' ')?;
        }

        // the name is mandatory, user and host are only written when present
        if let Some(prefix) = self.prefix_to_write() {
            out.write_char(':')?;
            out.write_str(&prefix.name)?;
            if !prefix.user.is_empty() {
                out.write_char('!')?;
                out.write_str(&prefix.user)?;
            }
            if !prefix.host.is_empty() {
                out.write_char('@')?;
                out.write_str(&prefix.host)?;
            }
            out.write_char(' ')?;
        }

        out.write_str(&self.command)?;

        for param in &self.params {
            out.write_char(' ')?;
            out.write_str(param)?;
        }

        if self.has_trailing() {
            out.write_str(" :")?;
            out.write_str(&self.trailing)?;
        }

        Ok(())
    }

    /// Length in bytes of the encoded message, without the line terminator.
    ///
    /// Computed without encoding, this is always `self.to_string().len()`.
    pub fn encoded_len(&self) -> usize {
        let mut len = 0;

        if self.has_tag_block() {
            // '@', the ';' separators and the final space
            len += self.tags.len().max(1) + 1;
            for (key, value) in &self.tags {
                len += key.len();
                if !value.is_empty() {
                    len += 1 + value.len() + count_escapable(value);
                }
            }
        }

        if let Some(prefix) = self.prefix_to_write() {
            len += prefix.name.len() + 2;
            if !prefix.user.is_empty() {
                len += prefix.user.len() + 1;
            }
            if !prefix.host.is_empty() {
                len += prefix.host.len() + 1;
            }
        }

        len += self.command.len();
        len += self.params.iter().map(|p| p.len() + 1).sum::<usize>();

        if self.has_trailing() {
            len += self.trailing.len() + 2;
        }

        len
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = String::with_capacity(self.encoded_len());
        // writing into a String cannot fail
        let _ = self.write_to(&mut buf);
        buf.into_bytes()
    }

    pub fn to_bytes_with_terminator(&self) -> Vec<u8> {
        let mut buf = String::with_capacity(self.encoded_len() + LINE_TERMINATOR.len());
        let _ = self.write_to(&mut buf);
        buf.push_str(LINE_TERMINATOR);
        buf.into_bytes()
    }

    /// Writes the encoded message followed by `\r\n`, returns the number of bytes written.
    pub fn write_with_terminator<W: std::io::Write>(&self, out: &mut W) -> std::io::Result<usize> {
        let buf = self.to_bytes_with_terminator();
        out.write_all(&buf)?;
        Ok(buf.len())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}
