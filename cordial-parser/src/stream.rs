use slice_ring_buffer::SliceRingBuffer;

use crate::{parse_message, Message, ParseError};

const DEFAULT_CAPACITY: usize = 4096;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("line is not valid utf8")]
    InvalidUtf8,
}

/// Splits incoming bytes into lines and parses them.
///
/// Lines end with `\r` or `\n`, empty lines are skipped.
#[derive(Debug)]
pub struct StreamParser {
    buffer: SliceRingBuffer<u8>,
}

impl Default for StreamParser {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl StreamParser {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: SliceRingBuffer::with_capacity(capacity),
        }
    }

    pub fn feed_from_slice(&mut self, buf: &[u8]) {
        self.buffer.extend_from_slice(buf);
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the buffer is full with no line in it.
    ///
    /// The buffered bytes cannot form a line anymore, they should be discarded with
    /// [`Self::reset`].
    pub fn is_overflowing(&self) -> bool {
        self.buffer.len() >= self.buffer.capacity() && !self.buffer.iter().any(is_end_of_message)
    }

    pub fn reset(&mut self) {
        if !self.buffer.is_empty() {
            log::warn!("dropping {} buffered bytes", self.buffer.len());
        }
        self.buffer.clear();
    }

    /// Removes the next complete line from the buffer.
    pub fn next_line(&mut self) -> Option<Result<String, StreamError>> {
        // eat the EOL characters
        let start = self
            .buffer
            .iter()
            .position(|c| !is_end_of_message(c))
            .unwrap_or(self.buffer.len());
        self.advance(start);

        // if no EOL found, then the message is not finished
        let end = self.buffer.iter().position(is_end_of_message)?;

        #[allow(clippy::indexing_slicing)]
        let line = std::str::from_utf8(&self.buffer[..end])
            .map(str::to_owned)
            .map_err(|_| StreamError::InvalidUtf8);
        self.advance(end);
        Some(line)
    }

    pub fn next_message(&mut self) -> Option<Result<Message, StreamError>> {
        let line = self.next_line()?;
        Some(line.and_then(|line| parse_message(&line).map_err(StreamError::from)))
    }

    /// Parses what is left in the buffer even without a line terminator, for the end of
    /// the stream.
    pub fn take_remaining(&mut self) -> Option<Result<Message, StreamError>> {
        if let Some(result) = self.next_message() {
            return Some(result);
        }
        if self.buffer.is_empty() {
            return None;
        }

        let line = std::str::from_utf8(&self.buffer)
            .map(str::to_owned)
            .map_err(|_| StreamError::InvalidUtf8);
        self.buffer.clear();
        Some(line.and_then(|line| parse_message(&line).map_err(StreamError::from)))
    }

    pub fn consume_iter(&mut self) -> MessageIterator<'_> {
        MessageIterator {
            stream_parser: self,
        }
    }

    fn advance(&mut self, count: usize) {
        debug_assert!(count <= self.buffer.len());
        // SAFETY: count is at most the size of the buffer
        // and we don't care about dropping u8
        unsafe {
            self.buffer.move_head(count as isize);
        }
    }
}

unsafe impl bytes::BufMut for StreamParser {
    fn remaining_mut(&self) -> usize {
        self.buffer.capacity() - self.buffer.len()
    }

    unsafe fn advance_mut(&mut self, count: usize) {
        // SAFETY: we can move the tail up to remaining_mut
        // also elements were initialized by the caller of chunk_mut
        unsafe {
            self.buffer.move_tail(count as isize);
        }
    }

    fn chunk_mut(&mut self) -> &mut bytes::buf::UninitSlice {
        // SAFETY:
        // - the data won't be mutated elsewhere as the caller holds the mutable
        //   reference to StreamParser, hence the owned buffer can't be mutated
        // - unclear what else could be needed from tail_head_slice
        unsafe { self.buffer.tail_head_slice() }.into()
    }
}

fn is_end_of_message(c: &u8) -> bool {
    *c == b'\r' || *c == b'\n'
}

#[derive(Debug)]
pub struct MessageIterator<'a> {
    stream_parser: &'a mut StreamParser,
}

impl Iterator for MessageIterator<'_> {
    type Item = Result<Message, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.stream_parser.next_message()
    }
}

#[cfg(test)]
mod tests {
    use bytes::BufMut;

    use super::{StreamError, StreamParser};
    use crate::ParseError;

    #[test]
    fn test_empty() {
        let mut sp = StreamParser::default();
        sp.feed_from_slice(b"");
        let iter = sp.consume_iter();
        assert_eq!(iter.count(), 0);
    }

    #[test]
    fn test_one() {
        let mut sp = StreamParser::default();
        sp.feed_from_slice(b"CMD\r\n");
        let iter = sp.consume_iter();
        assert_eq!(iter.count(), 1);
    }

    #[test]
    fn test_one_and_half() {
        let mut sp = StreamParser::default();
        sp.feed_from_slice(b"CMD\r\nCA");
        let iter = sp.consume_iter();
        assert_eq!(iter.count(), 1);
        assert_eq!(sp.buffered(), 2);
    }

    #[test]
    fn test_two() {
        let mut sp = StreamParser::default();
        sp.feed_from_slice(b"CMD\nCAP\r");
        let commands = sp
            .consume_iter()
            .map(|m| m.unwrap().command)
            .collect::<Vec<_>>();
        assert_eq!(commands, ["CMD", "CAP"]);
    }

    #[test]
    fn test_one_plus_one() {
        let mut sp = StreamParser::default();
        sp.feed_from_slice(b"CMD\n");
        let iter = sp.consume_iter();
        assert_eq!(iter.count(), 1);
        sp.feed_from_slice(b"CAP\r");
        let iter = sp.consume_iter();
        assert_eq!(iter.count(), 1);
    }

    #[test]
    fn test_one_plus_one_2() {
        let mut sp = StreamParser::default();
        sp.feed_from_slice(b"CMD\nCAP");
        let iter = sp.consume_iter();
        assert_eq!(iter.count(), 1);
        sp.feed_from_slice(b"\n");
        let iter = sp.consume_iter();
        assert_eq!(iter.count(), 1);
    }

    #[test]
    fn test_blank_lines() {
        let mut sp = StreamParser::default();
        sp.feed_from_slice(b"\r\n\r\n\nPING :x\r\n\r\n");
        assert_eq!(sp.next_line(), Some(Ok("PING :x".to_string())));
        assert_eq!(sp.next_line(), None);
        assert_eq!(sp.buffered(), 0);
    }

    #[test]
    fn test_errors() {
        let mut sp = StreamParser::default();
        sp.feed_from_slice(b"@a=b\r\n\xff\xfe\r\nPING\r\n");
        let results = sp.consume_iter().collect::<Vec<_>>();
        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].clone().unwrap_err(),
            StreamError::Parse(ParseError::InvalidMessage)
        );
        assert_eq!(results[1].clone().unwrap_err(), StreamError::InvalidUtf8);
        assert_eq!(results[2].clone().unwrap().command, "PING");
    }

    #[test]
    fn test_raw_is_kept() {
        let mut sp = StreamParser::default();
        sp.feed_from_slice(b"@a=b  PING  :x\r\n");
        let message = sp.next_message().unwrap().unwrap();
        assert_eq!(message.raw(), "@a=b  PING  :x");
    }

    #[test]
    fn test_take_remaining() {
        let mut sp = StreamParser::default();
        sp.feed_from_slice(b"PING :a\r\nPING :b");
        assert_eq!(sp.take_remaining().unwrap().unwrap().trailing, "a");
        assert_eq!(sp.take_remaining().unwrap().unwrap().trailing, "b");
        assert!(sp.take_remaining().is_none());

        sp.feed_from_slice(b"\r\n");
        assert!(sp.take_remaining().is_none());
        assert_eq!(sp.buffered(), 0);
    }

    #[test]
    fn test_overflow() {
        let mut sp = StreamParser::with_capacity(16);
        let capacity = sp.remaining_mut();
        sp.feed_from_slice(&vec![b'a'; capacity]);
        assert!(sp.is_overflowing());
        assert_eq!(sp.next_line(), None);
        assert_eq!(sp.remaining_mut(), 0);

        sp.reset();
        assert_eq!(sp.buffered(), 0);
        assert!(!sp.is_overflowing());
        sp.feed_from_slice(b"PING\n");
        assert_eq!(sp.next_line(), Some(Ok("PING".to_string())));
    }
}
