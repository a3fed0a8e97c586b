//! Codec for IRC messages, with IRCv3 message tags.
//!
//! Parsing gives an owned [`Message`], encoding writes it back to the same text
//! (up to the tags order and the spaces between sections).
mod ctcp;
mod encoder;
mod error;
mod escape;
mod fields;
mod message;
mod parser;
mod pool;
mod stream;

pub use crate::ctcp::{encode_ctcp, parse_ctcp, Ctcp};
pub use crate::encoder::LINE_TERMINATOR;
pub use crate::error::{CtcpError, ParseError};
pub use crate::escape::{escape_tag_value, unescape_tag_value};
pub use crate::fields::{split_fields, Fields};
pub use crate::message::{Message, Prefix, Tags};
pub use crate::parser::parse_message;
pub use crate::pool::{BufferPool, PooledBuffer};
pub use crate::stream::{MessageIterator, StreamError, StreamParser};
