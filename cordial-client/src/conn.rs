use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use cordial_parser::{BufferPool, LINE_TERMINATOR, Message, StreamParser};

use crate::{ConnError, Stream};

/// A line-based IRC connection over any [`Stream`].
#[derive(Debug)]
pub struct Conn<S> {
    stream: S,
    stream_parser: StreamParser,
    pool: Arc<BufferPool>,
}

impl<S: Stream> Conn<S> {
    pub fn new(stream: S) -> Self {
        Self::with_pool(stream, Arc::default())
    }

    /// Uses `pool` for the encoding buffers, it can be shared with other connections.
    pub fn with_pool(stream: S, pool: Arc<BufferPool>) -> Self {
        Self {
            stream,
            stream_parser: StreamParser::default(),
            pool,
        }
    }

    /// Waits for the next message.
    ///
    /// Cancel safe: the bytes already received stay buffered if the future is dropped.
    pub async fn decode(&mut self) -> Result<Message, ConnError> {
        loop {
            if let Some(result) = self.stream_parser.next_message() {
                return result.map_err(ConnError::from);
            }

            if self.stream_parser.is_overflowing() {
                self.stream_parser.reset();
                return Err(ConnError::LineTooLong);
            }

            let received = self.stream.read_buf(&mut self.stream_parser).await?;
            if received == 0 {
                // the last line may come without its terminator
                return match self.stream_parser.take_remaining() {
                    Some(result) => result.map_err(ConnError::from),
                    None => Err(ConnError::Eof),
                };
            }
        }
    }

    pub async fn encode(&mut self, message: &Message) -> Result<(), ConnError> {
        let mut buf = self.pool.checkout();
        // writing into a String cannot fail
        let _ = message.write_to(&mut *buf);
        buf.push_str(LINE_TERMINATOR);
        self.stream.write_all(buf.as_bytes()).await?;
        Ok(())
    }

    /// Writes bytes that are already encoded, line terminator included.
    pub async fn write_serialized(&mut self, bytes: &[u8]) -> Result<(), ConnError> {
        self.stream.write_all(bytes).await?;
        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<(), ConnError> {
        self.stream.shutdown().await?;
        Ok(())
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}
