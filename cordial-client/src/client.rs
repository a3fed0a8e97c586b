use std::sync::Arc;
use std::time::Duration;

use cordial_core::{Handler, Mailbox};

use crate::{Conn, ConnError, Stream};

/// Reads messages from a connection and hands them to a handler.
///
/// Handlers run one at a time, in the order the messages arrive. What they send goes
/// through a [`Mailbox`] and is written to the connection between two reads.
#[derive(Clone)]
pub struct Client {
    handler: Arc<dyn Handler>,
}

impl Client {
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    /// Runs until the end of the stream (`Ok`) or an I/O error.
    ///
    /// Lines that cannot be parsed are logged and skipped.
    pub async fn run<S: Stream>(&self, mut conn: Conn<S>) -> Result<(), ConnError> {
        let (mailbox, mut rx) = Mailbox::new();

        let result = loop {
            tokio::select! {
                message = conn.decode() => {
                    match message {
                        Ok(message) => self.handler.handle_message(&mailbox, &message),
                        Err(ConnError::Eof) => break Ok(()),
                        Err(err) if err.is_message_error() => {
                            log::warn!("error when parsing message: {err}");
                        }
                        Err(err) => break Err(err),
                    }
                },
                Some(msg) = rx.recv() => {
                    if let Err(err) = conn.write_serialized(&msg).await {
                        break Err(err);
                    }
                }
            }
        };

        // close the mailbox, we don't want to receive any more messages at this point
        rx.close();

        // send what the handlers queued before the end, but don't hang on it
        let buf = {
            let mut buf = Vec::new();
            while let Ok(msg) = rx.try_recv() {
                buf.extend_from_slice(&msg);
            }
            buf
        };
        if !buf.is_empty() {
            let flush = conn.write_serialized(&buf);
            if tokio::time::timeout(Duration::from_secs(10), flush).await.is_err() {
                log::warn!("could not send the remaining messages in time");
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    use cordial_core::{MessageSink, Mux};
    use cordial_parser::Message;

    use super::Client;
    use crate::Conn;

    fn ping_mux() -> Mux {
        let mut mux = Mux::new();
        mux.handle_fn("PING", |sink: &dyn MessageSink, message: &Message| {
            let mut pong = Message::new("PONG").with_trailing(message.trailing.clone());
            pong.params = message.params.clone();
            let _ = sink.send(pong);
        })
        .unwrap();
        mux
    }

    #[tokio::test]
    async fn replies_are_written() {
        let (mut remote, local) = tokio::io::duplex(1024);
        let client = Client::new(Arc::new(ping_mux()));

        remote
            .write_all(b"PING :1\r\nNOTICE * :ignored\r\n@bad\r\nPING srv :2\r\n")
            .await
            .unwrap();
        remote.shutdown().await.unwrap();

        let (result, output) = tokio::join!(client.run(Conn::new(local)), async {
            let mut output = String::new();
            remote.read_to_string(&mut output).await.unwrap();
            output
        });

        result.unwrap();
        assert_eq!(output, "PONG :1\r\nPONG srv :2\r\n");
    }
}
