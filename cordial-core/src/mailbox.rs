use tokio::sync::mpsc::{error::TryRecvError, UnboundedReceiver, UnboundedSender};

use cordial_parser::Message;

use crate::{MessageSink, SendError};

/// An encoded message, line terminator included.
pub type SerializedMessage = Vec<u8>;

/// Serializes the messages it is given and queues them for the connection writer.
#[derive(Debug, Clone)]
pub struct Mailbox {
    sender: UnboundedSender<SerializedMessage>,
}

impl Mailbox {
    pub fn new() -> (Self, MailboxReceiver) {
        let (sender, receiver) = tokio::sync::mpsc::unbounded_channel();
        (Self { sender }, MailboxReceiver { receiver })
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl MessageSink for Mailbox {
    fn send(&self, message: Message) -> Result<(), SendError> {
        self.sender
            .send(message.to_bytes_with_terminator())
            .map_err(|_| SendError::Closed)
    }
}

#[derive(Debug)]
pub struct MailboxReceiver {
    receiver: UnboundedReceiver<SerializedMessage>,
}

impl MailboxReceiver {
    pub async fn recv(&mut self) -> Option<SerializedMessage> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Result<SerializedMessage, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Stops accepting messages, the ones already queued can still be received.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}

#[cfg(test)]
mod tests {
    use cordial_parser::Message;

    use super::Mailbox;
    use crate::{MessageSink, SendError};

    #[test]
    fn test_empty() {
        let (_mailbox, mut receiver) = Mailbox::new();
        receiver.try_recv().unwrap_err();
    }

    #[test]
    fn test_1message() {
        let (mailbox, mut receiver) = Mailbox::new();
        mailbox.send(Message::new("PING").with_trailing("test")).unwrap();
        let msg = receiver.try_recv().unwrap();
        assert_eq!(String::from_utf8(msg).unwrap(), "PING :test\r\n");
        receiver.try_recv().unwrap_err();
    }

    #[test]
    fn test_2message() {
        let (mailbox, mut receiver) = Mailbox::new();

        mailbox.send(Message::new("TA").with_param("2")).unwrap();
        mailbox.send(Message::new("TOTO")).unwrap();

        let msg = receiver.try_recv().unwrap();
        assert_eq!(String::from_utf8(msg).unwrap(), "TA 2\r\n");

        let msg = receiver.try_recv().unwrap();
        assert_eq!(String::from_utf8(msg).unwrap(), "TOTO\r\n");

        receiver.try_recv().unwrap_err();
    }

    #[test]
    fn test_closed() {
        let (mailbox, mut receiver) = Mailbox::new();
        mailbox.send(Message::new("QUIT")).unwrap();
        receiver.close();
        assert!(mailbox.is_closed());
        assert_eq!(mailbox.send(Message::new("PING")), Err(SendError::Closed));

        // already queued messages are still delivered
        assert_eq!(receiver.try_recv().unwrap(), b"QUIT\r\n");
        receiver.try_recv().unwrap_err();
    }
}
