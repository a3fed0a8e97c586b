use cordial_parser::Message;

use crate::SendError;

/// Destination of outgoing messages, given to the handlers.
pub trait MessageSink {
    fn send(&self, message: Message) -> Result<(), SendError>;
}
