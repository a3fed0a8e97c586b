mod chain;
mod error;
mod handler;
mod mailbox;
mod mux;
mod sink;
mod truncate;

pub use chain::{chain, Middleware};
pub use error::{MuxError, SendError};
pub use handler::{handler_fn, Handler, HandlerFn};
pub use mailbox::{Mailbox, MailboxReceiver, SerializedMessage};
pub use mux::Mux;
pub use sink::MessageSink;
pub use truncate::{truncate, Truncator};
