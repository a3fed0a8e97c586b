mod client;
mod conn;
mod error;
mod stream;
mod transport;

pub use crate::client::Client;
pub use crate::conn::Conn;
pub use crate::error::ConnError;
pub use crate::stream::Stream;
pub use crate::transport::connect;
