use cordial_parser::{ParseError, StreamError};

#[derive(thiserror::Error, Debug)]
pub enum ConnError {
    #[error("end of stream")]
    Eof,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("line is not valid utf8")]
    InvalidUtf8,
    #[error("line too long, it was dropped")]
    LineTooLong,
}

impl ConnError {
    /// Whether only the current line is lost, the connection can still be used.
    pub fn is_message_error(&self) -> bool {
        matches!(
            self,
            ConnError::Parse(_) | ConnError::InvalidUtf8 | ConnError::LineTooLong
        )
    }
}

impl From<StreamError> for ConnError {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::Parse(err) => ConnError::Parse(err),
            StreamError::InvalidUtf8 => ConnError::InvalidUtf8,
        }
    }
}
