#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("mailbox is closed")]
    Closed,
    #[error("message too long to truncate ({length} bytes, limit is {limit})")]
    MessageTooLong { length: usize, limit: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MuxError {
    #[error("multiple registrations for {command}")]
    DuplicateCommand { command: String },
}
