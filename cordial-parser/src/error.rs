#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty message")]
    EmptyInput,
    // NOTE: covers both an unterminated tag/prefix block and a missing command
    #[error("invalid message")]
    InvalidMessage,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtcpError {
    #[error("empty ctcp command")]
    EmptyCommand,
}
