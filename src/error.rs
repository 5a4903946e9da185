use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("Invalid email format: '{0}'")]
    InvalidFormat(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type UserResult<T> = Result<T, UserError>;
