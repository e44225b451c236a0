use thiserror::Error;

/// Failure of password generation. An empty charset is the only way it fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Character set is empty. Enable at least one character type.")]
    EmptyCharset,
}

/// Failure of a single clipboard strategy.
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard backend unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard rejected the write: {0}")]
    Rejected(String),

    #[error("toolkit clipboard failed: {0}")]
    Toolkit(String),

    #[error("clipboard contents would not outlive this process")]
    Unconfirmed,
}

/// Non-numeric or non-positive console entry. Recovered locally with a default.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("not a number: {0:?}")]
    NotANumber(String),

    #[error("must be at least 1")]
    NotPositive,

    #[error("must be at most {0}")]
    TooLarge(usize),
}

/// Failure of the console flow. Only I/O can really go wrong there.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),
}
