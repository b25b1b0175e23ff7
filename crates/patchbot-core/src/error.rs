use thiserror::Error;

/// Bot-wide error types.
///
/// Transport failures never show up here: fetchers recover them locally
/// and hand back an absence marker instead.
#[derive(Debug, Error)]
pub enum BotError {
    /// Chat delivery error (send failed, channel lookup failed).
    #[error("Chat error: {0}")]
    Chat(String),

    /// Channel configuration could not be read or written.
    #[error("Config error: {0}")]
    Config(String),

    /// The invoking user lacks the privilege a command requires.
    #[error("Permission denied: {0}")]
    Permission(String),

    /// A referenced channel does not exist or is not visible to the bot.
    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    /// A command argument was missing or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid state transition.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for BotError {
    fn from(e: serde_json::Error) -> Self {
        BotError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for BotError {
    fn from(e: std::io::Error) -> Self {
        BotError::Config(e.to_string())
    }
}
