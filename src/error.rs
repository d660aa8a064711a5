// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    /// Invalid command-line arguments.
    Usage(String),
    Transport(TransportError),
    /// The window event loop failed.
    Gui(String),
}

/// Failures reported by a notification transport.
///
/// None of these reach the user directly: the client recovers from them by
/// reconnecting, falling back to polling, or (for one-shot requests) by
/// turning them into a structured failure result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The service does not offer a server-sent event stream at this endpoint.
    Unsupported(String),

    /// The request could not be sent or the connection dropped.
    Http(String),

    /// The service answered with a non-success status code.
    Status(u16),

    /// The response body could not be decoded.
    Decode(String),
}

impl TransportError {
    /// Returns true if the failure means push delivery is unavailable, as
    /// opposed to a transient fault worth retrying.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, TransportError::Unsupported(_))
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Unsupported(reason) => {
                write!(f, "Event stream unsupported: {}", reason)
            }
            TransportError::Http(msg) => write!(f, "HTTP error: {}", msg),
            TransportError::Status(code) => write!(f, "HTTP status: {}", code),
            TransportError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Usage(e) => write!(f, "Usage Error: {}", e),
            Error::Transport(e) => write!(f, "Transport Error: {}", e),
            Error::Gui(e) => write!(f, "GUI Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        Error::Transport(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<pico_args::Error> for Error {
    fn from(err: pico_args::Error) -> Self {
        Error::Usage(err.to_string())
    }
}

impl From<iced::Error> for Error {
    fn from(err: iced::Error) -> Self {
        Error::Gui(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            TransportError::Status(status.as_u16())
        } else {
            TransportError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
