//! Error types.

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The control socket could not be reached.
    #[error("failed to connect to control socket: {0}")]
    Connect(#[source] io::Error),

    /// Error encountered while sending a command.
    #[error("failed to send command: {0}")]
    Io(#[from] io::Error),

    /// Listing the stick tables failed.
    #[error("could not fetch tables")]
    TableList(#[source] Box<Error>),

    /// Dumping a single stick table failed.
    #[error("could not scrape table {table}")]
    Scrape {
        table: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Whether the root cause of this error is an unreachable control socket.
    pub fn is_connect(&self) -> bool {
        match self {
            Error::Connect(_) => true,
            Error::Io(_) => false,
            Error::TableList(inner) => inner.is_connect(),
            Error::Scrape { source, .. } => source.is_connect(),
        }
    }
}
