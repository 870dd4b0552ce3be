use std::io::{self, Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

use crate::commands;
use crate::errors::Error;
use crate::requests::TableId;

/// Open fresh connections to HAProxy, one per command.
pub trait ConnectionBuilder {
    type Stream: Read + Write;

    /// Create a new connection to HAProxy.
    fn connect(&self) -> Result<Connection<Self::Stream>, io::Error>;
}

/// Configuration for connecting to an HAProxy Unix Socket.
///
/// This allows configuration of the path for the Unix socket.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnixSocketBuilder {
    /// The path of the Unix socket.
    path: PathBuf,
}

impl UnixSocketBuilder {
    /// Create a new `UnixSocketBuilder` to establish connections to HAProxy via Unix Socket.
    ///
    /// # Examples
    /// ```no_run
    /// use haproxy_table_exporter::{ConnectionBuilder, UnixSocketBuilder};
    ///
    /// let socket_builder = UnixSocketBuilder::new("/run/haproxy/admin.sock".into());
    /// let connection = socket_builder.connect().expect("Failed to connect");
    /// ```
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

/// Use a default location of `/run/haproxy/admin.sock` for the Unix socket.
impl Default for UnixSocketBuilder {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/run/haproxy/admin.sock"),
        }
    }
}

impl ConnectionBuilder for UnixSocketBuilder {
    type Stream = UnixStream;

    fn connect(&self) -> Result<Connection<UnixStream>, io::Error> {
        UnixStream::connect(&self.path).map(Connection::new)
    }
}

impl From<PathBuf> for UnixSocketBuilder {
    fn from(path: PathBuf) -> Self {
        Self { path }
    }
}

/// A single-use session with HAProxy over any stream transport.
///
/// HAProxy closes the connection once it has answered a command, and the response carries no
/// length or terminator. `show_table` therefore takes `self`: the stream is read until the peer hangs
/// up and is dropped on every return path. Use a `ConnectionBuilder` to create a connection for
/// each command.
#[derive(Debug)]
pub struct Connection<T> {
    stream: T,
}

impl<T: Read + Write> Connection<T> {
    pub fn new(stream: T) -> Self {
        Self { stream }
    }

    /// Send one `show table` command and return everything HAProxy wrote back.
    ///
    /// A failure while reading is not reported: the protocol has no integrity check, so the
    /// bytes received before the failure are returned as the response.
    ///
    /// # Examples
    /// ```no_run
    /// use haproxy_table_exporter::{ConnectionBuilder, UnixSocketBuilder};
    /// use haproxy_table_exporter::requests::TableId;
    ///
    /// let connection = UnixSocketBuilder::default().connect().expect("Failed to connect");
    /// let dump = connection.show_table(&TableId::All).expect("Failed to list tables");
    /// println!("{}", dump);
    /// ```
    pub fn show_table(mut self, id: &TableId) -> Result<String, Error> {
        commands::show_table(&mut self.stream, id)?;
        commands::end(&mut self.stream)?;
        self.stream.flush()?;

        Ok(self.read_to_close(id))
    }

    fn read_to_close(mut self, id: &TableId) -> String {
        let mut buf = Vec::new();
        if let Err(err) = self.stream.read_to_end(&mut buf) {
            tracing::warn!(
                command = %id,
                bytes = buf.len(),
                error = %err,
                "control socket read failed, keeping partial response"
            );
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}
