use std::io;
use thiserror::Error;

/// Every way a status query can fail.
///
/// The ping client never logs or retries; it hands one of these back to the
/// caller with the underlying cause attached where there is one.
#[derive(Error, Debug)]
pub enum PingError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

#[derive(Error, Debug)]
pub enum ConnectionError {
    /// TCP connect failed: refused, unresolvable host or the connect deadline passed.
    #[error("server is unreachable: {0}")]
    Unreachable(#[source] io::Error),

    /// A read or write on an established connection exceeded its deadline.
    #[error("server did not answer in time")]
    Timeout,

    /// The remote end closed or reset the stream before the expected bytes arrived.
    #[error("connection closed before the full response was received")]
    Closed,

    #[error("failed to send packet: {0}")]
    WriteFailed(#[source] io::Error),

    /// Any other read error on an established connection.
    #[error("failed to read from server: {0}")]
    ReadFailed(#[source] io::Error),
}

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("VarInt too long (max size: 5)")]
    VarIntTooLong,

    #[error("unexpected packet id {0:#04x} in status response")]
    UnexpectedPacketId(u32),

    #[error("status payload is not valid JSON: {0}")]
    MalformedPayload(#[source] serde_json::Error),
}

impl PingError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, PingError::Connection(ConnectionError::Timeout))
    }
}
