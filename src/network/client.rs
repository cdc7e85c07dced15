use crate::cfg::PingConfiguration;
use crate::network::encode::{read_framed, PacketEncoder};
use crate::network::error::{ConnectionError, PingError};
use crate::network::frame::FrameReader;
use crate::protocol::client::handshake::PacketHandshake;
use crate::protocol::client::status::PacketStatusRequest;
use crate::protocol::server::status::{PacketStatusResponse, ServerStatus};
use std::io;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{timeout, Instant};

/// Server List Ping client.
///
/// Each call opens its own socket, runs the handshake / request / response
/// sequence once and closes the socket again, whatever the outcome. Retrying
/// is left to the caller.
#[derive(Debug, Clone)]
pub struct PingClient {
    config: PingConfiguration,
}

impl PingClient {
    pub fn new(config: PingConfiguration) -> Self {
        Self { config }
    }

    pub async fn status(&self, host: &str, port: u16) -> Result<ServerStatus, PingError> {
        let mut stream = self.connect(host, port).await?;

        let result = self.exchange(&mut stream, host, port).await;

        // the socket is also closed on drop
        let _ = timeout(self.config.timeout, stream.shutdown()).await;

        result
    }

    /// Round trip of a bare TCP connect, or `None` if the server could not be reached.
    pub async fn latency(&self, host: &str, port: u16) -> Option<Duration> {
        let start = Instant::now();
        let stream = self.connect(host, port).await.ok()?;
        drop(stream);

        Some(start.elapsed())
    }

    pub(crate) async fn exchange<S>(
        &self,
        stream: &mut S,
        host: &str,
        port: u16,
    ) -> Result<ServerStatus, PingError>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send,
    {
        let mut enc = PacketEncoder::new();
        let mut buffer = vec![];

        let handshake = PacketHandshake::status(self.config.protocol_version, host, port);
        enc.consume(&mut buffer, &handshake)
            .map_err(ConnectionError::WriteFailed)?;
        enc.consume(&mut buffer, &PacketStatusRequest::new())
            .map_err(ConnectionError::WriteFailed)?;
        // both packets go out in one write
        self.send(stream, &buffer).await?;

        let mut reader = FrameReader::new(&mut *stream, self.config.timeout);
        let response = read_framed::<PacketStatusResponse, _>(&mut reader).await?;

        response.into_status()
    }

    async fn connect(&self, host: &str, port: u16) -> Result<TcpStream, ConnectionError> {
        match timeout(self.config.timeout, TcpStream::connect((host, port))).await {
            Err(_) => Err(ConnectionError::Unreachable(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("connecting to {}:{} timed out", host, port),
            ))),
            Ok(Err(e)) => Err(ConnectionError::Unreachable(e)),
            Ok(Ok(stream)) => Ok(stream),
        }
    }

    async fn send<S>(&self, stream: &mut S, bytes: &[u8]) -> Result<(), ConnectionError>
    where
        S: AsyncWrite + Unpin + Send,
    {
        match timeout(self.config.timeout, stream.write_all(bytes)).await {
            Err(_) => Err(ConnectionError::Timeout),
            Ok(Err(e)) => Err(ConnectionError::WriteFailed(e)),
            Ok(Ok(())) => Ok(()),
        }
    }
}
