use crate::net_io::packet::Packet;
use crate::net_io::{PacketRead, VarInt};
use crate::network::error::{PingError, ProtocolError};
use crate::network::frame::FrameReader;
use async_trait::async_trait;
use serde_json::Value;
use tokio::io::AsyncRead;

/// Status response body, still as the raw JSON string the server sent.
#[derive(Debug, Clone)]
pub struct PacketStatusResponse {
    json: String,
}

impl PacketStatusResponse {
    pub fn json(&self) -> &str {
        &self.json
    }

    pub fn into_status(self) -> Result<ServerStatus, PingError> {
        ServerStatus::parse(&self.json)
    }
}

impl Packet for PacketStatusResponse {
    fn packet_id() -> u32 {
        0x00
    }
}

#[async_trait]
impl PacketRead for PacketStatusResponse {
    async fn pack_read<R>(reader: &mut FrameReader<R>) -> Result<Self, PingError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let VarInt(id) = VarInt::pack_read(reader).await?;
        if id != Self::packet_id() {
            return Err(ProtocolError::UnexpectedPacketId(id).into());
        }

        Ok(Self {
            json: String::pack_read(reader).await?,
        })
    }
}

/// Decoded status JSON as returned by the server.
///
/// Nothing beyond "is valid JSON" is checked here. Pulling out player counts,
/// the MOTD or the favicon is up to the caller (see `crate::status`).
#[derive(Debug, Clone, PartialEq)]
pub struct ServerStatus(pub Value);

impl ServerStatus {
    pub fn parse(json: &str) -> Result<Self, PingError> {
        serde_json::from_str(json)
            .map(ServerStatus)
            .map_err(|e| ProtocolError::MalformedPayload(e).into())
    }

    pub fn json(&self) -> &Value {
        &self.0
    }
}
