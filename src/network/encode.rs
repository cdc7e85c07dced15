use crate::net_io::{PacketRead, PacketWrite, VarInt};
use crate::network::error::PingError;
use crate::network::frame::FrameReader;
use std::io;
use tokio::io::AsyncRead;

/// Wraps serialised packets in the outer VarInt length prefix.
#[derive(Debug, Clone, Default)]
pub struct PacketEncoder {
    staging_buf: Vec<u8>,
}

impl PacketEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consume<P: PacketWrite>(
        &mut self,
        out_buffer: &mut Vec<u8>,
        packet: &P,
    ) -> io::Result<()> {
        self.staging_buf.clear();
        packet.pack_write(&mut self.staging_buf)?;

        let packet_len = self.staging_buf.len() as u32;
        VarInt(packet_len).pack_write(out_buffer)?;
        out_buffer.extend_from_slice(&self.staging_buf);

        Ok(())
    }
}

/// Reads one length-prefixed packet off the wire.
///
/// The outer length is consumed but not checked against what the packet body
/// actually takes up.
pub async fn read_framed<P, R>(reader: &mut FrameReader<R>) -> Result<P, PingError>
where
    P: PacketRead,
    R: AsyncRead + Unpin + Send,
{
    let _length = VarInt::decode(reader).await?;
    P::pack_read(reader).await
}
