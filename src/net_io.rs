pub mod packet;

use crate::network::error::{PingError, ProtocolError};
use crate::network::frame::FrameReader;
use async_trait::async_trait;
use byteorder::{BigEndian, WriteBytesExt};
use std::io;
use tokio::io::AsyncRead;

/// Serialises a value into a packet body under construction.
pub trait PacketWrite {
    fn pack_write(&self, buffer: &mut Vec<u8>) -> io::Result<()>;
}

/// Reads a value off a live connection.
#[async_trait]
pub trait PacketRead: Sized + Send {
    async fn pack_read<R>(reader: &mut FrameReader<R>) -> Result<Self, PingError>
    where
        R: AsyncRead + Unpin + Send;
}

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct VarInt(pub u32);

impl VarInt {
    pub const MAX_SIZE: usize = 5;

    pub fn to_bytes(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::MAX_SIZE);
        let mut v = self.0;
        loop {
            let mut temp = (v & 0b0111_1111) as u8;
            v >>= 7;
            if v != 0 {
                temp |= 0b1000_0000;
            }

            out.push(temp);

            if v == 0 {
                return out;
            }
        }
    }

    /// Decodes one VarInt, returning the value and how many bytes it took.
    ///
    /// A sixth byte is still pulled off the stream before the value is
    /// rejected, so a stream that ends after five continuation bytes reports
    /// `Closed` rather than `VarIntTooLong`.
    pub async fn decode<R>(reader: &mut FrameReader<R>) -> Result<(u32, usize), PingError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let mut size = 0;
        let mut v = 0u32;

        loop {
            let r = reader.read_u8().await?;
            if size == Self::MAX_SIZE {
                return Err(ProtocolError::VarIntTooLong.into());
            }

            v |= u32::from(r & 0b0111_1111) << (7 * size);
            size += 1;

            if r & 0b1000_0000 == 0 {
                return Ok((v, size));
            }
        }
    }
}

impl PacketWrite for VarInt {
    fn pack_write(&self, buffer: &mut Vec<u8>) -> io::Result<()> {
        buffer.extend_from_slice(&self.to_bytes());
        Ok(())
    }
}

#[async_trait]
impl PacketRead for VarInt {
    async fn pack_read<R>(reader: &mut FrameReader<R>) -> Result<Self, PingError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let (v, _) = VarInt::decode(reader).await?;
        Ok(VarInt(v))
    }
}

impl PacketWrite for u16 {
    fn pack_write(&self, buffer: &mut Vec<u8>) -> io::Result<()> {
        buffer.write_u16::<BigEndian>(*self)
    }
}

const MAX_STRING_SIZE: usize = 32767;

impl PacketWrite for String {
    fn pack_write(&self, buffer: &mut Vec<u8>) -> io::Result<()> {
        self.as_str().pack_write(buffer)
    }
}

impl PacketWrite for &str {
    fn pack_write(&self, buffer: &mut Vec<u8>) -> io::Result<()> {
        let bytes = self.as_bytes();
        let size = bytes.len();

        if size > MAX_STRING_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Write String too long (max size: {}, string size: {})",
                    MAX_STRING_SIZE, size
                ),
            ));
        }

        VarInt(size as u32).pack_write(buffer)?;
        buffer.extend_from_slice(bytes);

        Ok(())
    }
}

/// Strings coming back from a server are decoded leniently: invalid UTF-8
/// sequences become U+FFFD instead of failing the read.
#[async_trait]
impl PacketRead for String {
    async fn pack_read<R>(reader: &mut FrameReader<R>) -> Result<Self, PingError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let VarInt(size) = VarInt::pack_read(reader).await?;
        let buf = reader.read_exact(size as usize).await?;

        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
