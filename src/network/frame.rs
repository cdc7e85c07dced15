use crate::network::error::{ConnectionError, PingError};
use std::io::ErrorKind;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;

const CHUNK_SIZE: usize = 8 * 1024;

/// Exact-length reads over a stream that may hand out partial chunks.
///
/// Every individual read is bounded by `deadline`; an overrun surfaces as
/// [`ConnectionError::Timeout`] and an end-of-stream or reset before the
/// requested count as [`ConnectionError::Closed`].
pub struct FrameReader<R> {
    inner: R,
    deadline: Duration,
    chunk: [u8; CHUNK_SIZE],
}

impl<R> FrameReader<R>
where
    R: AsyncRead + Unpin + Send,
{
    pub fn new(inner: R, deadline: Duration) -> Self {
        Self {
            inner,
            deadline,
            chunk: [0u8; CHUNK_SIZE],
        }
    }

    /// Reads until exactly `count` bytes have been collected.
    ///
    /// The output only grows by what the peer actually delivered, so a bogus
    /// length prefix cannot force a huge allocation up front.
    pub async fn read_exact(&mut self, count: usize) -> Result<Vec<u8>, PingError> {
        let mut buf = Vec::with_capacity(count.min(CHUNK_SIZE));

        while buf.len() < count {
            let want = (count - buf.len()).min(CHUNK_SIZE);
            let read = match timeout(self.deadline, self.inner.read(&mut self.chunk[..want])).await
            {
                Err(_) => return Err(ConnectionError::Timeout.into()),
                Ok(Err(e)) if peer_hung_up(e.kind()) => {
                    return Err(ConnectionError::Closed.into())
                }
                Ok(Err(e)) => return Err(ConnectionError::ReadFailed(e).into()),
                Ok(Ok(read)) => read,
            };

            if read == 0 {
                return Err(ConnectionError::Closed.into());
            }
            buf.extend_from_slice(&self.chunk[..read]);
        }

        Ok(buf)
    }

    pub async fn read_u8(&mut self) -> Result<u8, PingError> {
        let byte = self.read_exact(1).await?;
        Ok(byte[0])
    }
}

/// A peer that closes without reading what we sent answers with a reset
/// instead of a clean end of stream.
fn peer_hung_up(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::UnexpectedEof | ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted
    )
}
