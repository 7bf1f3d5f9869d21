//! Frame I/O over async byte streams.
//!
//! Generic over tokio's `AsyncRead`/`AsyncWrite` so the same code runs on
//! real TCP sockets, turmoil's simulated sockets, and in-memory duplex pipes.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::{errors::Result, frame::Frame, header::FrameHeader};

/// Read exactly one frame.
///
/// The header is validated before the payload is read, so an oversized or
/// garbage header never causes a large allocation.
///
/// # Errors
///
/// `Io` if the stream ends early, or any header validation error.
pub async fn read_frame<R>(reader: &mut R) -> Result<Frame>
where
    R: AsyncRead + Unpin,
{
    let mut header_buf = [0u8; FrameHeader::SIZE];
    reader.read_exact(&mut header_buf).await?;

    let header = FrameHeader::parse(&header_buf)?;
    let mut buf = vec![0u8; FrameHeader::SIZE + header.payload_size()];
    buf[..FrameHeader::SIZE].copy_from_slice(&header_buf);
    reader.read_exact(&mut buf[FrameHeader::SIZE..]).await?;

    Frame::decode(&buf)
}

/// Write one frame and flush.
pub async fn write_frame<W>(writer: &mut W, frame: &Frame) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::with_capacity(frame.encoded_len());
    frame.encode(&mut buf)?;
    writer.write_all(&buf).await?;
    writer.flush().await?;
    Ok(())
}
