//! Heartbeat records advertising a peer's liveness.
//!
//! A heartbeat on the wire is the peer name as a NUL-terminated string
//! followed by the send time as signed milliseconds since the Unix epoch,
//! little-endian:
//!
//! ```text
//! +-----------------+------+----------------------------+
//! | peer (encoded)  | 0x00 | unix millis (i64, LE, 8 B) |
//! +-----------------+------+----------------------------+
//! ```
//!
//! The timestamp is produced in network order and flipped to little-endian
//! with [`swap_endianness`] before it is written; reading applies the same
//! swap to the eight received bytes.

use std::io::{Read, Write};

use tokio::io::{AsyncRead, AsyncWrite};

use crate::{
    byte_order::{read_network_i64, swap_endianness, write_network_i64},
    error::{PresenceError, Result},
    framing::{
        AsyncReadFramingExt,
        AsyncWriteFramingExt,
        ReadFramingExt,
        TextEncoding,
        WriteFramingExt,
        read_until_nul,
        read_until_nul_async,
    },
    memory::Timestamp,
};

/// Width of the encoded timestamp in bytes.
pub const STAMP_LEN: usize = 8;

/// A peer's advertisement that it is alive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heartbeat {
    /// Name of the advertising peer.
    pub peer: String,
    /// Instant the peer sent the heartbeat.
    pub stamp: Timestamp,
}

impl Heartbeat {
    /// Create a heartbeat for `peer` stamped at `stamp`.
    #[must_use]
    pub fn new(peer: impl Into<String>, stamp: Timestamp) -> Self {
        Self {
            peer: peer.into(),
            stamp,
        }
    }

    /// Create a heartbeat for `peer` stamped with the current time.
    #[must_use]
    pub fn now(peer: impl Into<String>) -> Self { Self::new(peer, Timestamp::now()) }

    fn stamp_bytes(&self) -> [u8; STAMP_LEN] {
        swap_endianness(write_network_i64(self.stamp.as_unix_millis()))
    }

    /// Write this heartbeat using the default text encoding.
    ///
    /// # Errors
    ///
    /// Returns [`PresenceError::Io`] if the writer fails.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        self.write_to_with(writer, TextEncoding::DEFAULT)
    }

    /// Write this heartbeat encoding the peer name with `encoding`.
    ///
    /// # Errors
    ///
    /// Returns [`PresenceError::Io`] if the writer fails.
    pub fn write_to_with<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        encoding: TextEncoding,
    ) -> Result<()> {
        WriteFramingExt::write_end_with(writer, &self.peer, encoding)?;
        WriteFramingExt::write_bytes(writer, &self.stamp_bytes())?;
        Ok(())
    }

    /// Read a heartbeat using the default text encoding.
    ///
    /// # Errors
    ///
    /// Returns [`PresenceError::Truncated`] if the stream ends before the
    /// record is complete and [`PresenceError::Io`] on other read failures.
    pub fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        Self::read_from_with(reader, TextEncoding::DEFAULT)
    }

    /// Read a heartbeat decoding the peer name with `encoding`.
    ///
    /// # Errors
    ///
    /// Returns [`PresenceError::Truncated`] if the stream ends before the
    /// record is complete and [`PresenceError::Io`] on other read failures.
    pub fn read_from_with<R: Read + ?Sized>(reader: &mut R, encoding: TextEncoding) -> Result<Self> {
        let (name, terminated) = read_until_nul(reader)?;
        Self::check_peer(&name, terminated)?;
        let stamp = ReadFramingExt::wait_n_bytes(reader, STAMP_LEN)?;
        Self::assemble(encoding.decode(&name), &stamp)
    }

    /// Write this heartbeat to an async stream using the default encoding.
    ///
    /// # Errors
    ///
    /// Returns [`PresenceError::Io`] if the writer fails.
    pub async fn write_to_async<W>(&self, writer: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.write_to_async_with(writer, TextEncoding::DEFAULT).await
    }

    /// Write this heartbeat to an async stream encoding the peer name with
    /// `encoding`.
    ///
    /// # Errors
    ///
    /// Returns [`PresenceError::Io`] if the writer fails.
    pub async fn write_to_async_with<W>(&self, writer: &mut W, encoding: TextEncoding) -> Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        AsyncWriteFramingExt::write_end_with(writer, &self.peer, encoding).await?;
        AsyncWriteFramingExt::write_bytes(writer, &self.stamp_bytes()).await?;
        Ok(())
    }

    /// Read a heartbeat from an async stream using the default encoding.
    ///
    /// # Errors
    ///
    /// Returns [`PresenceError::Truncated`] if the stream ends before the
    /// record is complete and [`PresenceError::Io`] on other read failures.
    pub async fn read_from_async<R>(reader: &mut R) -> Result<Self>
    where
        R: AsyncRead + Unpin + Send,
    {
        Self::read_from_async_with(reader, TextEncoding::DEFAULT).await
    }

    /// Read a heartbeat from an async stream decoding the peer name with
    /// `encoding`.
    ///
    /// # Errors
    ///
    /// Returns [`PresenceError::Truncated`] if the stream ends before the
    /// record is complete and [`PresenceError::Io`] on other read failures.
    pub async fn read_from_async_with<R>(reader: &mut R, encoding: TextEncoding) -> Result<Self>
    where
        R: AsyncRead + Unpin + Send,
    {
        let (name, terminated) = read_until_nul_async(reader).await?;
        Self::check_peer(&name, terminated)?;
        let stamp = AsyncReadFramingExt::wait_n_bytes(reader, STAMP_LEN).await?;
        Self::assemble(encoding.decode(&name), &stamp)
    }

    /// The peer name is complete only once its terminator has been read.
    fn check_peer(name: &[u8], terminated: bool) -> Result<()> {
        if !terminated {
            return Err(PresenceError::Truncated {
                field: "peer",
                have: name.len(),
                need: name.len() + 1,
            });
        }
        Ok(())
    }

    fn assemble(peer: String, stamp: &[u8]) -> Result<Self> {
        let stamp: [u8; STAMP_LEN] = stamp.try_into().map_err(|_| PresenceError::Truncated {
            field: "timestamp",
            have: stamp.len(),
            need: STAMP_LEN,
        })?;
        Ok(Self::new(
            peer,
            Timestamp::from_unix_millis(read_network_i64(swap_endianness(stamp))),
        ))
    }
}
