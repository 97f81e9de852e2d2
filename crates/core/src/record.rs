//! Record framing
//!
//! A record is the unit of persisted data: a caller-defined type tag and a
//! payload of raw bytes. On disk every record is an 8-byte header followed by
//! the payload, with nothing in between and nothing after:
//!
//! ```text
//! +----------------+----------------+-------------------------+
//! | type (u32 LE)  | size (u32 LE)  | payload (size bytes)    |
//! +----------------+----------------+-------------------------+
//! ```
//!
//! There is no magic number, version, checksum or record count. The reader
//! trusts the declared size and demands exactly that many bytes.

use crate::error::{Error, Result};
use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use std::borrow::Cow;
use std::io::{self, Write};

/// Fixed-width record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordHeader {
    /// Caller-defined type tag, opaque to the framework
    pub record_type: u32,
    /// Payload length in bytes
    pub size: u32,
}

impl RecordHeader {
    /// Encoded header length: two little-endian `u32` fields.
    pub const SIZE: usize = 8;

    /// Create a header.
    pub fn new(record_type: u32, size: u32) -> Self {
        Self { record_type, size }
    }

    /// Encode to the on-disk byte layout.
    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        LittleEndian::write_u32(&mut buf[0..4], self.record_type);
        LittleEndian::write_u32(&mut buf[4..8], self.size);
        buf
    }

    /// Decode from the first [`RecordHeader::SIZE`] bytes of `bytes`.
    ///
    /// Fails with [`Error::Truncated`] if fewer bytes are supplied.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(Error::Truncated {
                offset: 0,
                needed: Self::SIZE,
                available: bytes.len(),
            });
        }
        Ok(Self {
            record_type: LittleEndian::read_u32(&bytes[0..4]),
            size: LittleEndian::read_u32(&bytes[4..8]),
        })
    }

    /// Write the header to a stream.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(self.record_type)?;
        writer.write_u32::<LittleEndian>(self.size)
    }

    /// Header plus payload length.
    pub fn total_len(&self) -> usize {
        Self::SIZE + self.size as usize
    }
}

/// A type tag and its payload.
///
/// The payload is borrowed when an object exports its state (nothing is
/// copied on the save path) and owned when the agent hands a record back from
/// a load buffer. The size written to the header is always the payload's
/// length, so the declared size cannot drift from the bytes present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    record_type: u32,
    payload: Cow<'a, [u8]>,
}

impl<'a> Record<'a> {
    /// Create a record that borrows its payload.
    pub fn borrowed(record_type: u32, payload: &'a [u8]) -> Self {
        Self {
            record_type,
            payload: Cow::Borrowed(payload),
        }
    }

    /// Create an empty record (zero-length payload).
    pub fn empty(record_type: u32) -> Self {
        Self::borrowed(record_type, &[])
    }

    /// The type tag.
    pub fn record_type(&self) -> u32 {
        self.record_type
    }

    /// The payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Whether the payload is borrowed from its producer.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.payload, Cow::Borrowed(_))
    }

    /// Payload length as the 32-bit header field.
    ///
    /// Fails with [`Error::PayloadTooLarge`] above `u32::MAX` bytes.
    pub fn size(&self) -> Result<u32> {
        u32::try_from(self.payload.len()).map_err(|_| Error::PayloadTooLarge {
            len: self.payload.len(),
        })
    }

    /// Header describing this record.
    pub fn header(&self) -> Result<RecordHeader> {
        Ok(RecordHeader::new(self.record_type, self.size()?))
    }

    /// Bytes this record occupies on disk.
    pub fn total_len(&self) -> usize {
        RecordHeader::SIZE + self.payload.len()
    }

    /// Detach from the producer, copying a borrowed payload.
    pub fn into_owned(self) -> Record<'static> {
        Record {
            record_type: self.record_type,
            payload: Cow::Owned(self.payload.into_owned()),
        }
    }

    /// Take the payload, copying it if borrowed.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload.into_owned()
    }
}

impl Record<'static> {
    /// Create a record that owns its payload.
    pub fn owned(record_type: u32, payload: Vec<u8>) -> Self {
        Self {
            record_type,
            payload: Cow::Owned(payload),
        }
    }
}
