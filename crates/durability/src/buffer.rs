//! In-memory load buffer
//!
//! Holds the whole target file during a load session and deframes records
//! from it with a forward-only cursor. The cursor never passes the end of the
//! data; a read that would is rejected before the cursor moves.

use flatsave_core::{Error, Record, RecordHeader, Result};

/// File contents plus read cursor.
#[derive(Debug, Default)]
pub struct LoadBuffer {
    data: Vec<u8>,
    cursor: usize,
}

impl LoadBuffer {
    /// Wrap loaded bytes with the cursor at the start.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data, cursor: 0 }
    }

    /// Total bytes held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no bytes are held.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current read position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// Deframe the record at the cursor and advance past it.
    ///
    /// The header's declared size is trusted: exactly that many payload
    /// bytes must follow or the read fails with [`Error::Truncated`].
    pub fn next_record(&mut self) -> Result<Record<'static>> {
        let available = self.remaining();
        if available < RecordHeader::SIZE {
            return Err(Error::Truncated {
                offset: self.cursor,
                needed: RecordHeader::SIZE,
                available,
            });
        }
        let header = RecordHeader::decode(&self.data[self.cursor..])?;

        let start = self.cursor + RecordHeader::SIZE;
        let size = header.size as usize;
        let available = self.data.len() - start;
        if available < size {
            return Err(Error::Truncated {
                offset: start,
                needed: size,
                available,
            });
        }

        let mut payload = Vec::new();
        payload
            .try_reserve_exact(size)
            .map_err(|_| Error::Allocation {
                what: "payload bytes",
                requested: size,
            })?;
        payload.extend_from_slice(&self.data[start..start + size]);

        self.cursor = start + size;
        Ok(Record::owned(header.record_type, payload))
    }

    /// Free the bytes and reset the cursor.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.cursor = 0;
    }
}
