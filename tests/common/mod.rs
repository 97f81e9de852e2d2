//! Shared fixtures for integration tests
//!
//! Two persistable objects in the shapes applications actually write:
//! - [`Fixed`]: a fixed-size struct that rejects any payload of another length
//! - [`Message`]: a variable-size buffer that adopts whatever length it is given

#![allow(dead_code)]

use flatsave::{expect_len, CheckError, ImportError, Record, SerializableObject};
use std::path::PathBuf;
use std::sync::Once;
use tempfile::TempDir;

/// Type tag used by [`Fixed`]
pub const FIXED_TYPE: u32 = 1;
/// Type tag used by [`Message`]
pub const MESSAGE_TYPE: u32 = 2;

/// Fixed-size object: always exports exactly `N` bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixed<const N: usize> {
    pub bytes: [u8; N],
}

impl<const N: usize> Fixed<N> {
    pub fn new(bytes: [u8; N]) -> Self {
        Self { bytes }
    }

    pub fn zeroed() -> Self {
        Self { bytes: [0; N] }
    }
}

impl<const N: usize> SerializableObject for Fixed<N> {
    fn export_state(&self) -> Record<'_> {
        Record::borrowed(FIXED_TYPE, &self.bytes)
    }

    fn import_state(&mut self, payload: &[u8]) -> Result<(), ImportError> {
        expect_len(N, payload)?;
        self.bytes.copy_from_slice(payload);
        Ok(())
    }

    fn self_check(&self) -> Result<(), CheckError> {
        if self.bytes.iter().all(|b| *b == 0) {
            return Err(CheckError::new("all bytes are zero"));
        }
        Ok(())
    }
}

/// Variable-size object: adopts any payload length
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub data: Vec<u8>,
}

impl Message {
    pub fn new(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}

impl SerializableObject for Message {
    fn export_state(&self) -> Record<'_> {
        Record::borrowed(MESSAGE_TYPE, &self.data)
    }

    fn import_state(&mut self, payload: &[u8]) -> Result<(), ImportError> {
        let mut data = Vec::new();
        data.try_reserve_exact(payload.len())
            .map_err(|_| ImportError::Allocation {
                requested: payload.len(),
            })?;
        data.extend_from_slice(payload);
        self.data = data;
        Ok(())
    }
}

pub fn create_test_dir() -> TempDir {
    TempDir::new().unwrap()
}

pub fn save_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

/// Install a test-writer subscriber once per test binary
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
            .with_test_writer()
            .try_init();
    });
}
