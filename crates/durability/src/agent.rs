//! Serialization agent: record framing to and from one target file
//!
//! The agent is a pure framing layer. It writes records as header + payload,
//! reads the whole file back into a [`LoadBuffer`], and deframes records from
//! it one at a time. It never interprets a record's type tag.
//!
//! ## Session States
//!
//! ```text
//!   Idle --set_target--> Configured --prepare_write--> Writing --finalize_write--> Configured
//!                             |                            (append_record)
//!                             +--------load_all--------> Loaded --release_buffer--> Configured
//!                                                        (next_record)
//! ```
//!
//! The target is kept when a session closes, so one agent can save a file and
//! read it straight back. A closed session with no target reports `Idle`.
//!
//! ## Usage
//!
//! ```ignore
//! let mut agent = SerializationAgent::new();
//! agent.set_target("savefile")?;
//! agent.prepare_write()?;
//! agent.append_record(&Record::borrowed(1, b"payload"))?;
//! agent.finalize_write()?;
//!
//! agent.load_all()?;
//! let record = agent.next_record()?;
//! agent.release_buffer();
//! ```

use crate::buffer::LoadBuffer;
use crate::options::AgentOptions;
use flatsave_core::{Error, Record, RecordHeader, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Observable state of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    /// No target, no session
    Idle,
    /// Target set, no session open
    Configured,
    /// Output stream open
    Writing,
    /// Target contents held in memory
    Loaded,
}

enum Session {
    None,
    Writing(BufWriter<File>),
    Loaded(LoadBuffer),
}

/// Frames records onto one file and deframes them back.
pub struct SerializationAgent {
    target: Option<PathBuf>,
    session: Session,
    options: AgentOptions,
    bytes_written: u64,
}

impl SerializationAgent {
    /// Agent with default options.
    pub fn new() -> Self {
        Self::with_options(AgentOptions::default())
    }

    /// Agent with the given options.
    pub fn with_options(options: AgentOptions) -> Self {
        SerializationAgent {
            target: None,
            session: Session::None,
            options,
            bytes_written: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> AgentState {
        match self.session {
            Session::Writing(_) => AgentState::Writing,
            Session::Loaded(_) => AgentState::Loaded,
            Session::None if self.target.is_some() => AgentState::Configured,
            Session::None => AgentState::Idle,
        }
    }

    /// The configured target, if any.
    pub fn target(&self) -> Option<&Path> {
        self.target.as_deref()
    }

    /// Options this agent was built with.
    pub fn options(&self) -> AgentOptions {
        self.options
    }

    /// Bytes appended in the current or last write session.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Size of the loaded buffer (0 when nothing is loaded).
    pub fn loaded_len(&self) -> usize {
        match &self.session {
            Session::Loaded(buf) => buf.len(),
            _ => 0,
        }
    }

    /// Read position in the loaded buffer.
    pub fn cursor(&self) -> usize {
        match &self.session {
            Session::Loaded(buf) => buf.cursor(),
            _ => 0,
        }
    }

    /// Unread bytes in the loaded buffer.
    pub fn remaining(&self) -> usize {
        match &self.session {
            Session::Loaded(buf) => buf.remaining(),
            _ => 0,
        }
    }

    /// Set the file to work on. Any open session is closed first.
    ///
    /// Fails with [`Error::Configuration`] if `path` is empty.
    pub fn set_target(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            diag!(self.options.diagnostics, debug, "Target path is empty");
            return Err(Error::configuration("target path is empty"));
        }

        self.close_session();
        self.target = Some(path.to_path_buf());
        diag!(self.options.diagnostics, debug, "Set target: {}", path.display());
        Ok(())
    }

    /// Open the target for output, discarding its current content.
    pub fn prepare_write(&mut self) -> Result<()> {
        let path = self.require_target()?;
        if let Session::Writing(_) = self.session {
            return Err(Error::configuration("a write session is already open"));
        }
        self.release_buffer();

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| {
                diag!(self.options.diagnostics, warn, "Open {} for writing failed: {}", path.display(), e);
                Error::io("open", &path, e)
            })?;

        self.session = Session::Writing(BufWriter::new(file));
        self.bytes_written = 0;
        diag!(self.options.diagnostics, debug, "Opened {} for writing", path.display());
        Ok(())
    }

    /// Append one framed record to the open output stream.
    pub fn append_record(&mut self, record: &Record<'_>) -> Result<()> {
        let header = record.header()?;
        let diagnostics = self.options.diagnostics;
        let writer = match &mut self.session {
            Session::Writing(writer) => writer,
            _ => {
                diag!(diagnostics, warn, "Append of type {} with no write session open", header.record_type);
                return Err(Error::configuration("no write session is open"));
            }
        };

        let written = header
            .write_to(writer)
            .and_then(|()| writer.write_all(record.payload()));
        if let Err(e) = written {
            diag!(diagnostics, warn, "Write of type {} failed: {}", header.record_type, e);
            let path = self.target.clone().unwrap_or_default();
            return Err(Error::io("write", path, e));
        }

        self.bytes_written += header.total_len() as u64;
        diag!(
            diagnostics,
            debug,
            "Wrote record type {} ({} bytes)",
            header.record_type,
            header.total_len()
        );
        Ok(())
    }

    /// Flush and close the output stream.
    ///
    /// A failure here leaves the file incomplete; the session is over either
    /// way. `std` does not report errors from `close` itself, so the flush
    /// (and the `fsync`, when `sync_on_finalize` is set) is where a failed
    /// save surfaces.
    pub fn finalize_write(&mut self) -> Result<()> {
        let writer = match std::mem::replace(&mut self.session, Session::None) {
            Session::Writing(writer) => writer,
            other => {
                self.session = other;
                return Err(Error::configuration("no write session to finalize"));
            }
        };
        let path = self.target.clone().unwrap_or_default();

        let file = writer.into_inner().map_err(|e| {
            diag!(self.options.diagnostics, warn, "Flushing {} failed", path.display());
            Error::io("flush", &path, e.into_error())
        })?;
        if self.options.sync_on_finalize {
            file.sync_all().map_err(|e| Error::io("sync", &path, e))?;
        }
        drop(file);

        diag!(
            self.options.diagnostics,
            info,
            "Saved {} ({} bytes)",
            path.display(),
            self.bytes_written
        );
        Ok(())
    }

    /// Read the whole target into memory and position the cursor at its start.
    pub fn load_all(&mut self) -> Result<()> {
        let path = self.require_target()?;
        if let Session::Writing(_) = self.session {
            return Err(Error::configuration(
                "cannot load while a write session is open",
            ));
        }
        self.release_buffer();

        let data = self.read_target(&path).map_err(|e| {
            diag!(self.options.diagnostics, warn, "Loading {} failed: {}", path.display(), e);
            e
        })?;
        diag!(
            self.options.diagnostics,
            debug,
            "Loaded {} ({} bytes)",
            path.display(),
            data.len()
        );
        self.session = Session::Loaded(LoadBuffer::from_vec(data));
        Ok(())
    }

    /// Deframe the next record from the loaded buffer.
    ///
    /// With nothing loaded there are zero bytes available, so this fails with
    /// [`Error::Truncated`].
    pub fn next_record(&mut self) -> Result<Record<'static>> {
        let result = match &mut self.session {
            Session::Loaded(buf) => buf.next_record(),
            _ => Err(Error::Truncated {
                offset: 0,
                needed: RecordHeader::SIZE,
                available: 0,
            }),
        };

        match &result {
            Ok(record) => diag!(
                self.options.diagnostics,
                debug,
                "Read record type {} ({} bytes)",
                record.record_type(),
                record.total_len()
            ),
            Err(e) => diag!(self.options.diagnostics, warn, "Reading next record failed: {}", e),
        }
        result
    }

    /// Free the load buffer and reset the cursor. Safe to call at any time.
    ///
    /// An open write session is abandoned as well; use
    /// [`finalize_write`](Self::finalize_write) to complete a save.
    pub fn release_buffer(&mut self) {
        self.close_session();
    }

    fn close_session(&mut self) {
        match std::mem::replace(&mut self.session, Session::None) {
            Session::Loaded(mut buf) => {
                buf.release();
                diag!(self.options.diagnostics, debug, "Load buffer released");
            }
            Session::Writing(writer) => {
                diag!(self.options.diagnostics, warn, "Abandoning unfinalized write session");
                drop(writer);
            }
            Session::None => {}
        }
    }

    fn require_target(&self) -> Result<PathBuf> {
        match &self.target {
            Some(path) => Ok(path.clone()),
            None => {
                diag!(self.options.diagnostics, debug, "Target undefined");
                Err(Error::configuration("no target path set"))
            }
        }
    }

    fn read_target(&self, path: &Path) -> Result<Vec<u8>> {
        let mut file = File::open(path).map_err(|e| Error::io("open", path, e))?;
        let reported = file
            .metadata()
            .map_err(|e| Error::io("stat", path, e))?
            .len();
        let reported = usize::try_from(reported).map_err(|_| Error::Allocation {
            what: "load buffer bytes",
            requested: usize::MAX,
        })?;

        let mut data = Vec::new();
        data.try_reserve_exact(reported)
            .map_err(|_| Error::Allocation {
                what: "load buffer bytes",
                requested: reported,
            })?;
        file.read_to_end(&mut data)
            .map_err(|e| Error::io("read", path, e))?;

        if data.len() < reported {
            return Err(Error::io(
                "read",
                path,
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("read {} of {} bytes", data.len(), reported),
                ),
            ));
        }
        Ok(data)
    }
}

impl Default for SerializationAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SerializationAgent {
    fn drop(&mut self) {
        if let Session::Writing(writer) = &mut self.session {
            diag!(self.options.diagnostics, warn, "Agent dropped with an unfinalized write session");
            let _ = writer.flush();
        }
    }
}
