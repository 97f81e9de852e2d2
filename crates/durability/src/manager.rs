//! Serialization manager: save-all / load-all orchestration
//!
//! The manager holds an ordered list of borrowed [`SerializableObject`]s and
//! drives a transient [`SerializationAgent`] over them.
//!
//! ## Positional Correspondence
//!
//! The file carries no identifiers. The n-th record saved is the n-th record
//! loaded, and it goes to the n-th registered object. The manager never reads
//! a record's type tag. Registering objects in a different order for a load
//! than for the save hands each object another object's bytes; this is only
//! caught when the receiving object rejects the payload length.
//!
//! ## Failure Behavior
//!
//! Both sessions abort on the first error and return it. A failed save is not
//! rolled back and may leave a truncated file. A load always releases its
//! buffer before returning, whether it succeeded or not.

use crate::agent::SerializationAgent;
use crate::options::ManagerOptions;
use flatsave_core::{Error, Result, SerializableObject};
use std::path::Path;

/// Slots kept free below the configured capacity.
///
/// With capacity `n`, at most `n - REGISTRATION_HEADROOM` objects can be
/// registered: a registration succeeds only while `count + 1 < capacity`.
pub const REGISTRATION_HEADROOM: usize = 1;

/// Ordered registry of persistable objects.
///
/// # Example
///
/// ```ignore
/// let mut settings = Settings::default();
/// let mut scores = HighScores::default();
///
/// let mut mgr = SerializationManager::new()?;
/// mgr.register(&mut settings)?;
/// mgr.register(&mut scores)?;
/// mgr.save_all("savefile")?;
/// mgr.load_all("savefile")?;
/// ```
pub struct SerializationManager<'a> {
    objects: Vec<&'a mut dyn SerializableObject>,
    options: ManagerOptions,
}

impl<'a> SerializationManager<'a> {
    /// Manager with the default capacity of 8.
    pub fn new() -> Result<Self> {
        Self::with_options(ManagerOptions::default())
    }

    /// Manager with the given capacity and default options otherwise.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_options(ManagerOptions::default().with_capacity(capacity))
    }

    /// Manager with the given options.
    ///
    /// Fails with [`Error::Allocation`] if the registration list cannot be
    /// reserved.
    pub fn with_options(options: ManagerOptions) -> Result<Self> {
        let slots = options.capacity.saturating_sub(REGISTRATION_HEADROOM);
        let mut objects = Vec::new();
        objects
            .try_reserve_exact(slots)
            .map_err(|_| Error::Allocation {
                what: "registration slots",
                requested: options.capacity,
            })?;

        diag!(
            options.diagnostics,
            debug,
            "Manager created with capacity {} ({} usable slots)",
            options.capacity,
            slots
        );
        Ok(SerializationManager { objects, options })
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.options.capacity
    }

    /// Number of objects that can be registered under the capacity.
    pub fn max_registrations(&self) -> usize {
        self.options.capacity.saturating_sub(REGISTRATION_HEADROOM)
    }

    /// Number of registered objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Options this manager was built with.
    pub fn options(&self) -> &ManagerOptions {
        &self.options
    }

    /// Append an object to the registration list.
    ///
    /// Only the reference is stored. Fails with [`Error::CapacityExceeded`]
    /// once [`max_registrations`](Self::max_registrations) objects are held.
    pub fn register(&mut self, object: &'a mut dyn SerializableObject) -> Result<()> {
        if self.objects.len() + REGISTRATION_HEADROOM < self.options.capacity {
            self.objects.push(object);
            diag!(
                self.options.diagnostics,
                debug,
                "Registered object #{}",
                self.objects.len() - 1
            );
            Ok(())
        } else {
            diag!(
                self.options.diagnostics,
                warn,
                "Registration refused: {} of {} slots used",
                self.objects.len(),
                self.max_registrations()
            );
            Err(Error::CapacityExceeded {
                capacity: self.options.capacity,
                limit: self.max_registrations(),
                registered: self.objects.len(),
            })
        }
    }

    /// Write every registered object's state to `path`, in registration order.
    ///
    /// The file is truncated first. Any failure aborts the save and is
    /// returned as-is; bytes already written stay on disk.
    pub fn save_all(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut agent = SerializationAgent::with_options(self.options.agent_options());
        agent.set_target(path)?;
        agent.prepare_write()?;

        for object in &self.objects {
            let record = object.export_state();
            agent.append_record(&record)?;
        }

        agent.finalize_write()?;
        diag!(
            self.options.diagnostics,
            info,
            "Saved {} objects to {}",
            self.objects.len(),
            path.display()
        );
        Ok(())
    }

    /// Restore every registered object from `path`, in registration order.
    ///
    /// Record `n` is imported into object `n`. Trailing bytes after the last
    /// consumed record are ignored. The load buffer is released before this
    /// returns on every path.
    pub fn load_all(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut agent = SerializationAgent::with_options(self.options.agent_options());
        agent.set_target(path)?;

        let result = self.import_all(&mut agent);
        agent.release_buffer();

        match &result {
            Ok(()) => diag!(
                self.options.diagnostics,
                info,
                "Loaded {} objects from {}",
                self.objects.len(),
                path.display()
            ),
            Err(e) => diag!(
                self.options.diagnostics,
                warn,
                "Load from {} aborted: {}",
                path.display(),
                e
            ),
        }
        result
    }

    fn import_all(&mut self, agent: &mut SerializationAgent) -> Result<()> {
        agent.load_all()?;
        for (index, object) in self.objects.iter_mut().enumerate() {
            let record = agent.next_record()?;
            object
                .import_state(record.payload())
                .map_err(|source| Error::Import {
                    index,
                    record_type: record.record_type(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Run every registered object's self-check, in registration order.
    ///
    /// Returns the first failure. Diagnostic only: neither save nor load
    /// calls this.
    pub fn check_all(&self) -> Result<()> {
        for (index, object) in self.objects.iter().enumerate() {
            object
                .self_check()
                .map_err(|source| Error::Check { index, source })?;
        }
        Ok(())
    }
}
