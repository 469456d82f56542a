//! Storage layer for Kharcha
//!
//! A [`Storage`] owns the persistence backend, the principal whose records
//! are currently loaded, and one [`Repository`] per record kind. Switching
//! principal reloads all three collections from scratch.

pub mod file_io;
pub mod kv;
pub mod records;

pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use records::{
    clear_collection, load_collection, save_collection, storage_key, EntityKind, Keyed, Record,
    Repository,
};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::KharchaPaths;
use crate::error::KharchaResult;
use crate::models::{Expense, MonthlyBudget, Principal, Trip};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    backend: Box<dyn KeyValueStore>,
    audit: Option<AuditLogger>,
    principal: Option<Principal>,
    version: u64,
    pub expenses: Repository<Expense>,
    pub trips: Repository<Trip>,
    pub budgets: Repository<MonthlyBudget>,
}

impl Storage {
    /// Create storage over an arbitrary backend with no principal loaded
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            audit: None,
            principal: None,
            version: 0,
            expenses: Repository::new(),
            trips: Repository::new(),
            budgets: Repository::new(),
        }
    }

    /// File-backed storage under the configured data directory, with auditing
    pub fn open(paths: &KharchaPaths) -> KharchaResult<Self> {
        paths.ensure_directories()?;
        let backend = JsonFileStore::new(paths.data_dir());
        Ok(Self::new(Box::new(backend)).with_audit(AuditLogger::new(paths.audit_log())))
    }

    /// Ephemeral storage, mostly for tests
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Counter bumped by every load and mutation
    ///
    /// Callers caching derived values compare this instead of the data.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn touch(&mut self) {
        self.version += 1;
    }

    /// Replace the working set with `principal`'s persisted records
    ///
    /// All three collections are read before any is swapped in, so a failed
    /// load leaves the previous working set untouched. `None` empties it.
    pub fn switch_principal(&mut self, principal: Option<Principal>) -> KharchaResult<()> {
        match principal {
            Some(principal) => {
                let expenses = load_collection::<Expense>(&*self.backend, &principal)?;
                let trips = load_collection::<Trip>(&*self.backend, &principal)?;
                let budgets = load_collection::<MonthlyBudget>(&*self.backend, &principal)?;

                info!(
                    principal = %principal,
                    expenses = expenses.len(),
                    trips = trips.len(),
                    budgets = budgets.len(),
                    "loaded records"
                );

                self.expenses.replace(expenses);
                self.trips.replace(trips);
                self.budgets.replace(budgets);
                self.principal = Some(principal);
            }
            None => {
                debug!("no principal; working set emptied");
                self.expenses.reset();
                self.trips.reset();
                self.budgets.reset();
                self.principal = None;
            }
        }

        self.touch();
        Ok(())
    }

    /// Write one kind's working collection back to the backend
    ///
    /// Without a principal there is nothing to write to.
    pub fn persist(&mut self, kind: EntityKind) -> KharchaResult<()> {
        let Some(principal) = self.principal.as_ref() else {
            return Ok(());
        };
        let backend = self.backend.as_mut();

        match kind {
            EntityKind::Expenses => self.expenses.save(backend, principal),
            EntityKind::Trips => self.trips.save(backend, principal),
            EntityKind::Budgets => self.budgets.save(backend, principal),
        }
    }

    /// Empty one kind's working collection and delete its persisted blob
    pub fn clear(&mut self, kind: EntityKind) -> KharchaResult<()> {
        let Some(principal) = self.principal.as_ref() else {
            return Ok(());
        };
        let backend = self.backend.as_mut();

        match kind {
            EntityKind::Expenses => self.expenses.clear(backend, principal),
            EntityKind::Trips => self.trips.clear(backend, principal),
            EntityKind::Budgets => self.budgets.clear(backend, principal),
        }
    }

    /// Append an audit entry for a mutation that has already been saved
    ///
    /// A failed write is logged and dropped; the saved mutation stands.
    fn write_audit(&self, build: impl FnOnce(&str) -> AuditEntry) {
        if let (Some(logger), Some(principal)) = (&self.audit, &self.principal) {
            let entry = build(principal.email());
            if let Err(e) = logger.log(&entry) {
                warn!(
                    error = %e,
                    entity_id = %entry.entity_id,
                    "failed to write audit entry"
                );
            }
        }
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.write_audit(|principal| {
            AuditEntry::create(entity_type, entity_id, principal, entity_name, entity)
        })
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.write_audit(|principal| {
            AuditEntry::update(entity_type, entity_id, principal, entity_name, before, after, diff)
        })
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.write_audit(|principal| {
            AuditEntry::delete(entity_type, entity_id, principal, entity_name, entity)
        })
    }
}
