use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use shared::domain::{InternRecord, InternStatus, RegistrySummary};

/// In-memory, insertion-ordered list of interns shared by every page.
///
/// Cloning the handle shares the same list. Records are only ever appended.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    records: Arc<RwLock<Vec<InternRecord>>>,
}

/// Demo interns shown on a fresh process. They live in memory only and are
/// never written to the interns table.
pub fn seed_records() -> Vec<InternRecord> {
    vec![
        InternRecord::new("June", "june@interns.local", "Python")
            .with_status(InternStatus::Completed),
        InternRecord::new("Vismay", "vismay@interns.local", "A360"),
        InternRecord::new("Saahithi", "saahithi@interns.local", "Python")
            .with_status(InternStatus::Completed),
    ]
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded() -> Self {
        let registry = Self::new();
        registry.seed();
        registry
    }

    /// Appends the demo interns. Meant to run once at startup; a second call
    /// appends them again.
    pub fn seed(&self) {
        self.write().extend(seed_records());
    }

    /// Records a new in-progress intern. Registrations that must also reach
    /// the interns table go through `server_api::register_intern`, which
    /// persists the row before calling this.
    pub fn register(&self, name: &str, email: &str, department: &str) -> InternRecord {
        let record = InternRecord::new(name, email, department);
        self.insert(record.clone());
        record
    }

    pub fn insert(&self, record: InternRecord) {
        self.write().push(record);
    }

    pub fn summarize(&self) -> RegistrySummary {
        RegistrySummary::from_statuses(self.read().iter().map(|record| record.status))
    }

    /// Current records in registration order. Each call observes every
    /// registration that completed before it.
    pub fn list_all(&self) -> Vec<InternRecord> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Writers only push whole records, so a poisoned list is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, Vec<InternRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<InternRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }
}
