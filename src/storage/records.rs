//! Per-principal record collections
//!
//! Every entity kind is persisted as a single JSON array under the key
//! `{kind}_{email}`. Loading a key that was never written yields an empty
//! collection; saving replaces the whole snapshot.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{KharchaError, KharchaResult};
use crate::models::{Expense, ExpenseId, MonthlyBudget, Principal, Trip, TripId};

use super::kv::KeyValueStore;

/// The persisted entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Expenses,
    Trips,
    Budgets,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expenses => "expenses",
            Self::Trips => "trips",
            Self::Budgets => "budgets",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage key for one kind of record owned by `principal`
pub fn storage_key(kind: EntityKind, principal: &Principal) -> String {
    format!("{}_{}", kind.as_str(), principal.email())
}

/// A record type that can be persisted per principal
pub trait Record: Serialize + DeserializeOwned + Clone {
    const KIND: EntityKind;
}

/// A record addressable by id
pub trait Keyed {
    type Id: Clone + Eq + Hash + fmt::Display;

    fn id(&self) -> &Self::Id;
}

impl Record for Expense {
    const KIND: EntityKind = EntityKind::Expenses;
}

impl Keyed for Expense {
    type Id = ExpenseId;

    fn id(&self) -> &ExpenseId {
        &self.id
    }
}

impl Record for Trip {
    const KIND: EntityKind = EntityKind::Trips;
}

impl Keyed for Trip {
    type Id = TripId;

    fn id(&self) -> &TripId {
        &self.id
    }
}

impl Record for MonthlyBudget {
    const KIND: EntityKind = EntityKind::Budgets;
}

/// Load the persisted collection of `T` for `principal`
///
/// A missing blob is an empty collection. A blob that doesn't parse is an
/// error rather than silently becoming empty.
pub fn load_collection<T: Record>(
    backend: &dyn KeyValueStore,
    principal: &Principal,
) -> KharchaResult<Vec<T>> {
    let key = storage_key(T::KIND, principal);

    match backend.read(&key)? {
        None => Ok(Vec::new()),
        Some(blob) if blob.trim().is_empty() => Ok(Vec::new()),
        Some(blob) => serde_json::from_str(&blob).map_err(|e| {
            KharchaError::Storage(format!("Failed to parse stored {}: {}", key, e))
        }),
    }
}

/// Replace the persisted collection of `T` for `principal`
pub fn save_collection<T: Record>(
    backend: &mut dyn KeyValueStore,
    principal: &Principal,
    records: &[T],
) -> KharchaResult<()> {
    let key = storage_key(T::KIND, principal);
    let blob = serde_json::to_string_pretty(records)
        .map_err(|e| KharchaError::Json(format!("Failed to serialize {}: {}", key, e)))?;
    backend.write(&key, &blob)
}

/// Remove the persisted collection of `T` for `principal`
pub fn clear_collection<T: Record>(
    backend: &mut dyn KeyValueStore,
    principal: &Principal,
) -> KharchaResult<()> {
    backend.delete(&storage_key(T::KIND, principal))
}

/// In-memory working collection of one record kind
#[derive(Debug, Clone)]
pub struct Repository<T: Record> {
    records: Vec<T>,
}

impl<T: Record> Default for Repository<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> Repository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the working collection, in insertion order
    pub fn all(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Persist the working collection for `principal`
    pub fn save(
        &self,
        backend: &mut dyn KeyValueStore,
        principal: &Principal,
    ) -> KharchaResult<()> {
        save_collection(backend, principal, &self.records)?;
        debug!(
            kind = %T::KIND,
            principal = %principal,
            count = self.records.len(),
            "saved collection"
        );
        Ok(())
    }

    /// Empty the working collection and remove the persisted blob
    pub fn clear(
        &mut self,
        backend: &mut dyn KeyValueStore,
        principal: &Principal,
    ) -> KharchaResult<()> {
        clear_collection::<T>(backend, principal)?;
        self.records.clear();
        Ok(())
    }

    /// Swap in a collection loaded elsewhere
    pub fn replace(&mut self, records: Vec<T>) {
        self.records = records;
    }

    /// Drop the working collection without touching persistence
    pub fn reset(&mut self) {
        self.records.clear();
    }

    pub fn push(&mut self, record: T) {
        self.records.push(record);
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<T> {
        &mut self.records
    }
}

impl<T: Record + Keyed> Repository<T> {
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn get_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.get(id).is_some()
    }

    /// Ids of every record in the working collection
    pub fn ids(&self) -> HashSet<T::Id> {
        self.records.iter().map(|r| r.id().clone()).collect()
    }

    /// Remove the record with `id`, returning it if present
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let index = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(index))
    }

    /// Remove every record whose id is in `ids`, returning the removed ones
    pub fn remove_many(&mut self, ids: &HashSet<T::Id>) -> Vec<T> {
        let (removed, kept): (Vec<T>, Vec<T>) = std::mem::take(&mut self.records)
            .into_iter()
            .partition(|r| ids.contains(r.id()));
        self.records = kept;
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};
    use crate::storage::kv::MemoryStore;
    use chrono::NaiveDate;

    fn principal(email: &str) -> Principal {
        Principal::parse(email).unwrap()
    }

    fn expense(id: &str, amount: i64) -> Expense {
        Expense::with_id(
            id,
            "Lunch",
            Category::Food,
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            Money::from_cents(amount),
        )
    }

    #[test]
    fn test_storage_key() {
        let p = principal("ravi@example.com");
        assert_eq!(storage_key(EntityKind::Expenses, &p), "expenses_ravi@example.com");
        assert_eq!(storage_key(EntityKind::Trips, &p), "trips_ravi@example.com");
        assert_eq!(storage_key(EntityKind::Budgets, &p), "budgets_ravi@example.com");
    }

    #[test]
    fn test_load_missing_is_empty() {
        let backend = MemoryStore::new();
        let loaded: Vec<Expense> = load_collection(&backend, &principal("a@b.com")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let mut backend = MemoryStore::new();
        let p = principal("a@b.com");
        let records = vec![expense("e1", 100), expense("e2", 250)];

        save_collection(&mut backend, &p, &records).unwrap();
        let loaded: Vec<Expense> = load_collection(&backend, &p).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_corrupt_blob_is_error() {
        let mut backend = MemoryStore::new();
        let p = principal("a@b.com");
        backend.write("expenses_a@b.com", "{not json").unwrap();

        let result: KharchaResult<Vec<Expense>> = load_collection(&backend, &p);
        assert!(matches!(result, Err(KharchaError::Storage(_))));
    }

    #[test]
    fn test_clear_removes_blob() {
        let mut backend = MemoryStore::new();
        let p = principal("a@b.com");
        let mut repo: Repository<Expense> = Repository::new();
        repo.push(expense("e1", 100));
        repo.save(&mut backend, &p).unwrap();
        assert!(backend.contains("expenses_a@b.com"));

        repo.clear(&mut backend, &p).unwrap();
        assert!(repo.is_empty());
        assert!(!backend.contains("expenses_a@b.com"));
    }

    #[test]
    fn test_principals_are_isolated() {
        let mut backend = MemoryStore::new();
        let alice = principal("alice@example.com");
        let bob = principal("bob@example.com");

        save_collection(&mut backend, &alice, &[expense("e1", 100)]).unwrap();

        let mut repo: Repository<Expense> = Repository::new();
        repo.replace(load_collection(&backend, &bob).unwrap());
        assert!(repo.is_empty());

        repo.replace(load_collection(&backend, &alice).unwrap());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_remove_and_remove_many() {
        let mut repo: Repository<Expense> = Repository::new();
        for (id, amount) in [("e1", 100), ("e2", 200), ("e3", 300), ("e4", 400)] {
            repo.push(expense(id, amount));
        }

        assert_eq!(repo.remove(&ExpenseId::from("e2")).unwrap().amount.cents(), 200);
        assert!(repo.remove(&ExpenseId::from("missing")).is_none());

        let ids: HashSet<ExpenseId> = ["e1", "e4", "nope"].into_iter().map(ExpenseId::from).collect();
        let removed = repo.remove_many(&ids);
        assert_eq!(removed.len(), 2);

        let remaining: Vec<&str> = repo.all().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(remaining, vec!["e3"]);
    }
}
