//! The working session
//!
//! A [`Session`] is what front ends talk to. It owns the [`Storage`] plus the
//! expense and trip selections, and every mutation goes through it so that
//! persistence, selection pruning, the version counter and the audit log
//! move together.
//!
//! Without a principal, reads see empty collections and every mutator is a
//! no-op returning `false` (or `0`).

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::audit::EntityType;
use crate::config::paths::KharchaPaths;
use crate::error::KharchaResult;
use crate::models::{
    Expense, ExpenseId, ExpenseUpdate, Money, MonthlyBudget, Principal, Trip, TripId, TripUpdate,
};
use crate::services::budget::{self, BudgetStatus};
use crate::services::{ExpenseFilter, Selection, TripFilter};
use crate::storage::{EntityKind, Storage};

pub struct Session {
    storage: Storage,
    expense_selection: Selection<ExpenseId>,
    trip_selection: Selection<TripId>,
}

impl Session {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            expense_selection: Selection::new(),
            trip_selection: Selection::new(),
        }
    }

    /// Open file-backed storage and load `principal`'s records
    pub fn open(paths: &KharchaPaths, principal: Option<Principal>) -> KharchaResult<Self> {
        let mut session = Self::new(Storage::open(paths)?);
        session.switch_principal(principal)?;
        Ok(session)
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.storage.principal()
    }

    pub fn version(&self) -> u64 {
        self.storage.version()
    }

    /// Swap the whole working set for another principal's
    pub fn switch_principal(&mut self, principal: Option<Principal>) -> KharchaResult<()> {
        self.storage.switch_principal(principal)?;
        self.expense_selection.clear();
        self.trip_selection.clear();
        Ok(())
    }

    // === Expenses ===

    pub fn expenses(&self) -> &[Expense] {
        self.storage.expenses.all()
    }

    pub fn expense(&self, id: &ExpenseId) -> Option<&Expense> {
        self.storage.expenses.get(id)
    }

    pub fn filtered_expenses(&self, filter: &ExpenseFilter) -> Vec<Expense> {
        filter.apply(self.expenses())
    }

    fn commit_expenses(&mut self, previous: Vec<Expense>) -> KharchaResult<()> {
        if let Err(e) = self.storage.persist(EntityKind::Expenses) {
            warn!(error = %e, "failed to persist expenses; reverting");
            self.storage.expenses.replace(previous);
            return Err(e);
        }
        let present = self.storage.expenses.ids();
        self.expense_selection.retain_present(&present);
        self.storage.touch();
        Ok(())
    }

    /// Append a fully-formed expense
    pub fn add_expense(&mut self, expense: Expense) -> KharchaResult<bool> {
        if self.principal().is_none() {
            return Ok(false);
        }
        if self.storage.expenses.contains(&expense.id) {
            warn!(id = %expense.id, "appending expense with an id that already exists");
        }

        let previous = self.expenses().to_vec();
        self.storage.expenses.push(expense.clone());
        self.commit_expenses(previous)?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        );
        debug!(id = %expense.id, "expense added");
        Ok(true)
    }

    /// Merge `update` into the expense with `id`; unknown ids are ignored
    pub fn update_expense(&mut self, id: &ExpenseId, update: &ExpenseUpdate) -> KharchaResult<bool> {
        if self.principal().is_none() {
            return Ok(false);
        }

        let previous = self.expenses().to_vec();
        let Some(expense) = self.storage.expenses.get_mut(id) else {
            return Ok(false);
        };
        let before = expense.clone();
        update.apply_to(expense);
        let after = expense.clone();

        self.commit_expenses(previous)?;
        self.storage.log_update(
            EntityType::Expense,
            id.to_string(),
            Some(after.description.clone()),
            &before,
            &after,
        );
        Ok(true)
    }

    pub fn delete_expense(&mut self, id: &ExpenseId) -> KharchaResult<bool> {
        let ids: HashSet<ExpenseId> = std::iter::once(id.clone()).collect();
        Ok(self.delete_expenses(&ids)? > 0)
    }

    /// Remove every expense whose id is in `ids`; returns how many went
    pub fn delete_expenses(&mut self, ids: &HashSet<ExpenseId>) -> KharchaResult<usize> {
        if self.principal().is_none() || ids.is_empty() {
            return Ok(0);
        }

        let previous = self.expenses().to_vec();
        let removed = self.storage.expenses.remove_many(ids);
        if removed.is_empty() {
            return Ok(0);
        }

        self.commit_expenses(previous)?;
        self.expense_selection.prune(ids.iter());

        for expense in &removed {
            self.storage.log_delete(
                EntityType::Expense,
                expense.id.to_string(),
                Some(expense.description.clone()),
                expense,
            );
        }
        debug!(count = removed.len(), "expenses deleted");
        Ok(removed.len())
    }

    pub fn delete_selected_expenses(&mut self) -> KharchaResult<usize> {
        let ids = self.expense_selection.ids().clone();
        self.delete_expenses(&ids)
    }

    /// Empty the collection and remove its persisted blob
    pub fn clear_expenses(&mut self) -> KharchaResult<bool> {
        if self.principal().is_none() {
            return Ok(false);
        }

        let removed = self.expenses().to_vec();
        self.storage.clear(EntityKind::Expenses)?;
        self.expense_selection.clear();
        self.storage.touch();

        for expense in &removed {
            self.storage.log_delete(
                EntityType::Expense,
                expense.id.to_string(),
                Some(expense.description.clone()),
                expense,
            );
        }
        Ok(true)
    }

    pub fn expense_selection(&self) -> &Selection<ExpenseId> {
        &self.expense_selection
    }

    /// Flip selection of an expense; ids not in the collection are ignored
    pub fn toggle_expense(&mut self, id: &ExpenseId) -> bool {
        if !self.storage.expenses.contains(id) {
            return false;
        }
        self.expense_selection.toggle(id.clone())
    }

    /// Select exactly the expenses of `filtered`, or clear if already selected
    pub fn select_all_expenses(&mut self, filtered: &[Expense]) {
        self.expense_selection
            .select_all(filtered.iter().map(|e| e.id.clone()));
        let present = self.storage.expenses.ids();
        self.expense_selection.retain_present(&present);
    }

    // === Trips ===

    pub fn trips(&self) -> &[Trip] {
        self.storage.trips.all()
    }

    pub fn trip(&self, id: &TripId) -> Option<&Trip> {
        self.storage.trips.get(id)
    }

    pub fn filtered_trips(&self, filter: &TripFilter) -> Vec<Trip> {
        filter.apply(self.trips())
    }

    fn commit_trips(&mut self, previous: Vec<Trip>) -> KharchaResult<()> {
        if let Err(e) = self.storage.persist(EntityKind::Trips) {
            warn!(error = %e, "failed to persist trips; reverting");
            self.storage.trips.replace(previous);
            return Err(e);
        }
        let present = self.storage.trips.ids();
        self.trip_selection.retain_present(&present);
        self.storage.touch();
        Ok(())
    }

    pub fn add_trip(&mut self, trip: Trip) -> KharchaResult<bool> {
        if self.principal().is_none() {
            return Ok(false);
        }

        let previous = self.trips().to_vec();
        self.storage.trips.push(trip.clone());
        self.commit_trips(previous)?;

        self.storage.log_create(
            EntityType::Trip,
            trip.id.to_string(),
            Some(trip.destination.clone()),
            &trip,
        );
        Ok(true)
    }

    pub fn update_trip(&mut self, id: &TripId, update: &TripUpdate) -> KharchaResult<bool> {
        if self.principal().is_none() {
            return Ok(false);
        }

        let previous = self.trips().to_vec();
        let Some(trip) = self.storage.trips.get_mut(id) else {
            return Ok(false);
        };
        let before = trip.clone();
        update.apply_to(trip);
        let after = trip.clone();

        self.commit_trips(previous)?;
        self.storage.log_update(
            EntityType::Trip,
            id.to_string(),
            Some(after.destination.clone()),
            &before,
            &after,
        );
        Ok(true)
    }

    pub fn delete_trip(&mut self, id: &TripId) -> KharchaResult<bool> {
        let ids: HashSet<TripId> = std::iter::once(id.clone()).collect();
        Ok(self.delete_trips(&ids)? > 0)
    }

    pub fn delete_trips(&mut self, ids: &HashSet<TripId>) -> KharchaResult<usize> {
        if self.principal().is_none() || ids.is_empty() {
            return Ok(0);
        }

        let previous = self.trips().to_vec();
        let removed = self.storage.trips.remove_many(ids);
        if removed.is_empty() {
            return Ok(0);
        }

        self.commit_trips(previous)?;
        self.trip_selection.prune(ids.iter());

        for trip in &removed {
            self.storage.log_delete(
                EntityType::Trip,
                trip.id.to_string(),
                Some(trip.destination.clone()),
                trip,
            );
        }
        Ok(removed.len())
    }

    pub fn delete_selected_trips(&mut self) -> KharchaResult<usize> {
        let ids = self.trip_selection.ids().clone();
        self.delete_trips(&ids)
    }

    pub fn trip_selection(&self) -> &Selection<TripId> {
        &self.trip_selection
    }

    pub fn toggle_trip(&mut self, id: &TripId) -> bool {
        if !self.storage.trips.contains(id) {
            return false;
        }
        self.trip_selection.toggle(id.clone())
    }

    pub fn select_all_trips(&mut self, filtered: &[Trip]) {
        self.trip_selection
            .select_all(filtered.iter().map(|t| t.id.clone()));
        let present = self.storage.trips.ids();
        self.trip_selection.retain_present(&present);
    }

    // === Budgets ===

    pub fn budgets(&self) -> &[MonthlyBudget] {
        self.storage.budgets.all()
    }

    /// Set the budget for (year, month), overwriting any existing one
    pub fn set_budget(&mut self, year: i32, month: u32, amount: Money) -> KharchaResult<bool> {
        if self.principal().is_none() {
            return Ok(false);
        }

        let previous = self.budgets().to_vec();
        let replaced = budget::set_budget(self.storage.budgets.records_mut(), year, month, amount);

        if let Err(e) = self.storage.persist(EntityKind::Budgets) {
            warn!(error = %e, "failed to persist budgets; reverting");
            self.storage.budgets.replace(previous);
            return Err(e);
        }
        self.storage.touch();

        let record = MonthlyBudget::new(year, month, amount);
        let key = format!("{:04}-{:02}", year, month);
        match replaced {
            Some(old_amount) => self.storage.log_update(
                EntityType::MonthlyBudget,
                key.clone(),
                Some(key),
                &MonthlyBudget::new(year, month, old_amount),
                &record,
            ),
            None => self.storage.log_create(
                EntityType::MonthlyBudget,
                key.clone(),
                Some(key),
                &record,
            ),
        }
        Ok(true)
    }

    pub fn budget_for(&self, year: i32, month: u32) -> Option<Money> {
        budget::budget_for(self.budgets(), year, month)
    }

    pub fn current_month_budget(&self, today: NaiveDate) -> Option<Money> {
        budget::current_month_budget(self.budgets(), today)
    }

    pub fn budget_status(&self, year: i32, month: u32) -> BudgetStatus {
        BudgetStatus::compute(self.budgets(), self.expenses(), year, month)
    }
}
