//! Persistence boundary: per-user scoped stores for transactions and
//! budget entries, plus an in-memory implementation for tests.

pub mod json_backend;

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use crate::errors::{FinanceError, Result};
use crate::period::PeriodKind;
use crate::records::{BudgetEntry, EntryKind, Transaction};

pub use json_backend::JsonStorage;

/// Opaque per-user namespace key. Every store call takes the scope
/// explicitly instead of reading ambient session state, so callers derive
/// it once from their auth session and thread it through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserScope(String);

impl UserScope {
    /// Builds a scope from a non-empty id; a blank id is rejected the same
    /// way an absent session is.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(FinanceError::MissingScope);
        }
        Ok(Self(id))
    }

    /// Derives a scope from an optional session id. An absent session is a
    /// surfaced error, never a silently empty scope.
    pub fn from_session(session_id: Option<&str>) -> Result<Self> {
        match session_id {
            Some(id) => Self::new(id),
            None => Err(FinanceError::MissingScope),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Transaction persistence scoped by user.
pub trait TransactionStore: Send + Sync {
    fn list_transactions(&self, scope: &UserScope) -> Result<Vec<Transaction>>;
    /// Insert-or-replace by transaction id.
    fn upsert_transaction(&self, scope: &UserScope, txn: &Transaction) -> Result<()>;
    fn delete_transaction(&self, scope: &UserScope, id: Uuid) -> Result<()>;
}

/// Budget entry persistence scoped by user; keyed by the
/// `(category, kind, period, period_key)` tuple, last write wins.
pub trait BudgetStore: Send + Sync {
    fn list_budgets(&self, scope: &UserScope) -> Result<Vec<BudgetEntry>>;
    fn upsert_budget(&self, scope: &UserScope, entry: &BudgetEntry) -> Result<()>;
    fn remove_budget(
        &self,
        scope: &UserScope,
        category: &str,
        kind: EntryKind,
        period: PeriodKind,
        period_key: Option<&str>,
    ) -> Result<()>;
}

/// In-process store backing both traits, used by tests and previews.
#[derive(Default)]
pub struct MemoryStore {
    transactions: Mutex<HashMap<String, Vec<Transaction>>>,
    budgets: Mutex<HashMap<String, Vec<BudgetEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionStore for MemoryStore {
    fn list_transactions(&self, scope: &UserScope) -> Result<Vec<Transaction>> {
        let guard = self
            .transactions
            .lock()
            .map_err(|_| FinanceError::Storage("transaction store poisoned".into()))?;
        Ok(guard.get(scope.as_str()).cloned().unwrap_or_default())
    }

    fn upsert_transaction(&self, scope: &UserScope, txn: &Transaction) -> Result<()> {
        let mut guard = self
            .transactions
            .lock()
            .map_err(|_| FinanceError::Storage("transaction store poisoned".into()))?;
        let records = guard.entry(scope.as_str().to_string()).or_default();
        match records.iter_mut().find(|existing| existing.id == txn.id) {
            Some(existing) => *existing = txn.clone(),
            None => records.push(txn.clone()),
        }
        Ok(())
    }

    fn delete_transaction(&self, scope: &UserScope, id: Uuid) -> Result<()> {
        let mut guard = self
            .transactions
            .lock()
            .map_err(|_| FinanceError::Storage("transaction store poisoned".into()))?;
        let records = guard.entry(scope.as_str().to_string()).or_default();
        let before = records.len();
        records.retain(|txn| txn.id != id);
        if records.len() == before {
            return Err(FinanceError::TransactionNotFound(id));
        }
        Ok(())
    }
}

impl BudgetStore for MemoryStore {
    fn list_budgets(&self, scope: &UserScope) -> Result<Vec<BudgetEntry>> {
        let guard = self
            .budgets
            .lock()
            .map_err(|_| FinanceError::Storage("budget store poisoned".into()))?;
        Ok(guard.get(scope.as_str()).cloned().unwrap_or_default())
    }

    fn upsert_budget(&self, scope: &UserScope, entry: &BudgetEntry) -> Result<()> {
        let mut guard = self
            .budgets
            .lock()
            .map_err(|_| FinanceError::Storage("budget store poisoned".into()))?;
        let entries = guard.entry(scope.as_str().to_string()).or_default();
        crate::budget::BudgetResolver::upsert(entries, entry.clone());
        Ok(())
    }

    fn remove_budget(
        &self,
        scope: &UserScope,
        category: &str,
        kind: EntryKind,
        period: PeriodKind,
        period_key: Option<&str>,
    ) -> Result<()> {
        let mut guard = self
            .budgets
            .lock()
            .map_err(|_| FinanceError::Storage("budget store poisoned".into()))?;
        let entries = guard.entry(scope.as_str().to_string()).or_default();
        if !crate::budget::BudgetResolver::remove(entries, category, kind, period, period_key) {
            return Err(FinanceError::BudgetNotFound(category.to_string()));
        }
        Ok(())
    }
}
