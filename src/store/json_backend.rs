//! JSON file persistence: one document per user scope and dataset under a
//! single data directory, written atomically via a temp file.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::errors::{FinanceError, Result};
use crate::period::PeriodKind;
use crate::records::{BudgetEntry, EntryKind, Transaction};

use super::{BudgetStore, TransactionStore, UserScope};

const TMP_SUFFIX: &str = "tmp";
const TRANSACTIONS_DATASET: &str = "transactions";
const BUDGETS_DATASET: &str = "budgets";

/// File-backed store keeping `{scope}_{dataset}.json` documents under a
/// root directory. The default root lives in the platform data dir; tests
/// pass an explicit root.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(path) => path,
            None => default_root()?,
        };
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn dataset_path(&self, scope: &UserScope, dataset: &str) -> PathBuf {
        self.root
            .join(format!("{}_{}.json", canonical_scope(scope), dataset))
    }

    fn read_dataset<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn write_dataset<T: Serialize>(&self, path: &Path, records: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        let tmp = tmp_path(path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, path)?;
        tracing::debug!(path = %path.display(), records = records.len(), "dataset saved");
        Ok(())
    }
}

impl TransactionStore for JsonStorage {
    fn list_transactions(&self, scope: &UserScope) -> Result<Vec<Transaction>> {
        self.read_dataset(&self.dataset_path(scope, TRANSACTIONS_DATASET))
    }

    fn upsert_transaction(&self, scope: &UserScope, txn: &Transaction) -> Result<()> {
        let path = self.dataset_path(scope, TRANSACTIONS_DATASET);
        let mut records: Vec<Transaction> = self.read_dataset(&path)?;
        match records.iter_mut().find(|existing| existing.id == txn.id) {
            Some(existing) => *existing = txn.clone(),
            None => records.push(txn.clone()),
        }
        self.write_dataset(&path, &records)
    }

    fn delete_transaction(&self, scope: &UserScope, id: Uuid) -> Result<()> {
        let path = self.dataset_path(scope, TRANSACTIONS_DATASET);
        let mut records: Vec<Transaction> = self.read_dataset(&path)?;
        let before = records.len();
        records.retain(|txn| txn.id != id);
        if records.len() == before {
            return Err(FinanceError::TransactionNotFound(id));
        }
        self.write_dataset(&path, &records)
    }
}

impl BudgetStore for JsonStorage {
    fn list_budgets(&self, scope: &UserScope) -> Result<Vec<BudgetEntry>> {
        self.read_dataset(&self.dataset_path(scope, BUDGETS_DATASET))
    }

    fn upsert_budget(&self, scope: &UserScope, entry: &BudgetEntry) -> Result<()> {
        let path = self.dataset_path(scope, BUDGETS_DATASET);
        let mut entries: Vec<BudgetEntry> = self.read_dataset(&path)?;
        crate::budget::BudgetResolver::upsert(&mut entries, entry.clone());
        self.write_dataset(&path, &entries)
    }

    fn remove_budget(
        &self,
        scope: &UserScope,
        category: &str,
        kind: EntryKind,
        period: PeriodKind,
        period_key: Option<&str>,
    ) -> Result<()> {
        let path = self.dataset_path(scope, BUDGETS_DATASET);
        let mut entries: Vec<BudgetEntry> = self.read_dataset(&path)?;
        if !crate::budget::BudgetResolver::remove(&mut entries, category, kind, period, period_key)
        {
            return Err(FinanceError::BudgetNotFound(category.to_string()));
        }
        self.write_dataset(&path, &entries)
    }
}

fn default_root() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("finance_core"))
        .ok_or_else(|| FinanceError::Storage("no platform data directory available".into()))
}

/// Scope ids are opaque and may differ only in case or punctuation, so the
/// readable sanitized prefix alone is not injective. A digest tag of the
/// raw id keeps distinct scopes on distinct files.
fn canonical_scope(scope: &UserScope) -> String {
    let sanitized: String = scope
        .as_str()
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    let digest = Sha256::digest(scope.as_str().as_bytes());
    let tag = hex::encode(&digest[..4]);
    if sanitized.trim_matches('_').is_empty() {
        format!("scope_{}", tag)
    } else {
        format!("{}_{}", sanitized, tag)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

pub(crate) fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_scope_keeps_a_readable_prefix() {
        let name = canonical_scope(&UserScope::new("User-42 ").unwrap());
        assert!(name.starts_with("user_42_"), "unexpected name: {name}");
        let fallback = canonical_scope(&UserScope::new("@@@").unwrap());
        assert!(fallback.starts_with("scope_"), "unexpected name: {fallback}");
    }

    #[test]
    fn canonical_scope_is_injective_over_lookalike_ids() {
        let a = canonical_scope(&UserScope::new("user-1").unwrap());
        let b = canonical_scope(&UserScope::new("user.1").unwrap());
        assert_ne!(a, b);
        let upper = canonical_scope(&UserScope::new("Alice").unwrap());
        let lower = canonical_scope(&UserScope::new("alice").unwrap());
        assert_ne!(upper, lower);
        // stable for the same id
        assert_eq!(a, canonical_scope(&UserScope::new("user-1").unwrap()));
    }

    #[test]
    fn tmp_path_appends_suffix() {
        let path = Path::new("/tmp/alice_transactions.json");
        assert_eq!(
            tmp_path(path),
            PathBuf::from("/tmp/alice_transactions.json.tmp")
        );
    }
}
