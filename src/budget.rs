//! Effective-budget lookup over the flat budget entry list.

use crate::period::PeriodKind;
use crate::records::{BudgetEntry, EntryKind};

/// Stateless budget lookup utilities operating over entry snapshots.
///
/// Reconciling spent amounts against the effective budget is left to the
/// consuming screen; this resolver only answers "what is the budget figure
/// for this tuple".
pub struct BudgetResolver;

impl BudgetResolver {
    /// Resolves the effective budget for a category. A period-specific
    /// override (exact tuple including `period_key`) wins over the
    /// category's default entry for that granularity; with neither present
    /// the effective budget is zero.
    pub fn effective_budget(
        entries: &[BudgetEntry],
        category: &str,
        kind: EntryKind,
        period: PeriodKind,
        period_key: Option<&str>,
    ) -> f64 {
        if period_key.is_some() {
            if let Some(entry) = entries
                .iter()
                .find(|e| e.matches_tuple(category, kind, period, period_key))
            {
                return entry.amount;
            }
        }
        entries
            .iter()
            .find(|e| e.matches_tuple(category, kind, period, None))
            .map(|e| e.amount)
            .unwrap_or(0.0)
    }

    /// Replaces the entry with the same tuple identity, or appends.
    /// Last write wins.
    pub fn upsert(entries: &mut Vec<BudgetEntry>, entry: BudgetEntry) {
        match entries.iter_mut().find(|existing| {
            existing.matches_tuple(
                &entry.category,
                entry.kind,
                entry.period,
                entry.period_key.as_deref(),
            )
        }) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
    }

    /// Removes the entry with the exact tuple identity. Returns whether an
    /// entry was removed.
    pub fn remove(
        entries: &mut Vec<BudgetEntry>,
        category: &str,
        kind: EntryKind,
        period: PeriodKind,
        period_key: Option<&str>,
    ) -> bool {
        let before = entries.len();
        entries.retain(|entry| !entry.matches_tuple(category, kind, period, period_key));
        entries.len() != before
    }

    /// Categories that carry at least one entry for the given kind and
    /// period granularity, in first-seen order.
    pub fn budgeted_categories(
        entries: &[BudgetEntry],
        kind: EntryKind,
        period: PeriodKind,
    ) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for entry in entries {
            if entry.kind == kind
                && entry.period == period
                && !categories.iter().any(|c| c == &entry.category)
            {
                categories.push(entry.category.clone());
            }
        }
        categories
    }
}
