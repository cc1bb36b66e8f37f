use serde::{Deserialize, Serialize};

use crate::period::PeriodKind;
use crate::records::EntryKind;

/// A spending guardrail for a category at a given period granularity.
///
/// At most one entry exists per `(category, kind, period, period_key)`
/// tuple. An entry without a `period_key` is the category's default for
/// that granularity; an entry carrying one overrides the default for that
/// specific sub-period instance (e.g. "Jan-2025").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetEntry {
    pub category: String,
    pub kind: EntryKind,
    pub period: PeriodKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_key: Option<String>,
    pub amount: f64,
}

impl BudgetEntry {
    pub fn new(
        category: impl Into<String>,
        kind: EntryKind,
        period: PeriodKind,
        amount: f64,
    ) -> Self {
        Self {
            category: category.into(),
            kind,
            period,
            period_key: None,
            amount,
        }
    }

    pub fn with_period_key(mut self, period_key: impl Into<String>) -> Self {
        self.period_key = Some(period_key.into());
        self
    }

    /// Exact tuple-identity test used by upsert, remove, and lookup.
    pub fn matches_tuple(
        &self,
        category: &str,
        kind: EntryKind,
        period: PeriodKind,
        period_key: Option<&str>,
    ) -> bool {
        self.category == category
            && self.kind == kind
            && self.period == period
            && self.period_key.as_deref() == period_key
    }
}
