use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single income, expense, or transfer record.
///
/// `amount` is kept as the text captured by the entry form; it is parsed
/// lazily during aggregation so that a malformed value degrades to a zero
/// contribution instead of poisoning the whole record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: EntryKind,
    pub date: NaiveDateTime,
    pub amount: String,
    pub category: String,
    pub account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub currency: String,
}

impl Transaction {
    pub fn new(
        kind: EntryKind,
        date: NaiveDateTime,
        amount: impl Into<String>,
        category: impl Into<String>,
        account: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            date,
            amount: amount.into(),
            category: category.into(),
            account: account.into(),
            description: None,
            currency: currency.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parses the stored amount, treating malformed text as zero.
    pub fn parsed_amount(&self) -> f64 {
        self.amount.trim().parse::<f64>().unwrap_or(0.0)
    }
}

/// The tab a record was entered under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Income,
    Expense,
    Transfer,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
            EntryKind::Transfer => "Transfer",
        }
    }

    /// Loose tab-label match used by the budget screens: case-insensitive
    /// with a single trailing `s` stripped ("Expenses" matches Expense).
    ///
    /// The stats screen matches the stored enum value exactly instead; the
    /// two conventions are kept separate on purpose.
    pub fn matches_label(&self, label: &str) -> bool {
        let normalized = label.trim().to_ascii_lowercase();
        let normalized = normalized.strip_suffix('s').unwrap_or(&normalized);
        normalized == self.label().to_ascii_lowercase()
    }
}
