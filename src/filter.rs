//! Window filtering over transaction snapshots.
//!
//! Two matching conventions coexist: the stats and calendar screens match
//! the stored [`EntryKind`] exactly, while the budget screens match a tab
//! label case-insensitively with a trailing `s` stripped. They are kept as
//! separate functions rather than unified behind one rule.

use crate::period::DateWindow;
use crate::records::{EntryKind, Transaction};

/// Exact-kind filter: a transaction is kept iff its date falls inside the
/// window (inclusive both ends) and its kind equals `kind`.
pub fn transactions_in_window<'a>(
    transactions: &'a [Transaction],
    window: &DateWindow,
    kind: EntryKind,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|txn| txn.kind == kind && window.contains(txn.date))
        .collect()
}

/// Loose-label filter used by the budget screens; see
/// [`EntryKind::matches_label`] for the normalization rule.
pub fn transactions_in_window_loose<'a>(
    transactions: &'a [Transaction],
    window: &DateWindow,
    tab_label: &str,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|txn| txn.kind.matches_label(tab_label) && window.contains(txn.date))
        .collect()
}
