pub mod budget;
pub mod transaction;

pub use budget::BudgetEntry;
pub use transaction::{EntryKind, Transaction};
