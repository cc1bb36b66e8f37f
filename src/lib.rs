#![doc(test(attr(deny(warnings))))]

//! Finance Core offers the transaction, aggregation, and budgeting
//! primitives that power personal finance tracking front ends: period
//! resolution, window filtering, category and daily aggregation, budget
//! lookup, and per-user persistence.

pub mod aggregate;
pub mod budget;
pub mod config;
pub mod errors;
pub mod filter;
pub mod period;
pub mod query;
pub mod records;
pub mod store;

use std::sync::Once;

pub use aggregate::{CategoryAggregator, CategoryTotal, DailyAggregator, MonthBreakdown};
pub use budget::BudgetResolver;
pub use errors::{FinanceError, Result};
pub use period::{resolve_window, DateWindow, PeriodKind};
pub use query::{AggregationQuery, ReportService};
pub use records::{BudgetEntry, EntryKind, Transaction};
pub use store::{BudgetStore, TransactionStore, UserScope};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
        tracing::info!("Finance Core tracing initialized.");
    });
}
