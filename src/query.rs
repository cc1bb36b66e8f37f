//! Explicit query objects and the screen-facing report service.
//!
//! Screens hold an [`AggregationQuery`] value and re-invoke the service
//! whenever an input changes; every pass is a pure, synchronous
//! filter-and-reduce over a snapshot of the stores.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::aggregate::{CategoryAggregator, CategoryTotal, DailyAggregator, MonthBreakdown};
use crate::budget::BudgetResolver;
use crate::filter::{transactions_in_window, transactions_in_window_loose};
use crate::period::{resolve_window, step, DateWindow, PeriodKind};
use crate::records::{BudgetEntry, EntryKind, Transaction};

/// The complete input of one aggregation pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregationQuery {
    pub kind: PeriodKind,
    pub reference: NaiveDate,
    /// Only consulted when `kind` is [`PeriodKind::Custom`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<(NaiveDate, NaiveDate)>,
    pub entry_kind: EntryKind,
}

impl AggregationQuery {
    pub fn new(kind: PeriodKind, reference: NaiveDate, entry_kind: EntryKind) -> Self {
        Self {
            kind,
            reference,
            range: None,
            entry_kind,
        }
    }

    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.range = Some((start, end));
        self
    }

    /// Resolves the concrete window; `None` for an unset custom range.
    pub fn window(&self) -> Option<DateWindow> {
        resolve_window(self.reference, self.kind, self.range)
    }

    /// Moves the reference forward or back by whole periods. Custom
    /// queries do not navigate.
    pub fn stepped(&self, steps: i32) -> Self {
        Self {
            reference: step(self.reference, self.kind, steps),
            ..self.clone()
        }
    }
}

/// Ordered category totals for one query, as shown on the stats screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryReport {
    pub window: Option<DateWindow>,
    pub categories: Vec<CategoryTotal>,
    pub grand_total: f64,
}

/// One row of the budget list screen: a budgeted category, its effective
/// budget for the selected period, and what was recorded inside the
/// resolved window. How the two are reconciled (remaining, percent spent)
/// is up to the consumer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetLine {
    pub category: String,
    pub budget: f64,
    pub spent: f64,
}

/// Stateless aggregation entry points shared by the stats, calendar, and
/// budget screens.
pub struct ReportService;

impl ReportService {
    /// Stats screen: filter by exact kind, group by category.
    pub fn category_report(
        transactions: &[Transaction],
        query: &AggregationQuery,
    ) -> CategoryReport {
        let window = query.window();
        let categories = match &window {
            Some(window) => {
                let filtered = transactions_in_window(transactions, window, query.entry_kind);
                CategoryAggregator::totals(&filtered)
            }
            None => Vec::new(),
        };
        let grand_total = CategoryAggregator::grand_total(&categories);
        CategoryReport {
            window,
            categories,
            grand_total,
        }
    }

    /// Calendar screen: daily breakdown of the month containing the date.
    pub fn month_report(transactions: &[Transaction], reference: NaiveDate) -> MonthBreakdown {
        DailyAggregator::month_breakdown(transactions, reference.year(), reference.month())
    }

    /// Budget list screen: one line per budgeted category of the selected
    /// tab and period. Spending is matched loosely against the tab label,
    /// unlike the stats screen's exact match. `tab_label` defaults to the
    /// query's entry kind; passing one only makes sense when it names the
    /// same kind in a different spelling ("Expenses" for Expense).
    pub fn budget_overview(
        transactions: &[Transaction],
        budgets: &[BudgetEntry],
        query: &AggregationQuery,
        period_key: Option<&str>,
        tab_label: Option<&str>,
    ) -> Vec<BudgetLine> {
        let label = tab_label.unwrap_or_else(|| query.entry_kind.label());
        let window = query.window();
        let filtered = match &window {
            Some(window) => transactions_in_window_loose(transactions, window, label),
            None => Vec::new(),
        };
        BudgetResolver::budgeted_categories(budgets, query.entry_kind, query.kind)
            .into_iter()
            .map(|category| {
                let budget = BudgetResolver::effective_budget(
                    budgets,
                    &category,
                    query.entry_kind,
                    query.kind,
                    period_key,
                );
                let spent = filtered
                    .iter()
                    .filter(|txn| txn.category == category)
                    .map(|txn| txn.parsed_amount())
                    .sum();
                BudgetLine {
                    category,
                    budget,
                    spent,
                }
            })
            .collect()
    }
}
