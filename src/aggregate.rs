//! Category and daily aggregation over filtered transaction snapshots.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::period::days_in_month;
use crate::records::{EntryKind, Transaction};

/// Per-category total with its share of the grand total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub percentage: f64,
}

/// Income and expense sums for a single day.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DayTotals {
    pub income: f64,
    pub expense: f64,
}

/// Month-level rollup of the daily sums.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthTotals {
    pub income: f64,
    pub expense: f64,
    pub total: f64,
}

/// Daily breakdown of one calendar month. Days without activity are absent
/// from `days`; callers default to zeroed [`DayTotals`] on a lookup miss.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthBreakdown {
    pub days: HashMap<u32, DayTotals>,
    pub totals: MonthTotals,
}

impl MonthBreakdown {
    pub fn day(&self, day: u32) -> DayTotals {
        self.days.get(&day).copied().unwrap_or_default()
    }
}

/// One slot of the 7-column calendar grid. Padding slots before the 1st
/// and after the last day carry `day: None` and zeroed sums.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarCell {
    pub day: Option<u32>,
    pub is_sunday: bool,
    pub is_today: bool,
    pub date: Option<NaiveDate>,
    pub income: f64,
    pub expense: f64,
}

impl CalendarCell {
    fn blank() -> Self {
        Self {
            day: None,
            is_sunday: false,
            is_today: false,
            date: None,
            income: 0.0,
            expense: 0.0,
        }
    }
}

/// Groups filtered transactions by category for the stats screen.
pub struct CategoryAggregator;

impl CategoryAggregator {
    /// Sums amounts per exact category string and orders the result by
    /// total descending; ties keep first-seen order. Percentages are taken
    /// against the grand total and are all zero when it is zero.
    pub fn totals(transactions: &[&Transaction]) -> Vec<CategoryTotal> {
        let mut sums: HashMap<&str, f64> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();

        for txn in transactions {
            let entry = sums.entry(txn.category.as_str()).or_insert_with(|| {
                order.push(txn.category.as_str());
                0.0
            });
            *entry += txn.parsed_amount();
        }

        let mut totals: Vec<CategoryTotal> = order
            .into_iter()
            .map(|category| CategoryTotal {
                category: category.to_string(),
                total: sums[category],
                percentage: 0.0,
            })
            .collect();
        // sort_by is stable, so equal totals retain first-seen order
        totals.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal));

        let grand_total: f64 = totals.iter().map(|entry| entry.total).sum();
        if grand_total != 0.0 {
            for entry in &mut totals {
                entry.percentage = entry.total / grand_total * 100.0;
            }
        }
        totals
    }

    pub fn grand_total(totals: &[CategoryTotal]) -> f64 {
        totals.iter().map(|entry| entry.total).sum()
    }
}

/// Groups a month's transactions by day for the calendar screen.
pub struct DailyAggregator;

impl DailyAggregator {
    /// Restricts to transactions dated in `(year, month)` and accumulates
    /// income and expense per day of month. Income records feed `income`;
    /// everything else, transfers included, feeds `expense`.
    pub fn month_breakdown(
        transactions: &[Transaction],
        year: i32,
        month: u32,
    ) -> MonthBreakdown {
        let mut days: HashMap<u32, DayTotals> = HashMap::new();

        for txn in transactions {
            let date = txn.date.date();
            if date.year() != year || date.month() != month {
                continue;
            }
            let entry = days.entry(date.day()).or_default();
            if txn.kind == EntryKind::Income {
                entry.income += txn.parsed_amount();
            } else {
                entry.expense += txn.parsed_amount();
            }
        }

        let income: f64 = days.values().map(|d| d.income).sum();
        let expense: f64 = days.values().map(|d| d.expense).sum();
        MonthBreakdown {
            days,
            totals: MonthTotals {
                income,
                expense,
                total: income - expense,
            },
        }
    }
}

/// Lays a month's breakdown out as a Sunday-first 7-column grid, padded
/// with blank cells to a whole number of weeks.
pub fn calendar_grid(
    breakdown: &MonthBreakdown,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Vec<CalendarCell> {
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date,
        None => return Vec::new(),
    };
    let leading = first.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<CalendarCell> = (0..leading).map(|_| CalendarCell::blank()).collect();

    for day in 1..=days_in_month(year, month) {
        let date = match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => date,
            None => continue,
        };
        let totals = breakdown.day(day);
        cells.push(CalendarCell {
            day: Some(day),
            is_sunday: date.weekday() == Weekday::Sun,
            is_today: date == today,
            date: Some(date),
            income: totals.income,
            expense: totals.expense,
        });
    }

    while cells.len() % 7 != 0 {
        cells.push(CalendarCell::blank());
    }
    cells
}
