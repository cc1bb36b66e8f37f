//! Period resolution: mapping a reference date and a granularity onto a
//! concrete reporting window, plus next/previous navigation.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Granularity of a reporting window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PeriodKind {
    Daily,
    Weekly,
    Monthly,
    Annually,
    /// Caller-supplied explicit date range.
    #[serde(rename = "Period")]
    Custom,
}

impl PeriodKind {
    pub fn label(&self) -> &'static str {
        match self {
            PeriodKind::Daily => "Daily",
            PeriodKind::Weekly => "Weekly",
            PeriodKind::Monthly => "Monthly",
            PeriodKind::Annually => "Annually",
            PeriodKind::Custom => "Period",
        }
    }
}

/// An inclusive reporting window with day-normalized bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateWindow {
    /// Builds a window spanning whole days, swapping a reversed pair.
    /// `start` lands on 00:00:00.000 and `end` on 23:59:59.999.
    pub fn from_days(start: NaiveDate, end: NaiveDate) -> Self {
        let (start, end) = if start > end { (end, start) } else { (start, end) };
        Self {
            start: day_start(start),
            end: day_end(end),
        }
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// Resolves the window containing `reference` for the given granularity.
///
/// `range` is only consulted for [`PeriodKind::Custom`]; a custom kind
/// without a range resolves to `None`, which downstream filters treat as
/// an empty match rather than an error.
pub fn resolve_window(
    reference: NaiveDate,
    kind: PeriodKind,
    range: Option<(NaiveDate, NaiveDate)>,
) -> Option<DateWindow> {
    match kind {
        PeriodKind::Daily => Some(DateWindow::from_days(reference, reference)),
        PeriodKind::Weekly => {
            let monday =
                reference - Duration::days(reference.weekday().num_days_from_monday() as i64);
            Some(DateWindow::from_days(monday, monday + Duration::days(6)))
        }
        PeriodKind::Monthly => {
            let year = reference.year();
            let month = reference.month();
            let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(reference);
            let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
                .unwrap_or(reference);
            Some(DateWindow::from_days(first, last))
        }
        PeriodKind::Annually => {
            let year = reference.year();
            let first = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(reference);
            let last = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(reference);
            Some(DateWindow::from_days(first, last))
        }
        PeriodKind::Custom => range.map(|(start, end)| DateWindow::from_days(start, end)),
    }
}

/// Advances `reference` by `steps` units of the granularity. Month and year
/// steps clamp the day to the target month's length. Custom periods have no
/// unit, so stepping is a no-op.
pub fn step(reference: NaiveDate, kind: PeriodKind, steps: i32) -> NaiveDate {
    match kind {
        PeriodKind::Daily => reference + Duration::days(steps as i64),
        PeriodKind::Weekly => reference + Duration::days(7 * steps as i64),
        PeriodKind::Monthly => shift_month(reference, steps),
        PeriodKind::Annually => shift_year(reference, steps),
        PeriodKind::Custom => reference,
    }
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    (first_next - Duration::days(1)).day()
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day).unwrap_or(date)
}

fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(0, 0, 0, 0).unwrap()
}

fn day_end(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999).unwrap()
}
