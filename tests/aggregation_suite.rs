use chrono::NaiveDate;
use finance_core::{
    aggregate::calendar_grid, filter::transactions_in_window, resolve_window, AggregationQuery,
    BudgetEntry, CategoryAggregator, DailyAggregator, EntryKind, PeriodKind, ReportService,
    Transaction,
};

fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn txn(kind: EntryKind, amount: &str, category: &str, date: NaiveDate) -> Transaction {
    Transaction::new(
        kind,
        date.and_hms_opt(14, 30, 0).unwrap(),
        amount,
        category,
        "Checking",
        "USD",
    )
}

fn january_sample() -> Vec<Transaction> {
    vec![
        txn(EntryKind::Expense, "10.00", "Food", sample_date(2025, 1, 5)),
        txn(EntryKind::Expense, "5.00", "Food", sample_date(2025, 1, 20)),
        txn(
            EntryKind::Expense,
            "15.00",
            "Transport",
            sample_date(2025, 1, 10),
        ),
        txn(
            EntryKind::Income,
            "1200.00",
            "Salary",
            sample_date(2025, 1, 25),
        ),
        txn(
            EntryKind::Expense,
            "99.00",
            "Food",
            sample_date(2025, 2, 2),
        ),
    ]
}

#[test]
fn monthly_expense_report_scenario() {
    let query = AggregationQuery::new(
        PeriodKind::Monthly,
        sample_date(2025, 1, 15),
        EntryKind::Expense,
    );
    let report = ReportService::category_report(&january_sample(), &query);

    assert_eq!(report.grand_total, 30.0);
    assert_eq!(report.categories.len(), 2);
    assert_eq!(report.categories[0].category, "Food");
    assert_eq!(report.categories[0].total, 15.0);
    assert_eq!(report.categories[1].category, "Transport");
    assert_eq!(report.categories[1].total, 15.0);
    let percentage_sum: f64 = report.categories.iter().map(|c| c.percentage).sum();
    assert!((percentage_sum - 100.0).abs() < 1e-9);
}

#[test]
fn unset_custom_range_matches_nothing() {
    let query = AggregationQuery::new(
        PeriodKind::Custom,
        sample_date(2025, 1, 15),
        EntryKind::Expense,
    );
    let report = ReportService::category_report(&january_sample(), &query);
    assert!(report.categories.is_empty());
    assert_eq!(report.grand_total, 0.0);
}

#[test]
fn custom_range_is_inclusive_after_normalization() {
    // reversed on purpose; resolver swaps and normalizes to whole days
    let query = AggregationQuery::new(
        PeriodKind::Custom,
        sample_date(2025, 1, 1),
        EntryKind::Expense,
    )
    .with_range(sample_date(2025, 1, 20), sample_date(2025, 1, 5));
    let report = ReportService::category_report(&january_sample(), &query);
    assert_eq!(report.grand_total, 30.0);
}

#[test]
fn weekly_window_from_sunday_reaches_back_to_monday() {
    // 2025-01-12 is a Sunday
    let window = resolve_window(sample_date(2025, 1, 12), PeriodKind::Weekly, None).unwrap();
    assert_eq!(window.start.date(), sample_date(2025, 1, 6));
    assert_eq!(window.end.date(), sample_date(2025, 1, 12));

    let transactions = january_sample();
    let kept = transactions_in_window(&transactions, &window, EntryKind::Expense);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].category, "Transport");
}

#[test]
fn daily_breakdown_agrees_with_category_totals() {
    let transactions = january_sample();
    let breakdown = DailyAggregator::month_breakdown(&transactions, 2025, 1);

    let expense_query = AggregationQuery::new(
        PeriodKind::Monthly,
        sample_date(2025, 1, 15),
        EntryKind::Expense,
    );
    let income_query = AggregationQuery::new(
        PeriodKind::Monthly,
        sample_date(2025, 1, 15),
        EntryKind::Income,
    );
    let expenses = ReportService::category_report(&transactions, &expense_query);
    let income = ReportService::category_report(&transactions, &income_query);

    assert_eq!(breakdown.totals.expense, expenses.grand_total);
    assert_eq!(breakdown.totals.income, income.grand_total);
    assert_eq!(
        breakdown.totals.total,
        income.grand_total - expenses.grand_total
    );

    let daily_income: f64 = breakdown.days.values().map(|d| d.income).sum();
    assert_eq!(daily_income, breakdown.totals.income);
}

#[test]
fn calendar_grid_mirrors_the_daily_aggregate() {
    let transactions = january_sample();
    let breakdown = DailyAggregator::month_breakdown(&transactions, 2025, 1);
    let grid = calendar_grid(&breakdown, 2025, 1, sample_date(2025, 1, 10));

    assert_eq!(grid.len() % 7, 0);
    for cell in &grid {
        match cell.day {
            Some(day) => {
                let totals = breakdown.day(day);
                assert_eq!(cell.income, totals.income);
                assert_eq!(cell.expense, totals.expense);
            }
            None => {
                assert_eq!(cell.income, 0.0);
                assert_eq!(cell.expense, 0.0);
            }
        }
    }
    let grid_expense: f64 = grid.iter().map(|c| c.expense).sum();
    assert_eq!(grid_expense, breakdown.totals.expense);
}

#[test]
fn aggregating_twice_yields_identical_totals() {
    let transactions = january_sample();
    let window = resolve_window(sample_date(2025, 1, 15), PeriodKind::Monthly, None).unwrap();
    let filtered = transactions_in_window(&transactions, &window, EntryKind::Expense);
    let first = CategoryAggregator::totals(&filtered);
    let second = CategoryAggregator::totals(&filtered);
    assert_eq!(first, second);
    let input_sum: f64 = filtered.iter().map(|t| t.parsed_amount()).sum();
    assert_eq!(CategoryAggregator::grand_total(&first), input_sum);
}

#[test]
fn budget_overview_combines_budgets_and_spending() {
    let transactions = january_sample();
    let budgets = vec![
        BudgetEntry::new("Food", EntryKind::Expense, PeriodKind::Monthly, 200.0),
        BudgetEntry::new("Food", EntryKind::Expense, PeriodKind::Monthly, 150.0)
            .with_period_key("Jan-2025"),
        BudgetEntry::new("Salary", EntryKind::Income, PeriodKind::Monthly, 1000.0),
    ];
    let query = AggregationQuery::new(
        PeriodKind::Monthly,
        sample_date(2025, 1, 15),
        EntryKind::Expense,
    );

    let lines = ReportService::budget_overview(
        &transactions,
        &budgets,
        &query,
        Some("Jan-2025"),
        Some("Expenses"),
    );
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].category, "Food");
    assert_eq!(lines[0].budget, 150.0);
    assert_eq!(lines[0].spent, 15.0);

    let default_lines = ReportService::budget_overview(&transactions, &budgets, &query, None, None);
    assert_eq!(default_lines[0].budget, 200.0);
}
