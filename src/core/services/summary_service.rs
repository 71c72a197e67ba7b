use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::fiscal::{self, RefMonth};
use crate::ledger::{
    transaction::{GENERAL_INVESTMENT_LABEL, GENERAL_SUBCATEGORY, INVESTMENT_CATEGORY},
    Entity, Transaction, TransactionKind,
};

/// Income, expense, and their difference for one entity and reference month.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodStats {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// One slice of a grouped/summed breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub label: String,
    pub total: f64,
}

/// Income/expense sums for one day of the calendar grid.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DayTotals {
    pub day: u32,
    pub income: f64,
    pub expense: f64,
}

pub struct SummaryService;

impl SummaryService {
    /// Income/expense totals for one entity inside one reference month.
    /// An empty log yields all zeros.
    pub fn entity_period_stats(
        transactions: &[Transaction],
        entity: Entity,
        month: RefMonth,
    ) -> PeriodStats {
        let mut stats = PeriodStats::default();
        for txn in transactions
            .iter()
            .filter(|txn| txn.entity == entity && txn.reference_month == month)
        {
            match txn.kind {
                TransactionKind::Income => stats.income += txn.value,
                TransactionKind::Expense => stats.expense += txn.value,
                _ => {}
            }
        }
        stats.balance = stats.income - stats.expense;
        stats
    }

    /// Combined totals across the two business entities.
    pub fn consolidated_stats(transactions: &[Transaction], month: RefMonth) -> PeriodStats {
        let mut stats = PeriodStats::default();
        for entity in Entity::BUSINESSES {
            let partial = Self::entity_period_stats(transactions, entity, month);
            stats.income += partial.income;
            stats.expense += partial.expense;
        }
        stats.balance = stats.income - stats.expense;
        stats
    }

    /// Monthly totals across every entity, for the dashboard balance card.
    pub fn period_stats(transactions: &[Transaction], month: RefMonth) -> PeriodStats {
        let mut stats = PeriodStats::default();
        for txn in transactions.iter().filter(|t| t.reference_month == month) {
            match txn.kind {
                TransactionKind::Income => stats.income += txn.value,
                TransactionKind::Expense => stats.expense += txn.value,
                _ => {}
            }
        }
        stats.balance = stats.income - stats.expense;
        stats
    }

    /// Generic group-and-sum over the log. Output is sorted descending by
    /// total; ties keep first-encountered order (the sort is stable).
    pub fn breakdown(
        transactions: &[Transaction],
        filter: impl Fn(&Transaction) -> bool,
        key: impl Fn(&Transaction) -> String,
    ) -> Vec<CategoryTotal> {
        let mut slots: Vec<CategoryTotal> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for txn in transactions.iter().filter(|txn| filter(txn)) {
            let label = key(txn);
            match index.get(&label) {
                Some(&slot) => slots[slot].total += txn.value,
                None => {
                    index.insert(label.clone(), slots.len());
                    slots.push(CategoryTotal {
                        label,
                        total: txn.value,
                    });
                }
            }
        }
        slots.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        slots
    }

    /// Expense totals per category for the month, excluding investment
    /// contributions (they get their own chart).
    pub fn expenses_by_category(
        transactions: &[Transaction],
        month: RefMonth,
    ) -> Vec<CategoryTotal> {
        Self::breakdown(
            transactions,
            |txn| {
                txn.kind == TransactionKind::Expense
                    && txn.reference_month == month
                    && txn.category != INVESTMENT_CATEGORY
            },
            |txn| txn.category.clone(),
        )
    }

    /// Investment contributions for a calendar year, grouped by subcategory.
    /// Untagged contributions fall into the general bucket.
    pub fn investments_for_year(transactions: &[Transaction], year: i32) -> Vec<CategoryTotal> {
        Self::breakdown(
            transactions,
            |txn| {
                (txn.category == INVESTMENT_CATEGORY
                    || txn.kind == TransactionKind::Investment)
                    && txn.date.year() == year
            },
            |txn| {
                if txn.subcategory.is_empty() || txn.subcategory == GENERAL_SUBCATEGORY {
                    GENERAL_INVESTMENT_LABEL.to_string()
                } else {
                    txn.subcategory.clone()
                }
            },
        )
    }

    /// Per-day income/expense sums for the civil calendar of `year`/`month`,
    /// one entry per day of the month.
    pub fn calendar_day_totals(
        transactions: &[Transaction],
        year: i32,
        month: u32,
    ) -> Vec<DayTotals> {
        (1..=fiscal::days_in_month(year, month))
            .map(|day| {
                let mut totals = DayTotals {
                    day,
                    ..DayTotals::default()
                };
                for txn in transactions.iter().filter(|txn| {
                    txn.date.year() == year
                        && txn.date.month() == month
                        && txn.date.day() == day
                }) {
                    match txn.kind {
                        TransactionKind::Income => totals.income += txn.value,
                        TransactionKind::Expense => totals.expense += txn.value,
                        _ => {}
                    }
                }
                totals
            })
            .collect()
    }

    /// Transactions dated exactly `date`, for the "today" panel.
    pub fn transactions_on(transactions: &[Transaction], date: NaiveDate) -> Vec<&Transaction> {
        transactions.iter().filter(|txn| txn.date == date).collect()
    }
}
