use chrono::NaiveDate;
use uuid::Uuid;

use crate::fiscal::RefMonth;
use crate::ledger::{
    transaction::{FEE_CATEGORY, FEE_SUBCATEGORY, FIXED_EXPENSE_SUBCATEGORY},
    Card, Entity, PaymentMethodKind, PaymentStatus, RecurringExpense, Transaction,
    TransactionKind,
};

/// Settlement state of one recurring expense inside a reference month.
/// Neither flag set means "open": no transaction exists yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseStatus {
    pub expense_id: Uuid,
    pub is_paid: bool,
    pub is_pending: bool,
    pub transaction_id: Option<Uuid>,
}

/// User input for settling one recurring expense.
#[derive(Debug, Clone)]
pub struct ExpensePayment {
    pub value: f64,
    /// Payment-app fee charged on top, recorded as a separate transaction.
    pub fee: f64,
    pub method: PaymentMethodKind,
    pub account_id: Option<Uuid>,
    pub card_id: Option<Uuid>,
    pub date: NaiveDate,
}

/// Fixed-budget summary for the month.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedTotals {
    /// Sum of every template value (the planned budget).
    pub budget: f64,
    /// Sum of templates already settled this month.
    pub paid: f64,
}

pub struct ExpenseService;

impl ExpenseService {
    /// Derives paid/pending/open for every template from the transaction log.
    pub fn status_for_month(
        expenses: &[RecurringExpense],
        transactions: &[Transaction],
        month: RefMonth,
    ) -> Vec<ExpenseStatus> {
        expenses
            .iter()
            .map(|expense| {
                let linked = transactions
                    .iter()
                    .find(|txn| Self::settles(expense, txn, month));
                ExpenseStatus {
                    expense_id: expense.id,
                    is_paid: linked.map_or(false, |txn| txn.status == PaymentStatus::Paid),
                    is_pending: linked.map_or(false, |txn| txn.status == PaymentStatus::Pending),
                    transaction_id: linked.map(|txn| txn.id),
                }
            })
            .collect()
    }

    /// Whether `txn` is the settlement of `expense` in `month`. Prefers the
    /// explicit template link; records without one (legacy imports) fall back
    /// to the original case-insensitive name-in-description rule.
    fn settles(expense: &RecurringExpense, txn: &Transaction, month: RefMonth) -> bool {
        if txn.entity != Entity::Family
            || txn.kind != TransactionKind::Expense
            || txn.reference_month != month
            || txn.subcategory != FIXED_EXPENSE_SUBCATEGORY
        {
            return false;
        }
        match txn.source_expense_id {
            Some(id) => id == expense.id,
            None => txn
                .description
                .to_lowercase()
                .contains(&expense.name.to_lowercase()),
        }
    }

    /// Synthesizes one PENDING transaction for every open template, dated on
    /// the template's due day mapped into the month's 16-15 window. The batch
    /// is returned for posting.
    pub fn generate_pending(
        expenses: &[RecurringExpense],
        transactions: &[Transaction],
        month: RefMonth,
    ) -> Vec<Transaction> {
        let statuses = Self::status_for_month(expenses, transactions, month);
        expenses
            .iter()
            .zip(statuses)
            .filter(|(_, status)| !status.is_paid && !status.is_pending)
            .map(|(expense, _)| {
                Transaction::new(
                    Entity::Family,
                    TransactionKind::Expense,
                    expense.value,
                    expense.category.clone(),
                    month.due_date(expense.due_day),
                    expense.name.clone(),
                )
                .with_subcategory(FIXED_EXPENSE_SUBCATEGORY)
                .with_payment("Pendente", expense.payment_method_kind)
                .with_status(PaymentStatus::Pending)
                .with_installment(1, 1)
                .with_source_expense(expense.id)
            })
            .collect()
    }

    /// Builds the settlement batch for one expense: the main payment plus an
    /// optional fee record when paid through a card app. Card payments stay
    /// PENDING until the invoice is settled; Pix/Cash are PAID immediately.
    pub fn pay(
        expense: &RecurringExpense,
        cards: &[Card],
        input: &ExpensePayment,
    ) -> Vec<Transaction> {
        let on_card = input.method == PaymentMethodKind::CreditCard;
        let label = match input.method {
            PaymentMethodKind::CreditCard => input
                .card_id
                .and_then(|id| cards.iter().find(|card| card.id == id))
                .map(|card| format!("Cartão: {}", card.name))
                .unwrap_or_else(|| "Cartão de Crédito".into()),
            PaymentMethodKind::Pix => "Pix / Débito".into(),
            PaymentMethodKind::Cash => "Dinheiro Físico".into(),
            PaymentMethodKind::Transfer => "Transferência".into(),
        };

        let mut main = Transaction::new(
            Entity::Family,
            TransactionKind::Expense,
            input.value,
            expense.category.clone(),
            input.date,
            expense.name.clone(),
        )
        .with_subcategory(FIXED_EXPENSE_SUBCATEGORY)
        .with_payment(label.clone(), input.method)
        .with_status(if on_card {
            PaymentStatus::Pending
        } else {
            PaymentStatus::Paid
        })
        .with_installment(1, 1)
        .with_source_expense(expense.id);
        if on_card {
            main.card_id = input.card_id;
        } else {
            main.account_id = input.account_id;
        }

        let mut batch = vec![main];
        if input.fee > 0.0 && on_card {
            let mut fee = Transaction::new(
                Entity::Family,
                TransactionKind::Expense,
                input.fee,
                FEE_CATEGORY,
                input.date,
                format!("Taxa App - {}", expense.name),
            )
            .with_subcategory(FEE_SUBCATEGORY)
            .with_payment(label, PaymentMethodKind::CreditCard)
            .with_status(PaymentStatus::Pending)
            .with_installment(1, 1);
            fee.card_id = input.card_id;
            batch.push(fee);
        }
        batch
    }

    /// Planned fixed budget vs. what is already paid this month.
    pub fn fixed_totals(
        expenses: &[RecurringExpense],
        statuses: &[ExpenseStatus],
    ) -> FixedTotals {
        let mut totals = FixedTotals {
            budget: expenses.iter().map(|expense| expense.value).sum(),
            paid: 0.0,
        };
        for (expense, status) in expenses.iter().zip(statuses) {
            if status.is_paid {
                totals.paid += expense.value;
            }
        }
        totals
    }

    /// Family expenses of the month that are not fixed-template settlements,
    /// newest first.
    pub fn variable_for_month(
        transactions: &[Transaction],
        month: RefMonth,
    ) -> Vec<&Transaction> {
        let mut rows: Vec<&Transaction> = transactions
            .iter()
            .filter(|txn| {
                txn.entity == Entity::Family
                    && txn.kind == TransactionKind::Expense
                    && txn.reference_month == month
                    && txn.subcategory != FIXED_EXPENSE_SUBCATEGORY
            })
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }

    pub fn variable_total(transactions: &[Transaction], month: RefMonth) -> f64 {
        Self::variable_for_month(transactions, month)
            .iter()
            .map(|txn| txn.value)
            .sum()
    }
}
