use uuid::Uuid;

use crate::fiscal::RefMonth;
use crate::ledger::{Transaction, TransactionKind};

/// Computed invoice of one card for one reference month.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CardInvoice {
    pub total: f64,
    /// Portion of the total coming from multi-installment purchases.
    pub installment_portion: f64,
}

impl CardInvoice {
    /// Fraction of the limit consumed, clamped to 1.0. Zero for a
    /// non-positive limit.
    pub fn utilization(&self, limit: f64) -> f64 {
        if limit <= 0.0 {
            return 0.0;
        }
        (self.total / limit).min(1.0)
    }

    pub fn available(&self, limit: f64) -> f64 {
        limit - self.total
    }
}

pub struct CardService;

impl CardService {
    /// Recomputes the card invoice for the month by summing its expense
    /// transactions. An unknown card id simply yields an empty invoice.
    pub fn invoice(transactions: &[Transaction], card_id: Uuid, month: RefMonth) -> CardInvoice {
        let mut invoice = CardInvoice::default();
        for txn in Self::card_transactions(transactions, card_id, month) {
            invoice.total += txn.value;
            if txn.is_installment() {
                invoice.installment_portion += txn.value;
            }
        }
        invoice
    }

    /// Expense transactions charged to the card inside the month.
    pub fn card_transactions(
        transactions: &[Transaction],
        card_id: Uuid,
        month: RefMonth,
    ) -> Vec<&Transaction> {
        transactions
            .iter()
            .filter(|txn| {
                txn.card_id == Some(card_id)
                    && txn.reference_month == month
                    && txn.kind == TransactionKind::Expense
            })
            .collect()
    }
}
