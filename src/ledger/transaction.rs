use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fiscal::RefMonth;

use super::common::{Entity, PaymentMethodKind, PaymentStatus};

/// Subcategory tagging a transaction as the payment of a fixed family
/// expense. Part of the stored data contract.
pub const FIXED_EXPENSE_SUBCATEGORY: &str = "Despesa Fixa";
/// Category grouping investment contributions.
pub const INVESTMENT_CATEGORY: &str = "Investimentos";
/// Default subcategory when the user leaves it blank.
pub const GENERAL_SUBCATEGORY: &str = "Geral";
/// Category and subcategory for payment-app fee records.
pub const FEE_CATEGORY: &str = "Taxas";
pub const FEE_SUBCATEGORY: &str = "Taxa App Pagamento";
/// Label used by the investment chart for untagged contributions.
pub const GENERAL_INVESTMENT_LABEL: &str = "Aportes Gerais";

/// One row of the append-only transaction log.
///
/// `reference_month` is the fiscal bucket derived from `date`, stored
/// redundantly for fast filtering; every constructor in this crate keeps the
/// two in sync.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "entityId")]
    pub entity: Entity,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub value: f64,
    pub category: String,
    pub subcategory: String,
    /// Human-readable payment label ("Pix / Débito", "Cartão: Nubank", ...).
    pub payment_method: String,
    #[serde(rename = "paymentMethodType")]
    pub payment_method_kind: PaymentMethodKind,
    /// Funding account for Pix/Cash, or the debited side of a transfer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    /// Credited side of a transfer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_account_id: Option<Uuid>,
    /// Charged card for credit purchases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<Uuid>,
    pub status: PaymentStatus,
    pub date: NaiveDate,
    pub reference_month: RefMonth,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_current: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_total: Option<u32>,
    /// Explicit link to the recurring-expense template this payment settles.
    /// Replaces the original app's description substring join; the substring
    /// rule survives only as a fallback for records lacking the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_expense_id: Option<Uuid>,
}

impl Transaction {
    pub fn new(
        entity: Entity,
        kind: TransactionKind,
        value: f64,
        category: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity,
            kind,
            value,
            category: category.into(),
            subcategory: GENERAL_SUBCATEGORY.into(),
            payment_method: String::new(),
            payment_method_kind: PaymentMethodKind::Pix,
            account_id: None,
            target_account_id: None,
            card_id: None,
            status: PaymentStatus::Paid,
            date,
            reference_month: RefMonth::for_date(date),
            description: description.into(),
            installment_current: None,
            installment_total: None,
            source_expense_id: None,
        }
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = subcategory.into();
        self
    }

    pub fn with_payment(
        mut self,
        label: impl Into<String>,
        kind: PaymentMethodKind,
    ) -> Self {
        self.payment_method = label.into();
        self.payment_method_kind = kind;
        self
    }

    pub fn with_account(mut self, account_id: Uuid) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn with_target_account(mut self, account_id: Uuid) -> Self {
        self.target_account_id = Some(account_id);
        self
    }

    pub fn with_card(mut self, card_id: Uuid) -> Self {
        self.card_id = Some(card_id);
        self
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_installment(mut self, current: u32, total: u32) -> Self {
        self.installment_current = Some(current);
        self.installment_total = Some(total);
        self
    }

    pub fn with_source_expense(mut self, expense_id: Uuid) -> Self {
        self.source_expense_id = Some(expense_id);
        self
    }

    /// Whether this row is one slice of a multi-installment purchase.
    pub fn is_installment(&self) -> bool {
        self.installment_total.map_or(false, |total| total > 1)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Income,
    Expense,
    Investment,
    Transfer,
}
