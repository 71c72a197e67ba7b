use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::PaymentMethodKind;

/// A recurring family payable (rent, utilities, financing installment).
/// Template only: paying one produces a regular transaction, and deleting the
/// template never touches past transactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringExpense {
    pub id: Uuid,
    pub name: String,
    pub value: f64,
    pub due_day: u32,
    pub category: String,
    #[serde(rename = "paymentMethodType")]
    pub payment_method_kind: PaymentMethodKind,
}

impl RecurringExpense {
    pub fn new(
        name: impl Into<String>,
        value: f64,
        due_day: u32,
        category: impl Into<String>,
        payment_method_kind: PaymentMethodKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            value,
            due_day,
            category: category.into(),
            payment_method_kind,
        }
    }
}
