use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A credit card. The current invoice is not stored: it is always recomputed
/// from the transaction log for the card's reference month, so the legacy
/// `currentInvoice` field in old exports is ignored on load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    pub name: String,
    pub limit: f64,
    /// Day of month the statement closes.
    pub closing_day: u32,
    /// Day of month the invoice is due.
    pub due_day: u32,
}

impl Card {
    pub fn new(name: impl Into<String>, limit: f64, closing_day: u32, due_day: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            limit,
            closing_day,
            due_day,
        }
    }
}
