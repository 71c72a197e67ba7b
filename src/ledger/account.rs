use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::Entity;

/// A cash-holding account (bank, physical cash, or wallet app).
///
/// `balance` is a running cache: it is mutated exactly once per qualifying
/// transaction when the transaction is posted, never recomputed from history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    pub balance: f64,
    #[serde(rename = "entityId")]
    pub entity: Entity,
}

impl Account {
    /// Creates a new account with a zero balance.
    pub fn new(name: impl Into<String>, kind: AccountKind, entity: Entity) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            balance: 0.0,
            entity,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountKind {
    Bank,
    Cash,
    Wallet,
}
