use serde::{Deserialize, Serialize};

/// Partition key for every money record: the household or one of the two
/// sole-proprietorship businesses. Never mutated after creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Entity {
    Family,
    BusinessA,
    BusinessB,
}

impl Entity {
    /// The two business entities, in consolidation order.
    pub const BUSINESSES: [Entity; 2] = [Entity::BusinessA, Entity::BusinessB];

    pub fn is_business(&self) -> bool {
        matches!(self, Entity::BusinessA | Entity::BusinessB)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

/// Funding instrument classification. Only `Pix` and `Cash` movements touch an
/// account balance; card purchases accrue into the card invoice instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethodKind {
    CreditCard,
    Pix,
    Cash,
    Transfer,
}
