use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::Entity;

/// A receivable source: a customer of one of the businesses, usually billed
/// monthly on a fixed day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    #[serde(rename = "entityId")]
    pub entity: Entity,
    pub name: String,
    pub recurring_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_pay_day: Option<u32>,
    /// Account credited when this client pays.
    pub target_account_id: Uuid,
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_description: Option<String>,
}

impl Client {
    pub fn new(
        entity: Entity,
        name: impl Into<String>,
        recurring_value: f64,
        target_account_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity,
            name: name.into(),
            recurring_value,
            fixed_pay_day: None,
            target_account_id,
            is_recurring: true,
            service_description: None,
        }
    }

    pub fn with_fixed_pay_day(mut self, day: u32) -> Self {
        self.fixed_pay_day = Some(day);
        self
    }
}
