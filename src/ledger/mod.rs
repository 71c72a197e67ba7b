//! Ledger domain models, persistence-friendly types, and helpers.

pub mod account;
pub mod card;
pub mod client;
pub mod common;
pub mod expense;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use account::{Account, AccountKind};
pub use card::Card;
pub use client::Client;
pub use common::{Entity, PaymentMethodKind, PaymentStatus};
pub use expense::RecurringExpense;
pub use ledger::Ledger;
pub use transaction::{Transaction, TransactionKind};
