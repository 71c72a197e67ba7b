pub mod account_service;
pub mod card_service;
pub mod expense_service;
pub mod summary_service;
pub mod transaction_service;

pub use account_service::AccountService;
pub use card_service::{CardInvoice, CardService};
pub use expense_service::{ExpensePayment, ExpenseService, ExpenseStatus, FixedTotals};
pub use summary_service::{CategoryTotal, DayTotals, PeriodStats, SummaryService};
pub use transaction_service::{
    TransactionDraft, TransactionService, WithdrawalDraft, WithdrawalKind,
};

use crate::errors::CaixaError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Caixa(#[from] CaixaError),
    #[error("{0}")]
    Invalid(String),
}
