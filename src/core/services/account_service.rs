use crate::ledger::{Account, PaymentMethodKind, Transaction, TransactionKind};

pub struct AccountService;

impl AccountService {
    /// Applies one transaction to the account balance caches.
    ///
    /// Transfers are all-or-nothing: when either side fails to resolve,
    /// neither balance moves. Pix/Cash income and expenses move the linked
    /// account; investments and card purchases never touch a balance (card
    /// spending accrues into the computed invoice instead). Unresolvable
    /// references degrade to a no-op.
    pub fn apply(accounts: &mut [Account], txn: &Transaction) {
        match txn.kind {
            TransactionKind::Transfer => {
                let (Some(source_id), Some(target_id)) = (txn.account_id, txn.target_account_id)
                else {
                    return;
                };
                let source = accounts.iter().position(|account| account.id == source_id);
                let target = accounts.iter().position(|account| account.id == target_id);
                let (Some(source), Some(target)) = (source, target) else {
                    tracing::warn!(
                        transaction = %txn.id,
                        "transfer skipped: unresolved account reference"
                    );
                    return;
                };
                accounts[source].balance -= txn.value;
                accounts[target].balance += txn.value;
            }
            TransactionKind::Income | TransactionKind::Expense => {
                if !matches!(
                    txn.payment_method_kind,
                    PaymentMethodKind::Pix | PaymentMethodKind::Cash
                ) {
                    return;
                }
                let Some(account_id) = txn.account_id else {
                    return;
                };
                if let Some(account) = accounts.iter_mut().find(|a| a.id == account_id) {
                    let modifier = if txn.kind == TransactionKind::Expense {
                        -1.0
                    } else {
                        1.0
                    };
                    account.balance += txn.value * modifier;
                }
            }
            // Informational only: contributions are tracked through the
            // investment breakdown, not the balance caches.
            TransactionKind::Investment => {}
        }
    }

    /// Sum of all cached balances, for the wallet header.
    pub fn total_balance(accounts: &[Account]) -> f64 {
        accounts.iter().map(|account| account.balance).sum()
    }
}
