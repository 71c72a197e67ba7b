use chrono::NaiveDate;
use uuid::Uuid;

use crate::fiscal;
use crate::ledger::{
    transaction::{FEE_CATEGORY, FEE_SUBCATEGORY, GENERAL_SUBCATEGORY},
    Account, Card, Client, Entity, Ledger, PaymentMethodKind, PaymentStatus, Transaction,
    TransactionKind,
};

use super::{AccountService, ServiceError, ServiceResult};

/// User input for a new ledger entry, before expansion into the posted batch.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub entity: Entity,
    pub kind: TransactionKind,
    pub value: f64,
    pub category: String,
    pub subcategory: Option<String>,
    pub payment_method_kind: PaymentMethodKind,
    pub account_id: Option<Uuid>,
    pub target_account_id: Option<Uuid>,
    pub card_id: Option<Uuid>,
    pub date: NaiveDate,
    pub description: String,
    /// Number of monthly installments; 1 means a plain purchase.
    pub installments: u32,
    /// Payment-app fee, card purchases only.
    pub fee: f64,
}

/// Withdrawal of business profits into a personal account.
#[derive(Debug, Clone)]
pub struct WithdrawalDraft {
    pub source_account_id: Uuid,
    pub target_account_id: Uuid,
    pub value: f64,
    pub kind: WithdrawalKind,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawalKind {
    ProLabore,
    ProfitShare,
}

pub struct TransactionService;

impl TransactionService {
    /// Expands a draft into the transactions to post: N installment siblings
    /// dated one calendar month apart, plus an optional fee record.
    ///
    /// Initial status follows the funding instrument: card purchases wait for
    /// the invoice (PENDING), Pix/Cash/transfers settle immediately (PAID).
    pub fn create(draft: &TransactionDraft, cards: &[Card]) -> ServiceResult<Vec<Transaction>> {
        let is_transfer = draft.kind == TransactionKind::Transfer;
        if is_transfer && (draft.account_id.is_none() || draft.target_account_id.is_none()) {
            return Err(ServiceError::Invalid(
                "Transfer requires both source and target accounts".into(),
            ));
        }

        let (label, status) = if is_transfer {
            ("Transferência Interna".to_string(), PaymentStatus::Paid)
        } else {
            match draft.payment_method_kind {
                PaymentMethodKind::CreditCard => (
                    draft
                        .card_id
                        .and_then(|id| cards.iter().find(|card| card.id == id))
                        .map(|card| format!("Cartão: {}", card.name))
                        .unwrap_or_else(|| "Cartão de Crédito".into()),
                    PaymentStatus::Pending,
                ),
                PaymentMethodKind::Pix => ("Pix / Débito".into(), PaymentStatus::Paid),
                PaymentMethodKind::Cash => ("Dinheiro Físico".into(), PaymentStatus::Paid),
                PaymentMethodKind::Transfer => ("Transferência".into(), PaymentStatus::Paid),
            }
        };

        let on_card = !is_transfer && draft.payment_method_kind == PaymentMethodKind::CreditCard;
        let installments = draft.installments.max(1);
        let slice_value = draft.value / installments as f64;

        let mut batch = Vec::with_capacity(installments as usize + 1);
        for slice in 0..installments {
            let date = fiscal::add_months(draft.date, slice as i32);
            let description = if installments > 1 {
                format!("{} ({}/{})", draft.description, slice + 1, installments)
            } else {
                draft.description.clone()
            };
            let mut txn = Transaction::new(
                draft.entity,
                draft.kind,
                slice_value,
                if is_transfer {
                    "Transferência".to_string()
                } else {
                    draft.category.clone()
                },
                date,
                description,
            )
            .with_subcategory(if is_transfer {
                GENERAL_SUBCATEGORY.to_string()
            } else {
                draft
                    .subcategory
                    .clone()
                    .unwrap_or_else(|| GENERAL_SUBCATEGORY.to_string())
            })
            .with_payment(
                label.clone(),
                if is_transfer {
                    PaymentMethodKind::Transfer
                } else {
                    draft.payment_method_kind
                },
            )
            .with_status(status)
            .with_installment(slice + 1, installments);
            if on_card {
                txn.card_id = draft.card_id;
            } else {
                txn.account_id = draft.account_id;
            }
            if is_transfer {
                txn.target_account_id = draft.target_account_id;
            }
            batch.push(txn);
        }

        if draft.fee > 0.0 && on_card && draft.kind == TransactionKind::Expense {
            let mut fee = Transaction::new(
                draft.entity,
                TransactionKind::Expense,
                draft.fee,
                FEE_CATEGORY,
                draft.date,
                format!("Taxa App - {}", draft.description),
            )
            .with_subcategory(FEE_SUBCATEGORY)
            .with_payment(label, PaymentMethodKind::CreditCard)
            .with_status(PaymentStatus::Pending)
            .with_installment(1, 1);
            fee.card_id = draft.card_id;
            batch.push(fee);
        }

        Ok(batch)
    }

    /// Appends a batch to the log, updating account balance caches exactly
    /// once per transaction.
    pub fn post(ledger: &mut Ledger, batch: Vec<Transaction>) {
        tracing::debug!(count = batch.len(), "posting transaction batch");
        for txn in batch {
            AccountService::apply(&mut ledger.accounts, &txn);
            ledger.transactions.push(txn);
        }
        ledger.touch();
    }

    /// Records a client payment: PAID income landing on the client's target
    /// account, with an optional surcharge and note for extra products.
    pub fn client_payment(
        client: &Client,
        date: NaiveDate,
        extra: f64,
        note: Option<&str>,
    ) -> Transaction {
        let subcategory = if client.is_recurring {
            "Mensalidade"
        } else {
            "Serviço Avulso"
        };
        let description = match note {
            Some(note) if !note.is_empty() => format!("Receb. {} + {}", client.name, note),
            _ => format!("Receb. {}", client.name),
        };
        Transaction::new(
            client.entity,
            TransactionKind::Income,
            client.recurring_value + extra,
            "Vendas/Serviços",
            date,
            description,
        )
        .with_subcategory(subcategory)
        .with_payment("Boleto/Pix", PaymentMethodKind::Pix)
        .with_account(client.target_account_id)
        .with_status(PaymentStatus::Paid)
    }

    /// Builds the transfer for an owner withdrawal. The transaction belongs
    /// to the entity owning the source account (falls back to the first
    /// business when the account is unknown).
    pub fn owner_withdrawal(accounts: &[Account], draft: &WithdrawalDraft) -> Transaction {
        let entity = accounts
            .iter()
            .find(|account| account.id == draft.source_account_id)
            .map(|account| account.entity)
            .unwrap_or(Entity::BusinessA);
        let (subcategory, description) = match draft.kind {
            WithdrawalKind::ProLabore => ("Pró-Labore", "Retirada Pró-Labore"),
            WithdrawalKind::ProfitShare => ("Distribuição de Lucros", "Retirada de Lucros"),
        };
        Transaction::new(
            entity,
            TransactionKind::Transfer,
            draft.value,
            "Retirada de Sócios",
            draft.date,
            description,
        )
        .with_subcategory(subcategory)
        .with_payment("Transferência", PaymentMethodKind::Transfer)
        .with_account(draft.source_account_id)
        .with_target_account(draft.target_account_id)
        .with_status(PaymentStatus::Paid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fiscal::RefMonth;
    use crate::ledger::AccountKind;

    fn draft(kind: TransactionKind, method: PaymentMethodKind) -> TransactionDraft {
        TransactionDraft {
            entity: Entity::Family,
            kind,
            value: 300.0,
            category: "Pessoais".into(),
            subcategory: None,
            payment_method_kind: method,
            account_id: None,
            target_account_id: None,
            card_id: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            description: "Compra".into(),
            installments: 1,
            fee: 0.0,
        }
    }

    #[test]
    fn installments_become_siblings_one_month_apart() {
        let card = Card::new("C6 Carbon", 10000.0, 16, 24);
        let mut draft = draft(TransactionKind::Expense, PaymentMethodKind::CreditCard);
        draft.card_id = Some(card.id);
        draft.installments = 3;
        let batch = TransactionService::create(&draft, &[card]).unwrap();

        assert_eq!(batch.len(), 3);
        for (i, txn) in batch.iter().enumerate() {
            assert_eq!(txn.value, 100.0);
            assert_eq!(txn.installment_current, Some(i as u32 + 1));
            assert_eq!(txn.installment_total, Some(3));
            assert_eq!(txn.status, PaymentStatus::Pending);
            assert_eq!(txn.reference_month, RefMonth::for_date(txn.date));
            assert!(txn.description.contains(&format!("({}/3)", i + 1)));
        }
        // Jan 31 -> Feb 29 (clamped) -> Mar 31.
        assert_eq!(batch[1].date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(batch[2].date, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn card_fee_adds_a_separate_pending_record() {
        let card = Card::new("Nubank", 5000.0, 16, 24);
        let mut draft = draft(TransactionKind::Expense, PaymentMethodKind::CreditCard);
        draft.card_id = Some(card.id);
        draft.fee = 4.9;
        let batch = TransactionService::create(&draft, &[card]).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1].category, FEE_CATEGORY);
        assert_eq!(batch[1].subcategory, FEE_SUBCATEGORY);
        assert_eq!(batch[1].value, 4.9);
        assert_eq!(batch[1].description, "Taxa App - Compra");
    }

    #[test]
    fn pix_entry_is_paid_and_keeps_the_account_link() {
        let account_id = Uuid::new_v4();
        let mut draft = draft(TransactionKind::Expense, PaymentMethodKind::Pix);
        draft.account_id = Some(account_id);
        let batch = TransactionService::create(&draft, &[]).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].status, PaymentStatus::Paid);
        assert_eq!(batch[0].account_id, Some(account_id));
        assert_eq!(batch[0].card_id, None);
        assert_eq!(batch[0].payment_method, "Pix / Débito");
    }

    #[test]
    fn transfer_requires_both_sides() {
        let mut bad = draft(TransactionKind::Transfer, PaymentMethodKind::Transfer);
        bad.account_id = Some(Uuid::new_v4());
        assert!(TransactionService::create(&bad, &[]).is_err());

        let mut good = bad.clone();
        good.target_account_id = Some(Uuid::new_v4());
        let batch = TransactionService::create(&good, &[]).unwrap();
        assert_eq!(batch[0].kind, TransactionKind::Transfer);
        assert_eq!(batch[0].category, "Transferência");
        assert_eq!(batch[0].status, PaymentStatus::Paid);
        assert!(batch[0].target_account_id.is_some());
    }

    #[test]
    fn post_appends_and_updates_balances_once() {
        let mut ledger = Ledger::new();
        let account = Account::new("Itaú", AccountKind::Bank, Entity::Family);
        let account_id = ledger.add_account(account);

        let mut draft = draft(TransactionKind::Expense, PaymentMethodKind::Pix);
        draft.account_id = Some(account_id);
        draft.value = 120.0;
        let batch = TransactionService::create(&draft, &[]).unwrap();
        TransactionService::post(&mut ledger, batch);

        assert_eq!(ledger.transactions.len(), 1);
        assert_eq!(ledger.account(account_id).unwrap().balance, -120.0);
    }

    #[test]
    fn client_payment_credits_the_target_account() {
        let account_id = Uuid::new_v4();
        let client = Client::new(Entity::BusinessA, "Fábio - Cond. Vista Bella", 170.0, account_id)
            .with_fixed_pay_day(2);
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let txn = TransactionService::client_payment(&client, date, 30.0, Some("cloro"));
        assert_eq!(txn.kind, TransactionKind::Income);
        assert_eq!(txn.value, 200.0);
        assert_eq!(txn.account_id, Some(account_id));
        assert_eq!(txn.subcategory, "Mensalidade");
        assert_eq!(txn.description, "Receb. Fábio - Cond. Vista Bella + cloro");
        assert_eq!(txn.status, PaymentStatus::Paid);
    }

    #[test]
    fn withdrawal_takes_entity_from_source_account() {
        let source = Account::new("PJ - Equipe da Piscina", AccountKind::Bank, Entity::BusinessA);
        let target = Account::new("Itaú - Eliú", AccountKind::Bank, Entity::Family);
        let draft = WithdrawalDraft {
            source_account_id: source.id,
            target_account_id: target.id,
            value: 800.0,
            kind: WithdrawalKind::ProLabore,
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        };
        let txn = TransactionService::owner_withdrawal(&[source, target], &draft);
        assert_eq!(txn.entity, Entity::BusinessA);
        assert_eq!(txn.kind, TransactionKind::Transfer);
        assert_eq!(txn.subcategory, "Pró-Labore");
        assert_eq!(txn.description, "Retirada Pró-Labore");
    }
}
