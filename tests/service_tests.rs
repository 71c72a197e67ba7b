use caixa_core::{
    core::services::{
        CardService, ExpenseService, SummaryService, TransactionDraft, TransactionService,
    },
    fiscal::RefMonth,
    ledger::{
        Account, AccountKind, Card, Client, Entity, Ledger, PaymentMethodKind, PaymentStatus,
        RecurringExpense, TransactionKind,
    },
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A month of activity across the three entities: client receipts, a card
/// purchase in installments, and a settled fixed expense.
fn prepared_ledger() -> Ledger {
    let mut ledger = Ledger::new();
    let pj_account = ledger.add_account(Account::new(
        "PJ - Equipe da Piscina",
        AccountKind::Bank,
        Entity::BusinessA,
    ));
    let family_account =
        ledger.add_account(Account::new("Itaú - Eliú", AccountKind::Bank, Entity::Family));
    let card = Card::new("Nubank - Eliú", 5000.0, 16, 24);
    let card_id = ledger.add_card(card.clone());
    let client = Client::new(Entity::BusinessA, "Fábio - Cond. Vista Bella", 170.0, pj_account)
        .with_fixed_pay_day(2);
    ledger.add_client(client.clone());
    let internet = RecurringExpense::new(
        "Internet - Alcans",
        89.0,
        12,
        "Contas de Consumo",
        PaymentMethodKind::Pix,
    );
    ledger.add_expense(internet.clone());

    // Client pays on the 2nd (bucket 2024-03).
    let receipt = TransactionService::client_payment(&client, date(2024, 3, 2), 0.0, None);
    TransactionService::post(&mut ledger, vec![receipt]);

    // Three-installment card purchase on the 5th.
    let draft = TransactionDraft {
        entity: Entity::Family,
        kind: TransactionKind::Expense,
        value: 300.0,
        category: "Pessoais".into(),
        subcategory: None,
        payment_method_kind: PaymentMethodKind::CreditCard,
        account_id: None,
        target_account_id: None,
        card_id: Some(card_id),
        date: date(2024, 3, 5),
        description: "Tênis".into(),
        installments: 3,
        fee: 0.0,
    };
    let batch = TransactionService::create(&draft, &ledger.cards).unwrap();
    TransactionService::post(&mut ledger, batch);

    // Internet settled by Pix from the family account.
    let payment = caixa_core::core::services::ExpensePayment {
        value: 89.0,
        fee: 0.0,
        method: PaymentMethodKind::Pix,
        account_id: Some(family_account),
        card_id: None,
        date: date(2024, 3, 12),
    };
    let batch = ExpenseService::pay(&internet, &ledger.cards, &payment);
    TransactionService::post(&mut ledger, batch);

    ledger
}

#[test]
fn month_of_activity_produces_consistent_views() {
    let ledger = prepared_ledger();
    let month = RefMonth::new(2024, 3);

    // Business income landed on the PJ account and in the entity stats.
    let stats = SummaryService::entity_period_stats(&ledger.transactions, Entity::BusinessA, month);
    assert_eq!(stats.income, 170.0);
    assert_eq!(stats.balance, 170.0);
    let consolidated = SummaryService::consolidated_stats(&ledger.transactions, month);
    assert_eq!(consolidated.income, 170.0);
    let pj = ledger
        .accounts
        .iter()
        .find(|a| a.entity == Entity::BusinessA)
        .unwrap();
    assert_eq!(pj.balance, 170.0);

    // Card invoice: only the first installment falls into this bucket.
    let card_id = ledger.cards[0].id;
    let invoice = CardService::invoice(&ledger.transactions, card_id, month);
    assert_eq!(invoice.total, 100.0);
    assert_eq!(invoice.installment_portion, 100.0);
    let next = CardService::invoice(&ledger.transactions, card_id, month.navigate(1));
    assert_eq!(next.total, 100.0);

    // The fixed expense reads as paid and debited the family account.
    let statuses = ExpenseService::status_for_month(&ledger.expenses, &ledger.transactions, month);
    assert!(statuses[0].is_paid);
    let family = ledger
        .accounts
        .iter()
        .find(|a| a.entity == Entity::Family)
        .unwrap();
    assert_eq!(family.balance, -89.0);

    // Card purchases never touched a balance.
    let family_stats =
        SummaryService::entity_period_stats(&ledger.transactions, Entity::Family, month);
    assert_eq!(family_stats.expense, 100.0 + 89.0);
}

#[test]
fn generate_pending_then_pay_settles_the_template() {
    let mut ledger = Ledger::new();
    let energy = RecurringExpense::new(
        "Energia - CPFL",
        150.0,
        18,
        "Contas de Consumo",
        PaymentMethodKind::Pix,
    );
    ledger.add_expense(energy.clone());
    let month = RefMonth::new(2024, 4);

    let pending = ExpenseService::generate_pending(&ledger.expenses, &ledger.transactions, month);
    assert_eq!(pending.len(), 1);
    TransactionService::post(&mut ledger, pending);

    let statuses = ExpenseService::status_for_month(&ledger.expenses, &ledger.transactions, month);
    assert!(statuses[0].is_pending && !statuses[0].is_paid);

    // A second sync must not duplicate the pending entry.
    let again = ExpenseService::generate_pending(&ledger.expenses, &ledger.transactions, month);
    assert!(again.is_empty());
}

#[test]
fn deleting_a_template_keeps_past_transactions() {
    let mut ledger = prepared_ledger();
    let expense_id = ledger.expenses[0].id;
    let before = ledger.transactions.len();
    assert!(ledger.remove_expense(expense_id));
    assert_eq!(ledger.transactions.len(), before);
    assert!(!ledger.remove_expense(expense_id));
}

#[test]
fn withdrawal_moves_profit_into_the_family_account() {
    let mut ledger = prepared_ledger();
    let source = ledger
        .accounts
        .iter()
        .find(|a| a.entity == Entity::BusinessA)
        .unwrap()
        .id;
    let target = ledger
        .accounts
        .iter()
        .find(|a| a.entity == Entity::Family)
        .unwrap()
        .id;
    let draft = caixa_core::core::services::WithdrawalDraft {
        source_account_id: source,
        target_account_id: target,
        value: 100.0,
        kind: caixa_core::core::services::WithdrawalKind::ProfitShare,
        date: date(2024, 3, 10),
    };
    let txn = TransactionService::owner_withdrawal(&ledger.accounts, &draft);
    assert_eq!(txn.status, PaymentStatus::Paid);
    TransactionService::post(&mut ledger, vec![txn]);

    assert_eq!(ledger.account(source).unwrap().balance, 70.0);
    assert_eq!(ledger.account(target).unwrap().balance, -89.0 + 100.0);
}
