use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Account, Card, Client, RecurringExpense, Transaction};

/// In-memory aggregate of the five persisted collections. Records are
/// appended or removed whole; nothing is edited in place except the account
/// balance cache maintained by the posting step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub expenses: Vec<RecurringExpense>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    pub fn card(&self, id: Uuid) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn client(&self, id: Uuid) -> Option<&Client> {
        self.clients.iter().find(|client| client.id == id)
    }

    pub fn expense(&self, id: Uuid) -> Option<&RecurringExpense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        id
    }

    pub fn add_card(&mut self, card: Card) -> Uuid {
        let id = card.id;
        self.cards.push(card);
        self.touch();
        id
    }

    pub fn add_client(&mut self, client: Client) -> Uuid {
        let id = client.id;
        self.clients.push(client);
        self.touch();
        id
    }

    pub fn add_expense(&mut self, expense: RecurringExpense) -> Uuid {
        let id = expense.id;
        self.expenses.push(expense);
        self.touch();
        id
    }

    /// Removes a recurring-expense template. Past transactions generated from
    /// it are left untouched.
    pub fn remove_expense(&mut self, id: Uuid) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|expense| expense.id != id);
        let removed = self.expenses.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
