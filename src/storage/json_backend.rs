use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    ledger::{Account, Card, Client, Ledger, RecurringExpense, Transaction},
    utils::{app_data_dir, ensure_dir},
};

use super::Result;

const TRANSACTIONS_FILE: &str = "transactions.json";
const ACCOUNTS_FILE: &str = "accounts.json";
const CARDS_FILE: &str = "cards.json";
const CLIENTS_FILE: &str = "clients.json";
const EXPENSES_FILE: &str = "expenses.json";
const TMP_SUFFIX: &str = "tmp";

/// File-backed store for the five ledger collections. Each collection is the
/// direct serialization of its in-memory vector; a missing file loads as an
/// empty collection, so there is no migration step.
#[derive(Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads the whole aggregate, treating each missing file as empty.
    pub fn load_ledger(&self) -> Result<Ledger> {
        Ok(Ledger {
            accounts: self.read_collection::<Account>(ACCOUNTS_FILE)?,
            cards: self.read_collection::<Card>(CARDS_FILE)?,
            clients: self.read_collection::<Client>(CLIENTS_FILE)?,
            expenses: self.read_collection::<RecurringExpense>(EXPENSES_FILE)?,
            transactions: self.read_collection::<Transaction>(TRANSACTIONS_FILE)?,
            updated_at: None,
        })
    }

    /// Persists every collection. Writes are staged to a `.tmp` sibling and
    /// renamed into place, so a crash never leaves a half-written file.
    pub fn save_ledger(&self, ledger: &Ledger) -> Result<()> {
        self.write_collection(ACCOUNTS_FILE, &ledger.accounts)?;
        self.write_collection(CARDS_FILE, &ledger.cards)?;
        self.write_collection(CLIENTS_FILE, &ledger.clients)?;
        self.write_collection(EXPENSES_FILE, &ledger.expenses)?;
        self.write_collection(TRANSACTIONS_FILE, &ledger.transactions)?;
        tracing::debug!(root = %self.root.display(), "ledger saved");
        Ok(())
    }

    fn read_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.root.join(file);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn write_collection<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        let path = self.root.join(file);
        let json = serde_json::to_string_pretty(items)?;
        write_atomic(&path, &json)?;
        Ok(())
    }
}

fn write_atomic(path: &Path, data: &str) -> std::io::Result<()> {
    let tmp = path.with_extension(TMP_SUFFIX);
    fs::write(&tmp, data)?;
    fs::rename(tmp, path)?;
    Ok(())
}
