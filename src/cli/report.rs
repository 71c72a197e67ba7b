//! Read-only report views over the stored ledger: a terminal rendition of
//! the dashboard, wallet, and family-management screens.

use std::env;
use std::path::PathBuf;

use chrono::Local;
use colored::Colorize;

use crate::config::ConfigManager;
use crate::core::services::{
    AccountService, CardService, ExpenseService, SummaryService,
};
use crate::errors::CaixaError;
use crate::fiscal::RefMonth;
use crate::ledger::Ledger;
use crate::storage::JsonStore;

const USAGE: &str = "usage: caixa_cli [dashboard|wallet|family] [--month YYYY-MM] [--data-dir PATH]";

enum View {
    Dashboard,
    Wallet,
    Family,
}

struct Options {
    view: View,
    month: RefMonth,
    data_dir: Option<PathBuf>,
}

/// Entry point for the `caixa_cli` binary.
pub fn run_cli() -> Result<(), CaixaError> {
    let options = parse_args(env::args().skip(1))?;
    let data_dir = match options.data_dir.clone() {
        Some(dir) => Some(dir),
        None => ConfigManager::new()?.load()?.data_dir,
    };
    let store = JsonStore::new(data_dir)?;
    let ledger = store.load_ledger()?;

    match options.view {
        View::Dashboard => render_dashboard(&ledger, options.month),
        View::Wallet => render_wallet(&ledger, options.month),
        View::Family => render_family(&ledger, options.month),
    }
    Ok(())
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Options, CaixaError> {
    let mut options = Options {
        view: View::Dashboard,
        month: RefMonth::for_date(Local::now().date_naive()),
        data_dir: None,
    };
    let mut args = args.peekable();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "dashboard" => options.view = View::Dashboard,
            "wallet" => options.view = View::Wallet,
            "family" => options.view = View::Family,
            "--month" => {
                let value = args
                    .next()
                    .ok_or_else(|| CaixaError::InvalidRef("--month needs a value".into()))?;
                options.month = value.parse().map_err(CaixaError::InvalidRef)?;
            }
            "--data-dir" => {
                let value = args
                    .next()
                    .ok_or_else(|| CaixaError::InvalidRef("--data-dir needs a value".into()))?;
                options.data_dir = Some(PathBuf::from(value));
            }
            other => {
                return Err(CaixaError::InvalidRef(format!(
                    "unknown argument `{other}`\n{USAGE}"
                )))
            }
        }
    }
    Ok(options)
}

fn render_dashboard(ledger: &Ledger, month: RefMonth) {
    println!("{}  {}", month.label().bold(), "(ciclo 16 a 15)".dimmed());
    let stats = SummaryService::period_stats(&ledger.transactions, month);
    println!("  {}  {}", "Entradas".green(), format_brl(stats.income));
    println!("  {}   {}", "Saídas".red(), format_brl(stats.expense));
    let balance = format_brl(stats.balance);
    let balance = if stats.balance >= 0.0 {
        balance.green()
    } else {
        balance.red()
    };
    println!("  {}    {}", "Saldo".bold(), balance);

    let categories = SummaryService::expenses_by_category(&ledger.transactions, month);
    if !categories.is_empty() {
        println!("\n{}", "Despesas por categoria".bold());
        for slice in &categories {
            println!("  {:<24} {}", slice.label, format_brl(slice.total));
        }
    }

    let year = month.year();
    let investments = SummaryService::investments_for_year(&ledger.transactions, year);
    if !investments.is_empty() {
        let total: f64 = investments.iter().map(|slice| slice.total).sum();
        println!(
            "\n{} {}  {}",
            "Investimentos".bold(),
            year,
            format_brl(total).yellow()
        );
        for slice in &investments {
            println!("  {:<24} {}", slice.label, format_brl(slice.total));
        }
    }
}

fn render_wallet(ledger: &Ledger, month: RefMonth) {
    println!("{}", "Contas".bold());
    for account in &ledger.accounts {
        println!("  {:<36} {}", account.name, format_brl(account.balance));
    }
    println!(
        "  {:<36} {}",
        "Total".bold(),
        format_brl(AccountService::total_balance(&ledger.accounts)).bold()
    );

    if !ledger.cards.is_empty() {
        println!("\n{}  {}", "Cartões".bold(), month.label().dimmed());
        for card in &ledger.cards {
            let invoice = CardService::invoice(&ledger.transactions, card.id, month);
            let usage = invoice.utilization(card.limit) * 100.0;
            println!(
                "  {:<32} fatura {}  ({}% do limite, parcelado {})",
                card.name,
                format_brl(invoice.total),
                usage.round() as i64,
                format_brl(invoice.installment_portion)
            );
        }
    }
}

fn render_family(ledger: &Ledger, month: RefMonth) {
    println!("{}  {}", "Gestão Familiar".bold(), month.label().dimmed());
    let statuses =
        ExpenseService::status_for_month(&ledger.expenses, &ledger.transactions, month);
    for (expense, status) in ledger.expenses.iter().zip(&statuses) {
        let state = if status.is_paid {
            "pago".green()
        } else if status.is_pending {
            "pendente".yellow()
        } else {
            "aberto".dimmed()
        };
        println!(
            "  dia {:>2}  {:<32} {}  {}",
            expense.due_day,
            expense.name,
            format_brl(expense.value),
            state
        );
    }
    let totals = ExpenseService::fixed_totals(&ledger.expenses, &statuses);
    let variable = ExpenseService::variable_total(&ledger.transactions, month);
    println!(
        "\n  Orçamento fixo {}  pago {}  variável {}",
        format_brl(totals.budget),
        format_brl(totals.paid),
        format_brl(variable)
    );
}

/// Formats a value as Brazilian currency, e.g. `R$ 1.234,56`.
fn format_brl(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;
    let mut digits = whole.to_string();
    let mut grouped = String::new();
    while digits.len() > 3 {
        let tail = digits.split_off(digits.len() - 3);
        grouped = format!(".{tail}{grouped}");
    }
    grouped = format!("{digits}{grouped}");
    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac:02}")
}
