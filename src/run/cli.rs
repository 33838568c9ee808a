use anyhow::{Context, Result};
use clap::Subcommand;
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::form::build_transaction;
use crate::ledger::Ledger;
use crate::models::{Category, Currency};
use crate::store::Store;

#[derive(Debug, Subcommand)]
pub(crate) enum CliCommand {
    /// Record an expense
    Add {
        /// Amount, e.g. 12.50
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// One of Food, Transport, Bills, Other
        category: String,
        /// Date as YYYY-MM-DD
        date: String,
    },
    /// List transactions, newest first
    List,
    /// Delete a transaction by id
    Delete { id: String },
    /// Print totals per category
    Summary,
    /// Export transactions to CSV
    Export {
        /// Output file (default: ~/coinkeeper-export.csv)
        path: Option<String>,
    },
    /// List supported display currencies
    Currencies,
}

pub(crate) fn as_cli(command: CliCommand, store: &Store, currency: Currency) -> Result<()> {
    match command {
        CliCommand::Add {
            amount,
            category,
            date,
        } => cli_add(&amount, &category, &date, store, currency),
        CliCommand::List => cli_list(store, currency),
        CliCommand::Delete { id } => cli_delete(&id, store),
        CliCommand::Summary => cli_summary(store, currency),
        CliCommand::Export { path } => cli_export(path.as_deref(), store),
        CliCommand::Currencies => cli_currencies(currency),
    }
}

fn cli_add(
    amount: &str,
    category: &str,
    date: &str,
    store: &Store,
    currency: Currency,
) -> Result<()> {
    let names: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
    let category = Category::parse(category).ok_or_else(|| {
        anyhow::anyhow!("Unknown category '{category}'. Use one of: {}", names.join(", "))
    })?;
    let txn = build_transaction(amount, category, date).context("Transaction not added")?;

    let mut ledger = Ledger::new(store.load_transactions());
    let shown = currency.format(txn.amount);
    let id = txn.id.clone();
    tracing::info!(%id, amount = %txn.amount, %category, "added transaction");
    ledger.prepend(txn);
    store
        .save_transactions(ledger.transactions())
        .context("Failed to save transactions")?;

    println!("Added {shown} to {category} ({id})");
    Ok(())
}

fn cli_list(store: &Store, currency: Currency) -> Result<()> {
    let ledger = Ledger::new(store.load_transactions());
    if ledger.is_empty() {
        println!("No transactions yet.");
        return Ok(());
    }

    println!("{:<36}  {:<10}  {:<10}  {:>14}", "ID", "Date", "Category", "Amount");
    println!("{}", "─".repeat(76));
    for txn in ledger.transactions() {
        println!(
            "{:<36}  {:<10}  {:<10}  {:>14}",
            txn.id,
            txn.date.format("%Y-%m-%d").to_string(),
            txn.category.as_str(),
            currency.format(txn.amount),
        );
    }
    Ok(())
}

fn cli_delete(id: &str, store: &Store) -> Result<()> {
    let mut ledger = Ledger::new(store.load_transactions());
    if ledger.remove(id) == 0 {
        println!("No transaction with id {id}");
        return Ok(());
    }
    store
        .save_transactions(ledger.transactions())
        .context("Failed to save transactions")?;
    tracing::info!(%id, "deleted transaction");
    println!("Deleted {id}");
    Ok(())
}

fn cli_summary(store: &Store, currency: Currency) -> Result<()> {
    let ledger = Ledger::new(store.load_transactions());
    let breakdown = ledger.breakdown();

    println!("CoinKeeper ({currency})");
    println!("{}", "─".repeat(40));
    for ((cat, total), (_, share)) in breakdown.totals().iter().zip(breakdown.shares()) {
        println!(
            "  {:<12} {:>16} {share:>6.1}%",
            cat.as_str(),
            currency.format(*total)
        );
    }
    println!("{}", "─".repeat(40));
    println!(
        "  {:<12} {:>16}",
        "Total",
        currency.format(breakdown.grand_total())
    );
    println!("  {} transactions", ledger.len());
    Ok(())
}

fn cli_export(path: Option<&str>, store: &Store) -> Result<()> {
    let path = path
        .map(|p| PathBuf::from(crate::export::expand_home(p)))
        .unwrap_or_else(crate::ui::commands::default_export_path);

    let txns = store.load_transactions();
    let count = crate::export::export_to_path(&txns, &path)?;
    println!("Exported {count} transactions to {}", path.display());
    Ok(())
}

fn cli_currencies(active: Currency) -> Result<()> {
    let sample = Decimal::new(1_234_567, 2);
    let print = |c: &Currency| {
        let mark = if *c == active { "*" } else { " " };
        println!(
            " {mark} {:<4} {:<28} {}",
            c.code(),
            c.name(),
            c.format(sample)
        );
    };

    println!("Top currencies:");
    Currency::top().iter().for_each(&print);
    println!();
    println!("All currencies:");
    Currency::all()
        .iter()
        .filter(|c| !c.is_top())
        .for_each(&print);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_cli_add_persists_newest_first() {
        let store = Store::open_in_memory().unwrap();
        cli_add("10", "food", "2024-01-01", &store, Currency::Usd).unwrap();
        cli_add("2.345", "Bills", "2024-01-02", &store, Currency::Eur).unwrap();

        let txns = store.load_transactions();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].amount, dec!(2.35));
        assert_eq!(txns[0].category, Category::Bills);
        assert_eq!(txns[1].category, Category::Food);
    }

    #[test]
    fn test_cli_add_rejects_bad_input() {
        let store = Store::open_in_memory().unwrap();
        assert!(cli_add("0", "Food", "2024-01-01", &store, Currency::Usd).is_err());
        assert!(cli_add("5", "Travel", "2024-01-01", &store, Currency::Usd).is_err());
        assert!(cli_add("5", "Food", "", &store, Currency::Usd).is_err());
        assert!(store.load_transactions().is_empty());
    }

    #[test]
    fn test_cli_delete() {
        let store = Store::open_in_memory().unwrap();
        cli_add("10", "Other", "2024-01-01", &store, Currency::Usd).unwrap();
        let id = store.load_transactions()[0].id.clone();

        cli_delete("not-an-id", &store).unwrap();
        assert_eq!(store.load_transactions().len(), 1);

        cli_delete(&id, &store).unwrap();
        assert!(store.load_transactions().is_empty());
    }

    #[test]
    fn test_cli_export_writes_file() {
        let store = Store::open_in_memory().unwrap();
        cli_add("10", "Other", "2024-01-01", &store, Currency::Usd).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        cli_export(path.to_str(), &store).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Other,10.00"));
    }
}
