use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::Transaction;

/// Write `txns` as CSV (`id,date,category,amount`) in table order. Returns the row count.
pub(crate) fn write_csv<W: Write>(txns: &[Transaction], out: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["id", "date", "category", "amount"])
        .context("Failed to write CSV header")?;
    for txn in txns {
        let date = txn.date.format("%Y-%m-%d").to_string();
        let amount = format!("{:.2}", txn.amount);
        wtr.write_record([
            txn.id.as_str(),
            date.as_str(),
            txn.category.as_str(),
            amount.as_str(),
        ])
        .context("Failed to write CSV record")?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(txns.len())
}

pub(crate) fn export_to_path(txns: &[Transaction], path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let count = write_csv(txns, file)?;
    tracing::info!(count, path = %path.display(), "exported transactions");
    Ok(count)
}

/// Expand a leading `~/` to the home directory.
pub(crate) fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = directories::BaseDirs::new()
            .map(|d| d.home_dir().display().to_string())
            .unwrap_or_else(|| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
