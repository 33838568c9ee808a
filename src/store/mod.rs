mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::models::{Currency, Transaction};

pub(crate) const TRANSACTIONS_KEY: &str = "coinkeeper:transactions";
pub(crate) const CURRENCY_KEY: &str = "coinkeeper:currency";

#[derive(Debug, thiserror::Error)]
pub(crate) enum StoreError {
    #[error("storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Synchronous string key-value storage on top of a single SQLite table.
pub(crate) struct Slots {
    conn: Connection,
}

impl Slots {
    fn from_connection(conn: Connection) -> std::result::Result<Self, StoreError> {
        conn.execute_batch(schema::SCHEMA)?;
        Ok(Self { conn })
    }

    pub(crate) fn get(&self, key: &str) -> std::result::Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub(crate) fn set(&self, key: &str, value: &str) -> std::result::Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Persisted mirror of the transaction list and the display currency.
pub(crate) struct Store {
    slots: Slots,
}

impl Store {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let slots = Slots::from_connection(conn).context("Failed to create slot table")?;
        Ok(Self { slots })
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            slots: Slots::from_connection(conn)?,
        })
    }

    #[cfg(test)]
    pub(crate) fn slots(&self) -> &Slots {
        &self.slots
    }

    /// Read the persisted list. Anything unreadable yields an empty list.
    pub(crate) fn load_transactions(&self) -> Vec<Transaction> {
        let raw = match self.slots.get(TRANSACTIONS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read transactions, starting empty");
                return Vec::new();
            }
        };

        match decode_transactions(&raw) {
            Ok(txns) => {
                tracing::info!(count = txns.len(), "loaded transactions");
                txns
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable transactions");
                Vec::new()
            }
        }
    }

    /// Overwrite the persisted list with `txns`.
    pub(crate) fn save_transactions(
        &self,
        txns: &[Transaction],
    ) -> std::result::Result<(), StoreError> {
        let payload = serde_json::to_string(txns)?;
        self.slots.set(TRANSACTIONS_KEY, &payload)?;
        tracing::debug!(count = txns.len(), bytes = payload.len(), "saved transactions");
        Ok(())
    }

    pub(crate) fn load_currency(&self) -> Currency {
        match self.slots.get(CURRENCY_KEY) {
            Ok(Some(code)) => Currency::parse(&code).unwrap_or_default(),
            Ok(None) => Currency::default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read display currency");
                Currency::default()
            }
        }
    }

    pub(crate) fn save_currency(&self, currency: Currency) -> std::result::Result<(), StoreError> {
        self.slots.set(CURRENCY_KEY, currency.code())
    }
}

pub(crate) fn decode_transactions(raw: &str) -> std::result::Result<Vec<Transaction>, StoreError> {
    Ok(serde_json::from_str(raw)?)
}
