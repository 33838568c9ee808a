use anyhow::{Context, Result};

use crate::form::EntryForm;
use crate::ledger::Ledger;
use crate::models::{Currency, Transaction};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Form,
    Picker,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Form => write!(f, "ADD"),
            Self::Picker => write!(f, "CURRENCY"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: String, label: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    pub(crate) ledger: Ledger,
    pub(crate) form: EntryForm,
    pub(crate) currency: Currency,

    // Currency picker
    pub(crate) picker_query: String,
    pub(crate) picker_index: usize,

    // Transaction table
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(ledger: Ledger, currency: Currency) -> Self {
        Self {
            running: true,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            ledger,
            form: EntryForm::default(),
            currency,

            picker_query: String::new(),
            picker_index: 0,

            transaction_index: 0,
            transaction_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Restore the persisted session state.
    pub(crate) fn load(store: &Store) -> Self {
        Self::new(
            Ledger::new(store.load_transactions()),
            store.load_currency(),
        )
    }

    /// Submit the add-transaction form. Invalid input is ignored without feedback.
    pub(crate) fn submit_form(&mut self, store: &Store) -> Result<()> {
        match self.form.submit() {
            Ok(txn) => self.add_transaction(txn, store),
            Err(reason) => {
                tracing::debug!(%reason, "form submission ignored");
                Ok(())
            }
        }
    }

    pub(crate) fn add_transaction(&mut self, txn: Transaction, store: &Store) -> Result<()> {
        tracing::info!(id = %txn.id, amount = %txn.amount, category = %txn.category, "added transaction");
        self.ledger.prepend(txn);
        store
            .save_transactions(self.ledger.transactions())
            .context("Failed to save transactions")?;
        self.transaction_index = 0;
        self.transaction_scroll = 0;
        Ok(())
    }

    /// Remove a transaction by id. An unknown id changes nothing.
    pub(crate) fn delete_transaction(&mut self, id: &str, store: &Store) -> Result<usize> {
        let removed = self.ledger.remove(id);
        if removed == 0 {
            return Ok(0);
        }
        store
            .save_transactions(self.ledger.transactions())
            .context("Failed to save transactions")?;
        tracing::info!(%id, "deleted transaction");

        if self.transaction_index >= self.ledger.len() {
            self.transaction_index = self.ledger.len().saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
        Ok(removed)
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.ledger.get(self.transaction_index)
    }

    /// Ask for confirmation before deleting the row under the cursor.
    pub(crate) fn request_delete(&mut self) {
        let Some(txn) = self.selected_transaction() else {
            self.set_status("No transaction to delete");
            return;
        };
        let id = txn.id.clone();
        let label = format!(
            "{} {} {}",
            txn.date.format("%Y-%m-%d"),
            txn.category,
            self.currency.format(txn.amount)
        );
        self.confirm_message = format!("Delete {label}?");
        self.pending_action = Some(PendingAction::DeleteTransaction { id, label });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn open_picker(&mut self) {
        self.picker_query.clear();
        self.picker_index = Currency::search("")
            .iter()
            .position(|c| *c == self.currency)
            .unwrap_or(0);
        self.input_mode = InputMode::Picker;
    }

    pub(crate) fn picker_matches(&self) -> Vec<Currency> {
        Currency::search(&self.picker_query)
    }

    pub(crate) fn picker_move(&mut self, delta: i32) {
        let len = self.picker_matches().len();
        if len == 0 {
            self.picker_index = 0;
            return;
        }
        let next = (self.picker_index as i32 + delta).clamp(0, len as i32 - 1);
        self.picker_index = next as usize;
    }

    pub(crate) fn picker_confirm(&mut self, store: &Store) {
        if let Some(currency) = self.picker_matches().get(self.picker_index).copied() {
            self.select_currency(currency, store);
        }
    }

    /// Set the display currency and close the picker.
    pub(crate) fn select_currency(&mut self, currency: Currency, store: &Store) {
        self.currency = currency;
        self.picker_query.clear();
        self.picker_index = 0;
        self.input_mode = InputMode::Normal;
        if let Err(e) = store.save_currency(currency) {
            tracing::warn!(error = %e, "could not remember display currency");
        }
        tracing::info!(currency = %currency, "display currency changed");
        self.set_status(format!("Display currency: {} ({})", currency, currency.name()));
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod app_tests;
