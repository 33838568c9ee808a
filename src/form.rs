use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{round_cents, Category, Transaction, MAX_AMOUNT};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum EntryError {
    #[error("amount '{0}' is not a number")]
    InvalidAmount(String),
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("amount must not exceed {}", MAX_AMOUNT)]
    AmountTooLarge,
    #[error("date is required")]
    MissingDate,
    #[error("date '{0}' is not a valid YYYY-MM-DD date")]
    InvalidDate(String),
}

/// Parse user-entered amount text into a positive amount rounded to cents.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, EntryError> {
    let trimmed = raw.trim();
    let parsed = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| EntryError::InvalidAmount(trimmed.to_string()))?;
    let amount = round_cents(parsed);
    if amount <= Decimal::ZERO {
        return Err(EntryError::NonPositiveAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(EntryError::AmountTooLarge);
    }
    Ok(amount)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, EntryError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EntryError::MissingDate);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| EntryError::InvalidDate(trimmed.to_string()))
}

/// Validate the raw fields and build a new record.
pub(crate) fn build_transaction(
    amount: &str,
    category: Category,
    date: &str,
) -> Result<Transaction, EntryError> {
    let amount = parse_amount(amount)?;
    let date = parse_date(date)?;
    Ok(Transaction::new(amount, category, date))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Amount,
    Category,
    Date,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[Self::Amount, Self::Category, Self::Date]
    }

    fn step(&self, delta: i32) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| f == self).unwrap_or(0) as i32;
        all[(idx + delta).rem_euclid(all.len() as i32) as usize]
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Amount => write!(f, "Amount"),
            Self::Category => write!(f, "Category"),
            Self::Date => write!(f, "Date"),
        }
    }
}

/// The add-transaction form.
#[derive(Debug, Clone)]
pub(crate) struct EntryForm {
    pub(crate) amount: String,
    pub(crate) category: Category,
    pub(crate) date: String,
    pub(crate) focus: FormField,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self {
            amount: String::new(),
            category: Category::Food,
            date: String::new(),
            focus: FormField::Amount,
        }
    }
}

impl EntryForm {
    pub(crate) fn focus_next(&mut self) {
        self.focus = self.focus.step(1);
    }

    pub(crate) fn focus_prev(&mut self) {
        self.focus = self.focus.step(-1);
    }

    pub(crate) fn cycle_category(&mut self, delta: i32) {
        self.category = self.category.cycle(delta);
    }

    pub(crate) fn push_char(&mut self, c: char) {
        match self.focus {
            FormField::Amount => self.amount.push(c),
            FormField::Date => self.date.push(c),
            FormField::Category => {
                // Typing a category's initial selects it.
                if let Some(cat) = Category::all()
                    .iter()
                    .find(|cat| cat.as_str().starts_with(c.to_ascii_uppercase()))
                {
                    self.category = *cat;
                }
            }
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.focus {
            FormField::Amount => {
                self.amount.pop();
            }
            FormField::Date => {
                self.date.pop();
            }
            FormField::Category => {}
        }
    }

    pub(crate) fn fill_date(&mut self, date: NaiveDate) {
        self.date = date.format("%Y-%m-%d").to_string();
    }

    /// Try to turn the current fields into a record. On success the amount and date are
    /// cleared while the category stays selected; on failure nothing changes.
    pub(crate) fn submit(&mut self) -> Result<Transaction, EntryError> {
        let txn = build_transaction(&self.amount, self.category, &self.date)?;
        self.amount.clear();
        self.date.clear();
        Ok(txn)
    }
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod form_tests;
