use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::Category;

/// A single recorded expense. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(with = "stored_amount")]
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
}

impl Transaction {
    /// Build a record with a fresh random id. `amount` is rounded to cents.
    pub fn new(amount: Decimal, category: Category, date: NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            amount: round_cents(amount),
            category,
            date,
        }
    }
}

/// Largest accepted amount. Anything at or below it survives the JSON number round trip
/// exactly, and any realistic number of records can be summed without overflow.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2); // 999_999_999_999.99

/// Round to two fraction digits, half away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Amounts are persisted as plain JSON numbers and must stay positive.
mod stored_amount {
    use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
    use rust_decimal::Decimal;
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &Decimal, s: S) -> Result<S::Ok, S::Error> {
        let n = value
            .to_f64()
            .ok_or_else(|| S::Error::custom(format!("amount {value} is out of range")))?;
        s.serialize_f64(n)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
        let raw = f64::deserialize(d)?;
        let value = Decimal::from_f64(raw)
            .map(super::round_cents)
            .ok_or_else(|| D::Error::custom(format!("amount {raw} is not a finite decimal")))?;
        if value <= Decimal::ZERO {
            return Err(D::Error::custom(format!("amount {value} must be positive")));
        }
        if value > super::MAX_AMOUNT {
            return Err(D::Error::custom(format!("amount {value} is too large")));
        }
        Ok(value)
    }
}
