mod category;
mod currency;
mod transaction;

pub use category::Category;
pub use currency::Currency;
pub use transaction::{round_cents, Transaction, MAX_AMOUNT};
