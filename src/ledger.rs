use crate::models::Transaction;
use crate::summary::Breakdown;

/// The in-memory transaction list for a session, newest first, with its breakdown kept in
/// step. Persisting is the caller's job.
#[derive(Debug, Clone)]
pub(crate) struct Ledger {
    transactions: Vec<Transaction>,
    breakdown: Breakdown,
}

impl Ledger {
    pub(crate) fn new(transactions: Vec<Transaction>) -> Self {
        let breakdown = Breakdown::from_transactions(&transactions);
        Self {
            transactions,
            breakdown,
        }
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn breakdown(&self) -> &Breakdown {
        &self.breakdown
    }

    pub(crate) fn len(&self) -> usize {
        self.transactions.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    pub(crate) fn prepend(&mut self, txn: Transaction) {
        self.transactions.insert(0, txn);
        self.recompute();
    }

    /// Drop every record with this id. Returns how many were removed.
    pub(crate) fn remove(&mut self, id: &str) -> usize {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        let removed = before - self.transactions.len();
        if removed > 0 {
            self.recompute();
        }
        removed
    }

    fn recompute(&mut self) {
        self.breakdown = Breakdown::from_transactions(&self.transactions);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::Category;

    fn txn(amount: Decimal, category: Category, date: &str) -> Transaction {
        Transaction::new(
            amount,
            category,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        )
    }

    #[test]
    fn test_prepend_puts_newest_first() {
        let mut ledger = Ledger::new(Vec::new());
        let first = txn(dec!(1), Category::Food, "2024-01-01");
        let second = txn(dec!(2), Category::Bills, "2024-01-02");
        ledger.prepend(first.clone());
        ledger.prepend(second.clone());
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.transactions()[0], second);
        assert_eq!(ledger.transactions()[1], first);
    }

    #[test]
    fn test_prepend_updates_breakdown() {
        let mut ledger = Ledger::new(Vec::new());
        ledger.prepend(txn(dec!(4.20), Category::Other, "2024-01-01"));
        assert_eq!(ledger.breakdown().total_for(Category::Other), dec!(4.20));
    }

    #[test]
    fn test_remove_only_matching_record() {
        let a = txn(dec!(1), Category::Food, "2024-01-01");
        let b = txn(dec!(2), Category::Food, "2024-01-02");
        let c = txn(dec!(3), Category::Food, "2024-01-03");
        let mut ledger = Ledger::new(vec![c.clone(), b.clone(), a.clone()]);
        assert_eq!(ledger.remove(&b.id), 1);
        assert_eq!(ledger.transactions(), &[c, a][..]);
        assert_eq!(ledger.breakdown().total_for(Category::Food), dec!(4));
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let a = txn(dec!(1), Category::Food, "2024-01-01");
        let mut ledger = Ledger::new(vec![a.clone()]);
        assert_eq!(ledger.remove("missing"), 0);
        assert_eq!(ledger.transactions(), &[a][..]);
    }

    #[test]
    fn test_add_then_delete_scenario() {
        let mut ledger = Ledger::new(Vec::new());
        let food = txn(dec!(20), Category::Food, "2024-01-01");
        let transport = txn(dec!(15), Category::Transport, "2024-01-02");
        ledger.prepend(food.clone());
        ledger.prepend(transport);

        assert_eq!(ledger.len(), 2);
        let b = ledger.breakdown();
        assert_eq!(b.total_for(Category::Food), dec!(20));
        assert_eq!(b.total_for(Category::Transport), dec!(15));
        assert_eq!(b.total_for(Category::Bills), dec!(0));
        assert_eq!(b.total_for(Category::Other), dec!(0));

        ledger.remove(&food.id);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.breakdown().total_for(Category::Food), dec!(0));
        assert_eq!(ledger.breakdown().total_for(Category::Transport), dec!(15));
    }
}
