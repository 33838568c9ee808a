//! Per-category totals and their proportional layout for the breakdown chart.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{Category, Transaction};

/// Total spent per category. Always holds every category, in `Category::all()` order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Breakdown {
    totals: Vec<(Category, Decimal)>,
}

impl Breakdown {
    pub(crate) fn from_transactions(txns: &[Transaction]) -> Self {
        let mut totals: Vec<(Category, Decimal)> = Category::all()
            .iter()
            .map(|c| (*c, Decimal::ZERO))
            .collect();
        for txn in txns {
            let slot = &mut totals[txn.category.index()].1;
            *slot = slot.saturating_add(txn.amount);
        }
        Self { totals }
    }

    pub(crate) fn totals(&self) -> &[(Category, Decimal)] {
        &self.totals
    }

    pub(crate) fn total_for(&self, category: Category) -> Decimal {
        self.totals[category.index()].1
    }

    pub(crate) fn grand_total(&self) -> Decimal {
        self.totals
            .iter()
            .fold(Decimal::ZERO, |acc, (_, amt)| acc.saturating_add(*amt))
    }

    /// Share of the grand total per category, in percent. All zero when nothing is recorded.
    pub(crate) fn shares(&self) -> Vec<(Category, f64)> {
        let total = self.grand_total();
        self.totals
            .iter()
            .map(|(cat, amt)| {
                let share = if total.is_zero() {
                    0.0
                } else {
                    (*amt / total).to_f64().unwrap_or(0.0) * 100.0
                };
                (*cat, share)
            })
            .collect()
    }

    /// Split `width` cells between categories in proportion to their totals.
    ///
    /// Largest-remainder allocation: widths sum to exactly `width` whenever anything was
    /// spent, and a category with a zero total always gets zero cells.
    pub(crate) fn slice_widths(&self, width: u16) -> Vec<(Category, u16)> {
        let total = self.grand_total();
        if total.is_zero() || width == 0 {
            return self.totals.iter().map(|(cat, _)| (*cat, 0)).collect();
        }

        let cells = Decimal::from(width);
        let mut slices: Vec<(Category, u16, Decimal)> = self
            .totals
            .iter()
            .map(|(cat, amt)| {
                // The fraction is at most 1, so scaling by the width cannot overflow.
                let exact = (*amt / total) * cells;
                let floor = exact.floor();
                (*cat, floor.to_u16().unwrap_or(0), exact - floor)
            })
            .collect();

        let assigned: u16 = slices.iter().map(|(_, w, _)| *w).sum();
        let mut remaining = width.saturating_sub(assigned);

        let mut order: Vec<usize> = (0..slices.len()).collect();
        // Stable sort keeps category order as the tie-breaker.
        order.sort_by(|a, b| slices[*b].2.cmp(&slices[*a].2));
        for idx in order {
            if remaining == 0 {
                break;
            }
            if slices[idx].2.is_zero() {
                continue;
            }
            slices[idx].1 += 1;
            remaining -= 1;
        }

        slices.into_iter().map(|(cat, w, _)| (cat, w)).collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;

    fn txn(amount: Decimal, category: Category) -> Transaction {
        Transaction::new(
            amount,
            category,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_empty_breakdown_lists_every_category() {
        let b = Breakdown::from_transactions(&[]);
        let cats: Vec<Category> = b.totals().iter().map(|(c, _)| *c).collect();
        assert_eq!(cats, Category::all());
        assert!(b.totals().iter().all(|(_, amt)| amt.is_zero()));
        assert_eq!(b.grand_total(), Decimal::ZERO);
    }

    #[test]
    fn test_totals_per_category() {
        let txns = vec![
            txn(dec!(20), Category::Food),
            txn(dec!(5.50), Category::Food),
            txn(dec!(15), Category::Transport),
        ];
        let b = Breakdown::from_transactions(&txns);
        assert_eq!(b.total_for(Category::Food), dec!(25.50));
        assert_eq!(b.total_for(Category::Transport), dec!(15));
        assert_eq!(b.total_for(Category::Bills), dec!(0));
        assert_eq!(b.total_for(Category::Other), dec!(0));
    }

    #[test]
    fn test_totals_conserve_sum() {
        let txns = vec![
            txn(dec!(0.01), Category::Food),
            txn(dec!(99.99), Category::Bills),
            txn(dec!(12.35), Category::Other),
            txn(dec!(7), Category::Transport),
            txn(dec!(1.10), Category::Bills),
        ];
        let b = Breakdown::from_transactions(&txns);
        let sum: Decimal = txns.iter().map(|t| t.amount).sum();
        assert_eq!(b.grand_total(), sum);
    }

    #[test]
    fn test_shares() {
        let txns = vec![txn(dec!(75), Category::Food), txn(dec!(25), Category::Bills)];
        let shares = Breakdown::from_transactions(&txns).shares();
        assert_eq!(shares[0], (Category::Food, 75.0));
        assert_eq!(shares[1], (Category::Transport, 0.0));
        assert_eq!(shares[2], (Category::Bills, 25.0));
    }

    #[test]
    fn test_shares_empty_are_zero() {
        let shares = Breakdown::from_transactions(&[]).shares();
        assert!(shares.iter().all(|(_, s)| *s == 0.0));
    }

    #[test]
    fn test_slice_widths_sum_to_width() {
        let txns = vec![
            txn(dec!(1), Category::Food),
            txn(dec!(1), Category::Transport),
            txn(dec!(1), Category::Bills),
        ];
        let widths = Breakdown::from_transactions(&txns).slice_widths(10);
        let sum: u16 = widths.iter().map(|(_, w)| *w).sum();
        assert_eq!(sum, 10);
        assert_eq!(widths[3], (Category::Other, 0));
        // 3.33 each; the leftover cell goes to the first category
        assert_eq!(widths[0], (Category::Food, 4));
    }

    #[test]
    fn test_slice_widths_zero_total() {
        let widths = Breakdown::from_transactions(&[]).slice_widths(40);
        assert_eq!(widths.len(), 4);
        assert!(widths.iter().all(|(_, w)| *w == 0));
    }

    #[test]
    fn test_largest_amounts_sum_and_split() {
        let txns: Vec<Transaction> = Category::all()
            .iter()
            .cycle()
            .take(1_000)
            .map(|c| txn(crate::models::MAX_AMOUNT, *c))
            .collect();
        let b = Breakdown::from_transactions(&txns);
        assert_eq!(b.grand_total(), crate::models::MAX_AMOUNT * Decimal::from(1_000));
        let widths = b.slice_widths(40);
        assert!(widths.iter().all(|(_, w)| *w == 10));
    }

    #[test]
    fn test_totals_beyond_decimal_range_do_not_panic() {
        let half = Decimal::MAX / Decimal::TWO;
        let record = |id: &str, category: Category| Transaction {
            id: id.into(),
            amount: half,
            category,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        let txns = vec![record("a", Category::Food), record("b", Category::Bills)];
        let b = Breakdown::from_transactions(&txns);
        assert_eq!(b.grand_total(), Decimal::MAX);
        let widths = b.slice_widths(40);
        let sum: u16 = widths.iter().map(|(_, w)| *w).sum();
        assert_eq!(sum, 40);
        assert_eq!(widths[0], (Category::Food, 20));
        assert_eq!(widths[2], (Category::Bills, 20));
    }

    #[test]
    fn test_slice_widths_single_category_fills_strip() {
        let txns = vec![txn(dec!(3), Category::Other)];
        let widths = Breakdown::from_transactions(&txns).slice_widths(33);
        assert_eq!(widths[3], (Category::Other, 33));
    }
}
