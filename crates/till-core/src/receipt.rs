//! # Receipt Module
//!
//! Pure display math for the transaction reader: per-line tax breakdowns
//! and their aggregates.
//!
//! Unlike the recorder, which taxes the aggregate once, the reader
//! recomputes tax per line from each line's stored tax class and then
//! **sums the line values** - aggregates are never derived by re-rounding
//! an aggregate, so rounding error cannot compound.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{TaxRate, TransactionLine};

// =============================================================================
// Line Totals
// =============================================================================

/// One line of the reader's breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineTotals {
    /// Product name snapshot.
    pub name: String,

    /// Unit price snapshot, minor units.
    pub unit_price_cents: i64,

    /// Quantity purchased.
    pub quantity: i64,

    /// Rate resolved from the line's tax code.
    pub tax_rate: TaxRate,

    /// `floor(subtotal × rate)`, minor units.
    pub tax_cents: i64,

    /// Subtotal plus line tax, minor units.
    pub total_cents: i64,
}

// =============================================================================
// Transaction Totals
// =============================================================================

/// The reader's full output: ordered line breakdown plus aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionTotals {
    pub transaction_id: i64,

    /// Per-line breakdown in line_no order.
    pub lines: Vec<LineTotals>,

    /// Sum of line subtotals.
    pub total_excl_tax_cents: i64,

    /// Sum of line tax amounts.
    pub total_tax_cents: i64,

    /// `total_excl_tax + total_tax`.
    pub total_incl_tax_cents: i64,
}

// =============================================================================
// Tally
// =============================================================================

/// Computes the display breakdown for a transaction's lines.
///
/// For each line: `subtotal = unit_price × quantity`,
/// `tax = floor(subtotal × rate)`, `total = subtotal + tax`.
/// Aggregates are sums of the line values.
///
/// The caller supplies lines already joined to their tax rates, in
/// line_no order; this function preserves that order.
pub fn tally(transaction_id: i64, lines: &[(TransactionLine, TaxRate)]) -> TransactionTotals {
    let mut out_lines = Vec::with_capacity(lines.len());
    let mut total_excl_tax = Money::zero();
    let mut total_tax = Money::zero();

    for (line, rate) in lines {
        let subtotal = line.subtotal();
        let tax = subtotal.tax_truncated(*rate);

        out_lines.push(LineTotals {
            name: line.product_name.clone(),
            unit_price_cents: line.unit_price_cents,
            quantity: line.quantity,
            tax_rate: *rate,
            tax_cents: tax.cents(),
            total_cents: (subtotal + tax).cents(),
        });

        total_excl_tax += subtotal;
        total_tax += tax;
    }

    TransactionTotals {
        transaction_id,
        lines: out_lines,
        total_excl_tax_cents: total_excl_tax.cents(),
        total_tax_cents: total_tax.cents(),
        total_incl_tax_cents: (total_excl_tax + total_tax).cents(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(line_no: i64, name: &str, price: i64, qty: i64) -> TransactionLine {
        TransactionLine {
            transaction_id: 1,
            line_no,
            product_id: line_no,
            product_code: format!("490000000000{line_no}"),
            product_name: name.to_string(),
            unit_price_cents: price,
            quantity: qty,
            tax_code: "10".to_string(),
        }
    }

    #[test]
    fn test_tally_single_line() {
        let rate = TaxRate::from_bps(1000);
        let totals = tally(1, &[(line(1, "Green Tea 500ml", 100, 3), rate)]);

        assert_eq!(totals.transaction_id, 1);
        assert_eq!(totals.lines.len(), 1);
        assert_eq!(totals.lines[0].tax_cents, 30);
        assert_eq!(totals.lines[0].total_cents, 330);
        assert_eq!(totals.total_excl_tax_cents, 300);
        assert_eq!(totals.total_tax_cents, 30);
        assert_eq!(totals.total_incl_tax_cents, 330);
    }

    #[test]
    fn test_tally_truncates_per_line() {
        let rate = TaxRate::from_bps(1000);
        // 99 × 1 = 99 → tax floor(9.9) = 9 → total 108
        let totals = tally(2, &[(line(1, "Chocolate Bar", 99, 1), rate)]);

        assert_eq!(totals.lines[0].tax_cents, 9);
        assert_eq!(totals.lines[0].total_cents, 108);
        assert_eq!(totals.total_incl_tax_cents, 108);
    }

    #[test]
    fn test_tally_sums_line_values() {
        let rate = TaxRate::from_bps(1000);
        // Two lines of 99: line tax is 9 each, so the aggregate tax is 18,
        // not floor(198 × 0.10) = 19 - aggregates are sums of line values.
        let totals = tally(
            3,
            &[
                (line(1, "Chocolate Bar", 99, 1), rate),
                (line(2, "Chocolate Bar", 99, 1), rate),
            ],
        );

        assert_eq!(totals.total_excl_tax_cents, 198);
        assert_eq!(totals.total_tax_cents, 18);
        assert_eq!(totals.total_incl_tax_cents, 216);
    }

    #[test]
    fn test_tally_preserves_order() {
        let rate = TaxRate::from_bps(1000);
        let totals = tally(
            4,
            &[
                (line(1, "First", 100, 1), rate),
                (line(2, "Second", 200, 1), rate),
                (line(3, "Third", 300, 1), rate),
            ],
        );

        let names: Vec<_> = totals.lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_tally_empty() {
        let totals = tally(5, &[]);
        assert!(totals.lines.is_empty());
        assert_eq!(totals.total_incl_tax_cents, 0);
    }

    #[test]
    fn test_tally_is_deterministic() {
        let rate = TaxRate::from_bps(1000);
        let input = [(line(1, "Green Tea 500ml", 150, 2), rate)];
        assert_eq!(tally(6, &input), tally(6, &input));
    }
}
