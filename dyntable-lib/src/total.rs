//! Page totals over exact decimals.
//!
//! Each value is floored to two places before it is added, and the sum is
//! exact. Totals only ever cover the top-level rows of the visible page.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use crate::column::Column;
use crate::error::DecimalError;
use crate::model::{Row, Value};
use crate::project::PreparedRow;

/// Decimal places kept for each term and for the rendered total.
pub const TOTAL_PLACES: u32 = 2;

/// Footer label shown in the first footer cell.
pub const TOTAL_LABEL: &str = "Total";

/// Arbitrary-precision decimal arithmetic used by the aggregator.
pub trait DecimalOps {
    /// The decimal type.
    type Decimal: Clone;

    /// Parses a decimal literal.
    fn parse(&self, input: &str) -> Result<Self::Decimal, DecimalError>;

    /// Returns zero.
    fn zero(&self) -> Self::Decimal;

    /// Exact addition.
    fn add(&self, a: &Self::Decimal, b: &Self::Decimal) -> Self::Decimal;

    /// Rounds toward negative infinity to `places` decimal places.
    fn round_floor(&self, value: &Self::Decimal, places: u32) -> Self::Decimal;

    /// Renders with exactly `places` decimal places.
    fn to_string(&self, value: &Self::Decimal, places: u32) -> String;
}

/// [`DecimalOps`] backed by `rust_decimal`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustDecimal;

impl DecimalOps for RustDecimal {
    type Decimal = Decimal;

    fn parse(&self, input: &str) -> Result<Decimal, DecimalError> {
        let trimmed = input.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| DecimalError::new(input))
    }

    fn zero(&self) -> Decimal {
        Decimal::ZERO
    }

    fn add(&self, a: &Decimal, b: &Decimal) -> Decimal {
        a + b
    }

    fn round_floor(&self, value: &Decimal, places: u32) -> Decimal {
        value.round_dp_with_strategy(places, RoundingStrategy::ToNegativeInfinity)
    }

    fn to_string(&self, value: &Decimal, places: u32) -> String {
        let mut rendered = *value;
        rendered.rescale(places);
        rendered.to_string()
    }
}

/// The value a column contributes to its total for one row.
///
/// A direct field lookup by column id wins; the column's accessor is the
/// fallback.
pub fn total_value(column: &Column, row: &Row) -> Value {
    match row.get_path(&column.id) {
        Some(value) if value.is_truthy() => value.clone(),
        _ => column.value(row),
    }
}

/// Sums a show-total column over the given page rows.
///
/// Returns `None` for columns that do not show a total. Absent, falsy and
/// unparsable values contribute nothing.
pub fn column_total<D: DecimalOps>(ops: &D, column: &Column, page_rows: &[PreparedRow]) -> Option<String> {
    if !column.show_total {
        return None;
    }

    let sum = page_rows.iter().fold(ops.zero(), |sum, row| {
        let value = total_value(column, &row.original);
        if !value.is_truthy() {
            return sum;
        }
        match ops.parse(&value.to_string()) {
            Ok(term) => ops.add(&sum, &ops.round_floor(&term, TOTAL_PLACES)),
            Err(e) => {
                log::debug!("skipping total term for column '{}': {}", column.id, e);
                sum
            }
        }
    });

    Some(column.format_total(&ops.to_string(&sum, TOTAL_PLACES)))
}

/// Totals for every column, in the given order.
pub fn page_totals<D: DecimalOps>(ops: &D, columns: &[&Column], page_rows: &[PreparedRow]) -> Vec<Option<String>> {
    columns
        .iter()
        .map(|column| column_total(ops, column, page_rows))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnSpec, normalize_columns};
    use crate::project::prepare_rows;

    fn rows(values: &[Value]) -> Vec<PreparedRow> {
        let data: Vec<Row> = values
            .iter()
            .map(|v| Row::new().set("amount", v.clone()))
            .collect();
        prepare_rows(&data, None)
    }

    fn amount_column() -> Column {
        normalize_columns(&[ColumnSpec::field("amount").show_total()]).remove(0)
    }

    #[test]
    fn test_floor_each_term_then_sum_exactly() {
        let page = rows(&[Value::from("100.005"), Value::from("200.004")]);
        assert_eq!(column_total(&RustDecimal, &amount_column(), &page), Some("300.00".into()));
    }

    #[test]
    fn test_no_float_drift() {
        let page = rows(&[Value::from(0.1), Value::from(0.2), Value::from("0.3")]);
        assert_eq!(column_total(&RustDecimal, &amount_column(), &page), Some("0.60".into()));
    }

    #[test]
    fn test_floor_rounds_negative_values_down() {
        let page = rows(&[Value::from("-1.001")]);
        assert_eq!(column_total(&RustDecimal, &amount_column(), &page), Some("-1.01".into()));
    }

    #[test]
    fn test_missing_and_invalid_values_contribute_nothing() {
        let page = rows(&[Value::Null, Value::from(""), Value::from("n/a"), Value::from(5i64)]);
        assert_eq!(column_total(&RustDecimal, &amount_column(), &page), Some("5.00".into()));
    }

    #[test]
    fn test_non_total_column_has_no_total() {
        let column = normalize_columns(&[ColumnSpec::field("amount")]).remove(0);
        assert_eq!(column_total(&RustDecimal, &column, &rows(&[Value::from(1i64)])), None);
    }

    #[test]
    fn test_total_formatter_applies() {
        let column = normalize_columns(&[ColumnSpec::field("amount")
            .show_total()
            .total_format(|total| format!("£{}", total))])
        .remove(0);
        let page = rows(&[Value::from("12.5")]);
        assert_eq!(column_total(&RustDecimal, &column, &page), Some("£12.50".into()));
    }

    #[test]
    fn test_computed_value_is_fallback() {
        let column = normalize_columns(&[ColumnSpec::computed("double", |row| {
            let amount = row.get("amount").and_then(Value::as_decimal).unwrap_or_default();
            Value::from(amount * Decimal::TWO)
        })
        .show_total()])
        .remove(0);
        let page = rows(&[Value::from("1.25"), Value::from("2")]);
        assert_eq!(column_total(&RustDecimal, &column, &page), Some("6.50".into()));
    }
}
