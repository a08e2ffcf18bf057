//! PriceSeries — the validated input table as seen by the signal engine.

/// Name of the only column the signal engine consumes.
pub const CLOSE_COLUMN: &str = "close";

/// Ordered price observations loaded from a delimited file.
///
/// Only the `close` column is retained, as raw cell text. Parsing into numbers
/// is deferred to the signal engine so that a non-numeric close surfaces as a
/// processing failure rather than a load failure. Other columns (timestamp,
/// OHLC, volumes) are remembered by name only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSeries {
    columns: Vec<String>,
    close: Vec<String>,
}

impl PriceSeries {
    pub fn new(columns: Vec<String>, close: Vec<String>) -> Self {
        Self { columns, close }
    }

    /// Build a single-column series from numeric closes.
    pub fn from_closes(closes: &[f64]) -> Self {
        Self {
            columns: vec![CLOSE_COLUMN.to_string()],
            close: closes.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Raw `close` cells, one per row, in file order.
    pub fn close_cells(&self) -> &[String] {
        &self.close
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_closes_keeps_order_and_count() {
        let series = PriceSeries::from_closes(&[3.0, 1.5, 2.0]);
        assert_eq!(series.len(), 3);
        assert_eq!(series.close_cells(), &["3", "1.5", "2"]);
        assert!(series.has_column(CLOSE_COLUMN));
    }

    #[test]
    fn other_columns_are_remembered_by_name() {
        let series = PriceSeries::new(
            vec!["timestamp".into(), "open".into(), "close".into()],
            vec!["10".into()],
        );
        assert!(series.has_column("open"));
        assert!(!series.has_column("volume_usd"));
        assert_eq!(series.columns().len(), 3);
    }

    #[test]
    fn empty_series() {
        let series = PriceSeries::new(vec![CLOSE_COLUMN.into()], vec![]);
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
    }
}
