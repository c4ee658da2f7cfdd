//! Reduce a scenario table to one sorted value per scenario.

use std::cmp::Ordering;

use hc_core::{round_to, Real};
use serde::Serialize;

use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Order {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub label: String,
    pub value: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub title: String,
    pub order: Order,
    /// Decimal places kept after summation.
    pub precision: u32,
}

impl Ranking {
    pub fn new(title: impl Into<String>, order: Order, precision: u32) -> Self {
        Self {
            title: title.into(),
            order,
            precision,
        }
    }

    /// Rank the rows of `table` by the sum of their numeric cells.
    pub fn rank(&self, table: &Table) -> Vec<RankedEntry> {
        let mut entries: Vec<RankedEntry> = table
            .row_sums()
            .into_iter()
            .map(|(label, value)| RankedEntry {
                label,
                value: round_to(value, self.precision),
            })
            .collect();
        entries.sort_by(|a, b| {
            let ord = a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal);
            match self.order {
                Order::Ascending => ord,
                Order::Descending => ord.reverse(),
            }
        });
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    fn table() -> Table {
        let mut t = Table::new("LCOE", vec!["Investment".into(), "Gas".into()]);
        t.push_row("Gas #1", vec![Cell::Number(0.031), Cell::Number(0.0744)]);
        t.push_row("Oil #2", vec![Cell::Number(0.02), Cell::Number(0.09)]);
        t.push_row("PV_Heatpump #3", vec![Cell::Number(0.1049), Cell::Empty]);
        t
    }

    #[test]
    fn ascending_sums_and_rounds() {
        let ranked = Ranking::new("Wärmekosten", Order::Ascending, 2).rank(&table());
        let labels: Vec<_> = ranked.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["PV_Heatpump #3", "Gas #1", "Oil #2"]);
        assert_eq!(ranked[0].value, 0.1);
        assert_eq!(ranked[2].value, 0.11);
    }

    #[test]
    fn descending_reverses() {
        let ranked = Ranking::new("CO2", Order::Descending, 3).rank(&table());
        assert_eq!(ranked[0].label, "Oil #2");
        assert_eq!(ranked[0].value, 0.11);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn ranking_is_sorted(values in prop::collection::vec(0.0f64..1e6, 1..12)) {
                let mut t = Table::new("t", vec!["v".into()]);
                for (i, v) in values.iter().enumerate() {
                    t.push_row(format!("s{i}"), vec![Cell::Number(*v)]);
                }
                let ranked = Ranking::new("t", Order::Descending, 2).rank(&t);
                prop_assert_eq!(ranked.len(), values.len());
                for pair in ranked.windows(2) {
                    prop_assert!(pair[0].value >= pair[1].value);
                }
            }
        }
    }
}
