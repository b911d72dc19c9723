use crate::selection::{AgeGroup, Drug, Selection, Year};
use source::DataRow;

use std::collections::BTreeSet;

pub fn rate_column(drug: Drug, age: AgeGroup) -> String {
    format!("Rates.{}.{}", drug.measure(), age)
}

pub fn totals_column(drug: Drug, age: AgeGroup) -> String {
    format!("Totals.{}.{}", drug.measure(), age)
}

pub fn population_column(age: AgeGroup) -> String {
    format!("Population.{age}")
}

/// The survey table. Rows are looked up by linear scan, the way they arrive.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<DataRow>,
}

impl Dataset {
    pub fn new(rows: Vec<DataRow>) -> Self {
        Self { rows }
    }

    pub fn find(&self, state: &str, year: &Year) -> Option<&DataRow> {
        self.rows
            .iter()
            .find(|row| row.state == state && row.year == year.as_str())
    }

    pub fn has_state(&self, state: &str) -> bool {
        self.rows.iter().any(|row| row.state == state)
    }

    /// Distinct years, sorted.
    pub fn years(&self) -> Vec<Year> {
        self.rows
            .iter()
            .map(|row| row.year.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(Year::new)
            .collect()
    }

    pub fn rate_in(row: &DataRow, selection: &Selection) -> Option<f64> {
        row.number(&rate_column(selection.drug, selection.age_group))
    }
}
