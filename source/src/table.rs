use crate::SourceError;

use rustc_hash::FxHashMap;

pub const STATE_COLUMN: &str = "State";
pub const YEAR_COLUMN: &str = "Year";

/// One survey row: a (state, year) pair plus every other column by header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataRow {
    pub state: String,
    pub year: String,
    fields: FxHashMap<String, String>,
}

impl DataRow {
    pub fn new(state: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            year: year.into(),
            fields: FxHashMap::default(),
        }
    }

    pub fn with_field(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Numeric value of a column. Missing, empty, non-numeric and non-finite
    /// cells are all `None`.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<DataRow>,
}

impl Table {
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, SourceError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        let state_idx = headers
            .iter()
            .position(|h| h == STATE_COLUMN)
            .ok_or(SourceError::MissingColumn(STATE_COLUMN))?;
        let year_idx = headers
            .iter()
            .position(|h| h == YEAR_COLUMN)
            .ok_or(SourceError::MissingColumn(YEAR_COLUMN))?;

        let mut rows = Vec::new();
        for (line, record) in rdr.records().enumerate() {
            let record = record?;

            let (Some(state), Some(year)) = (record.get(state_idx), record.get(year_idx)) else {
                log::warn!("Skipping short table row {}", line + 2);
                continue;
            };

            let mut row = DataRow::new(state.trim(), year.trim());
            for (idx, value) in record.iter().enumerate() {
                if idx == state_idx || idx == year_idx {
                    continue;
                }
                if let Some(header) = headers.get(idx) {
                    row.fields.insert(header.clone(), value.to_string());
                }
            }
            rows.push(row);
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<DataRow> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
State,Year,Population.12-17,Rates.Alcohol.Use Past Month.12-17,Totals.Alcohol.Use Past Month.12-17
Texas,2002,1900000,9.5,180500
Ohio,2002,900000,,
Ohio,2003,910000,n/a,1000
";

    #[test]
    fn parses_rows_and_fields() {
        let table = Table::from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(table.rows().len(), 3);

        let texas = &table.rows()[0];
        assert_eq!(texas.state, "Texas");
        assert_eq!(texas.year, "2002");
        assert_eq!(texas.number("Rates.Alcohol.Use Past Month.12-17"), Some(9.5));
        assert_eq!(texas.number("Population.12-17"), Some(1_900_000.0));
        assert_eq!(texas.get("State"), None);
    }

    #[test]
    fn blank_and_garbage_cells_are_not_numbers() {
        let table = Table::from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(table.rows()[1].number("Rates.Alcohol.Use Past Month.12-17"), None);
        assert_eq!(table.rows()[2].number("Rates.Alcohol.Use Past Month.12-17"), None);
        assert_eq!(table.rows()[2].number("Rates.Cocaine.Whatever.12-17"), None);
    }

    #[test]
    fn missing_state_column_is_an_error() {
        let err = Table::from_reader("Year,Foo\n2002,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, SourceError::MissingColumn(STATE_COLUMN)));
    }

    #[test]
    fn zero_is_a_number() {
        let row = DataRow::new("Utah", "2010").with_field("x", " 0 ");
        assert_eq!(row.number("x"), Some(0.0));
    }
}
