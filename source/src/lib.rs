pub mod boundary;
pub mod fetch;
pub mod table;

pub use boundary::{Feature, FeatureCollection, Geometry, Ring};
pub use table::{DataRow, Table};

use serde::Deserialize;

pub const DEFAULT_DATASET: &str = "drugs.csv";
pub const DEFAULT_BOUNDARIES: &str = "https://raw.githubusercontent.com/PublicaMundi/MappingAPI/master/data/geojson/us-states.json";

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to fetch {location}: {source}")]
    Fetch {
        location: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{location} responded with HTTP {status}")]
    Status { location: String, status: u16 },
    #[error("Malformed table: {0}")]
    Csv(#[from] csv::Error),
    #[error("Table is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("Malformed boundary file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Boundary file is not a FeatureCollection (type: {0})")]
    NotFeatureCollection(String),
}

/// Where a source file lives: a local path or an http(s) URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Location {
    Path(std::path::PathBuf),
    Url(String),
}

impl Location {
    pub fn is_remote(&self) -> bool {
        matches!(self, Location::Url(_))
    }
}

impl From<String> for Location {
    fn from(value: String) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Location::Url(value)
        } else {
            Location::Path(value.into())
        }
    }
}

impl From<&str> for Location {
    fn from(value: &str) -> Self {
        Location::from(value.to_string())
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Path(path) => write!(f, "{}", path.display()),
            Location::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Both inputs, loaded and parsed.
#[derive(Debug, Clone)]
pub struct Sources {
    pub table: Table,
    pub boundaries: FeatureCollection,
}

/// Loads the survey table and the boundary file. Either failing fails the whole load.
pub async fn load(dataset: Location, boundaries: Location) -> Result<Sources, SourceError> {
    let table_bytes = fetch::read(&dataset).await?;
    let table = Table::from_reader(table_bytes.as_slice())?;
    log::info!("Loaded {} survey rows from {dataset}", table.rows().len());

    let boundary_bytes = fetch::read(&boundaries).await?;
    let boundaries_fc = FeatureCollection::from_slice(&boundary_bytes)?;
    log::info!(
        "Loaded {} boundary features from {boundaries}",
        boundaries_fc.features.len()
    );

    Ok(Sources {
        table,
        boundaries: boundaries_fc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_from_string() {
        assert!(Location::from("https://example.org/us.json").is_remote());
        assert!(Location::from("http://example.org/us.json").is_remote());
        assert_eq!(
            Location::from("data/drugs.csv"),
            Location::Path("data/drugs.csv".into())
        );
    }

    #[tokio::test]
    async fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");

        let err = load(
            Location::Path(missing),
            Location::Path(dir.path().join("us.json")),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[tokio::test]
    async fn load_reads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("drugs.csv");
        let json_path = dir.path().join("us.json");

        std::fs::write(
            &csv_path,
            "State,Year,Rates.Alcohol.Use Past Month.12-17\nTexas,2002,9.5\n",
        )
        .unwrap();
        std::fs::write(
            &json_path,
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{"name":"Texas"},
                 "geometry":{"type":"Polygon","coordinates":[[[-100,30],[-95,30],[-95,35],[-100,30]]]}}
            ]}"#,
        )
        .unwrap();

        let sources = load(Location::Path(csv_path), Location::Path(json_path))
            .await
            .unwrap();

        assert_eq!(sources.table.rows().len(), 1);
        assert_eq!(sources.boundaries.features.len(), 1);
    }
}
