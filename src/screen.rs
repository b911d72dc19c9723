pub mod map;

#[derive(thiserror::Error, Debug, Clone)]
pub enum MapError {
    #[error("Failed to load map data: {0}")]
    Source(String),
    #[error("Boundary file has no drawable states")]
    NoShapes,
    #[error("Survey table has no rows")]
    EmptyDataset,
}
