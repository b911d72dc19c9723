pub mod color;
pub mod config;
pub mod dataset;
pub mod geometry;
pub mod info;
pub mod interaction;
pub mod rate;
pub mod selection;
pub mod util;

pub use color::{Band, ColorMapper, ColorScale};
pub use config::{MapConfig, theme::Theme};
pub use dataset::Dataset;
pub use geometry::{Polygon, Projector, ShapeStore, StateShape};
pub use info::InfoText;
pub use interaction::{Highlight, Interaction, Mark};
pub use rate::{RateKey, RateRange, RateResolver, Shading, Totals};
pub use selection::{AgeGroup, Drug, Selection, SelectionChange, Year};

use std::path::PathBuf;

pub const APP_DIR: &str = "drugmap";

/// Directory for the log file and the optional config file.
pub fn data_path(path_name: Option<&str>) -> PathBuf {
    let data_dir = dirs_next::data_dir().unwrap_or_else(|| PathBuf::from("."));
    if let Some(path_name) = path_name {
        data_dir.join(APP_DIR).join(path_name)
    } else {
        data_dir.join(APP_DIR)
    }
}

/// Everything loaded at startup: the survey table and the projected state outlines.
pub struct Atlas {
    pub dataset: Dataset,
    pub shapes: ShapeStore,
}

impl Atlas {
    pub fn build(sources: source::Sources, projector: &Projector) -> Self {
        let shapes = ShapeStore::build(&sources.boundaries.features, projector);
        let dataset = Dataset::new(sources.table.into_rows());

        let unmatched = shapes
            .names()
            .filter(|name| !dataset.has_state(name))
            .count();
        if unmatched > 0 {
            log::warn!("{unmatched} mapped states have no survey rows");
        }

        Atlas { dataset, shapes }
    }
}
