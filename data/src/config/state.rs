use super::theme::{self, Theme};
use crate::color::{self, ColorMapper, ColorScale};
use crate::util::ok_or_default;
use crate::{Year, interaction};

use iced_core::{Color, Size};
use serde::Deserialize;
use source::Location;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Sources {
    pub dataset: Location,
    pub boundaries: Location,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            dataset: Location::from(source::DEFAULT_DATASET),
            boundaries: Location::from(source::DEFAULT_BOUNDARIES),
        }
    }
}

/// Hover animation advance per frame, kept within `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverStep(f32);

impl HoverStep {
    pub fn new(step: f32) -> Option<Self> {
        (step.is_finite() && step > 0.0 && step <= 1.0).then_some(Self(step))
    }

    pub fn get(&self) -> f32 {
        self.0
    }
}

impl Default for HoverStep {
    fn default() -> Self {
        Self(interaction::DEFAULT_STEP)
    }
}

impl<'de> Deserialize<'de> for HoverStep {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let step = f32::deserialize(deserializer)?;
        HoverStep::new(step).ok_or_else(|| {
            serde::de::Error::custom(format!("hover step must be in (0, 1], got {step}"))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
        }
    }
}

impl From<CanvasSize> for Size {
    fn from(value: CanvasSize) -> Self {
        Size::new(value.width, value.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapColors {
    #[serde(with = "theme::hex")]
    pub low: Color,
    #[serde(with = "theme::hex")]
    pub medium: Color,
    #[serde(with = "theme::hex")]
    pub high: Color,
    #[serde(with = "theme::hex")]
    pub no_data: Color,
    #[serde(with = "theme::hex")]
    pub hovered: Color,
    #[serde(with = "theme::hex")]
    pub clicked: Color,
    #[serde(with = "theme::hex")]
    pub highlight: Color,
}

impl Default for MapColors {
    fn default() -> Self {
        Self {
            low: color::YELLOW,
            medium: color::ORANGE,
            high: color::RED,
            no_data: color::NO_DATA_GRAY,
            hovered: Color::from_rgba8(100, 100, 255, 100.0 / 255.0),
            clicked: Color::from_rgba8(100, 100, 255, 200.0 / 255.0),
            highlight: Color::from_rgba8(0, 0, 255, 150.0 / 255.0),
        }
    }
}

/// Read from `drugmap.json` in the data directory; every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    #[serde(deserialize_with = "ok_or_default")]
    pub sources: Sources,
    #[serde(deserialize_with = "ok_or_default")]
    pub color_scale: ColorScale,
    #[serde(deserialize_with = "ok_or_default")]
    pub hover_step: HoverStep,
    #[serde(deserialize_with = "ok_or_default")]
    pub default_year: Year,
    #[serde(deserialize_with = "ok_or_default")]
    pub canvas: CanvasSize,
    #[serde(deserialize_with = "ok_or_default")]
    pub colors: MapColors,
    #[serde(deserialize_with = "ok_or_default")]
    pub theme: Theme,
}

impl MapConfig {
    pub fn color_mapper(&self) -> ColorMapper {
        ColorMapper::new(self.color_scale).with_colors(
            self.colors.low,
            self.colors.medium,
            self.colors.high,
            self.colors.no_data,
        )
    }
}
