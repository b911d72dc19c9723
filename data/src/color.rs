use crate::config::theme;
use crate::rate::RateRange;

use enum_map::{Enum, EnumMap, enum_map};
use iced_core::Color;
use serde::Deserialize;

/// How rates are turned into fill colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    /// Linear blend from the low color to the high color.
    #[default]
    Continuous,
    /// Three fixed bands split at 0.33 and 0.66.
    Discrete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum Band {
    Low,
    Medium,
    High,
}

impl Band {
    /// Top to bottom, as the legend lists them.
    pub const DESCENDING: [Band; 3] = [Band::High, Band::Medium, Band::Low];

    pub fn of(t: f32) -> Band {
        if t > 0.66 {
            Band::High
        } else if t > 0.33 {
            Band::Medium
        } else {
            Band::Low
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Band::Low => "Low",
                Band::Medium => "Medium",
                Band::High => "High",
            }
        )
    }
}

pub const YELLOW: Color = Color::from_rgb8(255, 255, 0);
pub const ORANGE: Color = Color::from_rgb8(255, 165, 0);
pub const RED: Color = Color::from_rgb8(255, 0, 0);
pub const NO_DATA_GRAY: Color = Color::from_rgb8(200, 200, 200);

#[derive(Debug, Clone, PartialEq)]
pub struct ColorMapper {
    scale: ColorScale,
    low: Color,
    high: Color,
    bands: EnumMap<Band, Color>,
    no_data: Color,
}

impl Default for ColorMapper {
    fn default() -> Self {
        Self::new(ColorScale::default())
    }
}

impl ColorMapper {
    pub fn new(scale: ColorScale) -> Self {
        Self {
            scale,
            low: YELLOW,
            high: RED,
            bands: enum_map! {
                Band::Low => YELLOW,
                Band::Medium => ORANGE,
                Band::High => RED,
            },
            no_data: NO_DATA_GRAY,
        }
    }

    pub fn with_colors(mut self, low: Color, medium: Color, high: Color, no_data: Color) -> Self {
        self.low = low;
        self.high = high;
        self.bands = enum_map! {
            Band::Low => low,
            Band::Medium => medium,
            Band::High => high,
        };
        self.no_data = no_data;
        self
    }

    pub fn scale(&self) -> ColorScale {
        self.scale
    }

    pub fn no_data(&self) -> Color {
        self.no_data
    }

    pub fn band(&self, band: Band) -> Color {
        self.bands[band]
    }

    /// Continuous ramp color at `t` in `[0, 1]`, regardless of the active scale.
    pub fn ramp(&self, t: f32) -> Color {
        theme::mix(self.low, self.high, t)
    }

    /// Fill color for a rate; `None` rates get the no-data gray.
    pub fn color_for(&self, rate: Option<f64>, range: Option<RateRange>) -> Color {
        let Some(rate) = rate else {
            return self.no_data;
        };
        let t = range.map_or(0.5, |r| r.normalize(rate));

        match self.scale {
            ColorScale::Continuous => self.ramp(t),
            ColorScale::Discrete => self.bands[Band::of(t)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-3
            && (a.g - b.g).abs() < 1e-3
            && (a.b - b.b).abs() < 1e-3
            && (a.a - b.a).abs() < 1e-3
    }

    #[test]
    fn no_data_is_gray_for_both_scales() {
        let range = Some(RateRange { min: 1.0, max: 2.0 });

        assert_eq!(ColorMapper::new(ColorScale::Continuous).color_for(None, range), NO_DATA_GRAY);
        assert_eq!(ColorMapper::new(ColorScale::Discrete).color_for(None, range), NO_DATA_GRAY);
    }

    #[test]
    fn continuous_interpolates_endpoints() {
        let mapper = ColorMapper::new(ColorScale::Continuous);
        let range = Some(RateRange { min: 0.0, max: 10.0 });

        assert!(approx(mapper.color_for(Some(0.0), range), YELLOW));
        assert!(approx(mapper.color_for(Some(10.0), range), RED));

        let mid = mapper.color_for(Some(5.0), range);
        assert!(approx(mid, Color::from_rgb(1.0, 0.5, 0.0)));
    }

    #[test]
    fn discrete_buckets_at_thresholds() {
        let mapper = ColorMapper::new(ColorScale::Discrete);
        let range = Some(RateRange { min: 0.0, max: 100.0 });

        assert_eq!(mapper.color_for(Some(10.0), range), YELLOW);
        assert_eq!(mapper.color_for(Some(33.0), range), YELLOW);
        assert_eq!(mapper.color_for(Some(50.0), range), ORANGE);
        assert_eq!(mapper.color_for(Some(66.0), range), ORANGE);
        assert_eq!(mapper.color_for(Some(90.0), range), RED);
    }

    #[test]
    fn degenerate_range_uses_midpoint() {
        let flat = Some(RateRange { min: 7.0, max: 7.0 });

        let continuous = ColorMapper::new(ColorScale::Continuous).color_for(Some(7.0), flat);
        assert!(!continuous.r.is_nan() && !continuous.g.is_nan() && !continuous.b.is_nan());
        assert!(approx(continuous, ColorMapper::default().ramp(0.5)));

        let discrete = ColorMapper::new(ColorScale::Discrete).color_for(Some(7.0), flat);
        assert_eq!(discrete, ORANGE);
    }

    #[test]
    fn custom_colors_replace_defaults() {
        let blue = Color::from_rgb8(0, 0, 255);
        let mapper = ColorMapper::new(ColorScale::Discrete).with_colors(
            Color::WHITE,
            blue,
            Color::BLACK,
            Color::TRANSPARENT,
        );

        assert_eq!(mapper.band(Band::Medium), blue);
        assert_eq!(mapper.color_for(None, None), Color::TRANSPARENT);
    }
}
