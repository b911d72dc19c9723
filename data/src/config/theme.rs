use iced_core::{
    Color,
    theme::{Custom, Palette},
};
use palette::{
    Mix,
    rgb::{Rgb, Rgba},
};
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct Theme(pub iced_core::Theme);

/// Object form: `{ "name": "custom", "palette": { .. } }`.
#[derive(Deserialize)]
struct SerTheme {
    name: String,
    #[serde(default)]
    palette: Option<Palette>,
}

impl Default for Theme {
    fn default() -> Self {
        Self(iced_core::Theme::Custom(survey_light().into()))
    }
}

impl From<Theme> for iced_core::Theme {
    fn from(val: Theme) -> Self {
        val.0
    }
}

/// Light chrome around the light gray map canvas.
pub fn survey_light() -> Custom {
    Custom::new(
        "Survey Light".to_string(),
        Palette {
            background: Color::from_rgb8(250, 250, 250),
            text: Color::from_rgb8(30, 30, 30),
            primary: Color::from_rgb8(100, 100, 255),
            success: Color::from_rgb8(34, 139, 34),
            danger: Color::from_rgb8(200, 40, 40),
            warning: Color::from_rgb8(255, 165, 0),
        },
    )
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value =
            serde_json::Value::deserialize(deserializer).map_err(serde::de::Error::custom)?;

        if let Some(s) = value.as_str() {
            return match s {
                "survey-light" => Ok(Theme::default()),
                _ => Err(serde::de::Error::custom(format!("Invalid theme: {s}"))),
            };
        }

        let serialized = SerTheme::deserialize(value).map_err(serde::de::Error::custom)?;

        match (serialized.name.as_str(), serialized.palette) {
            ("survey-light", _) => Ok(Theme::default()),
            ("custom", Some(palette)) => Ok(Theme(iced_core::Theme::Custom(
                Custom::new("Custom".to_string(), palette).into(),
            ))),
            ("custom", None) => Err(serde::de::Error::custom("Custom theme missing palette data")),
            _ => Err(serde::de::Error::custom("Invalid theme")),
        }
    }
}

pub fn hex_to_color(hex: &str) -> Option<Color> {
    if hex.len() == 7 || hex.len() == 9 {
        let hash = hex.get(0..1);
        let r = hex.get(1..3).map(|s| u8::from_str_radix(s, 16));
        let g = hex.get(3..5).map(|s| u8::from_str_radix(s, 16));
        let b = hex.get(5..7).map(|s| u8::from_str_radix(s, 16));
        let a = (hex.len() == 9)
            .then(|| hex.get(7..9).and_then(|s| u8::from_str_radix(s, 16).ok()))
            .flatten();

        return match (hash, r, g, b) {
            (Some("#"), Some(Ok(r)), Some(Ok(g)), Some(Ok(b))) => {
                Some(Color::from_rgba8(r, g, b, f32::from(a.unwrap_or(u8::MAX)) / 255.0))
            }
            _ => None,
        };
    }

    None
}

/// Serde adapter reading a [`Color`] from `#RRGGBB` or `#RRGGBBAA`.
pub mod hex {
    use iced_core::Color;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::hex_to_color(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid hex color: {s}")))
    }
}

/// Linear blend in sRGB including alpha; `t` is clamped to `[0, 1]`.
pub fn mix(from: Color, to: Color, t: f32) -> Color {
    to_color(to_rgba(from).mix(to_rgba(to), t.clamp(0.0, 1.0)))
}

fn to_color(rgba: Rgba) -> Color {
    Color {
        r: rgba.color.red,
        g: rgba.color.green,
        b: rgba.color.blue,
        a: rgba.alpha,
    }
}

fn to_rgb(color: Color) -> Rgb {
    Rgb {
        red: color.r,
        green: color.g,
        blue: color.b,
        ..Rgb::default()
    }
}

fn to_rgba(color: Color) -> Rgba {
    Rgba {
        alpha: color.a,
        color: to_rgb(color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parses_with_and_without_alpha() {
        assert_eq!(hex_to_color("#FF0000"), Some(Color::from_rgb8(255, 0, 0)));
        assert_eq!(
            hex_to_color("#6464FF64"),
            Some(Color::from_rgba8(100, 100, 255, 100.0 / 255.0))
        );
        assert_eq!(hex_to_color("FF0000"), None);
        assert_eq!(hex_to_color("#GG0000"), None);
        assert_eq!(hex_to_color("#FFé000"), None);
    }

    #[test]
    fn mix_blends_alpha_too() {
        let hovered = Color::from_rgba8(100, 100, 255, 100.0 / 255.0);
        let target = Color::from_rgba8(0, 0, 255, 150.0 / 255.0);

        let mixed = mix(hovered, target, 0.5);
        assert!((mixed.r - 50.0 / 255.0).abs() < 1e-4);
        assert!((mixed.a - 125.0 / 255.0).abs() < 1e-4);

        assert_eq!(mix(hovered, target, -1.0), hovered);
    }

    #[test]
    fn theme_reads_survey_light_or_custom_palette() {
        let theme: Theme = serde_json::from_str(r#""survey-light""#).unwrap();
        assert_eq!(theme.0.to_string(), "Survey Light");

        let mut palette = Theme::default().0.palette();
        palette.background = Color::from_rgb8(16, 16, 16);
        let custom: Theme =
            serde_json::from_value(serde_json::json!({ "name": "custom", "palette": palette }))
                .unwrap();
        assert_eq!(custom.0.palette().background, palette.background);

        assert!(serde_json::from_str::<Theme>(r#""dark""#).is_err());
        assert!(serde_json::from_str::<Theme>(r#"{ "name": "custom" }"#).is_err());
    }
}
