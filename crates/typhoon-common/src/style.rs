//! Colors and drawing style for the map layers.
//!
//! Every field has a default so a configuration file only needs to name
//! what it changes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cyclone::Classification;
use crate::error::MapError;

/// An sRGB color with straight (non-premultiplied) alpha.
///
/// Accepts "#RRGGBB", "#RRGGBBAA", a named color, or an `[r, g, b(, a)]`
/// array in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Text(String),
    Array(Vec<u8>),
}

impl TryFrom<ColorRepr> for Color {
    type Error = MapError;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Text(s) if s.starts_with('#') => Color::from_hex(&s),
            ColorRepr::Text(s) => {
                named_color(&s).ok_or_else(|| MapError::InvalidColor(s.clone()))
            }
            ColorRepr::Array(arr) if arr.len() == 3 || arr.len() == 4 => Ok(Color::rgba(
                arr[0],
                arr[1],
                arr[2],
                arr.get(3).copied().unwrap_or(255),
            )),
            ColorRepr::Array(arr) => Err(MapError::InvalidColor(format!("{:?}", arr))),
        }
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Parse "#RRGGBB" or "#RRGGBBAA".
    pub fn from_hex(s: &str) -> Result<Self, MapError> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .ok_or_else(|| MapError::InvalidColor(s.to_string()))
        };

        match hex.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(MapError::InvalidColor(s.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

fn named_color(name: &str) -> Option<Color> {
    let c = match name.to_lowercase().as_str() {
        "transparent" => Color::TRANSPARENT,
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "red" => Color::rgb(255, 0, 0),
        "green" => Color::rgb(0, 255, 0),
        "blue" => Color::rgb(0, 0, 255),
        "yellow" => Color::rgb(255, 255, 0),
        "orange" => Color::rgb(255, 165, 0),
        "purple" => Color::rgb(128, 0, 128),
        "silver" => Color::rgb(192, 192, 192),
        "gray" | "grey" => Color::rgb(128, 128, 128),
        _ => return None,
    };
    Some(c)
}

/// Track color for each intensity category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationPalette {
    pub low: Color,
    pub tropical_depression: Color,
    pub tropical_storm: Color,
    pub severe_tropical_storm: Color,
    pub typhoon: Color,
    pub severe_typhoon: Color,
    pub super_typhoon: Color,
    pub unknown: Color,
    /// Used for a leading run of points with no classification
    pub unclassified: Color,
}

impl Default for ClassificationPalette {
    fn default() -> Self {
        Self {
            low: Color::rgb(0x9E, 0x9E, 0x9E),
            tropical_depression: Color::rgb(0x2E, 0x7D, 0x32),
            tropical_storm: Color::rgb(0xF9, 0xA8, 0x25),
            severe_tropical_storm: Color::rgb(0xEF, 0x6C, 0x00),
            typhoon: Color::rgb(0xD3, 0x2F, 0x2F),
            severe_typhoon: Color::rgb(0xAD, 0x14, 0x57),
            super_typhoon: Color::rgb(0x6A, 0x1B, 0x9A),
            unknown: Color::BLACK,
            unclassified: Color::rgb(0x80, 0x80, 0x80),
        }
    }
}

impl ClassificationPalette {
    pub fn color_for(&self, classification: Option<Classification>) -> Color {
        match classification {
            None => self.unclassified,
            Some(Classification::Low) => self.low,
            Some(Classification::TropicalDepression) => self.tropical_depression,
            Some(Classification::TropicalStorm) => self.tropical_storm,
            Some(Classification::SevereTropicalStorm) => self.severe_tropical_storm,
            Some(Classification::Typhoon) => self.typhoon,
            Some(Classification::SevereTyphoon) => self.severe_typhoon,
            Some(Classification::SuperTyphoon) => self.super_typhoon,
            Some(Classification::Unknown) => self.unknown,
        }
    }
}

/// Drawing parameters for all three layers.
///
/// Lengths are in logical pixels; the renderer multiplies them by the
/// display density factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackStyle {
    pub coastline_color: Color,
    pub coastline_width: f32,

    pub track_width: f32,
    /// Dash pattern for spans leading into forecast points
    pub forecast_dash: Vec<f32>,

    /// Marker radius per km/h of wind speed
    pub marker_scale: f32,
    /// Marker radius when a point has no wind speed
    pub default_marker_radius: f32,
    /// Fill for the resolved "current" point
    pub current_color: Color,

    /// Cloud disc radius per km/h of wind speed
    pub cloud_scale: f32,
    pub cloud_color: Color,

    pub viewer_color: Color,
    pub viewer_radius: f32,

    pub label_font_size: f32,
    /// Distance from the current point down to the first label line
    pub label_offset: f32,
    pub label_line_height: f32,
    pub label_color: Color,
    pub label_outline_color: Color,
    pub label_outline_width: u32,

    pub palette: ClassificationPalette,
}

impl Default for TrackStyle {
    fn default() -> Self {
        Self {
            coastline_color: Color::rgb(0x80, 0xC0, 0x80),
            coastline_width: 1.0,
            track_width: 4.0,
            forecast_dash: vec![8.0, 6.0],
            marker_scale: 0.1,
            default_marker_radius: 3.0,
            current_color: Color::rgb(0x80, 0x00, 0x80),
            cloud_scale: 2.0,
            cloud_color: Color::rgba(0xC0, 0xC0, 0xC0, 0x80),
            viewer_color: Color::rgb(0xFF, 0x00, 0x00),
            viewer_radius: 2.0,
            label_font_size: 12.0,
            label_offset: 18.0,
            label_line_height: 12.0,
            label_color: Color::rgb(0x80, 0x00, 0x80),
            label_outline_color: Color::WHITE,
            label_outline_width: 1,
            palette: ClassificationPalette::default(),
        }
    }
}

impl TrackStyle {
    pub fn validate(&self) -> Result<(), MapError> {
        if !(self.track_width > 0.0) {
            return Err(MapError::invalid_config("style.track_width", "must be positive"));
        }
        if self.forecast_dash.len() % 2 != 0 || self.forecast_dash.iter().any(|d| !(*d > 0.0)) {
            return Err(MapError::invalid_config(
                "style.forecast_dash",
                "needs an even number of positive lengths",
            ));
        }
        if !(self.label_font_size > 0.0) {
            return Err(MapError::invalid_config("style.label_font_size", "must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let c = Color::from_hex("#80C080").unwrap();
        assert_eq!(c, Color::rgb(0x80, 0xC0, 0x80));
        assert_eq!(c.to_string(), "#80C080");
        assert_eq!(Color::from_hex("#C0C0C080").unwrap().a, 0x80);
    }

    #[test]
    fn test_hex_rejects_bad_input() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
    }

    #[test]
    fn test_palette_lookup() {
        let palette = ClassificationPalette::default();
        assert_eq!(palette.color_for(Some(Classification::Typhoon)), palette.typhoon);
        assert_eq!(palette.color_for(None), palette.unclassified);
    }

    #[test]
    fn test_default_style_is_valid() {
        assert!(TrackStyle::default().validate().is_ok());
    }
}
