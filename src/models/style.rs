// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Stroke/fill styling for markup shapes.
//!
//! Colors are plain 8-bit RGB triples serialized as `#RRGGBB` strings so
//! that saved markup stays readable in both JSON and YAML exports.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xFF);
    pub const GREEN: Color = Color::rgb(0x00, 0xFF, 0x00);
    pub const YELLOW: Color = Color::rgb(0xFF, 0xFF, 0x00);
    pub const PURPLE: Color = Color::rgb(0x80, 0x00, 0x80);
    pub const ORANGE: Color = Color::rgb(0xFF, 0xA5, 0x00);
    pub const PINK: Color = Color::rgb(0xFF, 0xC0, 0xCB);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as an uppercase `#RRGGBB` string.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Error returned when a color string is not `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}, expected #RRGGBB")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.is_ascii())
            .ok_or_else(|| ParseColorError(s.to_string()))?;

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ParseColorError(s.to_string()))
        };

        Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A palette entry shown in the toolbar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedColor {
    pub name: String,
    pub color: Color,
}

impl NamedColor {
    pub fn new(name: &str, color: Color) -> Self {
        Self {
            name: name.to_string(),
            color,
        }
    }
}

/// The palette the markup editor ships with.
pub fn default_palette() -> Vec<NamedColor> {
    vec![
        NamedColor::new("Red", Color::RED),
        NamedColor::new("Blue", Color::BLUE),
        NamedColor::new("Green", Color::GREEN),
        NamedColor::new("Yellow", Color::YELLOW),
        NamedColor::new("Purple", Color::PURPLE),
        NamedColor::new("Orange", Color::ORANGE),
        NamedColor::new("Pink", Color::PINK),
        NamedColor::new("White", Color::WHITE),
    ]
}

/// Color and stroke width applied to a shape at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub color: Color,
    pub stroke_width: u32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Color::RED,
            stroke_width: 2,
        }
    }
}
