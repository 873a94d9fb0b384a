//! Visual style attached to nodes, edges and labels.
//!
//! # Overview
//!
//! - [`Style`]: fill, stroke, opacity and font settings
//! - [`StrokeStyle`]: line patterns (solid, dashed, dotted, ...)
//!
//! Styles are plain data. Concrete defaults per node type live in the node
//! type registry; this module only provides the generic fallbacks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Line pattern of a stroke.
///
/// Each variant maps to a dash array in model units:
/// - `Solid`: none
/// - `Dashed`: "5,5"
/// - `Dotted`: "2,3"
/// - `DashDot`: "10,5,2,5"
/// - `Custom(pattern)`: the provided pattern
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            "dash-dot" | "dashdot" => Ok(Self::DashDot),
            // Any other value is treated as a custom dash pattern
            _ => Ok(Self::Custom(s.to_string())),
        }
    }
}

impl StrokeStyle {
    /// Returns the dash array for this style, or `None` for solid lines
    pub fn dash_array(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::DashDot => Some("10,5,2,5".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// Fill, stroke and text appearance of a diagram element.
///
/// # Examples
///
/// ```
/// use linework_core::{color::Color, style::Style};
///
/// let style = Style::default()
///     .with_fill(Color::new("#f4f0ff").unwrap())
///     .with_stroke_width(3.0);
/// assert_eq!(style.stroke_width(), 3.0);
/// assert!(style.fill().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    fill: Option<Color>,
    stroke: Color,
    stroke_width: f32,
    stroke_style: StrokeStyle,
    opacity: f32,
    font_size: f32,
    font_color: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(Color::constant("#ffffff")),
            stroke: Color::constant("#666666"),
            stroke_width: 2.0,
            stroke_style: StrokeStyle::Solid,
            opacity: 1.0,
            font_size: 12.0,
            font_color: Color::constant("#333333"),
        }
    }
}

impl Style {
    /// Default connector style: no fill, grey 2-unit stroke.
    pub fn edge_default() -> Self {
        Self {
            fill: None,
            ..Self::default()
        }
    }

    /// Overlays the highlight used for selected elements.
    pub fn highlighted(&self) -> Self {
        Self {
            stroke: Color::constant("#1890ff"),
            stroke_width: self.stroke_width.max(3.0),
            ..self.clone()
        }
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn stroke(&self) -> Color {
        self.stroke
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn stroke_style(&self) -> &StrokeStyle {
        &self.stroke_style
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn font_color(&self) -> Color {
        self.font_color
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn without_fill(mut self) -> Self {
        self.fill = None;
        self
    }

    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn with_stroke_style(mut self, style: StrokeStyle) -> Self {
        self.stroke_style = style;
        self
    }

    /// Sets the opacity, clamped to `[0, 1]`.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_font_color(mut self, color: Color) -> Self {
        self.font_color = color;
        self
    }
}
