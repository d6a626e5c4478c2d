//! Length values for control geometry.
//!
//! A [`DimensionValue`] holds either a user-authored length (`"40px"`,
//! `"50%"`) or a pixel value the layout engine computed and wrote back. Pixel
//! values are subject to the host's adaptive scaling until a value is marked
//! with [`DimensionValue::set_ignore_adaptive_scaling`].

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{error::ParseError, host::Host};

/// Grammar for length expressions: a signed decimal with an optional unit.
static LENGTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(-?(?:\d+(?:\.\d*)?|\.\d+))\s*(px|%)?\s*$").expect("valid length regex")
});

/// Unit of a dimension value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    /// Absolute pixels.
    #[default]
    Pixel,
    /// Percentage of the parent region.
    Percentage,
}

/// A parsed length expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    /// Numeric part, in percent points for percentages.
    pub value: f32,
    /// Explicit unit, or `None` for a bare number.
    pub unit: Option<Unit>,
}

impl FromStr for Length {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        let caps = LENGTH_RE
            .captures(s)
            .ok_or_else(|| ParseError::new(s, "expected a number with optional px or % unit"))?;
        let value = caps[1]
            .parse::<f32>()
            .map_err(|e| ParseError::new(s, e.to_string()))?;
        let unit = caps.get(2).map(|u| match u.as_str() {
            "%" => Unit::Percentage,
            _ => Unit::Pixel,
        });
        Ok(Self { value, unit })
    }
}

/// Input accepted by length setters: a length expression or a bare pixel count.
#[derive(Debug, Clone, PartialEq)]
pub enum LengthInput {
    /// A length expression such as `"12px"` or `"50%"`.
    Text(String),
    /// A pixel count.
    Pixels(f32),
}

impl LengthInput {
    /// Normalize to the string form compared against display strings.
    pub fn into_source(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Pixels(v) => format!("{v}px"),
        }
    }
}

impl From<&str> for LengthInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for LengthInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f32> for LengthInput {
    fn from(v: f32) -> Self {
        Self::Pixels(v)
    }
}

impl From<i32> for LengthInput {
    fn from(v: i32) -> Self {
        Self::Pixels(v as f32)
    }
}

impl From<u32> for LengthInput {
    fn from(v: u32) -> Self {
        Self::Pixels(v as f32)
    }
}

/// A length with a unit, plus the adaptive-scaling bookkeeping used by layout.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionValue {
    /// Pixels, or percent points for percentages.
    value: f32,
    /// Current unit.
    unit: Unit,
    /// Unit applied to bare numbers.
    original_unit: Unit,
    /// When false, negative inputs are clamped to zero.
    negative_allowed: bool,
    /// Set once a change to this value has been consumed by a layout signal.
    ignore_adaptive_scaling: bool,
}

impl DimensionValue {
    /// Construct a value in the given unit.
    pub fn new(value: f32, unit: Unit) -> Self {
        Self {
            value,
            unit,
            original_unit: unit,
            negative_allowed: true,
            ignore_adaptive_scaling: false,
        }
    }

    /// A pixel value.
    pub fn pixels(value: f32) -> Self {
        Self::new(value, Unit::Pixel)
    }

    /// A percentage, in percent points.
    pub fn percent(value: f32) -> Self {
        Self::new(value, Unit::Percentage)
    }

    /// Builder: whether negative inputs are kept.
    pub fn with_negative_allowed(mut self, allowed: bool) -> Self {
        self.negative_allowed = allowed;
        self
    }

    /// Current unit.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// True if the value is in pixels.
    pub fn is_pixel(&self) -> bool {
        self.unit == Unit::Pixel
    }

    /// The stored number without scaling.
    pub fn raw(&self) -> f32 {
        self.value
    }

    /// Whether adaptive scaling is bypassed for this value.
    pub fn ignore_adaptive_scaling(&self) -> bool {
        self.ignore_adaptive_scaling
    }

    /// Set the adaptive-scaling bypass flag.
    pub fn set_ignore_adaptive_scaling(&mut self, ignore: bool) {
        self.ignore_adaptive_scaling = ignore;
    }

    /// Effective value: scaled pixels, or a ratio for percentages.
    pub fn value(&self, host: &Host) -> f32 {
        match self.unit {
            Unit::Percentage => self.value / 100.0,
            Unit::Pixel => match host.scale() {
                Some(scale) if !self.ignore_adaptive_scaling => self.value * scale,
                _ => self.value,
            },
        }
    }

    /// Resolve to pixels against a reference extent.
    pub fn pixels_in(&self, host: &Host, reference: f32) -> f32 {
        match self.unit {
            Unit::Pixel => self.value(host),
            Unit::Percentage => self.value(host) * reference,
        }
    }

    /// Display string, e.g. `"60px"` or `"100%"`.
    pub fn to_display(&self, host: &Host) -> String {
        match self.unit {
            Unit::Pixel => format!("{}px", self.value(host)),
            Unit::Percentage => format!("{}%", self.value),
        }
    }

    /// Assign from a length expression. Returns true if the value changed.
    ///
    /// Malformed input leaves the value untouched and reports no change.
    pub fn from_source(&mut self, source: &str) -> bool {
        let length = match source.parse::<Length>() {
            Ok(length) => length,
            Err(e) => {
                tracing::warn!("ignoring length: {}", e);
                return false;
            }
        };
        let mut value = length.value;
        if !self.negative_allowed && value < 0.0 {
            value = 0.0;
        }
        let unit = length.unit.unwrap_or(self.original_unit);
        if value == self.value && unit == self.unit {
            return false;
        }
        self.value = value;
        self.unit = unit;
        true
    }
}

impl fmt::Display for DimensionValue {
    /// Unscaled form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Pixel => write!(f, "{}px", self.value),
            Unit::Percentage => write!(f, "{}%", self.value),
        }
    }
}
