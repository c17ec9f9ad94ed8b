//! Construction parameters and tweakable values

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::debug::Tweakable;
use crate::error::SceneError;

/// Linear RGB color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };
    
    /// Create a color from its components
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
    
    /// Create a color from a `0xRRGGBB` integer
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }
    
    /// Pack the color into a `0xRRGGBB` integer
    pub fn to_hex(self) -> u32 {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

/// A single named parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean flag
    Bool(bool),
    /// Any numeric value
    Number(f64),
    /// Free-form text
    Text(String),
    /// RGB color
    Color(Color),
}

impl ParamValue {
    /// Numeric view of the value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
    
    /// Boolean view of the value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
    
    /// Color view of the value; integers are read as `0xRRGGBB`
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            Self::Number(n) if *n >= 0.0 => Some(Color::from_hex(*n as u32)),
            Self::Text(t) => u32::from_str_radix(t.trim_start_matches('#'), 16)
                .ok()
                .map(Color::from_hex),
            _ => None,
        }
    }
    
    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Color(_) => "color",
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Color> for ParamValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

/// Opaque name → value mapping handed to scene objects at construction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectParams {
    values: BTreeMap<String, ParamValue>,
}

impl ObjectParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }
    
    /// Insert or replace a value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }
    
    /// Raw lookup
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }
    
    /// Numeric lookup with a fallback
    pub fn f32_or(&self, name: &str, default: f32) -> f32 {
        self.get(name)
            .and_then(ParamValue::as_f64)
            .map_or(default, |v| v as f32)
    }
    
    /// Boolean lookup with a fallback
    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        self.get(name).and_then(ParamValue::as_bool).unwrap_or(default)
    }
    
    /// Color lookup with a fallback
    pub fn color_or(&self, name: &str, default: Color) -> Color {
        self.get(name).and_then(ParamValue::as_color).unwrap_or(default)
    }
    
    /// Number of parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }
    
    /// Whether no parameters are set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Tweakable for ObjectParams {
    fn get_property(&self, property: &str) -> Option<ParamValue> {
        self.values.get(property).cloned()
    }
    
    fn set_property(&mut self, property: &str, value: ParamValue) -> Result<(), SceneError> {
        match self.values.get_mut(property) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(SceneError::Construction(format!(
                "unknown parameter '{property}'"
            ))),
        }
    }
}
