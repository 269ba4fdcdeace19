//! Configuration schema types for `pxlshade.toml`
//!
//! Defines the structure and validation rules for display, engine, light,
//! render and watch-face settings.

use serde::{Deserialize, Serialize};

use crate::cast::{CastSettings, DEFAULT_HEIGHT_SCALE, DEFAULT_REACH};

/// Display outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayShape {
    /// Rectangular frame buffer with a fixed row stride
    #[default]
    Rect,
    /// Circular frame buffer with per-row windows
    Round,
}

/// Display geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub shape: DisplayShape,
    /// Width in pixels (diameter for round displays)
    #[serde(default = "default_width")]
    pub width: u16,
    /// Height in pixels (ignored for round displays)
    #[serde(default = "default_height")]
    pub height: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { shape: DisplayShape::default(), width: default_width(), height: default_height() }
    }
}

fn default_width() -> u16 {
    144
}

fn default_height() -> u16 {
    168
}

/// Fixed-point scaling of shadow offsets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_reach")]
    pub reach: i32,
    #[serde(default = "default_height_scale")]
    pub height_scale: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { reach: default_reach(), height_scale: default_height_scale() }
    }
}

impl EngineConfig {
    pub fn cast_settings(&self) -> CastSettings {
        CastSettings { reach: self.reach, height_scale: self.height_scale }
    }
}

fn default_reach() -> i32 {
    DEFAULT_REACH
}

fn default_height_scale() -> i32 {
    DEFAULT_HEIGHT_SCALE
}

/// Light direction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightConfig {
    /// Direction the light travels in, whole degrees, 0 = +x, 90 = down
    #[serde(default = "default_angle_degrees")]
    pub angle_degrees: i32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self { angle_degrees: default_angle_degrees() }
    }
}

fn default_angle_degrees() -> i32 {
    45
}

/// PNG rendering options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Nearest-neighbor upscale factor
    #[serde(default = "default_scale")]
    pub scale: u8,
    /// Antialias the visible shapes (silhouettes never are)
    #[serde(default = "default_true")]
    pub antialiased: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { scale: default_scale(), antialiased: true }
    }
}

fn default_scale() -> u8 {
    3
}

fn default_true() -> bool {
    true
}

/// Heights of the watch-face objects as `[inner, outer]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceConfig {
    #[serde(default = "default_hour_hand")]
    pub hour_hand: [i32; 2],
    #[serde(default = "default_minute_hand")]
    pub minute_hand: [i32; 2],
    #[serde(default = "default_dot")]
    pub dot: [i32; 2],
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self { hour_hand: default_hour_hand(), minute_hand: default_minute_hand(), dot: default_dot() }
    }
}

fn default_hour_hand() -> [i32; 2] {
    [2, 8]
}

fn default_minute_hand() -> [i32; 2] {
    [2, 4]
}

fn default_dot() -> [i32; 2] {
    [-2, 0]
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShadeConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub face: FaceConfig,
}

/// A single validation problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Dotted path of the offending key
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ShadeConfig {
    /// Collect every validation problem.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let mut issue = |field: &str, message: &str| {
            issues.push(ConfigIssue { field: field.to_string(), message: message.to_string() })
        };

        if self.display.width == 0 {
            issue("display.width", "must be greater than 0");
        }
        if self.display.shape == DisplayShape::Rect && self.display.height == 0 {
            issue("display.height", "must be greater than 0");
        }
        if self.engine.height_scale == 0 {
            issue("engine.height_scale", "must not be 0");
        }
        if !(1..=16).contains(&self.render.scale) {
            issue("render.scale", "must be between 1 and 16");
        }

        issues
    }
}
