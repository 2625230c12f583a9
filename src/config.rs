//! Overlay configuration: stylus dimensions, animation timings, and lights.
//!
//! Every field defaults to the matching constant in [`crate::consts`]. The
//! host may pass a JSON object at mount time; any field it names overrides
//! the default and the rest are left untouched.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts;
use crate::error::LayerError;

/// A light source color and strength.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LightConfig {
    /// Packed `0xRRGGBB` color.
    pub color: u32,
    pub intensity: f64,
}

/// A directional light: color, strength, and the direction it shines from.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DirectionalConfig {
    pub color: u32,
    pub intensity: f64,
    pub direction: [f64; 3],
}

/// Tunable constants of the overlay.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    pub stylus_radius: f64,
    pub stylus_length: f64,
    pub tip_length: f64,
    pub stylus_color: u32,
    pub marker_radius: f64,
    pub marker_opacity: f64,
    pub marker_color: u32,
    /// Depth of a stand-in while its pointer is down.
    pub contact_z: f64,
    /// Depth the stylus rises to during the departure lift.
    pub lift_z: f64,
    pub lift_ms: f64,
    pub fade_delay_ms: f64,
    pub fade_ms: f64,
    /// Fraction of the stylus opacity mirrored onto the shadow surface.
    pub shadow_opacity: f64,
    pub ambient: LightConfig,
    pub directional: DirectionalConfig,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            stylus_radius: consts::STYLUS_RADIUS,
            stylus_length: consts::STYLUS_LENGTH,
            tip_length: consts::TIP_LENGTH,
            stylus_color: consts::STYLUS_COLOR,
            marker_radius: consts::MARKER_RADIUS,
            marker_opacity: consts::MARKER_OPACITY,
            marker_color: consts::MARKER_COLOR,
            contact_z: consts::CONTACT_Z,
            lift_z: consts::LIFT_Z,
            lift_ms: consts::LIFT_MS,
            fade_delay_ms: consts::FADE_DELAY_MS,
            fade_ms: consts::FADE_MS,
            shadow_opacity: consts::SHADOW_OPACITY,
            ambient: LightConfig { color: consts::AMBIENT_COLOR, intensity: consts::AMBIENT_INTENSITY },
            directional: DirectionalConfig {
                color: consts::DIRECTIONAL_COLOR,
                intensity: consts::DIRECTIONAL_INTENSITY,
                direction: consts::DIRECTIONAL_DIRECTION,
            },
        }
    }
}

impl LayerConfig {
    /// Parse a JSON override object and validate the merged result.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::Config`] for malformed JSON and
    /// [`LayerError::InvalidConfig`] when a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, LayerError> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Resolve an optional override string, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Same as [`LayerConfig::from_json`].
    pub fn from_optional_json(raw: Option<&str>) -> Result<Self, LayerError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(raw) => Self::from_json(raw),
        }
    }

    /// Check that durations and sizes are finite and non-negative, and that
    /// opacities lie in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), LayerError> {
        for (field, value) in [
            ("stylus_radius", self.stylus_radius),
            ("stylus_length", self.stylus_length),
            ("tip_length", self.tip_length),
            ("marker_radius", self.marker_radius),
            ("lift_ms", self.lift_ms),
            ("fade_delay_ms", self.fade_delay_ms),
            ("fade_ms", self.fade_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                let reason = format!("{value} is not a non-negative number");
                return Err(LayerError::InvalidConfig { field, reason });
            }
        }
        for (field, value) in [("contact_z", self.contact_z), ("lift_z", self.lift_z)] {
            if !value.is_finite() {
                return Err(LayerError::InvalidConfig { field, reason: format!("{value} is not finite") });
            }
        }
        for (field, value) in [("marker_opacity", self.marker_opacity), ("shadow_opacity", self.shadow_opacity)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(LayerError::InvalidConfig { field, reason: format!("{value} is outside [0, 1]") });
            }
        }
        Ok(())
    }
}
