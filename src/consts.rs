//! Shared numeric constants for the overlay.
//!
//! These are the defaults behind [`crate::config::LayerConfig`]; the host may
//! override any of them at mount time.

// ── Camera ──────────────────────────────────────────────────────

/// Vertical field of view of the perspective camera, in degrees.
pub const CAMERA_FOV_DEG: f64 = 60.0;

/// Near clip distance.
pub const CAMERA_NEAR: f64 = 0.1;

/// Far clip distance.
pub const CAMERA_FAR: f64 = 1000.0;

// ── Contacts ────────────────────────────────────────────────────

/// Depth at which a contact's stand-in sits while the pointer is down.
pub const CONTACT_Z: f64 = 50.0;

/// Radius of the stylus body cylinder.
pub const STYLUS_RADIUS: f64 = 18.0;

/// Length of the stylus body cylinder.
pub const STYLUS_LENGTH: f64 = 100.0;

/// Length of the conical stylus tip.
pub const TIP_LENGTH: f64 = 30.0;

/// Fixed diagonal yaw of the default stylus lean around the view axis (π/4).
pub const STYLUS_YAW: f64 = std::f64::consts::FRAC_PI_4;

/// Default lean of the stylus away from the view axis (30°), used until
/// the device reports tilt.
pub const STYLUS_LEAN: f64 = std::f64::consts::FRAC_PI_6;

/// Radius of the flat touch marker.
pub const MARKER_RADIUS: f64 = 24.0;

/// Base opacity of the translucent touch marker.
pub const MARKER_OPACITY: f64 = 0.35;

// ── Departure animation ─────────────────────────────────────────

/// Depth the stylus is lifted to when the pen leaves the surface.
pub const LIFT_Z: f64 = 120.0;

/// Duration of the lift stage.
pub const LIFT_MS: f64 = 150.0;

/// Pause between lift completion and the start of the fade.
pub const FADE_DELAY_MS: f64 = 100.0;

/// Duration of the fade-out stage.
pub const FADE_MS: f64 = 300.0;

/// Fraction of the stylus opacity applied to the shadow surface.
pub const SHADOW_OPACITY: f64 = 0.3;

// ── Lights and colors ───────────────────────────────────────────

pub const AMBIENT_COLOR: u32 = 0x00ff_ffff;
pub const AMBIENT_INTENSITY: f64 = 0.5;
pub const DIRECTIONAL_COLOR: u32 = 0x00ff_0000;
pub const DIRECTIONAL_INTENSITY: f64 = 1.0;
pub const DIRECTIONAL_DIRECTION: [f64; 3] = [-0.1, 0.1, 1.0];
pub const STYLUS_COLOR: u32 = 0x0080_8080;
pub const MARKER_COLOR: u32 = 0x00ff_ffff;

// ── Host ────────────────────────────────────────────────────────

/// Stacking order of the overlay canvas; keeps it above page content.
pub const OVERLAY_Z_INDEX: &str = "99999";
