//! Geometry: screen points, scene vectors, rotations, and the fixed camera.
//!
//! Screen space is CSS pixels with y growing downward. Scene space has its
//! origin at the bottom-left of the viewport with y growing upward, so a
//! screen point maps to the scene by flipping y about the viewport's vertical
//! midpoint. The camera sits on the viewport's center axis at the distance
//! where the plane `z = 0` exactly fills the view.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use crate::consts::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR};

/// A point in screen space (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point or direction in scene space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    #[must_use]
    pub fn scale(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= f64::EPSILON { self } else { self.scale(1.0 / len) }
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Rotation as Euler angles in radians. A vector is turned about X first,
/// then Y, then Z (the matrix is `Rz · Ry · Rx`), so Z acts as a yaw about
/// the view axis applied after any tilt.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Euler {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Euler {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Rotate a vector by this orientation.
    #[must_use]
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let (sx, cx) = self.x.sin_cos();
        let v = Vec3::new(v.x, v.y * cx - v.z * sx, v.y * sx + v.z * cx);
        let (sy, cy) = self.y.sin_cos();
        let v = Vec3::new(v.x * cy + v.z * sy, v.y, -v.x * sy + v.z * cy);
        let (sz, cz) = self.z.sin_cos();
        Vec3::new(v.x * cz - v.y * sz, v.x * sz + v.y * cz, v.z)
    }
}

/// Stylus tilt as reported by the browser, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tilt {
    pub x_deg: f64,
    pub y_deg: f64,
}

impl Tilt {
    #[must_use]
    pub fn new(x_deg: f64, y_deg: f64) -> Self {
        Self { x_deg, y_deg }
    }

    /// Whether both angles are zero (no tilt information).
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x_deg == 0.0 && self.y_deg == 0.0
    }

    /// Orientation for a stand-in: tilt angles become rotation about the
    /// X and Y axes, and `yaw` is carried through unchanged.
    #[must_use]
    pub fn to_rotation(self, yaw: f64) -> Euler {
        Euler::new(self.x_deg.to_radians(), self.y_deg.to_radians(), yaw)
    }
}

/// Viewport dimensions in CSS pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        Self { width, height, dpr }
    }

    /// Map a screen point to the scene plane by flipping y about the
    /// viewport's vertical midpoint.
    #[must_use]
    pub fn screen_to_scene(&self, screen: Point) -> Point {
        let mid = self.height / 2.0;
        Point::new(screen.x, mid - (screen.y - mid))
    }
}

/// Fixed perspective camera looking down −z at the viewport's center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    viewport: Viewport,
}

impl Camera {
    /// Place the camera so the `z = 0` plane exactly fills the viewport.
    ///
    /// The far plane grows with tall viewports so the overlay plane is never clipped.
    #[must_use]
    pub fn for_viewport(viewport: Viewport) -> Self {
        let half_fov = (CAMERA_FOV_DEG / 2.0).to_radians();
        let distance = (viewport.height / 2.0) / half_fov.tan();
        Self {
            position: Vec3::new(viewport.width / 2.0, viewport.height / 2.0, distance),
            fov_deg: CAMERA_FOV_DEG,
            near: CAMERA_NEAR,
            far: CAMERA_FAR.max(distance * 2.0),
            viewport,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Perspective scale at the given depth, or `None` outside the clip range.
    #[must_use]
    pub fn scale_at(&self, z: f64) -> Option<f64> {
        let depth = self.position.z - z;
        if depth < self.near || depth > self.far {
            return None;
        }
        Some(self.position.z / depth)
    }

    /// Project a scene point to screen space (CSS pixels, y down).
    #[must_use]
    pub fn project(&self, p: Vec3) -> Option<Point> {
        let scale = self.scale_at(p.z)?;
        let x = self.position.x + (p.x - self.position.x) * scale;
        let y = self.position.y - (p.y - self.position.y) * scale;
        Some(Point::new(x, y))
    }
}
