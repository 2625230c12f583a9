//! Rendering: draws the retained scene onto a transparent 2D canvas.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. It reads the scene through its
//! camera and produces pixels; it never mutates overlay state.
//!
//! Stylus parts are projected through the perspective camera and shaded with
//! the scene's ambient and directional lights. Shadows are the stylus axis
//! projected onto the `z = 0` plane along the directional light, drawn at the
//! shadow surface's current opacity.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::engine::Renderer;
use crate::error::LayerError;
use crate::geom::{Camera, Point, Vec3, Viewport};
use crate::scene::{Lights, Node, NodeKind, Part, SceneGraph, Shape};

/// Below this projected length a stylus axis is treated as pointing at the
/// viewer and drawn end-on.
const END_ON_PX: f64 = 0.5;

/// [`Renderer`] backed by a browser canvas.
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Size the backing store in device pixels and the element in CSS pixels.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the style declaration rejects a property.
    pub fn resize(&self, viewport: Viewport) -> Result<(), LayerError> {
        self.canvas.set_width(device_px(viewport.width, viewport.dpr));
        self.canvas.set_height(device_px(viewport.height, viewport.dpr));
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", viewport.width))?;
        style.set_property("height", &format!("{}px", viewport.height))?;
        Ok(())
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, scene: &SceneGraph) -> Result<(), LayerError> {
        draw(&self.ctx, scene)?;
        Ok(())
    }
}

/// Draw the full scene: shadows first, then stand-ins in insertion order.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(ctx: &CanvasRenderingContext2d, scene: &SceneGraph) -> Result<(), JsValue> {
    let camera = scene.camera();
    let viewport = camera.viewport();

    // Layer 1: clear to transparent.
    ctx.set_transform(viewport.dpr, 0.0, 0.0, viewport.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);

    // Layer 2: shadows on the ground plane.
    let shadow_alpha = scene
        .get(scene.shadow_surface())
        .and_then(|n| n.parts.first())
        .map_or(0.0, |p| p.opacity);
    if shadow_alpha > 0.0 {
        let light = Vec3::from(scene.lights().directional.direction);
        for (_, node) in scene.nodes() {
            if node.kind == NodeKind::Stylus && node.is_visible() {
                draw_shadow(ctx, camera, node, light, shadow_alpha)?;
            }
        }
    }

    // Layer 3: stand-ins.
    for (_, node) in scene.nodes() {
        if !node.is_visible() {
            continue;
        }
        match node.kind {
            NodeKind::Placeholder | NodeKind::ShadowSurface => {}
            NodeKind::Marker | NodeKind::Stylus => {
                for part in &node.parts {
                    draw_part(ctx, camera, scene.lights(), node, part)?;
                }
            }
        }
    }

    Ok(())
}

// =============================================================
// Parts
// =============================================================

fn draw_part(
    ctx: &CanvasRenderingContext2d,
    camera: &Camera,
    lights: &Lights,
    node: &Node,
    part: &Part,
) -> Result<(), JsValue> {
    if part.opacity <= 0.0 {
        return Ok(());
    }
    match part.shape {
        Shape::Disc { radius } => {
            let (Some(center), Some(scale)) = (camera.project(node.position), camera.scale_at(node.position.z)) else {
                return Ok(());
            };
            ctx.set_fill_style_str(&css_rgba(part.color, part.opacity));
            ctx.begin_path();
            ctx.arc(center.x, center.y, radius * scale, 0.0, TAU)?;
            ctx.fill();
        }
        Shape::Cylinder { radius, from_z, to_z } => {
            let a = node.axis_point(from_z);
            let b = node.axis_point(to_z);
            let (Some(pa), Some(pb)) = (camera.project(a), camera.project(b)) else {
                return Ok(());
            };
            let scale = camera.scale_at(b.z).unwrap_or(1.0);
            let color = shade(part.color, lights, side_normal(node));
            ctx.set_stroke_style_str(&css_rgba(color, part.opacity));
            ctx.set_line_width(2.0 * radius * scale);
            ctx.set_line_cap("round");
            ctx.begin_path();
            ctx.move_to(pa.x, pa.y);
            ctx.line_to(pb.x, pb.y);
            ctx.stroke();
        }
        Shape::Cone { radius, apex_z, base_z } => {
            let apex = node.axis_point(apex_z);
            let base = node.axis_point(base_z);
            let (Some(pa), Some(pb), Some(scale)) =
                (camera.project(apex), camera.project(base), camera.scale_at(base.z))
            else {
                return Ok(());
            };
            let half = radius * scale;
            let color = shade(part.color, lights, side_normal(node));
            ctx.set_fill_style_str(&css_rgba(color, part.opacity));
            ctx.begin_path();
            match perpendicular(pa, pb) {
                Some(n) => {
                    ctx.move_to(pa.x, pa.y);
                    ctx.line_to(pb.x + n.x * half, pb.y + n.y * half);
                    ctx.line_to(pb.x - n.x * half, pb.y - n.y * half);
                    ctx.close_path();
                }
                None => ctx.arc(pb.x, pb.y, half, 0.0, TAU)?,
            }
            ctx.fill();
        }
        Shape::Plane => {}
    }
    Ok(())
}

fn draw_shadow(
    ctx: &CanvasRenderingContext2d,
    camera: &Camera,
    node: &Node,
    light: Vec3,
    alpha: f64,
) -> Result<(), JsValue> {
    let Some((near, far)) = stylus_extent(node) else {
        return Ok(());
    };
    let (Some(a), Some(b)) = (
        ground_shadow(node.axis_point(near), light).and_then(|p| camera.project(p)),
        ground_shadow(node.axis_point(far), light).and_then(|p| camera.project(p)),
    ) else {
        return Ok(());
    };
    let radius = node
        .parts
        .iter()
        .find_map(|p| match p.shape {
            Shape::Cylinder { radius, .. } => Some(radius),
            _ => None,
        })
        .unwrap_or(0.0);
    ctx.set_stroke_style_str(&css_rgba(0, alpha));
    ctx.set_line_width(2.0 * radius);
    ctx.set_line_cap("round");
    ctx.begin_path();
    ctx.move_to(a.x, a.y);
    ctx.line_to(b.x, b.y);
    ctx.stroke();
    Ok(())
}

// =============================================================
// Geometry helpers
// =============================================================

/// Lowest and highest local z covered by a node's axial parts.
fn stylus_extent(node: &Node) -> Option<(f64, f64)> {
    node.parts.iter().fold(None, |acc, part| {
        let (lo, hi) = match part.shape {
            Shape::Cylinder { from_z, to_z, .. } => (from_z.min(to_z), from_z.max(to_z)),
            Shape::Cone { apex_z, base_z, .. } => (apex_z.min(base_z), apex_z.max(base_z)),
            Shape::Disc { .. } | Shape::Plane => return acc,
        };
        Some(acc.map_or((lo, hi), |(a, b): (f64, f64)| (a.min(lo), b.max(hi))))
    })
}

/// Where a point's shadow falls on `z = 0` for a light shining from `light`.
fn ground_shadow(p: Vec3, light: Vec3) -> Option<Vec3> {
    if light.z <= f64::EPSILON {
        return None;
    }
    let t = p.z / light.z;
    Some(Vec3::new(p.x - light.x * t, p.y - light.y * t, 0.0))
}

/// Unit screen-space normal to the segment `a → b`, or `None` when the
/// segment is too short to have a direction.
fn perpendicular(a: Point, b: Point) -> Option<Point> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len < END_ON_PX {
        return None;
    }
    Some(Point::new(-dy / len, dx / len))
}

/// Surface normal of a stylus side facing the camera: the view axis with
/// its component along the stylus axis removed. End-on styluses use the
/// view axis itself.
fn side_normal(node: &Node) -> Vec3 {
    let view = Vec3::new(0.0, 0.0, 1.0);
    let axis = node.rotation.rotate(view);
    let side = view.add(axis.scale(-view.dot(axis)));
    if side.length() <= f64::EPSILON { view } else { side.normalized() }
}

// =============================================================
// Color
// =============================================================

fn channels(color: u32) -> [f64; 3] {
    [
        f64::from((color >> 16) & 0xff),
        f64::from((color >> 8) & 0xff),
        f64::from(color & 0xff),
    ]
}

/// Lambert shading of `base` under the scene lights for a surface `normal`.
fn shade(base: u32, lights: &Lights, normal: Vec3) -> u32 {
    let light_dir = Vec3::from(lights.directional.direction).normalized();
    let diffuse = normal.normalized().dot(light_dir).max(0.0) * lights.directional.intensity;
    let ambient = channels(lights.ambient.color);
    let directional = channels(lights.directional.color);
    let base = channels(base);

    let mut out = 0u32;
    for i in 0..3 {
        let light = (ambient[i] * lights.ambient.intensity + directional[i] * diffuse) / 255.0;
        let value = (base[i] * light).round().clamp(0.0, 255.0);
        // Clamped to 0..=255 above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let byte = value as u32;
        out = (out << 8) | byte;
    }
    out
}

fn css_rgba(color: u32, alpha: f64) -> String {
    let [r, g, b] = channels(color);
    format!("rgba({r}, {g}, {b}, {:.3})", alpha.clamp(0.0, 1.0))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn device_px(css: f64, dpr: f64) -> u32 {
    (css * dpr).round().max(0.0) as u32
}
