#![allow(clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

fn viewport() -> Viewport {
    Viewport::new(1000.0, 800.0, 1.0)
}

// --- Viewport flip ---

#[test]
fn screen_to_scene_flips_about_midpoint() {
    let p = viewport().screen_to_scene(Point::new(100.0, 200.0));
    assert_eq!(p, Point::new(100.0, 600.0));
}

#[test]
fn screen_to_scene_keeps_midline_fixed() {
    let p = viewport().screen_to_scene(Point::new(7.0, 400.0));
    assert_eq!(p.y, 400.0);
}

#[test]
fn screen_to_scene_top_edge_maps_to_height() {
    let p = viewport().screen_to_scene(Point::new(0.0, 0.0));
    assert_eq!(p.y, 800.0);
}

// --- Tilt ---

#[test]
fn tilt_default_is_zero() {
    assert!(Tilt::default().is_zero());
}

#[test]
fn tilt_with_any_component_is_nonzero() {
    assert!(!Tilt::new(0.0, 3.0).is_zero());
    assert!(!Tilt::new(-1.0, 0.0).is_zero());
}

#[test]
fn tilt_to_rotation_converts_degrees() {
    let r = Tilt::new(10.0, 20.0).to_rotation(0.0);
    assert!(approx_eq(r.x, 10.0_f64.to_radians()));
    assert!(approx_eq(r.y, 20.0_f64.to_radians()));
    assert_eq!(r.z, 0.0);
}

#[test]
fn tilt_to_rotation_keeps_yaw() {
    let r = Tilt::new(-5.0, 5.0).to_rotation(1.25);
    assert_eq!(r.z, 1.25);
}

// --- Euler ---

#[test]
fn euler_identity_leaves_vector() {
    let v = Vec3::new(1.0, 2.0, 3.0);
    assert!(vec_approx_eq(Euler::default().rotate(v), v));
}

#[test]
fn euler_x_quarter_turn_maps_y_to_z() {
    let v = Euler::new(FRAC_PI_2, 0.0, 0.0).rotate(Vec3::new(0.0, 1.0, 0.0));
    assert!(vec_approx_eq(v, Vec3::new(0.0, 0.0, 1.0)));
}

#[test]
fn euler_z_quarter_turn_maps_x_to_y() {
    let v = Euler::new(0.0, 0.0, FRAC_PI_2).rotate(Vec3::new(1.0, 0.0, 0.0));
    assert!(vec_approx_eq(v, Vec3::new(0.0, 1.0, 0.0)));
}

#[test]
fn euler_yaw_applies_after_tilt() {
    // Tilt the +z axis toward -y, then yaw a quarter turn: lean ends up along +x.
    let v = Euler::new(FRAC_PI_4, 0.0, FRAC_PI_2).rotate(Vec3::new(0.0, 0.0, 1.0));
    assert!(v.x > 0.0);
    assert!(approx_eq(v.y, 0.0));
    assert!(approx_eq(v.z, FRAC_PI_4.cos()));
}

#[test]
fn euler_rotation_preserves_length() {
    let v = Vec3::new(3.0, -4.0, 12.0);
    let r = Euler::new(0.3, -1.1, 2.0).rotate(v);
    assert!(approx_eq(r.length(), 13.0));
}

// --- Vec3 ---

#[test]
fn normalized_has_unit_length() {
    assert!(approx_eq(Vec3::new(-0.1, 0.1, 1.0).normalized().length(), 1.0));
}

#[test]
fn normalized_zero_stays_zero() {
    assert_eq!(Vec3::default().normalized(), Vec3::default());
}

// --- Camera ---

#[test]
fn camera_centered_on_viewport() {
    let cam = Camera::for_viewport(viewport());
    assert_eq!(cam.position.x, 500.0);
    assert_eq!(cam.position.y, 400.0);
    assert!(approx_eq(cam.position.z, 400.0 / 30.0_f64.to_radians().tan()));
}

#[test]
fn camera_projects_ground_plane_to_flipped_screen() {
    let vp = viewport();
    let cam = Camera::for_viewport(vp);
    let scene = vp.screen_to_scene(Point::new(120.0, 340.0));
    let screen = cam.project(Vec3::new(scene.x, scene.y, 0.0)).unwrap();
    assert!(approx_eq(screen.x, 120.0));
    assert!(approx_eq(screen.y, 340.0));
}

#[test]
fn camera_magnifies_raised_points() {
    let cam = Camera::for_viewport(viewport());
    assert!(cam.scale_at(50.0).unwrap() > 1.0);
    assert!(cam.scale_at(120.0).unwrap() > cam.scale_at(50.0).unwrap());
}

#[test]
fn camera_clips_points_behind_near_plane() {
    let cam = Camera::for_viewport(viewport());
    assert!(cam.project(Vec3::new(0.0, 0.0, cam.position.z + 1.0)).is_none());
}

#[test]
fn camera_far_plane_covers_tall_viewport() {
    let cam = Camera::for_viewport(Viewport::new(1000.0, 4000.0, 2.0));
    assert!(cam.scale_at(0.0).is_some());
}
