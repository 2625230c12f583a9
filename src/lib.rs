//! Pen, touch, and mouse overlay for the browser.
//!
//! This crate is compiled to WebAssembly and mounts a transparent canvas on
//! top of the page. Every active pointer contact gets a stand-in in a small
//! 3D scene: a shaded stylus with a ground shadow for the pen, a translucent
//! disc for each touch, and an invisible placeholder for the mouse. When the
//! pen leaves the surface its stylus lifts, pauses, and fades out. Redraws
//! are coalesced so that any burst of events costs at most one frame.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::OverlayCore`] and the [`engine::Renderer`] seam |
//! | [`registry`] | Logical pointer → scene node mapping |
//! | [`animation`] | Pen departure sequencer (lift, pause, fade) |
//! | [`redraw`] | Per-frame redraw coalescing |
//! | [`scene`] | Retained scene graph, stand-in nodes, lights |
//! | [`geom`] | Vectors, rotations, viewport and perspective camera |
//! | [`pointer`] | Pointer kinds, logical keys, samples, tilt detection |
//! | [`render`] | Canvas 2D renderer |
//! | [`host`] | DOM wiring and the `mount` entry point |
//! | [`config`] | Mount-time configuration overrides |
//! | [`error`] | [`error::LayerError`] |
//! | [`consts`] | Default dimensions, timings, and lights |

pub mod animation;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod geom;
pub mod host;
pub mod pointer;
pub mod redraw;
pub mod registry;
pub mod render;
pub mod scene;
