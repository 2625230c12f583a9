//! Overlay core: pointer lifecycle, departure animation, and frame loop.
//!
//! [`OverlayCore`] holds every piece of state that doesn't depend on the
//! browser so it can be driven and inspected from native tests. Input
//! handlers mutate the scene and return [`Action`]s; the host turns
//! [`Action::RequestFrame`] into a display-refresh callback that calls
//! [`OverlayCore::on_frame`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::animation::{Sequencer, Step, Timings};
use crate::config::LayerConfig;
use crate::error::LayerError;
use crate::geom::{Vec3, Viewport};
use crate::pointer::{PointerKey, PointerKind, PointerSample, TiltSupport};
use crate::redraw::RedrawScheduler;
use crate::registry::{PointerEntry, PointerRegistry};
use crate::scene::{Node, NodeId, SceneGraph};

/// Actions returned from handlers for the host to carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Arm one display-refresh callback that calls [`OverlayCore::on_frame`].
    RequestFrame,
}

/// Draws a scene. The seam between the overlay and its output surface.
pub trait Renderer {
    /// Render the scene through its camera.
    ///
    /// # Errors
    ///
    /// Returns an error if the output surface rejects a draw call.
    fn render(&mut self, scene: &SceneGraph) -> Result<(), LayerError>;
}

/// Core overlay state: everything except the canvas and DOM listeners.
pub struct OverlayCore {
    pub scene: SceneGraph,
    pub registry: PointerRegistry,
    pub departure: Sequencer,
    pub redraw: RedrawScheduler,
    pub tilt: TiltSupport,
    pub viewport: Viewport,
    config: LayerConfig,
}

impl OverlayCore {
    /// Build the scene (camera, lights, shadow surface) for a viewport.
    #[must_use]
    pub fn new(viewport: Viewport, config: LayerConfig) -> Self {
        Self {
            scene: SceneGraph::new(viewport, &config),
            registry: PointerRegistry::new(),
            departure: Sequencer::new(Timings::from_config(&config)),
            redraw: RedrawScheduler::new(),
            tilt: TiltSupport::default(),
            viewport,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    // --- Input events ---

    /// A contact touched down (or a pen came into range with pressure).
    pub fn on_pointer_down(&mut self, sample: PointerSample) -> Vec<Action> {
        let key = sample.key();
        let tilt_supported = self.tilt.observe(sample.tilt);

        if sample.kind == PointerKind::Pen {
            if let Some(node) = self.departure.cancel() {
                log::debug!("pen down cancels departure of {node:?}");
                self.apply_shadow(1.0);
            }
        }

        // An existing entry is reused and made fully visible again; this is
        // how a faded pen stand-in comes back, shadow included.
        let node = if let Some(entry) = self.registry.get(key).copied() {
            self.scene.set_opacity(entry.node, 1.0);
            if entry.kind == PointerKind::Pen {
                self.apply_shadow(1.0);
            }
            entry.node
        } else {
            let fresh = self.node_for(sample.kind);
            let node = self.scene.add(fresh);
            self.registry.insert(PointerEntry { key, node, kind: sample.kind });
            log::debug!("pointer {key} down ({:?})", sample.kind);
            node
        };

        self.place(node, sample, tilt_supported);
        self.request_redraw()
    }

    /// A tracked contact moved. Moves for unknown contacts (a hovering pen,
    /// say) still count toward tilt detection but change nothing else.
    pub fn on_pointer_move(&mut self, sample: PointerSample) -> Vec<Action> {
        let tilt_supported = self.tilt.observe(sample.tilt);
        let Some(entry) = self.registry.get(sample.key()).copied() else {
            return Vec::new();
        };
        self.place(entry.node, sample, tilt_supported);
        self.request_redraw()
    }

    /// A contact lifted. Touch and mouse stand-ins disappear at once; the
    /// pen stand-in stays and plays its departure animation.
    pub fn on_pointer_up(&mut self, sample: PointerSample) -> Vec<Action> {
        self.tilt.observe(sample.tilt);
        let key = sample.key();
        let Some(entry) = self.registry.get(key).copied() else {
            return Vec::new();
        };
        match entry.kind {
            PointerKind::Pen => {
                let from_z = self.depth_of(entry.node);
                self.departure.start(entry.node, from_z);
                log::debug!("pointer {key} up, departure started");
            }
            PointerKind::Mouse | PointerKind::Touch => self.discard(key),
        }
        self.request_redraw()
    }

    /// A contact was cancelled by the browser. The stand-in is removed at
    /// once for every kind, pen included; no departure animation plays.
    pub fn on_pointer_cancel(&mut self, sample: PointerSample) -> Vec<Action> {
        self.tilt.observe(sample.tilt);
        let key = sample.key();
        if !self.registry.contains(key) {
            return Vec::new();
        }
        self.discard(key);
        self.request_redraw()
    }

    // --- Viewport ---

    /// Track a resized viewport: the camera is rebuilt around the new center.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Vec<Action> {
        self.viewport = viewport;
        self.scene.set_viewport(viewport);
        self.request_redraw()
    }

    // --- Frame ---

    /// Run one display-refresh callback: clear the pending flag, advance the
    /// departure animation, render, and re-arm while the animation runs.
    pub fn on_frame(&mut self, now_ms: f64, renderer: &mut dyn Renderer) -> Vec<Action> {
        self.redraw.begin_frame();
        let mut actions = Vec::new();

        if let Some(step) = self.departure.advance(now_ms) {
            self.apply_step(step);
            actions.extend(self.request_redraw());
        }

        if let Err(e) = renderer.render(&self.scene) {
            log::warn!("render failed: {e}");
        }

        if self.departure.is_active() {
            actions.extend(self.request_redraw());
        }
        actions
    }

    /// Ask for a redraw; yields [`Action::RequestFrame`] only when no frame
    /// is pending yet.
    pub fn request_redraw(&mut self) -> Vec<Action> {
        if self.redraw.request() { vec![Action::RequestFrame] } else { Vec::new() }
    }

    // --- Queries ---

    /// The entry tracking a logical pointer, if any.
    #[must_use]
    pub fn entry(&self, key: PointerKey) -> Option<&PointerEntry> {
        self.registry.get(key)
    }

    /// The scene node standing in for a logical pointer, if any.
    #[must_use]
    pub fn node(&self, key: PointerKey) -> Option<&Node> {
        self.registry.get(key).and_then(|e| self.scene.get(e.node))
    }

    /// Whether a departure animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.departure.is_active()
    }

    // --- Internals ---

    fn node_for(&self, kind: PointerKind) -> Node {
        match kind {
            PointerKind::Mouse => Node::placeholder(),
            PointerKind::Touch => Node::marker(&self.config),
            PointerKind::Pen => Node::stylus(&self.config),
        }
    }

    fn depth_of(&self, node: NodeId) -> f64 {
        self.scene.get(node).map_or(self.config.contact_z, |n| n.position.z)
    }

    /// Follow the pointer. A departing node keeps the depth the sequencer
    /// gave it; tilt replaces pitch and roll but never the yaw.
    fn place(&mut self, node: NodeId, sample: PointerSample, tilt_supported: bool) {
        let p = self.viewport.screen_to_scene(sample.screen);
        let z = if self.departure.node() == Some(node) { self.depth_of(node) } else { self.config.contact_z };
        self.scene.set_position(node, Vec3::new(p.x, p.y, z));
        if tilt_supported {
            let yaw = self.scene.get(node).map_or(0.0, |n| n.rotation.z);
            self.scene.set_rotation(node, sample.tilt.to_rotation(yaw));
        }
    }

    fn discard(&mut self, key: PointerKey) {
        let Some(entry) = self.registry.remove(key) else {
            return;
        };
        if self.departure.node() == Some(entry.node) {
            self.departure.cancel();
        }
        self.scene.remove(entry.node);
        log::debug!("pointer {key} removed");
    }

    fn apply_step(&mut self, step: Step) {
        if let Some(z) = step.z {
            self.scene.set_depth(step.node, z);
        }
        if let Some(opacity) = step.opacity {
            self.scene.set_opacity(step.node, opacity);
            self.apply_shadow(opacity);
        }
    }

    /// Mirror a stand-in opacity onto the shadow surface at its reduced strength.
    fn apply_shadow(&mut self, opacity: f64) {
        let shadow = self.scene.shadow_surface();
        self.scene.set_opacity(shadow, opacity * self.config.shadow_opacity);
    }
}
