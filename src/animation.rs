//! Pen departure animation: lift, then fade out.
//!
//! The sequencer is a small state machine advanced by frame timestamps. It
//! never touches the scene itself; each call to [`Sequencer::advance`]
//! returns a [`Step`] describing the depth and opacity the caller should
//! apply. The first frame after [`Sequencer::start`] has a zero delta, so the
//! animation's clock starts at the first rendered frame rather than at the
//! pointer-up event.

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use crate::config::LayerConfig;
use crate::scene::NodeId;

/// Fixed durations and targets of the departure sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timings {
    pub lift_z: f64,
    pub lift_ms: f64,
    pub fade_delay_ms: f64,
    pub fade_ms: f64,
}

impl Timings {
    #[must_use]
    pub fn from_config(cfg: &LayerConfig) -> Self {
        Self { lift_z: cfg.lift_z, lift_ms: cfg.lift_ms, fade_delay_ms: cfg.fade_delay_ms, fade_ms: cfg.fade_ms }
    }

    /// Total frame time from the first frame to full transparency.
    #[must_use]
    pub fn total_ms(&self) -> f64 {
        self.lift_ms + self.fade_delay_ms + self.fade_ms
    }
}

/// Current stage of the departure sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Departure {
    /// Nothing animating.
    #[default]
    Idle,
    /// Raising the node from `from_z` toward the lift height.
    Lifting { node: NodeId, from_z: f64, elapsed_ms: f64 },
    /// Waiting out the fade delay, then fading opacity to zero.
    /// `elapsed_ms` counts from the end of the lift and includes the delay.
    FadingOut { node: NodeId, elapsed_ms: f64 },
}

/// Mutations produced by one frame of the sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub node: NodeId,
    /// New depth, while lifting (and on the frame the lift completes).
    pub z: Option<f64>,
    /// New opacity, once the fade delay has passed.
    pub opacity: Option<f64>,
    /// The sequence reached its end on this frame.
    pub finished: bool,
}

/// Drives the single active departure sequence of an overlay.
#[derive(Debug, Clone)]
pub struct Sequencer {
    state: Departure,
    timings: Timings,
    last_tick_ms: Option<f64>,
}

impl Sequencer {
    #[must_use]
    pub fn new(timings: Timings) -> Self {
        Self { state: Departure::Idle, timings, last_tick_ms: None }
    }

    #[must_use]
    pub fn state(&self) -> Departure {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.state, Departure::Idle)
    }

    /// The node being animated, if any.
    #[must_use]
    pub fn node(&self) -> Option<NodeId> {
        match self.state {
            Departure::Idle => None,
            Departure::Lifting { node, .. } | Departure::FadingOut { node, .. } => Some(node),
        }
    }

    /// Begin a new sequence for `node` starting at depth `from_z`.
    ///
    /// Any sequence already running is stopped first. Returns the node of
    /// the sequence that was replaced, if any.
    pub fn start(&mut self, node: NodeId, from_z: f64) -> Option<NodeId> {
        let replaced = self.cancel();
        self.state = Departure::Lifting { node, from_z, elapsed_ms: 0.0 };
        replaced
    }

    /// Stop the active sequence, returning the node it was animating.
    pub fn cancel(&mut self) -> Option<NodeId> {
        let node = self.node();
        self.state = Departure::Idle;
        self.last_tick_ms = None;
        node
    }

    /// Advance to the frame timestamp `now_ms`.
    ///
    /// Returns `None` when idle.
    pub fn advance(&mut self, now_ms: f64) -> Option<Step> {
        if !self.is_active() {
            return None;
        }
        let dt = self.last_tick_ms.map_or(0.0, |prev| (now_ms - prev).max(0.0));
        self.last_tick_ms = Some(now_ms);

        match self.state {
            Departure::Idle => None,
            Departure::Lifting { node, from_z, elapsed_ms } => {
                let elapsed_ms = elapsed_ms + dt;
                if elapsed_ms < self.timings.lift_ms {
                    let t = ease_out_cubic(elapsed_ms / self.timings.lift_ms);
                    self.state = Departure::Lifting { node, from_z, elapsed_ms };
                    let z = from_z + (self.timings.lift_z - from_z) * t;
                    return Some(Step { node, z: Some(z), opacity: None, finished: false });
                }
                let carry = elapsed_ms - self.timings.lift_ms;
                let mut step = self.fade(node, carry);
                step.z = Some(self.timings.lift_z);
                Some(step)
            }
            Departure::FadingOut { node, elapsed_ms } => Some(self.fade(node, elapsed_ms + dt)),
        }
    }

    fn fade(&mut self, node: NodeId, elapsed_ms: f64) -> Step {
        let Timings { fade_delay_ms, fade_ms, .. } = self.timings;
        if elapsed_ms >= fade_delay_ms + fade_ms {
            log::debug!("departure finished");
            self.state = Departure::Idle;
            self.last_tick_ms = None;
            return Step { node, z: None, opacity: Some(0.0), finished: true };
        }
        self.state = Departure::FadingOut { node, elapsed_ms };
        let opacity = (elapsed_ms >= fade_delay_ms).then(|| 1.0 - (elapsed_ms - fade_delay_ms) / fade_ms);
        Step { node, z: None, opacity, finished: false }
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}
