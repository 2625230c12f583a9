//! Pointer model: device kinds, logical identifiers, and event samples.
//!
//! The browser assigns a fresh numeric id to every contact. Touch and mouse
//! contacts keep that id, but all pen contacts collapse onto a single logical
//! [`PointerKey::Pen`] because only one stylus is assumed to be active at a
//! time. [`TiltSupport`] latches on the first event that reports any tilt.

#[cfg(test)]
#[path = "pointer_test.rs"]
mod pointer_test;

use std::fmt;

use crate::geom::{Point, Tilt};

/// Input device behind a pointer contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

impl PointerKind {
    /// Parse the DOM `pointerType` string. Unknown values are treated as mouse.
    #[must_use]
    pub fn from_pointer_type(raw: &str) -> Self {
        match raw {
            "pen" => Self::Pen,
            "touch" => Self::Touch,
            _ => Self::Mouse,
        }
    }
}

/// Logical identifier of a contact in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKey {
    /// The single stylus slot.
    Pen,
    /// A touch or mouse contact, keyed by the browser pointer id.
    Id(i32),
}

impl PointerKey {
    /// Derive the logical key for a contact.
    #[must_use]
    pub fn for_contact(id: i32, kind: PointerKind) -> Self {
        match kind {
            PointerKind::Pen => Self::Pen,
            PointerKind::Mouse | PointerKind::Touch => Self::Id(id),
        }
    }
}

impl fmt::Display for PointerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pen => f.write_str("pen"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

/// One pointer event as seen by the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Browser-assigned pointer id.
    pub id: i32,
    pub kind: PointerKind,
    /// Client coordinates in CSS pixels.
    pub screen: Point,
    pub tilt: Tilt,
}

impl PointerSample {
    #[must_use]
    pub fn new(id: i32, kind: PointerKind, screen: Point) -> Self {
        Self { id, kind, screen, tilt: Tilt::default() }
    }

    #[must_use]
    pub fn with_tilt(mut self, tilt: Tilt) -> Self {
        self.tilt = tilt;
        self
    }

    #[must_use]
    pub fn key(&self) -> PointerKey {
        PointerKey::for_contact(self.id, self.kind)
    }
}

/// Tilt capability inferred from the event stream.
///
/// Starts off; the first sample carrying a non-zero tilt turns it on for
/// the rest of the overlay's life.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TiltSupport {
    detected: bool,
}

impl TiltSupport {
    /// Feed one sample; returns whether tilt is supported afterwards.
    pub fn observe(&mut self, tilt: Tilt) -> bool {
        if !tilt.is_zero() {
            self.detected = true;
        }
        self.detected
    }

    #[must_use]
    pub fn is_supported(self) -> bool {
        self.detected
    }
}
