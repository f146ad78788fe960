use std::cell::Cell;
use std::rc::Rc;

use crate::foundation::core::{Point, Rect};

/// Screen-space circle the lens currently occupies.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LensCircle {
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Radius.
    pub r: f64,
}

impl LensCircle {
    /// Circle center.
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether `p` lies inside or on the circle.
    pub fn contains(&self, p: Point) -> bool {
        (p - self.center()).hypot2() <= self.r * self.r
    }

    /// Whether the circle overlaps `rect` (touching counts).
    pub fn intersects_rect(&self, rect: Rect) -> bool {
        let rect = rect.abs();
        let nearest = Point::new(
            self.x.clamp(rect.x0, rect.x1),
            self.y.clamp(rect.y0, rect.y1),
        );
        self.contains(nearest)
    }
}

type Slot = Rc<Cell<Option<LensCircle>>>;

/// Write side of the published lens circle. Exactly one per renderer; not clonable.
///
/// The slot is `!Send`, so readers and the writer all live on the host's frame thread.
#[derive(Debug, Default)]
pub struct LensPublisher {
    slot: Slot,
}

impl LensPublisher {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the published circle.
    pub fn publish(&self, circle: LensCircle) {
        self.slot.set(Some(circle));
    }

    /// Clear the published circle.
    pub fn clear(&self) {
        self.slot.set(None);
    }

    /// Current value.
    pub fn current(&self) -> Option<LensCircle> {
        self.slot.get()
    }

    /// Hand out a read-only view for injection into other components.
    pub fn reader(&self) -> LensReader {
        LensReader {
            slot: Rc::clone(&self.slot),
        }
    }
}

/// Read side of the published lens circle. Cheap to clone; cannot write.
///
/// Values are snapshots valid for the frame they were read in.
#[derive(Clone, Debug)]
pub struct LensReader {
    slot: Slot,
}

impl LensReader {
    /// The circle published by the last render, or `None` when the lens is hidden.
    pub fn get(&self) -> Option<LensCircle> {
        self.slot.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lens/published.rs"]
mod tests;
