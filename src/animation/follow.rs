use crate::animation::ease::Ease;
use crate::foundation::core::Point;

/// Exponential smoothing of the lens center toward the raw pointer.
///
/// The first sample after [`Self::reset`] is taken as-is so the lens appears under the pointer.
#[derive(Clone, Debug)]
pub struct PointerFollower {
    follow: f64,
    snap_distance: f64,
    target: Option<Point>,
    current: Option<Point>,
}

impl PointerFollower {
    /// `follow` is the fraction of the remaining distance covered per step, clamped to `(0, 1]`.
    pub fn new(follow: f64, snap_distance: f64) -> Self {
        let follow = if follow.is_finite() && follow > 0.0 {
            follow.min(1.0)
        } else {
            1.0
        };
        Self {
            follow,
            snap_distance: snap_distance.max(0.0),
            target: None,
            current: None,
        }
    }

    /// Record the latest raw pointer sample.
    pub fn set_target(&mut self, p: Point) {
        if self.current.is_none() {
            self.current = Some(p);
        }
        self.target = Some(p);
    }

    /// Forget both the target and the smoothed position.
    pub fn reset(&mut self) {
        self.target = None;
        self.current = None;
    }

    /// Advance one frame and return the smoothed position.
    pub fn step(&mut self) -> Option<Point> {
        if let (Some(target), Some(current)) = (self.target, self.current) {
            let delta = target - current;
            self.current = Some(if delta.hypot() <= self.snap_distance {
                target
            } else {
                current + delta * self.follow
            });
        }
        self.current
    }

    /// Smoothed position without advancing.
    pub fn position(&self) -> Option<Point> {
        self.current
    }

    /// Whether the smoothed position has reached the target (or there is nothing to follow).
    pub fn is_settled(&self) -> bool {
        match (self.target, self.current) {
            (Some(t), Some(c)) => t == c,
            _ => true,
        }
    }
}

/// Frame-counted show/hide animation of the lens radius.
///
/// Progress runs from 0 (hidden) to `frames` (fully shown). Reversing mid-way continues from the
/// current progress, so the radius never jumps.
#[derive(Clone, Debug)]
pub struct RadiusAnimator {
    full_radius: f64,
    frames: u32,
    progress: u32,
    showing: bool,
    ease: Ease,
}

impl RadiusAnimator {
    /// A hidden animator growing to `full_radius` over `frames` frames.
    pub fn new(full_radius: f64, frames: u32, ease: Ease) -> Self {
        Self {
            full_radius: full_radius.max(0.0),
            frames,
            progress: 0,
            showing: false,
            ease,
        }
    }

    /// Start (or continue) growing toward the full radius.
    pub fn show(&mut self) {
        self.showing = true;
    }

    /// Start (or continue) shrinking toward zero.
    pub fn hide(&mut self) {
        self.showing = false;
    }

    /// Change the radius reached when fully shown.
    pub fn set_full_radius(&mut self, radius: f64) {
        self.full_radius = radius.max(0.0);
    }

    /// Advance one frame and return the radius for it.
    pub fn step(&mut self) -> f64 {
        if self.showing {
            self.progress = (self.progress + 1).min(self.frames);
        } else {
            self.progress = self.progress.saturating_sub(1);
        }
        self.radius()
    }

    /// Radius for the current progress.
    pub fn radius(&self) -> f64 {
        if self.frames == 0 {
            return if self.showing { self.full_radius } else { 0.0 };
        }
        let t = f64::from(self.progress) / f64::from(self.frames);
        self.ease.between(0.0, self.full_radius, t)
    }

    /// Whether further steps would change the radius.
    pub fn is_animating(&self) -> bool {
        if self.frames == 0 {
            return false;
        }
        if self.showing {
            self.progress < self.frames
        } else {
            self.progress > 0
        }
    }

    /// Whether the animator is heading toward (or at) the full radius.
    pub fn is_showing(&self) -> bool {
        self.showing
    }

    /// Hide finished: not showing and the radius is back to zero.
    pub fn is_hidden(&self) -> bool {
        !self.showing && (self.frames == 0 || self.progress == 0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/follow.rs"]
mod tests;
