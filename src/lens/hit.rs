use crate::foundation::core::Rect;
use crate::lens::published::{LensCircle, LensReader};

/// A screen-space tag that is only shown while the lens overlaps it.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingTag {
    /// Caller-chosen identifier.
    pub id: String,
    /// Tag rectangle in viewport pixels.
    pub rect: Rect,
    /// Visibility computed by the last [`TagOverlay::refresh`].
    pub visible: bool,
}

impl FloatingTag {
    /// A hidden tag at `rect`.
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
            visible: false,
        }
    }
}

/// Reads the published lens circle and toggles tag visibility by circle-vs-rect overlap.
#[derive(Clone, Debug)]
pub struct TagOverlay {
    lens: LensReader,
    tags: Vec<FloatingTag>,
}

impl TagOverlay {
    /// Build an overlay reading from `lens`.
    pub fn new(lens: LensReader, tags: Vec<FloatingTag>) -> Self {
        Self { lens, tags }
    }

    /// Recompute visibility from the current circle. Returns how many tags are visible.
    ///
    /// Must run after the frame's lens render so it sees that frame's circle.
    pub fn refresh(&mut self) -> usize {
        let circle = self.lens.get();
        let mut shown = 0;
        for tag in &mut self.tags {
            tag.visible = circle.is_some_and(|c| c.intersects_rect(tag.rect));
            shown += usize::from(tag.visible);
        }
        shown
    }

    /// The circle this overlay last could have read.
    pub fn lens(&self) -> Option<LensCircle> {
        self.lens.get()
    }

    /// All tags.
    pub fn tags(&self) -> &[FloatingTag] {
        &self.tags
    }

    /// Ids of the currently visible tags.
    pub fn visible_ids(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .filter(|t| t.visible)
            .map(|t| t.id.as_str())
    }

    /// Replace a tag's rectangle (for example after layout). Unknown ids are ignored.
    pub fn move_tag(&mut self, id: &str, rect: Rect) {
        if let Some(tag) = self.tags.iter_mut().find(|t| t.id == id) {
            tag.rect = rect;
        }
    }
}
