use eframe::egui::{Pos2, Rect, Vec2, vec2};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(super) struct Viewport {
    pub(super) width: f32,
    pub(super) height: f32,
}

impl Viewport {
    pub(super) fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub(super) fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub(super) fn size(self) -> Vec2 {
        vec2(self.width, self.height)
    }

    pub(super) fn local_rect(self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.size())
    }
}

/// Sizes are snapped to whole pixels, so sub-pixel jitter from the panel
/// layout does not count as a resize.
#[derive(Clone, Debug, Default)]
pub(super) struct ViewportTracker {
    current: Option<Viewport>,
    resizes: u64,
}

impl ViewportTracker {
    pub(super) fn observe(&mut self, available: Vec2) -> Viewport {
        let next = Viewport::new(
            available.x.max(0.0).floor(),
            available.y.max(0.0).floor(),
        );

        if self.current != Some(next) {
            if let Some(previous) = self.current {
                self.resizes += 1;
                tracing::debug!(
                    from_width = previous.width,
                    from_height = previous.height,
                    width = next.width,
                    height = next.height,
                    "viewport resized"
                );
            }
            self.current = Some(next);
        }

        next
    }

    pub(super) fn current(&self) -> Option<Viewport> {
        self.current
    }

    pub(super) fn resize_count(&self) -> u64 {
        self.resizes
    }
}
