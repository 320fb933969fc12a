use eframe::egui::{Pos2, Rect, Vec2, vec2};

pub(super) const CARD_PADDING: f32 = 3.0;
pub(super) const CARD_CORNER_RADIUS: u8 = 5;
pub(super) const IMAGE_CORNER_RADIUS: u8 = 3;

/// Fisheye remap of `value` around `focus` within `[min, max]`.
///
/// Each side of `focus` is normalized to `t` in `[0, 1]` and mapped through
/// `((factor + 1) * t) / (factor * t + 1)`, which magnifies values near the
/// focus and compresses values near the bounds. `min`, `max`, and `focus`
/// are fixed points. A `factor` of zero (or less) is the identity, and a side
/// with zero span is left untouched.
pub(super) fn distort(value: f32, focus: f32, factor: f32, min: f32, max: f32) -> f32 {
    if factor <= 0.0 || value == focus {
        return value;
    }

    if value < focus {
        let span = focus - min;
        if span <= f32::EPSILON {
            return value;
        }
        let t = (focus - value) / span;
        let mapped = ((factor + 1.0) * t) / (factor * t + 1.0);
        min + (1.0 - mapped) * span
    } else {
        let span = max - focus;
        if span <= f32::EPSILON {
            return value;
        }
        let t = (value - focus) / span;
        let mapped = ((factor + 1.0) * t) / (factor * t + 1.0);
        max - (1.0 - mapped) * span
    }
}

/// A poster marker: an image slot on a slightly larger rounded card. Both
/// rectangles are centered on the local origin, so scaling the shape scales
/// card and image together and placing it is a single translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct MarkerShape {
    pub(super) card: Rect,
    pub(super) image: Rect,
}

impl MarkerShape {
    pub(super) fn new(image_size: Vec2) -> Self {
        let image = Rect::from_center_size(Pos2::ZERO, image_size);
        Self {
            card: image.expand(CARD_PADDING),
            image,
        }
    }

    pub(super) fn with_footprint(footprint: Vec2) -> Self {
        Self::new((footprint - Vec2::splat(CARD_PADDING * 2.0)).max(Vec2::splat(1.0)))
    }

    pub(super) fn scaled(self, factor: f32) -> Self {
        Self {
            card: Rect::from_center_size(Pos2::ZERO, self.card.size() * factor),
            image: Rect::from_center_size(Pos2::ZERO, self.image.size() * factor),
        }
    }

    pub(super) fn half_extent(self) -> Vec2 {
        self.card.size() * 0.5
    }

    pub(super) fn placed_at(self, center: Pos2) -> Self {
        let offset = center.to_vec2();
        Self {
            card: self.card.translate(offset),
            image: self.image.translate(offset),
        }
    }
}

/// Translation that keeps a box of `half_extent` around `center` inside
/// `bounds`. Axes where the box is larger than the bounds are centered
/// on the bounds instead.
pub(super) fn edge_offset(center: Pos2, half_extent: Vec2, bounds: Rect) -> Vec2 {
    fn axis(center: f32, half: f32, low: f32, high: f32) -> f32 {
        if half * 2.0 >= high - low {
            return (low + high) * 0.5 - center;
        }
        if center - half < low {
            low - (center - half)
        } else if center + half > high {
            high - (center + half)
        } else {
            0.0
        }
    }

    vec2(
        axis(center.x, half_extent.x, bounds.left(), bounds.right()),
        axis(center.y, half_extent.y, bounds.top(), bounds.bottom()),
    )
}
