use eframe::egui::epaint::Shadow;
use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, StrokeKind};

use crate::util::stable_unit;

use super::geometry::{CARD_CORNER_RADIUS, IMAGE_CORNER_RADIUS, MarkerShape};
use super::interaction::{MarkerVisual, PaintOrder};

pub(super) const BACKGROUND_COLOR: Color32 = Color32::from_rgb(19, 23, 29);
pub(super) const STICKY_COLOR: Color32 = Color32::from_rgb(245, 206, 93);
pub(super) const HOVER_COLOR: Color32 = Color32::from_rgb(106, 198, 255);
pub(super) const GRID_LINE_COLOR: Color32 = Color32::from_rgba_premultiplied(42, 49, 56, 70);
pub(super) const LABEL_COLOR: Color32 = Color32::from_rgb(150, 160, 172);

const CARD_FILL: Color32 = Color32::from_rgb(36, 42, 51);
const CARD_BORDER: Color32 = Color32::from_rgb(70, 80, 92);

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, BACKGROUND_COLOR);
}

pub(super) fn draw_region_frame(painter: &Painter, rect: Rect, label: &str, count: usize) {
    painter.rect(
        rect,
        6.0,
        blend_color(BACKGROUND_COLOR, Color32::WHITE, 0.03),
        Stroke::new(1.0, blend_color(BACKGROUND_COLOR, CARD_BORDER, 0.6)),
        StrokeKind::Inside,
    );
    painter.text(
        rect.left_top() + eframe::egui::vec2(8.0, 5.0),
        Align2::LEFT_TOP,
        format!("{label} ({count})"),
        FontId::proportional(12.0),
        LABEL_COLOR,
    );
}

pub(super) fn draw_empty_region(painter: &Painter, rect: Rect, message: &str) {
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        message,
        FontId::proportional(13.0),
        dim_color(LABEL_COLOR, 0.7),
    );
}

/// Card behind a marker: drop shadow, fill, and a border tinted by how the
/// marker is raised.
pub(super) fn draw_marker_card(painter: &Painter, shape: MarkerShape, visual: MarkerVisual) {
    let (border, width, blur) = match visual.order {
        PaintOrder::Hovered => (HOVER_COLOR, 2.0, 12),
        PaintOrder::Sticky => (STICKY_COLOR, 2.0, 10),
        PaintOrder::Base => (CARD_BORDER, 1.0, 4),
    };

    let shadow = Shadow {
        offset: [0, 2],
        blur,
        spread: 0,
        color: Color32::from_black_alpha(if visual.expanded { 150 } else { 90 }),
    };
    painter.add(shadow.as_shape(shape.card, CARD_CORNER_RADIUS));
    painter.rect(
        shape.card,
        CARD_CORNER_RADIUS,
        CARD_FILL,
        Stroke::new(width, border),
        StrokeKind::Inside,
    );
}

pub(super) fn placeholder_color(item_id: &str) -> Color32 {
    let t = stable_unit(item_id);
    let r = (60.0 + (120.0 * t)) as u8;
    let g = (80.0 + (60.0 * (1.0 - t))) as u8;
    let b = (150.0 - (70.0 * t)) as u8;
    Color32::from_rgb(r, g, b)
}

pub(super) fn draw_placeholder_poster(painter: &Painter, image: Rect, item_id: &str, title: &str) {
    let fill = placeholder_color(item_id);
    painter.rect_filled(image, IMAGE_CORNER_RADIUS, dim_color(fill, 0.8));

    let initial = title
        .chars()
        .find(|character| character.is_alphanumeric())
        .map(|character| character.to_uppercase().collect::<String>())
        .unwrap_or_default();
    if !initial.is_empty() && image.height() >= 14.0 {
        painter.text(
            image.center(),
            Align2::CENTER_CENTER,
            initial,
            FontId::proportional((image.height() * 0.35).clamp(9.0, 36.0)),
            blend_color(fill, Color32::WHITE, 0.75),
        );
    }
}

pub(super) fn draw_gridline(painter: &Painter, from: Pos2, to: Pos2) {
    painter.line_segment([from, to], Stroke::new(1.0, GRID_LINE_COLOR));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blending_is_linear_and_clamped() {
        let black = Color32::from_rgb(0, 0, 0);
        let white = Color32::from_rgb(255, 255, 255);
        assert_eq!(blend_color(black, white, 0.0), black);
        assert_eq!(blend_color(black, white, 2.0), white);
    }

    #[test]
    fn placeholder_color_depends_on_id_only() {
        assert_eq!(placeholder_color("a"), placeholder_color("a"));
    }
}
