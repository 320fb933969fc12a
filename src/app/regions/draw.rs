use eframe::egui::load::TexturePoll;
use eframe::egui::{self, Align2, FontId, Image, Painter, Rect, Sense, Ui, Vec2, pos2};

use crate::util::format_score;

use super::super::ViewModel;
use super::super::geometry::{IMAGE_CORNER_RADIUS, MarkerShape};
use super::super::layout::ScaleMode;
use super::super::render_utils::{
    LABEL_COLOR, draw_background, draw_empty_region, draw_gridline, draw_marker_card,
    draw_placeholder_poster, draw_region_frame,
};
use super::{MarkerFrame, Region, RegionLayout};

const TICK_STEP: f32 = 1.0;

impl ViewModel {
    pub(in crate::app) fn draw_visualization(&mut self, ui: &mut Ui) {
        self.draw_pager(ui);

        let viewport = self.viewport.observe(ui.available_size());
        self.composer
            .ensure_layout(&self.catalog, self.revision, viewport);

        let (rect, response) = ui.allocate_exact_size(viewport.size(), Sense::click());
        let origin = rect.min.to_vec2();
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        if self.catalog.is_empty() {
            draw_empty_region(&painter, rect, "The dataset has no usable items.");
        }

        let pointer = response.hover_pos().map(|pointer| pointer - origin);
        self.composer.pointer_moved(pointer);

        if response.clicked_by(egui::PointerButton::Primary)
            && let Some(position) = response.interact_pointer_pos()
        {
            self.composer.clicked(position - origin);
        }

        if self.composer.selection().hovered().is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let factor = self.composer.projection_factor();
        for region in self.composer.regions() {
            paint_region(&painter, region, origin, factor);
        }

        let frames = self.composer.frames();
        for frame in &frames {
            let region = &self.composer.regions()[frame.key.region.0];
            if region.is_list() {
                self.paint_list_row(&painter, region, frame, origin);
            }
            self.paint_marker(ui, &painter, frame, origin);
        }

        self.drain_selection();
    }

    pub(in crate::app) fn drain_selection(&mut self) {
        while let Ok(item_id) = self.selection_rx.try_recv() {
            self.panel_selection = (!item_id.is_empty()).then_some(item_id);
        }
    }

    fn paint_marker(&mut self, ui: &Ui, painter: &Painter, frame: &MarkerFrame, origin: Vec2) {
        let shape = MarkerShape {
            card: frame.shape.card.translate(origin),
            image: frame.shape.image.translate(origin),
        };
        draw_marker_card(painter, shape, frame.visual);

        let Some(item) = self.catalog.get(&frame.key.item_id) else {
            return;
        };

        let Some(uri) = self.failed_posters.source(item) else {
            draw_placeholder_poster(painter, shape.image, &item.id, &item.title);
            return;
        };

        let image = Image::new(uri).corner_radius(IMAGE_CORNER_RADIUS);
        match image.load_for_size(ui.ctx(), shape.image.size()) {
            Ok(TexturePoll::Ready { .. }) => {
                image.paint_at(ui, shape.image);
            }
            Ok(TexturePoll::Pending { .. }) => {
                draw_placeholder_poster(painter, shape.image, &item.id, &item.title);
            }
            Err(error) => {
                if self.failed_posters.record(&item.id) {
                    tracing::warn!(item_id = %item.id, uri, %error, "poster failed to load");
                }
                draw_placeholder_poster(painter, shape.image, &item.id, &item.title);
            }
        }
    }
}

fn paint_region(painter: &Painter, region: &Region, origin: Vec2, factor: f32) {
    let rect = region.rect.translate(origin);
    let count = region.positions().map_or(0, |positions| positions.len());
    draw_region_frame(painter, rect, region.predicate.label(), count);

    match &region.layout {
        RegionLayout::Empty => {
            draw_empty_region(painter, rect, "Not enough room to draw this view.");
        }
        RegionLayout::Scale { axis, mode, .. } => {
            paint_axes(painter, region, rect, factor);

            painter.text(
                pos2(rect.center().x, rect.bottom() - 3.0),
                Align2::CENTER_BOTTOM,
                axis.axis_label(),
                FontId::proportional(11.0),
                LABEL_COLOR,
            );
            if *mode == ScaleMode::TwoAxis {
                painter.text(
                    pos2(rect.right() - 8.0, rect.top() + 5.0),
                    Align2::RIGHT_TOP,
                    "↑ Community rating",
                    FontId::proportional(11.0),
                    LABEL_COLOR,
                );
            }
        }
        RegionLayout::Grid(grid) if grid.positions.is_empty() => {
            draw_empty_region(painter, rect, "No items in this group.");
        }
        RegionLayout::Grid(_) => {}
        RegionLayout::List { layout, .. } if layout.positions.is_empty() => {
            draw_empty_region(painter, rect, "No items to list.");
        }
        RegionLayout::List { .. } => {}
    }
}

/// Ticks and gridlines go through the same projection as the markers, so
/// they bend with the fisheye and snap back together with it.
fn paint_axes(painter: &Painter, region: &Region, rect: Rect, factor: f32) {
    if let Some(x) = region.x_projection(factor) {
        for (value, pixel) in x.ticks(TICK_STEP) {
            let px = rect.left() + pixel;
            draw_gridline(painter, pos2(px, rect.top() + 20.0), pos2(px, rect.bottom() - 16.0));
            painter.text(
                pos2(px, rect.bottom() - 16.0),
                Align2::CENTER_BOTTOM,
                format_score(value),
                FontId::monospace(10.0),
                LABEL_COLOR,
            );
        }
    }

    if let Some(y) = region.y_projection(factor) {
        for (value, pixel) in y.ticks(TICK_STEP) {
            let py = rect.top() + pixel;
            draw_gridline(painter, pos2(rect.left() + 22.0, py), pos2(rect.right() - 6.0, py));
            painter.text(
                pos2(rect.left() + 4.0, py),
                Align2::LEFT_CENTER,
                format_score(value),
                FontId::monospace(10.0),
                LABEL_COLOR,
            );
        }
    }
}
