use eframe::egui::{self, Align2, FontId, Painter, Stroke, StrokeKind, Ui, Vec2, pos2};

use crate::util::{format_score, truncate_title};

use super::super::ViewModel;
use super::super::interaction::PaintOrder;
use super::super::render_utils::{BACKGROUND_COLOR, HOVER_COLOR, LABEL_COLOR, blend_color};
use super::{MarkerFrame, Region};

const TITLE_CHARS: usize = 60;

impl ViewModel {
    pub(in crate::app) fn draw_pager(&mut self, ui: &mut Ui) {
        let Some((page, page_count)) = self.composer.page() else {
            return;
        };

        ui.horizontal(|ui| {
            let previous = ui.add_enabled(page > 0, egui::Button::new("◀ Previous"));
            ui.label(format!("Page {} of {}", page + 1, page_count.max(1)));
            let next = ui.add_enabled(page + 1 < page_count, egui::Button::new("Next ▶"));

            if previous.clicked() {
                self.composer.set_page(page.saturating_sub(1));
            }
            if next.clicked() {
                self.composer.set_page(page + 1);
            }
        });
        ui.add_space(4.0);
    }

    pub(in crate::app) fn paint_list_row(
        &self,
        painter: &Painter,
        region: &Region,
        frame: &MarkerFrame,
        origin: Vec2,
    ) {
        let row = frame.hit.translate(origin);
        let (fill, border) = if frame.visual.order == PaintOrder::Hovered {
            (0.16, 0.7)
        } else {
            (0.04, 0.12)
        };
        painter.rect(
            row,
            4.0,
            blend_color(BACKGROUND_COLOR, HOVER_COLOR, fill),
            Stroke::new(1.0, blend_color(BACKGROUND_COLOR, HOVER_COLOR, border)),
            StrokeKind::Inside,
        );

        let Some(item) = self.catalog.get(&frame.key.item_id) else {
            return;
        };

        let text_left = frame.shape.card.translate(origin).right() + 12.0;
        if text_left >= region.rect.translate(origin).right() {
            return;
        }

        let title = match item.year {
            Some(year) => format!("{} ({year})", truncate_title(&item.title, TITLE_CHARS)),
            None => truncate_title(&item.title, TITLE_CHARS),
        };
        painter.text(
            pos2(text_left, row.center().y - 9.0),
            Align2::LEFT_CENTER,
            title,
            FontId::proportional(14.0),
            blend_color(LABEL_COLOR, egui::Color32::WHITE, 0.6),
        );
        painter.text(
            pos2(text_left, row.center().y + 11.0),
            Align2::LEFT_CENTER,
            format!(
                "Predicted for you {}   Community {}",
                format_score(item.user_score),
                format_score(item.community_score)
            ),
            FontId::proportional(12.0),
            LABEL_COLOR,
        );
    }
}
