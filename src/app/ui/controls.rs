use eframe::egui::{self, Ui};

use crate::condition::{Cutoffs, VariantKind};

use super::super::ViewModel;

const CUTOFF_RANGE: std::ops::RangeInclusive<f32> = 0.0..=5.0;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Study Condition");
        ui.separator();
        ui.add_space(4.0);

        let mut condition = self.composer.condition();

        egui::ComboBox::from_label("Layout")
            .selected_text(condition.variant.label())
            .show_ui(ui, |ui| {
                for variant in VariantKind::ALL {
                    ui.selectable_value(&mut condition.variant, variant, variant.label())
                        .on_hover_text(variant.selector());
                }
            });

        ui.add_space(6.0);
        ui.checkbox(&mut condition.fisheye, "Fisheye distortion")
            .on_hover_text("Magnify the area around the pointer inside each region.");
        ui.add_enabled_ui(
            !matches!(
                condition.variant,
                VariantKind::SelfContinuous | VariantKind::SelfDiscrete | VariantKind::Baseline
            ),
            |ui| {
                ui.checkbox(&mut condition.show_community, "Show community view")
                    .on_hover_text("Decoupled layouts add a community row when enabled.");
            },
        );

        ui.separator();
        ui.add_enabled_ui(condition.variant.is_discrete(), |ui| {
            let mut like = condition.cutoffs.like;
            let mut dislike = condition.cutoffs.dislike;

            let like_changed = ui
                .add(
                    egui::Slider::new(&mut like, CUTOFF_RANGE)
                        .step_by(0.1)
                        .text("Like cutoff")
                        .clamping(egui::SliderClamping::Always),
                )
                .on_hover_text("Scores at or above this count as liked.")
                .changed();
            let dislike_changed = ui
                .add(
                    egui::Slider::new(&mut dislike, CUTOFF_RANGE)
                        .step_by(0.1)
                        .text("Dislike cutoff")
                        .clamping(egui::SliderClamping::Always),
                )
                .on_hover_text("Scores below this count as disliked.")
                .changed();

            // Keep dislike <= like by moving the cutoff that was not edited.
            if like_changed && dislike > like {
                dislike = like;
            } else if dislike_changed && dislike > like {
                like = dislike;
            }
            if let Ok(cutoffs) = Cutoffs::validated(like, dislike) {
                condition.cutoffs = cutoffs;
            }
        });

        self.apply_condition(condition);

        ui.separator();
        ui.label(format!("Selector: {}", condition.variant.selector()));
        if let Some((page, page_count)) = self.composer.page() {
            ui.label(format!("List page {} of {}", page + 1, page_count.max(1)));
        }
    }
}
