use eframe::egui::{self, RichText, Ui};

use crate::catalog::PosterRef;
use crate::util::format_score;

use super::super::ViewModel;
use super::super::interaction::InteractionPhase;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        match self.composer.selection().phase() {
            InteractionPhase::Sticky(_) => {
                ui.small("Pinned. Click it again or click the background to release.");
            }
            InteractionPhase::Hovering(_) => {
                ui.small("Hovering. Click a poster to pin it.");
            }
            InteractionPhase::Idle => {}
        }

        let Some(selected_id) = self.panel_selection.clone() else {
            ui.label("Hover a poster to see its details.");
            return;
        };

        let Some(item) = self.catalog.get(&selected_id) else {
            ui.label("The selected item is no longer in the dataset.");
            return;
        };

        let heading = match item.year {
            Some(year) => format!("{} ({year})", item.title),
            None => item.title.clone(),
        };
        ui.label(RichText::new(heading).strong());
        ui.small(item.id.as_str());
        ui.add_space(6.0);

        ui.label(format!(
            "Predicted rating for you: {}",
            format_score(item.user_score)
        ));
        ui.label(format!(
            "Community rating: {}",
            format_score(item.community_score)
        ));

        let cutoffs = self.composer.condition().cutoffs;
        let band = |score: f32| {
            if cutoffs.is_like(score) {
                "like"
            } else if cutoffs.is_dislike(score) {
                "dislike"
            } else {
                "neutral"
            }
        };
        ui.label(format!(
            "Bands: you {}, community {}",
            band(item.user_score),
            band(item.community_score)
        ));

        if let Some(director) = &item.director {
            ui.label(format!("Director: {director}"));
        }
        if !item.cast.is_empty() {
            ui.label(format!("Cast: {}", item.cast.join(", ")));
        }

        let poster_note = match &item.poster {
            PosterRef::Remote(_) if self.failed_posters.contains(&item.id) => {
                Some("Poster unavailable, showing a placeholder.")
            }
            PosterRef::Remote(_) => None,
            PosterRef::Placeholder => Some("No poster on record."),
        };
        if let Some(note) = poster_note {
            ui.small(note);
        }

        if let Some(description) = &item.description {
            ui.separator();
            egui::ScrollArea::vertical()
                .id_salt("description_scroll")
                .max_height(320.0)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    ui.label(description.as_str());
                });
        }
    }
}
