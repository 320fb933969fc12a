use std::sync::mpsc::{self, Receiver};

use eframe::egui::{self, Align, Context, Layout};

use crate::catalog::Catalog;
use crate::condition::StudyCondition;

use super::super::ViewModel;
use super::super::posters::PosterFailures;
use super::super::regions::Composer;
use super::super::viewport::ViewportTracker;

/// A composer whose selection callback feeds a fresh channel. Replacing the
/// composer drops the old sender, so nothing from a previous variant reaches
/// the details panel.
fn mount_composer(condition: StudyCondition) -> (Composer, Receiver<String>) {
    let (tx, rx) = mpsc::channel();
    let composer = Composer::new(
        condition,
        Box::new(move |item_id: &str| {
            let _ = tx.send(item_id.to_owned());
        }),
    );
    (composer, rx)
}

impl ViewModel {
    pub(in crate::app) fn new(catalog: Catalog, condition: StudyCondition) -> Self {
        let (composer, selection_rx) = mount_composer(condition);

        Self {
            catalog,
            revision: 1,
            composer,
            viewport: ViewportTracker::default(),
            selection_rx,
            panel_selection: None,
            failed_posters: PosterFailures::default(),
        }
    }

    pub(in crate::app) fn replace_catalog(&mut self, catalog: Catalog) {
        tracing::info!(
            items = catalog.len(),
            revision = self.revision + 1,
            "dataset replaced"
        );
        self.catalog = catalog;
        self.revision += 1;
        self.failed_posters.clear();
    }

    /// Applies a condition edited in the controls panel. A different variant
    /// mounts a new composer; anything else updates the current one.
    pub(in crate::app) fn apply_condition(&mut self, condition: StudyCondition) {
        if condition == self.composer.condition() {
            return;
        }

        if condition.variant != self.composer.variant() {
            tracing::info!(
                from = %self.composer.variant(),
                to = %condition.variant,
                "replacing visualization variant"
            );
            let (composer, selection_rx) = mount_composer(condition);
            self.composer = composer;
            self.selection_rx = selection_rx;
            self.panel_selection = None;
        } else {
            self.composer.update_condition(condition);
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        dataset_label: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        self.drain_selection();

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("prefviz");
                    ui.separator();
                    ui.label(format!("dataset: {dataset_label}"));
                    ui.label(format!("items: {}", self.catalog.len()));
                    if self.catalog.skipped() > 0 {
                        ui.label(format!("skipped: {}", self.catalog.skipped()));
                    }
                    ui.label(format!("view: {}", self.composer.variant().label()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload dataset"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if is_loading {
                            ui.spinner();
                        }
                        ui.label(format!(
                            "layout passes: {}  resizes: {}",
                            self.composer.layout_passes(),
                            self.viewport.resize_count()
                        ));
                        if let Some(viewport) = self.viewport.current() {
                            ui.label(format!("{}x{}", viewport.width, viewport.height));
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_visualization(ui));
    }
}
