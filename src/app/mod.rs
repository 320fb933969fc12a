use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};

use crate::catalog::{Catalog, load_catalog};
use crate::condition::{ConditionError, StudyCondition};

mod geometry;
mod interaction;
mod layout;
mod posters;
mod regions;
mod render_utils;
mod ui;
mod viewport;

use self::posters::PosterFailures;
use self::regions::Composer;
use self::viewport::ViewportTracker;

type LoadResult = Result<Catalog, String>;

pub struct PrefVizApp {
    dataset_path: PathBuf,
    condition: Option<StudyCondition>,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
    ConfigError(String),
}

struct ViewModel {
    catalog: Catalog,
    revision: u64,
    composer: Composer,
    viewport: ViewportTracker,
    selection_rx: Receiver<String>,
    panel_selection: Option<String>,
    failed_posters: PosterFailures,
}

impl PrefVizApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        dataset_path: PathBuf,
        condition: Result<StudyCondition, ConditionError>,
    ) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        match condition {
            Ok(condition) => {
                let state = Self::start_load(dataset_path.clone());
                Self {
                    dataset_path,
                    condition: Some(condition),
                    state,
                    reload_rx: None,
                }
            }
            Err(error) => {
                let message = format!("{:#}", anyhow::Error::from(error));
                tracing::error!(%message, "invalid study condition");
                Self {
                    dataset_path,
                    condition: None,
                    state: AppState::ConfigError(message),
                    reload_rx: None,
                }
            }
        }
    }

    fn spawn_load(dataset_path: PathBuf) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_catalog(&dataset_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(dataset_path: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(dataset_path),
        }
    }

    fn ready_state(condition: Option<StudyCondition>, catalog: Catalog) -> AppState {
        match condition {
            Some(condition) => AppState::Ready(Box::new(ViewModel::new(catalog, condition))),
            None => AppState::ConfigError("No study condition configured".to_owned()),
        }
    }
}

impl eframe::App for PrefVizApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;
        let condition = self.condition;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(catalog)) => transition = Some(Self::ready_state(condition, catalog)),
                    Ok(Err(error)) => transition = Some(AppState::Error(error)),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(AppState::Error(
                            "Background load worker disconnected".to_owned(),
                        ));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading recommendations...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                let mut retry = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the dataset");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    retry = ui.button("Retry").clicked();
                });
                if retry {
                    transition = Some(Self::start_load(self.dataset_path.clone()));
                }
            }
            AppState::ConfigError(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Study configuration error");
                    ui.add_space(6.0);
                    ui.colored_label(egui::Color32::from_rgb(241, 146, 94), error.as_str());
                    ui.add_space(10.0);
                    ui.label("Fix the condition file or command-line options and restart.");
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                let dataset_label = self.dataset_path.display().to_string();
                model.show(ctx, &dataset_label, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.dataset_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(catalog)) => model.replace_catalog(catalog),
                        Ok(Err(error)) => transition = Some(AppState::Error(error)),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
