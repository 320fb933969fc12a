mod app;
mod catalog;
mod condition;
mod util;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::condition::{ConditionOverrides, resolve_condition};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file with the scored items to visualize.
    #[arg(long)]
    dataset: PathBuf,

    /// JSON study condition (layout, cutoffs, fisheye, community view).
    #[arg(long)]
    condition: Option<PathBuf>,

    /// Layout mode, e.g. `coupled-discrete`. Overrides the condition file.
    #[arg(long)]
    layout: Option<String>,

    #[arg(long)]
    like_cutoff: Option<f32>,

    #[arg(long)]
    dislike_cutoff: Option<f32>,

    #[arg(long)]
    fisheye: bool,

    #[arg(long)]
    hide_community: bool,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let overrides = ConditionOverrides {
        layout: args.layout,
        like_cutoff: args.like_cutoff,
        dislike_cutoff: args.dislike_cutoff,
        fisheye: args.fisheye,
        hide_community: args.hide_community,
    };
    let condition = resolve_condition(args.condition.as_deref(), &overrides);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "prefviz",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::PrefVizApp::new(
                cc,
                args.dataset,
                condition,
            )))
        }),
    )
}
