mod analysis;
mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use analysis::RunError;
use app::ChartViewerApp;
use chart::ChartQueue;
use config::AnalysisConfig;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AnalysisConfig::default();
    let mut queue = ChartQueue::default();

    match analysis::run(&config, &mut queue) {
        Ok(_) => {}
        Err(RunError::Load(e)) => {
            log::error!("Failed to load {}: {e}", config.data_path.display());
            println!("Error: {e}");
            return Ok(());
        }
        Err(RunError::Analysis(e)) => return Err(e),
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Neo Survey – Close Approaches",
        options,
        Box::new(move |_cc| Ok(Box::new(ChartViewerApp::new(queue.into_charts())))),
    )
    .map_err(|e| anyhow::anyhow!("chart viewer failed: {e}"))
}
