//! Keyword Timeline Explorer
//!
//! A desktop app for browsing how often keywords appear over the years:
//! a zoomable quantity-over-year chart, a keyword cloud for the selected
//! year and a paginated document search.

mod api;
mod app;
mod cloud;
mod error;
mod explorer;
mod search;
mod settings;
mod surface;
mod theme;
mod timeline;
mod worker;

use eframe::egui;
use settings::Settings;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let settings = Settings::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_title("Keyword Timeline"),
        ..Default::default()
    };

    eframe::run_native(
        "Keyword Timeline",
        options,
        Box::new(|cc| Ok(Box::new(app::ExplorerApp::new(cc, settings)))),
    )
}
