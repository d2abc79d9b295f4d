mod app;
mod config;
mod error;
mod gateway;
mod notify;
mod session;

use anyhow::Result;
use eframe::egui;
use log::{error, info};
use std::fs::File;
use std::path::Path;

const TITLE: &str = "Label Audit";

fn init_logging(log_file: &Path) -> Result<()> {
    simplelog::CombinedLogger::init(vec![
        simplelog::TermLogger::new(
            simplelog::LevelFilter::Debug,
            simplelog::Config::default(),
            simplelog::TerminalMode::Mixed,
        ),
        simplelog::WriteLogger::new(
            simplelog::LevelFilter::Info,
            simplelog::Config::default(),
            File::create(log_file)?,
        ),
    ])?;
    Ok(())
}

fn main() -> Result<()> {
    let config = config::read_config(config::CONFIG_PATH).unwrap_or_default();
    init_logging(&config.log_file)?;
    info!("application started");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([config.window.width, config.window.height]),
        ..Default::default()
    };
    let result = eframe::run_native(
        TITLE,
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(app::visuals());
            Box::new(app::AuditApp::new(config))
        }),
    );
    if let Err(e) = result {
        error!("fatal error: {}", e);
        return Err(anyhow::anyhow!("{}", e));
    }
    Ok(())
}
