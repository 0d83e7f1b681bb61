mod app;
mod color;
mod config;
mod data;
mod export;
mod render;

use anyhow::Result;
use env_logger::{Env, Target};
use log::debug;

use app::RunOutcome;
use config::Settings;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .format_timestamp(None)
        .format_target(false)
        .format_level(false)
        .init();

    // Global chart styling, set up once before anything is drawn.
    render::theme::init();

    match app::run(&Settings::default())? {
        RunOutcome::Exported { rows, charts } => debug!("{rows} summary rows, {charts} charts"),
        RunOutcome::NoData => debug!("nothing exported"),
    }
    Ok(())
}
