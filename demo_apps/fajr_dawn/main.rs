//! Headless run of the desert dawn scene.
//!
//! ```text
//! fajr_dawn [config.json] [--html page.html]
//! ```
//!
//! Simulates the configured number of frames, prints the final frame
//! snapshot as JSON and optionally writes the overlay page.

use fajr::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut config_path = None;
    let mut html_path = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--html" => {
                html_path = Some(args.next().ok_or_else(|| anyhow::anyhow!("--html needs a path"))?);
            }
            _ => config_path = Some(arg),
        }
    }

    let config = match &config_path {
        Some(path) => AppConfig::from_path(path)?,
        None => AppConfig::default(),
    };

    let mut app = App::new(config)?;
    let snapshot = app.run_headless();

    if snapshot.skipped_targets > 0 {
        log::warn!("{} animation targets were skipped", snapshot.skipped_targets);
    }

    if let Some(path) = html_path {
        std::fs::write(&path, app.page_html()?)?;
        log::info!("Wrote overlay page to {path}");
    }

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
