//! Artboard - headless stroke replay
//!
//! `artboard <script.json> <out.png>` mounts a raster surface, replays the
//! script's tool changes, strokes and history actions, and writes the
//! result as PNG. `ARTBOARD_CONFIG` names an optional config file and
//! `ARTBOARD_SEED` pins the stroke randomness; `RUST_LOG` sets verbosity.

use std::process::ExitCode;

use tracing::{error, info};

mod config;
mod script;

use config::AppConfig;
use script::{Script, ScriptError};

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ScriptError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [script_path, out_path] = args.as_slice() else {
        return Err(ScriptError::Usage);
    };

    let config = AppConfig::from_env()?;
    let script = Script::load(script_path)?;
    let (artboard, stats) = script::replay(&script, &config.artboard)?;

    let png = artboard.export_image().ok_or(ScriptError::Export)?;
    std::fs::write(out_path, &png)?;
    info!(
        "Wrote {} ({} bytes): {} strokes, {} undos, {} redos, {} clears",
        out_path,
        png.len(),
        stats.strokes,
        stats.undos,
        stats.redos,
        stats.clears
    );
    Ok(())
}
