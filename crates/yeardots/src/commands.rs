use std::path::{Path, PathBuf};

use clap::ArgMatches;
use tracing::{info, warn};

use yeardots_core::config::user_config_path;
use yeardots_core::events;
use yeardots_core::{GridLayout, PositionStore, WidgetConfig, YearProgress};

pub fn run(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let explicit = matches.get_one::<PathBuf>("config");
    let mut config = load_config_with_warning(explicit.map(PathBuf::as_path));
    if matches.get_flag("no-embed") {
        config.embedding.enabled = false;
    }

    let mut store = PositionStore::new(PositionStore::default_path());
    let reset = matches.get_flag("reset-position");
    if reset {
        if let Err(e) = store.reset() {
            events::log_app_error(&e);
            return Err(e.into());
        }
        info!(event = "cli.position.reset_completed");
    }

    if matches.get_flag("print-scene") {
        return print_scene(&config);
    }

    // Without a desktop to embed into, a reset is all there is to do.
    if reset && cfg!(not(windows)) {
        return Ok(());
    }

    run_widget(config, store)
}

fn load_config_with_warning(explicit: Option<&Path>) -> WidgetConfig {
    match WidgetConfig::load(explicit) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check {} for syntax errors.",
                e,
                explicit
                    .map(Path::to_path_buf)
                    .unwrap_or_else(user_config_path)
                    .display()
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            WidgetConfig::default()
        }
    }
}

fn print_scene(config: &WidgetConfig) -> Result<(), Box<dyn std::error::Error>> {
    let progress = YearProgress::today();
    let scene = GridLayout::compute(&config.appearance, progress.days_total, 1.0).scene(&progress);
    println!("{}", serde_json::to_string_pretty(&scene)?);
    Ok(())
}

#[cfg(windows)]
fn run_widget(config: WidgetConfig, store: PositionStore) -> Result<(), Box<dyn std::error::Error>> {
    let result = crate::host::run(config, store);
    if let Err(e) = &result {
        events::log_app_error(e.as_ref());
    }
    events::log_app_shutdown();
    result
}

#[cfg(not(windows))]
fn run_widget(_config: WidgetConfig, _store: PositionStore) -> Result<(), Box<dyn std::error::Error>> {
    tracing::error!(
        event = "cli.platform_unsupported",
        os = std::env::consts::OS
    );
    Err(format!(
        "yeardots embeds into the Windows desktop and cannot run on {}. \
         Use --print-scene to inspect the layout.",
        std::env::consts::OS
    )
    .into())
}
