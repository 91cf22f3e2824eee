use yeardots_core::init_logging;

mod app;
mod commands;
#[cfg(windows)]
mod host;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Quiet unless -v/--verbose
    let quiet = !matches.get_flag("verbose");
    init_logging(quiet);

    commands::run(&matches)?;

    Ok(())
}
