use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

pub fn build_cli() -> Command {
    Command::new("yeardots")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Year progress dot grid living behind your desktop icons")
        .long_about("yeardots draws one dot per day of the year and embeds itself into the desktop background layer, below the icons. Drag it to move it; the position is remembered. Use the tray icon to refresh or quit.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Config file to use instead of ~/.yeardots/config.toml")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("no-embed")
                .long("no-embed")
                .help("Run as a normal top-level window instead of embedding into the desktop")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("reset-position")
                .long("reset-position")
                .help("Forget the saved position and start at the default placement")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("print-scene")
                .long("print-scene")
                .help("Print today's computed scene as JSON and exit")
                .action(ArgAction::SetTrue),
        )
}
