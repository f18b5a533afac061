//! Hand gesture control application: landmark frames in, media and display control out.

use anyhow::Result;
use clap::Parser;
use hand_gesture_control::{
    app::{AppConfig, GestureControlApp, InputSource},
    config::{Config, EXAMPLE_CONFIG},
};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON-lines landmark file to read ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Log effects instead of performing them
    #[arg(long)]
    dry_run: bool,

    /// Capture frame width in pixels
    #[arg(long)]
    frame_width: Option<u32>,

    /// Capture frame height in pixels
    #[arg(long)]
    frame_height: Option<u32>,

    /// Directory to write screenshots to
    #[arg(long)]
    screenshot_dir: Option<PathBuf>,

    /// Use timestamps embedded in the frames instead of the wall clock
    #[arg(long)]
    frame_timestamps: bool,

    /// Print an example configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    info!("Hand Gesture Control");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Command line overrides
    if let Some(width) = args.frame_width {
        config.pinch.frame_width = width;
    }
    if let Some(height) = args.frame_height {
        config.pinch.frame_height = height;
    }
    if let Some(dir) = args.screenshot_dir {
        config.output.screenshot_dir = dir;
    }
    if args.dry_run {
        config.output.dry_run = true;
    }

    let app_config = AppConfig {
        input: if args.input == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(args.input)
        },
        config,
        use_frame_timestamps: args.frame_timestamps,
    };

    // Create and run application
    let mut app = GestureControlApp::new(app_config)?;
    let stats = app.run()?;
    info!("Done: {} frames processed", stats.frames);

    Ok(())
}
