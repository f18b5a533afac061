//! Main application module for gesture control.

use crate::{
    config::Config,
    controller::GestureController,
    error::Result,
    frame_source::{FrameSource, JsonLinesSource},
    sinks::{CommandActuator, Sinks},
    utils::unix_timestamp_secs,
    x11_control::X11Controller,
    Error,
};
use log::{info, warn};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where landmark frames come from
    pub input: InputSource,
    /// Loaded or default configuration file
    pub config: Config,
    /// Use frame timestamps instead of the wall clock when present
    pub use_frame_timestamps: bool,
}

/// Landmark input
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// JSON lines on standard input
    Stdin,
    /// JSON lines file
    File(String),
}

/// Counters reported when the loop ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames processed successfully
    pub frames: usize,
    /// Frames rejected as malformed or unparseable
    pub rejected: usize,
    /// Effects whose sink reported a failure
    pub failed_effects: usize,
}

/// Main application struct
pub struct GestureControlApp {
    controller: GestureController,
    source: Box<dyn FrameSource>,
    sinks: Sinks,
    use_frame_timestamps: bool,
    stop: Arc<AtomicBool>,
}

impl GestureControlApp {
    /// Create the application from its configuration
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("Initializing gesture control application");
        config.config.validate()?;

        let source: Box<dyn FrameSource> = match &config.input {
            InputSource::Stdin => {
                info!("Reading landmark frames from stdin");
                Box::new(JsonLinesSource::stdin())
            }
            InputSource::File(path) => {
                info!("Reading landmark frames from {}", path);
                Box::new(JsonLinesSource::from_path(path)?)
            }
        };

        let sinks = build_sinks(&config.config);
        Ok(Self::with_parts(
            GestureController::new(config.config.control_settings()),
            source,
            sinks,
            config.use_frame_timestamps,
        ))
    }

    /// Assemble the application from already built parts
    #[must_use]
    pub fn with_parts(
        controller: GestureController,
        source: Box<dyn FrameSource>,
        sinks: Sinks,
        use_frame_timestamps: bool,
    ) -> Self {
        Self {
            controller,
            source,
            sinks,
            use_frame_timestamps,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that ends the loop at the next frame boundary when set
    ///
    /// The binary runs until its input ends and never sets the flag. Code
    /// embedding the application owns it, for example to stop from another
    /// thread or a signal handler.
    #[must_use]
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Current controller, for inspection
    #[must_use]
    pub const fn controller(&self) -> &GestureController {
        &self.controller
    }

    /// Run the main application loop until the stream ends or a stop is requested
    pub fn run(&mut self) -> Result<RunStats> {
        info!("Starting main application loop");

        let mut stats = RunStats::default();
        let start_time = Instant::now();
        let mut last_fps_update = Instant::now();

        loop {
            if self.stop.load(Ordering::Relaxed) {
                info!("Stop requested");
                break;
            }

            let frame = match self.source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    info!("End of landmark stream reached");
                    break;
                }
                Err(Error::FrameSource(msg)) => {
                    warn!("Skipping unreadable frame: {}", msg);
                    stats.rejected += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let now = match frame.timestamp {
                Some(ts) if self.use_frame_timestamps => ts,
                _ => unix_timestamp_secs(),
            };

            let output = match self.controller.step(&frame, now) {
                Ok(output) => output,
                Err(e) => {
                    warn!("Rejected frame: {}", e);
                    stats.rejected += 1;
                    continue;
                }
            };
            stats.frames += 1;

            stats.failed_effects += self.sinks.dispatch_all(&output.effects);
            if let Err(e) = self.sinks.overlay.render(&output.overlay) {
                warn!("Overlay failed: {}", e);
            }

            if last_fps_update.elapsed() >= Duration::from_secs(5) {
                #[allow(clippy::cast_precision_loss)]
                let fps = stats.frames as f64 / start_time.elapsed().as_secs_f64();
                info!("Processed {} frames ({:.1} fps)", stats.frames, fps);
                last_fps_update = Instant::now();
            }
        }

        info!(
            "Application shutting down: {} frames, {} rejected, {} failed effects",
            stats.frames, stats.rejected, stats.failed_effects
        );
        Ok(stats)
    }
}

/// Pick a real or logging implementation for every collaborator
fn build_sinks(config: &Config) -> Sinks {
    let mut sinks = Sinks::dry_run();
    sinks.screenshot_dir = config.output.screenshot_dir.clone();

    if config.output.dry_run {
        info!("Dry run: effects are logged only");
        return sinks;
    }

    if config.output.use_x11 {
        // Separate connections so each sink owns its own
        match X11Controller::new().and_then(|keys| Ok((keys, X11Controller::new()?))) {
            Ok((keys, shots)) => {
                sinks.keys = Box::new(keys);
                sinks.screenshots = Box::new(shots);
                info!("X11 key press and screenshot output initialized");
            }
            Err(e) => warn!("Failed to initialize X11 output: {}", e),
        }
    }

    if let Some(template) = command_template(config.output.volume_command.as_deref(), "volume") {
        sinks.volume = Box::new(CommandActuator::new(template));
    }
    if let Some(template) = command_template(config.output.brightness_command.as_deref(), "brightness") {
        sinks.brightness = Box::new(CommandActuator::new(template));
    }
    if let Some(template) = command_template(config.output.tone_command.as_deref(), "tone") {
        sinks.audio = Box::new(CommandActuator::new(template));
    }
    sinks
}

fn command_template<'a>(template: Option<&'a str>, what: &str) -> Option<&'a str> {
    let template = template.filter(|t| !t.trim().is_empty())?;
    info!("{} output via '{}'", what, template);
    Some(template)
}
