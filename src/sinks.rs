//! Host collaborators that carry out the controller's effects.
//!
//! Each trait mirrors one thing the control loop can ask of the host. Sinks
//! are fire-and-forget: a failure is reported back to the caller but never
//! feeds into the control state.

use crate::{
    actuator::ActuatorCommand,
    controller::{Effect, Overlay, SCREENSHOT_BANNER_TEXT},
    utils::safe_cast::f64_to_percent,
    Error, Result,
};
use log::{debug, info, warn};
use std::{
    path::{Path, PathBuf},
    process::{Child, Command, Stdio},
};

/// Plays a tone for mode transitions
pub trait AudioCueSink {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<()>;
}

/// Sets the master volume from a scalar in `[0, 1]`
pub trait VolumeActuator {
    fn set_volume(&mut self, scalar: f64) -> Result<()>;
}

/// Sets the display brightness in percent
pub trait BrightnessActuator {
    fn set_brightness(&mut self, percent: u8) -> Result<()>;
}

/// Sends a single logical key press
pub trait KeyPressSink {
    fn press_key(&mut self, key: &str) -> Result<()>;
}

/// Captures the screen to `path`
pub trait ScreenshotSink {
    fn capture(&mut self, path: &Path) -> Result<()>;
}

/// Receives the per-frame overlay snapshot
pub trait OverlaySink {
    fn render(&mut self, overlay: &Overlay) -> Result<()>;
}

/// Logs every effect instead of performing it
#[derive(Debug, Default)]
pub struct LoggingSinks {
    last_mode: Option<bool>,
    banner_shown: bool,
}

impl AudioCueSink for LoggingSinks {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<()> {
        info!("[dry-run] tone {} Hz for {} ms", frequency_hz, duration_ms);
        Ok(())
    }
}

impl VolumeActuator for LoggingSinks {
    fn set_volume(&mut self, scalar: f64) -> Result<()> {
        info!("[dry-run] volume {:.3}", scalar);
        Ok(())
    }
}

impl BrightnessActuator for LoggingSinks {
    fn set_brightness(&mut self, percent: u8) -> Result<()> {
        info!("[dry-run] brightness {}%", percent);
        Ok(())
    }
}

impl KeyPressSink for LoggingSinks {
    fn press_key(&mut self, key: &str) -> Result<()> {
        info!("[dry-run] key press '{}'", key);
        Ok(())
    }
}

impl ScreenshotSink for LoggingSinks {
    fn capture(&mut self, path: &Path) -> Result<()> {
        info!("[dry-run] screenshot {}", path.display());
        Ok(())
    }
}

impl OverlaySink for LoggingSinks {
    fn render(&mut self, overlay: &Overlay) -> Result<()> {
        if self.last_mode != Some(overlay.control_mode_on) {
            info!("{}", overlay.mode_label());
            self.last_mode = Some(overlay.control_mode_on);
        }
        if overlay.screenshot_banner && !self.banner_shown {
            info!("{}", SCREENSHOT_BANNER_TEXT);
        }
        self.banner_shown = overlay.screenshot_banner;
        for hand in &overlay.hands {
            if let Some(readout) = &hand.readout {
                debug!("{:?}: {}", hand.handedness, readout);
            }
        }
        Ok(())
    }
}

/// Runs a shell command template for continuous actuators and tones
///
/// Placeholders: `{value}` (0-100 percentage), `{freq}` and `{ms}`. The
/// rendered line runs through `sh -c`, so quoting behaves as in a shell.
/// Commands are spawned without waiting; finished ones are reaped on the next
/// call and a failing exit status is logged there.
#[derive(Debug)]
pub struct CommandActuator {
    template: String,
    running: Vec<Child>,
}

impl CommandActuator {
    /// Wrap a command template
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            running: Vec::new(),
        }
    }

    /// Template with placeholders substituted
    #[must_use]
    pub fn render(&self, substitutions: &[(&str, String)]) -> String {
        substitutions
            .iter()
            .fold(self.template.clone(), |cmd, (key, value)| cmd.replace(&format!("{{{key}}}"), value))
    }

    /// Commands spawned and not yet seen to exit
    #[must_use]
    pub fn pending(&self) -> usize {
        self.running.len()
    }

    /// Block until every spawned command has exited
    ///
    /// # Errors
    ///
    /// Returns `Error::Actuator` if waiting failed or a command exited unsuccessfully
    pub fn wait(&mut self) -> Result<()> {
        let mut failure = None;
        for mut child in self.running.drain(..) {
            match child.wait() {
                Ok(status) if status.success() => {}
                Ok(status) => failure = Some(format!("Actuator command exited with {status}")),
                Err(e) => failure = Some(format!("Failed to wait for actuator command: {e}")),
            }
        }
        failure.map_or(Ok(()), |msg| Err(Error::Actuator(msg)))
    }

    fn reap(&mut self) {
        self.running.retain_mut(|child| match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                if !status.success() {
                    warn!("Actuator command exited with {}", status);
                }
                false
            }
            Err(e) => {
                warn!("Failed to poll actuator command: {}", e);
                false
            }
        });
    }

    fn run(&mut self, substitutions: &[(&str, String)]) -> Result<()> {
        self.reap();

        let command_line = self.render(substitutions);
        if command_line.trim().is_empty() {
            return Err(Error::Actuator("Empty actuator command".to_string()));
        }

        debug!("Running actuator command: {}", command_line);
        let child = Command::new("sh")
            .arg("-c")
            .arg(&command_line)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|e| Error::Actuator(format!("Failed to run '{command_line}': {e}")))?;
        self.running.push(child);
        Ok(())
    }
}

impl VolumeActuator for CommandActuator {
    fn set_volume(&mut self, scalar: f64) -> Result<()> {
        self.run(&[("value", f64_to_percent(scalar * 100.0).to_string())])
    }
}

impl BrightnessActuator for CommandActuator {
    fn set_brightness(&mut self, percent: u8) -> Result<()> {
        self.run(&[("value", percent.to_string())])
    }
}

impl AudioCueSink for CommandActuator {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<()> {
        self.run(&[("freq", frequency_hz.to_string()), ("ms", duration_ms.to_string())])
    }
}

/// The full set of collaborators the application dispatches to
pub struct Sinks {
    pub audio: Box<dyn AudioCueSink>,
    pub volume: Box<dyn VolumeActuator>,
    pub brightness: Box<dyn BrightnessActuator>,
    pub keys: Box<dyn KeyPressSink>,
    pub screenshots: Box<dyn ScreenshotSink>,
    pub overlay: Box<dyn OverlaySink>,
    /// Directory screenshot file names are joined onto
    pub screenshot_dir: PathBuf,
}

impl Sinks {
    /// Every collaborator logs instead of acting
    #[must_use]
    pub fn dry_run() -> Self {
        Self {
            audio: Box::new(LoggingSinks::default()),
            volume: Box::new(LoggingSinks::default()),
            brightness: Box::new(LoggingSinks::default()),
            keys: Box::new(LoggingSinks::default()),
            screenshots: Box::new(LoggingSinks::default()),
            overlay: Box::new(LoggingSinks::default()),
            screenshot_dir: PathBuf::from("."),
        }
    }

    /// Carry out one effect
    ///
    /// # Errors
    ///
    /// Returns whatever the responsible sink reported
    pub fn dispatch(&mut self, effect: &Effect) -> Result<()> {
        match effect {
            Effect::Tone(tone) => self.audio.play_tone(tone.frequency_hz, tone.duration_ms),
            Effect::KeyPress { key } => self.keys.press_key(key),
            Effect::Screenshot { filename } => {
                let path = self.screenshot_dir.join(filename);
                self.screenshots.capture(&path)
            }
            Effect::Actuate(ActuatorCommand::Volume(scalar)) => self.volume.set_volume(*scalar),
            Effect::Actuate(ActuatorCommand::Brightness(percent)) => self.brightness.set_brightness(*percent),
        }
    }

    /// Carry out every effect, logging failures and returning how many failed
    pub fn dispatch_all(&mut self, effects: &[Effect]) -> usize {
        let mut failures = 0;
        for effect in effects {
            if let Err(e) = self.dispatch(effect) {
                warn!("Effect {:?} failed: {}", effect, e);
                failures += 1;
            }
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl Recorder {
        fn push(&self, s: String) {
            self.0.lock().unwrap().push(s);
        }
        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }
    }

    impl KeyPressSink for Recorder {
        fn press_key(&mut self, key: &str) -> Result<()> {
            self.push(format!("key:{key}"));
            Ok(())
        }
    }

    impl ScreenshotSink for Recorder {
        fn capture(&mut self, path: &Path) -> Result<()> {
            self.push(format!("shot:{}", path.display()));
            Err(Error::X11("no display".to_string()))
        }
    }

    #[test]
    fn test_dispatch_routes_effects_and_counts_failures() {
        let recorder = Recorder::default();
        let mut sinks = Sinks::dry_run();
        sinks.keys = Box::new(recorder.clone());
        sinks.screenshots = Box::new(recorder.clone());
        sinks.screenshot_dir = PathBuf::from("shots");

        let effects = vec![
            Effect::KeyPress { key: "space" },
            Effect::Screenshot {
                filename: "screenshot_0.png".to_string(),
            },
            Effect::Actuate(ActuatorCommand::Brightness(40)),
        ];
        assert_eq!(sinks.dispatch_all(&effects), 1);
        let expected_shot = format!("shot:{}", Path::new("shots").join("screenshot_0.png").display());
        assert_eq!(recorder.take(), vec!["key:space".to_string(), expected_shot]);
    }

    #[test]
    fn test_command_template_substitution() {
        let cmd = CommandActuator::new("pactl set-sink-volume @DEFAULT_SINK@ {value}%");
        assert_eq!(
            cmd.render(&[("value", "42".to_string())]),
            "pactl set-sink-volume @DEFAULT_SINK@ 42%"
        );
        let tone = CommandActuator::new("beep -f {freq} -l {ms}");
        assert_eq!(
            tone.render(&[("freq", "1200".to_string()), ("ms", "300".to_string())]),
            "beep -f 1200 -l 300"
        );
    }

    #[test]
    fn test_command_runs_through_shell_with_quoting() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out file.txt");
        let mut cmd = CommandActuator::new(format!("printf '%s' {{value}} > '{}'", out.display()));

        cmd.set_brightness(42).unwrap();
        cmd.wait().unwrap();
        assert_eq!(cmd.pending(), 0);
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "42");
    }

    #[test]
    fn test_failing_command_is_reported_on_wait() {
        let mut cmd = CommandActuator::new("exit 3");
        assert!(cmd.set_volume(0.5).is_ok());
        assert!(matches!(cmd.wait(), Err(Error::Actuator(_))));
    }

    #[test]
    fn test_finished_commands_are_reaped() {
        let mut cmd = CommandActuator::new("true");
        cmd.play_tone(1200, 300).unwrap();
        cmd.wait().unwrap();
        cmd.play_tone(500, 400).unwrap();
        assert!(cmd.pending() <= 1);
        cmd.wait().unwrap();
    }

    #[test]
    fn test_empty_command_is_an_error() {
        let mut cmd = CommandActuator::new("   ");
        assert!(matches!(cmd.set_brightness(10), Err(Error::Actuator(_))));
    }
}
