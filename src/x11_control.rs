//! X11 key injection and screen capture.
//!
//! Key presses go through the XTest extension; screenshots read the root
//! window as a Z-pixmap and are encoded as PNG.

use crate::{
    error::{AppError, Result},
    sinks::{KeyPressSink, ScreenshotSink},
};
use log::{debug, info};
use std::path::Path;
use x11rb::{
    connection::Connection,
    protocol::{
        xproto::{ConnectionExt as _, ImageFormat, Keycode, Screen, KEY_PRESS_EVENT, KEY_RELEASE_EVENT},
        xtest::ConnectionExt as _,
    },
    rust_connection::RustConnection,
};

/// Map a logical key name to its X keysym
#[must_use]
pub fn keysym_for(key: &str) -> Option<u32> {
    match key.to_lowercase().as_str() {
        "space" => Some(0x0020),
        "return" | "enter" => Some(0xff0d),
        "escape" => Some(0xff1b),
        "tab" => Some(0xff09),
        "xf86audioplay" => Some(0x1008_ff14),
        _ => None,
    }
}

/// Convert a 32-bit BGRX Z-pixmap to packed RGB
///
/// # Errors
///
/// Returns an error if the buffer does not hold `width * height` pixels
pub fn bgrx_to_rgb(data: &[u8], width: u16, height: u16) -> Result<Vec<u8>> {
    let pixels = usize::from(width) * usize::from(height);
    if data.len() != pixels * 4 {
        return Err(AppError::X11(format!(
            "Unexpected image buffer of {} bytes for {}x{} at 32 bpp",
            data.len(),
            width,
            height
        )));
    }
    let mut rgb = Vec::with_capacity(pixels * 3);
    for px in data.chunks_exact(4) {
        rgb.extend_from_slice(&[px[2], px[1], px[0]]);
    }
    Ok(rgb)
}

/// X11 implementation of the key-press and screenshot sinks
pub struct X11Controller {
    connection: RustConnection,
    screen: Screen,
}

impl X11Controller {
    /// Connect to the default display
    pub fn new() -> Result<Self> {
        info!("Initializing X11 controller");

        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| AppError::X11(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| AppError::X11("Failed to get screen".to_string()))?
            .clone();

        info!(
            "Connected to X11 display, screen: {}x{}",
            screen.width_in_pixels, screen.height_in_pixels
        );

        Ok(Self { connection, screen })
    }

    /// Get screen dimensions
    pub const fn get_screen_size(&self) -> (u16, u16) {
        (self.screen.width_in_pixels, self.screen.height_in_pixels)
    }

    /// Find the keycode currently bound to `keysym`
    fn keycode_for(&self, keysym: u32) -> Result<Keycode> {
        let setup = self.connection.setup();
        let (min, max) = (setup.min_keycode, setup.max_keycode);
        let count = max.saturating_sub(min).saturating_add(1);

        let mapping = self
            .connection
            .get_keyboard_mapping(min, count)
            .map_err(|e| AppError::X11(format!("Failed to request keyboard mapping: {e}")))?
            .reply()
            .map_err(|e| AppError::X11(format!("Failed to read keyboard mapping: {e}")))?;

        let per_keycode = usize::from(mapping.keysyms_per_keycode);
        if per_keycode == 0 {
            return Err(AppError::X11("Empty keyboard mapping".to_string()));
        }
        mapping
            .keysyms
            .chunks(per_keycode)
            .position(|syms| syms.contains(&keysym))
            .and_then(|offset| u8::try_from(offset).ok())
            .map(|offset| min + offset)
            .ok_or_else(|| AppError::X11(format!("No keycode bound to keysym {keysym:#x}")))
    }

    fn fake_key(&self, event: u8, keycode: Keycode) -> Result<()> {
        self.connection
            .xtest_fake_input(event, keycode, x11rb::CURRENT_TIME, self.screen.root, 0, 0, 0)
            .map_err(|e| AppError::X11(format!("Failed to send fake input: {e}")))?;
        Ok(())
    }
}

impl KeyPressSink for X11Controller {
    fn press_key(&mut self, key: &str) -> Result<()> {
        let keysym = keysym_for(key).ok_or_else(|| AppError::InvalidInput(format!("Unknown key: {key}")))?;
        let keycode = self.keycode_for(keysym)?;
        debug!("Pressing '{}' (keycode {})", key, keycode);

        self.fake_key(KEY_PRESS_EVENT, keycode)?;
        self.fake_key(KEY_RELEASE_EVENT, keycode)?;
        self.connection
            .flush()
            .map_err(|e| AppError::X11(format!("Failed to flush connection: {e}")))?;
        Ok(())
    }
}

impl ScreenshotSink for X11Controller {
    fn capture(&mut self, path: &Path) -> Result<()> {
        let (width, height) = self.get_screen_size();
        let reply = self
            .connection
            .get_image(ImageFormat::Z_PIXMAP, self.screen.root, 0, 0, width, height, !0)
            .map_err(|e| AppError::X11(format!("Failed to request screen image: {e}")))?
            .reply()
            .map_err(|e| AppError::X11(format!("Failed to read screen image: {e}")))?;

        let rgb = bgrx_to_rgb(&reply.data, width, height)?;
        let image = image::RgbImage::from_raw(u32::from(width), u32::from(height), rgb)
            .ok_or_else(|| AppError::X11("Screen image size mismatch".to_string()))?;
        image.save(path)?;

        info!("Saved screenshot to {}", path.display());
        Ok(())
    }
}
