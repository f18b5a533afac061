//! Error types for the hand gesture control library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// A hand observation did not carry the expected landmark set
    #[error("Invalid landmark set: expected {expected} landmarks, got {actual}")]
    InvalidLandmarks {
        /// Number of landmarks the classifier indexes into
        expected: usize,
        /// Number of landmarks actually supplied
        actual: usize,
    },

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Screenshot encoding failed
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// `X11` window system operation failed
    #[error("X11 error: {0}")]
    X11(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Landmark stream could not be read or parsed
    #[error("Frame source error: {0}")]
    FrameSource(String),

    /// Volume, brightness or tone actuation failed
    #[error("Actuator error: {0}")]
    Actuator(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic I/O error with description
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Application-specific error type (alias for main Error type)
pub type AppError = Error;

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
