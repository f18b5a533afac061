//! Landmark frame sources.
//!
//! The hand-landmark detector runs outside this crate. Its output arrives as
//! JSON lines, one frame per line:
//!
//! ```text
//! {"timestamp": 12.5, "hands": [{"handedness": "Right", "score": 0.97, "landmarks": [{"x": 0.5, "y": 0.4}, ...]}]}
//! ```
//!
//! Blank lines are skipped. `timestamp` and `score` are optional.

use crate::{landmarks::Frame, Error, Result};
use log::debug;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

/// Sequence of landmark frames
pub trait FrameSource {
    /// Next frame, or `None` once the stream has ended
    ///
    /// # Errors
    ///
    /// Returns `Error::FrameSource` for a line that cannot be parsed and
    /// `Error::Io` when reading fails. The source stays usable after a parse
    /// error.
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

/// Frames parsed from newline-delimited JSON
pub struct JsonLinesSource<R: BufRead> {
    reader: R,
    line: String,
    line_number: usize,
}

impl<R: BufRead> JsonLinesSource<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_number: 0,
        }
    }

    /// Lines consumed so far
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.line_number
    }
}

impl JsonLinesSource<BufReader<File>> {
    /// Read frames from a file
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be opened
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl JsonLinesSource<io::StdinLock<'static>> {
    /// Read frames from standard input
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> FrameSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                debug!("Landmark stream ended after {} lines", self.line_number);
                return Ok(None);
            }
            self.line_number += 1;

            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }

            return serde_json::from_str(trimmed)
                .map(Some)
                .map_err(|e| Error::FrameSource(format!("line {}: {e}", self.line_number)));
        }
    }
}

/// Frames held in memory, mostly for replaying recorded sessions
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    frames: std::collections::VecDeque<Frame>,
}

impl VecSource {
    /// Source yielding `frames` in order
    #[must_use]
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames: frames.into() }
    }
}

impl FrameSource for VecSource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        Ok(self.frames.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::Handedness;
    use std::io::Cursor;

    fn landmarks_json(n: usize) -> String {
        let points: Vec<String> = (0..n).map(|i| format!(r#"{{"x": 0.{i:02}, "y": 0.5}}"#)).collect();
        format!("[{}]", points.join(","))
    }

    #[test]
    fn test_parses_frames_and_skips_blank_lines() {
        let first = format!(
            r#"{{"timestamp": 1.5, "hands": [{{"handedness": "Right", "score": 0.9, "landmarks": {}}}]}}"#,
            landmarks_json(21)
        );
        let input = format!("{first}\n\n{{\"hands\": []}}\n");
        let mut source = JsonLinesSource::new(Cursor::new(input));

        let frame = source.next_frame().unwrap().unwrap();
        assert_eq!(frame.timestamp, Some(1.5));
        assert_eq!(frame.hands.len(), 1);
        assert_eq!(frame.hands[0].handedness, Handedness::Right);
        assert_eq!(frame.hands[0].landmarks.len(), 21);
        assert_eq!(frame.hands[0].landmarks[3].x, 0.03);
        assert_eq!(frame.hands[0].landmarks[3].z, 0.0);

        let frame = source.next_frame().unwrap().unwrap();
        assert_eq!(frame.timestamp, None);
        assert!(frame.hands.is_empty());

        assert!(source.next_frame().unwrap().is_none());
        assert_eq!(source.line_number(), 3);
    }

    #[test]
    fn test_bad_line_is_reported_and_stream_continues() {
        let input = "not json\n{\"hands\": []}\n";
        let mut source = JsonLinesSource::new(Cursor::new(input));
        match source.next_frame() {
            Err(Error::FrameSource(msg)) => assert!(msg.contains("line 1")),
            other => panic!("Expected FrameSource error, got {other:?}"),
        }
        assert!(source.next_frame().unwrap().is_some());
    }

    #[test]
    fn test_wrong_landmark_count_still_parses() {
        // Count is enforced by the controller, not the parser
        let input = format!("{{\"hands\": [{{\"handedness\": \"Left\", \"landmarks\": {}}}]}}\n", landmarks_json(5));
        let mut source = JsonLinesSource::new(Cursor::new(input));
        let frame = source.next_frame().unwrap().unwrap();
        assert_eq!(frame.hands[0].landmarks.len(), 5);
        assert!(frame.hands[0].validate().is_err());
    }

    #[test]
    fn test_vec_source() {
        let mut source = VecSource::new(vec![Frame::default(), Frame::default()]);
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_none());
    }
}
