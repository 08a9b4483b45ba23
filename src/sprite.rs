//! Sprite-sheet animation bookkeeping.
//!
//! Frames are cells of a uniform grid on one sheet. The animator only picks
//! the cell to show; drawing it is left to the caller.

use macroquad::prelude::*;
use std::collections::HashMap;
use tracing::warn;

/// Linear interpolation from `start` to `end`.
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// Named frame sequences over one sprite sheet, with a frame clock.
#[derive(Debug, Clone)]
pub struct SpriteAnimator {
    frame_size: UVec2,
    frame_time: f32,
    sequences: HashMap<String, Vec<UVec2>>,
    current: Option<String>,
    frame: usize,
    elapsed: f32,
}

impl SpriteAnimator {
    /// `frame_time` is in seconds.
    pub fn new(frame_size: UVec2, frame_time: f32) -> Self {
        Self {
            frame_size,
            frame_time,
            sequences: HashMap::new(),
            current: None,
            frame: 0,
            elapsed: 0.0,
        }
    }

    /// Adds a sequence of `(column, row)` cells. Refuses empty sequences and
    /// names already in use.
    pub fn add_sequence(&mut self, name: impl Into<String>, frames: Vec<(u32, u32)>) -> bool {
        let name = name.into();
        if frames.is_empty() {
            warn!(sequence = %name, "empty animation sequence ignored");
            return false;
        }
        if self.sequences.contains_key(&name) {
            warn!(sequence = %name, "animation sequence already exists");
            return false;
        }
        let cells = frames.into_iter().map(|(c, r)| uvec2(c, r)).collect();
        self.sequences.insert(name, cells);
        true
    }

    /// Whether `name` was registered.
    pub fn has_sequence(&self, name: &str) -> bool {
        self.sequences.contains_key(name)
    }

    /// Base seconds per frame.
    pub fn frame_time(&self) -> f32 {
        self.frame_time
    }

    /// Plays `sequence` for `dt` seconds. Returns `false` for unknown names.
    /// A non-finite `dt` leaves the frame clock untouched.
    pub fn advance(&mut self, sequence: &str, dt: f32) -> bool {
        self.advance_with(sequence, dt, self.frame_time)
    }

    /// Like [`Self::advance`] but with a one-off frame time.
    pub fn advance_with(&mut self, sequence: &str, dt: f32, frame_time: f32) -> bool {
        let Some(len) = self.sequences.get(sequence).map(Vec::len) else {
            return false;
        };

        if self.current.as_deref() != Some(sequence) {
            self.current = Some(sequence.to_owned());
            self.frame = 0;
            self.elapsed = 0.0;
        }

        if !dt.is_finite() || frame_time.is_nan() || frame_time <= 0.0 {
            return true;
        }

        self.elapsed += dt.max(0.0);
        if self.elapsed >= frame_time {
            // `as` saturates on huge step counts.
            let steps = (self.elapsed / frame_time) as usize;
            self.frame = (self.frame + steps % len) % len;
            self.elapsed %= frame_time;
        }
        true
    }

    /// Frame index within the playing sequence.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Name of the sequence last played.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Sheet rectangle of the frame to draw for `sequence`. A sequence that
    /// is not playing shows its first frame.
    pub fn source_rect(&self, sequence: &str) -> Option<Rect> {
        let frames = self.sequences.get(sequence)?;
        let index = if self.current.as_deref() == Some(sequence) {
            self.frame % frames.len()
        } else {
            0
        };
        let cell = frames[index] * self.frame_size;
        Some(Rect::new(
            cell.x as f32,
            cell.y as f32,
            self.frame_size.x as f32,
            self.frame_size.y as f32,
        ))
    }
}
