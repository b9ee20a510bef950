//! # Display Height
//!
//! Height of an editor view, in lines. It starts at the minimum, follows the
//! content upwards and never shrinks for the lifetime of the editor.

/// Height an editor starts with
pub const MIN_HEIGHT: usize = 9;

/// Height an editor never grows beyond
pub const MAX_HEIGHT: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayHeight {
    current: usize,
    max: usize,
}

impl DisplayHeight {
    pub fn new(min: usize, max: usize) -> Self {
        Self {
            current: min.min(max),
            max,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Grow towards `content_height` if there is room. Returns true on growth.
    pub fn observe(&mut self, content_height: usize) -> bool {
        if content_height > self.current && self.current < self.max {
            self.current = content_height.min(self.max);
            tracing::trace!("Display height grew to {}", self.current);
            true
        } else {
            false
        }
    }
}

impl Default for DisplayHeight {
    fn default() -> Self {
        Self::new(MIN_HEIGHT, MAX_HEIGHT)
    }
}
