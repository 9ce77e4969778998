//! Brightness filter applied to the whole surface.

use std::fmt;

/// A brightness multiplier applied at presentation time.
///
/// The filter never changes painted pixels; it scales them when the surface
/// is shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brightness(f32);

impl Brightness {
    /// Create a filter, treating negative or non-finite factors as zero.
    pub fn new(factor: f32) -> Self {
        if factor.is_finite() {
            Self(factor.max(0.0))
        } else {
            Self(0.0)
        }
    }

    pub fn factor(self) -> f32 {
        self.0
    }

    /// Scale an 8-bit channel, saturating at 255.
    pub fn apply(self, channel: f32) -> u8 {
        (channel * self.0).round().clamp(0.0, 255.0) as u8
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "brightness({})", self.0)
    }
}

/// Filters installed by pointer-enter and pointer-leave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverFilters {
    pub enter: Brightness,
    pub leave: Brightness,
}

impl Default for HoverFilters {
    fn default() -> Self {
        Self {
            enter: Brightness::new(1.5),
            leave: Brightness::new(0.5),
        }
    }
}
