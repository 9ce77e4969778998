//! The fall-speed parameter and its keyboard controls.

/// Speed parameter of the rain. Never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropSpeed(f32);

impl DropSpeed {
    pub const DEFAULT: f32 = 0.5;

    /// Create a speed, clamping negative or non-finite values to zero.
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.max(0.0))
        } else {
            Self(0.0)
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Offset advance per frame, in glyph units.
    pub fn size_ratio(self) -> f32 {
        1.0 + self.0 / 100.0
    }

    pub fn increased(self, step: f32) -> Self {
        Self::new(self.0 + step)
    }

    /// Decrease by `step`, flooring at zero.
    pub fn decreased(self, step: f32) -> Self {
        Self::new(self.0 - step)
    }
}

impl Default for DropSpeed {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Increments applied by the arrow keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedControls {
    pub up_step: f32,
    pub down_step: f32,
}

impl Default for SpeedControls {
    fn default() -> Self {
        Self {
            up_step: 1.0,
            down_step: 10.0,
        }
    }
}
