//! Colour blending and presentation for the cell surface.

use katarain_core::{Brightness, Rgba};
use ratatui::style::Color;

/// Presented ink fainter than this on every channel is not drawn.
pub const FADE_CUTOFF: u8 = 16;

/// Composite `src` over `dst` using the source alpha.
pub fn blend(dst: [f32; 3], src: Rgba) -> [f32; 3] {
    let a = src.a.clamp(0.0, 1.0);
    let src = src.channels();
    [
        dst[0] + (src[0] - dst[0]) * a,
        dst[1] + (src[1] - dst[1]) * a,
        dst[2] + (src[2] - dst[2]) * a,
    ]
}

/// Map stored ink to a terminal colour through an optional brightness filter.
///
/// Returns `None` once the ink has faded below [`FADE_CUTOFF`].
pub fn present(ink: [f32; 3], filter: Option<Brightness>) -> Option<Color> {
    let filter = filter.unwrap_or(Brightness::new(1.0));
    let [r, g, b] = ink.map(|c| filter.apply(c));

    if r.max(g).max(b) < FADE_CUTOFF {
        return None;
    }
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_trail_fades() {
        let ink = blend([0.0, 255.0, 0.0], Rgba::new(0, 0, 0, 0.05));
        assert_eq!(ink[0], 0.0);
        assert!((ink[1] - 242.25).abs() < 1e-3);
    }

    #[test]
    fn test_blend_opaque_replaces() {
        let ink = blend([10.0, 20.0, 30.0], Rgba::opaque(0, 255, 0));
        assert_eq!(ink, [0.0, 255.0, 0.0]);
    }

    #[test]
    fn test_present_applies_filter() {
        let ink = [0.0, 100.0, 0.0];
        assert_eq!(present(ink, None), Some(Color::Rgb(0, 100, 0)));
        assert_eq!(
            present(ink, Some(Brightness::new(1.5))),
            Some(Color::Rgb(0, 150, 0))
        );
        assert_eq!(
            present(ink, Some(Brightness::new(0.5))),
            Some(Color::Rgb(0, 50, 0))
        );
    }

    #[test]
    fn test_present_hides_faded_ink() {
        assert_eq!(present([0.0, 10.0, 0.0], None), None);
        // Dimming can push ink below the cutoff.
        assert_eq!(present([0.0, 20.0, 0.0], Some(Brightness::new(0.5))), None);
    }
}
