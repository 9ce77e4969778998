//! The block of characters the rain is drawn from.

use rand::Rng;

/// First code point of the katakana block.
pub const KATAKANA_START: u32 = 0x30A0;

/// Number of code points in the katakana block.
pub const KATAKANA_COUNT: u32 = 96;

/// Errors building a [`GlyphBlock`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GlyphBlockError {
    #[error("glyph block is empty")]
    Empty,
    #[error("U+{0:04X} is not a valid character")]
    InvalidCodePoint(u32),
}

/// A contiguous run of Unicode code points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBlock {
    chars: Vec<char>,
}

impl GlyphBlock {
    /// Build the block `start..start + count`.
    pub fn new(start: u32, count: u32) -> Result<Self, GlyphBlockError> {
        if count == 0 {
            return Err(GlyphBlockError::Empty);
        }
        let chars = (0..count)
            .map(|i| {
                let cp = start.saturating_add(i);
                char::from_u32(cp).ok_or(GlyphBlockError::InvalidCodePoint(cp))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { chars })
    }

    /// U+30A0..U+30FF.
    pub fn katakana() -> Self {
        let chars = (0..KATAKANA_COUNT)
            .filter_map(|i| char::from_u32(KATAKANA_START + i))
            .collect();
        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// Pick one glyph uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        self.chars[rng.gen_range(0..self.chars.len())]
    }
}

impl Default for GlyphBlock {
    fn default() -> Self {
        Self::katakana()
    }
}
