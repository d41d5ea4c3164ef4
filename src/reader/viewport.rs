/// Viewport-derived page capacity
///
/// The page capacity is a rough "characters that fill the screen" estimate
/// derived from the viewport area. The constant below folds together an
/// assumed 16px glyph and a 2.5x line-spacing factor; any fixed constant
/// works as long as it stays stable per device configuration, because page
/// indices (and therefore persisted bookmarks) depend on it.

/// Approximate screen area consumed by one character, in square pixels
const CHAR_WEIGHT: f32 = 16.0 * 2.5;

/// Display dimensions of the reading surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Estimate how many characters fit on one page of this viewport.
    ///
    /// A degenerate viewport can produce zero; the paginator rejects that
    /// as an invalid capacity rather than producing a corrupt page count.
    pub fn page_capacity(&self) -> usize {
        let area = self.width as f32 * self.height as f32;
        (area / CHAR_WEIGHT).floor() as usize
    }
}
