//! Line-number gutter geometry.
//!
//! The gutter owns no state of its own. Its width is a function of the line
//! count and the font; what it paints is a function of the scroll offset,
//! the region being repainted and the layout of the document's blocks. Both
//! are recomputed on every repaint.
//!
//! ## Coordinates
//!
//! `BlockLayout` reports block tops in document coordinates (0 is the top of
//! the scrolled content). Labels come out in gutter coordinates, i.e. with
//! the scroll offset already subtracted, so they line up with the text the
//! editor is currently showing.

use crate::config::GutterConfig;

/// Layout queries the gutter makes against its editor.
pub trait BlockLayout {
    /// Number of blocks (logical lines) in the document.
    fn block_count(&self) -> usize;

    /// Returns `(top, height)` of block `index` in document coordinates.
    fn block_bounds(&self, index: usize) -> Option<(f32, f32)>;

    /// Returns the index of the block containing document coordinate `y`,
    /// clamped to the first and last block.
    fn block_at(&self, y: f32) -> usize;
}

/// Font measurements the gutter depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Horizontal advance of a single digit glyph
    pub digit_advance: f32,
    /// Height of one line of text
    pub line_height: f32,
}

impl FontMetrics {
    /// Metrics for a monospace font of `size` pixels.
    ///
    /// Monospace digits advance roughly 0.6 em.
    pub fn monospace(size: f32, line_height_factor: f32) -> Self {
        Self {
            digit_advance: size * 0.6,
            line_height: size * line_height_factor,
        }
    }
}

/// Vertical span being repainted, in gutter coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintRegion {
    pub top: f32,
    pub bottom: f32,
}

impl PaintRegion {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    /// Region covering a viewport of the given height.
    pub fn viewport(height: f32) -> Self {
        Self::new(0.0, height)
    }
}

/// One line number to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLabel {
    /// 1-based line number
    pub number: usize,
    /// Text to draw, right-aligned within the gutter
    pub text: String,
    /// Top of the line in gutter coordinates
    pub y: f32,
    /// Height of the line
    pub height: f32,
}

/// Width policy and painter for the line-number gutter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineNumberGutter {
    margin: f32,
    min_digits: usize,
}

impl LineNumberGutter {
    pub fn new(config: GutterConfig) -> Self {
        Self {
            margin: config.margin,
            min_digits: config.min_digits,
        }
    }

    /// Number of decimal digits in `line_count`.
    pub fn digits(line_count: usize) -> usize {
        line_count.checked_ilog10().map_or(1, |d| d as usize + 1)
    }

    /// Columns reserved for numbers: the digit count, but never below the minimum.
    pub fn columns(&self, line_count: usize) -> usize {
        Self::digits(line_count).max(self.min_digits)
    }

    /// Pixel width needed to show numbers up to `line_count`.
    pub fn width(&self, line_count: usize, metrics: FontMetrics) -> f32 {
        self.margin + self.columns(line_count) as f32 * metrics.digit_advance
    }

    /// Labels for every block intersecting `region`, starting from the block
    /// under the topmost visible pixel.
    pub fn paint<L>(&self, layout: &L, scroll_offset: f32, region: PaintRegion) -> Vec<LineLabel>
    where
        L: BlockLayout + ?Sized,
    {
        if layout.block_count() == 0 {
            return Vec::new();
        }
        let first = layout.block_at(scroll_offset);
        self.paint_from(layout, first + 1, scroll_offset, region)
    }

    /// Labels for every block intersecting `region`, starting the scan at the
    /// 1-based line `first_line`.
    pub fn paint_from<L>(
        &self,
        layout: &L,
        first_line: usize,
        scroll_offset: f32,
        region: PaintRegion,
    ) -> Vec<LineLabel>
    where
        L: BlockLayout + ?Sized,
    {
        let mut labels = Vec::new();
        let count = layout.block_count();
        let mut index = first_line.saturating_sub(1);

        let Some((block_top, block_height)) = layout.block_bounds(index) else {
            return labels;
        };
        let mut top = block_top - scroll_offset;
        let mut bottom = top + block_height;

        while index < count && top <= region.bottom {
            if bottom >= region.top {
                let number = index + 1;
                labels.push(LineLabel {
                    number,
                    text: number.to_string(),
                    y: top,
                    height: bottom - top,
                });
            }

            index += 1;
            top = bottom;
            bottom = top + layout.block_bounds(index).map_or(0.0, |(_, h)| h);
        }

        labels
    }
}

impl Default for LineNumberGutter {
    fn default() -> Self {
        Self::new(GutterConfig::default())
    }
}

/// Layout of an unwrapped document where every line has the same height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformLayout {
    pub line_count: usize,
    pub line_height: f32,
    /// Space above the first line (editor padding)
    pub top_padding: f32,
}

impl BlockLayout for UniformLayout {
    fn block_count(&self) -> usize {
        self.line_count
    }

    fn block_bounds(&self, index: usize) -> Option<(f32, f32)> {
        (index < self.line_count).then(|| {
            (
                self.top_padding + index as f32 * self.line_height,
                self.line_height,
            )
        })
    }

    fn block_at(&self, y: f32) -> usize {
        if self.line_count == 0 || self.line_height <= 0.0 {
            return 0;
        }
        let row = ((y - self.top_padding) / self.line_height).floor().max(0.0) as usize;
        row.min(self.line_count - 1)
    }
}
