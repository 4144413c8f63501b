//! Axis mirroring
//!
//! Mirrors every component of a layout in place, each in its own
//! coordinate space. Samples are moved as raw bit patterns of their storage
//! width, so any sample format can be flipped; padding bytes between
//! samples and at row ends stay where they are.

use crate::TransformResult;
use planediff_core::{Component, ImageLayout};

/// Mirror axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Reverse every row (left-right mirror)
    X,
    /// Reverse the row order (top-bottom mirror)
    Y,
}

/// In-place mirror along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flip {
    axis: Axis,
}

impl Flip {
    /// Create a mirror along `axis`.
    pub fn new(axis: Axis) -> Self {
        Flip { axis }
    }

    /// The mirror axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Mirror every component of `layout`.
    pub fn apply(&self, layout: &mut ImageLayout) -> TransformResult<()> {
        for comp in layout.components_mut() {
            match self.axis {
                Axis::X => flip_x(comp),
                Axis::Y => flip_y(comp),
            }
        }
        Ok(())
    }
}

/// Swap column `x` with column `width - 1 - x` in every row.
fn flip_x(comp: &mut Component) {
    let w = comp.width() as usize;
    let n = comp.format().storage_bytes();
    let bpp = comp.bytes_per_pixel();
    for y in 0..comp.height() {
        let row = comp.row_mut(y);
        for x in 0..w / 2 {
            let a = x * bpp;
            let b = (w - 1 - x) * bpp;
            let (left, right) = row.split_at_mut(b);
            left[a..a + n].swap_with_slice(&mut right[..n]);
        }
    }
}

/// Swap row `y` with row `height - 1 - y`.
fn flip_y(comp: &mut Component) {
    let h = comp.height() as usize;
    let w = comp.width() as usize;
    let n = comp.format().storage_bytes();
    let bpp = comp.bytes_per_pixel();
    let bpr = comp.bytes_per_row();
    let data = comp.data_mut();
    for y in 0..h / 2 {
        let (top, bottom) = data.split_at_mut((h - 1 - y) * bpr);
        let upper = &mut top[y * bpr..(y + 1) * bpr];
        let lower = &mut bottom[..bpr];
        for x in 0..w {
            let off = x * bpp;
            upper[off..off + n].swap_with_slice(&mut lower[off..off + n]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planediff_core::SampleFormat;

    fn layout_4x3() -> ImageLayout {
        let fmt = SampleFormat::unsigned(8).unwrap();
        let values: Vec<u8> = (1..=12).collect();
        ImageLayout::new(vec![Component::from_samples(4, 3, fmt, &values).unwrap()])
    }

    fn samples(layout: &ImageLayout) -> Vec<u8> {
        layout.component(0).unwrap().to_samples::<u8>().unwrap()
    }

    #[test]
    fn test_flip_x() {
        let mut img = layout_4x3();
        Flip::new(Axis::X).apply(&mut img).unwrap();
        assert_eq!(samples(&img), vec![4, 3, 2, 1, 8, 7, 6, 5, 12, 11, 10, 9]);
    }

    #[test]
    fn test_flip_y() {
        let mut img = layout_4x3();
        Flip::new(Axis::Y).apply(&mut img).unwrap();
        assert_eq!(samples(&img), vec![9, 10, 11, 12, 5, 6, 7, 8, 1, 2, 3, 4]);
    }

    #[test]
    fn test_flip_keeps_metadata() {
        let mut img = layout_4x3();
        Flip::new(Axis::Y).apply(&mut img).unwrap();
        let c = img.component(0).unwrap();
        assert_eq!((c.width(), c.height(), c.bytes_per_row()), (4, 3, 4));
        assert_eq!((img.width(), img.height()), (4, 3));
    }

    #[test]
    fn test_flip_wide_samples() {
        let fmt = SampleFormat::signed(16).unwrap();
        let comp = Component::from_samples(3, 1, fmt, &[-300i16, 0, 7]).unwrap();
        let mut img = ImageLayout::new(vec![comp]);
        Flip::new(Axis::X).apply(&mut img).unwrap();
        let out = img.component(0).unwrap().to_samples::<i16>().unwrap();
        assert_eq!(out, vec![7, 0, -300]);
    }

    #[test]
    fn test_flip_preserves_padding() {
        // 2x2 samples, interleaved with a foreign byte, one spare byte per row
        let fmt = SampleFormat::unsigned(8).unwrap();
        let data = vec![1, 0xEE, 2, 0xEE, 0xFF, 3, 0xEE, 4, 0xEE, 0xFF];
        let comp = Component::from_raw(2, 2, fmt, 2, 5, data).unwrap();
        let mut img = ImageLayout::new(vec![comp]);
        Flip::new(Axis::X).apply(&mut img).unwrap();
        Flip::new(Axis::Y).apply(&mut img).unwrap();
        assert_eq!(
            img.component(0).unwrap().data(),
            &[4, 0xEE, 3, 0xEE, 0xFF, 2, 0xEE, 1, 0xEE, 0xFF]
        );
    }

    #[test]
    fn test_single_row_and_column() {
        let fmt = SampleFormat::unsigned(8).unwrap();
        let comp = Component::from_samples(1, 1, fmt, &[9u8]).unwrap();
        let mut img = ImageLayout::new(vec![comp]);
        Flip::new(Axis::X).apply(&mut img).unwrap();
        Flip::new(Axis::Y).apply(&mut img).unwrap();
        assert_eq!(samples(&img), vec![9]);
    }
}
