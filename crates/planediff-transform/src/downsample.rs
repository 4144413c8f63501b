//! Box-filter downsampling
//!
//! Each destination sample is the mean of a `scale_x` x `scale_y` block of
//! source samples. Sums are kept in a wide accumulator, the mean is rounded
//! to nearest with ties away from zero and saturated into the component's
//! pixel range. Trailing rows and columns that do not fill a whole block
//! are dropped.

use crate::TransformResult;
use crate::resample::{Direction, Ratio, Resampling};
use crate::scratch::ScratchSet;
use planediff_core::{Component, ImageLayout, Sample, with_sample_type};

/// Integer-ratio box-filter downsampler.
///
/// Holds one [`ScratchSet`] per side of an image pair, so repeated calls on
/// same-shaped images recycle their buffers.
///
/// # Examples
///
/// ```
/// use planediff_core::{Component, ImageLayout, SampleFormat};
/// use planediff_transform::Downsampler;
///
/// let fmt = SampleFormat::unsigned(8).unwrap();
/// let plane = Component::from_samples(2, 2, fmt, &[10u8, 20, 30, 41]).unwrap();
/// let mut img = ImageLayout::new(vec![plane]);
///
/// Downsampler::new(2, 2, false).unwrap().apply(&mut img).unwrap();
/// assert_eq!(img.component(0).unwrap().get::<u8>(0, 0), 25);
/// ```
#[derive(Debug)]
pub struct Downsampler {
    ratio: Ratio,
    scratch: [ScratchSet; 2],
}

impl Downsampler {
    /// Create a downsampler. With `chroma_only` set, component 0 keeps its
    /// resolution and only the remaining components are reduced.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidScaleFactor`](crate::TransformError::InvalidScaleFactor)
    /// if either factor is 0.
    pub fn new(scale_x: u8, scale_y: u8, chroma_only: bool) -> TransformResult<Self> {
        Ok(Downsampler {
            ratio: Ratio::new(scale_x, scale_y, chroma_only)?,
            scratch: Default::default(),
        })
    }

    /// Horizontal factor.
    pub fn scale_x(&self) -> u8 {
        self.ratio.x
    }

    /// Vertical factor.
    pub fn scale_y(&self) -> u8 {
        self.ratio.y
    }

    /// Whether only chroma components are resampled.
    pub fn chroma_only(&self) -> bool {
        self.ratio.chroma_only
    }

    /// Downsample `layout` in place.
    pub fn apply(&mut self, layout: &mut ImageLayout) -> TransformResult<()> {
        let plan = Resampling::plan(layout, self.ratio, Direction::Down)?;
        let comps = render(&plan, layout, &mut self.scratch[0])?;
        self.scratch[0].install(layout, plan.width, plan.height, comps);
        Ok(())
    }

    /// Downsample both images of a pair, which must be compatible.
    ///
    /// Neither layout is modified unless both succeed.
    pub fn apply_pair(
        &mut self,
        src: &mut ImageLayout,
        dst: &mut ImageLayout,
    ) -> TransformResult<()> {
        src.test_if_compatible(dst)?;
        let src_plan = Resampling::plan(src, self.ratio, Direction::Down)?;
        let dst_plan = Resampling::plan(dst, self.ratio, Direction::Down)?;

        let [src_scratch, dst_scratch] = &mut self.scratch;
        let src_comps = render(&src_plan, src, src_scratch)?;
        let dst_comps = render(&dst_plan, dst, dst_scratch)?;
        src_scratch.install(src, src_plan.width, src_plan.height, src_comps);
        dst_scratch.install(dst, dst_plan.width, dst_plan.height, dst_comps);
        Ok(())
    }
}

fn render(
    plan: &Resampling,
    layout: &ImageLayout,
    scratch: &mut ScratchSet,
) -> TransformResult<Vec<Component>> {
    plan.render(layout, scratch, |src, dst, p| {
        with_sample_type!(p.kind, T => box_filter::<T>(src, dst, p.scale_x, p.scale_y))
    })
}

/// Average `sx` x `sy` blocks of `src` into `dst`.
fn box_filter<T: Sample>(src: &Component, dst: &mut Component, sx: u32, sy: u32) {
    let range = src.range();
    let count = sx * sy;
    for y in 0..dst.height() {
        for x in 0..dst.width() {
            let mut sum = T::ZERO;
            for dy in 0..sy {
                for dx in 0..sx {
                    sum = sum + src.get::<T>(x * sx + dx, y * sy + dy).widen();
                }
            }
            dst.set::<T>(x, y, T::box_mean(sum, count, &range));
        }
    }
}
