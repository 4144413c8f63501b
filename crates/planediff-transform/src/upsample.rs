//! Bilinear upsampling
//!
//! Destination sample `x` is centered between source samples `xo` and
//! `xo + 1`:
//!
//! ```text
//! half = scale >> 1
//! f    = 0.0 for odd scale, 0.5 for even scale
//! xo   = (x + scale - half) / scale - 1
//! wx   = (x - xo * scale - half + f) / scale      in [0, 1)
//! ```
//!
//! and likewise for `y`. Neighbours outside the source are replaced by the
//! nearest edge sample. The four neighbours are blended in `f64`, saturated
//! into the pixel range and cast to the storage type, truncating toward
//! zero for integers.

use crate::TransformResult;
use crate::resample::{Direction, Ratio, Resampling};
use crate::scratch::ScratchSet;
use planediff_core::{Component, ImageLayout, Sample, with_sample_type};

/// Left neighbour index and the weight of the right neighbour for
/// destination position `pos` at integer `scale`.
pub fn weights(pos: u32, scale: u32) -> (i64, f64) {
    let s = i64::from(scale);
    let p = i64::from(pos);
    let half = s >> 1;
    let f = if scale & 1 == 1 { 0.0 } else { 0.5 };
    let o = (p + s - half) / s - 1;
    let w = ((p - o * s - half) as f64 + f) / s as f64;
    (o, w)
}

/// Integer-ratio bilinear upsampler.
///
/// Holds one [`ScratchSet`] per side of an image pair.
#[derive(Debug)]
pub struct Upsampler {
    ratio: Ratio,
    scratch: [ScratchSet; 2],
}

impl Upsampler {
    /// Create an upsampler. With `chroma_only` set, component 0 keeps its
    /// resolution and only the remaining components are enlarged.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidScaleFactor`](crate::TransformError::InvalidScaleFactor)
    /// if either factor is 0.
    pub fn new(scale_x: u8, scale_y: u8, chroma_only: bool) -> TransformResult<Self> {
        Ok(Upsampler {
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

    /// Upsample `layout` in place.
    pub fn apply(&mut self, layout: &mut ImageLayout) -> TransformResult<()> {
        let plan = Resampling::plan(layout, self.ratio, Direction::Up)?;
        let comps = render(&plan, layout, &mut self.scratch[0])?;
        self.scratch[0].install(layout, plan.width, plan.height, comps);
        Ok(())
    }

    /// Upsample both images of a pair, which must be compatible.
    ///
    /// Neither layout is modified unless both succeed.
    pub fn apply_pair(
        &mut self,
        src: &mut ImageLayout,
        dst: &mut ImageLayout,
    ) -> TransformResult<()> {
        src.test_if_compatible(dst)?;
        let src_plan = Resampling::plan(src, self.ratio, Direction::Up)?;
        let dst_plan = Resampling::plan(dst, self.ratio, Direction::Up)?;

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
        with_sample_type!(p.kind, T => bilinear::<T>(src, dst, p.scale_x, p.scale_y))
    })
}

/// Clamp a neighbour index into `0..len`.
#[inline]
fn edge(i: i64, len: u32) -> u32 {
    i.clamp(0, i64::from(len) - 1) as u32
}

fn bilinear<T: Sample>(src: &Component, dst: &mut Component, sx: u32, sy: u32) {
    let range = src.range();
    let (sw, sh) = (src.width(), src.height());

    let columns: Vec<(u32, u32, f64)> = (0..dst.width())
        .map(|x| {
            let (xo, wx) = weights(x, sx);
            (edge(xo, sw), edge(xo + 1, sw), wx)
        })
        .collect();

    for y in 0..dst.height() {
        let (yo, wy) = weights(y, sy);
        let (yt, yb) = (edge(yo, sh), edge(yo + 1, sh));
        for (x, &(xl, xr, wx)) in columns.iter().enumerate() {
            let lt = src.get::<T>(xl, yt).to_f64();
            let rt = src.get::<T>(xr, yt).to_f64();
            let lb = src.get::<T>(xl, yb).to_f64();
            let rb = src.get::<T>(xr, yb).to_f64();
            let v = (1.0 - wx) * (1.0 - wy) * lt
                + wx * (1.0 - wy) * rt
                + (1.0 - wx) * wy * lb
                + wx * wy * rb;
            dst.set::<T>(x as u32, y, T::from_f64(range.clamp_f64(v)));
        }
    }
}
