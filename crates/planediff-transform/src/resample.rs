//! Shared driver for the integer-ratio resamplers
//!
//! A resampling call runs in two phases. [`Resampling::plan`] validates
//! every component of a layout and computes its new shape without touching
//! anything; [`Resampling::render`] then fills one fresh buffer per
//! component. Only when every component has been rendered are the results
//! installed, so a failure leaves the layout unchanged.

use crate::scratch::ScratchSet;
use crate::{TransformError, TransformResult};
use planediff_core::{Component, Error, ImageLayout, SampleKind};

/// Resampling direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Down,
    Up,
}

/// Integer scale factors shared by both resamplers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ratio {
    pub x: u8,
    pub y: u8,
    /// Leave component 0 at full resolution
    pub chroma_only: bool,
}

impl Ratio {
    pub fn new(x: u8, y: u8, chroma_only: bool) -> TransformResult<Self> {
        if x == 0 || y == 0 {
            return Err(TransformError::InvalidScaleFactor(format!(
                "{}x{} (factors must be at least 1)",
                x, y
            )));
        }
        Ok(Ratio { x, y, chroma_only })
    }

    /// Scale factors applied to component `index`.
    fn for_component(&self, index: usize) -> (u8, u8) {
        if self.chroma_only && index == 0 {
            (1, 1)
        } else {
            (self.x, self.y)
        }
    }
}

/// Target shape of one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Plan {
    pub kind: SampleKind,
    pub scale_x: u32,
    pub scale_y: u32,
    pub width: u32,
    pub height: u32,
    pub sub_x: u8,
    pub sub_y: u8,
}

/// Target shape of a whole layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Resampling {
    pub width: u32,
    pub height: u32,
    pub plans: Vec<Plan>,
}

impl Resampling {
    /// Validate `layout` and compute the shape it will have after
    /// resampling by `ratio` in direction `dir`.
    pub fn plan(layout: &ImageLayout, ratio: Ratio, dir: Direction) -> TransformResult<Self> {
        let mut plans = Vec::with_capacity(layout.depth());
        for (i, comp) in layout.components().iter().enumerate() {
            let kind = comp.kind()?;
            let (sx, sy) = ratio.for_component(i);
            let chroma = ratio.chroma_only && i > 0;
            let (width, height, sub_x, sub_y) = match dir {
                Direction::Down => {
                    let w = comp.width() / u32::from(sx);
                    let h = comp.height() / u32::from(sy);
                    if w == 0 || h == 0 {
                        return Err(Error::InvalidDimension {
                            width: w,
                            height: h,
                        }
                        .into());
                    }
                    let (bx, by) = if chroma {
                        let bx = comp.sub_x().checked_mul(sx);
                        let by = comp.sub_y().checked_mul(sy);
                        bx.zip(by).ok_or_else(|| overflow(comp, sx, sy))?
                    } else {
                        (comp.sub_x(), comp.sub_y())
                    };
                    (w, h, bx, by)
                }
                Direction::Up => {
                    let w = comp.width().checked_mul(u32::from(sx));
                    let h = comp.height().checked_mul(u32::from(sy));
                    let (w, h) = w.zip(h).ok_or_else(|| overflow(comp, sx, sy))?;
                    let (bx, by) = if chroma {
                        ((comp.sub_x() / sx).max(1), (comp.sub_y() / sy).max(1))
                    } else {
                        (comp.sub_x(), comp.sub_y())
                    };
                    (w, h, bx, by)
                }
            };
            plans.push(Plan {
                kind,
                scale_x: u32::from(sx),
                scale_y: u32::from(sy),
                width,
                height,
                sub_x,
                sub_y,
            });
        }

        let (width, height) = if ratio.chroma_only {
            (layout.width(), layout.height())
        } else {
            let (sx, sy) = (u32::from(ratio.x), u32::from(ratio.y));
            match dir {
                Direction::Down => (layout.width() / sx, layout.height() / sy),
                Direction::Up => (
                    layout.width().saturating_mul(sx),
                    layout.height().saturating_mul(sy),
                ),
            }
        };
        Ok(Resampling {
            width,
            height,
            plans,
        })
    }

    /// Render every component of `layout` into a fresh packed buffer drawn
    /// from `scratch`. `fill` computes the samples of one component.
    pub fn render<F>(
        &self,
        layout: &ImageLayout,
        scratch: &mut ScratchSet,
        mut fill: F,
    ) -> TransformResult<Vec<Component>>
    where
        F: FnMut(&Component, &mut Component, &Plan),
    {
        let mut out = Vec::with_capacity(self.plans.len());
        for (i, (src, plan)) in layout.components().iter().zip(&self.plans).enumerate() {
            let bpp = src.format().storage_bytes();
            let bpr = bpp * plan.width as usize;
            let buf = scratch.acquire(i, bpr * plan.height as usize)?;
            let mut dst = Component::from_raw(plan.width, plan.height, src.format(), bpp, bpr, buf)?
                .with_subsampling(plan.sub_x, plan.sub_y)?;
            log::debug!(
                "component {}: {}x{} -> {}x{}, subsampling {}x{}",
                i,
                src.width(),
                src.height(),
                plan.width,
                plan.height,
                plan.sub_x,
                plan.sub_y
            );
            fill(src, &mut dst, plan);
            out.push(dst);
        }
        Ok(out)
    }
}

fn overflow(comp: &Component, sx: u8, sy: u8) -> TransformError {
    TransformError::InvalidScaleFactor(format!(
        "{}x{} with subsampling {}x{} cannot be scaled by {}x{}",
        comp.width(),
        comp.height(),
        comp.sub_x(),
        comp.sub_y(),
        sx,
        sy
    ))
}
