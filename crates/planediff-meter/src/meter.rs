//! The stage contract shared by transforms and metrics
//!
//! A [`Meter`] consumes an image pair and an accumulator and returns the
//! updated accumulator. Transforms modify both layouts and pass the
//! accumulator through; metrics leave the layouts alone and return their
//! score.

use crate::MeterResult;
use planediff_core::ImageLayout;
use planediff_transform::{Axis, Downsampler, Flip, Upsampler};

/// One stage of a measurement pipeline.
pub trait Meter: Send {
    /// Run the stage on the pair (`src` is the reference).
    fn measure(
        &mut self,
        src: &mut ImageLayout,
        dst: &mut ImageLayout,
        acc: f64,
    ) -> MeterResult<f64>;

    /// Display name of the score this stage produces, `None` for
    /// transforms.
    fn name(&self) -> Option<&'static str>;

    /// Short description used in logs and error reports.
    fn describe(&self) -> String {
        self.name().unwrap_or("transform").to_string()
    }
}

impl Meter for Flip {
    fn measure(
        &mut self,
        src: &mut ImageLayout,
        dst: &mut ImageLayout,
        acc: f64,
    ) -> MeterResult<f64> {
        self.apply(src)?;
        self.apply(dst)?;
        Ok(acc)
    }

    fn name(&self) -> Option<&'static str> {
        None
    }

    fn describe(&self) -> String {
        match self.axis() {
            Axis::X => "flip x".to_string(),
            Axis::Y => "flip y".to_string(),
        }
    }
}

impl Meter for Downsampler {
    fn measure(
        &mut self,
        src: &mut ImageLayout,
        dst: &mut ImageLayout,
        acc: f64,
    ) -> MeterResult<f64> {
        self.apply_pair(src, dst)?;
        Ok(acc)
    }

    fn name(&self) -> Option<&'static str> {
        None
    }

    fn describe(&self) -> String {
        resample_label("downsample", self.scale_x(), self.scale_y(), self.chroma_only())
    }
}

impl Meter for Upsampler {
    fn measure(
        &mut self,
        src: &mut ImageLayout,
        dst: &mut ImageLayout,
        acc: f64,
    ) -> MeterResult<f64> {
        self.apply_pair(src, dst)?;
        Ok(acc)
    }

    fn name(&self) -> Option<&'static str> {
        None
    }

    fn describe(&self) -> String {
        resample_label("upsample", self.scale_x(), self.scale_y(), self.chroma_only())
    }
}

fn resample_label(op: &str, sx: u8, sy: u8, chroma_only: bool) -> String {
    if chroma_only {
        format!("{} {}x{} (chroma)", op, sx, sy)
    } else {
        format!("{} {}x{}", op, sx, sy)
    }
}
