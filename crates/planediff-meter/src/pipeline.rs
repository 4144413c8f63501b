//! Measurement pipelines
//!
//! A [`Pipeline`] runs an ordered list of [`Meter`] stages over one image
//! pair, threading an accumulator (starting at 0.0) from stage to stage.
//!
//! # Sequence String Format
//!
//! Stages are separated by `+`; whitespace and case are ignored.
//!
//! ## Transforms
//! - `fx` / `fy` - mirror both images left-right / top-bottom
//! - `d<sx>.<sy>` - box-filter downsample by `sx` x `sy`
//! - `u<sx>.<sy>` - bilinear upsample by `sx` x `sy`
//! - `dc<sx>.<sy>` / `uc<sx>.<sy>` - as above, chroma components only
//!
//! A single factor (`d2`) applies to both axes.
//!
//! ## Metrics
//! - `mse` - mean squared error
//! - `psnr` - peak signal to noise ratio
//! - `peak` - peak absolute error
//! - `pre` / `premin` - peak relative error, mean / minimum over components
//!
//! # Examples
//!
//! ```
//! use planediff_core::{Component, ImageLayout, SampleFormat};
//! use planediff_meter::Pipeline;
//!
//! let fmt = SampleFormat::unsigned(8).unwrap();
//! let mut src = ImageLayout::new(vec![Component::new(8, 8, fmt).unwrap()]);
//! let mut dst = src.clone();
//!
//! let mut pipeline = Pipeline::parse("fx + d2.2 + psnr").unwrap();
//! let report = pipeline.run(&mut src, &mut dst).unwrap();
//! assert_eq!(report.value(), f64::INFINITY);
//! assert_eq!(src.width(), 4);
//! ```

use crate::meter::Meter;
use crate::metrics::{Mse, PeakError, Pre, PreType, Psnr};
use crate::{MeterError, MeterResult};
use planediff_core::ImageLayout;
use planediff_transform::{Axis, Downsampler, Flip, Upsampler};

/// A named score produced by a metric stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// Display name of the metric
    pub name: &'static str,
    /// Score value
    pub value: f64,
}

/// Outcome of a pipeline run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineReport {
    value: f64,
    scores: Vec<Score>,
}

impl PipelineReport {
    /// Final accumulator value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Scores of all metric stages, in execution order.
    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    /// Value of the last metric stage with display name `name`.
    pub fn score(&self, name: &str) -> Option<f64> {
        self.scores
            .iter()
            .rev()
            .find(|s| s.name == name)
            .map(|s| s.value)
    }
}

/// An ordered list of stages
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Meter>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.stages.iter().map(|s| s.describe()))
            .finish()
    }
}

impl Pipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage.
    pub fn push<M: Meter + 'static>(&mut self, stage: M) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Append a stage, builder style.
    pub fn with<M: Meter + 'static>(mut self, stage: M) -> Self {
        self.push(stage);
        self
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Descriptions of all stages, in execution order.
    pub fn describe(&self) -> Vec<String> {
        self.stages.iter().map(|s| s.describe()).collect()
    }

    /// Parse a sequence string into a pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`MeterError::InvalidSequence`] for empty sequences, empty
    /// or unknown stages and malformed scale factors.
    pub fn parse(sequence: &str) -> MeterResult<Self> {
        if sequence.trim().is_empty() {
            return Err(MeterError::InvalidSequence("empty sequence".to_string()));
        }

        let mut pipeline = Pipeline::new();
        for (i, part) in sequence.split('+').enumerate() {
            let op: String = part
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_ascii_lowercase();
            if op.is_empty() {
                return Err(MeterError::InvalidSequence(format!(
                    "empty stage at position {}",
                    i + 1
                )));
            }
            pipeline.stages.push(parse_stage(&op)?);
        }
        Ok(pipeline)
    }

    /// Run every stage over the pair.
    ///
    /// `src` is the reference image. Transform stages modify both layouts.
    ///
    /// # Errors
    ///
    /// The first failing stage aborts the run with [`MeterError::Stage`].
    pub fn run(
        &mut self,
        src: &mut ImageLayout,
        dst: &mut ImageLayout,
    ) -> MeterResult<PipelineReport> {
        let mut report = PipelineReport::default();
        for (index, stage) in self.stages.iter_mut().enumerate() {
            let label = stage.describe();
            log::debug!("stage {}: {}", index, label);
            report.value = stage.measure(src, dst, report.value).map_err(|e| {
                log::warn!("stage {} ({}) failed: {}", index, label, e);
                MeterError::Stage {
                    index,
                    stage: label,
                    source: Box::new(e),
                }
            })?;
            if let Some(name) = stage.name() {
                log::debug!("{} = {}", name, report.value);
                report.scores.push(Score {
                    name,
                    value: report.value,
                });
            }
        }
        Ok(report)
    }
}

fn parse_stage(op: &str) -> MeterResult<Box<dyn Meter>> {
    let stage: Box<dyn Meter> = match op {
        "fx" => Box::new(Flip::new(Axis::X)),
        "fy" => Box::new(Flip::new(Axis::Y)),
        "mse" => Box::new(Mse),
        "psnr" => Box::new(Psnr),
        "peak" => Box::new(PeakError),
        "pre" => Box::new(Pre::new(PreType::Mean)),
        "premin" => Box::new(Pre::new(PreType::Min)),
        _ => {
            if let Some(rest) = op.strip_prefix("dc") {
                let (sx, sy) = parse_factors(rest, op)?;
                Box::new(Downsampler::new(sx, sy, true)?)
            } else if let Some(rest) = op.strip_prefix("uc") {
                let (sx, sy) = parse_factors(rest, op)?;
                Box::new(Upsampler::new(sx, sy, true)?)
            } else if let Some(rest) = op.strip_prefix('d') {
                let (sx, sy) = parse_factors(rest, op)?;
                Box::new(Downsampler::new(sx, sy, false)?)
            } else if let Some(rest) = op.strip_prefix('u') {
                let (sx, sy) = parse_factors(rest, op)?;
                Box::new(Upsampler::new(sx, sy, false)?)
            } else {
                return Err(MeterError::InvalidSequence(format!(
                    "unknown stage '{}'",
                    op
                )));
            }
        }
    };
    Ok(stage)
}

/// Parse `"<sx>.<sy>"` or `"<s>"` into positive factors.
fn parse_factors(dims: &str, op: &str) -> MeterResult<(u8, u8)> {
    let parse = |s: &str| -> MeterResult<u8> {
        match s.parse::<u8>() {
            Ok(v) if v > 0 => Ok(v),
            _ => Err(MeterError::InvalidSequence(format!(
                "invalid scale factor '{}' in '{}'",
                s, op
            ))),
        }
    };
    match dims.split_once('.') {
        Some((x, y)) => Ok((parse(x)?, parse(y)?)),
        None => {
            let s = parse(dims)?;
            Ok((s, s))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planediff_core::{Component, SampleFormat};

    fn gray(w: u32, h: u32, value: u8) -> ImageLayout {
        let fmt = SampleFormat::unsigned(8).unwrap();
        let values = vec![value; (w * h) as usize];
        ImageLayout::new(vec![Component::from_samples(w, h, fmt, &values).unwrap()])
    }

    #[test]
    fn test_parse_stages() {
        let p = Pipeline::parse("fx + FY + d2.2 + u3 + dc2.1 + uc1.2 + mse + psnr + peak + pre + premin")
            .unwrap();
        assert_eq!(
            p.describe(),
            vec![
                "flip x",
                "flip y",
                "downsample 2x2",
                "upsample 3x3",
                "downsample 2x1 (chroma)",
                "upsample 1x2 (chroma)",
                "MSE",
                "PSNR",
                "PeakError",
                "PeakRelativeError",
                "PeakRelativeError",
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "  ", "fx +", "psnr + + mse", "q3", "d0.2", "d2.x", "u300", "d2.2.2"] {
            assert!(
                matches!(Pipeline::parse(bad), Err(MeterError::InvalidSequence(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_accumulator_threading() {
        let mut a = gray(4, 4, 10);
        let mut b = gray(4, 4, 12);
        let mut p = Pipeline::parse("mse + fx + peak").unwrap();
        let report = p.run(&mut a, &mut b).unwrap();
        assert_eq!(report.value(), 2.0);
        assert_eq!(report.score("MSE"), Some(4.0));
        assert_eq!(report.score("PeakError"), Some(2.0));
        assert_eq!(report.scores().len(), 2);
    }

    #[test]
    fn test_transform_only_keeps_zero() {
        let mut a = gray(4, 4, 10);
        let mut b = gray(4, 4, 12);
        let report = Pipeline::new()
            .with(Flip::new(Axis::Y))
            .run(&mut a, &mut b)
            .unwrap();
        assert_eq!(report.value(), 0.0);
        assert!(report.scores().is_empty());
    }

    #[test]
    fn test_stage_failure_reported() {
        let mut a = gray(4, 4, 10);
        let mut b = gray(4, 2, 10);
        let mut p = Pipeline::parse("fy + d2.2 + mse").unwrap();
        let err = p.run(&mut a, &mut b).unwrap_err();
        match &err {
            MeterError::Stage { index, stage, .. } => {
                assert_eq!(*index, 1);
                assert_eq!(stage, "downsample 2x2");
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(matches!(err.root(), MeterError::Transform(_)));
        // the failing resampler left both images alone
        assert_eq!(a.component(0).unwrap().width(), 4);
    }

    #[test]
    fn test_pipeline_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Pipeline>();
    }
}
