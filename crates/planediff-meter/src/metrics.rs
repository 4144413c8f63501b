//! Scoring metrics
//!
//! Every metric first checks that the two layouts correspond component by
//! component, then compares samples numerically. The two images may use
//! different sample formats; values are compared as doubles. Where a
//! metric needs a nominal signal range it takes it from the reference
//! (`src`) image.

use crate::meter::Meter;
use crate::MeterResult;
use planediff_core::{Component, ImageLayout, Sample, SampleKind, with_sample_type};

/// Variant of the peak relative error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreType {
    /// Average over components
    #[default]
    Mean,
    /// Worst (smallest) component
    Min,
}

/// Mean squared error over all samples of all components.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mse;

/// Peak signal to noise ratio in dB.
///
/// The peak is the widest integer range among the reference components,
/// or 1.0 for float components. Identical images score infinity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Psnr;

/// Largest absolute sample difference.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeakError;

/// Peak relative error in dB.
///
/// Per component: `20 * log10(range / peak_error)`, where `range` is the
/// integer range of the reference component, or for float components the
/// largest absolute reference value (1.0 if that is zero). A component
/// without error scores infinity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pre {
    kind: PreType,
}

impl Pre {
    pub fn new(kind: PreType) -> Self {
        Pre { kind }
    }

    pub fn kind(&self) -> PreType {
        self.kind
    }
}

/// Per-component difference statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Diff {
    samples: u64,
    squared: f64,
    peak: f64,
    /// Largest absolute reference value
    magnitude: f64,
}

fn sample_at(comp: &Component, kind: SampleKind, x: u32, y: u32) -> f64 {
    with_sample_type!(kind, T => comp.get::<T>(x, y).to_f64())
}

fn diff(src: &Component, dst: &Component) -> MeterResult<Diff> {
    let (ks, kd) = (src.kind()?, dst.kind()?);
    let mut d = Diff::default();
    for y in 0..src.height() {
        for x in 0..src.width() {
            let a = sample_at(src, ks, x, y);
            let b = sample_at(dst, kd, x, y);
            let e = (a - b).abs();
            d.samples += 1;
            d.squared += e * e;
            d.peak = d.peak.max(e);
            d.magnitude = d.magnitude.max(a.abs());
        }
    }
    Ok(d)
}

fn diffs(src: &ImageLayout, dst: &ImageLayout) -> MeterResult<Vec<Diff>> {
    src.test_if_compatible(dst)?;
    src.components()
        .iter()
        .zip(dst.components())
        .map(|(a, b)| diff(a, b))
        .collect()
}

fn mse(src: &ImageLayout, dst: &ImageLayout) -> MeterResult<f64> {
    let d = diffs(src, dst)?;
    let samples: u64 = d.iter().map(|c| c.samples).sum();
    if samples == 0 {
        return Ok(0.0);
    }
    Ok(d.iter().map(|c| c.squared).sum::<f64>() / samples as f64)
}

impl Meter for Mse {
    fn measure(
        &mut self,
        src: &mut ImageLayout,
        dst: &mut ImageLayout,
        _acc: f64,
    ) -> MeterResult<f64> {
        mse(src, dst)
    }

    fn name(&self) -> Option<&'static str> {
        Some("MSE")
    }
}

impl Meter for Psnr {
    fn measure(
        &mut self,
        src: &mut ImageLayout,
        dst: &mut ImageLayout,
        _acc: f64,
    ) -> MeterResult<f64> {
        let err = mse(src, dst)?;
        if err == 0.0 {
            return Ok(f64::INFINITY);
        }
        let peak = src
            .components()
            .iter()
            .map(|c| if c.is_float() { 1.0 } else { c.range().span() })
            .fold(0.0, f64::max);
        Ok(10.0 * (peak * peak / err).log10())
    }

    fn name(&self) -> Option<&'static str> {
        Some("PSNR")
    }
}

impl Meter for PeakError {
    fn measure(
        &mut self,
        src: &mut ImageLayout,
        dst: &mut ImageLayout,
        _acc: f64,
    ) -> MeterResult<f64> {
        Ok(diffs(src, dst)?.iter().map(|c| c.peak).fold(0.0, f64::max))
    }

    fn name(&self) -> Option<&'static str> {
        Some("PeakError")
    }
}

impl Meter for Pre {
    fn measure(
        &mut self,
        src: &mut ImageLayout,
        dst: &mut ImageLayout,
        _acc: f64,
    ) -> MeterResult<f64> {
        let d = diffs(src, dst)?;
        let per_component: Vec<f64> = src
            .components()
            .iter()
            .zip(&d)
            .map(|(comp, c)| {
                let range = if comp.is_float() {
                    if c.magnitude > 0.0 { c.magnitude } else { 1.0 }
                } else {
                    comp.range().span()
                };
                if c.peak == 0.0 {
                    f64::INFINITY
                } else {
                    20.0 * (range / c.peak).log10()
                }
            })
            .collect();

        if per_component.is_empty() {
            return Ok(f64::INFINITY);
        }
        Ok(match self.kind {
            PreType::Mean => per_component.iter().sum::<f64>() / per_component.len() as f64,
            PreType::Min => per_component.iter().copied().fold(f64::INFINITY, f64::min),
        })
    }

    fn name(&self) -> Option<&'static str> {
        Some("PeakRelativeError")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MeterError;
    use planediff_core::SampleFormat;

    fn gray(values: &[u8]) -> ImageLayout {
        let fmt = SampleFormat::unsigned(8).unwrap();
        let comp = Component::from_samples(values.len() as u32, 1, fmt, values).unwrap();
        ImageLayout::new(vec![comp])
    }

    fn measure<M: Meter>(mut m: M, a: &ImageLayout, b: &ImageLayout) -> MeterResult<f64> {
        m.measure(&mut a.clone(), &mut b.clone(), 0.0)
    }

    #[test]
    fn test_identical_images() {
        let a = gray(&[1, 2, 3, 4]);
        assert_eq!(measure(Mse, &a, &a).unwrap(), 0.0);
        assert_eq!(measure(Psnr, &a, &a).unwrap(), f64::INFINITY);
        assert_eq!(measure(PeakError, &a, &a).unwrap(), 0.0);
        assert_eq!(measure(Pre::new(PreType::Mean), &a, &a).unwrap(), f64::INFINITY);
        assert_eq!(measure(Pre::new(PreType::Min), &a, &a).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_single_difference() {
        let a = gray(&[10, 10, 10, 10]);
        let b = gray(&[10, 14, 10, 10]);
        // 16 / 4
        assert_eq!(measure(Mse, &a, &b).unwrap(), 4.0);
        assert_eq!(measure(PeakError, &a, &b).unwrap(), 4.0);
        let psnr = measure(Psnr, &a, &b).unwrap();
        assert!((psnr - 10.0 * (255.0f64 * 255.0 / 4.0).log10()).abs() < 1e-9);
        let pre = measure(Pre::new(PreType::Mean), &a, &b).unwrap();
        assert!((pre - 20.0 * (255.0f64 / 4.0).log10()).abs() < 1e-9);
    }

    #[test]
    fn test_pre_mean_and_min() {
        let fmt = SampleFormat::unsigned(8).unwrap();
        let c = |v: &[u8]| Component::from_samples(2, 1, fmt, v).unwrap();
        let a = ImageLayout::new(vec![c(&[0, 0]), c(&[0, 0])]);
        let b = ImageLayout::new(vec![c(&[0, 255]), c(&[0, 51])]);
        // components: 20*log10(255/255) = 0, 20*log10(255/51) = 20*log10(5)
        let worst = measure(Pre::new(PreType::Min), &a, &b).unwrap();
        assert!(worst.abs() < 1e-12);
        let mean = measure(Pre::new(PreType::Mean), &a, &b).unwrap();
        assert!((mean - 10.0 * 5f64.log10()).abs() < 1e-9);
    }

    #[test]
    fn test_float_range_from_reference() {
        let fmt = SampleFormat::float(32).unwrap();
        let a = ImageLayout::new(vec![
            Component::from_samples(2, 1, fmt, &[-8.0f32, 2.0]).unwrap(),
        ]);
        let b = ImageLayout::new(vec![
            Component::from_samples(2, 1, fmt, &[-8.0f32, 2.8]).unwrap(),
        ]);
        let pre = measure(Pre::new(PreType::Mean), &a, &b).unwrap();
        let peak = (2.8f32 as f64 - 2.0).abs();
        assert!((pre - 20.0 * (8.0 / peak).log10()).abs() < 1e-9);

        // float peak for PSNR is 1.0
        let psnr = measure(Psnr, &a, &b).unwrap();
        let err = peak * peak / 2.0;
        assert!((psnr - 10.0 * (1.0 / err).log10()).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_formats() {
        let a = gray(&[100, 200]);
        let fmt = SampleFormat::unsigned(16).unwrap();
        let b = ImageLayout::new(vec![Component::from_samples(2, 1, fmt, &[100u16, 300]).unwrap()]);
        assert_eq!(measure(PeakError, &a, &b).unwrap(), 100.0);
    }

    #[test]
    fn test_incompatible() {
        let a = gray(&[1, 2, 3]);
        let b = gray(&[1, 2]);
        let err = measure(Mse, &a, &b).unwrap_err();
        assert!(matches!(err, MeterError::Core(e) if e.is_compatibility()));
    }

    #[test]
    fn test_names() {
        assert_eq!(Mse.name(), Some("MSE"));
        assert_eq!(Psnr.name(), Some("PSNR"));
        assert_eq!(Pre::default().name(), Some("PeakRelativeError"));
        assert_eq!(Pre::default().kind(), PreType::Mean);
        assert_eq!(PeakError.describe(), "PeakError");
    }
}
