//! Layout regression test
//!
//! Builds layouts over every supported sample format and checks the
//! derived geometry, pixel ranges, storage dispatch and compatibility
//! rules.

use planediff_core::{
    Component, Error, ImageLayout, PixelRange, SampleFormat, SampleKind,
};
use planediff_test::{RegParams, generators};

#[test]
fn layout_reg() {
    let mut rp = RegParams::new("layout");

    // --- overall size of a 4:2:0 layout ---
    let fmt = SampleFormat::unsigned(8).expect("format");
    let y = generators::gradient(17, 9, fmt).expect("luma");
    let cb = generators::constant(9, 5, fmt, 128.0)
        .expect("cb")
        .with_subsampling(2, 2)
        .expect("subsampling");
    let img = ImageLayout::new(vec![y, cb.clone(), cb]);
    rp.compare_values(18.0, img.width() as f64, 0.0);
    rp.compare_values(10.0, img.height() as f64, 0.0);
    rp.compare_values(3.0, img.depth() as f64, 0.0);

    // --- ranges and storage per format ---
    let cases: [(SampleFormat, f64, f64, usize); 8] = [
        (SampleFormat::unsigned(1).expect("u1"), 0.0, 1.0, 1),
        (SampleFormat::signed(8).expect("s8"), -128.0, 127.0, 1),
        (SampleFormat::unsigned(10).expect("u10"), 0.0, 1023.0, 2),
        (SampleFormat::signed(16).expect("s16"), -32768.0, 32767.0, 2),
        (SampleFormat::unsigned(20).expect("u20"), 0.0, 1048575.0, 4),
        (SampleFormat::float(16).expect("f16"), -f64::MAX, f64::MAX, 4),
        (SampleFormat::new(32, false, true).expect("uf32"), 0.0, f64::MAX, 4),
        (SampleFormat::float(64).expect("f64"), -f64::MAX, f64::MAX, 8),
    ];
    for (format, min, max, bytes) in cases {
        let range = PixelRange::of(format);
        rp.compare_values(min, range.min(), 0.0);
        rp.compare_values(max, range.max(), 0.0);
        rp.compare_values(bytes as f64, format.storage_bytes() as f64, 0.0);
        let kind = SampleKind::resolve(format).expect("kind");
        rp.compare_values(bytes as f64, kind.bytes() as f64, 0.0);

        // every generated sample lies inside the range
        let plane = generators::noise(6, 4, format, 3).expect("noise");
        let inside = planediff_core::with_sample_type!(kind, T => {
            plane
                .to_samples::<T>()
                .expect("samples")
                .iter()
                .all(|v| range.contains(planediff_core::Sample::to_f64(*v)))
        });
        rp.compare_values(1.0, if inside { 1.0 } else { 0.0 }, 0.0);
    }

    // --- unsupported formats ---
    for (bits, signed, float) in [(40u8, false, false), (63, true, false), (48, true, true)] {
        let format = SampleFormat::new(bits, signed, float).expect("format");
        let unsupported = matches!(
            SampleKind::resolve(format),
            Err(Error::UnsupportedFormat { .. })
        );
        rp.compare_values(1.0, if unsupported { 1.0 } else { 0.0 }, 0.0);
    }

    // --- compatibility ---
    let a = ImageLayout::new(vec![Component::new(4, 4, fmt).expect("c")]);
    let wide = SampleFormat::float(32).expect("format");
    let b = ImageLayout::new(vec![Component::new(4, 4, wide).expect("c")]);
    // formats may differ
    rp.compare_values(1.0, if a.test_if_compatible(&b).is_ok() { 1.0 } else { 0.0 }, 0.0);
    let c = ImageLayout::new(vec![
        Component::new(4, 4, fmt).expect("c"),
        Component::new(4, 4, fmt).expect("c"),
    ]);
    let count_mismatch = matches!(
        a.test_if_compatible(&c),
        Err(Error::ComponentCountMismatch(1, 2))
    );
    rp.compare_values(1.0, if count_mismatch { 1.0 } else { 0.0 }, 0.0);

    // --- explicit move ---
    let mut owner = img.clone();
    let moved = owner.take();
    rp.compare_values(0.0, owner.depth() as f64, 0.0);
    rp.compare_layouts(&img, &moved);

    assert!(rp.cleanup(), "layout regression test failed");
}
