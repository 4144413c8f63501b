//! Regression test parameters and operations

use planediff_core::{Component, ImageLayout};

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare and record failures (default)
    #[default]
    Compare,
    /// Display mode - run and report, never fail
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the state of a regression test: the test name, current index,
/// mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "flip")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        if self.display() {
            return true;
        }
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// Two infinities of the same sign compare equal.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        if expected == actual {
            return true;
        }
        let diff = (expected - actual).abs();

        if diff.is_nan() || diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Compare two layouts sample by sample, bit for bit
    ///
    /// Layouts must agree in overall size, component count, per-component
    /// size, subsampling and sample format. Padding bytes are ignored.
    pub fn compare_layouts(&mut self, layout1: &ImageLayout, layout2: &ImageLayout) -> bool {
        self.index += 1;

        if let Some(reason) = layout_difference(layout1, layout2) {
            let msg = format!(
                "Failure in {}_reg: layout comparison for index {} - {}",
                self.test_name, self.index, reason
            );
            return self.fail(msg);
        }
        true
    }

    /// Compare two binary data arrays
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let msg = format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

fn layout_difference(a: &ImageLayout, b: &ImageLayout) -> Option<String> {
    if (a.width(), a.height()) != (b.width(), b.height()) {
        return Some(format!(
            "overall size {}x{} vs {}x{}",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        ));
    }
    if let Err(e) = a.test_if_compatible(b) {
        return Some(e.to_string());
    }
    for (i, (ca, cb)) in a.components().iter().zip(b.components()).enumerate() {
        if ca.format() != cb.format() {
            return Some(format!(
                "component {} format {:?} vs {:?}",
                i,
                ca.format(),
                cb.format()
            ));
        }
        if let Some((x, y)) = first_sample_mismatch(ca, cb) {
            return Some(format!("component {} differs at ({}, {})", i, x, y));
        }
    }
    None
}

fn first_sample_mismatch(a: &Component, b: &Component) -> Option<(u32, u32)> {
    let n = a.format().storage_bytes();
    for y in 0..a.height() {
        for x in 0..a.width() {
            let oa = a.sample_offset(x, y);
            let ob = b.sample_offset(x, y);
            if a.data()[oa..oa + n] != b.data()[ob..ob + n] {
                return Some((x, y));
            }
        }
    }
    None
}
