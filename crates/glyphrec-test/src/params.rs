//! Bookkeeping for regression tests

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use glyphrec_core::Pix;
use std::fs;

/// How a regression run treats intermediate images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Only check results
    #[default]
    Compare,
    /// Check results and dump intermediate images to `tests/regout`
    Display,
}

impl RegTestMode {
    /// Read the mode from `REGTEST_MODE` ("display" selects [`Self::Display`]).
    pub fn from_env() -> Self {
        let raw = std::env::var("REGTEST_MODE").unwrap_or_default();
        if raw.eq_ignore_ascii_case("display") {
            Self::Display
        } else {
            Self::Compare
        }
    }
}

/// Running state of one regression test.
///
/// Each `compare_*` call bumps a check counter and records a message on
/// mismatch, so one run reports every failing check rather than only the
/// first. Call [`RegParams::cleanup`] at the end and assert on its result.
pub struct RegParams {
    /// Short test name, used as the prefix of messages and dumped files
    pub test_name: String,
    pub mode: RegTestMode,
    checks: usize,
    failures: Vec<String>,
}

impl RegParams {
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();
        if mode == RegTestMode::Display {
            let _ = fs::create_dir_all(regout_dir());
        }
        eprintln!("\n==== {test_name} ({mode:?}) ====");

        Self {
            test_name: test_name.to_owned(),
            mode,
            checks: 0,
            failures: Vec::new(),
        }
    }

    /// Number of checks performed so far.
    pub fn index(&self) -> usize {
        self.checks
    }

    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Advance the counter and record `detail` when `ok` is false.
    fn check(&mut self, ok: bool, detail: impl FnOnce() -> String) -> bool {
        self.checks += 1;
        if !ok {
            let msg = format!("{} check #{}: {}", self.test_name, self.checks, detail());
            eprintln!("{msg}");
            self.failures.push(msg);
        }
        ok
    }

    /// Check that `actual` lies within `delta` of `expected`. NaN never matches.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        let diff = (expected - actual).abs();
        self.check(diff <= delta, || {
            format!("expected {expected}, got {actual} (off by {diff}, allowed {delta})")
        })
    }

    /// Check that two images have the same shape and identical pixels.
    pub fn compare_pix(&mut self, expected: &Pix, actual: &Pix) -> bool {
        if !expected.sizes_equal(actual) {
            let (ew, eh) = (expected.width(), expected.height());
            let (aw, ah) = (actual.width(), actual.height());
            return self.check(false, || {
                format!(
                    "image shape differs: {ew}x{eh} {:?} vs {aw}x{ah} {:?}",
                    expected.depth(),
                    actual.depth()
                )
            });
        }

        let width = expected.width() as usize;
        let mismatch = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(a, b)| a != b);
        self.check(mismatch.is_none(), || {
            let pos = mismatch.unwrap_or_default();
            format!("first differing pixel at ({}, {})", pos % width, pos / width)
        })
    }

    /// Check two byte strings for equality; messages show them lossily decoded.
    pub fn compare_strings(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.check(expected == actual, || {
            format!(
                "expected {:?}, got {:?}",
                String::from_utf8_lossy(expected),
                String::from_utf8_lossy(actual)
            )
        })
    }

    /// Dump `pix` as `<test>.<tag>.png` under `tests/regout` in display mode.
    pub fn write_pix_for_display(&mut self, pix: &Pix, tag: &str) -> TestResult<()> {
        if !self.display() {
            return Ok(());
        }
        let path = format!("{}/{}.{}.png", regout_dir(), self.test_name, tag);
        glyphrec_io::write_image(pix, &path).map_err(|e| TestError::ImageWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        eprintln!("wrote {path}");
        Ok(())
    }

    /// Print a summary and return whether every check passed.
    pub fn cleanup(self) -> bool {
        let ok = self.is_success();
        if ok {
            eprintln!("{}: {} checks passed", self.test_name, self.checks);
        } else {
            eprintln!(
                "{}: {} of {} checks failed",
                self.test_name,
                self.failures.len(),
                self.checks
            );
            for failure in &self.failures {
                eprintln!("  {failure}");
            }
        }
        ok
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
