//! Text output of recognition results

use glyphrec_recog::{AccuracyReport, Histogram};
use std::fmt::Write;

/// One `<label>=<count>` line per class, in class order.
pub fn format_histogram(histogram: &Histogram) -> String {
    let mut out = String::new();
    for (c, n) in histogram.iter() {
        let _ = writeln!(out, "{}={}", c, n);
    }
    out
}

/// Per-character ratios, excluded characters and the overall figure.
pub fn format_accuracy(report: &AccuracyReport) -> String {
    let mut out = String::new();
    for c in &report.characters {
        let _ = writeln!(
            out,
            "accuracy {}: {}/{} ({:.2}%)",
            c.character,
            c.detected,
            c.expected,
            c.ratio * 100.0
        );
    }
    if !report.no_ground_truth.is_empty() {
        let chars: String = report.no_ground_truth.iter().collect();
        let _ = writeln!(out, "no ground truth: {}", chars);
    }
    match report.overall {
        Some(overall) => {
            let _ = writeln!(out, "overall accuracy: {:.2}%", overall * 100.0);
        }
        None => {
            let _ = writeln!(out, "overall accuracy: n/a");
        }
    }
    out
}
