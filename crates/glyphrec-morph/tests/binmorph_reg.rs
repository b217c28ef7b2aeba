//! Binary morphology regression test
//!
//! Checks the opening/closing pair used to clean thresholded glyph
//! masks: opening with a 3x3 cross drops specks and hairlines, closing
//! with a 5x5 square bridges small gaps, and both are idempotent.
//!
//! Run with:
//! ```
//! cargo test -p glyphrec-morph --test binmorph_reg
//! ```

use glyphrec_morph::{Sel, close, dilate, erode, open};
use glyphrec_test::{RegParams, fixtures};

#[test]
fn binmorph_reg() {
    let mut rp = RegParams::new("binmorph");

    let pix = fixtures::mask_from_ascii(&[
        "....................",
        ".###.......#........",
        ".###...............#",
        ".###....#########...",
        "........#########...",
        "...#....#########...",
        "....................",
        "..############......",
        "..#####.######......",
        "..############......",
        "....................",
    ])
    .unwrap();
    let cross = Sel::create_cross(3).unwrap();
    let square = Sel::create_square(5).unwrap();

    // --- opening removes isolated pixels, keeps 3-wide blocks ---
    let opened = open(&pix, &cross).unwrap();
    rp.compare_values(0.0, opened.get_pixel(11, 1).unwrap() as f64, 0.0);
    rp.compare_values(0.0, opened.get_pixel(19, 2).unwrap() as f64, 0.0);
    rp.compare_values(0.0, opened.get_pixel(3, 5).unwrap() as f64, 0.0);
    rp.compare_values(1.0, opened.get_pixel(2, 2).unwrap() as f64, 0.0);
    rp.compare_values(1.0, opened.get_pixel(12, 4).unwrap() as f64, 0.0);
    // cross opening trims the corners of the 3x3 block
    rp.compare_values(0.0, opened.get_pixel(1, 1).unwrap() as f64, 0.0);

    // --- opening is idempotent ---
    let twice = open(&opened, &cross).unwrap();
    rp.compare_pix(&opened, &twice);

    // --- closing fills the one-pixel hole ---
    rp.compare_values(0.0, pix.get_pixel(7, 8).unwrap() as f64, 0.0);
    let closed = close(&pix, &square).unwrap();
    rp.compare_values(1.0, closed.get_pixel(7, 8).unwrap() as f64, 0.0);
    let twice = close(&closed, &square).unwrap();
    rp.compare_pix(&closed, &twice);

    // --- erosion is anti-extensive, dilation extensive ---
    let eroded = erode(&pix, &cross).unwrap();
    let dilated = dilate(&pix, &cross).unwrap();
    let subset = |a: &glyphrec_core::Pix, b: &glyphrec_core::Pix| {
        a.data().iter().zip(b.data()).all(|(&x, &y)| x <= y)
    };
    rp.compare_values(1.0, if subset(&eroded, &pix) { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if subset(&pix, &dilated) { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup());
}
