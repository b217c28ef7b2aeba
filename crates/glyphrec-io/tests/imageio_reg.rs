//! Image and table file regression test
//!
//! Writes masks, gray pages and color pages to disk, reads them back and
//! checks that the pixels survive; then round-trips a numeric table and
//! scans a directory for images by extension.
//!
//! Run with:
//! ```
//! cargo test -p glyphrec-io --test imageio_reg
//! ```

use glyphrec_core::{Pix, PixelDepth, color};
use glyphrec_io::{list_images, read_image, read_table_file, write_image, write_table_file};
use glyphrec_test::{RegParams, fixtures};
use std::fs;

#[test]
fn imageio_reg() {
    let mut rp = RegParams::new("imageio");
    let dir = tempfile::tempdir().unwrap();

    // --- 1 bpp mask is written as white-on-black gray ---
    let mask = fixtures::mask_from_ascii(&["##..", ".##.", "..##"]).unwrap();
    let path = dir.path().join("mask.png");
    write_image(&mask, &path).unwrap();
    let back = read_image(&path).unwrap();
    rp.compare_values(8.0, back.depth().bits() as f64, 0.0);
    rp.compare_values(255.0, back.get_pixel(0, 0).unwrap() as f64, 0.0);
    rp.compare_values(0.0, back.get_pixel(3, 0).unwrap() as f64, 0.0);

    // --- 32 bpp page keeps its colors through PNG ---
    let page = fixtures::render_page(&mask, 2).unwrap();
    let path = dir.path().join("page.png");
    write_image(&page, &path).unwrap();
    let back = read_image(&path).unwrap();
    rp.compare_pix(&page, &back);

    // --- 8 bpp page stays gray ---
    let gray = Pix::from_raw(3, 1, PixelDepth::Bit8, vec![0, 128, 255]).unwrap();
    let path = dir.path().join("gray.png");
    write_image(&gray, &path).unwrap();
    rp.compare_pix(&gray, &read_image(&path).unwrap());

    // --- unsupported extension is an error ---
    rp.compare_values(
        1.0,
        if write_image(&gray, dir.path().join("gray.nope")).is_err() { 1.0 } else { 0.0 },
        0.0,
    );

    // --- numeric table ---
    let rows = vec![vec![48.0f32], vec![97.0], vec![65.0]];
    let path = dir.path().join("labels.txt");
    write_table_file(&path, &rows).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    rp.compare_strings(
        b"4.800000000000000000e+01\n9.700000000000000000e+01\n6.500000000000000000e+01\n",
        text.as_bytes(),
    );
    let back = read_table_file(&path).unwrap();
    rp.compare_values(3.0, back.len() as f64, 0.0);
    rp.compare_values(97.0, back[1][0] as f64, 0.0);

    // --- directory listing by extension ---
    let scan = tempfile::tempdir().unwrap();
    let page = Pix::from_raw(1, 1, PixelDepth::Bit32, vec![color::compose_rgb(1, 2, 3)]).unwrap();
    write_image(&page, scan.path().join("b.png")).unwrap();
    write_image(&page, scan.path().join("a.PNG")).unwrap();
    fs::write(scan.path().join("notes.txt"), "x").unwrap();
    fs::create_dir(scan.path().join("sub.png")).unwrap();
    let found = list_images(scan.path(), &["png"]).unwrap();
    let names: Vec<String> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    rp.compare_strings(b"a.PNG,b.png", names.join(",").as_bytes());
    rp.compare_values(0.0, list_images(scan.path(), &["jpg"]).unwrap().len() as f64, 0.0);

    assert!(rp.cleanup());
}
