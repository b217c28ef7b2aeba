//! Recognition pipeline regression test
//!
//! Renders a synthetic page of four glyphs (I, L, O, I), binarizes it,
//! segments it, builds a knowledge base from the segmented samples and
//! recognizes the page again.
//!
//! Run with:
//! ```
//! cargo test -p glyphrec-recog --test pipeline_reg
//! ```

use glyphrec_recog::{
    BinarizeOptions, BorderOptions, KnowledgeBase, RecognizeOptions, Recognizer, SegmentOptions,
    binarize, clear_border_shapes, count_by_label, segment,
};
use glyphrec_test::{RegParams, fixtures};

const PAGE: [&str; 13] = [
    "...........................",
    "...........................",
    "...........................",
    "...#...#.......#####...#...",
    "...#...#.......#...#...#...",
    "...#...#.......#...#...#...",
    "...#...#.......#...#...#...",
    "...#...#.......#...#...#...",
    "...#...#.......#...#...#...",
    "...#...#####...#####...#...",
    "...........................",
    "...........................",
    "...........................",
];

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");

    let mask = fixtures::mask_from_ascii(&PAGE).unwrap();
    let page = fixtures::render_page(&mask, 3).unwrap();
    rp.write_pix_for_display(&page, "page").unwrap();

    // --- binarization keeps every glyph and nothing else ---
    let binary = binarize(&page, &BinarizeOptions::default()).unwrap();
    rp.compare_values(1.0, binary.depth().bits() as f64, 0.0);
    rp.compare_values(page.width() as f64, binary.width() as f64, 0.0);
    rp.compare_values(0.0, binary.get_pixel(0, 0).unwrap() as f64, 0.0);
    rp.compare_values(1.0, binary.get_pixel(10, 20).unwrap() as f64, 0.0);
    // inside the O
    rp.compare_values(0.0, binary.get_pixel(52, 20).unwrap() as f64, 0.0);
    rp.write_pix_for_display(&binary, "binary").unwrap();

    // --- a narrow border band keeps the glyphs ---
    let cleared = clear_border_shapes(&binary, 2).unwrap();
    rp.compare_pix(&binary, &cleared);

    // --- segmentation in discovery order ---
    let glyphs = segment(&cleared, &SegmentOptions::default()).unwrap();
    rp.compare_values(4.0, glyphs.len() as f64, 0.0);
    let lefts: Vec<f64> = glyphs
        .iter()
        .map(|g| g.shape.bounding_box().x as f64)
        .collect();
    for (expected, actual) in [9.0, 21.0, 45.0, 69.0].iter().zip(&lefts) {
        rp.compare_values(*expected, *actual, 1.0);
    }
    let first = glyphs[0].shape.bounding_box();
    rp.compare_values(21.0, first.h as f64, 1.0);
    rp.compare_values(3.0, first.w as f64, 1.0);
    for g in &glyphs {
        rp.compare_values(900.0, g.sample.len() as f64, 0.0);
    }
    let first_sample = glyphs[0].sample.to_pix().unwrap();
    rp.compare_values(8.0, first_sample.depth().bits() as f64, 0.0);
    rp.write_pix_for_display(&first_sample, "sample_i").unwrap();

    // --- recognize with samples of the same page ---
    let mut kb = KnowledgeBase::new();
    for (label, g) in "ILOI".chars().zip(&glyphs) {
        kb.append(label, g.sample.clone()).unwrap();
    }
    let options = RecognizeOptions::default().with_border(BorderOptions::default().with_radius(2));
    let recognizer = Recognizer::from_knowledge_base(&kb, options).unwrap();
    let result = recognizer.recognize(&page).unwrap();
    rp.compare_strings(b"ILOI", result.text.as_bytes());
    rp.compare_values(4.0, result.boxes.len() as f64, 0.0);

    // --- annotation outlines each glyph in green ---
    rp.compare_values(32.0, result.annotated.depth().bits() as f64, 0.0);
    let b = result.boxes[2];
    let outline = result.annotated.get_rgb(b.x as u32, b.y as u32).unwrap();
    rp.compare_values(65.0, outline.0 as f64, 0.0);
    rp.compare_values(203.0, outline.1 as f64, 0.0);
    rp.compare_values(62.0, outline.2 as f64, 0.0);
    rp.write_pix_for_display(&result.annotated, "annotated").unwrap();

    // --- histogram ---
    let histogram = count_by_label(&result.text);
    rp.compare_values(2.0, histogram.get('I') as f64, 0.0);
    rp.compare_values(1.0, histogram.get('O') as f64, 0.0);
    rp.compare_values(4.0, histogram.total() as f64, 0.0);

    // --- the default border band erases this small page ---
    let recognizer = Recognizer::from_knowledge_base(&kb, RecognizeOptions::default()).unwrap();
    let result = recognizer.recognize(&page).unwrap();
    rp.compare_values(0.0, result.text.len() as f64, 0.0);

    // --- gray input gives the same answer ---
    let gray = glyphrec_core::convert_to_gray(&page).unwrap();
    rp.compare_values(8.0, gray.depth().bits() as f64, 0.0);
    let options = RecognizeOptions::default().with_border(BorderOptions::default().with_enabled(false));
    let recognizer = Recognizer::from_knowledge_base(&kb, options).unwrap();
    let result = recognizer.recognize(&gray).unwrap();
    rp.compare_strings(b"ILOI", result.text.as_bytes());

    // --- binary input is rejected ---
    let err = recognizer.recognize(&mask);
    rp.compare_values(1.0, if err.is_err() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "pipeline regression test failed");
}
