//! Knowledge base regression test
//!
//! Persists a knowledge base, reloads it, checks that labels and samples
//! survive exactly, and checks that damaged files are rejected.
//!
//! Run with:
//! ```
//! cargo test -p glyphrec-recog --test kb_reg
//! ```

use glyphrec_recog::kb::{LABELS_FILE, SAMPLES_FILE};
use glyphrec_recog::{Classifier, KnowledgeBase, NormalizedSample, RecogError};
use glyphrec_test::RegParams;
use std::fs;

fn sample(seed: u32) -> NormalizedSample {
    let values = (0..900u32)
        .map(|i| ((i * 37 + seed * 101) % 256) as f32 + (seed as f32) / 7.0)
        .collect();
    NormalizedSample::new(30, 30, values).unwrap()
}

fn is_corrupt<T>(r: Result<T, RecogError>) -> f64 {
    if matches!(r, Err(RecogError::CorruptKnowledgeBase(_))) { 1.0 } else { 0.0 }
}

#[test]
fn kb_reg() {
    let mut rp = RegParams::new("kb");
    let dir = tempfile::tempdir().unwrap();

    let mut kb = KnowledgeBase::new();
    for (i, label) in "aZ09a".chars().enumerate() {
        kb.append(label, sample(i as u32)).unwrap();
    }
    kb.persist(dir.path()).unwrap();

    // --- label file holds character codes ---
    let labels_text = fs::read_to_string(dir.path().join(LABELS_FILE)).unwrap();
    let first_line = labels_text.lines().next().unwrap_or_default();
    rp.compare_strings(b"9.700000000000000000e+01", first_line.as_bytes());
    rp.compare_values(5.0, labels_text.lines().count() as f64, 0.0);

    // --- round trip ---
    let back = KnowledgeBase::load_dir(dir.path()).unwrap();
    rp.compare_values(5.0, back.len() as f64, 0.0);
    let labels: String = back.labels().iter().collect();
    rp.compare_strings(b"aZ09a", labels.as_bytes());
    let identical = kb
        .samples()
        .iter()
        .zip(back.samples())
        .all(|(a, b)| a.values() == b.values());
    rp.compare_values(1.0, if identical { 1.0 } else { 0.0 }, 0.0);

    // --- reloaded base classifies its own samples ---
    let classifier = Classifier::train(&back).unwrap();
    rp.compare_values(
        'Z' as u32 as f64,
        classifier.classify(&sample(1)).unwrap() as u32 as f64,
        0.0,
    );
    // duplicate label-a samples: earliest wins on ties, label is the same
    rp.compare_values(
        'a' as u32 as f64,
        classifier.classify(&sample(0)).unwrap() as u32 as f64,
        0.0,
    );

    // --- empty base persists and reloads empty ---
    let empty_dir = tempfile::tempdir().unwrap();
    KnowledgeBase::new().persist(empty_dir.path()).unwrap();
    let empty = KnowledgeBase::load_dir(empty_dir.path()).unwrap();
    rp.compare_values(0.0, empty.len() as f64, 0.0);
    rp.compare_values(
        1.0,
        if matches!(Classifier::train(&empty), Err(RecogError::EmptyKnowledgeBase)) {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    // --- missing sample file ---
    let labels_path = dir.path().join(LABELS_FILE);
    let missing = KnowledgeBase::load(&labels_path, dir.path().join("nope.txt"));
    rp.compare_values(
        1.0,
        if matches!(missing, Err(RecogError::MissingFile(_))) { 1.0 } else { 0.0 },
        0.0,
    );

    // --- row count mismatch ---
    let bad = tempfile::tempdir().unwrap();
    fs::write(bad.path().join(LABELS_FILE), "9.7e+01\n9.8e+01\n").unwrap();
    fs::copy(dir.path().join(SAMPLES_FILE), bad.path().join(SAMPLES_FILE)).unwrap();
    rp.compare_values(1.0, is_corrupt(KnowledgeBase::load_dir(bad.path())), 0.0);

    // --- wrong column count ---
    fs::write(bad.path().join(LABELS_FILE), "9.7e+01\n").unwrap();
    fs::write(bad.path().join(SAMPLES_FILE), "1 2 3\n").unwrap();
    rp.compare_values(1.0, is_corrupt(KnowledgeBase::load_dir(bad.path())), 0.0);

    // --- label that is not a character code ---
    let row = vec!["0"; 900].join(" ");
    fs::write(bad.path().join(LABELS_FILE), "97.5\n").unwrap();
    fs::write(bad.path().join(SAMPLES_FILE), format!("{}\n", row)).unwrap();
    rp.compare_values(1.0, is_corrupt(KnowledgeBase::load_dir(bad.path())), 0.0);

    // --- unparsable number ---
    fs::write(bad.path().join(LABELS_FILE), "abc\n").unwrap();
    rp.compare_values(1.0, is_corrupt(KnowledgeBase::load_dir(bad.path())), 0.0);

    // --- a valid hand-written base loads ---
    fs::write(bad.path().join(LABELS_FILE), "48\n").unwrap();
    let one = KnowledgeBase::load_dir(bad.path()).unwrap();
    rp.compare_values('0' as u32 as f64, one.labels()[0] as u32 as f64, 0.0);

    assert!(rp.cleanup(), "kb regression test failed");
}
