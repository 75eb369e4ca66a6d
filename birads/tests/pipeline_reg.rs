//! End-to-end regression test
//!
//! Writes a synthetic corpus to disk, trains from the directory, renders
//! the report, and classifies image files.

use birads::classify::ClassifyError;
use birads::io::{ImageFormat, write_image};
use birads::region::parse_region;
use birads::report::{ClassificationRecord, EvaluationRecord, render_classification, render_report};
use birads::{BiradsClassifier, ClassId, TrainOptions};
use birads_test::{RegParams, synthetic_corpus, texture_image};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");

    // --- Test 1: train from a directory ---
    let fx = synthetic_corpus(24, 32, 17).expect("fixture");
    let mut classifier = BiradsClassifier::with_options(TrainOptions::new().with_seed(3));
    let report = classifier.train_from_dir(fx.path()).expect("train");
    // 24 per class -> 18 train, 6 held out
    rp.compare_values(24.0, report.confusion.total() as f64, 0.0);
    rp.check(report.confusion.correct() * 2 > report.confusion.total(), "diagonal dominates");

    // --- Test 2: text report ---
    let text = render_report(&report);
    let lines: Vec<_> = text.lines().collect();
    rp.compare_values(7.0, lines.len() as f64, 0.0);
    rp.check(lines[0].starts_with("| ") && lines[0].ends_with(" |"), "table row");
    rp.check(lines[5] == format!("Accuracy: {:.2} %", report.accuracy), "accuracy line");
    rp.check(lines[6] == format!("Specificity: {:.6}", report.specificity), "specificity line");
    rp.write_data_and_check(text.as_bytes(), "txt").expect("write report");

    // --- Test 3: JSON report ---
    let json = serde_json::to_value(EvaluationRecord::from(&report)).expect("json");
    rp.compare_values(report.accuracy, json["accuracy"].as_f64().unwrap_or(-1.0), 0.0);
    rp.compare_values(4.0, json["classes"].as_array().map_or(0, |a| a.len()) as f64, 0.0);

    // --- Test 4: classify files ---
    let dir = tempfile::tempdir().expect("tempdir");
    let mut rng = StdRng::seed_from_u64(123);
    let class = ClassId::ALL[3];
    let path = dir.path().join("query.png");
    let img = texture_image(class, 32, &mut rng).expect("texture");
    write_image(&img, &path, ImageFormat::Png).expect("write query");
    let result = classifier.classify_file(&path).expect("classify");
    rp.compare_strings(render_classification(&result).as_bytes(), b"Class BIRADS: 4");
    let record = ClassificationRecord::new(&path, &result);
    rp.compare_values(4.0, record.class as f64, 0.0);

    // --- Test 5: corner-only region argument ---
    let region = parse_region("0,0").expect("region");
    let whole = classifier.classify_image(&img).expect("whole");
    let clipped = classifier.classify_region(&img, region).expect("clipped region");
    rp.check(whole == clipped, "default region covers small image");

    // --- Test 6: unreadable query ---
    let bad = dir.path().join("bad.tif");
    std::fs::write(&bad, b"II*\0garbage").expect("write bad");
    rp.check(
        matches!(
            classifier.classify_file(&bad),
            Err(ClassifyError::UnsupportedImage { .. })
        ),
        "unreadable query",
    );

    assert!(rp.cleanup(), "pipeline regression test failed");
}
