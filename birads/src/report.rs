//! Text and JSON presentation of results

use birads_classify::{ClassMetrics, Classification, EvaluationReport};
use birads_core::NUM_CLASSES;
use serde::Serialize;
use std::path::Path;

/// Render an evaluation report as a confusion table followed by the two
/// summary figures.
///
/// ```text
/// | 07 | 01 | 00 | 00 |
/// | 00 | 08 | 00 | 00 |
/// | 00 | 00 | 08 | 00 |
/// | 00 | 00 | 00 | 08 |
///
/// Accuracy: 31.00 %
/// Specificity: 0.230000
/// ```
pub fn render_report(report: &EvaluationReport) -> String {
    format!(
        "{}\nAccuracy: {:.2} %\nSpecificity: {:.6}",
        report.confusion, report.accuracy, report.specificity
    )
}

/// Render a classification as `Class BIRADS: <n>`.
pub fn render_classification(result: &Classification) -> String {
    format!("Class BIRADS: {}", result.class)
}

/// JSON form of an evaluation
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRecord {
    pub confusion: [[u32; NUM_CLASSES]; NUM_CLASSES],
    pub accuracy: f64,
    pub specificity: f64,
    pub evaluated: u32,
    pub normalized_accuracy: f64,
    pub classes: [ClassMetrics; NUM_CLASSES],
}

impl From<&EvaluationReport> for EvaluationRecord {
    fn from(report: &EvaluationReport) -> Self {
        Self {
            confusion: *report.confusion.rows(),
            accuracy: report.accuracy,
            specificity: report.specificity,
            evaluated: report.confusion.total(),
            normalized_accuracy: report.confusion.normalized_accuracy(),
            classes: report.confusion.class_metrics(),
        }
    }
}

/// JSON form of one classified input
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationRecord {
    pub path: String,
    pub class: u8,
    pub distances: [f64; NUM_CLASSES],
}

impl ClassificationRecord {
    pub fn new(path: &Path, result: &Classification) -> Self {
        Self {
            path: path.display().to_string(),
            class: result.class.label(),
            distances: result.distances,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use birads_classify::ConfusionMatrix;
    use birads_core::ClassId;

    fn sample_report() -> EvaluationReport {
        let mut cm = ConfusionMatrix::new();
        let [c1, c2, c3, c4] = ClassId::ALL;
        for _ in 0..7 {
            cm.record(c1, c1);
        }
        cm.record(c1, c2);
        for c in [c2, c3, c4] {
            for _ in 0..8 {
                cm.record(c, c);
            }
        }
        EvaluationReport::from_confusion(cm)
    }

    #[test]
    fn test_render_report() {
        let text = render_report(&sample_report());
        let expected = "| 07 | 01 | 00 | 00 |\n\
                        | 00 | 08 | 00 | 00 |\n\
                        | 00 | 00 | 08 | 00 |\n\
                        | 00 | 00 | 00 | 08 |\n\
                        \n\
                        Accuracy: 31.00 %\n\
                        Specificity: 0.230000";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_classification() {
        let result = Classification {
            class: ClassId::ALL[2],
            distances: [3.0, 2.0, 1.0, 4.0],
        };
        assert_eq!(render_classification(&result), "Class BIRADS: 3");
    }

    #[test]
    fn test_json_records() {
        let record = EvaluationRecord::from(&sample_report());
        let value: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["accuracy"], 31.0);
        assert_eq!(value["evaluated"], 32);
        assert_eq!(value["confusion"][0][1], 1);
        assert_eq!(value["classes"][0]["support"], 8);

        let result = Classification {
            class: ClassId::ALL[0],
            distances: [0.5, 2.0, 3.0, 4.0],
        };
        let record = ClassificationRecord::new(Path::new("a.png"), &result);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["class"], 1);
        assert_eq!(value["path"], "a.png");
    }
}
