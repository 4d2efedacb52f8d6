//! Promotion decisions
//!
//! A student is evaluated only once they have at least one mark. The overall
//! average is the mean of the rounded per-subject averages.

use crate::core::data::Student;
use crate::core::grading::mean_of_averages;
use serde::Serialize;
use std::fmt;

/// Overall average at or above which a student is promoted
pub const DEFAULT_PROMOTION_THRESHOLD: f64 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PromotionStatus {
    Promoted,
    Retained,
}

impl PromotionStatus {
    /// Sentence used on the final report
    pub fn report_line(&self) -> &'static str {
        match self {
            PromotionStatus::Promoted => "PROMOTED to next grade",
            PromotionStatus::Retained => "RETAINED in current grade",
        }
    }
}

impl fmt::Display for PromotionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromotionStatus::Promoted => f.write_str("Promoted"),
            PromotionStatus::Retained => f.write_str("Retained"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionOutcome {
    pub student_id: String,
    pub admission_id: String,
    pub full_name: String,
    pub overall_average: f64,
    pub status: PromotionStatus,
}

/// Evaluate one student against the default threshold.
/// Returns `None` for a student without marks.
pub fn evaluate_promotion(student: &Student) -> Option<PromotionOutcome> {
    evaluate_promotion_with(student, DEFAULT_PROMOTION_THRESHOLD)
}

pub fn evaluate_promotion_with(student: &Student, threshold: f64) -> Option<PromotionOutcome> {
    let overall_average = mean_of_averages(student.marks.iter().map(|m| m.avg))?;

    let status = if overall_average >= threshold {
        PromotionStatus::Promoted
    } else {
        PromotionStatus::Retained
    };

    Some(PromotionOutcome {
        student_id: student.id.clone(),
        admission_id: student.admission_id.clone(),
        full_name: student.full_name.clone(),
        overall_average,
        status,
    })
}

/// Evaluate every student with marks, in store order
pub fn evaluate_all(students: &[Student], threshold: f64) -> Vec<PromotionOutcome> {
    students
        .iter()
        .filter_map(|s| evaluate_promotion_with(s, threshold))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::Mark;
    use chrono::NaiveDate;

    fn student_with_averages(admission_id: &str, averages: &[f64]) -> Student {
        Student {
            id: format!("id-{}", admission_id),
            admission_id: admission_id.to_string(),
            full_name: format!("Student {}", admission_id),
            address: String::new(),
            birthday: None,
            admission_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            guardian_name: String::new(),
            guardian_contact: String::new(),
            marks: averages
                .iter()
                .enumerate()
                .map(|(i, avg)| Mark::new("Grade 6", format!("Subject {}", i), *avg, *avg, *avg))
                .collect(),
        }
    }

    #[test]
    fn test_promoted_when_mean_reaches_threshold() {
        let outcome = evaluate_promotion(&student_with_averages("A", &[80.0, 20.0])).unwrap();
        assert_eq!(outcome.overall_average, 50.0);
        assert_eq!(outcome.status, PromotionStatus::Promoted);

        let edge = evaluate_promotion(&student_with_averages("B", &[35.0])).unwrap();
        assert_eq!(edge.status, PromotionStatus::Promoted);
    }

    #[test]
    fn test_retained_below_threshold() {
        let outcome = evaluate_promotion(&student_with_averages("A", &[10.0, 20.0])).unwrap();
        assert_eq!(outcome.overall_average, 15.0);
        assert_eq!(outcome.status, PromotionStatus::Retained);
    }

    #[test]
    fn test_no_marks_not_evaluated() {
        assert!(evaluate_promotion(&student_with_averages("A", &[])).is_none());
    }

    #[test]
    fn test_evaluate_all_skips_students_without_marks() {
        let students = vec![
            student_with_averages("A", &[80.0]),
            student_with_averages("B", &[]),
            student_with_averages("C", &[10.0]),
        ];

        let outcomes = evaluate_all(&students, DEFAULT_PROMOTION_THRESHOLD);
        let ids: Vec<_> = outcomes.iter().map(|o| o.admission_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
        assert_eq!(outcomes[1].status, PromotionStatus::Retained);
    }

    #[test]
    fn test_custom_threshold() {
        let student = student_with_averages("A", &[50.0]);
        let outcome = evaluate_promotion_with(&student, 60.0).unwrap();
        assert_eq!(outcome.status, PromotionStatus::Retained);
    }

    #[test]
    fn test_report_line() {
        assert_eq!(PromotionStatus::Promoted.report_line(), "PROMOTED to next grade");
        assert_eq!(PromotionStatus::Retained.to_string(), "Retained");
    }
}
