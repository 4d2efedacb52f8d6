//! Grading rules
//!
//! Term averages, letter grades and per-class summaries. Every average is
//! rounded to two decimals before it is graded, and aggregate averages are
//! built from the already-rounded per-subject averages.

use crate::core::data::Mark;
use crate::utils::format::round_to;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Label used for marks recorded without a class
pub const UNKNOWN_CLASS: &str = "Unknown";

/// Letter grade on the 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    S,
    F,
}

impl Grade {
    /// A >= 75, B >= 65, C >= 55, S >= 35, otherwise F
    pub fn from_average(avg: f64) -> Self {
        if avg >= 75.0 {
            Grade::A
        } else if avg >= 65.0 {
            Grade::B
        } else if avg >= 55.0 {
            Grade::C
        } else if avg >= 35.0 {
            Grade::S
        } else {
            Grade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::S => "S",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mean of the three term scores, rounded to 2 decimals
pub fn term_average(t1: f64, t2: f64, t3: f64) -> f64 {
    round_to((t1 + t2 + t3) / 3.0, 2)
}

/// Mean of already-rounded averages, rounded to 2 decimals.
/// Returns `None` for an empty input.
pub fn mean_of_averages<I>(averages: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = averages
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), avg| (sum + avg, count + 1));

    if count == 0 {
        None
    } else {
        Some(round_to(sum / count as f64, 2))
    }
}

/// Marks of one class with their totals and the class grade
#[derive(Debug, Clone)]
pub struct ClassSummary<'a> {
    pub class_name: String,
    /// Each mark paired with its index in the student's full mark sequence
    pub entries: Vec<(usize, &'a Mark)>,
    pub t1_total: f64,
    pub t2_total: f64,
    pub t3_total: f64,
    pub average: f64,
    pub grade: Grade,
}

/// Group marks by class, optionally keeping a single class.
///
/// Groups are ordered by class name; entries keep their sequence order.
pub fn summarize_by_class<'a>(marks: &'a [Mark], class_filter: Option<&str>) -> Vec<ClassSummary<'a>> {
    let mut groups: Vec<(String, Vec<(usize, &'a Mark)>)> = Vec::new();

    for (index, mark) in marks.iter().enumerate() {
        if let Some(filter) = class_filter
            && mark.class_name != filter
        {
            continue;
        }

        let label = class_label(&mark.class_name);
        match groups.iter_mut().find(|(name, _)| *name == label) {
            Some((_, entries)) => entries.push((index, mark)),
            None => groups.push((label, vec![(index, mark)])),
        }
    }

    groups.sort_by(|(a, _), (b, _)| compare_class_names(a, b));

    groups
        .into_iter()
        .map(|(class_name, entries)| {
            let t1_total = entries.iter().map(|(_, m)| m.t1).sum();
            let t2_total = entries.iter().map(|(_, m)| m.t2).sum();
            let t3_total = entries.iter().map(|(_, m)| m.t3).sum();
            let average = mean_of_averages(entries.iter().map(|(_, m)| m.avg)).unwrap_or(0.0);

            ClassSummary {
                class_name,
                entries,
                t1_total,
                t2_total,
                t3_total,
                average,
                grade: Grade::from_average(average),
            }
        })
        .collect()
}

fn class_label(class_name: &str) -> String {
    if class_name.trim().is_empty() {
        UNKNOWN_CLASS.to_string()
    } else {
        class_name.to_string()
    }
}

fn compare_class_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::from_average(75.0), Grade::A);
        assert_eq!(Grade::from_average(74.99), Grade::B);
        assert_eq!(Grade::from_average(65.0), Grade::B);
        assert_eq!(Grade::from_average(64.99), Grade::C);
        assert_eq!(Grade::from_average(55.0), Grade::C);
        assert_eq!(Grade::from_average(54.99), Grade::S);
        assert_eq!(Grade::from_average(35.0), Grade::S);
        assert_eq!(Grade::from_average(34.99), Grade::F);
        assert_eq!(Grade::from_average(0.0), Grade::F);
    }

    #[test]
    fn test_term_average_rounds_to_two_places() {
        assert_eq!(term_average(80.0, 70.0, 60.0), 70.0);
        assert_eq!(term_average(70.0, 70.0, 60.0), 66.67);
        assert_eq!(term_average(0.0, 0.0, 1.0), 0.33);
    }

    #[test]
    fn test_term_average_matches_fixed_point_rounding() {
        let avg = term_average(54.995, 54.995, 54.995);
        assert_eq!(avg, 54.99);
        assert_eq!(Grade::from_average(avg), Grade::S);

        let mean = mean_of_averages(vec![54.995, 54.995]);
        assert_eq!(mean, Some(54.99));
    }

    #[test]
    fn test_mean_of_averages() {
        assert_eq!(mean_of_averages(vec![80.0, 20.0]), Some(50.0));
        assert_eq!(mean_of_averages(vec![66.67, 66.67, 66.66]), Some(66.67));
        assert_eq!(mean_of_averages(Vec::new()), None);
    }

    #[test]
    fn test_grade_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Grade::S).unwrap(), "\"S\"");
        let g: Grade = serde_json::from_str("\"B\"").unwrap();
        assert_eq!(g, Grade::B);
    }

    #[test]
    fn test_summarize_by_class_groups_and_totals() {
        let marks = vec![
            Mark::new("Grade 7", "Science", 70.0, 80.0, 90.0),
            Mark::new("Grade 6", "Maths", 50.0, 60.0, 70.0),
            Mark::new("Grade 7", "English", 40.0, 50.0, 60.0),
        ];

        let summaries = summarize_by_class(&marks, None);
        assert_eq!(summaries.len(), 2);

        assert_eq!(summaries[0].class_name, "Grade 6");
        assert_eq!(summaries[0].entries[0].0, 1);

        let g7 = &summaries[1];
        assert_eq!(g7.class_name, "Grade 7");
        assert_eq!(g7.entries.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(g7.t1_total, 110.0);
        assert_eq!(g7.t2_total, 130.0);
        assert_eq!(g7.t3_total, 150.0);
        // mean of 80.00 and 50.00
        assert_eq!(g7.average, 65.0);
        assert_eq!(g7.grade, Grade::B);
    }

    #[test]
    fn test_class_average_uses_rounded_subject_averages() {
        // raw mean of all nine terms is 66.666.., the per-subject averages are 66.67 and 66.67
        let marks = vec![
            Mark::new("Grade 8", "Art", 70.0, 70.0, 60.0),
            Mark::new("Grade 8", "Music", 60.0, 70.0, 70.0),
        ];
        let summaries = summarize_by_class(&marks, None);
        assert_eq!(summaries[0].average, 66.67);
    }

    #[test]
    fn test_summarize_by_class_filter_and_unknown() {
        let marks = vec![
            Mark::new("", "Drama", 30.0, 30.0, 30.0),
            Mark::new("Grade 9", "Maths", 90.0, 90.0, 90.0),
        ];

        let all = summarize_by_class(&marks, None);
        assert_eq!(all[0].class_name, "Grade 9");
        assert_eq!(all[1].class_name, UNKNOWN_CLASS);

        let only = summarize_by_class(&marks, Some("Grade 9"));
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].entries[0].0, 1);

        assert!(summarize_by_class(&marks, Some("Grade 12")).is_empty());
    }
}
