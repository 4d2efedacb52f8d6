//! Historical performance projection
//!
//! Builds an illustrative grade 6-12 trend per subject, anchored on the
//! student's current subject average. The earlier points are projected, not
//! recorded, and carry random jitter.

use crate::core::data::Student;
use crate::utils::format::round_to;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Grade levels covered by a trend
pub const TREND_LEVELS: RangeInclusive<u8> = 6..=12;

/// Subjects projected for a student without marks
pub const DEFAULT_SUBJECTS: [&str; 4] = ["Mathematics", "Science", "English", "History"];

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub level: u8,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectTrend {
    pub subject: String,
    /// Recorded average, or `None` if the anchor was drawn at random
    pub recorded_average: Option<f64>,
    pub points: Vec<TrendPoint>,
}

/// Project trends for every subject of `student`. A seed makes the jitter reproducible.
pub fn project_trends(student: &Student, seed: Option<u64>) -> Vec<SubjectTrend> {
    if let Some(seed) = seed {
        let mut rng = StdRng::seed_from_u64(seed);
        project_trends_with(student, &mut rng)
    } else {
        let mut rng = rand::rng();
        project_trends_with(student, &mut rng)
    }
}

pub fn project_trends_with<R: Rng>(student: &Student, rng: &mut R) -> Vec<SubjectTrend> {
    subjects_of(student)
        .into_iter()
        .map(|subject| {
            let recorded_average = student
                .marks
                .iter()
                .find(|m| m.subject == subject)
                .map(|m| m.avg);
            let anchor = recorded_average.unwrap_or_else(|| rng.random_range(40.0..80.0));

            SubjectTrend {
                points: project_points(anchor, rng),
                subject,
                recorded_average,
            }
        })
        .collect()
}

fn subjects_of(student: &Student) -> Vec<String> {
    if student.marks.is_empty() {
        return DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect();
    }

    let mut seen = HashSet::new();
    student
        .marks
        .iter()
        .filter(|m| seen.insert(m.subject.clone()))
        .map(|m| m.subject.clone())
        .collect()
}

fn project_points<R: Rng>(current: f64, rng: &mut R) -> Vec<TrendPoint> {
    let base = current - 15.0;
    let last = *TREND_LEVELS.end();

    TREND_LEVELS
        .map(|level| {
            let score = if level == last {
                current
            } else {
                base + f64::from(level - 6) * 2.5 + rng.random_range(-5.0..5.0)
            };
            TrendPoint {
                level,
                score: round_to(score.clamp(0.0, 100.0), 1),
            }
        })
        .collect()
}
