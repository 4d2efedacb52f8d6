use chrono::NaiveDate;
use eduadmin::{AppError, MarkEntry, StudentCollection, StudentFields};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Register { admission_id: String, day: u32 },
    Update { target: usize, admission_id: String },
    Mark { target: usize, class_name: String, subject: String, score: f64 },
}

fn admission_id() -> impl Strategy<Value = String> {
    // A small pool with case variants so collisions are common
    prop::sample::select(vec!["ADM-1", "adm-1", "ADM-2", "Adm-2", "ADM-3", " ADM-3 "])
        .prop_map(str::to_string)
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (admission_id(), 1u32..28).prop_map(|(admission_id, day)| Op::Register { admission_id, day }),
        (0usize..4, admission_id()).prop_map(|(target, admission_id)| Op::Update { target, admission_id }),
        (
            0usize..4,
            prop::sample::select(vec!["Grade 6", "Grade 7"]),
            prop::sample::select(vec!["Maths", "maths", "Science"]),
            0.0f64..100.0
        )
            .prop_map(|(target, class_name, subject, score)| Op::Mark {
                target,
                class_name: class_name.to_string(),
                subject: subject.to_string(),
                score,
            }),
    ]
}

fn fields(admission_id: &str, day: u32) -> StudentFields {
    StudentFields {
        admission_id: Some(admission_id.to_string()),
        full_name: Some(format!("Student {}", admission_id.trim())),
        admission_date: NaiveDate::from_ymd_opt(2024, 1, day),
        ..Default::default()
    }
}

fn admission_ids_unique(collection: &StudentCollection) -> bool {
    let mut seen = HashSet::new();
    collection
        .students()
        .iter()
        .all(|s| seen.insert(s.admission_id.to_lowercase()))
}

fn apply(collection: &mut StudentCollection, op: &Op) -> Result<(), AppError> {
    match op {
        Op::Register { admission_id, day } => collection.upsert_student(fields(admission_id, *day), None).map(|_| ()),
        Op::Update { target, admission_id } => {
            let Some(id) = collection.students().get(*target).map(|s| s.id.clone()) else {
                return Ok(());
            };
            let update = StudentFields {
                admission_id: Some(admission_id.clone()),
                ..Default::default()
            };
            collection.upsert_student(update, Some(&id)).map(|_| ())
        }
        Op::Mark { target, class_name, subject, score } => {
            let Some(id) = collection.students().get(*target).map(|s| s.id.clone()) else {
                return Ok(());
            };
            let entry = MarkEntry::new(class_name.as_str(), subject.as_str(), *score, *score, *score);
            collection.record_mark(&id, entry).map(|_| ())
        }
    }
}

proptest! {
    #[test]
    fn admission_ids_stay_unique(ops in prop::collection::vec(op(), 1..40)) {
        let mut collection = StudentCollection::new();

        for op in &ops {
            let before = collection.clone();
            match apply(&mut collection, op) {
                Ok(()) => {}
                Err(AppError::DuplicateIdentifier(_)) => {
                    // rejected writes leave the store untouched
                    prop_assert_eq!(&before, &collection);
                }
                Err(e) => prop_assert!(false, "unexpected error {:?}", e),
            }
            prop_assert!(admission_ids_unique(&collection));
        }
    }

    #[test]
    fn one_mark_per_subject_and_class(ops in prop::collection::vec(op(), 1..40)) {
        let mut collection = StudentCollection::new();
        for op in &ops {
            let _ = apply(&mut collection, op);
        }

        for student in collection.students() {
            let mut slots = HashSet::new();
            for mark in &student.marks {
                prop_assert!(slots.insert((mark.class_name.clone(), mark.subject.to_lowercase())));
            }
        }
    }

    #[test]
    fn search_orders_newest_first(days in prop::collection::vec(1u32..28, 1..12)) {
        let mut collection = StudentCollection::new();
        for (i, day) in days.iter().enumerate() {
            collection
                .upsert_student(fields(&format!("ADM-{}", i), *day), None)
                .unwrap();
        }

        let results = collection.search("");
        prop_assert_eq!(results.len(), days.len());
        prop_assert!(results
            .windows(2)
            .all(|w| w[0].admission_date >= w[1].admission_date));
    }
}
