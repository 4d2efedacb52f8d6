use crate::core::data::{Student, StudentCollection};

/// Lookup helpers for turning a free-text query into one student
pub struct SearchEngine;

/// How a student argument resolved against the store
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(Student),
    Ambiguous(Vec<Student>),
    NotFound,
}

impl SearchEngine {
    /// Resolve an argument: record id or exact admission id first, then a lookup query
    pub fn resolve(collection: &StudentCollection, query: &str) -> Resolution {
        if let Some(student) = collection.find(query.trim()) {
            return Resolution::Found(student.clone());
        }

        let mut matches: Vec<Student> = collection.lookup(query).into_iter().cloned().collect();
        match matches.len() {
            0 => Resolution::NotFound,
            1 => Resolution::Found(matches.remove(0)),
            _ => Resolution::Ambiguous(matches),
        }
    }

    /// Display lines for the selection list
    pub fn format_for_selection(students: &[Student]) -> Vec<String> {
        students.iter().map(Student::display_line).collect()
    }

    /// The candidate behind the selected list position
    pub fn selected(candidates: Vec<Student>, index: usize) -> Option<Student> {
        candidates.into_iter().nth(index)
    }
}
