//! Core trait definitions for student record management
//!
//! Storage is the only seam a backend must provide; search and CRUD are
//! provided in terms of `load_students`/`save_students`, so every mutating
//! operation writes the whole snapshot back after it succeeds.

use crate::core::data::{Mark, MarkEntry, MarkWrite, Student, StudentCollection, StudentFields};
use crate::core::promotion::{self, PromotionOutcome};
use crate::core::samples::sample_students;
use crate::utils::error::{AppError, AppResult};

/// Snapshot persistence for the student store
pub trait StudentStorage {
    /// Load the full store; an absent snapshot is an empty store
    fn load_students(&self) -> AppResult<StudentCollection>;

    /// Overwrite the stored snapshot with `collection`
    fn save_students(&self, collection: &StudentCollection) -> AppResult<()>;

    /// Ensure the storage location exists
    fn ensure_storage_exists(&self) -> AppResult<()>;
}

/// Outcome of merging imported records into the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    pub added: usize,
    pub skipped: Vec<String>,
}

/// Read-only queries over the store
pub trait StudentSearch: StudentStorage {
    /// Students matching `query`, newest admission first
    fn search_students(&self, query: &str) -> AppResult<Vec<Student>> {
        let collection = self.load_students()?;
        Ok(collection.search(query).into_iter().cloned().collect())
    }

    /// Find a student by record id or admission id
    fn find_student(&self, identifier: &str) -> AppResult<Option<Student>> {
        let collection = self.load_students()?;
        Ok(collection.find(identifier).cloned())
    }

    /// Promotion outcomes for every student with marks
    fn promotion_outcomes(&self, threshold: f64) -> AppResult<Vec<PromotionOutcome>> {
        let collection = self.load_students()?;
        Ok(promotion::evaluate_all(collection.students(), threshold))
    }
}

/// Mutating operations; each saves the snapshot only when the store changed
pub trait StudentCrud: StudentStorage {
    fn register_student(&self, fields: StudentFields) -> AppResult<Student> {
        let mut collection = self.load_students()?;
        let student = collection.upsert_student(fields, None)?;
        self.save_students(&collection)?;
        tracing::info!(admission_id = %student.admission_id, "student registered");
        Ok(student)
    }

    fn update_student(&self, id: &str, fields: StudentFields) -> AppResult<Student> {
        let mut collection = self.load_students()?;
        let student = collection.upsert_student(fields, Some(id))?;
        self.save_students(&collection)?;
        tracing::info!(admission_id = %student.admission_id, "student updated");
        Ok(student)
    }

    fn record_mark(&self, student_id: &str, entry: MarkEntry) -> AppResult<MarkWrite> {
        let mut collection = self.load_students()?;
        let write = collection.record_mark(student_id, entry)?;
        self.save_students(&collection)?;
        tracing::info!(student_id, ?write, "mark recorded");
        Ok(write)
    }

    fn edit_mark(&self, student_id: &str, index: usize, entry: MarkEntry) -> AppResult<()> {
        let mut collection = self.load_students()?;
        collection.edit_mark(student_id, index, entry)?;
        self.save_students(&collection)?;
        tracing::info!(student_id, index, "mark edited");
        Ok(())
    }

    fn delete_mark(&self, student_id: &str, index: usize) -> AppResult<Option<Mark>> {
        let mut collection = self.load_students()?;
        let removed = collection.delete_mark(student_id, index)?;
        if removed.is_some() {
            self.save_students(&collection)?;
            tracing::info!(student_id, index, "mark deleted");
        } else {
            tracing::debug!(student_id, index, "mark index out of range, nothing deleted");
        }
        Ok(removed)
    }

    /// Insert the starter records if the store is empty; returns how many were added
    fn seed_samples(&self) -> AppResult<usize> {
        let mut collection = self.load_students()?;
        if !collection.is_empty() {
            return Ok(0);
        }

        let samples = sample_students();
        let count = samples.len();
        for fields in samples {
            collection.upsert_student(fields, None)?;
        }
        self.save_students(&collection)?;
        Ok(count)
    }

    /// Replace the whole store; rejected if `students` breaks admission id uniqueness
    fn replace_students(&self, students: Vec<Student>) -> AppResult<usize> {
        let collection = StudentCollection::from_students(students)?;
        self.save_students(&collection)?;
        Ok(collection.len())
    }

    /// Add each record under a fresh id, skipping admission id collisions
    fn merge_students(&self, students: Vec<Student>) -> AppResult<MergeReport> {
        let mut collection = self.load_students()?;
        let mut report = MergeReport::default();

        for student in students {
            match collection.insert_imported(student) {
                Ok(_) => report.added += 1,
                Err(AppError::DuplicateIdentifier(admission_id)) => report.skipped.push(admission_id),
                Err(e) => return Err(e),
            }
        }

        if report.added > 0 {
            self.save_students(&collection)?;
        }
        Ok(report)
    }
}
