//! Core data structures for student records
//!
//! This module contains the student and mark records together with the
//! `StudentCollection` store that enforces the record invariants.

use crate::core::grading::{Grade, term_average};
use crate::utils::error::{AppError, AppResult};
use crate::utils::format::{self, parse_score};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// One subject's three term scores within a class, with derived average and grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    #[serde(default)]
    pub class_name: String,
    pub subject: String,
    #[serde(default)]
    pub t1: f64,
    #[serde(default)]
    pub t2: f64,
    #[serde(default)]
    pub t3: f64,
    #[serde(deserialize_with = "format::deserialize_average")]
    pub avg: f64,
    pub grade: Grade,
}

/// A mark as submitted for entry, before averages are derived
#[derive(Debug, Clone, PartialEq)]
pub struct MarkEntry {
    pub class_name: String,
    pub subject: String,
    pub t1: f64,
    pub t2: f64,
    pub t3: f64,
}

/// Where `record_mark` put the mark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkWrite {
    Inserted(usize),
    Overwritten(usize),
}

/// A registered student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default)]
    pub id: String,
    pub admission_id: String,
    pub full_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, with = "format::option_date")]
    pub birthday: Option<NaiveDate>,
    #[serde(with = "format::date")]
    pub admission_date: NaiveDate,
    #[serde(default)]
    pub guardian_name: String,
    #[serde(default)]
    pub guardian_contact: String,
    #[serde(default)]
    pub marks: Vec<Mark>,
}

/// Submitted student fields; `None` means "not provided"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentFields {
    pub admission_id: Option<String>,
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub admission_date: Option<NaiveDate>,
    pub guardian_name: Option<String>,
    pub guardian_contact: Option<String>,
}

/// The record store: an ordered sequence of students
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Student>", into = "Vec<Student>")]
pub struct StudentCollection {
    students: Vec<Student>,
}

impl TryFrom<Vec<Student>> for StudentCollection {
    type Error = AppError;

    fn try_from(students: Vec<Student>) -> AppResult<Self> {
        Self::from_students(students)
    }
}

impl From<StudentCollection> for Vec<Student> {
    fn from(collection: StudentCollection) -> Self {
        collection.students
    }
}

impl Mark {
    pub fn new(class_name: impl Into<String>, subject: impl Into<String>, t1: f64, t2: f64, t3: f64) -> Self {
        let avg = term_average(t1, t2, t3);
        Self {
            class_name: class_name.into(),
            subject: subject.into(),
            t1,
            t2,
            t3,
            avg,
            grade: Grade::from_average(avg),
        }
    }

    /// Same (subject, class) slot: subject ignores case, class is exact
    pub fn same_slot(&self, class_name: &str, subject: &str) -> bool {
        self.class_name == class_name && self.subject.to_lowercase() == subject.to_lowercase()
    }
}

impl MarkEntry {
    pub fn new(class_name: impl Into<String>, subject: impl Into<String>, t1: f64, t2: f64, t3: f64) -> Self {
        let subject: String = subject.into();
        Self {
            class_name: class_name.into(),
            subject: subject.trim().to_string(),
            t1,
            t2,
            t3,
        }
    }

    /// Build an entry from raw term strings; unreadable scores become 0
    pub fn parse(class_name: &str, subject: &str, terms: [&str; 3]) -> Self {
        Self::new(
            class_name,
            subject,
            parse_score(terms[0]),
            parse_score(terms[1]),
            parse_score(terms[2]),
        )
    }

    pub fn into_mark(self) -> Mark {
        Mark::new(self.class_name, self.subject, self.t1, self.t2, self.t3)
    }
}

impl Student {
    fn from_fields(fields: StudentFields) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            admission_id: fields.admission_id.unwrap_or_default(),
            full_name: fields.full_name.unwrap_or_default(),
            address: fields.address.unwrap_or_default(),
            birthday: fields.birthday,
            admission_date: fields.admission_date.unwrap_or_else(|| Local::now().date_naive()),
            guardian_name: fields.guardian_name.unwrap_or_default(),
            guardian_contact: fields.guardian_contact.unwrap_or_default(),
            marks: Vec::new(),
        }
    }

    fn merge(&mut self, fields: StudentFields) {
        if let Some(v) = fields.admission_id {
            self.admission_id = v;
        }
        if let Some(v) = fields.full_name {
            self.full_name = v;
        }
        if let Some(v) = fields.address {
            self.address = v;
        }
        if let Some(v) = fields.birthday {
            self.birthday = Some(v);
        }
        if let Some(v) = fields.admission_date {
            self.admission_date = v;
        }
        if let Some(v) = fields.guardian_name {
            self.guardian_name = v;
        }
        if let Some(v) = fields.guardian_contact {
            self.guardian_contact = v;
        }
    }

    /// Case-insensitive substring match on admission id or full name.
    /// `normalized_query` must already be trimmed and lowercased.
    pub fn matches(&self, normalized_query: &str) -> bool {
        self.admission_id.to_lowercase().contains(normalized_query)
            || self.full_name.to_lowercase().contains(normalized_query)
    }

    /// Record a mark, overwriting an existing mark for the same (subject, class)
    pub fn record_mark(&mut self, entry: MarkEntry) -> MarkWrite {
        let existing = self
            .marks
            .iter()
            .position(|m| m.same_slot(&entry.class_name, &entry.subject));

        let mark = entry.into_mark();
        match existing {
            Some(index) => {
                self.marks[index] = mark;
                MarkWrite::Overwritten(index)
            }
            None => {
                self.marks.push(mark);
                MarkWrite::Inserted(self.marks.len() - 1)
            }
        }
    }

    /// Replace the mark at `index` in place, without the (subject, class) check.
    /// Returns false when `index` is out of range.
    pub fn edit_mark(&mut self, index: usize, entry: MarkEntry) -> bool {
        match self.marks.get_mut(index) {
            Some(slot) => {
                *slot = entry.into_mark();
                true
            }
            None => false,
        }
    }

    /// Remove the mark at `index`; an out-of-range index changes nothing
    pub fn delete_mark(&mut self, index: usize) -> Option<Mark> {
        if index < self.marks.len() {
            Some(self.marks.remove(index))
        } else {
            None
        }
    }

    /// Lookup display line: `ADMISSION-ID - Full Name`
    pub fn display_line(&self) -> String {
        format!("{} - {}", self.admission_id, self.full_name)
    }
}

impl StudentFields {
    /// Trim every provided text field
    pub fn trimmed(self) -> Self {
        let trim = |v: Option<String>| v.map(|s| s.trim().to_string());
        Self {
            admission_id: trim(self.admission_id),
            full_name: trim(self.full_name),
            address: trim(self.address),
            birthday: self.birthday,
            admission_date: self.admission_date,
            guardian_name: trim(self.guardian_name),
            guardian_contact: trim(self.guardian_contact),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl StudentCollection {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            students: Vec::new(),
        }
    }

    /// Build a store from loaded records, giving every record an id.
    ///
    /// Fails with `DuplicateIdentifier` if two records share an admission id.
    pub fn from_students(students: Vec<Student>) -> AppResult<Self> {
        let mut seen_admission = HashSet::new();
        let mut seen_ids = HashSet::new();
        let mut checked = Vec::with_capacity(students.len());

        for mut student in students {
            if !seen_admission.insert(student.admission_id.to_lowercase()) {
                return Err(AppError::DuplicateIdentifier(student.admission_id));
            }
            if student.id.is_empty() || !seen_ids.insert(student.id.clone()) {
                student.id = Uuid::new_v4().to_string();
                seen_ids.insert(student.id.clone());
            }
            checked.push(student);
        }

        Ok(Self { students: checked })
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn into_students(self) -> Vec<Student> {
        self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Find a student by record id
    pub fn find_by_id(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    fn find_by_id_mut(&mut self, id: &str) -> AppResult<&mut Student> {
        self.students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::not_found("Student", id))
    }

    /// Find a student by admission id, ignoring case
    pub fn find_by_admission_id(&self, admission_id: &str) -> Option<&Student> {
        let wanted = admission_id.trim().to_lowercase();
        self.students
            .iter()
            .find(|s| s.admission_id.to_lowercase() == wanted)
    }

    /// Find a student by record id or admission id
    pub fn find(&self, identifier: &str) -> Option<&Student> {
        self.find_by_id(identifier)
            .or_else(|| self.find_by_admission_id(identifier))
    }

    /// True if another student (other than `exclude_id`) already uses `admission_id`
    pub fn admission_id_taken(&self, admission_id: &str, exclude_id: Option<&str>) -> bool {
        let wanted = admission_id.to_lowercase();
        self.students
            .iter()
            .filter(|s| exclude_id != Some(s.id.as_str()))
            .any(|s| s.admission_id.to_lowercase() == wanted)
    }

    /// Create a student, or merge `fields` into the student `existing_id`.
    ///
    /// Text fields are trimmed. A colliding admission id is rejected with
    /// `DuplicateIdentifier` and the store is left untouched.
    pub fn upsert_student(&mut self, fields: StudentFields, existing_id: Option<&str>) -> AppResult<Student> {
        let fields = fields.trimmed();

        match existing_id {
            Some(id) => {
                let current = self
                    .find_by_id(id)
                    .ok_or_else(|| AppError::not_found("Student", id))?;

                let admission_id = fields
                    .admission_id
                    .clone()
                    .unwrap_or_else(|| current.admission_id.clone());

                if self.admission_id_taken(&admission_id, Some(id)) {
                    tracing::debug!(admission_id = %admission_id, "update rejected: duplicate admission id");
                    return Err(AppError::DuplicateIdentifier(admission_id));
                }

                let student = self.find_by_id_mut(id)?;
                student.merge(fields);
                Ok(student.clone())
            }
            None => {
                let admission_id = fields.admission_id.clone().unwrap_or_default();
                if self.admission_id_taken(&admission_id, None) {
                    tracing::debug!(admission_id = %admission_id, "create rejected: duplicate admission id");
                    return Err(AppError::DuplicateIdentifier(admission_id));
                }

                let student = Student::from_fields(fields);
                self.students.push(student.clone());
                Ok(student)
            }
        }
    }

    /// Add an existing record (marks included) under a fresh id.
    ///
    /// Same uniqueness rule as `upsert_student`.
    pub fn insert_imported(&mut self, mut student: Student) -> AppResult<Student> {
        if self.admission_id_taken(&student.admission_id, None) {
            return Err(AppError::DuplicateIdentifier(student.admission_id));
        }

        student.id = Uuid::new_v4().to_string();
        self.students.push(student.clone());
        Ok(student)
    }

    /// Record a mark for a student (insert or overwrite by (subject, class))
    pub fn record_mark(&mut self, student_id: &str, entry: MarkEntry) -> AppResult<MarkWrite> {
        Ok(self.find_by_id_mut(student_id)?.record_mark(entry))
    }

    /// Replace a student's mark at `index` in place
    pub fn edit_mark(&mut self, student_id: &str, index: usize, entry: MarkEntry) -> AppResult<()> {
        if self.find_by_id_mut(student_id)?.edit_mark(index, entry) {
            Ok(())
        } else {
            Err(AppError::not_found("Mark", format!("#{}", index + 1)))
        }
    }

    /// Delete a student's mark at `index`; `Ok(None)` if the index is out of range
    pub fn delete_mark(&mut self, student_id: &str, index: usize) -> AppResult<Option<Mark>> {
        Ok(self.find_by_id_mut(student_id)?.delete_mark(index))
    }

    /// Students matching `query`, most recent admission first.
    ///
    /// An empty query matches every student; ties keep store order.
    pub fn search(&self, query: &str) -> Vec<&Student> {
        let normalized = query.trim().to_lowercase();
        let mut matches: Vec<&Student> = self
            .students
            .iter()
            .filter(|s| s.matches(&normalized))
            .collect();

        matches.sort_by(|a, b| b.admission_date.cmp(&a.admission_date));
        matches
    }

    /// Students matching `query` in store order, for picking one student.
    ///
    /// Unlike `search`, an empty query matches nothing.
    pub fn lookup(&self, query: &str) -> Vec<&Student> {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return Vec::new();
        }

        self.students
            .iter()
            .filter(|s| s.matches(&normalized))
            .collect()
    }
}
