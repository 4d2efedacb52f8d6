//! Core operations implementation
//!
//! `StudentOperations` persists the store as a pretty-printed JSON snapshot
//! at `general.student_file` and picks up search and CRUD from the core traits.

use crate::config::Config;
use crate::core::data::{Student, StudentCollection};
use crate::core::traits::{StudentCrud, StudentSearch, StudentStorage};
use crate::utils::error::{AppError, AppResult};
use std::path::Path;

/// Main operations hub backed by the JSON snapshot file
pub struct StudentOperations {
    config: Config,
}

impl StudentOperations {
    /// Create a new StudentOperations instance with the given configuration
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn student_file(&self) -> &Path {
        &self.config.general.student_file
    }
}

/// Parse a snapshot; blank content is an empty store
pub fn parse_snapshot(content: &str) -> AppResult<StudentCollection> {
    if content.trim().is_empty() {
        return Ok(StudentCollection::new());
    }

    let students: Vec<Student> = serde_json::from_str(content)
        .map_err(|e| AppError::Parse(format!("Failed to parse student snapshot: {}", e)))?;

    StudentCollection::from_students(students)
}

/// Read raw records from a snapshot file without enforcing store invariants
pub fn read_records(path: &Path) -> AppResult<Vec<Student>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content)
        .map_err(|e| AppError::Parse(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write records as a pretty-printed JSON snapshot
pub fn write_records(path: &Path, students: &[Student]) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::Io(format!("Failed to create directory {}: {}", parent.display(), e))
        })?;
    }

    let content = serde_json::to_string_pretty(students)
        .map_err(|e| AppError::System(format!("Failed to serialize students: {}", e)))?;

    std::fs::write(path, content)
        .map_err(|e| AppError::Io(format!("Failed to write {}: {}", path.display(), e)))
}

impl StudentStorage for StudentOperations {
    fn load_students(&self) -> AppResult<StudentCollection> {
        let path = self.student_file();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no snapshot yet, starting empty");
            return Ok(StudentCollection::new());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        let collection = parse_snapshot(&content)?;
        tracing::debug!(path = %path.display(), students = collection.len(), "snapshot loaded");
        Ok(collection)
    }

    fn save_students(&self, collection: &StudentCollection) -> AppResult<()> {
        self.ensure_storage_exists()?;
        write_records(self.student_file(), collection.students())?;
        tracing::debug!(
            path = %self.student_file().display(),
            students = collection.len(),
            "snapshot saved"
        );
        Ok(())
    }

    fn ensure_storage_exists(&self) -> AppResult<()> {
        let path = self.student_file();
        if !path.exists() {
            write_records(path, &[])?;
        }
        Ok(())
    }
}

impl StudentSearch for StudentOperations {}

impl StudentCrud for StudentOperations {}
