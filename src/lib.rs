//! EduAdmin - a student records administration tool
//!
//! This library provides the record store, the grading and promotion rules,
//! snapshot persistence, and the terminal presentation used by the CLI.

pub mod cli;
pub mod config;
pub mod core;
pub mod manager;
pub mod utils;

// Re-export core types and traits for easier use
pub use core::{
    data::{Mark, MarkEntry, MarkWrite, Student, StudentCollection, StudentFields},
    grading::Grade,
    operations::StudentOperations,
    promotion::{PromotionOutcome, PromotionStatus},
    traits::{MergeReport, StudentCrud, StudentSearch, StudentStorage},
};
pub use utils::error::{AppError, AppResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Main library interface for external usage
pub struct EduAdmin {
    operations: StudentOperations,
}

impl EduAdmin {
    /// Create a new EduAdmin instance with the given configuration
    pub fn new(config: config::Config) -> Self {
        Self {
            operations: StudentOperations::new(&config),
        }
    }

    /// Get the underlying operations for direct access
    pub fn operations(&self) -> &StudentOperations {
        &self.operations
    }
}
