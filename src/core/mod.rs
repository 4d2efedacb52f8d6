//! Core business logic layer
//!
//! This module contains the record store, the grading and promotion rules,
//! the trend projection, and the storage traits that tie them to a snapshot.

pub mod analysis;
pub mod data;
pub mod grading;
pub mod operations;
pub mod promotion;
pub mod samples;
pub mod traits;
