// Business logic management modules
pub mod config; // Configuration management
pub mod crud; // Student registration, edits and profiles
pub mod marks; // Mark entry and listing
pub mod query; // Listing, promotion, reports and analysis
pub mod transfer; // Seed, import and export

pub use config::handle_config_command;
pub use crud::{handle_add_command, handle_edit_command, handle_show_command};
pub use marks::handle_marks_command;
pub use query::{
    handle_analysis_command, handle_list_command, handle_promotion_command, handle_report_command,
};
pub use transfer::{handle_export_command, handle_import_command, handle_seed_command};

use anyhow::Result;
use std::io::IsTerminal;

use crate::core::data::Student;
use crate::core::operations::StudentOperations;
use crate::core::traits::StudentStorage;
use crate::utils::{FlowResult, OutputStyle, Resolution, SearchEngine, handle_flow, select_from_list};

/// Resolve a student argument, asking the user to pick when it is ambiguous.
/// Returns `None` after reporting why nothing was resolved.
pub(crate) fn resolve_student(ops: &StudentOperations, query: &str) -> Result<Option<Student>> {
    let collection = ops.load_students()?;

    match SearchEngine::resolve(&collection, query) {
        Resolution::Found(student) => Ok(Some(student)),
        Resolution::NotFound => {
            handle_flow(FlowResult::NotFound {
                item_type: "Student".to_string(),
                search_term: query.to_string(),
            });
            Ok(None)
        }
        Resolution::Ambiguous(candidates) => pick_student(query, candidates),
    }
}

fn pick_student(query: &str, candidates: Vec<Student>) -> Result<Option<Student>> {
    let lines = SearchEngine::format_for_selection(&candidates);

    if !std::io::stdin().is_terminal() {
        println!(
            "⚠️  {}",
            OutputStyle::warning(&format!(
                "'{}' matches {} students; use an admission id:",
                query,
                candidates.len()
            ))
        );
        for line in &lines {
            println!("   {}", line);
        }
        return Ok(None);
    }

    let title = format!("Students matching '{}'", query);
    match select_from_list(&title, &lines)? {
        Some(index) => Ok(SearchEngine::selected(candidates, index)),
        None => {
            handle_flow(FlowResult::Cancelled("Selection cancelled".to_string()));
            Ok(None)
        }
    }
}
