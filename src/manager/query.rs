// Query operations - list, promotion, report, analysis

use anyhow::Result;

use crate::cli::{AnalysisArgs, ListArgs, ListFormat, PromotionArgs, ReportArgs};
use crate::config::Config;
use crate::core::analysis::project_trends;
use crate::core::operations::StudentOperations;
use crate::core::promotion::evaluate_promotion_with;
use crate::core::traits::StudentSearch;
use crate::manager::resolve_student;
use crate::utils::{AppError, DisplayFormatter, FlowResult, handle_flow, print_warning};

pub fn handle_list_command(config: Config, args: &ListArgs) -> Result<()> {
    let ops = StudentOperations::new(&config);
    let query = args.query.as_deref().unwrap_or("");
    let students = ops.search_students(query)?;

    if students.is_empty() {
        if query.trim().is_empty() {
            handle_flow(FlowResult::EmptyList {
                item_type: "students".to_string(),
            });
        } else {
            handle_flow(FlowResult::NotFound {
                item_type: "Student".to_string(),
                search_term: query.to_string(),
            });
        }
        return Ok(());
    }

    let format = args.format.clone().unwrap_or(ListFormat::Table);
    let today = chrono::Local::now().date_naive();
    let content = DisplayFormatter::format_students(&students, &format, &today)?;

    if format == ListFormat::Json {
        print!("{}", content);
    } else {
        DisplayFormatter::emit(&content, &config)?;
    }
    Ok(())
}

pub fn handle_promotion_command(config: Config, args: &PromotionArgs) -> Result<()> {
    let ops = StudentOperations::new(&config);
    let outcomes = ops.promotion_outcomes(config.grading.promotion_threshold)?;

    if args.json {
        let json = serde_json::to_string_pretty(&outcomes)
            .map_err(|e| AppError::System(format!("Failed to serialize outcomes: {}", e)))?;
        println!("{}", json);
        return Ok(());
    }

    if outcomes.is_empty() {
        handle_flow(FlowResult::EmptyList {
            item_type: "students with marks".to_string(),
        });
        return Ok(());
    }

    DisplayFormatter::emit(&DisplayFormatter::format_promotions(&outcomes), &config)?;
    Ok(())
}

pub fn handle_report_command(config: Config, args: &ReportArgs) -> Result<()> {
    let ops = StudentOperations::new(&config);

    let Some(student) = resolve_student(&ops, &args.student)? else {
        return Ok(());
    };

    let Some(outcome) = evaluate_promotion_with(&student, config.grading.promotion_threshold) else {
        print_warning(&format!(
            "No marks recorded for {}; report unavailable",
            student.display_line()
        ));
        return Ok(());
    };

    let content = DisplayFormatter::format_report(&student, &outcome, &config);
    DisplayFormatter::emit(&content, &config)?;
    Ok(())
}

pub fn handle_analysis_command(config: Config, args: &AnalysisArgs) -> Result<()> {
    let ops = StudentOperations::new(&config);

    let Some(student) = resolve_student(&ops, &args.student)? else {
        return Ok(());
    };

    let trends = project_trends(&student, args.seed);
    tracing::debug!(subjects = trends.len(), seeded = args.seed.is_some(), "trends projected");

    let content = DisplayFormatter::format_trends(&student, &trends);
    DisplayFormatter::emit(&content, &config)?;
    Ok(())
}
