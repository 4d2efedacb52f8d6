// Mark operations - record, edit, delete, list

use anyhow::Result;
use std::io::IsTerminal;

use crate::cli::{MarkAddArgs, MarkDeleteArgs, MarkEditArgs, MarkListArgs, MarksCommands, TermArgs};
use crate::config::Config;
use crate::core::data::{Mark, MarkEntry, MarkWrite};
use crate::core::operations::StudentOperations;
use crate::core::traits::{StudentCrud, StudentSearch};
use crate::manager::resolve_student;
use crate::utils::format::{format_fixed, parse_score};
use crate::utils::{
    self, AppError, DisplayFormatter, FlowResult, OutputStyle, handle_flow, print_success, print_warning,
};

pub fn handle_marks_command(config: Config, command: MarksCommands) -> Result<()> {
    match command {
        MarksCommands::Add(args) => handle_mark_add(config, &args),
        MarksCommands::Edit(args) => handle_mark_edit(config, &args),
        MarksCommands::Delete(args) => handle_mark_delete(config, &args),
        MarksCommands::List(args) => handle_mark_list(config, &args),
    }
}

fn describe(mark: &Mark) -> String {
    let class = if mark.class_name.is_empty() {
        "no class"
    } else {
        mark.class_name.as_str()
    };
    format!(
        "{} ({}) avg {} grade {}",
        mark.subject,
        class,
        format_fixed(mark.avg),
        mark.grade
    )
}

fn handle_mark_add(config: Config, args: &MarkAddArgs) -> Result<()> {
    let ops = StudentOperations::new(&config);

    let Some(student) = resolve_student(&ops, &args.student)? else {
        return Ok(());
    };

    let subject = match &args.subject {
        Some(subject) => subject.clone(),
        None if std::io::stdin().is_terminal() => {
            utils::prompt_input(&format!("{}: ", OutputStyle::label("Subject")))?
        }
        None => String::new(),
    };
    if subject.trim().is_empty() {
        return Err(AppError::MissingField("Subject".to_string()).into());
    }

    let TermArgs { term1, term2, term3 } = &args.terms;
    let terms = [term1, term2, term3].map(|t| t.as_deref().unwrap_or(""));
    let entry = MarkEntry::parse(&args.class, &subject, terms);

    let write = ops.record_mark(&student.id, entry)?;
    let stored = stored_mark(&ops, &student.id, write)?;

    match write {
        MarkWrite::Inserted(_) => print_success(&format!("Mark recorded: {}", describe(&stored))),
        MarkWrite::Overwritten(_) => {
            print_warning(&format!("Existing mark replaced: {}", describe(&stored)))
        }
    }
    Ok(())
}

/// Re-read the mark a write landed on
fn stored_mark(ops: &StudentOperations, student_id: &str, write: MarkWrite) -> Result<Mark> {
    let index = match write {
        MarkWrite::Inserted(i) | MarkWrite::Overwritten(i) => i,
    };
    ops.find_student(student_id)?
        .and_then(|s| s.marks.get(index).cloned())
        .ok_or_else(|| AppError::not_found("Mark", format!("#{}", index + 1)).into())
}

fn handle_mark_edit(config: Config, args: &MarkEditArgs) -> Result<()> {
    let ops = StudentOperations::new(&config);

    let Some(student) = resolve_student(&ops, &args.student)? else {
        return Ok(());
    };

    let current = args
        .position
        .checked_sub(1)
        .and_then(|i| student.marks.get(i))
        .ok_or_else(|| AppError::not_found("Mark", format!("#{}", args.position)))?;

    let subject = args.subject.clone().unwrap_or_else(|| current.subject.clone());
    if subject.trim().is_empty() {
        return Err(AppError::MissingField("Subject".to_string()).into());
    }

    let term = |raw: &Option<String>, existing: f64| raw.as_deref().map(parse_score).unwrap_or(existing);
    let entry = MarkEntry::new(
        args.class.clone().unwrap_or_else(|| current.class_name.clone()),
        subject,
        term(&args.terms.term1, current.t1),
        term(&args.terms.term2, current.t2),
        term(&args.terms.term3, current.t3),
    );

    let index = args.position - 1;
    ops.edit_mark(&student.id, index, entry)?;
    let stored = stored_mark(&ops, &student.id, MarkWrite::Overwritten(index))?;
    print_success(&format!("Mark #{} updated: {}", args.position, describe(&stored)));
    Ok(())
}

fn handle_mark_delete(config: Config, args: &MarkDeleteArgs) -> Result<()> {
    let ops = StudentOperations::new(&config);

    let Some(student) = resolve_student(&ops, &args.student)? else {
        return Ok(());
    };

    let not_found = || {
        handle_flow(FlowResult::NotFound {
            item_type: "Mark".to_string(),
            search_term: format!("#{}", args.position),
        })
    };

    let Some(index) = args.position.checked_sub(1) else {
        not_found();
        return Ok(());
    };

    if !args.force {
        let Some(mark) = student.marks.get(index) else {
            not_found();
            return Ok(());
        };
        let question = format!("Delete mark {}?", describe(mark));
        if !utils::prompt_yes_no(&question)? {
            handle_flow(FlowResult::Cancelled("Deletion cancelled".to_string()));
            return Ok(());
        }
    }

    match ops.delete_mark(&student.id, index)? {
        Some(removed) => print_success(&format!("Mark deleted: {}", describe(&removed))),
        None => not_found(),
    }
    Ok(())
}

fn handle_mark_list(config: Config, args: &MarkListArgs) -> Result<()> {
    let ops = StudentOperations::new(&config);

    let Some(student) = resolve_student(&ops, &args.student)? else {
        return Ok(());
    };

    let content = DisplayFormatter::format_marks(&student, args.class.as_deref());
    DisplayFormatter::emit(&content, &config)?;
    Ok(())
}
