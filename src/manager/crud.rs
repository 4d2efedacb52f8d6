// Student operations - register, edit, show

use anyhow::Result;
use std::io::IsTerminal;

use crate::cli::{AddArgs, EditArgs, ShowArgs, StudentFieldArgs};
use crate::config::Config;
use crate::core::data::{Student, StudentFields};
use crate::core::operations::StudentOperations;
use crate::core::traits::StudentCrud;
use crate::manager::resolve_student;
use crate::utils::format::{format_date, parse_date};
use crate::utils::{self, AppError, DisplayFormatter, OutputStyle, print_success, print_warning};

impl From<&StudentFieldArgs> for StudentFields {
    fn from(args: &StudentFieldArgs) -> Self {
        Self {
            admission_id: args.admission_id.clone(),
            full_name: args.name.clone(),
            address: args.address.clone(),
            birthday: args.birthday,
            admission_date: args.admission_date,
            guardian_name: args.guardian_name.clone(),
            guardian_contact: args.guardian_contact.clone(),
        }
    }
}

fn label(text: &str) -> String {
    format!("{}: ", OutputStyle::label(text))
}

pub fn handle_add_command(config: Config, args: &AddArgs) -> Result<()> {
    let ops = StudentOperations::new(&config);
    let interactive = std::io::stdin().is_terminal();
    let mut fields = StudentFields::from(&args.fields);

    if fields.admission_id.is_none() && interactive {
        fields.admission_id = Some(utils::prompt_input(&label("Admission ID"))?);
    }
    if fields
        .admission_id
        .as_deref()
        .is_none_or(|id| id.trim().is_empty())
    {
        return Err(AppError::MissingField("Admission ID".to_string()).into());
    }

    if fields.full_name.is_none() && interactive {
        fields.full_name = Some(utils::prompt_input(&label("Full Name"))?);
    }

    let student = ops.register_student(fields)?;
    print_success(&format!("Student registered: {}", student.display_line()));
    Ok(())
}

pub fn handle_edit_command(config: Config, args: &EditArgs) -> Result<()> {
    let ops = StudentOperations::new(&config);

    let Some(student) = resolve_student(&ops, &args.student)? else {
        return Ok(());
    };

    let mut fields = StudentFields::from(&args.fields);
    if fields.is_empty() {
        if !std::io::stdin().is_terminal() {
            print_warning("Nothing to change; pass at least one field flag");
            return Ok(());
        }
        fields = prompt_fields(&student)?;
    }
    if fields
        .admission_id
        .as_deref()
        .is_some_and(|id| id.trim().is_empty())
    {
        return Err(AppError::MissingField("Admission ID".to_string()).into());
    }

    let updated = ops.update_student(&student.id, fields)?;
    print_success(&format!("Student updated: {}", updated.display_line()));
    Ok(())
}

/// Prompt for every field with the current value as default
fn prompt_fields(student: &Student) -> Result<StudentFields> {
    println!("{}", OutputStyle::muted("Press Enter to keep the current value."));

    let birthday = match student.birthday {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => String::new(),
    };
    let birthday = utils::prompt_with_default("Birthday (YYYY-MM-DD)", &birthday)?;
    let admission_date = utils::prompt_with_default(
        "Admission Date (YYYY-MM-DD)",
        &student.admission_date.format("%Y-%m-%d").to_string(),
    )?;

    Ok(StudentFields {
        admission_id: Some(utils::prompt_with_default("Admission ID", &student.admission_id)?),
        full_name: Some(utils::prompt_with_default("Full Name", &student.full_name)?),
        address: Some(utils::prompt_with_default("Address", &student.address)?),
        birthday: optional_date(&birthday)?,
        admission_date: optional_date(&admission_date)?,
        guardian_name: Some(utils::prompt_with_default("Guardian Name", &student.guardian_name)?),
        guardian_contact: Some(utils::prompt_with_default(
            "Guardian Contact",
            &student.guardian_contact,
        )?),
    })
}

fn optional_date(raw: &str) -> Result<Option<chrono::NaiveDate>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date(raw)
        .map(Some)
        .map_err(|e| AppError::Parse(e).into())
}

pub fn handle_show_command(config: Config, args: &ShowArgs) -> Result<()> {
    let ops = StudentOperations::new(&config);

    let Some(student) = resolve_student(&ops, &args.student)? else {
        return Ok(());
    };

    let today = chrono::Local::now().date_naive();
    let mut content = DisplayFormatter::format_profile(&student);
    if let Some(birthday) = student.birthday {
        content.push_str(&OutputStyle::field_line(
            "Age",
            &format!("{} years", utils::format::calculate_age(&birthday, &today)),
        ));
    }
    content.push_str(&OutputStyle::field_line(
        "Marks Recorded",
        &student.marks.len().to_string(),
    ));
    content.push_str(&format!(
        "{}\n",
        OutputStyle::muted(&format!("Shown on {}", format_date(Some(&today))))
    ));

    DisplayFormatter::emit(&content, &config)?;
    Ok(())
}
