// Snapshot transfer - seed, import, export

use anyhow::{Context, Result};

use crate::cli::{ExportArgs, ImportArgs};
use crate::config::Config;
use crate::core::operations::{StudentOperations, read_records, write_records};
use crate::core::traits::{StudentCrud, StudentStorage};
use crate::utils::{FlowResult, OutputStyle, handle_flow, print_success, print_warning};

pub fn handle_seed_command(config: Config) -> Result<()> {
    let ops = StudentOperations::new(&config);

    match ops.seed_samples()? {
        0 => print_warning("Store already has students; samples not loaded"),
        added => print_success(&format!("Loaded {} sample students", added)),
    }
    Ok(())
}

pub fn handle_import_command(config: Config, args: &ImportArgs) -> Result<()> {
    let ops = StudentOperations::new(&config);
    let records = read_records(&args.file)
        .with_context(|| format!("Failed to import {}", args.file.display()))?;

    if !args.merge {
        let count = ops.replace_students(records)?;
        print_success(&format!(
            "Replaced store with {} students from {}",
            count,
            args.file.display()
        ));
        return Ok(());
    }

    let report = ops.merge_students(records)?;
    print_success(&format!(
        "Imported {} students from {}",
        report.added,
        args.file.display()
    ));
    if !report.skipped.is_empty() {
        print_warning(&format!(
            "Skipped {} with an admission id already in use:",
            report.skipped.len()
        ));
        for admission_id in &report.skipped {
            println!("   {}", OutputStyle::identifier(admission_id));
        }
    }
    Ok(())
}

pub fn handle_export_command(config: Config, args: &ExportArgs) -> Result<()> {
    let ops = StudentOperations::new(&config);
    let students = ops.load_students()?.into_students();

    let Some(path) = &args.file else {
        let json = serde_json::to_string_pretty(&students).context("Failed to serialize students")?;
        println!("{}", json);
        return Ok(());
    };

    if students.is_empty() {
        handle_flow(FlowResult::EmptyList {
            item_type: "students to export".to_string(),
        });
        return Ok(());
    }

    write_records(path, &students)?;
    print_success(&format!("Exported {} students to {}", students.len(), path.display()));
    Ok(())
}
