// Configuration operations

use anyhow::Result;
use std::path::Path;

use crate::cli::ConfigCommands;
use crate::config::{Config, STUDENT_FILE_ENV};
use crate::utils::{self, FlowResult, OutputStyle, handle_flow, print_success};

pub fn handle_config_command(
    config: Config,
    command: Option<ConfigCommands>,
    config_path: &Path,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) => handle_show_command(&config, config_path),
        Some(ConfigCommands::Reset { force }) => handle_reset_command(config_path, force),
        None => handle_config_help(config_path),
    }
}

fn handle_show_command(config: &Config, config_path: &Path) -> Result<()> {
    print!("{}", OutputStyle::header_block("⚙️  EduAdmin Configuration"));
    println!("{}", OutputStyle::muted(&config_path.display().to_string()));

    println!("{}", OutputStyle::header("General:"));
    println!("  Student file: {}", config.general.student_file.display());
    if std::env::var_os(STUDENT_FILE_ENV).is_some() {
        println!("  {}", OutputStyle::muted(&format!("(overridden by {})", STUDENT_FILE_ENV)));
    }
    println!("  Color: {}", config.general.color);
    println!("  Pager: {}", config.general.pager);

    println!("{}", OutputStyle::header("Grading:"));
    println!("  Promotion threshold: {}", config.grading.promotion_threshold);

    println!("{}", OutputStyle::header("School:"));
    println!("  Name: {}", config.school.name);
    println!("  Academic year: {}", config.school.academic_year);

    Ok(())
}

fn handle_config_help(config_path: &Path) -> Result<()> {
    print!("{}", OutputStyle::header_block("⚙️  Configuration Management"));
    println!("Available configuration commands:");
    println!("  eduadmin config show     - Show current configuration");
    println!("  eduadmin config reset    - Reset configuration to defaults");
    println!();
    println!("Configuration file location: {}", config_path.display());
    Ok(())
}

fn handle_reset_command(config_path: &Path, force: bool) -> Result<()> {
    if !force
        && !utils::prompt_yes_no(
            "Reset configuration to defaults? This overwrites your current settings.",
        )?
    {
        handle_flow(FlowResult::Cancelled("Reset cancelled".to_string()));
        return Ok(());
    }

    Config::default().save_to(config_path)?;
    tracing::info!(path = %config_path.display(), "configuration reset");
    print_success("Configuration reset to defaults");
    Ok(())
}
