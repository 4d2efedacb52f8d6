use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::manager;
use crate::utils::format::parse_date;

#[derive(Parser)]
#[command(name = "eduadmin")]
#[command(about = "Student records administration: registration, marks, grading and promotion")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Commands {
    pub fn execute(self, config: Config, config_path: &Path) -> Result<()> {
        match self {
            Commands::Add(args) => manager::handle_add_command(config, &args),
            Commands::Edit(args) => manager::handle_edit_command(config, &args),
            Commands::List(args) => manager::handle_list_command(config, &args),
            Commands::Show(args) => manager::handle_show_command(config, &args),
            Commands::Marks(args) => manager::handle_marks_command(config, args.command),
            Commands::Promotion(args) => manager::handle_promotion_command(config, &args),
            Commands::Report(args) => manager::handle_report_command(config, &args),
            Commands::Analysis(args) => manager::handle_analysis_command(config, &args),
            Commands::Seed => manager::handle_seed_command(config),
            Commands::Import(args) => manager::handle_import_command(config, &args),
            Commands::Export(args) => manager::handle_export_command(config, &args),
            Commands::Config(args) => {
                manager::handle_config_command(config, args.command, config_path)
            }
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new student
    Add(AddArgs),

    /// Edit a student's details
    Edit(EditArgs),

    /// List or search students
    List(ListArgs),

    /// Show a student's profile
    Show(ShowArgs),

    /// Record, edit, delete or list marks
    Marks(MarksArgs),

    /// Promotion status for every student with marks
    Promotion(PromotionArgs),

    /// Final progress report for one student
    Report(ReportArgs),

    /// Grade 6-12 trend projection for one student
    Analysis(AnalysisArgs),

    /// Load the sample students into an empty store
    Seed,

    /// Import students from a JSON snapshot
    Import(ImportArgs),

    /// Export students as a JSON snapshot
    Export(ExportArgs),

    /// Configuration management
    Config(ConfigArgs),
}

/// Student detail flags shared by `add` and `edit`
#[derive(Args, Debug, Clone, Default)]
pub struct StudentFieldArgs {
    #[arg(short = 'a', long)]
    pub admission_id: Option<String>,

    #[arg(short = 'n', long)]
    pub name: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long, value_parser = parse_date, help = "Birthday (YYYY-MM-DD)")]
    pub birthday: Option<NaiveDate>,

    #[arg(long, value_parser = parse_date, help = "Admission date (YYYY-MM-DD), defaults to today")]
    pub admission_date: Option<NaiveDate>,

    #[arg(long)]
    pub guardian_name: Option<String>,

    #[arg(long)]
    pub guardian_contact: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub fields: StudentFieldArgs,
}

#[derive(Args)]
pub struct EditArgs {
    #[arg(help = "Record id, admission id or name query")]
    pub student: String,

    #[command(flatten)]
    pub fields: StudentFieldArgs,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(short, long, help = "Filter by admission id or name")]
    pub query: Option<String>,

    #[arg(short, long)]
    pub format: Option<ListFormat>,
}

#[derive(Args)]
pub struct ShowArgs {
    #[arg(help = "Record id, admission id or name query")]
    pub student: String,
}

#[derive(Args)]
pub struct MarksArgs {
    #[command(subcommand)]
    pub command: MarksCommands,
}

#[derive(Subcommand)]
pub enum MarksCommands {
    /// Record a mark; an existing mark for the same subject and class is overwritten
    Add(MarkAddArgs),

    /// Replace the mark at a position
    Edit(MarkEditArgs),

    /// Delete the mark at a position
    Delete(MarkDeleteArgs),

    /// List marks grouped by class
    List(MarkListArgs),
}

/// Term score flags; unparseable or missing scores count as 0
#[derive(Args, Debug, Clone, Default)]
pub struct TermArgs {
    #[arg(long = "t1", allow_hyphen_values = true)]
    pub term1: Option<String>,

    #[arg(long = "t2", allow_hyphen_values = true)]
    pub term2: Option<String>,

    #[arg(long = "t3", allow_hyphen_values = true)]
    pub term3: Option<String>,
}

#[derive(Args)]
pub struct MarkAddArgs {
    #[arg(help = "Record id, admission id or name query")]
    pub student: String,

    #[arg(short, long, default_value = "")]
    pub class: String,

    #[arg(short, long)]
    pub subject: Option<String>,

    #[command(flatten)]
    pub terms: TermArgs,
}

#[derive(Args)]
pub struct MarkEditArgs {
    #[arg(help = "Record id, admission id or name query")]
    pub student: String,

    #[arg(help = "Mark position as shown by `marks list` (starting at 1)")]
    pub position: usize,

    #[arg(short, long)]
    pub class: Option<String>,

    #[arg(short, long)]
    pub subject: Option<String>,

    #[command(flatten)]
    pub terms: TermArgs,
}

#[derive(Args)]
pub struct MarkDeleteArgs {
    #[arg(help = "Record id, admission id or name query")]
    pub student: String,

    #[arg(help = "Mark position as shown by `marks list` (starting at 1)")]
    pub position: usize,

    #[arg(short, long, help = "Delete without confirmation")]
    pub force: bool,
}

#[derive(Args)]
pub struct MarkListArgs {
    #[arg(help = "Record id, admission id or name query")]
    pub student: String,

    #[arg(short, long, help = "Only show one class")]
    pub class: Option<String>,
}

#[derive(Args)]
pub struct PromotionArgs {
    #[arg(long, help = "Print outcomes as JSON")]
    pub json: bool,
}

#[derive(Args)]
pub struct ReportArgs {
    #[arg(help = "Record id, admission id or name query")]
    pub student: String,
}

#[derive(Args)]
pub struct AnalysisArgs {
    #[arg(help = "Record id, admission id or name query")]
    pub student: String,

    #[arg(long, help = "Seed for reproducible projections")]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct ImportArgs {
    #[arg(help = "Snapshot file to import from")]
    pub file: PathBuf,

    #[arg(long, help = "Add to the current store instead of replacing it")]
    pub merge: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(help = "File to export to; prints to stdout when omitted")]
    pub file: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Debug, PartialEq)]
pub enum ListFormat {
    Simple,
    Table,
    Json,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset {
        #[arg(short, long, help = "Reset without confirmation")]
        force: bool,
    },
}
