use crate::cli::ListFormat;
use crate::config::Config;
use crate::core::analysis::SubjectTrend;
use crate::core::data::Student;
use crate::core::grading::{ClassSummary, summarize_by_class};
use crate::core::promotion::{PromotionOutcome, PromotionStatus};
use crate::utils::error::{AppError, AppResult};
use crate::utils::format::{calculate_age, format_date, format_fixed, format_score, truncate_string};
use crate::utils::pagination::{get_terminal_size, paginate_static_content, should_paginate};
use chrono::NaiveDate;
use colored::*;

pub struct OutputStyle;

impl OutputStyle {
    pub fn name(text: &str) -> ColoredString {
        text.bright_green()
    }

    pub fn identifier(text: &str) -> ColoredString {
        text.bright_cyan()
    }

    pub fn content(text: &str) -> ColoredString {
        text.clear()
    }

    pub fn title(text: &str) -> ColoredString {
        text.bright_blue().bold()
    }

    pub fn header(text: &str) -> ColoredString {
        text.bold()
    }

    pub fn label(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn info(text: &str) -> ColoredString {
        text.blue()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }

    pub fn status(status: PromotionStatus) -> ColoredString {
        match status {
            PromotionStatus::Promoted => status.to_string().green().bold(),
            PromotionStatus::Retained => status.to_string().red().bold(),
        }
    }

    pub fn header_separator() -> String {
        "═".repeat(50)
    }

    pub fn header_block(title: &str) -> String {
        format!("{}\n{}\n", Self::title(title), Self::header_separator())
    }

    pub fn field_line(label: &str, value: &str) -> String {
        format!("{:>16}: {}\n", Self::label(label), Self::content(value))
    }
}

pub fn print_warning(message: &str) {
    println!("⚠️  {}", OutputStyle::warning(message));
}

pub fn print_success(message: &str) {
    println!("✅ {}", OutputStyle::success(message));
}

/// Box-drawn table; cells are padded before styling so widths stay aligned
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(mid), right)
    };

    let mut out = String::new();
    out.push_str(&rule("┌", "┬", "┐"));

    let header_cells: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!(" {} ", OutputStyle::header(&pad(h, *w))))
        .collect();
    out.push_str(&format!("│{}│\n", header_cells.join("│")));
    out.push_str(&rule("├", "┼", "┤"));

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!(" {} ", pad(c, *w)))
            .collect();
        out.push_str(&format!("│{}│\n", cells.join("│")));
    }

    out.push_str(&rule("└", "┴", "┘"));
    out
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Display formatter for the student, mark, promotion and analysis views
pub struct DisplayFormatter;

impl DisplayFormatter {
    /// Print content, paging it when it would not fit the terminal
    pub fn emit(content: &str, config: &Config) -> AppResult<()> {
        if config.general.pager
            && let Ok((height, _)) = get_terminal_size()
            && should_paginate(content, height)
        {
            return paginate_static_content(content);
        }

        print!("{}", content);
        Ok(())
    }

    /// Format the student list according to the specified format
    pub fn format_students(students: &[Student], format: &ListFormat, today: &NaiveDate) -> AppResult<String> {
        match format {
            ListFormat::Table => Ok(Self::student_table(students, today)),
            ListFormat::Simple => Ok(Self::student_lines(students)),
            ListFormat::Json => serde_json::to_string_pretty(students)
                .map(|json| json + "\n")
                .map_err(|e| AppError::System(format!("Failed to serialize students to JSON: {}", e))),
        }
    }

    fn student_table(students: &[Student], today: &NaiveDate) -> String {
        let rows: Vec<Vec<String>> = students
            .iter()
            .map(|s| {
                let age = s
                    .birthday
                    .map(|b| format!("{} years", calculate_age(&b, today)))
                    .unwrap_or_else(|| "N/A".to_string());
                vec![
                    s.admission_id.clone(),
                    truncate_string(&s.full_name, 30),
                    age,
                    truncate_string(&s.guardian_name, 25),
                    s.guardian_contact.clone(),
                    format_date(Some(&s.admission_date)),
                ]
            })
            .collect();

        let mut out = format!(
            "🎓 {} ({} found)\n",
            OutputStyle::header("Students"),
            OutputStyle::info(&students.len().to_string())
        );
        out.push_str(&render_table(
            &["Admission ID", "Full Name", "Age", "Guardian", "Contact", "Admitted"],
            &rows,
        ));
        out
    }

    fn student_lines(students: &[Student]) -> String {
        students
            .iter()
            .map(|s| {
                format!(
                    "{} - {}\n",
                    OutputStyle::identifier(&s.admission_id),
                    OutputStyle::name(&s.full_name)
                )
            })
            .collect()
    }

    /// Printable student profile
    pub fn format_profile(student: &Student) -> String {
        let mut out = OutputStyle::header_block("🎓 Student Profile");
        out.push_str(&OutputStyle::field_line("Admission ID", &student.admission_id));
        out.push_str(&OutputStyle::field_line("Full Name", &student.full_name));
        out.push_str(&OutputStyle::field_line("Address", &student.address));
        out.push_str(&OutputStyle::field_line("Birthday", &format_date(student.birthday.as_ref())));
        out.push_str(&OutputStyle::field_line(
            "Admission Date",
            &format_date(Some(&student.admission_date)),
        ));
        out.push_str(&OutputStyle::field_line("Guardian Name", &student.guardian_name));
        out.push_str(&OutputStyle::field_line("Guardian Contact", &student.guardian_contact));
        out.push_str(&OutputStyle::field_line("Record ID", &student.id));
        out
    }

    /// Marks grouped by class, each class followed by its totals row
    pub fn format_marks(student: &Student, class_filter: Option<&str>) -> String {
        let mut out = OutputStyle::header_block(&format!(
            "📚 Marks - {} ({})",
            student.full_name, student.admission_id
        ));

        if student.marks.is_empty() {
            out.push_str(&format!("{}\n", OutputStyle::muted("No marks recorded yet.")));
            return out;
        }

        let summaries = summarize_by_class(&student.marks, class_filter);
        if summaries.is_empty() {
            let msg = format!("No marks recorded for {}.", class_filter.unwrap_or("this class"));
            out.push_str(&format!("{}\n", OutputStyle::muted(&msg)));
            return out;
        }

        let mut rows = Vec::new();
        for summary in &summaries {
            rows.extend(Self::class_rows(summary));
        }

        out.push_str(&render_table(
            &["#", "Class", "Subject", "Term 1", "Term 2", "Term 3", "Average", "Grade"],
            &rows,
        ));
        out
    }

    fn class_rows(summary: &ClassSummary<'_>) -> Vec<Vec<String>> {
        let mut rows: Vec<Vec<String>> = summary
            .entries
            .iter()
            .map(|(index, mark)| {
                vec![
                    (index + 1).to_string(),
                    if mark.class_name.is_empty() {
                        "N/A".to_string()
                    } else {
                        mark.class_name.clone()
                    },
                    mark.subject.clone(),
                    format_score(mark.t1),
                    format_score(mark.t2),
                    format_score(mark.t3),
                    format_fixed(mark.avg),
                    mark.grade.to_string(),
                ]
            })
            .collect();

        rows.push(vec![
            String::new(),
            String::new(),
            format!("{} Totals / Average", summary.class_name),
            format_score(summary.t1_total),
            format_score(summary.t2_total),
            format_score(summary.t3_total),
            format_fixed(summary.average),
            summary.grade.to_string(),
        ]);
        rows
    }

    /// Promotion table for every evaluated student
    pub fn format_promotions(outcomes: &[PromotionOutcome]) -> String {
        let mut out = OutputStyle::header_block("🏅 Promotion Status");

        let rows: Vec<Vec<String>> = outcomes
            .iter()
            .map(|o| {
                vec![
                    o.admission_id.clone(),
                    truncate_string(&o.full_name, 30),
                    format_fixed(o.overall_average),
                    o.status.to_string(),
                ]
            })
            .collect();
        out.push_str(&render_table(
            &["Admission ID", "Full Name", "Overall Avg", "Status"],
            &rows,
        ));

        let promoted = outcomes
            .iter()
            .filter(|o| o.status == PromotionStatus::Promoted)
            .count();
        out.push_str(&format!(
            "{} {}  {} {}\n",
            OutputStyle::status(PromotionStatus::Promoted),
            promoted,
            OutputStyle::status(PromotionStatus::Retained),
            outcomes.len() - promoted
        ));
        out
    }

    /// Final progress report for one student
    pub fn format_report(student: &Student, outcome: &PromotionOutcome, config: &Config) -> String {
        let mut out = OutputStyle::header_block(&format!(
            "{} - Final Progress Report",
            config.school.name
        ));
        out.push_str(&format!(
            "{}\n\n",
            OutputStyle::muted(&format!("Academic Year {}", config.school.academic_year))
        ));
        out.push_str(&OutputStyle::field_line("Student Name", &student.full_name));
        out.push_str(&OutputStyle::field_line("Admission ID", &student.admission_id));
        out.push_str(&OutputStyle::field_line(
            "Overall Average",
            &format_fixed(outcome.overall_average),
        ));
        out.push_str(&format!(
            "{:>16}: {} ({})\n\n",
            OutputStyle::label("Promotion Status"),
            OutputStyle::status(outcome.status),
            outcome.status.report_line(),
        ));

        let rows: Vec<Vec<String>> = student
            .marks
            .iter()
            .map(|m| {
                vec![
                    if m.class_name.is_empty() {
                        "N/A".to_string()
                    } else {
                        m.class_name.clone()
                    },
                    m.subject.clone(),
                    format_score(m.t1),
                    format_score(m.t2),
                    format_score(m.t3),
                    format_fixed(m.avg),
                    m.grade.to_string(),
                ]
            })
            .collect();
        out.push_str(&render_table(
            &["Class / Grade", "Subject", "Term 1", "Term 2", "Term 3", "Final Average", "Grade"],
            &rows,
        ));
        out
    }

    /// Per-subject trend bars for grade levels 6-12
    pub fn format_trends(student: &Student, trends: &[SubjectTrend]) -> String {
        let mut out = OutputStyle::header_block(&format!(
            "📈 Historical Analysis - {} ({})",
            student.full_name, student.admission_id
        ));
        out.push_str(&format!(
            "{}\n",
            OutputStyle::muted("Earlier grade levels are projected from the current average.")
        ));

        for trend in trends {
            let anchor = match trend.recorded_average {
                Some(avg) => format!("recorded average {}", format_fixed(avg)),
                None => "no recorded mark".to_string(),
            };
            out.push_str(&format!(
                "\n{} - 7 Year Trend {}\n",
                OutputStyle::header(&trend.subject),
                OutputStyle::muted(&format!("({})", anchor))
            ));

            for point in &trend.points {
                let bar = "█".repeat((point.score / 5.0).round() as usize);
                out.push_str(&format!(
                    "  G{:<3} {:>5.1} {}\n",
                    point.level,
                    point.score,
                    OutputStyle::info(&bar)
                ));
            }
        }
        out
    }
}
