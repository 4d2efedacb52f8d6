use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, style,
    terminal::{self, ClearType},
};
use std::io::{self, Write};

use crate::utils::output::OutputStyle;

/// Read one trimmed line from stdin; EOF reads as an empty line
pub fn prompt_input(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_string())
}

/// Prompt for a field, showing the current value; empty input keeps it
pub fn prompt_with_default(label: &str, current: &str) -> Result<String> {
    let prompt = if current.is_empty() {
        format!("{}: ", OutputStyle::label(label))
    } else {
        format!(
            "{} {}: ",
            OutputStyle::label(label),
            OutputStyle::muted(&format!("[{}]", current))
        )
    };

    let input = prompt_input(&prompt)?;
    if input.is_empty() {
        Ok(current.to_string())
    } else {
        Ok(input)
    }
}

pub fn prompt_yes_no(prompt: &str) -> Result<bool> {
    loop {
        let input = prompt_input(&format!("{} [y/N]: ", prompt))?;
        match input.to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" | "" => return Ok(false),
            _ => println!("Please enter 'y' or 'n'"),
        }
    }
}

/// Arrow-key picker; `None` when the user quits
pub fn select_from_list(title: &str, items: &[String]) -> Result<Option<usize>> {
    if items.is_empty() {
        return Ok(None);
    }

    terminal::enable_raw_mode()?;
    let result = run_selection(title, items);

    let mut stdout = io::stdout();
    let _ = terminal::disable_raw_mode();
    execute!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;

    result
}

fn run_selection(title: &str, items: &[String]) -> Result<Option<usize>> {
    let mut stdout = io::stdout();
    let mut selected = 0;

    loop {
        execute!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        execute!(
            stdout,
            style::Print(format!("{}\r\n", OutputStyle::title(title))),
            style::Print(format!(
                "{}\r\n\r\n",
                OutputStyle::muted("Use arrow keys to navigate, Enter to select, q to quit")
            ))
        )?;

        for (i, item) in items.iter().enumerate() {
            if i == selected {
                execute!(stdout, style::Print(format!("> {}\r\n", OutputStyle::info(item))))?;
            } else {
                execute!(stdout, style::Print(format!("  {}\r\n", item)))?;
            }
        }

        if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Up => selected = selected.saturating_sub(1),
                KeyCode::Down if selected + 1 < items.len() => selected += 1,
                KeyCode::Enter => return Ok(Some(selected)),
                KeyCode::Char('q') | KeyCode::Esc => return Ok(None),
                _ => {}
            }
        }
    }
}
