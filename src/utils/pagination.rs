use crate::utils::error::{AppError, AppResult};
use crossterm::terminal::size;
use std::io::IsTerminal;

/// Terminal size as (rows, columns)
pub fn get_terminal_size() -> AppResult<(u16, u16)> {
    if !std::io::stdout().is_terminal() {
        return Err(AppError::System("stdout is not a terminal".to_string()));
    }

    size()
        .map(|(columns, rows)| (rows, columns))
        .map_err(|e| AppError::System(format!("Failed to get terminal size: {}", e)))
}

/// Page once the content takes more than two thirds of the screen
pub fn should_paginate(content: &str, terminal_height: u16) -> bool {
    let lines = content.lines().count();
    lines > usize::from(terminal_height) * 2 / 3
}

/// Show static content in the minus pager
pub fn paginate_static_content(content: &str) -> AppResult<()> {
    let pager = minus::Pager::new();
    pager
        .push_str(content)
        .map_err(|e| AppError::System(format!("Failed to push content to pager: {}", e)))?;

    match minus::page_all(pager) {
        Ok(()) => Ok(()),
        // quitting the pager early is not an error
        Err(e) if e.to_string().to_lowercase().contains("abort") => Ok(()),
        Err(e) => Err(AppError::System(format!("Failed to run pager: {}", e))),
    }
}
