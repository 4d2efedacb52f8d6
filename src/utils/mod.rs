pub mod error;
pub mod format;
pub mod interactive;
pub mod output;
pub mod pagination;
pub mod search;

pub use error::{AppError, AppResult, FlowResult, handle_flow, report_error};
pub use interactive::*;
pub use output::{DisplayFormatter, OutputStyle, print_success, print_warning};
pub use search::{Resolution, SearchEngine};
