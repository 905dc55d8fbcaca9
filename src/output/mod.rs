//! Terminal output formatting for the headless commands.
//!
//! - [`banner`] - Pane banners and footers
//! - [`messages`] - Error, warning, and info messages
//! - [`run`] - Scenario list and run transcripts

pub mod banner;
pub mod messages;
pub mod run;

/// ANSI color codes for terminal output.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RED: &str = "\x1b[31m";
    pub const GRAY: &str = "\x1b[90m";
}

pub use colors::*;

pub use banner::{print_pane_banner, print_pane_footer, BannerColor};
pub use messages::{print_error, print_info, print_success, print_warning};
pub use run::{
    print_outcome_status, print_run_header, print_scenarios, print_trace, typewrite,
};
