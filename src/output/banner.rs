//! Pane banners for the headless transcript.
//!
//! Each engine's section of `thinkmode ask` is framed by a banner in the
//! engine's color, mirroring the red/blue split of the interactive demo.

use terminal_size::{terminal_size, Width};

use super::colors::*;
use crate::trace::PaneMode;

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const MIN_BANNER_WIDTH: usize = 20;
const MAX_BANNER_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BannerColor {
    Red,
    Blue,
    Cyan,
}

impl BannerColor {
    pub fn ansi_code(&self) -> &'static str {
        match self {
            BannerColor::Red => RED,
            BannerColor::Blue => BLUE,
            BannerColor::Cyan => CYAN,
        }
    }

    pub fn for_mode(mode: PaneMode) -> Self {
        match mode {
            PaneMode::Fast => BannerColor::Red,
            PaneMode::Reasoning => BannerColor::Blue,
        }
    }
}

fn banner_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH as usize)
        .clamp(MIN_BANNER_WIDTH, MAX_BANNER_WIDTH)
}

/// `━━━ TITLE ━━━` centred in `width` columns.
fn banner_line(title: &str, width: usize) -> String {
    let title = format!(" {} ", title);
    let remaining = width.saturating_sub(title.chars().count());
    let left = remaining / 2;
    let right = remaining - left;
    format!("{}{}{}", "━".repeat(left), title, "━".repeat(right))
}

/// Print the banner that opens a pane section, e.g.
/// `━━━━ Impulse Engine ━━━━` followed by the tagline.
pub fn print_pane_banner(mode: PaneMode) {
    let color = BannerColor::for_mode(mode).ansi_code();
    println!(
        "{}{BOLD}{}{RESET}",
        color,
        banner_line(mode.title(), banner_width())
    );
    println!("{DIM}{}{RESET}", mode.tagline());
}

pub fn print_pane_footer(mode: PaneMode) {
    let color = BannerColor::for_mode(mode).ansi_code();
    println!("{}{BOLD}{}{RESET}", color, "━".repeat(banner_width()));
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_color_per_mode() {
        assert_eq!(BannerColor::for_mode(PaneMode::Fast), BannerColor::Red);
        assert_eq!(BannerColor::for_mode(PaneMode::Reasoning), BannerColor::Blue);
        assert_eq!(BannerColor::Red.ansi_code(), RED);
        assert_eq!(BannerColor::Blue.ansi_code(), BLUE);
    }

    #[test]
    fn test_banner_line_is_centred() {
        let line = banner_line("AB", 10);
        assert_eq!(line, "━━━ AB ━━━");
        assert_eq!(line.chars().count(), 10);
    }

    #[test]
    fn test_banner_line_longer_than_width() {
        let line = banner_line("A VERY LONG TITLE", 5);
        assert_eq!(line, " A VERY LONG TITLE ");
    }

    #[test]
    fn test_banner_width_is_clamped() {
        let width = banner_width();
        assert!((MIN_BANNER_WIDTH..=MAX_BANNER_WIDTH).contains(&width));
    }

    #[test]
    fn test_print_banners_smoke() {
        for mode in PaneMode::ALL {
            print_pane_banner(mode);
            print_pane_footer(mode);
        }
    }
}
