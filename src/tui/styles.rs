//! Color palette and preset styles for the terminal UI.
//!
//! Teal accents on slate text. The two verdicts take their colors from
//! [`Verdict::color`].

use ratatui::style::{Color, Modifier, Style};

use crate::domain::Verdict;

/// Heartscope theme.
pub struct HeartTheme;

impl HeartTheme {
    const TEAL: Color = Color::Rgb(13, 148, 136); // #0D9488
    const TEAL_BRIGHT: Color = Color::Rgb(45, 212, 191); // #2DD4BF
    const SLATE: Color = Color::Rgb(148, 163, 184); // #94A3B8
    const SLATE_DIM: Color = Color::Rgb(100, 116, 139); // #64748B
    const SNOW: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    const NIGHT: Color = Color::Rgb(15, 23, 42); // #0F172A
    const AMBER: Color = Color::Rgb(251, 191, 36); // #FBBF24
    const BLUE: Color = Color::Rgb(59, 130, 246); // #3B82F6

    #[must_use]
    pub fn title() -> Style {
        Self::text().add_modifier(Modifier::BOLD)
    }

    /// Section titles, the focused field, key hints and the input cursor
    #[must_use]
    pub fn accent() -> Style {
        Style::default()
            .fg(Self::TEAL_BRIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::SNOW)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::SLATE)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::SLATE_DIM)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::AMBER)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::BLUE)
    }

    /// Current page in the sidebar
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::NIGHT)
            .bg(Self::TEAL)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border(focused: bool) -> Style {
        Style::default().fg(if focused { Self::TEAL } else { Self::SLATE })
    }

    /// Style for a verdict line or gauge
    #[must_use]
    pub fn verdict(verdict: Verdict) -> Style {
        let (r, g, b) = verdict.color();
        Style::default().fg(Color::Rgb(r, g, b))
    }

    /// Prediction errors reuse the disease color.
    #[must_use]
    pub fn danger() -> Style {
        Self::verdict(Verdict::Disease)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdicts_have_distinct_colors() {
        assert_ne!(
            HeartTheme::verdict(Verdict::Disease).fg,
            HeartTheme::verdict(Verdict::NoDisease).fg
        );
        assert_eq!(HeartTheme::danger(), HeartTheme::verdict(Verdict::Disease));
    }

    #[test]
    fn test_focused_border_differs() {
        assert_ne!(HeartTheme::border(true), HeartTheme::border(false));
        assert_eq!(HeartTheme::border(false).fg, HeartTheme::text_secondary().fg);
    }
}
