//! UI module: View components for the TUI.

pub mod about;
pub mod predictor;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::HeartTheme;

/// Pages reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Predictor,
    About,
}

impl Screen {
    pub const ALL: [Screen; 2] = [Screen::Predictor, Screen::About];

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Predictor => "Predictor",
            Self::About => "About",
        }
    }
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![
        Span::styled("DISCLAIMER: ", HeartTheme::warning()),
        Span::styled(
            "This tool is for educational and informational purposes only. \
             It is not a substitute for professional medical advice or diagnosis.",
            HeartTheme::text_muted(),
        ),
    ])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(HeartTheme::border(false));

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

pub fn render_sidebar(f: &mut Frame, area: Rect, current: Screen) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(HeartTheme::border(false));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(4), // Page selector
            Constraint::Length(4), // Credit
            Constraint::Min(0),
            Constraint::Length(4), // Key hints
        ])
        .margin(1)
        .split(inner);

    let title = Paragraph::new(Line::from(Span::styled("Heart App Menu", HeartTheme::title())));
    f.render_widget(title, chunks[0]);

    let mut pages = vec![Line::from(Span::styled(
        "Navigate to:",
        HeartTheme::text_secondary(),
    ))];
    for screen in Screen::ALL {
        let line = if screen == current {
            Line::from(Span::styled(
                format!(" ● {} ", screen.title()),
                HeartTheme::selected(),
            ))
        } else {
            Line::from(Span::styled(
                format!(" ○ {} ", screen.title()),
                HeartTheme::text(),
            ))
        };
        pages.push(line);
    }
    f.render_widget(Paragraph::new(pages), chunks[1]);

    let credit = Paragraph::new(vec![
        Line::from(Span::styled("Logistic regression", HeartTheme::info())),
        Line::from(Span::styled("UCI Heart Disease data", HeartTheme::text_muted())),
    ])
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(HeartTheme::border(false)),
    )
    .wrap(Wrap { trim: true });
    f.render_widget(credit, chunks[2]);

    let hints = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("[F1] ", HeartTheme::accent()),
            Span::styled("Predictor", HeartTheme::text_secondary()),
        ]),
        Line::from(vec![
            Span::styled("[F2] ", HeartTheme::accent()),
            Span::styled("About", HeartTheme::text_secondary()),
        ]),
        Line::from(vec![
            Span::styled("[Ctrl+Q] ", HeartTheme::accent()),
            Span::styled("Quit", HeartTheme::text_secondary()),
        ]),
    ]);
    f.render_widget(hints, chunks[4]);
}
