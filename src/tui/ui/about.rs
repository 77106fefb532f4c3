//! About page: project description, feature glossary and holdout metrics.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::domain::{ClassMetrics, HoldoutReport, FEATURE_SPECS};
use crate::tui::styles::HeartTheme;

/// Scroll position of the description panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct AboutState {
    pub scroll: u16,
}

impl AboutState {
    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1).min(description().len() as u16);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

/// Training facts shown next to the holdout metrics.
#[derive(Debug, Clone, Copy)]
pub struct ModelSummary<'a> {
    pub report: &'a HoldoutReport,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Render the about page
pub fn render_about(f: &mut Frame, area: Rect, state: &AboutState, summary: ModelSummary<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(2), // Footer
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", HeartTheme::text()),
        Span::styled("About This App", HeartTheme::title()),
        Span::styled(" │ Heart Disease Prediction", HeartTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(HeartTheme::border(false)),
    );
    f.render_widget(header, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let text = Paragraph::new(description())
        .block(
            Block::default()
                .title(Span::styled(" Overview ", HeartTheme::accent()))
                .borders(Borders::ALL)
                .border_style(HeartTheme::border(false)),
        )
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    f.render_widget(text, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FEATURE_SPECS.len() as u16 + 3),
            Constraint::Min(0),
        ])
        .split(columns[1]);

    render_feature_table(f, right[0]);
    render_metrics(f, right[1], summary);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[↑↓] ", HeartTheme::accent()),
        Span::styled("Scroll ", HeartTheme::text_secondary()),
        Span::styled("[Esc] ", HeartTheme::accent()),
        Span::styled("Back to Predictor", HeartTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(HeartTheme::border(false)),
    );
    f.render_widget(footer, chunks[2]);
}

fn description() -> Vec<Line<'static>> {
    let heading = |text: &'static str| Line::from(Span::styled(text, HeartTheme::accent()));
    let body = |text: &'static str| Line::from(Span::styled(text, HeartTheme::text()));
    let muted = |text: &'static str| Line::from(Span::styled(text, HeartTheme::text_secondary()));

    vec![
        body("This application predicts the likelihood of heart disease from user-provided medical data, using a logistic regression model trained on the UCI Heart Disease dataset."),
        Line::from(""),
        heading("Project Overview"),
        body("Cardiovascular disease remains one of the leading causes of mortality worldwide. Early prediction can help people make informed lifestyle and medical decisions."),
        muted(" • Collects 13 essential medical inputs (age, cholesterol, blood pressure, ...)"),
        muted(" • Feeds them into a trained logistic regression model"),
        muted(" • Returns the probability of heart disease presence or absence"),
        Line::from(""),
        heading("How It Works"),
        muted(" 1. User input: key health indicators such as age, cholesterol and fasting blood sugar."),
        muted(" 2. Feature processing: inputs are aligned to the model's training feature order."),
        muted(" 3. Prediction: the model outputs 1 (presence) or 0 (absence) with a probability."),
        muted(" 4. Results: a gauge shows the probability next to a plain-language verdict."),
        Line::from(""),
        heading("Machine Learning Model"),
        muted(" Algorithm: L2-regularised logistic regression (C = 1.0)"),
        muted(" Solver: Newton's method with backtracking line search"),
        muted(" Dataset: UCI Heart Disease"),
        muted(" Training-test split: 60% - 40%, seeded shuffle"),
        body("The model is retrained from the dataset every time the application starts. It is interpretable, cheap to compute and a strong baseline for medical classification."),
        Line::from(""),
        heading("Future Improvements"),
        muted(" • Additional models (random forest, gradient boosting)"),
        muted(" • Feature-importance visualisation"),
        Line::from(""),
        heading("Disclaimer"),
        body("This app is intended for educational and research purposes only. It is not a medical diagnostic tool and should not replace professional medical advice."),
    ]
}

fn render_feature_table(f: &mut Frame, area: Rect) {
    let rows = FEATURE_SPECS.iter().map(|spec| {
        Row::new(vec![
            Cell::from(Span::styled(spec.name, HeartTheme::accent())),
            Cell::from(Span::styled(spec.description, HeartTheme::text())),
        ])
    });

    let table = Table::new(rows, [Constraint::Length(10), Constraint::Min(20)])
        .header(
            Row::new(vec!["Feature", "Description"]).style(HeartTheme::text_secondary()),
        )
        .block(
            Block::default()
                .title(Span::styled(" Dataset Features ", HeartTheme::accent()))
                .borders(Borders::ALL)
                .border_style(HeartTheme::border(false)),
        );

    f.render_widget(table, area);
}

fn metrics_row(label: &'static str, metrics: &ClassMetrics) -> Row<'static> {
    Row::new(vec![
        Cell::from(label),
        Cell::from(format!("{:.2}", metrics.precision)),
        Cell::from(format!("{:.2}", metrics.recall)),
        Cell::from(format!("{:.2}", metrics.f1)),
        Cell::from(metrics.support.to_string()),
    ])
    .style(HeartTheme::text())
}

fn render_metrics(f: &mut Frame, area: Rect, summary: ModelSummary<'_>) {
    let block = Block::default()
        .title(Span::styled(" Holdout Evaluation ", HeartTheme::accent()))
        .borders(Borders::ALL)
        .border_style(HeartTheme::border(false));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let facts = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Accuracy: ", HeartTheme::text_secondary()),
            Span::styled(
                format!("{:.2}%", summary.report.accuracy * 100.0),
                HeartTheme::accent(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Rows: ", HeartTheme::text_secondary()),
            Span::styled(
                format!("{} training / {} test", summary.train_rows, summary.test_rows),
                HeartTheme::text(),
            ),
        ]),
    ]);
    f.render_widget(facts, chunks[0]);

    let table = Table::new(
        [
            metrics_row("No disease", &summary.report.negative),
            metrics_row("Disease", &summary.report.positive),
        ],
        [
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new(vec!["Class", "Precision", "Recall", "F1", "Support"])
            .style(HeartTheme::text_secondary()),
    );
    f.render_widget(table, chunks[1]);
}
