//! Predictor page: the thirteen-field input form and the prediction result.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{FeatureKind, FeatureSpec, PatientFeatures, Prediction, FEATURE_COUNT, FEATURE_SPECS};
use crate::tui::styles::HeartTheme;

/// Longest typed entry accepted by a numeric control.
const MAX_INPUT_LEN: usize = 6;

/// Width of the label column in the form.
const LABEL_WIDTH: usize = 34;

/// What the result panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PredictorView {
    /// Form edited since the last prediction (or never predicted)
    #[default]
    AwaitingInput,
    ShowingResult(Prediction),
}

/// One input control and its current value.
#[derive(Debug, Clone)]
pub struct FormControl {
    pub spec: FeatureSpec,
    pub value: f64,
    /// Text typed into a numeric control, not yet committed
    pub editing: Option<String>,
}

impl FormControl {
    fn new(spec: FeatureSpec) -> Self {
        Self {
            spec,
            value: spec.default,
            editing: None,
        }
    }

    /// Parse and clamp the typed buffer into `value`.
    ///
    /// An empty or unparseable buffer keeps the previous value.
    fn commit(&mut self) {
        if let Some(buffer) = self.editing.take() {
            if let Ok(parsed) = buffer.parse::<f64>() {
                if parsed.is_finite() {
                    self.value = self.spec.kind.clamp(parsed);
                }
            }
        }
    }

    /// Text shown for the committed value.
    #[must_use]
    pub fn display(&self) -> String {
        match self.spec.kind {
            FeatureKind::Numeric { decimals, .. } => format!("{:.*}", decimals, self.value),
            FeatureKind::Categorical(options) => options
                .iter()
                .find(|(code, _)| *code as f64 == self.value)
                .map_or_else(|| self.value.to_string(), |(_, label)| (*label).to_string()),
        }
    }

    fn step(&mut self, forward: bool) -> bool {
        self.commit();
        let before = self.value;
        self.value = match self.spec.kind {
            FeatureKind::Numeric { step, .. } => {
                let delta = if forward { step } else { -step };
                self.spec.kind.clamp(self.value + delta)
            }
            FeatureKind::Categorical(options) => {
                let len = options.len();
                let idx = options
                    .iter()
                    .position(|(code, _)| *code as f64 == self.value)
                    .unwrap_or(0);
                let next = if forward {
                    (idx + 1) % len
                } else {
                    (idx + len - 1) % len
                };
                options[next].0 as f64
            }
        };
        self.value != before
    }
}

/// Predictor form state
#[derive(Debug, Clone)]
pub struct PredictorFormState {
    pub controls: Vec<FormControl>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for PredictorFormState {
    fn default() -> Self {
        Self {
            controls: FEATURE_SPECS.iter().copied().map(FormControl::new).collect(),
            selected_field: 0,
            error_message: None,
        }
    }
}

impl PredictorFormState {
    fn current(&mut self) -> &mut FormControl {
        &mut self.controls[self.selected_field]
    }

    /// Move to the next field, committing any typed value
    pub fn next_field(&mut self) {
        self.current().commit();
        self.selected_field = (self.selected_field + 1) % self.controls.len();
    }

    /// Move to the previous field, committing any typed value
    pub fn prev_field(&mut self) {
        self.current().commit();
        if self.selected_field == 0 {
            self.selected_field = self.controls.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Step the current control up (numeric) or to the next option (select).
    ///
    /// Returns whether the value changed.
    pub fn increment(&mut self) -> bool {
        self.current().step(true)
    }

    /// Step the current control down (numeric) or to the previous option (select).
    ///
    /// Returns whether the value changed.
    pub fn decrement(&mut self) -> bool {
        self.current().step(false)
    }

    /// Type a character into the current control.
    ///
    /// Numeric controls accept digits (and one '.' when the control has
    /// decimals); select controls jump to the option whose code is the typed
    /// digit. Returns whether the form changed.
    pub fn input_char(&mut self, c: char) -> bool {
        let control = self.current();
        let accepted = match control.spec.kind {
            FeatureKind::Numeric { decimals, .. } => {
                let buffer = control.editing.get_or_insert_with(String::new);
                let allowed = c.is_ascii_digit() || (c == '.' && decimals > 0 && !buffer.contains('.'));
                if allowed && buffer.len() < MAX_INPUT_LEN {
                    buffer.push(c);
                    true
                } else {
                    if buffer.is_empty() {
                        control.editing = None;
                    }
                    false
                }
            }
            FeatureKind::Categorical(options) => match c.to_digit(10) {
                Some(digit) if options.iter().any(|(code, _)| *code == i64::from(digit)) => {
                    let before = control.value;
                    control.value = f64::from(digit);
                    control.value != before
                }
                _ => false,
            },
        };
        if accepted {
            self.error_message = None;
        }
        accepted
    }

    /// Delete the last typed character.
    ///
    /// On a numeric control that is not being edited, starts editing from the
    /// committed value. Returns whether the form changed.
    pub fn delete_char(&mut self) -> bool {
        let control = self.current();
        if !matches!(control.spec.kind, FeatureKind::Numeric { .. }) {
            return false;
        }
        let display = control.display();
        let buffer = control.editing.get_or_insert(display);
        buffer.pop().is_some()
    }

    /// Restore the current control to its default.
    pub fn reset_field(&mut self) -> bool {
        let control = self.current();
        let changed = control.editing.is_some() || control.value != control.spec.default;
        control.editing = None;
        control.value = control.spec.default;
        changed
    }

    /// Commit every pending typed value.
    pub fn commit_all(&mut self) {
        for control in &mut self.controls {
            control.commit();
        }
    }

    /// Build the query record from committed values.
    #[must_use]
    pub fn to_patient_features(&self) -> PatientFeatures {
        PatientFeatures::from_array(std::array::from_fn::<f64, FEATURE_COUNT, _>(|i| {
            self.controls[i].value
        }))
    }
}

/// Render the predictor page
pub fn render_predictor(
    f: &mut Frame,
    area: Rect,
    state: &PredictorFormState,
    view: &PredictorView,
    accuracy_caption: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(6), // Intro
            Constraint::Min(9),    // Form
            Constraint::Length(6), // Result
            Constraint::Length(2), // Footer/error
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_intro(f, chunks[1]);
    render_form_fields(f, chunks[2], state);
    render_result(f, chunks[3], view, accuracy_caption);
    render_footer(f, chunks[4], state);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", HeartTheme::text()),
        Span::styled("Heart Disease Prediction App", HeartTheme::title()),
        Span::styled(" │ Heart Disease Risk Predictor", HeartTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(HeartTheme::border(false)),
    );

    f.render_widget(header, area);
}

fn render_intro(f: &mut Frame, area: Rect) {
    let intro = Paragraph::new(vec![
        Line::from(Span::styled(
            "Predict the likelihood of heart disease from your health data with a trained machine learning model.",
            HeartTheme::text(),
        )),
        Line::from(Span::styled("How to use:", HeartTheme::accent())),
        Line::from(Span::styled(
            " 1. Fill in your details such as age, sex, blood pressure, cholesterol and heart rate.",
            HeartTheme::text_secondary(),
        )),
        Line::from(Span::styled(
            " 2. Press Enter to predict.  3. Your predicted risk appears below the form.",
            HeartTheme::text_secondary(),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::LEFT)
            .border_style(HeartTheme::info()),
    )
    .wrap(Wrap { trim: false });

    f.render_widget(intro, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PredictorFormState) {
    let block = Block::default()
        .title(Span::styled(" Enter your details below ", HeartTheme::accent()))
        .borders(Borders::ALL)
        .border_style(HeartTheme::border(false));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let mid = state.controls.len() / 2;

    render_field_column(f, columns[0], &state.controls[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.controls[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    controls: &[FormControl],
    offset: usize,
    selected: usize,
) {
    let lines: Vec<Line> = controls
        .iter()
        .enumerate()
        .map(|(i, control)| field_line(control, offset + i == selected))
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

fn field_line(control: &FormControl, is_selected: bool) -> Line<'static> {
    let label_style = if is_selected {
        HeartTheme::accent()
    } else {
        HeartTheme::text_secondary()
    };
    let marker = if is_selected { "›" } else { " " };
    let label = Span::styled(
        format!("{marker}{:<width$}", control.spec.label, width = LABEL_WIDTH),
        label_style,
    );

    let mut spans = vec![label];
    match (&control.editing, control.spec.kind) {
        (Some(buffer), _) => {
            spans.push(Span::styled(buffer.clone(), HeartTheme::text()));
            spans.push(Span::styled("▌", HeartTheme::accent()));
        }
        (None, FeatureKind::Categorical(_)) if is_selected => {
            spans.push(Span::styled("◀ ", HeartTheme::accent()));
            spans.push(Span::styled(control.display(), HeartTheme::text()));
            spans.push(Span::styled(" ▶", HeartTheme::accent()));
        }
        (None, _) => {
            spans.push(Span::styled(control.display(), HeartTheme::text()));
            if is_selected {
                spans.push(Span::styled("▌", HeartTheme::accent()));
            }
        }
    }
    Line::from(spans)
}

fn render_result(f: &mut Frame, area: Rect, view: &PredictorView, accuracy_caption: &str) {
    let PredictorView::ShowingResult(prediction) = view else {
        let idle = Paragraph::new(Line::from(Span::styled(
            "Press [Enter] to predict",
            HeartTheme::text_muted(),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(Span::styled(" Prediction ", HeartTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(HeartTheme::border(false)),
        );
        f.render_widget(idle, area);
        return;
    };

    let block = Block::default()
        .title(Span::styled(" Prediction Confidence ", HeartTheme::accent()))
        .borders(Borders::ALL)
        .border_style(HeartTheme::border(true));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Gauge
            Constraint::Length(2), // Verdict
            Constraint::Length(1), // Caption
        ])
        .split(inner);

    let verdict_style = HeartTheme::verdict(prediction.verdict());

    let gauge = Gauge::default()
        .gauge_style(verdict_style)
        .percent(prediction.gauge_percent())
        .label(format!("{}%", prediction.gauge_percent()));
    f.render_widget(gauge, chunks[0]);

    let verdict = Paragraph::new(Line::from(Span::styled(
        prediction.message(),
        verdict_style.add_modifier(Modifier::BOLD),
    )))
    .wrap(Wrap { trim: true });
    f.render_widget(verdict, chunks[1]);

    let caption = Paragraph::new(Line::from(Span::styled(
        accuracy_caption.to_string(),
        HeartTheme::text_muted(),
    )));
    f.render_widget(caption, chunks[2]);
}

fn render_footer(f: &mut Frame, area: Rect, state: &PredictorFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", HeartTheme::danger()),
            Span::styled(err.clone(), HeartTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", HeartTheme::accent()),
            Span::styled("Navigate ", HeartTheme::text_secondary()),
            Span::styled("[←→] ", HeartTheme::accent()),
            Span::styled("Adjust ", HeartTheme::text_secondary()),
            Span::styled("[Enter] ", HeartTheme::accent()),
            Span::styled("Predict ", HeartTheme::text_secondary()),
            Span::styled("[Del] ", HeartTheme::accent()),
            Span::styled("Reset Field ", HeartTheme::text_secondary()),
            Span::styled("[Esc] ", HeartTheme::accent()),
            Span::styled("Clear Result", HeartTheme::text_secondary()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(HeartTheme::border(false)),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(state: &mut PredictorFormState, name: &str) {
        state.selected_field = state
            .controls
            .iter()
            .position(|c| c.spec.name == name)
            .expect("known field");
    }

    #[test]
    fn test_defaults_match_feature_specs() {
        let state = PredictorFormState::default();
        assert_eq!(state.controls.len(), FEATURE_COUNT);
        assert_eq!(state.to_patient_features(), PatientFeatures::defaults());
    }

    #[test]
    fn test_typed_value_is_clamped_on_commit() {
        let mut state = PredictorFormState::default();
        select(&mut state, "age");
        state.reset_field();
        state.controls[0].editing = Some(String::new());
        for c in "250".chars() {
            assert!(state.input_char(c));
        }
        state.next_field();
        assert!((state.controls[0].value - 120.0).abs() < f64::EPSILON);
        assert!(state.controls[0].editing.is_none());
    }

    #[test]
    fn test_integer_field_rejects_decimal_point() {
        let mut state = PredictorFormState::default();
        select(&mut state, "chol");
        assert!(!state.input_char('.'));
        assert!(!state.input_char('x'));
        assert!(state.controls[4].editing.is_none());
    }

    #[test]
    fn test_oldpeak_steps_by_tenths() {
        let mut state = PredictorFormState::default();
        select(&mut state, "oldpeak");
        for _ in 0..3 {
            assert!(state.increment());
        }
        assert!((state.controls[9].value - 1.3).abs() < 1e-12);
        assert_eq!(state.controls[9].display(), "1.3");

        state.controls[9].value = 0.0;
        assert!(!state.decrement());
        assert!((state.controls[9].value).abs() < f64::EPSILON);
    }

    #[test]
    fn test_select_cycles_and_accepts_code_digits() {
        let mut state = PredictorFormState::default();
        select(&mut state, "sex");
        assert_eq!(state.controls[1].display(), "Female");
        assert!(state.increment());
        assert_eq!(state.controls[1].display(), "Male");
        assert!(state.increment());
        assert_eq!(state.controls[1].display(), "Female");

        select(&mut state, "thal");
        assert!(state.input_char('2'));
        assert!(!state.input_char('7'));
        assert!((state.controls[12].value - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_backspace_edits_committed_value() {
        let mut state = PredictorFormState::default();
        select(&mut state, "trestbps");
        assert!(state.delete_char());
        assert_eq!(state.controls[3].editing.as_deref(), Some("12"));
        assert!(state.input_char('5'));
        state.commit_all();
        assert!((state.controls[3].value - 125.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_buffer_keeps_previous_value() {
        let mut state = PredictorFormState::default();
        select(&mut state, "thalach");
        state.controls[7].editing = Some(String::new());
        state.commit_all();
        assert!((state.controls[7].value - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset_field_restores_default() {
        let mut state = PredictorFormState::default();
        select(&mut state, "age");
        state.increment();
        assert!(state.reset_field());
        assert!(!state.reset_field());
        assert!((state.controls[0].value - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut state = PredictorFormState::default();
        state.prev_field();
        assert_eq!(state.selected_field, FEATURE_COUNT - 1);
        state.next_field();
        assert_eq!(state.selected_field, 0);
    }
}
