//! Main TUI application state machine.
//!
//! Handles:
//! - Page navigation (Predictor / About)
//! - Input event handling
//! - Synchronous prediction through the `PredictionService`

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::LogisticModel;
use crate::application::PredictionService;

use super::ui::{
    about::{render_about, AboutState, ModelSummary},
    predictor::{render_predictor, PredictorFormState, PredictorView},
    render_disclaimer, render_sidebar, Screen,
};

const SIDEBAR_WIDTH: u16 = 28;

/// Main application state
pub struct App {
    /// Current page
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Model trained at startup, shared read-only
    service: PredictionService<LogisticModel>,

    /// Predictor form state
    form: PredictorFormState,

    /// Result panel state
    view: PredictorView,

    /// About page state
    about: AboutState,
}

impl App {
    /// Create the application around an already-trained model.
    #[must_use]
    pub fn new(service: PredictionService<LogisticModel>) -> Self {
        Self {
            screen: Screen::Predictor,
            should_quit: false,
            service,
            form: PredictorFormState::default(),
            view: PredictorView::AwaitingInput,
            about: AboutState::default(),
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn view(&self) -> &PredictorView {
        &self.view
    }

    #[must_use]
    pub fn form(&self) -> &PredictorFormState {
        &self.form
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Render the current page, sidebar and disclaimer.
    pub fn draw(&self, f: &mut Frame) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(f.area());

        render_sidebar(f, columns[0], self.screen);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(columns[1]);

        match self.screen {
            Screen::Predictor => render_predictor(
                f,
                chunks[0],
                &self.form,
                &self.view,
                &self.service.accuracy_caption(),
            ),
            Screen::About => render_about(
                f,
                chunks[0],
                &self.about,
                ModelSummary {
                    report: self.service.report(),
                    train_rows: self.service.train_rows(),
                    test_rows: self.service.test_rows(),
                },
            ),
        }

        render_disclaimer(f, chunks[1]);
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        match key {
            KeyCode::F(1) => {
                self.screen = Screen::Predictor;
                return;
            }
            KeyCode::F(2) => {
                self.form.commit_all();
                self.screen = Screen::About;
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Predictor => self.handle_predictor_key(key),
            Screen::About => self.handle_about_key(key),
        }
    }

    fn handle_predictor_key(&mut self, key: KeyCode) {
        let edited = match key {
            KeyCode::Up | KeyCode::BackTab => {
                self.form.prev_field();
                false
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form.next_field();
                false
            }
            KeyCode::Right => self.form.increment(),
            KeyCode::Left => self.form.decrement(),
            KeyCode::Char(c) => self.form.input_char(c),
            KeyCode::Backspace => self.form.delete_char(),
            KeyCode::Delete => self.form.reset_field(),
            KeyCode::Enter => {
                self.submit_prediction();
                false
            }
            KeyCode::Esc => {
                self.view = PredictorView::AwaitingInput;
                false
            }
            _ => false,
        };

        // Any edit invalidates the result on screen.
        if edited {
            self.view = PredictorView::AwaitingInput;
        }
    }

    fn handle_about_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.screen = Screen::Predictor,
            KeyCode::Down => self.about.scroll_down(),
            KeyCode::Up => self.about.scroll_up(),
            _ => {}
        }
    }

    fn submit_prediction(&mut self) {
        self.form.commit_all();
        let features = self.form.to_patient_features();

        match self.service.predict(&features) {
            Ok(prediction) => {
                self.form.error_message = None;
                self.view = PredictorView::ShowingResult(prediction);
            }
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                self.form.error_message = Some(e.to_string());
                self.view = PredictorView::AwaitingInput;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ratatui::backend::TestBackend;

    use crate::domain::{HoldoutReport, FEATURE_COUNT};

    fn test_app(intercept: f64) -> App {
        let model = LogisticModel::new(vec![0.0; FEATURE_COUNT], intercept);
        let report = HoldoutReport::from_labels(&[1, 0, 1, 0], &[1, 0, 0, 0]);
        App::new(PredictionService::new(Arc::new(model), report))
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 50)).expect("terminal");
        terminal.draw(|f| app.draw(f)).expect("draw");
        buffer_text(&terminal)
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    #[test]
    fn test_initial_render_shows_form_and_sidebar() {
        let app = test_app(-1.0);
        let text = render(&app);
        assert!(text.contains("Heart App Menu"));
        assert!(text.contains("Heart Disease Prediction App"));
        assert!(text.contains("Resting BP (mm Hg)"));
        assert!(text.contains("Press [Enter] to predict"));
        assert!(text.contains("educational and informational purposes only"));
        assert!(!text.contains("Model tested accuracy"));
    }

    #[test]
    fn test_enter_shows_result_with_caption() {
        let mut app = test_app(-1.0);
        press(&mut app, KeyCode::Enter);

        let PredictorView::ShowingResult(prediction) = *app.view() else {
            panic!("expected a result");
        };
        assert_eq!(prediction.label, 0);

        let text = render(&app);
        assert!(text.contains("The model predicts no heart disease (73.11% confidence)."));
        assert!(text.contains("Model tested accuracy: 75.00%"));
        assert!(text.contains("26%"));
    }

    #[test]
    fn test_positive_verdict_text() {
        let mut app = test_app(2.0);
        press(&mut app, KeyCode::Enter);
        let text = render(&app);
        assert!(text.contains("The model predicts presence of heart disease (88.08% confidence)."));
    }

    #[test]
    fn test_editing_drops_result_but_navigation_does_not() {
        let mut app = test_app(-1.0);
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Down);
        assert!(matches!(app.view(), PredictorView::ShowingResult(_)));

        // sex: Female -> Male
        press(&mut app, KeyCode::Right);
        assert_eq!(*app.view(), PredictorView::AwaitingInput);

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        assert_eq!(*app.view(), PredictorView::AwaitingInput);
    }

    #[test]
    fn test_predicting_twice_gives_same_result() {
        let mut app = test_app(0.3);
        press(&mut app, KeyCode::Enter);
        let first = *app.view();
        press(&mut app, KeyCode::Enter);
        assert_eq!(*app.view(), first);
    }

    #[test]
    fn test_page_switching() {
        let mut app = test_app(-1.0);
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.screen(), Screen::About);

        let text = render(&app);
        assert!(text.contains("About This App"));
        assert!(text.contains("Dataset Features"));
        assert!(text.contains("trestbps"));
        assert!(text.contains("Accuracy: 75.00%"));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Predictor);
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut app = test_app(-1.0);
        app.handle_key(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(!app.should_quit());
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit());
    }
}
