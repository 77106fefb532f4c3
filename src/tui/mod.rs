//! TUI module: Terminal User Interface using Ratatui.
//!
//! Two pages selected from a sidebar:
//! - Predictor: the input form and the prediction result
//! - About: project description and holdout metrics

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::HeartTheme;
pub use ui::predictor::{PredictorFormState, PredictorView};
pub use ui::Screen;
