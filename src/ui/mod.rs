//! UI module - portfolio dashboard using ratatui

pub mod animations;
pub mod dashboard;
pub mod layout;
pub mod progress;
mod screens;
pub mod theme;
pub mod widgets;

pub use animations::{AnimationPolicy, Pulse};
pub use dashboard::{DashboardApp, DashboardState, Screen};
pub use progress::{AnimatedProgress, LabelledProgress, ProgressSize};
pub use theme::Theme;
