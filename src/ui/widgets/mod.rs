//! Reusable widgets for the dashboard

mod gauge;

pub use gauge::{LabelledGauge, ProgressGauge};
