//! Board - executive portfolio dashboard
//!
//! Board presents a company's project portfolio to leadership: headline
//! figures, per-project progress, phases, costs, risks and board asks. Every
//! progress bar on screen is an animated indicator that climbs from zero to
//! its value when the screen opens.
//!
//! # Modules
//!
//! - [`data`] - Portfolio documents, cost breakdowns and derived statistics
//! - [`ui`] - Terminal dashboard and the animated progress indicator
//! - [`report`] - Plain-text summaries for the command line
//! - [`config`] - Configuration file and environment overrides
//!
//! # Example
//!
//! ```rust,no_run
//! use board::data::Portfolio;
//! use board::ui::{AnimatedProgress, ProgressSize};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let portfolio = Portfolio::bundled()?;
//! let ims = portfolio.project("ims")?;
//!
//! let mut bar = AnimatedProgress::new(ims.progress)
//!     .with_size(ProgressSize::Large)
//!     .with_brand_color(ims.brand_color());
//! bar.mount();
//! bar.finish().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod logging;
pub mod report;
pub mod ui;

pub use config::AppConfig;
pub use data::{Portfolio, Project};
pub use ui::{AnimatedProgress, DashboardApp, LabelledProgress, ProgressSize};
