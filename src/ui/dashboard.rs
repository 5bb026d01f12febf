//! Dashboard application
//!
//! [`DashboardState`] holds navigation and the progress indicators mounted
//! on the current screen; [`DashboardApp`] owns the terminal and drives the
//! draw / pump / input loop.

use std::io::{self, Stdout};
use std::time::Instant;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::config::AppConfig;
use crate::data::{Portfolio, Project};
use crate::{log_debug, log_info};

use super::animations::{AnimationPolicy, Pulse};
use super::layout::AppLayout;
use super::progress::{AnimatedProgress, LabelledProgress, ProgressSize};
use super::screens::render_ui;
use super::theme::Theme;

/// Top-level tabs, in header order
pub const TABS: [&str; 3] = ["Overview", "Projects", "Reports"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Overview,
    Projects,
    /// Detail page for the project at this index
    Detail(usize),
    Reports,
}

impl Screen {
    /// Header tab highlighted for this screen
    pub fn tab_index(&self) -> usize {
        match self {
            Screen::Overview => 0,
            Screen::Projects | Screen::Detail(_) => 1,
            Screen::Reports => 2,
        }
    }

    fn from_tab(index: usize) -> Self {
        match index % TABS.len() {
            0 => Screen::Overview,
            1 => Screen::Projects,
            _ => Screen::Reports,
        }
    }
}

/// Progress indicators mounted on the current screen
///
/// `labelled` holds one entry per project (or the hero bar on a detail
/// page); `bars` holds per-card or per-phase bars.
#[derive(Debug, Default)]
pub struct ScreenIndicators {
    pub labelled: Vec<LabelledProgress>,
    pub bars: Vec<AnimatedProgress>,
}

impl ScreenIndicators {
    fn mount(&mut self) {
        for labelled in &mut self.labelled {
            labelled.progress_mut().mount();
        }
        for bar in &mut self.bars {
            bar.mount();
        }
    }

    fn unmount(&mut self) {
        for labelled in &mut self.labelled {
            labelled.progress_mut().unmount();
        }
        for bar in &mut self.bars {
            bar.unmount();
        }
    }

    /// Apply pending frames; true when anything moved
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        for labelled in &mut self.labelled {
            changed |= labelled.progress_mut().pump();
        }
        for bar in &mut self.bars {
            changed |= bar.pump();
        }
        changed
    }

    pub fn is_animating(&self) -> bool {
        self.labelled.iter().any(|l| l.progress().is_animating())
            || self.bars.iter().any(AnimatedProgress::is_animating)
    }
}

/// Navigation and indicator state, independent of the terminal
pub struct DashboardState {
    pub portfolio: Portfolio,
    pub screen: Screen,
    pub selected: usize,
    pub scroll: u16,
    pub show_help: bool,
    pub should_quit: bool,
    pub indicators: ScreenIndicators,
    policy: AnimationPolicy,
    default_brand_color: String,
}

impl DashboardState {
    pub fn new(portfolio: Portfolio, config: &AppConfig) -> Self {
        Self {
            portfolio,
            screen: Screen::Overview,
            selected: 0,
            scroll: 0,
            show_help: false,
            should_quit: false,
            indicators: ScreenIndicators::default(),
            policy: config.animation.policy(),
            default_brand_color: config.default_brand_color.clone(),
        }
    }

    /// Switch screens: the old screen's timers stop before the new ones start
    pub fn enter(&mut self, screen: Screen) {
        self.indicators.unmount();
        self.screen = screen;
        self.scroll = 0;
        self.indicators = self.build_indicators(screen);
        self.indicators.mount();
        log_debug!("Entered {:?}", screen);
    }

    fn brand_of(&self, project: &Project) -> String {
        project
            .brand_color
            .clone()
            .unwrap_or_else(|| self.default_brand_color.clone())
    }

    fn bar(&self, target: f64, size: ProgressSize, brand: &str) -> AnimatedProgress {
        AnimatedProgress::new(target)
            .with_size(size)
            .with_brand_color(brand)
            .with_policy(self.policy)
    }

    fn build_indicators(&self, screen: Screen) -> ScreenIndicators {
        let projects = &self.portfolio.projects;
        let mut indicators = ScreenIndicators::default();

        match screen {
            Screen::Overview | Screen::Reports => {
                indicators.labelled = projects
                    .iter()
                    .map(|p| {
                        let bar = self.bar(p.progress, ProgressSize::Medium, &self.brand_of(p));
                        LabelledProgress::new(bar, Some(p.name.clone()))
                    })
                    .collect();
            }
            Screen::Projects => {
                indicators.bars = projects
                    .iter()
                    .map(|p| self.bar(p.progress, ProgressSize::Medium, &self.brand_of(p)))
                    .collect();
            }
            Screen::Detail(index) => {
                if let Some(project) = projects.get(index) {
                    let brand = self.brand_of(project);
                    let hero = self.bar(project.progress, ProgressSize::Large, &brand);
                    indicators.labelled =
                        vec![LabelledProgress::new(hero, Some("Overall Progress".to_string()))];
                    indicators.bars = project
                        .timeline
                        .phases
                        .iter()
                        .map(|phase| self.bar(phase.completion, ProgressSize::Small, &brand))
                        .collect();
                }
            }
        }

        indicators
    }

    pub fn current_project(&self) -> Option<&Project> {
        match self.screen {
            Screen::Detail(index) => self.portfolio.projects.get(index),
            _ => None,
        }
    }

    fn project_count(&self) -> usize {
        self.portfolio.projects.len()
    }

    fn select_next(&mut self) {
        let count = self.project_count();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    fn select_previous(&mut self) {
        let count = self.project_count();
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
        }
    }

    /// Apply one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            self.show_help = false;
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => {
                let next = Screen::from_tab(self.screen.tab_index() + 1);
                self.enter(next);
            }
            KeyCode::BackTab => {
                let previous = Screen::from_tab(self.screen.tab_index() + TABS.len() - 1);
                self.enter(previous);
            }
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                if index < self.project_count() {
                    self.selected = index;
                    self.enter(Screen::Detail(index));
                }
            }
            KeyCode::Char('r') => {
                // Replay the current screen's animations
                self.enter(self.screen);
            }
            _ => self.handle_screen_key(key.code),
        }
    }

    fn handle_screen_key(&mut self, code: KeyCode) {
        match (self.screen, code) {
            (Screen::Detail(_), KeyCode::Esc | KeyCode::Backspace) => self.enter(Screen::Projects),
            (Screen::Detail(_), KeyCode::Down | KeyCode::Char('j')) => {
                self.scroll = self.scroll.saturating_add(1);
            }
            (Screen::Detail(_), KeyCode::Up | KeyCode::Char('k')) => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            (Screen::Detail(index), KeyCode::Right | KeyCode::Left) => {
                let count = self.project_count();
                let next = if code == KeyCode::Right {
                    (index + 1) % count
                } else {
                    (index + count - 1) % count
                };
                self.selected = next;
                self.enter(Screen::Detail(next));
            }
            (Screen::Overview | Screen::Projects, KeyCode::Down | KeyCode::Char('j'))
            | (Screen::Projects, KeyCode::Right) => self.select_next(),
            (Screen::Overview | Screen::Projects, KeyCode::Up | KeyCode::Char('k'))
            | (Screen::Projects, KeyCode::Left) => self.select_previous(),
            (Screen::Overview | Screen::Projects, KeyCode::Enter) => {
                if self.selected < self.project_count() {
                    self.enter(Screen::Detail(self.selected));
                }
            }
            (Screen::Projects | Screen::Reports, KeyCode::Esc | KeyCode::Backspace) => {
                self.enter(Screen::Overview)
            }
            _ => {}
        }
    }
}

/// Terminal application
pub struct DashboardApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: DashboardState,
    layout: AppLayout,
    pulse: Pulse,
    config: AppConfig,
}

impl DashboardApp {
    pub fn new(portfolio: Portfolio, config: AppConfig) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            state: DashboardState::new(portfolio, &config),
            layout: AppLayout::new(Theme::dark()),
            pulse: Pulse::default(),
            config,
        })
    }

    /// Open on a given screen instead of the overview
    pub fn start_at(&mut self, screen: Screen) {
        if let Screen::Detail(index) = screen {
            self.state.selected = index;
        }
        self.state.screen = screen;
    }

    pub async fn run(&mut self) -> io::Result<()> {
        let tick_rate = self.config.tick_rate();
        let mut last_tick = Instant::now();

        // Mount the first screen inside the runtime
        self.state.enter(self.state.screen);
        log_info!("Dashboard started on {:?}", self.state.screen);

        loop {
            self.state.indicators.pump();
            self.draw()?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    self.state.handle_key(key);
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.pulse.tick();
                last_tick = Instant::now();
            }

            if self.state.should_quit {
                break;
            }

            // Let timer tasks run between frames
            tokio::task::yield_now().await;
        }

        self.state.indicators.unmount();
        self.cleanup()?;
        log_info!("Dashboard closed");
        Ok(())
    }

    fn draw(&mut self) -> io::Result<()> {
        let state = &self.state;
        let layout = &self.layout;
        let pulse = self.pulse.intensity();

        self.terminal.draw(|frame| {
            render_ui(frame, state, layout, pulse);
        })?;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show)?;
        Ok(())
    }
}

impl Drop for DashboardApp {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> DashboardState {
        DashboardState::new(Portfolio::bundled().unwrap(), &AppConfig::default())
    }

    #[tokio::test]
    async fn test_tab_cycles_screens() {
        let mut state = state();
        state.enter(Screen::Overview);

        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.screen, Screen::Projects);
        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.screen, Screen::Reports);
        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.screen, Screen::Overview);
        state.handle_key(key(KeyCode::BackTab));
        assert_eq!(state.screen, Screen::Reports);
    }

    #[tokio::test]
    async fn test_open_and_leave_detail() {
        let mut state = state();
        state.enter(Screen::Projects);

        state.handle_key(key(KeyCode::Down));
        state.handle_key(key(KeyCode::Enter));
        assert_eq!(state.screen, Screen::Detail(1));
        assert_eq!(state.current_project().unwrap().id, "mngo");

        // hero bar plus one bar per phase
        assert_eq!(state.indicators.labelled.len(), 1);
        assert_eq!(state.indicators.bars.len(), 3);
        assert_eq!(
            state.indicators.labelled[0].progress().size(),
            ProgressSize::Large
        );

        state.handle_key(key(KeyCode::Right));
        assert_eq!(state.screen, Screen::Detail(2));

        state.handle_key(key(KeyCode::Esc));
        assert_eq!(state.screen, Screen::Projects);
    }

    #[tokio::test]
    async fn test_number_keys_open_projects() {
        let mut state = state();
        state.enter(Screen::Overview);
        state.handle_key(key(KeyCode::Char('3')));
        assert_eq!(state.screen, Screen::Detail(2));
        assert_eq!(state.selected, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_screen_stops_its_timers() {
        let mut state = state();
        state.enter(Screen::Overview);
        assert!(state.indicators.is_animating());

        tokio::time::sleep(Duration::from_millis(100)).await;
        state.indicators.pump();

        // Hold on to the overview indicators to watch them after the switch
        let mut old = std::mem::take(&mut state.indicators);
        old.unmount();
        state.enter(Screen::Projects);
        assert_eq!(state.indicators.bars.len(), 3);
        assert!(state.indicators.is_animating());

        let frozen: Vec<f64> = old.labelled.iter().map(|l| l.readout()).collect();
        assert!(frozen.iter().all(|v| *v > 0.0));
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!old.pump());
        let after: Vec<f64> = old.labelled.iter().map(|l| l.readout()).collect();
        assert_eq!(frozen, after);
        assert!(!old.is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overview_bars_reach_project_progress() {
        let mut state = state();
        state.enter(Screen::Overview);

        tokio::time::sleep(Duration::from_secs(2)).await;
        state.indicators.pump();

        let values: Vec<f64> = state
            .indicators
            .labelled
            .iter()
            .map(|l| l.progress().value())
            .collect();
        let expected: Vec<f64> = state.portfolio.projects.iter().map(|p| p.progress).collect();
        assert_eq!(values, expected);
        assert!(!state.indicators.is_animating());
    }

    #[test]
    fn test_disabled_animation_settles_on_enter() {
        let mut config = AppConfig::default();
        config.animation.enabled = false;
        let mut state = DashboardState::new(Portfolio::bundled().unwrap(), &config);

        state.enter(Screen::Reports);
        assert!(!state.indicators.is_animating());
        assert_eq!(state.indicators.labelled[0].percent_text(), "65%");
    }

    #[tokio::test]
    async fn test_help_and_quit() {
        let mut state = state();
        state.enter(Screen::Overview);

        state.handle_key(key(KeyCode::Char('?')));
        assert!(state.show_help);
        state.handle_key(key(KeyCode::Char('q')));
        assert!(!state.show_help);
        assert!(!state.should_quit);

        state.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(state.should_quit);
    }
}
