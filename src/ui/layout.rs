//! Layout components shared by the dashboard screens

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::Theme;

/// Main application layout manager
pub struct AppLayout {
    pub theme: Theme,
}

impl AppLayout {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Split the screen into header, content and footer
    pub fn create_areas(&self, area: Rect) -> LayoutAreas {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(10),   // Content
                Constraint::Length(3), // Footer
            ])
            .split(area);

        LayoutAreas {
            header: main_chunks[0],
            content: main_chunks[1],
            footer: main_chunks[2],
        }
    }

    /// Render the title bar with one tab per top-level screen
    pub fn render_header(&self, frame: &mut Frame, area: Rect, title: &str, tabs: &[&str], active: usize) {
        let mut spans = Vec::with_capacity(tabs.len() * 2);
        for (i, tab) in tabs.iter().enumerate() {
            let style = if i == active {
                self.theme.title_style().patch(self.theme.selection_style())
            } else {
                self.theme.muted_style()
            };
            spans.push(Span::styled(format!(" {} ", tab), style));
            spans.push(Span::raw(" "));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false))
            .title(Span::styled(format!(" {} ", title), self.theme.title_style()))
            .title_alignment(Alignment::Left);

        let header = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Right)
            .block(block);

        frame.render_widget(header, area);
    }

    /// Render footer with key hints
    pub fn render_footer(&self, frame: &mut Frame, area: Rect, shortcuts: &[(&str, &str)]) {
        let spans: Vec<Span> = shortcuts
            .iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(format!(" {} ", key), self.theme.shortcut_key_style()),
                    Span::styled(format!("{} ", desc), self.theme.shortcut_desc_style()),
                    Span::raw("│"),
                ]
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let footer = Paragraph::new(Line::from(spans))
            .block(block)
            .alignment(Alignment::Center);

        frame.render_widget(footer, area);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LayoutAreas {
    pub header: Rect,
    pub content: Rect,
    pub footer: Rect,
}

/// Create a centered rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Fixed-width text bar, `ratio` in 0..=1
pub fn text_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    std::iter::repeat_n('█', filled)
        .chain(std::iter::repeat_n('░', width - filled))
        .collect()
}

/// Singular or plural noun for a count: `1 project`, `2 projects`
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
