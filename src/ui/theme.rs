//! Color palette and brand colors

use ratatui::style::{Color, Modifier, Style};

use crate::data::{PhaseStatus, Priority, ProjectStatus, Severity};

/// Color palette for the application
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub track: Color,

    // Accent colors
    pub primary: Color,
    pub accent: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
}

impl Theme {
    /// Dark board theme
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(14, 17, 28),
            foreground: Color::Rgb(230, 232, 240),
            muted: Color::Rgb(125, 130, 150),
            track: Color::Rgb(40, 44, 60),

            primary: Color::Rgb(29, 77, 255),   // #1D4DFF
            accent: Color::Rgb(255, 180, 100),

            success: Color::Rgb(110, 230, 160),
            warning: Color::Rgb(255, 210, 90),
            error: Color::Rgb(255, 120, 120),

            border: Color::Rgb(55, 60, 80),
            border_focused: Color::Rgb(110, 140, 255),
            selection: Color::Rgb(35, 45, 80),
        }
    }

    // Style builders

    pub fn base_style(&self) -> Style {
        Style::default().bg(self.background).fg(self.foreground)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused { self.border_focused } else { self.border })
    }

    pub fn selection_style(&self) -> Style {
        Style::default().bg(self.selection)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .add_modifier(Modifier::BOLD)
    }

    pub fn brand_style(&self, brand: Color) -> Style {
        Style::default().fg(brand).add_modifier(Modifier::BOLD)
    }

    pub fn shortcut_key_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn shortcut_desc_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn status_style(&self, status: ProjectStatus) -> Style {
        match status {
            ProjectStatus::InProgress => self.primary_style(),
            ProjectStatus::Planning => self.warning_style(),
            ProjectStatus::NearCompletion => self.success_style(),
            ProjectStatus::Unknown => self.muted_style(),
        }
    }

    pub fn priority_style(&self, priority: Priority) -> Style {
        let style = match priority {
            Priority::High => self.error_style(),
            Priority::Medium => self.warning_style(),
            Priority::Low | Priority::Unknown => self.muted_style(),
        };
        style.add_modifier(Modifier::BOLD)
    }

    pub fn severity_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::High => self.error_style(),
            Severity::Medium => self.warning_style(),
            Severity::Low | Severity::Unknown => self.muted_style(),
        }
    }

    pub fn phase_marker(&self, status: PhaseStatus) -> (&'static str, Style) {
        match status {
            PhaseStatus::Completed => ("✓", self.success_style()),
            PhaseStatus::InProgress => ("◐", self.primary_style()),
            PhaseStatus::Upcoming | PhaseStatus::Unknown => ("○", self.muted_style()),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Parse `#RRGGBB` (or `RRGGBB`) into an RGB color
pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Brand color for a token, falling back to the theme primary
pub fn brand_color(token: Option<&str>, theme: &Theme) -> Color {
    token.and_then(parse_hex_color).unwrap_or(theme.primary)
}

/// Mix an RGB color toward white by `amount` (0..=1)
pub fn lighten(color: Color, amount: f64) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let amount = amount.clamp(0.0, 1.0);
            let mix = |c: u8| (c as f64 + (255.0 - c as f64) * amount).round() as u8;
            Color::Rgb(mix(r), mix(g), mix(b))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_styles() {
        let theme = Theme::dark();
        let style = theme.base_style();
        assert!(style.bg.is_some());
        assert!(style.fg.is_some());
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#1D4DFF"), Some(Color::Rgb(29, 77, 255)));
        assert_eq!(parse_hex_color("f97316"), Some(Color::Rgb(249, 115, 22)));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
        assert_eq!(parse_hex_color("#ÄÄÄ"), None);
    }

    #[test]
    fn test_brand_color_fallback() {
        let theme = Theme::dark();
        assert_eq!(brand_color(None, &theme), theme.primary);
        assert_eq!(brand_color(Some("nope"), &theme), theme.primary);
        assert_eq!(brand_color(Some("#10B981"), &theme), Color::Rgb(16, 185, 129));
    }

    #[test]
    fn test_lighten() {
        assert_eq!(lighten(Color::Rgb(0, 100, 255), 0.0), Color::Rgb(0, 100, 255));
        assert_eq!(lighten(Color::Rgb(0, 100, 255), 1.0), Color::Rgb(255, 255, 255));
        assert_eq!(lighten(Color::Rgb(0, 0, 0), 0.5), Color::Rgb(128, 128, 128));
        assert_eq!(lighten(Color::Red, 0.5), Color::Red);
    }
}
