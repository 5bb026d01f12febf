//! Progress bar widgets
//!
//! The bar is filled in the indicator's brand color. Cells near the leading
//! edge are lightened by the glow intensity, so the head of the bar brightens
//! as the value climbs and breathes with the pulse.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::ui::progress::{AnimatedProgress, LabelledProgress, ProgressSize};
use crate::ui::theme::{brand_color, lighten, Theme};

const FILLED: &str = "█";
const TRACK: &str = "░";

/// Bar for an [`AnimatedProgress`]
pub struct ProgressGauge<'a> {
    progress: &'a AnimatedProgress,
    theme: &'a Theme,
    pulse: f64,
}

impl<'a> ProgressGauge<'a> {
    pub fn new(progress: &'a AnimatedProgress, theme: &'a Theme) -> Self {
        Self {
            progress,
            theme,
            pulse: 1.0,
        }
    }

    /// Pulse intensity in 0..=1 modulating the glow
    pub fn pulse(mut self, pulse: f64) -> Self {
        self.pulse = pulse.clamp(0.0, 1.0);
        self
    }

    /// Number of cells lightened behind the head of the bar
    fn glow_cells(size: ProgressSize, filled: u16) -> u16 {
        (size.glow_radius() / 4).max(1).min(filled)
    }
}

impl Widget for ProgressGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let size = self.progress.size();
        let brand = brand_color(self.progress.brand_color(), self.theme);
        let rows = size.stroke_width().min(area.height);
        let filled = ((area.width as f64 * self.progress.ratio()).round() as u16).min(area.width);
        let glow = self.progress.glow() * (0.6 + 0.4 * self.pulse);
        let edge = Self::glow_cells(size, filled);

        for y in area.top()..area.top() + rows {
            for offset in 0..area.width {
                let Some(cell) = buf.cell_mut((area.left() + offset, y)) else {
                    continue;
                };

                if offset < filled {
                    let behind_head = filled - 1 - offset;
                    let color = if behind_head < edge {
                        let falloff = (edge - behind_head) as f64 / edge as f64;
                        lighten(brand, glow * falloff * 0.5)
                    } else {
                        brand
                    };
                    cell.set_symbol(FILLED).set_fg(color);
                } else {
                    cell.set_symbol(TRACK).set_fg(self.theme.track);
                }
            }
        }
    }
}

/// Caption row above a bar, with the percentage fed by the change callback
pub struct LabelledGauge<'a> {
    labelled: &'a LabelledProgress,
    theme: &'a Theme,
    pulse: f64,
}

impl<'a> LabelledGauge<'a> {
    pub fn new(labelled: &'a LabelledProgress, theme: &'a Theme) -> Self {
        Self {
            labelled,
            theme,
            pulse: 1.0,
        }
    }

    pub fn pulse(mut self, pulse: f64) -> Self {
        self.pulse = pulse.clamp(0.0, 1.0);
        self
    }

    /// Rows needed to draw a labelled bar of `size`
    pub fn height(labelled: &LabelledProgress) -> u16 {
        let caption = u16::from(labelled.label.is_some() || labelled.show_percentage);
        caption + labelled.progress().size().stroke_width()
    }
}

impl Widget for LabelledGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let progress = self.labelled.progress();
        let mut bar_area = area;

        if self.labelled.label.is_some() || self.labelled.show_percentage {
            let caption = Rect { height: 1, ..area };

            if let Some(label) = &self.labelled.label {
                Paragraph::new(Line::from(Span::styled(
                    label.as_str(),
                    self.theme.title_style(),
                )))
                .render(caption, buf);
            }

            if self.labelled.show_percentage {
                let brand = brand_color(progress.brand_color(), self.theme);
                let mut style = Style::default().fg(brand);
                if progress.size() == ProgressSize::Large {
                    style = style.add_modifier(Modifier::BOLD);
                }
                Paragraph::new(Line::from(Span::styled(self.labelled.percent_text(), style)))
                    .alignment(Alignment::Right)
                    .render(caption, buf);
            }

            bar_area.y = bar_area.y.saturating_add(1);
            bar_area.height = bar_area.height.saturating_sub(1);
        }

        ProgressGauge::new(progress, self.theme)
            .pulse(self.pulse)
            .render(bar_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::animations::AnimationPolicy;
    use ratatui::style::Color;

    fn settled(target: f64, size: ProgressSize) -> AnimatedProgress {
        let mut progress = AnimatedProgress::new(target)
            .with_size(size)
            .with_brand_color("#1D4DFF")
            .with_policy(AnimationPolicy::disabled());
        progress.mount();
        progress
    }

    #[test]
    fn test_gauge_fills_proportionally() {
        let theme = Theme::dark();
        let progress = settled(50.0, ProgressSize::Medium);
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);

        ProgressGauge::new(&progress, &theme).render(area, &mut buf);

        let filled = (0..20).filter(|x| buf[(*x, 0)].symbol() == FILLED).count();
        assert_eq!(filled, 10);
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(29, 77, 255));
        assert_ne!(buf[(9, 0)].fg, Color::Rgb(29, 77, 255));
        assert_eq!(buf[(15, 0)].fg, theme.track);
    }

    #[test]
    fn test_empty_gauge_has_no_glow() {
        let theme = Theme::dark();
        let progress = settled(0.0, ProgressSize::Small);
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);

        ProgressGauge::new(&progress, &theme).render(area, &mut buf);
        assert!((0..10).all(|x| buf[(x, 0)].symbol() == TRACK));
    }

    #[test]
    fn test_large_gauge_uses_two_rows() {
        let theme = Theme::dark();
        let progress = settled(100.0, ProgressSize::Large);
        let area = Rect::new(0, 0, 8, 3);
        let mut buf = Buffer::empty(area);

        ProgressGauge::new(&progress, &theme).render(area, &mut buf);
        assert_eq!(buf[(0, 1)].symbol(), FILLED);
        assert_eq!(buf[(0, 2)].symbol(), " ");
    }

    #[test]
    fn test_labelled_pulse_is_clamped() {
        let theme = Theme::dark();
        let mut labelled = LabelledProgress::new(
            AnimatedProgress::new(60.0).with_policy(AnimationPolicy::disabled()),
            None,
        );
        labelled.progress_mut().mount();

        let render = |pulse: f64| {
            let area = Rect::new(0, 0, 20, 2);
            let mut buf = Buffer::empty(area);
            LabelledGauge::new(&labelled, &theme).pulse(pulse).render(area, &mut buf);
            buf
        };
        assert_eq!(LabelledGauge::new(&labelled, &theme).pulse(7.5).pulse, 1.0);
        assert_eq!(LabelledGauge::new(&labelled, &theme).pulse(-3.0).pulse, 0.0);
        assert_eq!(render(7.5), render(1.0));
    }

    #[test]
    fn test_labelled_gauge_caption() {
        let theme = Theme::dark();
        let mut labelled = LabelledProgress::new(
            AnimatedProgress::new(75.0).with_policy(AnimationPolicy::disabled()),
            Some("Progress".to_string()),
        );
        labelled.progress_mut().mount();
        assert_eq!(LabelledGauge::height(&labelled), 2);

        let area = Rect::new(0, 0, 20, 2);
        let mut buf = Buffer::empty(area);
        LabelledGauge::new(&labelled, &theme).render(area, &mut buf);

        let caption: String = (0..20).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(caption.starts_with("Progress"));
        assert!(caption.trim_end().ends_with("75%"));
        assert_eq!(buf[(0, 1)].symbol(), FILLED);
    }
}
