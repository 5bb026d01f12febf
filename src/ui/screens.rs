//! Screen renderers for the dashboard

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::data::format::{format_month_year, format_month_year_long};
use crate::data::{PhaseStatus, Project};
use crate::report::{cost_rows, CostRow};

use super::dashboard::{DashboardState, Screen, TABS};
use super::layout::{centered_rect, pluralize, text_bar, AppLayout};
use super::progress::LabelledProgress;
use super::theme::{brand_color, Theme};
use super::widgets::{LabelledGauge, ProgressGauge};

/// Draw the whole dashboard for the current screen
pub fn render_ui(frame: &mut Frame, state: &DashboardState, layout: &AppLayout, pulse: f64) {
    let theme = &layout.theme;
    let area = frame.area();
    frame.render_widget(Block::default().style(theme.base_style()), area);

    let areas = layout.create_areas(area);
    layout.render_header(
        frame,
        areas.header,
        &state.portfolio.company.name,
        &TABS,
        state.screen.tab_index(),
    );

    match state.screen {
        Screen::Overview => render_overview(frame, areas.content, state, theme, pulse),
        Screen::Projects => render_projects(frame, areas.content, state, theme, pulse),
        Screen::Detail(_) => render_detail(frame, areas.content, state, theme, pulse),
        Screen::Reports => render_reports(frame, areas.content, state, theme, pulse),
    }

    layout.render_footer(frame, areas.footer, &shortcuts(state.screen));

    if state.show_help {
        render_help(frame, area, theme);
    }
}

fn shortcuts(screen: Screen) -> Vec<(&'static str, &'static str)> {
    let mut keys = vec![("Tab", "Switch"), ("↑↓", "Select")];
    match screen {
        Screen::Overview | Screen::Projects => keys.push(("Enter", "Open")),
        Screen::Detail(_) => {
            keys = vec![("Esc", "Back"), ("↑↓", "Scroll"), ("←→", "Project")];
        }
        Screen::Reports => {}
    }
    keys.extend([("r", "Replay"), ("?", "Help"), ("q", "Quit")]);
    keys
}

fn panel<'a>(title: &str, theme: &Theme, focused: bool) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(Span::styled(format!(" {} ", title), theme.title_style()))
}

fn stat_card(frame: &mut Frame, area: Rect, label: &str, value: String, theme: &Theme) {
    let text = vec![
        Line::from(Span::styled(value, theme.title_style())),
        Line::from(Span::styled(label.to_string(), theme.muted_style())),
    ];
    let card = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(theme.border_style(false)));
    frame.render_widget(card, area);
}

fn stat_row(frame: &mut Frame, area: Rect, cards: &[(&str, String)], theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(area);
    for ((label, value), column) in cards.iter().zip(columns.iter()) {
        stat_card(frame, *column, label, value.clone(), theme);
    }
}

/// Stack labelled gauges in `area`, marking the selected row
fn render_gauge_list(
    frame: &mut Frame,
    area: Rect,
    gauges: &[LabelledProgress],
    selected: Option<usize>,
    theme: &Theme,
    pulse: f64,
) {
    let mut y = area.y;
    for (index, labelled) in gauges.iter().enumerate() {
        let height = LabelledGauge::height(labelled);
        if y + height > area.bottom() {
            break;
        }

        if selected == Some(index) {
            let marker = Rect::new(area.x, y, 2, 1);
            frame.render_widget(Paragraph::new(Span::styled("▶", theme.primary_style())), marker);
        }

        let gauge_area = Rect::new(area.x + 2, y, area.width.saturating_sub(2), height);
        frame.render_widget(LabelledGauge::new(labelled, theme).pulse(pulse), gauge_area);
        y += height + 1;
    }
}

fn render_overview(frame: &mut Frame, area: Rect, state: &DashboardState, theme: &Theme, pulse: f64) {
    let company = &state.portfolio.company;
    let stats = state.portfolio.stats();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Length(4), Constraint::Min(6)])
        .split(area);

    let hero = Paragraph::new(vec![
        Line::from(Span::styled(company.tagline.as_str(), theme.primary_style())),
        Line::from(company.description.as_str()),
        Line::from(Span::styled(company.focus.join("  ·  "), theme.muted_style())),
    ])
    .wrap(Wrap { trim: true })
    .block(panel(&company.name, theme, false));
    frame.render_widget(hero, rows[0]);

    stat_row(
        frame,
        rows[1],
        &[
            ("Total Projects", stats.total_projects.to_string()),
            ("Active", stats.active_projects.to_string()),
            ("Avg Progress", format!("{}%", stats.average_progress)),
            ("Team Members", stats.team_members.to_string()),
        ],
        theme,
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[2]);

    let block = panel("Project Progress", theme, true);
    let inner = block.inner(body[0]);
    frame.render_widget(block, body[0]);
    render_gauge_list(
        frame,
        inner,
        &state.indicators.labelled,
        Some(state.selected),
        theme,
        pulse,
    );

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(body[1]);

    let width = side[0].width.saturating_sub(24).max(4) as usize;
    let breakdown: Vec<Line> = stats
        .status_breakdown
        .iter()
        .map(|share| {
            Line::from(vec![
                Span::styled(format!("{:<16}", share.status.label()), theme.status_style(share.status)),
                Span::styled(text_bar(share.percent / 100.0, width), theme.status_style(share.status)),
                Span::raw(format!(" {}", share.count)),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(breakdown).block(panel("Project Status", theme, false)),
        side[0],
    );

    let milestones: Vec<Line> = state
        .portfolio
        .projects
        .iter()
        .filter_map(|project| {
            let phase = project
                .timeline
                .phases
                .iter()
                .find(|p| p.status != PhaseStatus::Completed)?;
            Some(Line::from(vec![
                Span::styled(format!("{} ", project.name), theme.brand_style(brand_color(project.brand_color.as_deref(), theme))),
                Span::raw(format!("{} ", phase.name)),
                Span::styled(
                    format!("due {}", format_month_year(&project.timeline.expected_delivery)),
                    theme.muted_style(),
                ),
            ]))
        })
        .collect();
    frame.render_widget(
        Paragraph::new(milestones)
            .wrap(Wrap { trim: true })
            .block(panel("Upcoming Milestones", theme, false)),
        side[1],
    );
}

fn render_projects(frame: &mut Frame, area: Rect, state: &DashboardState, theme: &Theme, pulse: f64) {
    let projects = &state.portfolio.projects;
    if projects.is_empty() {
        frame.render_widget(Paragraph::new("No projects").block(panel("Projects", theme, false)), area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, projects.len() as u32); projects.len()])
        .split(area);

    for (index, (project, column)) in projects.iter().zip(columns.iter()).enumerate() {
        let focused = index == state.selected;
        let block = panel(&format!("{} {}", project.emoji(), project.name), theme, focused);
        let inner = block.inner(*column);
        frame.render_widget(block, *column);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // full name
                Constraint::Length(1), // status / priority
                Constraint::Length(1),
                Constraint::Length(1), // bar
                Constraint::Length(1), // percent
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Span::styled(project.full_name.as_str(), theme.title_style())),
            rows[0],
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(project.status.label(), theme.status_style(project.status)),
                Span::raw("  "),
                Span::styled(format!("{} priority", project.priority.label()), theme.priority_style(project.priority)),
            ])),
            rows[1],
        );

        if let Some(bar) = state.indicators.bars.get(index) {
            frame.render_widget(ProgressGauge::new(bar, theme).pulse(pulse), rows[3]);
            let brand = brand_color(bar.brand_color(), theme);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("{}% complete", bar.value().round() as i64),
                    theme.brand_style(brand),
                ))
                .alignment(Alignment::Right),
                rows[4],
            );
        }

        let details = vec![
            Line::from(vec![
                Span::styled("Timeline  ", theme.muted_style()),
                Span::raw(format!(
                    "{} → {}",
                    format_month_year(&project.timeline.start),
                    format_month_year(&project.timeline.expected_delivery)
                )),
            ]),
            Line::from(vec![
                Span::styled("Team      ", theme.muted_style()),
                Span::raw(pluralize(project.resources.headcount() as usize, "member")),
            ]),
            Line::from(vec![
                Span::styled("Phases    ", theme.muted_style()),
                Span::raw(format!(
                    "{}/{} complete",
                    project.timeline.completed_phases(),
                    project.timeline.phases.len()
                )),
            ]),
            Line::from(""),
            Line::from(project.description.as_str()),
        ];
        frame.render_widget(Paragraph::new(details).wrap(Wrap { trim: true }), rows[6]);
    }
}

fn cost_lines<'a>(project: &Project, theme: &Theme) -> Vec<Line<'a>> {
    let Some(costs) = &project.resources.costs else {
        return vec![Line::from(Span::styled("No cost data", theme.muted_style()))];
    };
    let brand = theme.brand_style(brand_color(project.brand_color.as_deref(), theme));

    cost_rows(costs)
        .into_iter()
        .map(|row| match row {
            CostRow::Section(title) => Line::from(Span::styled(title, theme.title_style())),
            CostRow::Figure { label, amount, usd } => {
                let mut spans = vec![
                    Span::styled(format!("{:<20}", label), theme.muted_style()),
                    Span::styled(amount, brand.add_modifier(Modifier::BOLD)),
                ];
                if let Some(usd) = usd {
                    spans.push(Span::styled(format!("  {}", usd), theme.muted_style()));
                }
                Line::from(spans)
            }
            CostRow::Item { label, rate } => Line::from(vec![
                Span::raw(format!("  {:<26}", label)),
                Span::raw(rate),
            ]),
            CostRow::Subtotal { amount, usd } => {
                let mut spans = vec![
                    Span::styled(format!("  {:<26}", "Subtotal"), theme.muted_style()),
                    Span::styled(amount, Style::default().add_modifier(Modifier::BOLD)),
                ];
                if let Some(usd) = usd {
                    spans.push(Span::styled(format!("  {}", usd), theme.muted_style()));
                }
                Line::from(spans)
            }
        })
        .collect()
}

fn bullet_section<'a>(lines: &mut Vec<Line<'a>>, title: &str, items: &[String], theme: &Theme, bullet: &'static str) {
    if items.is_empty() {
        return;
    }
    lines.push(Line::from(Span::styled(
        format!("{} ({})", title, items.len()),
        theme.title_style(),
    )));
    lines.extend(items.iter().map(|item| Line::from(format!(" {} {}", bullet, item))));
    lines.push(Line::from(""));
}

fn detail_lines<'a>(project: &Project, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    let overview = &project.overview;

    lines.push(Line::from(Span::styled("Overview", theme.title_style())));
    lines.push(Line::from(vec![
        Span::styled("Problem  ", theme.muted_style()),
        Span::raw(overview.problem.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Value    ", theme.muted_style()),
        Span::raw(overview.value_proposition.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Strategy ", theme.muted_style()),
        Span::raw(overview.strategic_importance.clone()),
    ]));
    if !overview.target_users.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Users    ", theme.muted_style()),
            Span::raw(overview.target_users.join(", ")),
        ]));
    }
    lines.push(Line::from(""));

    if !project.features.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Features ({})", project.features.len()),
            theme.title_style(),
        )));
        for feature in &project.features {
            lines.push(Line::from(vec![
                Span::styled(format!(" • {}  ", feature.title), theme.primary_style()),
                Span::raw(feature.description.clone()),
            ]));
        }
        lines.push(Line::from(""));
    }

    let timeline = &project.timeline;
    if timeline.phases.iter().any(|p| !p.deliverables.is_empty()) {
        lines.push(Line::from(Span::styled("Deliverables", theme.title_style())));
        for phase in &timeline.phases {
            let (marker, marker_style) = theme.phase_marker(phase.status);
            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", marker), marker_style),
                Span::raw(phase.name.clone()),
            ]));
            lines.extend(
                phase
                    .deliverables
                    .iter()
                    .map(|d| Line::from(Span::styled(format!("     • {}", d), theme.muted_style()))),
            );
        }
        lines.push(Line::from(""));
    }

    let resources = &project.resources;
    lines.push(Line::from(Span::styled(
        format!(
            "Team ({}, {} resourcing)",
            pluralize(resources.headcount() as usize, "member"),
            resources.resource_level.label()
        ),
        theme.title_style(),
    )));
    for member in &resources.team {
        lines.push(Line::from(vec![
            Span::raw(format!(" {:<26}", member.role)),
            Span::styled(format!("x{} ", member.headcount()), theme.primary_style()),
            Span::styled(
                format!("{} ", text_bar(member.allocation_percent() as f64 / 100.0, 8)),
                theme.primary_style(),
            ),
            Span::styled(member.allocation.clone(), theme.muted_style()),
        ]));
    }
    lines.push(Line::from(""));

    let status = &project.current_status;
    lines.push(Line::from(Span::styled("Current Status", theme.title_style())));
    lines.push(Line::from(status.summary.clone()));
    lines.push(Line::from(""));
    bullet_section(&mut lines, "Achievements", &status.achievements, theme, "✓");

    if !status.risks.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Risks ({})", status.risks.len()),
            theme.title_style(),
        )));
        for risk in &status.risks {
            lines.push(Line::from(vec![
                Span::styled(format!(" [{}] ", risk.severity.label()), theme.severity_style(risk.severity)),
                Span::raw(risk.risk.clone()),
            ]));
            lines.push(Line::from(Span::styled(
                format!("     ↳ {}", risk.mitigation),
                theme.muted_style(),
            )));
        }
        lines.push(Line::from(""));
    }

    bullet_section(&mut lines, "Blockers", &status.blockers, theme, "✗");
    bullet_section(&mut lines, "Dependencies", &resources.dependencies, theme, "•");
    bullet_section(&mut lines, "Constraints", &resources.constraints, theme, "•");
    bullet_section(&mut lines, "Next Steps", &project.next_steps.planned, theme, "•");
    bullet_section(&mut lines, "Board Asks", &project.next_steps.board_asks, theme, "→");
    lines
}

fn render_detail(frame: &mut Frame, area: Rect, state: &DashboardState, theme: &Theme, pulse: f64) {
    let Some(project) = state.current_project() else {
        frame.render_widget(
            Paragraph::new("Project not found").block(panel("Project", theme, false)),
            area,
        );
        return;
    };

    let hero_height = state
        .indicators
        .labelled
        .first()
        .map(LabelledGauge::height)
        .unwrap_or(0);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(hero_height + 4),
            Constraint::Min(6),
        ])
        .split(area);

    let title = format!("{} {} - {}", project.emoji(), project.name, project.full_name);
    let hero = panel(&title, theme, true);
    let hero_inner = hero.inner(rows[0]);
    frame.render_widget(hero, rows[0]);

    let hero_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(hero_height)])
        .split(hero_inner);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(project.status.label(), theme.status_style(project.status)),
            Span::raw("  "),
            Span::styled(format!("{} priority", project.priority.label()), theme.priority_style(project.priority)),
            Span::raw("  "),
            Span::styled(
                format!(
                    "{} → {}",
                    format_month_year_long(&project.timeline.start),
                    format_month_year_long(&project.timeline.expected_delivery)
                ),
                theme.muted_style(),
            ),
        ])),
        hero_rows[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(project.description.as_str(), theme.muted_style())),
        hero_rows[1],
    );
    if let Some(overall) = state.indicators.labelled.first() {
        frame.render_widget(LabelledGauge::new(overall, theme).pulse(pulse), hero_rows[2]);
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let phase_count = project.timeline.phases.len() as u16;
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(phase_count * 3 + 2), Constraint::Min(4)])
        .split(body[0]);

    let phases_block = panel(
        &format!(
            "Timeline ({}/{} phases)",
            project.timeline.completed_phases(),
            project.timeline.phases.len()
        ),
        theme,
        false,
    );
    let phases_inner = phases_block.inner(left[0]);
    frame.render_widget(phases_block, left[0]);

    for (index, phase) in project.timeline.phases.iter().enumerate() {
        let y = phases_inner.y + index as u16 * 3;
        if y + 2 > phases_inner.bottom() {
            break;
        }
        let (marker, marker_style) = theme.phase_marker(phase.status);
        let caption = Rect::new(phases_inner.x, y, phases_inner.width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", marker), marker_style),
                Span::raw(phase.name.clone()),
            ])),
            caption,
        );

        if let Some(bar) = state.indicators.bars.get(index) {
            frame.render_widget(
                Paragraph::new(format!("{}%", bar.value().round() as i64)).alignment(Alignment::Right),
                caption,
            );
            let bar_area = Rect::new(phases_inner.x + 2, y + 1, phases_inner.width.saturating_sub(2), 1);
            frame.render_widget(ProgressGauge::new(bar, theme).pulse(pulse), bar_area);
        }
    }

    frame.render_widget(
        Paragraph::new(cost_lines(project, theme)).block(panel("Resource Costs", theme, false)),
        left[1],
    );

    frame.render_widget(
        Paragraph::new(detail_lines(project, theme))
            .wrap(Wrap { trim: false })
            .scroll((state.scroll, 0))
            .block(panel("Details", theme, false)),
        body[1],
    );
}

fn render_reports(frame: &mut Frame, area: Rect, state: &DashboardState, theme: &Theme, pulse: f64) {
    let totals = state.portfolio.executive_totals();
    let projects = &state.portfolio.projects;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(6)])
        .split(area);

    stat_row(
        frame,
        rows[0],
        &[
            ("Achievements", totals.achievements.to_string()),
            ("Risks", totals.risks.to_string()),
            ("Blockers", totals.blockers.to_string()),
            ("Board Asks", totals.board_asks.to_string()),
        ],
        theme,
    );

    if projects.is_empty() {
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, projects.len() as u32); projects.len()])
        .split(rows[1]);

    for (index, (project, column)) in projects.iter().zip(columns.iter()).enumerate() {
        let block = panel(&format!("{} {}", project.emoji(), project.name), theme, false);
        let inner = block.inner(*column);
        frame.render_widget(block, *column);

        let mut y = inner.y;
        if let Some(labelled) = state.indicators.labelled.get(index) {
            let height = LabelledGauge::height(labelled).min(inner.height);
            let gauge_area = Rect::new(inner.x, y, inner.width, height);
            frame.render_widget(LabelledGauge::new(labelled, theme).pulse(pulse), gauge_area);
            y += height + 1;
        }

        let status = &project.current_status;
        let mut lines = vec![
            Line::from(Span::styled(project.status.label(), theme.status_style(project.status))),
            Line::from(""),
        ];
        lines.extend(
            status
                .achievements
                .iter()
                .take(3)
                .map(|a| Line::from(Span::styled(format!("✓ {}", a), theme.success_style()))),
        );
        if status.achievements.len() > 3 {
            lines.push(Line::from(Span::styled(
                format!("  +{} more", status.achievements.len() - 3),
                theme.muted_style(),
            )));
        }
        lines.extend(status.risks.iter().map(|r| {
            Line::from(Span::styled(format!("⚠ {}", r.risk), theme.severity_style(r.severity)))
        }));
        lines.extend(
            project
                .next_steps
                .board_asks
                .iter()
                .map(|ask| Line::from(Span::styled(format!("→ {}", ask), theme.primary_style()))),
        );

        let text_area = Rect::new(inner.x, y, inner.width, inner.bottom().saturating_sub(y));
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), text_area);
    }
}

fn render_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup = centered_rect(60, 60, area);
    let keys = [
        ("Tab / Shift+Tab", "Next / previous screen"),
        ("↑ ↓", "Select project, scroll details"),
        ("← →", "Previous / next project"),
        ("Enter", "Open project"),
        ("1-3", "Jump to project"),
        ("Esc / Backspace", "Back"),
        ("r", "Replay animations"),
        ("q / Ctrl+C", "Quit"),
    ];
    let lines: Vec<Line> = keys
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("{:<18}", key), theme.shortcut_key_style()),
                Span::styled(*desc, theme.shortcut_desc_style()),
            ])
        })
        .collect();

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .style(theme.base_style())
            .block(panel("Keys", theme, true)),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::data::Portfolio;
    use ratatui::{backend::TestBackend, Terminal};

    fn still_state() -> DashboardState {
        let mut config = AppConfig::default();
        config.animation.enabled = false;
        DashboardState::new(Portfolio::bundled().unwrap(), &config)
    }

    fn render(state: &DashboardState) -> String {
        let layout = AppLayout::new(Theme::dark());
        let mut terminal = Terminal::new(TestBackend::new(140, 48)).unwrap();
        terminal
            .draw(|frame| render_ui(frame, state, &layout, 0.5))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_overview_screen() {
        let mut state = still_state();
        state.enter(Screen::Overview);
        let screen = render(&state);

        assert!(screen.contains("Fulers Technologies LLC"));
        assert!(screen.contains("Project Progress"));
        assert!(screen.contains("Avg Progress"));
        assert!(screen.contains("65%"));
        assert!(screen.contains("Upcoming Milestones"));
    }

    #[test]
    fn test_projects_screen() {
        let mut state = still_state();
        state.enter(Screen::Projects);
        let screen = render(&state);

        for project in &state.portfolio.projects {
            assert!(screen.contains(&project.name));
        }
        assert!(screen.contains("88% complete"));
    }

    #[test]
    fn test_detail_screen() {
        let mut state = still_state();
        state.enter(Screen::Detail(0));
        let screen = render(&state);

        assert!(screen.contains("Overall Progress"));
        assert!(screen.contains("Weekly Cost"));
        assert!(screen.contains("Resource Costs"));
    }

    fn plain(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_detail_lines_match_report_sections() {
        let portfolio = Portfolio::bundled().unwrap();
        let theme = Theme::dark();

        let ims = plain(&detail_lines(portfolio.project("ims").unwrap(), &theme));
        assert!(ims.contains("Features (2)"));
        assert!(ims.contains("Barcode scanning"));
        assert!(ims.contains("Strategy Foundation product"));
        assert!(ims.contains("• Stock ledger"));
        assert!(ims.contains("Constraints (1)"));
        assert!(ims.contains("Fixed go-live before Q4 peak season"));

        let mngo = plain(&detail_lines(portfolio.project("mngo").unwrap(), &theme));
        assert!(!mngo.contains("Features ("));
        assert!(!mngo.contains("Constraints ("));
    }

    #[test]
    fn test_reports_screen_and_help() {
        let mut state = still_state();
        state.enter(Screen::Reports);
        state.show_help = true;
        let screen = render(&state);

        assert!(screen.contains("Board Asks"));
        assert!(screen.contains("Replay animations"));
    }
}
