//! Plain-text reports for the CLI
//!
//! [`cost_rows`] flattens a cost breakdown into display rows; the TUI styles
//! the same rows that the text reports print.

use std::fmt::Write;

use crate::data::format::{format_amount, format_money, format_month_year, format_month_year_long, format_rate};
use crate::data::{CostSection, CostSummary, Costs, Money, Portfolio, Project};
use crate::ui::layout::{pluralize, text_bar};

const BAR_WIDTH: usize = 30;

/// One row of a rendered cost breakdown
#[derive(Debug, Clone, PartialEq)]
pub enum CostRow {
    Section(&'static str),
    Figure {
        label: &'static str,
        amount: String,
        usd: Option<String>,
    },
    Item {
        label: String,
        rate: String,
    },
    Subtotal {
        amount: String,
        usd: Option<String>,
    },
}

fn figure(label: &'static str, money: &Money, unit: &str) -> CostRow {
    let (amount, usd) = format_money(money, unit);
    CostRow::Figure { label, amount, usd }
}

fn subtotal(money: &Money, unit: &str) -> CostRow {
    let (amount, usd) = format_money(money, unit);
    CostRow::Subtotal { amount, usd }
}

fn summary_amount(summary: &CostSummary) -> (String, Option<String>) {
    match summary {
        CostSummary::Total {
            total,
            period: Some(period),
        } => {
            let (amount, usd) = format_money(total, "");
            (format!("{} ({})", amount, period), usd)
        }
        other => format_money(&other.subtotal(), other.unit()),
    }
}

fn section_rows(rows: &mut Vec<CostRow>, title: &'static str, section: &CostSection) {
    if section.items.is_empty() && section.subtotal.is_none() {
        return;
    }
    rows.push(CostRow::Section(title));
    rows.extend(section.items.iter().map(|item| CostRow::Item {
        label: item.label.clone(),
        rate: format_rate(&item.rate),
    }));
    if let Some(money) = &section.subtotal {
        rows.push(subtotal(money, "/mo"));
    }
}

/// Headline figures, then one block per cost section
pub fn cost_rows(costs: &Costs) -> Vec<CostRow> {
    let mut rows = Vec::new();

    match &costs.summary {
        Some(CostSummary::Weekly { weekly, monthly }) => {
            rows.push(figure("Weekly Cost", weekly, "/week"));
            if let Some(monthly) = monthly {
                rows.push(figure("Monthly Cost", monthly, "/mo"));
            }
        }
        Some(CostSummary::Monthly { monthly }) => {
            rows.push(figure("Monthly Cost", monthly, "/mo"));
        }
        Some(summary @ CostSummary::Total { .. }) => {
            let (amount, usd) = summary_amount(summary);
            rows.push(CostRow::Figure {
                label: "Cost",
                amount,
                usd,
            });
        }
        None => {}
    }

    if let Some(total) = &costs.total_project {
        rows.push(figure("Total Project Cost", total, ""));
    }

    if !costs.personnel.is_empty() {
        rows.push(CostRow::Section("Personnel"));
        rows.extend(costs.personnel.iter().map(|item| CostRow::Item {
            label: item.label.clone(),
            rate: format_rate(&item.rate),
        }));
        if let Some(summary) = &costs.summary {
            let (amount, usd) = summary_amount(summary);
            rows.push(CostRow::Subtotal { amount, usd });
        }
    }

    if let Some(section) = &costs.fuelers_personnel {
        section_rows(&mut rows, "Fuelers Personnel", section);
    }
    if let Some(section) = &costs.infrastructure {
        section_rows(&mut rows, "Infrastructure", section);
    }
    if let Some(section) = &costs.software {
        section_rows(&mut rows, "Software", section);
    }

    rows
}

fn write_cost_rows(out: &mut String, rows: &[CostRow]) {
    for row in rows {
        let _ = match row {
            CostRow::Section(title) => writeln!(out, "\n  {}", title),
            CostRow::Figure { label, amount, usd } => match usd {
                Some(usd) => writeln!(out, "  {:<20} {}  {}", label, amount, usd),
                None => writeln!(out, "  {:<20} {}", label, amount),
            },
            CostRow::Item { label, rate } => writeln!(out, "    {:<28} {}", label, rate),
            CostRow::Subtotal { amount, usd } => match usd {
                Some(usd) => writeln!(out, "    {:<28} {}  {}", "Subtotal", amount, usd),
                None => writeln!(out, "    {:<28} {}", "Subtotal", amount),
            },
        };
    }
}

fn write_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{} ({})", title, items.len());
    for item in items {
        let _ = writeln!(out, "  • {}", item);
    }
}

/// Executive summary across the whole portfolio
pub fn executive_summary(portfolio: &Portfolio) -> String {
    let mut out = String::new();
    let stats = portfolio.stats();
    let totals = portfolio.executive_totals();

    let _ = writeln!(out, "{} — Executive Summary", portfolio.company.name);
    let _ = writeln!(out, "{}\n", portfolio.company.description);
    let _ = writeln!(
        out,
        "Projects: {}   Active: {}   Average progress: {}%   Team members: {}",
        stats.total_projects, stats.active_projects, stats.average_progress, stats.team_members
    );
    let _ = writeln!(
        out,
        "Achievements: {}   Risks: {}   Blockers: {}   Board asks: {}",
        totals.achievements, totals.risks, totals.blockers, totals.board_asks
    );

    let _ = writeln!(out, "\nProject Status");
    for share in &stats.status_breakdown {
        let _ = writeln!(
            out,
            "  {:<16} {} {}",
            share.status.label(),
            text_bar(share.percent / 100.0, 20),
            pluralize(share.count, "project")
        );
    }

    for project in &portfolio.projects {
        let _ = writeln!(out, "\n{} - {}", project.name, project.full_name);
        let _ = writeln!(
            out,
            "  {:<16} {} {:>3}%",
            project.status.label(),
            text_bar(project.progress / 100.0, BAR_WIDTH),
            project.progress.round() as i64
        );
        let _ = writeln!(
            out,
            "  {} → {}   Team: {}   Resources: {}",
            format_month_year(&project.timeline.start),
            format_month_year(&project.timeline.expected_delivery),
            project.resources.headcount(),
            project.resources.resource_level.label()
        );

        let achievements = &project.current_status.achievements;
        for achievement in achievements.iter().take(3) {
            let _ = writeln!(out, "  ✓ {}", achievement);
        }
        if achievements.len() > 3 {
            let _ = writeln!(out, "  +{} more", achievements.len() - 3);
        }
        for risk in &project.current_status.risks {
            let _ = writeln!(out, "  ⚠ [{}] {}", risk.severity.label(), risk.risk);
        }
        for ask in &project.next_steps.board_asks {
            let _ = writeln!(out, "  → {}", ask);
        }
    }

    out
}

/// Full report for one project
pub fn project_report(project: &Project) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {} - {}   [{}] [{}]",
        project.emoji(),
        project.name,
        project.full_name,
        project.status.label(),
        project.priority.label()
    );
    let _ = writeln!(out, "{}", project.description);
    let _ = writeln!(
        out,
        "\nOverall Progress {} {}%",
        text_bar(project.progress / 100.0, BAR_WIDTH),
        project.progress.round() as i64
    );

    let overview = &project.overview;
    let _ = writeln!(out, "\nProblem: {}", overview.problem);
    let _ = writeln!(out, "Value: {}", overview.value_proposition);
    let _ = writeln!(out, "Strategic importance: {}", overview.strategic_importance);
    if !overview.target_users.is_empty() {
        let _ = writeln!(out, "Target users: {}", overview.target_users.join(", "));
    }

    if !project.features.is_empty() {
        let _ = writeln!(out, "\nFeatures ({})", project.features.len());
        for feature in &project.features {
            let _ = writeln!(out, "  • {}: {}", feature.title, feature.description);
        }
    }

    let timeline = &project.timeline;
    let _ = writeln!(
        out,
        "\nTimeline: {} → {} ({}/{} phases complete)",
        format_month_year_long(&timeline.start),
        format_month_year_long(&timeline.expected_delivery),
        timeline.completed_phases(),
        timeline.phases.len()
    );
    for phase in &timeline.phases {
        let _ = writeln!(
            out,
            "  {:<28} {} {:>3}%",
            phase.name,
            text_bar(phase.completion / 100.0, 20),
            phase.completion.round() as i64
        );
        for deliverable in &phase.deliverables {
            let _ = writeln!(out, "    • {}", deliverable);
        }
    }

    let resources = &project.resources;
    let _ = writeln!(
        out,
        "\nTeam ({}, {} resourcing)",
        pluralize(resources.headcount() as usize, "member"),
        resources.resource_level.label()
    );
    for member in &resources.team {
        let _ = writeln!(
            out,
            "  {:<28} x{} {} ({}%)",
            member.role,
            member.headcount(),
            member.allocation,
            member.allocation_percent()
        );
    }
    write_list(&mut out, "Dependencies", &resources.dependencies);
    write_list(&mut out, "Constraints", &resources.constraints);

    if let Some(costs) = &resources.costs {
        let _ = writeln!(out, "\nResource Costs");
        write_cost_rows(&mut out, &cost_rows(costs));
    }

    let status = &project.current_status;
    let _ = writeln!(out, "\nCurrent Status: {}", status.summary);
    write_list(&mut out, "Achievements", &status.achievements);
    if !status.risks.is_empty() {
        let _ = writeln!(out, "\nRisks ({})", status.risks.len());
        for risk in &status.risks {
            let _ = writeln!(out, "  [{}] {}", risk.severity.label(), risk.risk);
            let _ = writeln!(out, "      Mitigation: {}", risk.mitigation);
        }
    }
    write_list(&mut out, "Blockers", &status.blockers);
    write_list(&mut out, "Planned", &project.next_steps.planned);
    write_list(&mut out, "Board Asks", &project.next_steps.board_asks);

    let _ = write!(out, "\nTotal project cost: ");
    let _ = match resources.costs.as_ref().and_then(|c| c.total_project) {
        Some(total) => writeln!(out, "AED {}", format_amount(total.aed)),
        None => writeln!(out, "n/a"),
    };

    out
}
