//! Derived portfolio figures

use super::{Project, ProjectStatus};

/// Share of the portfolio in one status
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusShare {
    pub status: ProjectStatus,
    pub count: usize,
    /// Percentage of all projects, 0-100
    pub percent: f64,
}

/// Headline numbers for the overview cards
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioStats {
    pub total_projects: usize,
    pub active_projects: usize,
    pub average_progress: u32,
    pub team_members: u32,
    pub status_breakdown: Vec<StatusShare>,
}

impl PortfolioStats {
    pub fn from_projects(projects: &[Project]) -> Self {
        let total = projects.len();
        let count_status = |status| projects.iter().filter(|p| p.status == status).count();

        let average_progress = if total == 0 {
            0
        } else {
            let sum: f64 = projects.iter().map(|p| p.progress).sum();
            (sum / total as f64).round() as u32
        };

        let status_breakdown = ProjectStatus::TRACKED
            .iter()
            .map(|&status| {
                let count = count_status(status);
                let percent = if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64 * 100.0
                };
                StatusShare {
                    status,
                    count,
                    percent,
                }
            })
            .collect();

        Self {
            total_projects: total,
            active_projects: count_status(ProjectStatus::InProgress),
            average_progress,
            team_members: projects.iter().map(|p| p.resources.headcount()).sum(),
            status_breakdown,
        }
    }
}

/// Counts for the executive summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutiveTotals {
    pub achievements: usize,
    pub risks: usize,
    pub blockers: usize,
    pub board_asks: usize,
}

impl ExecutiveTotals {
    pub fn from_projects(projects: &[Project]) -> Self {
        projects.iter().fold(Self::default(), |acc, p| Self {
            achievements: acc.achievements + p.current_status.achievements.len(),
            risks: acc.risks + p.current_status.risks.len(),
            blockers: acc.blockers + p.current_status.blockers.len(),
            board_asks: acc.board_asks + p.next_steps.board_asks.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Resources, TeamMember};

    fn project(status: ProjectStatus, progress: f64, team: Vec<TeamMember>) -> Project {
        Project {
            status,
            progress,
            resources: Resources {
                team,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn member(count: Option<u32>) -> TeamMember {
        TeamMember {
            role: "Engineer".to_string(),
            allocation: "full-time".to_string(),
            count,
        }
    }

    #[test]
    fn test_portfolio_stats() {
        let projects = vec![
            project(ProjectStatus::InProgress, 65.0, vec![member(Some(2)), member(None)]),
            project(ProjectStatus::NearCompletion, 88.0, vec![member(Some(2))]),
            project(ProjectStatus::Planning, 20.0, vec![member(None)]),
        ];
        let stats = PortfolioStats::from_projects(&projects);

        assert_eq!(stats.total_projects, 3);
        assert_eq!(stats.active_projects, 1);
        // (65 + 88 + 20) / 3 = 57.67
        assert_eq!(stats.average_progress, 58);
        assert_eq!(stats.team_members, 6);

        let statuses: Vec<ProjectStatus> =
            stats.status_breakdown.iter().map(|s| s.status).collect();
        assert_eq!(statuses, ProjectStatus::TRACKED);
        assert!(stats.status_breakdown.iter().all(|s| s.count == 1));
    }

    #[test]
    fn test_empty_portfolio() {
        let stats = PortfolioStats::from_projects(&[]);
        assert_eq!(stats.average_progress, 0);
        assert!(stats.status_breakdown.iter().all(|s| s.percent == 0.0));
    }

    #[test]
    fn test_executive_totals() {
        let mut p = Project::default();
        p.current_status.achievements = vec!["a".into(), "b".into()];
        p.current_status.blockers = vec!["x".into()];
        p.next_steps.board_asks = vec!["ask".into()];

        let totals = ExecutiveTotals::from_projects(&[p.clone(), p]);
        assert_eq!(
            totals,
            ExecutiveTotals {
                achievements: 4,
                risks: 0,
                blockers: 2,
                board_asks: 2,
            }
        );
    }
}
