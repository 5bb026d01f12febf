//! Portfolio documents
//!
//! The board reads one company document and one document per project. The
//! documents ship inside the binary; a data directory with the same file
//! names can replace them at startup.
//!
//! Fields the documents leave out deserialize to blank values, so a sparse
//! project file still renders.
//!
//! ```
//! use board::data::Portfolio;
//!
//! let portfolio = Portfolio::bundled().unwrap();
//! let ims = portfolio.project("ims").unwrap();
//! assert_eq!(ims.full_name, "Inventory Management System");
//! ```

pub mod costs;
pub mod format;
pub mod stats;

use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use costs::{CostItem, CostSection, CostSummary, Costs, Money, Rate};
pub use stats::{ExecutiveTotals, PortfolioStats, StatusShare};

/// Project ids in presentation order
pub const PROJECT_IDS: [&str; 3] = ["ims", "mngo", "ai-vision"];

/// Brand color used when a project does not declare one
pub const DEFAULT_BRAND_COLOR: &str = "#1D4DFF";

const BUNDLED_COMPANY: &str = include_str!("../../data/company.json");
const BUNDLED_PROJECTS: [(&str, &str); 3] = [
    ("ims", include_str!("../../data/ims.json")),
    ("mngo", include_str!("../../data/mngo.json")),
    ("ai-vision", include_str!("../../data/ai-vision.json")),
];

/// Errors raised while loading portfolio documents
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown project: {0}")]
    UnknownProject(String),
}

/// Company metadata shown in the hero section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub focus: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    Planning,
    #[serde(rename = "Near Completion")]
    NearCompletion,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ProjectStatus {
    /// Statuses counted in the status breakdown, in display order
    pub const TRACKED: [ProjectStatus; 3] = [
        ProjectStatus::InProgress,
        ProjectStatus::Planning,
        ProjectStatus::NearCompletion,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Planning => "Planning",
            Self::NearCompletion => "Near Completion",
            Self::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseStatus {
    Completed,
    InProgress,
    Upcoming,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ResourceLevel {
    Heavy,
    Medium,
    Light,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ResourceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Heavy => "Heavy",
            Self::Medium => "Medium",
            Self::Light => "Light",
            Self::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Overview {
    pub problem: String,
    pub value_proposition: String,
    pub strategic_importance: String,
    pub target_users: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Feature {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Phase {
    pub name: String,
    pub status: PhaseStatus,
    pub completion: f64,
    pub deliverables: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Timeline {
    pub start: String,
    pub expected_delivery: String,
    pub phases: Vec<Phase>,
}

impl Timeline {
    pub fn completed_phases(&self) -> usize {
        self.phases
            .iter()
            .filter(|p| p.status == PhaseStatus::Completed)
            .count()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    pub role: String,
    pub allocation: String,
    pub count: Option<u32>,
}

impl TeamMember {
    /// Headcount for this row (rows without a count are one person)
    pub fn headcount(&self) -> u32 {
        self.count.unwrap_or(1)
    }

    /// Allocation as a percentage of a full-time position
    pub fn allocation_percent(&self) -> u8 {
        match self.allocation.as_str() {
            "full-time" => 100,
            "part-time" => 50,
            _ => 25,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resources {
    pub resource_level: ResourceLevel,
    #[serde(deserialize_with = "skip_nulls")]
    pub team: Vec<TeamMember>,
    pub dependencies: Vec<String>,
    pub constraints: Vec<String>,
    pub costs: Option<Costs>,
}

impl Resources {
    pub fn headcount(&self) -> u32 {
        self.team.iter().map(TeamMember::headcount).sum()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Risk {
    pub risk: String,
    pub severity: Severity,
    pub mitigation: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CurrentStatus {
    pub summary: String,
    pub achievements: Vec<String>,
    pub risks: Vec<Risk>,
    pub blockers: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NextSteps {
    pub planned: Vec<String>,
    pub board_asks: Vec<String>,
}

/// One project record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub progress: f64,
    pub priority: Priority,
    pub brand_color: Option<String>,
    pub overview: Overview,
    pub features: Vec<Feature>,
    pub timeline: Timeline,
    pub resources: Resources,
    pub current_status: CurrentStatus,
    pub next_steps: NextSteps,
}

impl Project {
    pub fn brand_color(&self) -> &str {
        self.brand_color.as_deref().unwrap_or(DEFAULT_BRAND_COLOR)
    }

    pub fn emoji(&self) -> &'static str {
        match self.id.as_str() {
            "mngo" => "🎫",
            "ai-vision" => "📹",
            _ => "🔍",
        }
    }
}

/// Company plus its projects, in presentation order
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub company: Company,
    pub projects: Vec<Project>,
}

impl Portfolio {
    /// Parse the documents compiled into the binary
    pub fn bundled() -> Result<Self, DataError> {
        let company = parse("company.json", BUNDLED_COMPANY)?;
        let projects = BUNDLED_PROJECTS
            .iter()
            .map(|(id, json)| parse(&format!("{}.json", id), json))
            .collect::<Result<Vec<Project>, _>>()?;

        Ok(Self { company, projects })
    }

    /// Read `company.json` and one `<id>.json` per project from a directory
    pub fn from_dir(dir: &Path) -> Result<Self, DataError> {
        let company = read_document(&dir.join("company.json"))?;
        let projects = PROJECT_IDS
            .iter()
            .map(|id| read_document(&dir.join(format!("{}.json", id))))
            .collect::<Result<Vec<Project>, _>>()?;

        tracing::debug!("Loaded {} projects from {:?}", projects.len(), dir);
        Ok(Self { company, projects })
    }

    /// Load from `data_dir` when given, otherwise the bundled documents
    pub fn load(data_dir: Option<&Path>) -> Result<Self, DataError> {
        match data_dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::bundled(),
        }
    }

    pub fn project(&self, id: &str) -> Result<&Project, DataError> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| DataError::UnknownProject(id.to_string()))
    }

    pub fn stats(&self) -> PortfolioStats {
        PortfolioStats::from_projects(&self.projects)
    }

    pub fn executive_totals(&self) -> ExecutiveTotals {
        ExecutiveTotals::from_projects(&self.projects)
    }
}

fn parse<T: for<'de> Deserialize<'de>>(name: &str, json: &str) -> Result<T, DataError> {
    serde_json::from_str(json).map_err(|source| DataError::Parse {
        name: name.to_string(),
        source,
    })
}

fn read_document<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, DataError> {
    let content = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&path.display().to_string(), &content)
}

/// Team lists may contain `null` placeholders; they are dropped.
fn skip_nulls<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Vec<Option<T>> = Deserialize::deserialize(deserializer)?;
    Ok(items.into_iter().flatten().collect())
}
