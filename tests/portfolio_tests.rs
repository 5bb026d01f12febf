//! Integration tests for loading portfolio documents and printing reports

use board::data::{CostSummary, DataError, Portfolio, ProjectStatus};
use board::report;
use std::fs;
use std::path::Path;

fn write_bundled_copy(dir: &Path) {
    for name in ["company", "ims", "mngo", "ai-vision"] {
        let source = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("data")
            .join(format!("{}.json", name));
        fs::copy(&source, dir.join(format!("{}.json", name))).unwrap();
    }
}

#[test]
fn test_bundled_portfolio() {
    let portfolio = Portfolio::bundled().unwrap();
    assert_eq!(portfolio.projects.len(), 3);

    let stats = portfolio.stats();
    assert_eq!(stats.total_projects, 3);
    assert_eq!(stats.active_projects, 1);
    assert_eq!(stats.average_progress, 58);

    let mngo = portfolio.project("mngo").unwrap();
    assert_eq!(mngo.status, ProjectStatus::NearCompletion);
    assert!(matches!(
        mngo.resources.costs.as_ref().unwrap().summary,
        Some(CostSummary::Monthly { .. })
    ));
}

#[test]
fn test_load_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_bundled_copy(dir.path());

    // A sparse project document still loads
    fs::write(
        dir.path().join("ai-vision.json"),
        r#"{"id": "ai-vision", "name": "AI Vision", "status": "On Hold", "progress": 5}"#,
    )
    .unwrap();

    let portfolio = Portfolio::load(Some(dir.path())).unwrap();
    let vision = portfolio.project("ai-vision").unwrap();
    assert_eq!(vision.status, ProjectStatus::Unknown);
    assert_eq!(vision.progress, 5.0);
    assert!(vision.resources.costs.is_none());
    assert_eq!(vision.brand_color(), "#1D4DFF");
}

#[test]
fn test_missing_document() {
    let dir = tempfile::tempdir().unwrap();
    let err = Portfolio::from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, DataError::Io { .. }));
}

#[test]
fn test_malformed_document() {
    let dir = tempfile::tempdir().unwrap();
    write_bundled_copy(dir.path());
    fs::write(dir.path().join("ims.json"), "{ not json").unwrap();

    let err = Portfolio::from_dir(dir.path()).unwrap_err();
    assert!(matches!(&err, DataError::Parse { name, .. } if name.ends_with("ims.json")));
}

#[test]
fn test_unknown_project() {
    let portfolio = Portfolio::bundled().unwrap();
    let err = portfolio.project("nope").unwrap_err();
    assert_eq!(err.to_string(), "Unknown project: nope");
}

#[test]
fn test_reports_cover_every_project() {
    let portfolio = Portfolio::bundled().unwrap();
    let summary = report::executive_summary(&portfolio);
    assert!(summary.starts_with("Fulers Technologies LLC"));

    for project in &portfolio.projects {
        let text = report::project_report(project);
        assert!(text.contains(&project.full_name));
        assert!(text.contains("Overall Progress"));
    }
}
