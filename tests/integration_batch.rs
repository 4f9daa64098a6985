// tests/integration_batch.rs
//! Batch repair end to end: parse, repair, report.

use std::fs;

use gatex_core::batch::{self, GraphOutcome, RepairRequest};
use gatex_core::detect::Detector;
use gatex_core::edit::{ConstraintScope, EditMode, GoodLpSolver, IlpModel, MilpSolver, Strategy};
use gatex_core::graph::adjlist;
use gatex_core::pattern::PatternCatalog;
use gatex_core::report::FileReportSink;
use gatex_core::GatexError;

const BATCH: &str = "\
# C5
0 1 4
1 2
2 3
3 4

# C6
0 1 5
1 2
2 3
3 4
4 5
";

struct OfflineSolver;

impl MilpSolver for OfflineSolver {
    fn solve(&self, _model: &IlpModel<'_>) -> Result<Vec<bool>, GatexError> {
        Err(GatexError::SolverUnavailable("backend offline".into()))
    }
}

fn c5_catalog() -> PatternCatalog {
    PatternCatalog::from_graph6("Dhc\n").unwrap()
}

fn request(strategy: Strategy, mode: EditMode) -> RepairRequest {
    RepairRequest {
        strategy,
        mode,
        scope: ConstraintScope::Lazy,
    }
}

#[test]
fn exact_batch_repairs_and_reports_in_order() {
    let catalog = c5_catalog();
    let detector = Detector::new(&catalog);
    let graphs = adjlist::parse_batch(BATCH).unwrap();
    let outcomes = batch::repair_batch(
        graphs,
        &detector,
        &GoodLpSolver,
        request(Strategy::Exact, EditMode::Edit),
    )
    .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(GraphOutcome::is_clean));
    let GraphOutcome::Repaired(first) = &outcomes[0] else {
        panic!("first graph should be repaired");
    };
    assert_eq!(first.index, 0);
    assert_eq!(first.plan.len(), 1);
    let GraphOutcome::Repaired(second) = &outcomes[1] else {
        panic!("second graph should be repaired");
    };
    assert!(second.plan.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");
    let mut sink = FileReportSink::new(&path);
    batch::record_outcomes(&outcomes, &mut sink).unwrap();
    batch::record_outcomes(&outcomes, &mut sink).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.matches("Original Graph:").count(), 4, "reports append");
    let blocks: Vec<&str> = text.split("Original Graph:\n").filter(|b| !b.is_empty()).collect();
    assert!(blocks[0].starts_with("0 1 4\n1 2\n2 3\n3 4\n4\n\nUpdated Graph:\n"));
    assert!(blocks[1].ends_with("Changed Edges:\n\n\n"));
}

#[test]
fn infeasible_graph_does_not_stop_the_batch() {
    let catalog = PatternCatalog::from_graph6("D~{\n").unwrap();
    let detector = Detector::new(&catalog);
    let k5 = "0 1 2 3 4\n1 2 3 4\n2 3 4\n3 4\n";
    let graphs = adjlist::parse_batch(&format!("{k5}\n{BATCH}")).unwrap();
    assert_eq!(graphs.len(), 3);

    let outcomes = batch::repair_batch(
        graphs,
        &detector,
        &GoodLpSolver,
        request(Strategy::Exact, EditMode::Add),
    )
    .unwrap();
    assert!(matches!(
        outcomes[0],
        GraphOutcome::Infeasible {
            index: 0,
            mode: EditMode::Add
        }
    ));
    assert!(outcomes[1].is_clean() && outcomes[2].is_clean());

    let mut sink: Vec<String> = Vec::new();
    batch::record_outcomes(&outcomes, &mut sink).unwrap();
    assert_eq!(sink.len(), 2);
}

#[test]
fn heuristic_batch_and_check_summaries() {
    let catalog = c5_catalog();
    let detector = Detector::new(&catalog);
    let graphs = adjlist::parse_batch(BATCH).unwrap();

    let summaries = batch::check_batch(&graphs, &detector).unwrap();
    assert_eq!(summaries[0].occurrences.len(), 1);
    assert!(summaries[1].is_compliant());
    let json = serde_json::to_value(&summaries).unwrap();
    assert_eq!(json[0]["vertices"], 5);

    let outcomes = batch::repair_batch(
        graphs,
        &detector,
        &GoodLpSolver,
        request(Strategy::Heuristic, EditMode::Delete),
    )
    .unwrap();
    let GraphOutcome::Repaired(first) = &outcomes[0] else {
        panic!("heuristic never reports infeasibility");
    };
    assert_eq!(first.plan.removed, vec![(0, 1)]);
}

#[test]
fn heuristic_add_request_is_rejected() {
    let catalog = c5_catalog();
    let detector = Detector::new(&catalog);
    let err = batch::repair_batch(
        Vec::new(),
        &detector,
        &GoodLpSolver,
        request(Strategy::Heuristic, EditMode::Add),
    )
    .unwrap_err();
    assert!(matches!(err, GatexError::Config(_)));
}

#[test]
fn solver_failure_aborts_the_batch() {
    let catalog = c5_catalog();
    let detector = Detector::new(&catalog);
    let graphs = adjlist::parse_batch(BATCH).unwrap();
    let result = batch::repair_batch(
        graphs,
        &detector,
        &OfflineSolver,
        request(Strategy::Exact, EditMode::Edit),
    );
    match result {
        Err(GatexError::SolverUnavailable(reason)) => assert_eq!(reason, "backend offline"),
        other => panic!("expected a solver error, got {other:?}"),
    }
}
