// tests/unit_detect.rs
use gatex_core::detect::Detector;
use gatex_core::graph::{ordered, Edge, Graph};
use gatex_core::pattern::PatternCatalog;

const C5: &str = "([(0,1),(1,2),(2,3),(3,4),(4,0)],[])";
const P5: &str = "([(0,1),(1,2),(2,3),(3,4)],[])";
const P4_K1: &str = "([(0,1),(1,2),(2,3)],[4])";

fn catalog(entries: &[&str]) -> PatternCatalog {
    PatternCatalog::from_manual(&entries.join("\n")).unwrap()
}

fn cycle_on(offset: u32, n: u32) -> Vec<Edge> {
    (0..n).map(|i| ordered(offset + i, offset + (i + 1) % n)).collect()
}

/// Deterministic pseudo-random graph.
fn scrambled(n: u32, seed: u64) -> Graph {
    let mut state = seed;
    let mut edges = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            if (state >> 33) % 2 == 0 {
                edges.push((u, v));
            }
        }
    }
    Graph::from_edges(0..n, &edges)
}

#[test]
fn two_disjoint_cycles_give_two_occurrences_in_order() {
    let cat = catalog(&[C5]);
    let mut edges = cycle_on(0, 5);
    edges.extend(cycle_on(5, 5));
    let host = Graph::from_edges(0..10, &edges);

    let found = Detector::new(&cat).find_occurrences(&host).unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].vertex_set(), vec![0, 1, 2, 3, 4]);
    assert_eq!(found[1].vertex_set(), vec![5, 6, 7, 8, 9]);
    for occ in &found {
        assert_eq!(occ.edges.len(), 5);
        assert!(occ.edges.iter().all(|&(u, v)| host.has_edge(u, v)));
    }
}

#[test]
fn detection_is_idempotent() {
    let cat = catalog(&[C5, P5]);
    let host = scrambled(9, 7);
    let detector = Detector::new(&cat);
    let first = detector.find_occurrences(&host).unwrap();
    let second = detector.find_occurrences(&host).unwrap();
    assert_eq!(first, second);
}

#[test]
fn results_do_not_depend_on_thread_count() {
    let cat = catalog(&[C5, P5]);
    let host = scrambled(9, 42);
    let run = |threads: usize| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
            .install(|| Detector::new(&cat).find_occurrences(&host).unwrap())
    };
    assert_eq!(run(1), run(4));
}

#[test]
fn free_vertex_must_be_isolated_in_the_host() {
    let cat = catalog(&[P4_K1]);
    let detector = Detector::new(&cat);

    let p4_plus_k1 = Graph::from_edges(0..5, &[(0, 1), (1, 2), (2, 3)]);
    let found = detector.find_occurrences(&p4_plus_k1).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].edges, vec![(0, 1), (1, 2), (2, 3)]);

    let p5 = Graph::from_edges(0..5, &[(4, 0), (0, 1), (1, 2), (2, 3)]);
    assert!(detector.find_occurrences(&p5).unwrap().is_empty());
}

#[test]
fn small_hosts_and_empty_catalogs_have_no_occurrences() {
    let cat = catalog(&[C5]);
    let tiny = Graph::from_edges(0..4, &cycle_on(0, 4));
    assert!(Detector::new(&cat).find_occurrences(&tiny).unwrap().is_empty());

    let empty = PatternCatalog::new();
    let host = Graph::from_edges(0..5, &cycle_on(0, 5));
    assert!(Detector::new(&empty).is_compliant(&host).unwrap());
}

#[test]
fn mapping_realizes_the_pattern() {
    let cat = catalog(&[P5]);
    let host = Graph::from_edges(0..5, &[(0, 2), (2, 4), (4, 1), (1, 3)]);
    let found = Detector::new(&cat).find_occurrences(&host).unwrap();
    assert_eq!(found.len(), 1);
    let pattern = cat.get(found[0].pattern).unwrap();
    for (a, b) in pattern.graph().edges() {
        let (u, v) = (found[0].mapping[a], found[0].mapping[b]);
        assert!(host.has_edge(u, v));
    }
}
