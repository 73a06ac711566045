//! End-to-end meta-path scenarios against the adjacency-list fixture.

mod common;

use common::{AdjacencyListGraph, bibliography, three_node_path};
use metagraph_common::types::{EdgeTypeId, LabelId, NodeId};
use metagraph_common::utils::error::Error;
use metagraph_core::graph::{Direction, HeterogeneousGraph};
use metagraph_engine::{
    Config, Counts, EnumerationConfig, EnumerationRequest, LengthMode, MemorySink, MetaPath,
    MetaPathEngine, MetaPathSet,
};

fn keys(set: &MetaPathSet) -> Vec<&str> {
    set.iter().map(MetaPath::as_str).collect()
}

fn pair(start: u32, end: u32) -> EnumerationRequest {
    EnumerationRequest::Pair {
        start: NodeId::new(start),
        end: NodeId::new(end),
    }
}

fn engine(graph: &AdjacencyListGraph) -> MetaPathEngine<'_, AdjacencyListGraph> {
    MetaPathEngine::new(graph, Config::single_threaded()).unwrap()
}

// --- Path scenarios ---

#[test]
fn simple_path_yields_single_meta_path() {
    let graph = three_node_path(&[2]);
    let result = engine(&graph)
        .enumerate(&pair(0, 2), &EnumerationConfig::new(2))
        .unwrap();
    assert_eq!(keys(&result.meta_paths), vec!["1|0|2|0|1"]);
}

#[test]
fn multi_label_node_expands_cartesian() {
    let graph = three_node_path(&[2, 3]);
    let result = engine(&graph)
        .enumerate(&pair(0, 2), &EnumerationConfig::new(2))
        .unwrap();
    assert_eq!(keys(&result.meta_paths), vec!["1|0|2|0|1", "1|0|3|0|1"]);
}

#[test]
fn unreachable_within_length_is_empty_not_error() {
    let graph = three_node_path(&[2]);
    let result = engine(&graph)
        .enumerate(&pair(0, 2), &EnumerationConfig::new(1))
        .unwrap();
    assert!(result.meta_paths.is_empty());
}

#[test]
fn directed_view_respects_edge_direction() {
    let graph = three_node_path(&[2]);
    let engine = MetaPathEngine::new(
        &graph,
        Config::single_threaded().with_direction(Direction::Outgoing),
    )
    .unwrap();

    let forward = engine.enumerate(&pair(0, 2), &EnumerationConfig::new(2)).unwrap();
    assert_eq!(forward.meta_paths.len(), 1);

    let backward = engine.enumerate(&pair(2, 0), &EnumerationConfig::new(2)).unwrap();
    assert!(backward.meta_paths.is_empty());
}

#[test]
fn unknown_start_node_fails() {
    let graph = three_node_path(&[2]);
    let err = engine(&graph)
        .enumerate(&pair(11, 2), &EnumerationConfig::new(2))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownNode(NodeId(11))));
}

#[test]
fn invalid_probability_rejected_before_work() {
    let graph = three_node_path(&[2]);
    let config = EnumerationConfig::new(2).with_edge_skip_probability(2.0);
    let err = engine(&graph).enumerate(&pair(0, 2), &config).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidParameter {
            name: "edge_skip_probability",
            ..
        }
    ));
}

// --- Length bound and expansion ---

#[test]
fn exact_mode_keys_have_two_k_plus_one_tokens() {
    let graph = bibliography();
    for k in 1..=4 {
        let config = EnumerationConfig::new(k).with_length_mode(LengthMode::Exact);
        let result = engine(&graph)
            .enumerate(&EnumerationRequest::WholeGraph { range: None }, &config)
            .unwrap();
        assert!(!result.meta_paths.is_empty());
        for path in &result.meta_paths {
            assert_eq!(path.token_count(), 2 * k + 1, "{path} at k = {k}");
        }
    }
}

#[test]
fn up_to_mode_never_exceeds_bound() {
    let graph = bibliography();
    let result = engine(&graph)
        .enumerate(
            &EnumerationRequest::From { start: NodeId::new(1) },
            &EnumerationConfig::new(3),
        )
        .unwrap();
    assert!(result.meta_paths.iter().all(|path| path.token_count() <= 7));
    assert!(result.meta_paths.iter().any(|path| path.hops() == 1));
    assert!(result.meta_paths.iter().any(|path| path.hops() == 3));
}

#[test]
fn every_label_combination_of_a_walk_is_present() {
    // Node 1 carries {Author, Reviewer}; 1 -WROTE- 3 -PUBLISHED_IN- 6.
    let graph = bibliography();
    let result = engine(&graph)
        .enumerate(&pair(1, 6), &EnumerationConfig::new(2))
        .unwrap();
    assert!(result.meta_paths.contains(&MetaPath::parse("0|0|1|1|2").unwrap()));
    assert!(result.meta_paths.contains(&MetaPath::parse("3|0|1|1|2").unwrap()));
}

#[test]
fn whole_graph_independent_of_thread_count() {
    let graph = bibliography();
    let request = EnumerationRequest::WholeGraph { range: None };
    let config = EnumerationConfig::new(3).with_edge_skip_probability(0.3);

    let single = engine(&graph).enumerate(&request, &config).unwrap();
    let parallel = MetaPathEngine::new(&graph, Config::default().with_threads(8))
        .unwrap()
        .enumerate(&request, &config)
        .unwrap();
    assert_eq!(single, parallel);
}

#[test]
fn edge_list_mode_searches_each_pair() {
    let graph = bibliography();
    let request = EnumerationRequest::Pairs(vec![
        (NodeId::new(0), NodeId::new(1)),
        (NodeId::new(3), NodeId::new(7)),
    ]);
    let sink = MemorySink::new();
    let result = engine(&graph)
        .enumerate_with_sink(&request, &EnumerationConfig::new(3), &sink)
        .unwrap();

    assert_eq!(result.pairs_processed, 2);
    assert_eq!(sink.len(), 2);
    let co_authors = sink.get("MetaPaths-3-0.0_0_1.txt").unwrap();
    assert!(co_authors.contains(&MetaPath::parse("0|0|1|0|0").unwrap()));
    assert!(co_authors.contains(&MetaPath::parse("0|0|1|0|3").unwrap()));
}

// --- Counting ---

#[test]
fn exact_counts_include_unseen_targets() {
    let graph = three_node_path(&[2, 3]);
    let targets = MetaPath::parse_all(["1|0|2|0|1", "1|0|3|0|1", "2|0|2"]).unwrap();
    let counts = engine(&graph)
        .count(&pair(0, 2), &EnumerationConfig::new(2), &targets)
        .unwrap();

    let Counts::Exact(counts) = counts else {
        panic!("expected exact counts");
    };
    assert_eq!(counts.len(), 3);
    assert_eq!(counts[&MetaPath::parse("1|0|2|0|1").unwrap()], 1);
    assert_eq!(counts[&MetaPath::parse("1|0|3|0|1").unwrap()], 1);
    assert_eq!(counts[&MetaPath::parse("2|0|2").unwrap()], 0);
}

#[test]
fn approximate_counts_are_finite_and_non_negative() {
    let graph = bibliography();
    let request = EnumerationRequest::WholeGraph { range: None };
    let config = EnumerationConfig::new(3)
        .with_edge_skip_probability(0.4)
        .with_node_skip_probability(0.2);
    let engine = engine(&graph);

    let observed = engine.occurrences(&request, &config).unwrap();
    let mut targets = observed.path_set();
    targets.insert(MetaPath::parse("42|0|1").unwrap());

    let Counts::Approximate(estimates) = engine.count(&request, &config, &targets).unwrap() else {
        panic!("expected approximate counts");
    };
    assert_eq!(estimates.len(), targets.len());
    for (path, estimate) in &estimates {
        assert!(estimate.is_finite() && *estimate >= 0.0, "{path}: {estimate}");
        #[allow(clippy::cast_precision_loss)]
        let seen = observed.observed(path) as f64;
        assert!(*estimate >= seen);
    }
    assert_eq!(estimates[&MetaPath::parse("42|0|1").unwrap()], 0.0);
}

// --- Schema ---

#[test]
fn schema_is_direction_complete() {
    let graph = bibliography();
    let schema = engine(&graph).schema().unwrap();

    for src in 0..graph.node_count() as u32 {
        let src = NodeId::new(src);
        for &dst in graph.neighbors(src, Direction::Outgoing) {
            let edge = graph.edge_label(src, dst).unwrap();
            for &a in graph.labels(src) {
                for &b in graph.labels(dst) {
                    assert!(schema.contains(a, b, edge));
                    assert!(schema.contains(b, a, edge));
                }
            }
        }
    }
    // Reviewer only touches papers through REVIEWED and WROTE.
    assert!(schema.contains(LabelId::new(3), LabelId::new(1), EdgeTypeId::new(3)));
    assert!(!schema.contains(LabelId::new(3), LabelId::new(2), EdgeTypeId::new(1)));
}

#[test]
fn schema_paths_cover_instance_paths() {
    let graph = bibliography();
    let engine = engine(&graph);
    let schema_paths = engine.schema_meta_paths(2, LengthMode::UpTo).unwrap();
    let instance_paths = engine
        .enumerate(
            &EnumerationRequest::WholeGraph { range: None },
            &EnumerationConfig::new(2),
        )
        .unwrap()
        .meta_paths;
    assert!(instance_paths.is_subset(&schema_paths));
}

#[test]
fn empty_graph_has_empty_schema() {
    let graph = AdjacencyListGraph::with_nodes(&[]);
    let schema = engine(&graph).schema().unwrap();
    assert!(schema.is_empty());
}
