use std::{collections::BTreeMap, fs, path::PathBuf};

use complexnets::{
    clique::{self, CliqueConfig},
    generators::{molloy_reed, MolloyReedParams},
    graph::{Graph, VertexId},
    io,
    metrics::{betweenness, shell_index, vertex_clustering},
    property::{BETWEENNESS, SHELL_INDEX},
    session::Session,
};
use rand::{rngs::SmallRng, SeedableRng};
use rstest::rstest;
use serde::Deserialize;

/// A small graph with its known metrics.
#[derive(Debug, Deserialize)]
struct Fixture {
    name: String,
    edges: Vec<(VertexId, VertexId)>,
    max_clique: usize,
    betweenness: BTreeMap<VertexId, f64>,
    shell_index: BTreeMap<VertexId, u32>,
    clustering: BTreeMap<VertexId, f64>,
}

impl Fixture {
    fn graph(&self) -> Graph {
        let mut graph = Graph::new();
        for &(u, v) in &self.edges {
            graph.insert_edge(u, v).unwrap();
        }
        graph
    }
}

fn testdata(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(file)
}

fn load(file: &str) -> Fixture {
    let text = fs::read_to_string(testdata(file)).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[rstest]
#[case("petersen.json")]
#[case("bowtie.json")]
fn metrics_match_fixture(#[case] file: &str) {
    let fixture = load(file);
    let graph = fixture.graph();

    for (id, value) in betweenness(&graph).iter() {
        assert_eq!(Some(&value), fixture.betweenness.get(&id), "{} betweenness of {id}", fixture.name);
    }
    for (id, shell) in shell_index(&graph).iter() {
        assert_eq!(Some(&shell), fixture.shell_index.get(&id), "{} shell of {id}", fixture.name);
    }
    for (&id, &expected) in &fixture.clustering {
        let clustering = vertex_clustering(&graph, id).unwrap();
        assert!((clustering - expected).abs() < 1e-12, "{} clustering of {id}", fixture.name);
    }
}

#[rstest]
#[case("petersen.json")]
#[case("bowtie.json")]
fn clique_matches_fixture(#[case] file: &str) {
    let fixture = load(file);
    let graph = fixture.graph();

    let exact = clique::exact(&graph, &CliqueConfig::default());
    let greedy = clique::approximate(&graph);

    assert_eq!(exact.size().unwrap(), fixture.max_clique);
    assert!(greedy.size().unwrap() <= fixture.max_clique);
}

#[test]
fn edge_list_and_json_agree() {
    let fixture = load("bowtie.json");

    let graph = io::read_graph_from_path(testdata("bowtie.edges")).unwrap();

    // The edge list carries one extra isolated vertex.
    assert_eq!(graph.vertex_count(), fixture.shell_index.len() + 1);
    assert_eq!(graph.edge_count(), fixture.edges.len());

    let mut session = Session::plain(graph);
    session.compute_betweenness();
    session.compute_shell_index();

    let shells = session.property_set(SHELL_INDEX).unwrap();
    for (&id, &expected) in &fixture.shell_index {
        assert_eq!(shells.get(u64::from(id)).map(|value| value.as_f64()), Some(f64::from(expected)));
    }
    let betweenness = session.property_set(BETWEENNESS).unwrap();
    assert_eq!(betweenness.get(7).map(|value| value.as_f64()), Some(0.0));
}

#[test]
fn degree_sequence_file_drives_the_configuration_model() {
    let degrees = io::read_degree_sequence_from_path(testdata("degree_sequence.txt")).unwrap();
    assert_eq!(degrees.len(), 75);

    let params = MolloyReedParams::new(degrees).unwrap();
    let graph = molloy_reed(&params, &mut SmallRng::seed_from_u64(99)).unwrap();

    assert_eq!(graph.vertex_count(), 75);
    for (vertex, &target) in graph.vertices().zip(params.degrees()) {
        assert!(vertex.degree() <= target);
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let error = io::read_graph_from_path(testdata("does-not-exist.edges")).unwrap_err();

    assert!(matches!(error, complexnets::Error::Io(_)));
}
