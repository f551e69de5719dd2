//! End-to-end tests for the distributed merge pipeline.
//!
//! These spawn real `merge-worker` processes (cargo builds the binary
//! before the test runs and hands us its path) and cross-check the
//! reduced forest against the serial in-process algorithm.

use spanner_compute::serial_mst;
use spanner_core::Edge;
use spanner_graph::GraphStore;
use spanner_wire::{ClusterConfig, MergePipeline};

fn worker_config(workers: usize) -> ClusterConfig {
    let mut config = ClusterConfig::local();
    config.cluster.workers = workers;
    config.cluster.worker_binary = Some(env!("CARGO_BIN_EXE_merge-worker").to_string());
    config
}

fn sample_edges() -> Vec<Edge> {
    vec![
        Edge::new(0, 1, 4),
        Edge::new(0, 2, 3),
        Edge::new(1, 2, 1),
        Edge::new(1, 3, 2),
        Edge::new(2, 3, 4),
        Edge::new(3, 4, 2),
        Edge::new(4, 5, 6),
        Edge::new(2, 5, 5),
        Edge::new(0, 5, 9),
        Edge::new(1, 4, 7),
    ]
}

#[test]
fn matches_the_serial_algorithm() {
    let edges = sample_edges();
    let config = worker_config(3);
    let pipeline = MergePipeline::new(&config);
    let distributed = pipeline.run(&edges, 6).unwrap();

    let serial = serial_mst(&GraphStore::from_edges(&edges));
    assert_eq!(distributed.num_edges(), serial.num_edges());
    assert_eq!(distributed.total_weight, serial.total_weight);
}

#[test]
fn disconnected_input_yields_a_forest() {
    let edges = vec![
        Edge::new(0, 1, 1),
        Edge::new(1, 2, 2),
        Edge::new(0, 2, 3),
        Edge::new(3, 4, 10),
        Edge::new(4, 5, 20),
        Edge::new(3, 5, 30),
    ];
    let config = worker_config(2);
    let result = MergePipeline::new(&config).run(&edges, 6).unwrap();
    assert_eq!(result.num_edges(), 4);
    assert_eq!(result.total_weight, 33);
}

#[test]
fn empty_edge_list() {
    let config = worker_config(2);
    let result = MergePipeline::new(&config).run(&[], 0).unwrap();
    assert_eq!(result.num_edges(), 0);
    assert_eq!(result.total_weight, 0);
}

#[test]
fn single_worker_degenerates_to_one_sort() {
    let edges = sample_edges();
    let config = worker_config(1);
    let result = MergePipeline::new(&config).run(&edges, 6).unwrap();

    let serial = serial_mst(&GraphStore::from_edges(&edges));
    assert_eq!(result.total_weight, serial.total_weight);
}

#[test]
fn more_workers_than_edges() {
    let edges = vec![Edge::new(0, 1, 5), Edge::new(1, 2, 3)];
    let config = worker_config(5);
    let result = MergePipeline::new(&config).run(&edges, 3).unwrap();
    assert_eq!(result.num_edges(), 2);
    assert_eq!(result.total_weight, 8);
}

#[test]
fn repeated_runs_are_deterministic() {
    let edges = sample_edges();
    let config = worker_config(3);
    let pipeline = MergePipeline::new(&config);

    let first = pipeline.run(&edges, 6).unwrap();
    let second = pipeline.run(&edges, 6).unwrap();
    assert_eq!(first, second);
}
