//! End-to-end scenarios from the concrete scenario table, all at `K_INDEX
//! = K_GRAPH = 5`. Built on `petgraph::graph::DiGraph`, independent from
//! the crate's own `#[cfg(test)]`-only test graph since integration tests
//! only see the public API.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::Direction;

use talaria_graphcore::extend::{PairedInfoOracle, PathExtender};
use talaria_graphcore::graph::{EdgeId, GraphView, VertexId};
use talaria_graphcore::kmer::EdgeKmerIndex;
use talaria_graphcore::pipeline::ReadMapper;
use talaria_graphcore::GraphCoreConfig;

#[derive(Clone)]
struct EdgeData {
    seq: Vec<u8>,
    k: usize,
}

struct IntegrationGraph {
    g: DiGraph<(), EdgeData>,
    names: HashMap<String, EdgeId>,
}

impl IntegrationGraph {
    fn empty() -> Self {
        Self {
            g: DiGraph::new(),
            names: HashMap::new(),
        }
    }

    fn add_vertex(&mut self) -> VertexId {
        VertexId(self.g.add_node(()).index() as u64)
    }

    fn add_edge(&mut self, name: &str, from: VertexId, to: VertexId, seq: &[u8], k: usize) -> EdgeId {
        let idx = self.g.add_edge(
            NodeIndex::new(from.0 as usize),
            NodeIndex::new(to.0 as usize),
            EdgeData { seq: seq.to_vec(), k },
        );
        let id = EdgeId(idx.index() as u64);
        self.names.insert(name.to_string(), id);
        id
    }

    fn edge_id(&self, name: &str) -> EdgeId {
        self.names[name]
    }

    fn edge_ids(&self) -> Vec<EdgeId> {
        self.g.edge_indices().map(|i| EdgeId(i.index() as u64)).collect()
    }
}

impl GraphView for IntegrationGraph {
    fn length(&self, e: EdgeId) -> usize {
        let data = &self.g[EdgeIndex::new(e.0 as usize)];
        data.seq.len() + 1 - data.k
    }

    fn edge_seq(&self, e: EdgeId) -> &[u8] {
        &self.g[EdgeIndex::new(e.0 as usize)].seq
    }

    fn start(&self, e: EdgeId) -> VertexId {
        let (s, _) = self.g.edge_endpoints(EdgeIndex::new(e.0 as usize)).unwrap();
        VertexId(s.index() as u64)
    }

    fn end(&self, e: EdgeId) -> VertexId {
        let (_, t) = self.g.edge_endpoints(EdgeIndex::new(e.0 as usize)).unwrap();
        VertexId(t.index() as u64)
    }

    fn outgoing(&self, v: VertexId) -> Vec<EdgeId> {
        let mut out: Vec<EdgeId> = self
            .g
            .edges_directed(NodeIndex::new(v.0 as usize), Direction::Outgoing)
            .map(|e| EdgeId(e.id().index() as u64))
            .collect();
        out.sort();
        out
    }

    fn incoming(&self, v: VertexId) -> Vec<EdgeId> {
        let mut out: Vec<EdgeId> = self
            .g
            .edges_directed(NodeIndex::new(v.0 as usize), Direction::Incoming)
            .map(|e| EdgeId(e.id().index() as u64))
            .collect();
        out.sort();
        out
    }

    fn conjugate(&self, e: EdgeId) -> EdgeId {
        e
    }
}

fn cfg() -> GraphCoreConfig {
    GraphCoreConfig::new(5, 5).with_min_cluster_size(3)
}

/// Scenario 1: a read identical to a single edge maps to exactly that
/// edge with zero gap closures.
#[test]
fn scenario_1_identical_read_single_edge() {
    let mut g = IntegrationGraph::empty();
    let a = g.add_vertex();
    let b = g.add_vertex();
    g.add_edge("E1", a, b, b"ACGTACGTAC", 5);
    let edges = g.edge_ids();
    let index = EdgeKmerIndex::build(&g, &edges, 5);
    let mapper = ReadMapper::new(&g, &index, cfg());

    let result = mapper.map_read("r1", b"ACGTACGTAC");
    assert_eq!(result.walks.len(), 1);
    assert_eq!(result.walks[0].edges(), &[g.edge_id("E1")]);
    assert_eq!(result.report.gaps_closed, 0);
    assert_eq!(result.report.gaps_failed, 0);
}

/// Scenario 2: two directly adjacent edges, read spans both exactly.
#[test]
fn scenario_2_two_adjacent_edges_no_gap() {
    let mut g = IntegrationGraph::empty();
    let a = g.add_vertex();
    let b = g.add_vertex();
    let c = g.add_vertex();
    g.add_edge("E1", a, b, b"ACGTACGTACGT", 5);
    g.add_edge("E2", b, c, b"ACGTGGGGAAAA", 5);
    let edges = g.edge_ids();
    let index = EdgeKmerIndex::build(&g, &edges, 5);
    let mapper = ReadMapper::new(&g, &index, cfg());

    let read = b"ACGTACGTACGTACGTGGGGAAAA";
    let result = mapper.map_read("r2", read);
    assert_eq!(result.walks.len(), 1);
    assert_eq!(result.walks[0].edges(), &[g.edge_id("E1"), g.edge_id("E2")]);
    assert_eq!(result.report.gaps_closed, 0);
}

/// Scenario 3: two directly adjacent edges, but the read inserts two
/// extra bases at the junction — the gap filler must close it with the
/// trivial (empty) walk and an edit-distance score of 2.
#[test]
fn scenario_3_junction_with_two_base_insert_closes_with_edit_cost() {
    let mut g = IntegrationGraph::empty();
    let a = g.add_vertex();
    let b = g.add_vertex();
    let c = g.add_vertex();
    g.add_edge("E1", a, b, b"AAAAAACCCCCCGGGGGG", 5);
    g.add_edge("E2", b, c, b"GGGGGGTTTTTTAAAAAA", 5);
    let edges = g.edge_ids();
    let index = EdgeKmerIndex::build(&g, &edges, 5);
    let mapper = ReadMapper::new(&g, &index, cfg());

    let mut read = b"AAAAAACCCCCCGGGGGG".to_vec();
    read.extend_from_slice(b"TT"); // 2-base insert at the junction
    read.extend_from_slice(b"GGGGGGTTTTTTAAAAAA");

    let result = mapper.map_read("r3", &read);
    assert_eq!(result.walks.len(), 1);
    assert_eq!(result.walks[0].edges(), &[g.edge_id("E1"), g.edge_id("E2")]);
    assert_eq!(result.report.gaps_closed, 1);
}

/// Scenario 4: a bubble `E1 -> {E2a, E2b} -> E3` where the read matches
/// `E2a` exactly; since anchoring is driven by actual k-mer content, `E2b`
/// never accumulates anchors and is naturally excluded from the chain.
#[test]
fn scenario_4_bubble_read_selects_matching_branch() {
    let mut g = IntegrationGraph::empty();
    let v0 = g.add_vertex();
    let v1 = g.add_vertex();
    let v2 = g.add_vertex();
    g.add_edge("E1", v0, v1, b"ACGTACGTACGT", 5);
    let e2a = g.add_edge("E2a", v1, v2, b"GGGGGCCCCCAAAAA", 5);
    g.add_edge("E2b", v1, v2, b"GGGGGCCCCCTTTTA", 5);
    let v3 = g.add_vertex();
    g.add_edge("E3", v2, v3, b"AAAAATTTTTGGGGG", 5);

    let edges = g.edge_ids();
    let index = EdgeKmerIndex::build(&g, &edges, 5);
    let mapper = ReadMapper::new(&g, &index, cfg());

    let mut read = b"ACGTACGTACGT".to_vec();
    read.extend_from_slice(b"GGGGGCCCCCAAAAA");
    read.extend_from_slice(b"AAAAATTTTTGGGGG");

    let result = mapper.map_read("r4", &read);
    assert_eq!(result.walks.len(), 1);
    assert_eq!(result.walks[0].edges(), &[g.edge_id("E1"), e2a, g.edge_id("E3")]);
}

struct TipJumpOracle {
    far_edge: EdgeId,
}
impl PairedInfoOracle for TipJumpOracle {
    fn count_pair_info(&self, _path: &[EdgeId], _from_idx: usize, _to_idx: usize, _candidate_edge: EdgeId, _gap: i32) -> f64 {
        0.0
    }
    fn find_jump_candidates(&self, _edge: EdgeId, _min_dist: usize, _max_dist: usize, _min_len: usize) -> Vec<EdgeId> {
        vec![self.far_edge]
    }
    fn find_jump_edges(&self, _edge: EdgeId, candidates: &[EdgeId], _min_dist: usize, _max_dist: usize) -> Vec<(EdgeId, f64)> {
        candidates.iter().map(|&c| (c, 500.0)).collect()
    }
    fn left_variance(&self) -> f64 {
        50.0
    }
    fn has_pair_info(&self, _e1: EdgeId, _e2: EdgeId, _min_dist: usize, _max_dist: usize) -> bool {
        true
    }
}

/// Scenario 5: `E1` ends at a dead vertex; paired info links it to a far,
/// graph-disconnected edge `E9`. With `jump = true` the extender scaffolds
/// across the tip with an estimated gap.
#[test]
fn scenario_5_tip_scaffolds_to_paired_info_candidate() {
    let mut g = IntegrationGraph::empty();
    let a = g.add_vertex();
    let b = g.add_vertex();
    let e1 = g.add_edge("E1", a, b, b"ACGTACGTACGT", 5);
    let c = g.add_vertex();
    let d = g.add_vertex();
    let e9 = g.add_edge("E9", c, d, b"TTTTTGGGGGAAAAA", 5);

    let oracle = TipJumpOracle { far_edge: e9 };
    let extender = PathExtender::new(&g, GraphCoreConfig::new(5, 5).with_long_edge(10), &oracle);

    let results = extender.search(&[e1], true, 600);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].edges, vec![e1, e9]);
    assert!(results[0].gaps[1] >= 100, "scaffolded gap should be clamped to >= 100, got {}", results[0].gaps[1]);
}

struct NoPairInfo;
impl PairedInfoOracle for NoPairInfo {
    fn count_pair_info(&self, _path: &[EdgeId], _from_idx: usize, _to_idx: usize, _candidate_edge: EdgeId, _gap: i32) -> f64 {
        0.0
    }
    fn find_jump_candidates(&self, _edge: EdgeId, _min_dist: usize, _max_dist: usize, _min_len: usize) -> Vec<EdgeId> {
        Vec::new()
    }
    fn find_jump_edges(&self, _edge: EdgeId, _candidates: &[EdgeId], _min_dist: usize, _max_dist: usize) -> Vec<(EdgeId, f64)> {
        Vec::new()
    }
    fn left_variance(&self) -> f64 {
        0.0
    }
    fn has_pair_info(&self, _e1: EdgeId, _e2: EdgeId, _min_dist: usize, _max_dist: usize) -> bool {
        false
    }
}

/// Scenario 6: a two-edge cycle `E1 -> E2 -> E1 -> ...`. With
/// `MP_MAX_LOOPS = 2`, the extension is stopped at exactly two repeats of
/// the cycle rather than growing unboundedly.
#[test]
fn scenario_6_cycle_is_truncated_at_mp_max_loops() {
    let mut g = IntegrationGraph::empty();
    let a = g.add_vertex();
    let b = g.add_vertex();
    let e1 = g.add_edge("E1", a, b, b"ACGTA", 5);
    g.add_edge("E2", b, a, b"CGTAC", 5);

    let oracle = NoPairInfo;
    let config = GraphCoreConfig::new(5, 5).with_mp_max_loops(2);
    let extender = PathExtender::new(&g, config, &oracle);

    let results = extender.search(&[e1], false, 1000);
    assert_eq!(results.len(), 1);
    // E1, E2, E1, E2: exactly two repeats of the E1->E2 cycle, then stop.
    assert_eq!(results[0].edges.len(), 4);
}

/// Determinism: running the same scenario twice must produce identical
/// output (§5 "regression tests depend on bit-identical output").
#[test]
fn determinism_two_runs_produce_identical_walks() {
    let mut g = IntegrationGraph::empty();
    let a = g.add_vertex();
    let b = g.add_vertex();
    g.add_edge("E1", a, b, b"ACGTACGTAC", 5);
    let edges = g.edge_ids();
    let index = EdgeKmerIndex::build(&g, &edges, 5);

    let run = || {
        let mapper = ReadMapper::new(&g, &index, cfg());
        mapper.map_read("r1", b"ACGTACGTAC").walks
    };
    assert_eq!(run(), run());
}
