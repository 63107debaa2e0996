//! In-memory [`GraphView`] used only by this crate's own unit tests.
//!
//! Built on `petgraph::graph::DiGraph`, matching the workspace's existing
//! `petgraph` dependency (see `Cargo.toml` data-structures section) rather
//! than hand-rolling adjacency lists. Integration tests under `tests/`
//! build an equivalent graph independently since they only see the public
//! crate API.
#![cfg(test)]

use std::collections::HashMap;

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::Direction;

use crate::graph::{EdgeId, GraphView, VertexId};

#[derive(Clone)]
struct EdgeData {
    seq: Vec<u8>,
    k: usize,
}

pub struct TestGraph {
    g: DiGraph<(), EdgeData>,
    names: HashMap<String, EdgeId>,
    conjugates: HashMap<EdgeId, EdgeId>,
}

impl TestGraph {
    pub fn empty(_k: usize) -> Self {
        Self {
            g: DiGraph::new(),
            names: HashMap::new(),
            conjugates: HashMap::new(),
        }
    }

    pub fn add_vertex(&mut self) -> VertexId {
        VertexId(self.g.add_node(()).index() as u64)
    }

    pub fn add_edge(&mut self, name: &str, from: VertexId, to: VertexId, seq: &[u8], k: usize) -> EdgeId {
        let idx = self.g.add_edge(
            NodeIndex::new(from.0 as usize),
            NodeIndex::new(to.0 as usize),
            EdgeData { seq: seq.to_vec(), k },
        );
        let id = EdgeId(idx.index() as u64);
        self.names.insert(name.to_string(), id);
        id
    }

    pub fn set_conjugate(&mut self, a: EdgeId, b: EdgeId) {
        self.conjugates.insert(a, b);
        self.conjugates.insert(b, a);
    }

    pub fn edge_id(&self, name: &str) -> EdgeId {
        self.names[name]
    }

    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.g.edge_indices().map(|i| EdgeId(i.index() as u64)).collect()
    }

    /// Chains edges end-to-start in the order given, creating one fresh
    /// vertex between each pair. Handy for the simple linear scenarios.
    pub fn new(k: usize, edges: Vec<(&str, Vec<u8>)>) -> Self {
        let mut tg = Self::empty(k);
        let mut prev = tg.add_vertex();
        for (name, seq) in edges {
            let next = tg.add_vertex();
            tg.add_edge(name, prev, next, &seq, k);
            prev = next;
        }
        tg
    }
}

impl GraphView for TestGraph {
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
        self.conjugates.get(&e).copied().unwrap_or(e)
    }
}
