//! Chain & gap filler (component D): §4.D.
//!
//! Builds a compatibility relation over surviving clusters, colors them
//! into connected components with union-find, splits each component into
//! chains wherever direct pairwise consistency fails, then closes the gap
//! between adjacent clusters in a chain by enumerating bounded walks and
//! scoring each with banded edit distance against the read substring.

use std::cell::RefCell;
use std::collections::HashMap;

use bit_vec::BitVec;

use crate::align::banded_edit_distance;
use crate::anchor::{similar, Cluster, MappingInstance};
use crate::config::GraphCoreConfig;
use crate::error::{GraphCoreError, Score};
use crate::graph::{EdgeId, GraphView, VertexId};
use crate::walk::{bounded_walks, reachable_path_lengths, Walk};

/// Per-worker memoized `(VertexId, VertexId) -> path lengths` cache
/// (§5: "per-worker ... sharing it across workers would require a
/// concurrent map and costs more than recomputation").
#[derive(Default)]
pub struct PathLengthCache {
    cache: RefCell<HashMap<(VertexId, VertexId), Vec<u32>>>,
}

impl PathLengthCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_or_compute(&self, g: &dyn GraphView, from: VertexId, to: VertexId, budget: usize) -> Vec<u32> {
        if let Some(lengths) = self.cache.borrow().get(&(from, to)) {
            return lengths.clone();
        }
        let lengths = reachable_path_lengths(g, from, to, budget);
        self.cache.borrow_mut().insert((from, to), lengths.clone());
        lengths
    }
}

/// A resolved chain's walk plus a count of gaps closed/left open within it.
pub struct ChainResult {
    pub walks: Vec<Walk>,
    pub gaps_closed: usize,
    pub gaps_failed: usize,
}

pub struct ChainFiller<'g> {
    graph: &'g dyn GraphView,
    config: GraphCoreConfig,
    cache: PathLengthCache,
}

impl<'g> ChainFiller<'g> {
    pub fn new(graph: &'g dyn GraphView, config: GraphCoreConfig) -> Self {
        Self {
            graph,
            config,
            cache: PathLengthCache::new(),
        }
    }

    /// `true` iff clusters `a` and `b` are consistent under some shift
    /// (§4.D steps 1-3). Same-edge pairs use zero shift (§9 Open Questions).
    pub fn is_consistent(&self, a: &Cluster, b: &Cluster, read_len: usize) -> bool {
        if a.edge == b.edge {
            return a.anchors.iter().filter(|x| x.is_unique()).any(|u| {
                b.anchors
                    .iter()
                    .filter(|x| x.is_unique())
                    .any(|v| similar(*u, *v, 0, self.config.compression_cutoff))
            });
        }

        let from = self.graph.end(a.edge);
        let to = self.graph.start(b.edge);
        let budget = read_len / 3;
        let lengths = self.cache.get_or_compute(self.graph, from, to, budget);
        let addition = self.graph.length(a.edge) as i64;

        for &len in &lengths {
            let shift = len as i64 + addition;
            for u in a.anchors.iter().filter(|x| x.is_unique()) {
                for v in b.anchors.iter().filter(|x| x.is_unique()) {
                    if similar(*u, *v, shift, self.config.compression_cutoff) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Undirected `n x n` compatibility matrix (`M[i][j]` true iff either
    /// direction is consistent), over clusters already in ascending
    /// `(edge_int_id, first_read_offset)` order.
    fn compatibility_matrix(&self, clusters: &[Cluster], read_len: usize) -> BitVec {
        let n = clusters.len();
        let mut m = BitVec::from_elem(n * n, false);
        for i in 0..n {
            for j in (i + 1)..n {
                let ok = self.is_consistent(&clusters[i], &clusters[j], read_len)
                    || self.is_consistent(&clusters[j], &clusters[i], read_len);
                if ok {
                    m.set(i * n + j, true);
                    m.set(j * n + i, true);
                }
            }
        }
        m
    }

    /// Colors clusters into connected components via union-find over the
    /// compatibility matrix, splits each component into maximal runs of
    /// directly-consistent consecutive (by read order) clusters, then
    /// closes the gaps within each run.
    pub fn chain(&self, clusters: &[Cluster], read: &[u8]) -> Vec<ChainResult> {
        let n = clusters.len();
        if n == 0 {
            return Vec::new();
        }
        let read_len = read.len();
        let m = self.compatibility_matrix(clusters, read_len);
        let mut uf = UnionFind::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                if m[i * n + j] {
                    uf.union(i, j);
                }
            }
        }

        let mut components: HashMap<usize, Vec<usize>> = HashMap::new();
        for i in 0..n {
            components.entry(uf.find(i)).or_default().push(i);
        }

        let mut component_ids: Vec<usize> = components.keys().copied().collect();
        component_ids.sort_by_key(|&root| clusters[components[&root][0]].read_range().0);

        let mut results = Vec::new();
        for root in component_ids {
            let mut indices = components[&root].clone();
            indices.sort_by_key(|&i| clusters[i].read_range().0);

            let mut run_start = 0;
            for k in 0..indices.len() {
                let is_last = k + 1 == indices.len();
                let splits_here = !is_last
                    && !self.is_consistent(&clusters[indices[k]], &clusters[indices[k + 1]], read_len);
                if is_last || splits_here {
                    let run = &indices[run_start..=k];
                    results.push(self.fill_gaps(clusters, run, read));
                    run_start = k + 1;
                }
            }
        }
        results
    }

    /// Fills gaps between consecutive clusters in one directly-consistent
    /// run (§4.D Gap filling). A gap that can't be closed splits the run
    /// into separate emitted walks (§9: fail fast on `GapUnclosed`).
    fn fill_gaps(&self, clusters: &[Cluster], run: &[usize], read: &[u8]) -> ChainResult {
        let mut walks: Vec<Vec<EdgeId>> = vec![vec![clusters[run[0]].edge]];
        let mut gaps_closed = 0;
        let mut gaps_failed = 0;

        for w in run.windows(2) {
            let left = &clusters[w[0]];
            let right = &clusters[w[1]];
            let ea = left.edge;
            let eb = right.edge;
            let ia = *left.last_unique();
            let ib = *right.first_unique();

            if !self.gap_needs_fill(ea, eb, ia, ib) {
                walks.last_mut().unwrap().push(eb);
                continue;
            }

            match self.best_scored_path(ea, eb, ia, ib, read) {
                Ok(path) => {
                    walks.last_mut().unwrap().extend(path.0);
                    walks.last_mut().unwrap().push(eb);
                    gaps_closed += 1;
                }
                Err(e) => {
                    tracing::warn!(error = %e, from = ea.0, to = eb.0, "gap unclosed, splitting chain");
                    gaps_failed += 1;
                    walks.push(vec![eb]);
                }
            }
        }

        ChainResult {
            walks: walks.into_iter().map(Walk).collect(),
            gaps_closed,
            gaps_failed,
        }
    }

    /// `true` iff the two clusters are adjacent in the graph (`end(ea) ==
    /// start(eb)`) but the read-to-edge gap is larger than trivial slack,
    /// or the edges aren't graph-adjacent at all. See DESIGN.md for why
    /// this checks `end(ea) != start(eb)`.
    fn gap_needs_fill(&self, ea: EdgeId, eb: EdgeId, ia: MappingInstance, ib: MappingInstance) -> bool {
        if self.graph.end(ea) != self.graph.start(eb) {
            return true;
        }
        let edge_gap = (ib.edge_offset as i64) + (self.graph.length(ea) as i64) - (ia.edge_offset as i64);
        let read_gap = ib.read_offset as i64 - ia.read_offset as i64;
        read_gap as f64 > edge_gap as f64 * self.config.gap_slack_factor
    }

    /// Enumerates bounded walks between `end(ea)` and `start(eb)`, scores
    /// each with banded edit distance against the read substring spanning
    /// the gap, and returns the best-scoring one (§4.D). Tie-breaks by
    /// shorter walk, then lower edge-id sum. Fails fast when no walk is
    /// found or every candidate is `Score::Unreachable` (§9).
    fn best_scored_path(
        &self,
        ea: EdgeId,
        eb: EdgeId,
        ia: MappingInstance,
        ib: MappingInstance,
        read: &[u8],
    ) -> Result<Walk, GraphCoreError> {
        let read_lo = ia.read_offset as usize;
        let read_hi = ib.read_offset as usize;
        if read_hi < read_lo || read_hi > read.len() {
            return Err(GraphCoreError::DegenerateInput {
                detail: format!("invalid read gap window [{read_lo}, {read_hi}) between edges {ea} and {eb}"),
            });
        }
        let seq_window = &read[read_lo..read_hi];

        let edge_a_seq = self.graph.edge_seq(ea);
        let edge_a_len = self.graph.length(ea);
        let left_prefix = &edge_a_seq[(ia.edge_offset as usize).min(edge_a_len)..edge_a_len];
        let edge_b_seq = self.graph.edge_seq(eb);
        let right_prefix = &edge_b_seq[..(ib.edge_offset as usize).min(edge_b_seq.len())];

        let seq_len = seq_window.len() as i64;
        let k = self.config.k_graph as i64;
        let low = self.config.path_range_low_multiplier;
        let high = self.config.path_range_high_multiplier;
        let affix = (left_prefix.len() + right_prefix.len()) as i64;
        let min_len = ((((seq_len - k) as f64 * low).floor() as i64) - affix).max(0);
        let max_len = ((((seq_len + k) as f64 * high).ceil() as i64) - affix).max(0);

        let start_v = self.graph.end(ea);
        let goal_v = self.graph.start(eb);
        let candidates = bounded_walks(self.graph, start_v, goal_v, min_len as usize, max_len as usize);
        if candidates.is_empty() {
            return Err(GraphCoreError::GapUnclosed {
                from_edge: ea.0,
                to_edge: eb.0,
            });
        }

        let mut best: Option<(Score, usize, u64, Walk)> = None;
        for walk in candidates {
            let mut candidate_seq = Vec::with_capacity(left_prefix.len() + right_prefix.len() + walk.graph_length(self.graph));
            candidate_seq.extend_from_slice(left_prefix);
            candidate_seq.extend_from_slice(&walk.materialize(self.graph));
            candidate_seq.extend_from_slice(right_prefix);

            let score = banded_edit_distance(&candidate_seq, seq_window, &self.config);
            let key = (score, walk.len(), walk.edge_id_sum(self.graph));
            let better = match &best {
                None => true,
                Some((bs, bl, be, _)) => key < (*bs, *bl, *be),
            };
            if better {
                best = Some((key.0, key.1, key.2, walk));
            }
        }

        match best {
            Some((Score::Unreachable, ..)) | None => Err(GraphCoreError::GapUnclosed {
                from_edge: ea.0,
                to_edge: eb.0,
            }),
            Some((_, _, _, walk)) => Ok(walk),
        }
    }
}

/// Standard union-find with path compression and union-by-size.
struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.size[ra] < self.size[rb] {
            self.parent[ra] = rb;
            self.size[rb] += self.size[ra];
        } else {
            self.parent[rb] = ra;
            self.size[ra] += self.size[rb];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::MappingInstance;
    use crate::testutil::TestGraph;

    fn cfg() -> GraphCoreConfig {
        GraphCoreConfig::new(5, 5)
    }

    #[test]
    fn adjacent_clusters_with_small_gap_need_no_fill() {
        let g = TestGraph::new(5, vec![("E1", b"ACGTACGTA".to_vec()), ("E2", b"CGTACGTAC".to_vec())]);
        let filler = ChainFiller::new(&g, cfg());
        let ea = g.edge_id("E1");
        let eb = g.edge_id("E2");
        let ia = MappingInstance::new(g.length(ea) as u32 - 1, 10, 1);
        let ib = MappingInstance::new(0, 11, 1);
        assert!(!filler.gap_needs_fill(ea, eb, ia, ib));
    }

    #[test]
    fn chain_single_cluster_yields_single_walk() {
        let g = TestGraph::new(5, vec![("E1", b"ACGTACGTACGTACGTACGT".to_vec())]);
        let filler = ChainFiller::new(&g, cfg());
        let e = g.edge_id("E1");
        let cluster = Cluster::new(e, vec![MappingInstance::new(0, 0, 1), MappingInstance::new(1, 1, 1)]);
        let read = b"ACGTACGTACGTACGTACGT";
        let results = filler.chain(&[cluster], read);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].walks.len(), 1);
        assert_eq!(results[0].walks[0].edges(), &[e]);
    }

    #[test]
    fn incompatible_clusters_split_into_separate_chains() {
        // Two clusters on unrelated, disconnected edges: no path between
        // them exists, so they can never be judged consistent and must
        // surface as two separate chain results.
        let mut g = TestGraph::empty(5);
        let a = g.add_vertex();
        let b = g.add_vertex();
        let c = g.add_vertex();
        let d = g.add_vertex();
        g.add_edge("E1", a, b, b"ACGTACGTA", 5);
        g.add_edge("E2", c, d, b"TTTTTTTTT", 5);
        let filler = ChainFiller::new(&g, cfg());
        let e1 = g.edge_id("E1");
        let e2 = g.edge_id("E2");
        let c1 = Cluster::new(e1, vec![MappingInstance::new(0, 0, 1), MappingInstance::new(1, 1, 1)]);
        let c2 = Cluster::new(e2, vec![MappingInstance::new(0, 50, 1), MappingInstance::new(1, 51, 1)]);
        let read = vec![b'A'; 60];
        let results = filler.chain(&[c1, c2], &read);
        assert_eq!(results.len(), 2);
    }
}
