//! Anchor clusterer (component C) — `locate_and_cluster`.

use std::collections::HashMap;

use crate::anchor::{by_read_offset, similar, Cluster, MappingInstance};
use crate::config::GraphCoreConfig;
use crate::graph::{EdgeId, GraphView};
use crate::kmer::{encode_kmer, EdgeKmerIndex};

pub struct AnchorClusterer<'g> {
    graph: &'g dyn GraphView,
    index: &'g EdgeKmerIndex,
    config: GraphCoreConfig,
}

impl<'g> AnchorClusterer<'g> {
    pub fn new(graph: &'g dyn GraphView, index: &'g EdgeKmerIndex, config: GraphCoreConfig) -> Self {
        Self { graph, index, config }
    }

    /// Projects `read` onto the graph: slides a k-mer window along it,
    /// groups resulting hits into per-edge collinear clusters, and returns
    /// the surviving clusters in ascending `(edge_int_id, first_read_offset)`
    /// order (§5 ordering guarantee).
    pub fn locate_and_cluster(&self, read: &[u8]) -> Vec<Cluster> {
        let buckets = self.extract_anchors(read);
        let mut clusters = Vec::new();
        for (edge, anchors) in &buckets {
            clusters.extend(self.cluster_bucket(*edge, anchors));
        }
        self.filter_clusters(clusters)
    }

    /// Anchor extraction: per §4.C, one bucket of raw anchors per edge.
    fn extract_anchors(&self, read: &[u8]) -> HashMap<EdgeId, Vec<MappingInstance>> {
        let k = self.index.k();
        let overlap = self.config.k_graph.saturating_sub(self.config.k_index);
        let mut buckets: HashMap<EdgeId, Vec<MappingInstance>> = HashMap::new();

        if read.len() < k {
            return buckets;
        }

        for r in 0..=(read.len() - k) {
            let window = &read[r..r + k];
            let Some(code) = encode_kmer(window) else {
                continue;
            };
            if self.index.is_banned(code) {
                continue;
            }
            let hits = self.index.lookup(code);
            let mult = hits.len() as u32;
            if mult == 0 {
                continue;
            }
            for hit in hits {
                let edge_len = self.graph.length(hit.edge);
                let o = hit.offset as usize;
                if o < overlap || o + overlap >= edge_len {
                    // anchors on vertex overlap are unreliable
                    continue;
                }
                buckets.entry(hit.edge).or_default().push(MappingInstance::new(
                    hit.offset,
                    r as u32,
                    mult,
                ));
            }
        }
        buckets
    }

    /// Per-edge clustering: explicit-stack DFS growing collinear groups
    /// from each unused seed anchor (Design Notes: "Recursive cluster-DFS").
    fn cluster_bucket(&self, edge: EdgeId, anchors: &[MappingInstance]) -> Vec<Cluster> {
        let n = anchors.len();
        let mut used = vec![false; n];
        let mut out = Vec::new();

        for seed in 0..n {
            if used[seed] {
                continue;
            }
            used[seed] = true;
            let mut members = vec![anchors[seed]];
            let mut stack = vec![seed];
            while let Some(cur) = stack.pop() {
                for k in 0..n {
                    if !used[k] && similar(anchors[cur], anchors[k], 0, self.config.compression_cutoff) {
                        used[k] = true;
                        members.push(anchors[k]);
                        stack.push(k);
                    }
                }
            }
            out.push(self.trim_to_longest_run(edge, members));
        }
        out
    }

    /// Sorts by read offset, then trims to the longest similar-run — but
    /// only counts a break as a split point when it falls in the head
    /// (first 20%) or tail (last 20%) of the sequence (§4.C).
    fn trim_to_longest_run(&self, edge: EdgeId, mut members: Vec<MappingInstance>) -> Cluster {
        members.sort_by(by_read_offset);
        let len = members.len();
        if len <= 1 {
            return Cluster::new(edge, members);
        }

        let mut longest_len = 0usize;
        let mut best_start = 0usize;
        let mut count = 1usize;
        let mut cur_start = 0usize;

        for j in 0..len - 1 {
            let in_head_or_tail = j * 5 < len || (j + 1) * 5 > len * 4;
            let consistent = similar(members[j], members[j + 1], 0, self.config.compression_cutoff);
            if in_head_or_tail && !consistent {
                if longest_len < count {
                    longest_len = count;
                    best_start = cur_start;
                }
                count = 1;
                cur_start = j + 1;
            } else {
                count += 1;
            }
        }
        if longest_len < count {
            longest_len = count;
            best_start = cur_start;
        }

        let trimmed = members[best_start..best_start + longest_len].to_vec();
        if longest_len < len && len > self.config.min_cluster_size {
            tracing::debug!(
                edge = edge.0,
                original = len,
                removed = len - longest_len,
                "trimmed noisy anchors from cluster head/tail"
            );
        }
        Cluster::new(edge, trimmed)
    }

    /// Drops clusters that are too small, fully within a vertex overlap, or
    /// dominated by a larger cluster on the same edge (§4.C Filtering).
    fn filter_clusters(&self, clusters: Vec<Cluster>) -> Vec<Cluster> {
        let overlap = self.config.k_graph.saturating_sub(self.config.k_index) as u32;
        let survivors: Vec<Cluster> = clusters
            .into_iter()
            .filter(|c| c.unique_count() >= self.config.min_cluster_size)
            .filter(|c| {
                let len = self.graph.length(c.edge) as u32;
                if len < self.config.short_edge_cutoff as u32 {
                    return true;
                }
                let first = c.anchors.first().unwrap();
                let last = c.anchors.last().unwrap();
                !(first.edge_offset >= len || last.edge_offset <= overlap)
            })
            .collect();

        let mut kept: Vec<Cluster> = Vec::new();
        'outer: for (i, candidate) in survivors.iter().enumerate() {
            for (j, other) in survivors.iter().enumerate() {
                if i != j && self.dominates(other, candidate) {
                    tracing::debug!(edge = candidate.edge.0, "cluster dominated, dropping");
                    continue 'outer;
                }
            }
            kept.push(candidate.clone());
        }

        kept.sort_by_key(|c| (self.graph.int_id(c.edge), c.read_range().0));
        kept
    }

    /// Cluster `a` dominates `b` iff `a` is at least 1.5x larger and `a`'s
    /// read range contains `b`'s, restricted to the same edge (§4.C).
    fn dominates(&self, a: &Cluster, b: &Cluster) -> bool {
        if a.edge != b.edge {
            return false;
        }
        let a_size = a.len() as f64;
        let b_size = b.len() as f64;
        if a_size < b_size * self.config.domination_cutoff {
            return false;
        }
        let (a_first, a_last) = a.read_range();
        let (b_first, b_last) = b.read_range();
        a_first <= b_first && a_last >= b_last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::TestGraph;

    fn cfg() -> GraphCoreConfig {
        GraphCoreConfig::new(5, 5).with_min_cluster_size(3)
    }

    #[test]
    fn identical_read_produces_single_full_cluster() {
        // Non-repeating sequence: a periodic fixture (e.g. "ACGT" x5) would
        // give every k-mer a multiplicity > 1 and fail MIN_CLUSTER_SIZE's
        // unique-anchor count outright.
        let graph = TestGraph::new(5, vec![("E1", b"ACGATCGGTACCTGAACGTT".to_vec())]);
        let edges: Vec<EdgeId> = graph.edge_ids();
        let index = EdgeKmerIndex::build(&graph, &edges, 5);
        let clusterer = AnchorClusterer::new(&graph, &index, cfg());
        let read = b"ACGATCGGTACCTGAACGTT";
        let clusters = clusterer.locate_and_cluster(read);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].edge, graph.edge_id("E1"));
    }

    #[test]
    fn short_read_with_no_kmers_produces_no_clusters() {
        let graph = TestGraph::new(5, vec![("E1", b"ACGTACGTACGTACGTACGT".to_vec())]);
        let edges: Vec<EdgeId> = graph.edge_ids();
        let index = EdgeKmerIndex::build(&graph, &edges, 5);
        let clusterer = AnchorClusterer::new(&graph, &index, cfg());
        let clusters = clusterer.locate_and_cluster(b"AC");
        assert!(clusters.is_empty());
    }

    #[test]
    fn dominated_cluster_on_same_edge_is_dropped() {
        // Construct directly rather than through extraction: a big and a
        // small cluster on the same edge where the small one's range is a
        // subset of the big one's.
        let graph = TestGraph::new(5, vec![("E1", vec![b'A'; 40])]);
        let edges: Vec<EdgeId> = graph.edge_ids();
        let index = EdgeKmerIndex::build(&graph, &edges, 5);
        let clusterer = AnchorClusterer::new(&graph, &index, cfg());
        let e = graph.edge_id("E1");
        let big = Cluster::new(
            e,
            (0..10).map(|i| MappingInstance::new(i, i, 1)).collect(),
        );
        let small = Cluster::new(e, vec![MappingInstance::new(3, 3, 1), MappingInstance::new(4, 4, 1)]);
        assert!(clusterer.dominates(&big, &small));
        assert!(!clusterer.dominates(&small, &big));
    }
}
