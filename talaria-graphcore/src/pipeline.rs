//! Top-level read mapper tying anchoring, clustering, and chaining together.
//!
//! `ReadMapper::map_read` is the single-read entry point the rest of the
//! crate builds toward; `map_reads_parallel` is the ambient `rayon`-backed
//! batch driver mirroring `ReferenceSelector`'s batch-processing pattern.

use rayon::prelude::*;

use crate::anchor::Cluster;
use crate::chain::ChainFiller;
use crate::cluster::AnchorClusterer;
use crate::config::GraphCoreConfig;
use crate::error::GraphCoreError;
use crate::graph::GraphView;
use crate::kmer::EdgeKmerIndex;
use crate::walk::Walk;

/// Per-read summary counts returned alongside the walks, letting callers
/// and tests assert on pipeline behavior without parsing logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MappingReport {
    pub clusters_found: usize,
    pub chains_emitted: usize,
    pub gaps_closed: usize,
    pub gaps_failed: usize,
}

/// One read's mapping result: the emitted walks plus their summary report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingResult {
    pub walks: Vec<Walk>,
    pub report: MappingReport,
}

/// Owns the per-worker state needed to map reads against one graph/index
/// pair: a clusterer and a chain/gap filler, both borrowing the shared,
/// read-only graph and index. Each worker gets its own mapper so its gap
/// path-length cache is never shared across threads.
pub struct ReadMapper<'g> {
    graph: &'g dyn GraphView,
    index: &'g EdgeKmerIndex,
    config: GraphCoreConfig,
}

impl<'g> ReadMapper<'g> {
    pub fn new(graph: &'g dyn GraphView, index: &'g EdgeKmerIndex, config: GraphCoreConfig) -> Self {
        Self { graph, index, config }
    }

    /// Maps one read: B (index lookups inside the clusterer) → C (cluster
    /// + filter) → D (chain + gap-fill), returning every emitted walk and
    /// a [`MappingReport`] of what happened along the way.
    pub fn map_read(&self, read_id: &str, read: &[u8]) -> MappingResult {
        let clusterer = AnchorClusterer::new(self.graph, self.index, self.config);
        let clusters: Vec<Cluster> = clusterer.locate_and_cluster(read);
        let clusters_found = clusters.len();

        if clusters.is_empty() {
            let err = GraphCoreError::NoHits {
                read_id: read_id.to_string(),
            };
            tracing::warn!(read_id, error = %err, "read produced no anchors after filtering");
            return MappingResult {
                walks: Vec::new(),
                report: MappingReport {
                    clusters_found: 0,
                    ..Default::default()
                },
            };
        }

        let filler = ChainFiller::new(self.graph, self.config);
        let chain_results = filler.chain(&clusters, read);

        let mut walks = Vec::new();
        let mut gaps_closed = 0;
        let mut gaps_failed = 0;
        for result in chain_results {
            gaps_closed += result.gaps_closed;
            gaps_failed += result.gaps_failed;
            walks.extend(result.walks);
        }

        let chains_emitted = walks.len();
        tracing::info!(read_id, clusters_found, chains_emitted, gaps_closed, gaps_failed, "read mapped");

        MappingResult {
            walks,
            report: MappingReport {
                clusters_found,
                chains_emitted,
                gaps_closed,
                gaps_failed,
            },
        }
    }
}

/// Fans `reads` out across the thread pool, one `ReadMapper` borrow shared
/// read-only across tasks — the graph and k-mer index are read-only after
/// construction and freely shared across workers. The only place `rayon`
/// appears in this crate.
pub fn map_reads_parallel<'g>(
    graph: &'g (dyn GraphView + Sync),
    index: &'g EdgeKmerIndex,
    config: GraphCoreConfig,
    reads: &[(String, Vec<u8>)],
) -> Vec<(String, MappingResult)> {
    reads
        .par_iter()
        .map(|(id, seq)| {
            let mapper = ReadMapper::new(graph, index, config);
            (id.clone(), mapper.map_read(id, seq))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::TestGraph;

    fn cfg() -> GraphCoreConfig {
        GraphCoreConfig::new(5, 5).with_min_cluster_size(3)
    }

    #[test]
    fn identical_read_maps_to_single_edge_walk_with_zero_gaps() {
        let graph = TestGraph::new(5, vec![("E1", b"ACGTACGTACGTACGTACGT".to_vec())]);
        let edges = graph.edge_ids();
        let index = EdgeKmerIndex::build(&graph, &edges, 5);
        let mapper = ReadMapper::new(&graph, &index, cfg());
        let result = mapper.map_read("r1", b"ACGTACGTACGTACGTACGT");
        assert_eq!(result.walks.len(), 1);
        assert_eq!(result.walks[0].edges(), &[graph.edge_id("E1")]);
        assert_eq!(result.report.gaps_closed, 0);
        assert_eq!(result.report.gaps_failed, 0);
    }

    #[test]
    fn read_with_no_anchors_yields_empty_walks_and_zeroed_report() {
        let graph = TestGraph::new(5, vec![("E1", b"ACGTACGTACGTACGTACGT".to_vec())]);
        let edges = graph.edge_ids();
        let index = EdgeKmerIndex::build(&graph, &edges, 5);
        let mapper = ReadMapper::new(&graph, &index, cfg());
        let result = mapper.map_read("r2", b"AC");
        assert!(result.walks.is_empty());
        assert_eq!(result.report.clusters_found, 0);
    }

    #[test]
    fn map_reads_parallel_preserves_input_order_pairing() {
        let graph = TestGraph::new(5, vec![("E1", b"ACGTACGTACGTACGTACGT".to_vec())]);
        let edges = graph.edge_ids();
        let index = EdgeKmerIndex::build(&graph, &edges, 5);
        let reads = vec![
            ("r1".to_string(), b"ACGTACGTACGTACGTACGT".to_vec()),
            ("r2".to_string(), b"AC".to_vec()),
        ];
        let results = map_reads_parallel(&graph, &index, cfg(), &reads);
        assert_eq!(results.len(), 2);
        let r1 = results.iter().find(|(id, _)| id == "r1").unwrap();
        assert_eq!(r1.1.walks.len(), 1);
    }
}
