//! Explicit tuning surface (§6, §9 "Global configuration").
//!
//! The original reaches into a process-wide `cfg::get()` singleton from deep
//! inside the algorithm. Here every tunable is a field on a plain struct,
//! built once by the caller and passed into each component's constructor —
//! no thread-local or global lookup anywhere in this crate.

/// Tunables shared by the clusterer, chainer and gap filler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphCoreConfig {
    /// K-mer size used to build the edge index.
    pub k_index: usize,
    /// Graph's own k (`>= k_index`); the trailing `k_graph - k_index` bases
    /// of an edge are its unreliable vertex-overlap region.
    pub k_graph: usize,

    pub compression_cutoff: f64,
    pub domination_cutoff: f64,
    pub min_cluster_size: usize,
    pub short_edge_cutoff: usize,

    pub long_edge: usize,
    pub max_paths: usize,
    pub mp_max_loops: usize,

    pub band_width_coefficient: f64,
    pub band_width_floor: usize,

    pub path_range_low_multiplier: f64,
    pub path_range_high_multiplier: f64,
    pub gap_slack_factor: f64,
}

impl Default for GraphCoreConfig {
    fn default() -> Self {
        Self {
            k_index: 21,
            k_graph: 21,
            compression_cutoff: 0.6,
            domination_cutoff: 1.5,
            min_cluster_size: 8,
            short_edge_cutoff: 0,
            long_edge: 500,
            max_paths: 1000,
            mp_max_loops: 2,
            band_width_coefficient: 1.0 / 3.0,
            band_width_floor: 10,
            path_range_low_multiplier: 0.7,
            path_range_high_multiplier: 1.3,
            gap_slack_factor: 1.3,
        }
    }
}

impl GraphCoreConfig {
    pub fn new(k_index: usize, k_graph: usize) -> Self {
        Self {
            k_index,
            k_graph,
            ..Self::default()
        }
    }

    pub fn with_min_cluster_size(mut self, n: usize) -> Self {
        self.min_cluster_size = n;
        self
    }

    pub fn with_mp_max_loops(mut self, n: usize) -> Self {
        self.mp_max_loops = n;
        self
    }

    pub fn with_max_paths(mut self, n: usize) -> Self {
        self.max_paths = n;
        self
    }

    pub fn with_long_edge(mut self, n: usize) -> Self {
        self.long_edge = n;
        self
    }
}
