//! Long-read path-finding core for a de Bruijn assembly graph.
//!
//! Five components, leaves first: [`graph`] (A) is the read-only graph
//! query surface; [`kmer`] (B) indexes edges by k-mer occurrence;
//! [`cluster`] (C) projects a read onto the graph as collinear anchor
//! clusters; [`chain`] (D) picks a consistent cluster ordering and closes
//! the gaps between them; [`extend`] (E) grows an existing path forward
//! through bubbles, loops and scaffolded tips. [`pipeline`] wires B–D
//! together behind a single per-read entry point.

pub mod align;
pub mod anchor;
pub mod chain;
pub mod cluster;
pub mod config;
pub mod error;
pub mod extend;
pub mod graph;
pub mod kmer;
pub mod pipeline;
pub mod walk;

#[cfg(test)]
mod testutil;

pub use anchor::{Cluster, MappingInstance};
pub use chain::{ChainFiller, ChainResult, PathLengthCache};
pub use cluster::AnchorClusterer;
pub use config::GraphCoreConfig;
pub use error::{GraphCoreError, GraphCoreResult, Score};
pub use extend::{CoverageMap, ExtensionPath, PairedInfoOracle, PathExtender};
pub use graph::{EdgeId, GraphView, VertexId};
pub use kmer::EdgeKmerIndex;
pub use pipeline::{map_reads_parallel, MappingReport, MappingResult, ReadMapper};
pub use walk::Walk;
