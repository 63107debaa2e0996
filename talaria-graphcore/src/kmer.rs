//! Edge k-mer index (component B).
//!
//! Builds once from the graph: for every edge and every k-mer starting
//! offset on it, records the occurrence in a multimap keyed by the k-mer's
//! canonical (lexicographically-smaller-of-forward-and-revcomp) encoding.

use std::collections::{HashMap, HashSet};

use crate::graph::{EdgeId, GraphView};

/// A 2-bit-packed nucleotide, A=0 C=1 G=2 T=3. Anything else fails encoding.
fn base_code(b: u8) -> Option<u64> {
    match b {
        b'A' | b'a' => Some(0),
        b'C' | b'c' => Some(1),
        b'G' | b'g' => Some(2),
        b'T' | b't' => Some(3),
        _ => None,
    }
}

const CODE_BASE: [u8; 4] = [b'A', b'C', b'G', b'T'];

fn complement_code(c: u64) -> u64 {
    3 - c
}

/// Packs `seq` (length `k`, `k <= 32`) into a 2-bit-per-base integer.
/// Returns `None` if the window contains a non-ACGT byte or `k > 32`.
pub fn encode_kmer(seq: &[u8]) -> Option<u64> {
    if seq.len() > 32 {
        return None;
    }
    let mut code: u64 = 0;
    for &b in seq {
        code = (code << 2) | base_code(b)?;
    }
    Some(code)
}

/// Reverse-complement of a packed k-mer of length `k`.
pub fn revcomp_kmer(kmer: u64, k: usize) -> u64 {
    let mut fwd = kmer;
    let mut rc: u64 = 0;
    for _ in 0..k {
        let base = fwd & 0b11;
        rc = (rc << 2) | complement_code(base);
        fwd >>= 2;
    }
    rc
}

/// Canonical form: the lexicographically smaller of a k-mer and its
/// reverse complement, so that a read and the opposite strand of the same
/// underlying edge hash identically.
pub fn canonical_kmer(kmer: u64, k: usize) -> u64 {
    kmer.min(revcomp_kmer(kmer, k))
}

fn decode_kmer(kmer: u64, k: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; k];
    let mut v = kmer;
    for i in (0..k).rev() {
        bytes[i] = CODE_BASE[(v & 0b11) as usize];
        v >>= 2;
    }
    bytes
}

/// Every k-mer that is a single-base substitution away from a homopolymer
/// run of length `k`. These dominate chance matches in long, noisy reads
/// and are excluded from anchor generation. Mirrors the source's
/// `fill_banned_kmers` construction (including its incidental collisions)
/// rather than a closed-form combinatorial count.
pub fn banned_kmers(k: usize) -> HashSet<u64> {
    let mut banned = HashSet::new();
    for base in 0..4u8 {
        for other in 0..4u8 {
            for pos in 0..k {
                let mut s = vec![base; k];
                s[pos] = other;
                let seq: Vec<u8> = s.iter().map(|&c| CODE_BASE[c as usize]).collect();
                if let Some(code) = encode_kmer(&seq) {
                    banned.insert(canonical_kmer(code, k));
                }
            }
        }
    }
    banned
}

/// A single `(edge, k-mer starting offset)` occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub edge: EdgeId,
    pub offset: u32,
}

/// Maps each canonical k-mer to every place it occurs on the graph.
pub struct EdgeKmerIndex {
    k: usize,
    multimap: HashMap<u64, Vec<Occurrence>>,
    banned: HashSet<u64>,
}

impl EdgeKmerIndex {
    /// Builds the index once from `graph`, visiting every edge's k-mer
    /// starting offsets in ascending `(edge_int_id, offset)` order so
    /// `lookup` results are deterministic.
    pub fn build(graph: &dyn GraphView, edges: &[EdgeId], k: usize) -> Self {
        let mut multimap: HashMap<u64, Vec<Occurrence>> = HashMap::new();
        let mut sorted_edges = edges.to_vec();
        sorted_edges.sort_by_key(|e| graph.int_id(*e));

        for &edge in &sorted_edges {
            let seq = graph.edge_seq(edge);
            if seq.len() < k {
                continue;
            }
            // Every valid K_INDEX-mer starting offset on the edge's full
            // sequence, independent of `graph.length(edge)` (a K_GRAPH-sized
            // count that under-covers the index's own k when k_graph >
            // k_index).
            for offset in 0..=(seq.len() - k) {
                if let Some(code) = encode_kmer(&seq[offset..offset + k]) {
                    let canon = canonical_kmer(code, k);
                    multimap.entry(canon).or_default().push(Occurrence {
                        edge,
                        offset: offset as u32,
                    });
                }
            }
        }

        tracing::debug!(
            k,
            distinct_kmers = multimap.len(),
            edges = sorted_edges.len(),
            "built edge k-mer index"
        );

        Self {
            k,
            multimap,
            banned: banned_kmers(k),
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// `true` iff this k-mer is in the small banned (homopolymer-adjacent) set.
    pub fn is_banned(&self, kmer: u64) -> bool {
        self.banned.contains(&canonical_kmer(kmer, self.k))
    }

    /// `true` iff any occurrence of `kmer` exists on the graph.
    pub fn contains(&self, kmer: u64) -> bool {
        self.multimap.contains_key(&canonical_kmer(kmer, self.k))
    }

    /// All `(edge, offset)` occurrences of `kmer`, or an empty slice.
    pub fn lookup(&self, kmer: u64) -> &[Occurrence] {
        self.multimap
            .get(&canonical_kmer(kmer, self.k))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    #[cfg(test)]
    pub(crate) fn decode(kmer: u64, k: usize) -> Vec<u8> {
        decode_kmer(kmer, k)
    }
}
