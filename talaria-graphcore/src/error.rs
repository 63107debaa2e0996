//! Error kinds for the path-finding core (§7).
//!
//! All *recoverable* conditions are represented here and surfaced as
//! diagnostics alongside an empty/partial result, never as a thrown control
//! transfer — callers that want the diagnostic see it via `tracing`, and the
//! happy-path return type (`Vec<Walk>`, `Vec<ExtensionPath>`, ...) stays
//! infallible. `InvariantViolation` is deliberately not a variant here: a
//! broken sort/consistency invariant indicates a bug in this crate, not a
//! condition the caller can recover from, so it is raised as a `panic!` at
//! the point of detection instead.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphCoreError {
    #[error("read {read_id:?} produced no anchors after filtering")]
    NoHits { read_id: String },

    #[error("no walk satisfies the length/score budget between edge {from_edge} and edge {to_edge}")]
    GapUnclosed { from_edge: u64, to_edge: u64 },

    #[error("extension tree explored {explored} nodes, exceeding the limit of {limit}")]
    PathExplosion { explored: usize, limit: usize },

    #[error("degenerate input: {detail}")]
    DegenerateInput { detail: String },
}

pub type GraphCoreResult<T> = Result<T, GraphCoreError>;

/// An edit-distance / path score that may be unreachable.
///
/// Models the source's `1_000_000_000` sentinel explicitly so that
/// `Unreachable` can never be accidentally combined with a finite score by
/// plain integer arithmetic (see Design Notes, "Sentinel-∞ scoring").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Score {
    Finite(u32),
    Unreachable,
}

impl Score {
    pub fn is_finite(&self) -> bool {
        matches!(self, Score::Finite(_))
    }

    pub fn value(&self) -> Option<u32> {
        match self {
            Score::Finite(v) => Some(*v),
            Score::Unreachable => None,
        }
    }

    pub fn min(self, other: Score) -> Score {
        match (self, other) {
            (Score::Finite(a), Score::Finite(b)) => Score::Finite(a.min(b)),
            (Score::Finite(a), Score::Unreachable) => Score::Finite(a),
            (Score::Unreachable, Score::Finite(b)) => Score::Finite(b),
            (Score::Unreachable, Score::Unreachable) => Score::Unreachable,
        }
    }
}
