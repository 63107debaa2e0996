pub mod stats;
pub mod types;

// Re-export commonly used types
pub use stats::SequenceStats;
pub use types::{sanitize_sequences, Sequence, SequenceType};
