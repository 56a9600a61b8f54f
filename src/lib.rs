//! superstring library
//!
//! Greedy shortest-common-superstring assembly over exact suffix/prefix
//! overlaps: overlap scoring, the ordered candidate pool, the read collection
//! with stable indices, and the greedy merge driver.

pub mod assembly;
pub mod candidates;
pub mod error;
pub mod overlap;
pub mod read_source;
pub mod reads;

pub use assembly::{assemble, Assembly, AssemblyConfig, GreedyAssembler, MergeEvent};
pub use candidates::{Candidate, CandidatePool};
pub use error::AssemblyError;
pub use overlap::{merge_into, merged, suffix_prefix_overlap};
pub use read_source::{read_sequences, read_tokens, ReadSourceError, SequenceFormat};
pub use reads::{dedup_reads, DedupMode, ReadSet, ReadSlot};
