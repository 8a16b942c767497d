pub mod cluster;
pub mod sequence;

pub use cluster::cluster_tables;
pub use sequence::{SequencePolicy, Sequencer, sequence_seats};
