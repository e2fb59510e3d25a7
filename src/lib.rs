//! GC-content segmentation of DNA with a two-state hidden Markov model.
//!
//! A nucleotide sequence is labelled position by position as GC-rich or
//! GC-poor by finding the single most probable hidden path, then the
//! maximal GC-rich runs are reported as 1-based inclusive intervals.
//!
//! ## Core idea
//! 1. Build a [`Model`] (usually [`Model::gc_content`] from a switching
//!    probability `mu`). All probabilities are stored as natural logs.
//! 2. Pick a [`Decoder`]: the Viterbi dynamic program, or one of three
//!    shortest-path searches over the `2 x N` trellis where each edge costs
//!    the negated log-probability of taking it.
//! 3. Summarise the path with [`extract_intervals`].
//!
//! All four strategies return a maximum-probability path. Viterbi,
//! Bellman-Ford and Dijkstra also agree bit-for-bit on the path and score,
//! because they share one tie policy (GC-rich wins exact ties) and negate the
//! same per-edge scores.
//!
//! ## Quick start
//! ```
//! use gc_decode::{extract_intervals, Decoder, Model, ObservedSequence, ViterbiDecoder};
//!
//! let model = Model::gc_content(0.01).unwrap();
//! let seq = [&[b'A'; 8][..], &[b'C'; 16], &[b'A'; 8]].concat();
//! let obs = ObservedSequence::from_bytes(&seq).unwrap();
//! let decoding = ViterbiDecoder::new().decode(&obs, &model).unwrap();
//! let intervals: Vec<(usize, usize)> = extract_intervals(decoding.path())
//!     .into_iter()
//!     .map(Into::into)
//!     .collect();
//! assert_eq!(intervals, vec![(9, 24)]);
//! ```
//!
//! ## Features
//! - `parallel` (default): [`batch::decode_all`] runs on the rayon pool.
//! - `tracing` (default): decoders emit spans and events through `tracing`.
//! - `heavy`: enables the long-running stress tests.

pub mod batch;
pub mod decoders;
pub mod error;
pub mod intervals;
pub mod io;
pub mod model;
pub mod sequence;
pub mod simulate;
pub mod traits;
pub mod utils;

pub use crate::decoders::{
    BellmanFordDecoder, BidirectionalDijkstraDecoder, DijkstraDecoder, Strategy, ViterbiDecoder,
};
pub use crate::error::{DecodeError, IoError, ModelError, SimulationError};
pub use crate::intervals::{extract_intervals, Interval};
pub use crate::model::{Model, Nucleotide, State};
pub use crate::sequence::ObservedSequence;
pub use crate::traits::{Decoder, Decoding};
