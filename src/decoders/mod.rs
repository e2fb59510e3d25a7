//! The four interchangeable decoding strategies.
//!
//! - [`viterbi`]       : direct dynamic programming over positions.
//! - [`bellman_ford`]  : repeated edge relaxation over the search DAG.
//! - [`dijkstra`]      : priority-queue search over the search DAG.
//! - [`bidirectional`] : forward and backward Dijkstra meeting in the middle.
//!
//! [`graph`] holds the implicit DAG the three search strategies share.
//! [`Strategy`] selects one of the four by tag.

pub mod bellman_ford;
pub mod bidirectional;
pub mod dijkstra;
pub mod graph;
pub mod viterbi;

pub use bellman_ford::BellmanFordDecoder;
pub use bidirectional::BidirectionalDijkstraDecoder;
pub use dijkstra::DijkstraDecoder;
pub use viterbi::ViterbiDecoder;

use crate::error::DecodeError;
use crate::model::Model;
use crate::sequence::ObservedSequence;
use crate::traits::{Decoder, Decoding};
use std::fmt;
use std::str::FromStr;

/// Strategy tag selecting one of the four decoders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Viterbi,
    BellmanFord,
    Dijkstra,
    Bidirectional,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Viterbi,
        Strategy::BellmanFord,
        Strategy::Dijkstra,
        Strategy::Bidirectional,
    ];

    /// Command-line spelling of the tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Viterbi => "viterbi",
            Strategy::BellmanFord => "bellman-ford",
            Strategy::Dijkstra => "dijkstra",
            Strategy::Bidirectional => "bidirectional",
        }
    }

    /// A boxed decoder for this strategy, with an optional step budget.
    pub fn decoder(self, step_budget: Option<usize>) -> Box<dyn Decoder + Send + Sync> {
        match (self, step_budget) {
            (Strategy::Viterbi, None) => Box::new(ViterbiDecoder::new()),
            (Strategy::Viterbi, Some(b)) => Box::new(ViterbiDecoder::new().with_step_budget(b)),
            (Strategy::BellmanFord, None) => Box::new(BellmanFordDecoder::new()),
            (Strategy::BellmanFord, Some(b)) => {
                Box::new(BellmanFordDecoder::new().with_step_budget(b))
            }
            (Strategy::Dijkstra, None) => Box::new(DijkstraDecoder::new()),
            (Strategy::Dijkstra, Some(b)) => Box::new(DijkstraDecoder::new().with_step_budget(b)),
            (Strategy::Bidirectional, None) => Box::new(BidirectionalDijkstraDecoder::new()),
            (Strategy::Bidirectional, Some(b)) => {
                Box::new(BidirectionalDijkstraDecoder::new().with_step_budget(b))
            }
        }
    }
}

impl Decoder for Strategy {
    fn name(&self) -> &'static str {
        match self {
            Strategy::Viterbi => ViterbiDecoder::new().name(),
            Strategy::BellmanFord => BellmanFordDecoder::new().name(),
            Strategy::Dijkstra => DijkstraDecoder::new().name(),
            Strategy::Bidirectional => BidirectionalDijkstraDecoder::new().name(),
        }
    }

    fn decode(&self, obs: &ObservedSequence, model: &Model) -> Result<Decoding, DecodeError> {
        match self {
            Strategy::Viterbi => ViterbiDecoder::new().decode(obs, model),
            Strategy::BellmanFord => BellmanFordDecoder::new().decode(obs, model),
            Strategy::Dijkstra => DijkstraDecoder::new().decode(obs, model),
            Strategy::Bidirectional => BidirectionalDijkstraDecoder::new().decode(obs, model),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "viterbi" => Ok(Strategy::Viterbi),
            "bellman-ford" | "bellman" => Ok(Strategy::BellmanFord),
            "dijkstra" => Ok(Strategy::Dijkstra),
            "bidirectional" | "bidijkstra" => Ok(Strategy::Bidirectional),
            other => Err(format!("unknown strategy '{other}'")),
        }
    }
}
