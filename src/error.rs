//! Error types shared by the model, the decoders and the I/O collaborators.
//!
//! The decoders are interchangeable, so they all report failures through the
//! single [`DecodeError`] enum: the same invalid input yields the same variant
//! whichever strategy is used.

use crate::model::State;
use std::path::PathBuf;
use thiserror::Error;

/// Rejection of a numerically invalid [`Model`](crate::model::Model).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A log-probability was NaN or infinite (a zero probability included).
    #[error("non-finite log-probability for {what}: {value}")]
    NonFinite { what: String, value: f64 },
    /// A single probability exceeds one (positive log-probability).
    #[error("{what} has a probability above 1 (log-probability {value})")]
    AboveOne { what: String, value: f64 },
    /// A distribution does not sum to one in probability space.
    #[error("{what} probabilities sum to {sum}, expected 1")]
    NotNormalized { what: String, sum: f64 },
    /// The switching probability must lie strictly between 0 and 1.
    #[error("switching probability must be in (0, 1), got {0}")]
    InvalidSwitchProbability(f64),
    /// A distribution could not be turned into a sampler.
    #[error("cannot sample from {what}: {reason}")]
    Sampling { what: String, reason: String },
}

/// Failure of a decode call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The observed sequence has no symbols.
    #[error("observed sequence is empty")]
    EmptySequence,
    /// A symbol outside `{A, C, G, T}` was found.
    #[error("invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { position: usize, symbol: char },
    /// No predecessor chain connects this node to a start node.
    #[error("node ({state}, {position}) is unreachable from the start of the sequence")]
    Unreachable { state: State, position: usize },
    /// The two search frontiers never finalized a common node.
    #[error("forward and backward searches never met")]
    NoMeetingNode,
    /// The decoder gave up after the configured number of steps.
    #[error("step budget of {budget} exhausted before decoding finished")]
    StepBudgetExceeded { budget: usize },
}

/// Failure to build a simulated data set.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Sequence(#[from] DecodeError),
}

/// Failure of the sequence source or interval sink.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("FASTA parse error: {0}")]
    Fasta(String),
    #[error("no sequence records in {}", .0.display())]
    NoRecords(PathBuf),
    #[error("invalid hidden state {symbol:?} at position {position}")]
    InvalidHiddenState { position: usize, symbol: char },
    #[error(transparent)]
    Sequence(#[from] DecodeError),
}
