//! Core trait definitions for hidden-state decoders.
//!
//! To add a decoding strategy, implement [`Decoder`] for a struct holding the
//! strategy's configuration. The trait encodes the single contract shared by
//! every strategy:
//! - Input: an [`ObservedSequence`] (already validated, length `N >= 1`) and a
//!   shared, read-only [`Model`].
//! - Output: a [`Decoding`], i.e. the most probable hidden path of length `N`
//!   together with its log-probability.
//! - Failure: a [`DecodeError`]; a decoder never returns a partial path.
//!
//! Decoders allocate only call-local state, so one decoder value can serve
//! many concurrent decode calls.

use crate::error::DecodeError;
use crate::model::{Model, State};
use crate::sequence::ObservedSequence;

/// Decoded hidden path and its log-probability.
///
/// Produced once by a decoder and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoding {
    path: Vec<State>,
    log_prob: f64,
}

impl Decoding {
    pub(crate) fn new(path: Vec<State>, log_prob: f64) -> Self {
        Self { path, log_prob }
    }

    /// Hidden state at each position of the observed sequence.
    pub fn path(&self) -> &[State] {
        &self.path
    }

    /// Natural-log probability of [`path`](Self::path).
    pub fn log_prob(&self) -> f64 {
        self.log_prob
    }

    pub fn into_parts(self) -> (Vec<State>, f64) {
        (self.path, self.log_prob)
    }
}

/// A maximum-likelihood hidden-state decoder for the two-state model.
///
/// Semantics:
/// - All implementations return paths of the same log-probability for the same
///   `(sequence, model)` pair; on exact ties they may return different optimal
///   paths.
/// - Repeated calls with the same inputs return the same result.
pub trait Decoder {
    /// Short human-readable strategy name, used in logs and reports.
    fn name(&self) -> &'static str;

    /// Decode the most probable hidden path for `obs` under `model`.
    fn decode(&self, obs: &ObservedSequence, model: &Model) -> Result<Decoding, DecodeError>;

    /// Validate raw `A/C/G/T` bytes and decode them.
    ///
    /// Malformed input is rejected before any decoding work starts, with the
    /// same error for every strategy.
    fn decode_bytes(&self, bytes: &[u8], model: &Model) -> Result<Decoding, DecodeError> {
        let obs = ObservedSequence::from_bytes(bytes)?;
        self.decode(&obs, model)
    }
}

impl<D: Decoder + ?Sized> Decoder for &D {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn decode(&self, obs: &ObservedSequence, model: &Model) -> Result<Decoding, DecodeError> {
        (**self).decode(obs, model)
    }
}

impl<D: Decoder + ?Sized> Decoder for Box<D> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn decode(&self, obs: &ObservedSequence, model: &Model) -> Result<Decoding, DecodeError> {
        (**self).decode(obs, model)
    }
}
